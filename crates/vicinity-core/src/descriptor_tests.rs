use crate::aligned::AlignedBuffer;
use crate::descriptor::{VectorDistance, DEFAULT_LP_EXPONENT};
use crate::metric::Metric;

fn sample(len: usize, seed: f32) -> AlignedBuffer {
    let data: Vec<f32> = (0..len)
        .map(|i| ((i as f32) * 0.41 + seed).sin().abs() + 0.01)
        .collect();
    AlignedBuffer::from_slice(&data)
}

#[test]
fn default_is_l2() {
    let dist = VectorDistance::default();
    assert_eq!(dist.metric(), Metric::L2);
    assert!((dist.exponent() - DEFAULT_LP_EXPONENT).abs() < f32::EPSILON);
}

#[test]
fn distance_matches_reference_for_every_metric() {
    let a = sample(96, 0.2);
    let b = sample(96, 3.1);
    for metric in Metric::ALL {
        let dist = VectorDistance::new(metric);
        let fast = dist.distance(&a, &b);
        let slow = dist.reference_distance(&a, &b);
        let rel = (fast - slow).abs() / slow.abs().max(1e-6);
        assert!(rel < 1e-4, "{metric}: simd={fast}, scalar={slow}");
    }
}

#[test]
fn capability_flags_follow_the_metric() {
    for metric in Metric::ALL {
        let dist = VectorDistance::new(metric);
        assert_eq!(dist.has_normalize(), metric.has_normalize());
        assert_eq!(dist.need_normalize(), metric.need_normalize());
    }
}

#[test]
fn lp_exponent_changes_the_result() {
    let a = sample(32, 0.5);
    let b = sample(32, 2.0);
    let mut dist = VectorDistance::new(Metric::Lp);
    let at_two = dist.distance(&a, &b);
    dist.set_exponent(3.0);
    let at_three = dist.distance(&a, &b);
    assert!((at_two - at_three).abs() > 1e-6);
}

#[test]
fn lp_defaults_to_euclidean() {
    let a = sample(64, 1.1);
    let b = sample(64, 4.4);
    let lp = VectorDistance::new(Metric::Lp);
    let l2 = VectorDistance::new(Metric::L2);
    let rel = (lp.distance(&a, &b) - l2.distance(&a, &b)).abs()
        / l2.distance(&a, &b).max(1e-6);
    assert!(rel < 1e-4);
}

#[test]
fn exponent_is_ignored_by_other_metrics() {
    let a = sample(48, 0.8);
    let b = sample(48, 2.9);
    let plain = VectorDistance::new(Metric::L1);
    let odd = VectorDistance::with_exponent(Metric::L1, 7.5);
    assert_eq!(plain.distance(&a, &b), odd.distance(&a, &b));
}

#[test]
fn normalize_then_norm_is_one() {
    let dist = VectorDistance::new(Metric::Cosine);
    let mut v = sample(100, 1.9);
    dist.normalize(&mut v);
    assert!((dist.norm(&v) - 1.0).abs() < 1e-5);
}

#[test]
fn normalize_to_preserves_direction() {
    let dist = VectorDistance::new(Metric::L2);
    let src = sample(64, 0.6);
    let mut dst = AlignedBuffer::zeroed(64);
    dist.normalize_to(&src, &mut dst);
    // Same direction: cosine with the original stays 1.
    let cos = VectorDistance::new(Metric::Cosine);
    assert!((cos.distance(&src, &dst) - 1.0).abs() < 1e-5);
}

#[test]
fn normalized_metrics_match_plain_metrics_on_unit_inputs() {
    let dist = VectorDistance::new(Metric::L2);
    let mut a = sample(128, 0.3);
    let mut b = sample(128, 5.5);
    dist.normalize(&mut a);
    dist.normalize(&mut b);

    let l2 = VectorDistance::new(Metric::L2).distance(&a, &b);
    let nl2 = VectorDistance::new(Metric::NormalizedL2).distance(&a, &b);
    assert!((l2 - nl2).abs() < 1e-3, "l2={l2}, normalized_l2={nl2}");

    let cos = VectorDistance::new(Metric::Cosine).distance(&a, &b);
    let ncos = VectorDistance::new(Metric::NormalizedCosine).distance(&a, &b);
    assert!((1.0 - cos - ncos).abs() < 1e-3, "cosine={cos}, normalized={ncos}");
}

#[test]
fn descriptor_is_copy() {
    let dist = VectorDistance::new(Metric::Hamming);
    let copy = dist;
    assert_eq!(copy.metric(), Metric::Hamming);
    assert_eq!(dist.metric(), Metric::Hamming);
}

#[test]
#[should_panic(expected = "does not support norm")]
#[cfg(debug_assertions)]
fn norm_on_unsupported_metric_panics_in_debug() {
    let dist = VectorDistance::new(Metric::Hamming);
    let v = sample(16, 0.1);
    let _ = dist.norm(&v);
}

#[test]
#[should_panic(expected = "does not support normalize")]
#[cfg(debug_assertions)]
fn normalize_on_unsupported_metric_panics_in_debug() {
    let dist = VectorDistance::new(Metric::InnerProduct);
    let mut v = sample(16, 0.1);
    dist.normalize(&mut v);
}

#[test]
#[should_panic(expected = "exponent must be > 0")]
#[cfg(debug_assertions)]
fn nonpositive_exponent_panics_in_debug() {
    let mut dist = VectorDistance::new(Metric::Lp);
    dist.set_exponent(0.0);
}
