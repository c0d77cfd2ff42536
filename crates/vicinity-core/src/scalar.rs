//! Scalar reference kernels.
//!
//! One straightforward per-element loop per metric. These are the ground
//! truth the vectorized kernels in [`crate::simd`] are tested against; they
//! carry no alignment requirement. Both implementations of a metric share
//! the same numerical-hazard policy, so they agree within floating-point
//! summation-order tolerance.
//!
//! Equal-length inputs are a precondition on every two-vector kernel,
//! checked by a debug assertion; release-mode behavior on violation is
//! unspecified.

use crate::binary;

/// Clamp applied to non-positive KL-divergence operands before the
/// ratio/log. A deliberate stability policy, including at the aᵢ=0 / bᵢ=0
/// boundaries.
pub const KLD_EPSILON: f32 = 1e-7;

#[inline(always)]
fn contract(a: &[f32], b: &[f32]) {
    debug_assert_eq!(a.len(), b.len(), "vector length mismatch");
}

/// L1 (Manhattan) distance: `Σ|aᵢ − bᵢ|`.
#[must_use]
pub fn l1(a: &[f32], b: &[f32]) -> f32 {
    contract(a, b);
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

/// L2 (Euclidean) distance: `√Σ(aᵢ − bᵢ)²`.
#[must_use]
pub fn l2(a: &[f32], b: &[f32]) -> f32 {
    contract(a, b);
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f32>()
        .sqrt()
}

/// L2 distance over unit-norm inputs: `√(2 − 2·IP)`.
///
/// The operand is clamped at zero before the square root; f32 rounding can
/// push `2 − 2·IP` slightly negative for identical unit vectors.
#[must_use]
pub fn normalized_l2(a: &[f32], b: &[f32]) -> f32 {
    let ip = inner_product(a, b);
    (2.0 - 2.0 * ip).max(0.0).sqrt()
}

/// Inner product: `Σ aᵢ·bᵢ`.
#[must_use]
pub fn inner_product(a: &[f32], b: &[f32]) -> f32 {
    contract(a, b);
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Cosine of the angle between the vectors: `IP / (‖a‖·‖b‖)`.
///
/// Returns 0.0 when either vector has zero norm.
#[must_use]
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    contract(a, b);
    let mut ip = 0.0f32;
    let mut norm_a_sq = 0.0f32;
    let mut norm_b_sq = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        ip += x * y;
        norm_a_sq += x * x;
        norm_b_sq += y * y;
    }
    if norm_a_sq == 0.0 || norm_b_sq == 0.0 {
        return 0.0;
    }
    ip / (norm_a_sq.sqrt() * norm_b_sq.sqrt())
}

/// Cosine distance over unit-norm inputs: `1 − IP`.
#[must_use]
pub fn normalized_cosine(a: &[f32], b: &[f32]) -> f32 {
    1.0 - inner_product(a, b)
}

/// Min-max (weighted) Jaccard distance: `1 − Σmin(aᵢ,bᵢ) / Σmax(aᵢ,bᵢ)`.
///
/// Returns 0.0 when the denominator is exactly 0 (two empty sets are
/// identical).
#[must_use]
pub fn min_max_jaccard(a: &[f32], b: &[f32]) -> f32 {
    contract(a, b);
    let mut min_sum = 0.0f32;
    let mut max_sum = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        min_sum += x.min(*y);
        max_sum += x.max(*y);
    }
    if max_sum == 0.0 {
        return 0.0;
    }
    1.0 - min_sum / max_sum
}

/// Jaccard distance over the raw bit patterns: `1 − |AND| / |OR|`.
#[must_use]
pub fn binary_jaccard(a: &[f32], b: &[f32]) -> f32 {
    binary::jaccard_words32(a, b)
}

/// Number of differing bits between the raw bit patterns.
#[must_use]
pub fn hamming(a: &[f32], b: &[f32]) -> f32 {
    binary::hamming_words32(a, b)
}

/// Canberra distance: `Σ|aᵢ − bᵢ| / (|aᵢ| + |bᵢ|)`.
///
/// A term contributes 0 when both operands are exactly 0.
#[must_use]
pub fn canberra(a: &[f32], b: &[f32]) -> f32 {
    contract(a, b);
    let mut sum = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        let denom = x.abs() + y.abs();
        if denom > 0.0 {
            sum += (x - y).abs() / denom;
        }
    }
    sum
}

/// Minkowski distance with runtime exponent p: `(Σ|aᵢ − bᵢ|^p)^(1/p)`.
///
/// Requires p > 0; zero differences are skipped, matching the masked lanes
/// of the vectorized kernel.
#[must_use]
pub fn lp(a: &[f32], b: &[f32], p: f32) -> f32 {
    contract(a, b);
    debug_assert!(p > 0.0, "Lp exponent must be > 0");
    let mut sum = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        let d = (x - y).abs();
        if d > 0.0 {
            sum += d.powf(p);
        }
    }
    sum.powf(1.0 / p)
}

/// Bray-Curtis dissimilarity: `Σ|aᵢ − bᵢ| / Σ|aᵢ + bᵢ|`.
///
/// Returns 0.0 when the denominator is exactly 0.
#[must_use]
pub fn bray_curtis(a: &[f32], b: &[f32]) -> f32 {
    contract(a, b);
    let mut num = 0.0f32;
    let mut denom = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        num += (x - y).abs();
        denom += (x + y).abs();
    }
    if denom == 0.0 {
        return 0.0;
    }
    num / denom
}

/// Jensen-Shannon divergence:
/// `0.5·Σ[aᵢ·log(aᵢ/mᵢ) + bᵢ·log(bᵢ/mᵢ)]` with `mᵢ = 0.5·(aᵢ + bᵢ)`.
///
/// Zero operands contribute 0 (the `0·log 0 = 0` convention).
#[must_use]
pub fn jensen_shannon(a: &[f32], b: &[f32]) -> f32 {
    contract(a, b);
    let mut sum = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        let m = 0.5 * (x + y);
        if *x > 0.0 {
            sum += x * (x / m).ln();
        }
        if *y > 0.0 {
            sum += y * (y / m).ln();
        }
    }
    0.5 * sum
}

/// L∞ (Chebyshev) distance: `max|aᵢ − bᵢ|`.
#[must_use]
pub fn linf(a: &[f32], b: &[f32]) -> f32 {
    contract(a, b);
    a.iter()
        .zip(b)
        .fold(0.0f32, |best, (x, y)| best.max((x - y).abs()))
}

/// Cross entropy: `−Σ aᵢ·log(bᵢ)`.
#[must_use]
pub fn cross_entropy(a: &[f32], b: &[f32]) -> f32 {
    contract(a, b);
    let sum: f32 = a.iter().zip(b).map(|(x, y)| x * y.ln()).sum();
    -sum
}

/// Kullback-Leibler divergence: `Σ aᵢ·log(aᵢ/bᵢ)`.
///
/// Non-positive operands are clamped to [`KLD_EPSILON`] before the
/// ratio/log.
#[must_use]
pub fn kld(a: &[f32], b: &[f32]) -> f32 {
    contract(a, b);
    let mut sum = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        let x = if *x > 0.0 { *x } else { KLD_EPSILON };
        let y = if *y > 0.0 { *y } else { KLD_EPSILON };
        sum += x * (x / y).ln();
    }
    sum
}

/// Angle between the vectors: `arccos(clamp(cosine, [-1, 1]))`.
///
/// The clamp guarantees a cosine at or beyond ±1 yields 0 or π, never NaN.
#[must_use]
pub fn angle(a: &[f32], b: &[f32]) -> f32 {
    cosine(a, b).clamp(-1.0, 1.0).acos()
}

/// Angle variant over unit-norm inputs: `arccos(clamp(1 − IP, [-1, 1]))`.
#[must_use]
pub fn normalized_angle(a: &[f32], b: &[f32]) -> f32 {
    normalized_cosine(a, b).clamp(-1.0, 1.0).acos()
}

/// L2 norm: `√Σ vᵢ²`.
#[must_use]
pub fn norm_l2(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}
