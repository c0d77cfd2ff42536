//! Per-metric kernel dispatch.
//!
//! [`VectorDistance`] resolves a [`Metric`] to concrete function pointers
//! once, at construction. Hot paths then call through the stored pointers
//! with no per-call branching on the metric.

use crate::metric::Metric;
use crate::{scalar, simd};
use tracing::debug;

/// Default exponent used by [`Metric::Lp`] until one is set explicitly.
pub const DEFAULT_LP_EXPONENT: f32 = 2.0;

/// Uniform kernel signature. The third argument is the Lp exponent; every
/// other metric ignores it, which keeps the dispatch table branch-free.
pub type KernelFn = fn(&[f32], &[f32], f32) -> f32;

#[inline]
fn resolve(metric: Metric) -> (KernelFn, KernelFn) {
    match metric {
        Metric::L1 => (
            (|a, b, _| simd::l1(a, b)) as KernelFn,
            (|a, b, _| scalar::l1(a, b)) as KernelFn,
        ),
        Metric::L2 => (
            (|a, b, _| simd::l2(a, b)) as KernelFn,
            (|a, b, _| scalar::l2(a, b)) as KernelFn,
        ),
        Metric::NormalizedL2 => (
            (|a, b, _| simd::normalized_l2(a, b)) as KernelFn,
            (|a, b, _| scalar::normalized_l2(a, b)) as KernelFn,
        ),
        Metric::InnerProduct => (
            (|a, b, _| simd::inner_product(a, b)) as KernelFn,
            (|a, b, _| scalar::inner_product(a, b)) as KernelFn,
        ),
        Metric::Cosine => (
            (|a, b, _| simd::cosine(a, b)) as KernelFn,
            (|a, b, _| scalar::cosine(a, b)) as KernelFn,
        ),
        Metric::NormalizedCosine => (
            (|a, b, _| simd::normalized_cosine(a, b)) as KernelFn,
            (|a, b, _| scalar::normalized_cosine(a, b)) as KernelFn,
        ),
        Metric::MinMaxJaccard => (
            (|a, b, _| simd::min_max_jaccard(a, b)) as KernelFn,
            (|a, b, _| scalar::min_max_jaccard(a, b)) as KernelFn,
        ),
        Metric::BinaryJaccard => (
            (|a, b, _| simd::binary_jaccard(a, b)) as KernelFn,
            (|a, b, _| scalar::binary_jaccard(a, b)) as KernelFn,
        ),
        Metric::Hamming => (
            (|a, b, _| simd::hamming(a, b)) as KernelFn,
            (|a, b, _| scalar::hamming(a, b)) as KernelFn,
        ),
        Metric::Canberra => (
            (|a, b, _| simd::canberra(a, b)) as KernelFn,
            (|a, b, _| scalar::canberra(a, b)) as KernelFn,
        ),
        Metric::Lp => (simd::lp as KernelFn, scalar::lp as KernelFn),
        Metric::BrayCurtis => (
            (|a, b, _| simd::bray_curtis(a, b)) as KernelFn,
            (|a, b, _| scalar::bray_curtis(a, b)) as KernelFn,
        ),
        Metric::JensenShannon => (
            (|a, b, _| simd::jensen_shannon(a, b)) as KernelFn,
            (|a, b, _| scalar::jensen_shannon(a, b)) as KernelFn,
        ),
        Metric::Linf => (
            (|a, b, _| simd::linf(a, b)) as KernelFn,
            (|a, b, _| scalar::linf(a, b)) as KernelFn,
        ),
        Metric::CrossEntropy => (
            (|a, b, _| simd::cross_entropy(a, b)) as KernelFn,
            (|a, b, _| scalar::cross_entropy(a, b)) as KernelFn,
        ),
        Metric::Kld => (
            (|a, b, _| simd::kld(a, b)) as KernelFn,
            (|a, b, _| scalar::kld(a, b)) as KernelFn,
        ),
        Metric::Angle => (
            (|a, b, _| simd::angle(a, b)) as KernelFn,
            (|a, b, _| scalar::angle(a, b)) as KernelFn,
        ),
        Metric::NormalizedAngle => (
            (|a, b, _| simd::normalized_angle(a, b)) as KernelFn,
            (|a, b, _| scalar::normalized_angle(a, b)) as KernelFn,
        ),
    }
}

/// A metric resolved to its vectorized and scalar reference kernels.
///
/// Cheap to copy; build one per metric and reuse it across every distance
/// call.
#[derive(Debug, Clone, Copy)]
pub struct VectorDistance {
    metric: Metric,
    exponent: f32,
    distance_fn: KernelFn,
    reference_fn: KernelFn,
}

impl VectorDistance {
    /// Resolves `metric` to its kernel pair.
    #[must_use]
    pub fn new(metric: Metric) -> Self {
        Self::with_exponent(metric, DEFAULT_LP_EXPONENT)
    }

    /// Resolves `metric` with an explicit Lp exponent.
    ///
    /// The exponent only affects [`Metric::Lp`]; other metrics ignore it.
    #[must_use]
    pub fn with_exponent(metric: Metric, exponent: f32) -> Self {
        debug_assert!(exponent > 0.0, "Lp exponent must be > 0");
        let (distance_fn, reference_fn) = resolve(metric);
        debug!(metric = %metric, exponent, "resolved distance kernels");
        Self {
            metric,
            exponent,
            distance_fn,
            reference_fn,
        }
    }

    /// The metric this descriptor dispatches to.
    #[must_use]
    pub const fn metric(&self) -> Metric {
        self.metric
    }

    /// Current Lp exponent.
    #[must_use]
    pub const fn exponent(&self) -> f32 {
        self.exponent
    }

    /// Replaces the Lp exponent.
    pub fn set_exponent(&mut self, exponent: f32) {
        debug_assert!(exponent > 0.0, "Lp exponent must be > 0");
        self.exponent = exponent;
    }

    /// Whether norm/normalize operations are meaningful for this metric.
    #[must_use]
    pub const fn has_normalize(&self) -> bool {
        self.metric.has_normalize()
    }

    /// Whether inputs must be unit-normalized before calling
    /// [`Self::distance`].
    #[must_use]
    pub const fn need_normalize(&self) -> bool {
        self.metric.need_normalize()
    }

    /// Computes the distance with the vectorized kernel.
    ///
    /// Both buffers must be 64-byte aligned and of equal length.
    #[inline]
    #[must_use]
    pub fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        (self.distance_fn)(a, b, self.exponent)
    }

    /// Computes the distance with the scalar reference kernel. No alignment
    /// requirement; this is the semantic ground truth for the metric.
    #[inline]
    #[must_use]
    pub fn reference_distance(&self, a: &[f32], b: &[f32]) -> f32 {
        (self.reference_fn)(a, b, self.exponent)
    }

    /// L2 norm of `v`. Only valid when [`Self::has_normalize`] is true.
    #[must_use]
    pub fn norm(&self, v: &[f32]) -> f32 {
        debug_assert!(self.has_normalize(), "metric does not support norm");
        simd::norm_l2(v)
    }

    /// Normalizes `v` in place. Only valid when [`Self::has_normalize`] is
    /// true; zero vectors are left unchanged.
    pub fn normalize(&self, v: &mut [f32]) {
        debug_assert!(self.has_normalize(), "metric does not support normalize");
        simd::normalize(v);
    }

    /// Writes the unit-norm copy of `src` into `dst`. Only valid when
    /// [`Self::has_normalize`] is true.
    pub fn normalize_to(&self, src: &[f32], dst: &mut [f32]) {
        debug_assert!(self.has_normalize(), "metric does not support normalize");
        simd::normalize_to(src, dst);
    }
}

impl Default for VectorDistance {
    fn default() -> Self {
        Self::new(Metric::L2)
    }
}
