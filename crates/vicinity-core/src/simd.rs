//! Vectorized kernels using the `wide` crate for portable SIMD.
//!
//! Every metric follows the same shape:
//!
//! 1. `vec_size = n − n % LANE_WIDTH`
//! 2. stride `[0, vec_size)` in [`LANE_WIDTH`] steps, accumulating into a
//!    lane-width register
//! 3. horizontally reduce the accumulator (sum, or max for L∞)
//! 4. fold the scalar tail `[vec_size, n)` into the same running total
//! 5. apply the closing scalar transform (sqrt, division, arccos, negation)
//!
//! Zero/edge lanes use masked-select instead of branches: Canberra
//! substitutes 1.0 as divisor where `|aᵢ|+|bᵢ| = 0` and forces the term to
//! 0; Lp applies the same trick to avoid `0^p` hazards; KLD blends its
//! ε-clamp per lane. These masks must not be replaced with branches.
//!
//! # Contract
//!
//! All entry points require 64-byte-aligned buffers and (for two-vector
//! kernels) equal lengths. Violations are checked by debug assertions and
//! unspecified in release builds.

use crate::aligned::{is_aligned, ALIGNMENT};
use crate::binary;
use crate::scalar::KLD_EPSILON;
use tracing::info;
use wide::{f32x8, CmpGt};

/// Scalar elements processed per SIMD operation for 32-bit floats.
pub const LANE_WIDTH: usize = 8;

/// Emits a one-time report of the vectorization parameters. Call at
/// startup if the surrounding service logs its runtime configuration.
pub fn log_lane_configuration() {
    info!(
        lane_width = LANE_WIDTH,
        alignment = ALIGNMENT,
        "vectorized distance kernels enabled"
    );
}

#[inline(always)]
fn contract2(a: &[f32], b: &[f32]) {
    debug_assert_eq!(a.len(), b.len(), "vector length mismatch");
    debug_assert!(
        a.is_empty() || (is_aligned(a.as_ptr()) && is_aligned(b.as_ptr())),
        "buffers must be 64-byte aligned"
    );
}

#[inline(always)]
fn contract1(v: &[f32]) {
    debug_assert!(
        v.is_empty() || is_aligned(v.as_ptr()),
        "buffer must be 64-byte aligned"
    );
}

/// L1 (Manhattan) distance: `Σ|aᵢ − bᵢ|`.
#[must_use]
pub fn l1(a: &[f32], b: &[f32]) -> f32 {
    contract2(a, b);
    let len = a.len();
    let vec_size = len - len % LANE_WIDTH;
    let mut sum = f32x8::ZERO;
    let mut i = 0;
    while i < vec_size {
        let va = f32x8::from(&a[i..i + LANE_WIDTH]);
        let vb = f32x8::from(&b[i..i + LANE_WIDTH]);
        sum += (va - vb).abs();
        i += LANE_WIDTH;
    }
    let mut total = sum.reduce_add();
    for j in vec_size..len {
        total += (a[j] - b[j]).abs();
    }
    total
}

/// L2 (Euclidean) distance: `√Σ(aᵢ − bᵢ)²`.
#[must_use]
pub fn l2(a: &[f32], b: &[f32]) -> f32 {
    contract2(a, b);
    let len = a.len();
    let vec_size = len - len % LANE_WIDTH;
    let mut sum = f32x8::ZERO;
    let mut i = 0;
    while i < vec_size {
        let va = f32x8::from(&a[i..i + LANE_WIDTH]);
        let vb = f32x8::from(&b[i..i + LANE_WIDTH]);
        let diff = va - vb;
        sum = diff.mul_add(diff, sum);
        i += LANE_WIDTH;
    }
    let mut total = sum.reduce_add();
    for j in vec_size..len {
        let d = a[j] - b[j];
        total += d * d;
    }
    total.sqrt()
}

/// L2 distance over unit-norm inputs: `√(2 − 2·IP)`, operand clamped at 0.
#[must_use]
pub fn normalized_l2(a: &[f32], b: &[f32]) -> f32 {
    let ip = inner_product(a, b);
    (2.0 - 2.0 * ip).max(0.0).sqrt()
}

/// Inner product: `Σ aᵢ·bᵢ`.
#[must_use]
pub fn inner_product(a: &[f32], b: &[f32]) -> f32 {
    contract2(a, b);
    let len = a.len();
    let vec_size = len - len % LANE_WIDTH;
    let mut sum = f32x8::ZERO;
    let mut i = 0;
    while i < vec_size {
        let va = f32x8::from(&a[i..i + LANE_WIDTH]);
        let vb = f32x8::from(&b[i..i + LANE_WIDTH]);
        sum = va.mul_add(vb, sum);
        i += LANE_WIDTH;
    }
    let mut total = sum.reduce_add();
    for j in vec_size..len {
        total += a[j] * b[j];
    }
    total
}

/// Cosine of the angle between the vectors, single-pass fused dot + norms.
///
/// Returns 0.0 when either vector has zero norm.
#[must_use]
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    contract2(a, b);
    let len = a.len();
    let vec_size = len - len % LANE_WIDTH;
    let mut ip_sum = f32x8::ZERO;
    let mut norm_a_sum = f32x8::ZERO;
    let mut norm_b_sum = f32x8::ZERO;
    let mut i = 0;
    while i < vec_size {
        let va = f32x8::from(&a[i..i + LANE_WIDTH]);
        let vb = f32x8::from(&b[i..i + LANE_WIDTH]);
        ip_sum = va.mul_add(vb, ip_sum);
        norm_a_sum = va.mul_add(va, norm_a_sum);
        norm_b_sum = vb.mul_add(vb, norm_b_sum);
        i += LANE_WIDTH;
    }
    let mut ip = ip_sum.reduce_add();
    let mut norm_a_sq = norm_a_sum.reduce_add();
    let mut norm_b_sq = norm_b_sum.reduce_add();
    for j in vec_size..len {
        let x = a[j];
        let y = b[j];
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

/// Min-max (weighted) Jaccard distance: `1 − Σmin / Σmax`.
///
/// Returns 0.0 when the denominator is exactly 0.
#[must_use]
pub fn min_max_jaccard(a: &[f32], b: &[f32]) -> f32 {
    contract2(a, b);
    let len = a.len();
    let vec_size = len - len % LANE_WIDTH;
    let mut min_sum = f32x8::ZERO;
    let mut max_sum = f32x8::ZERO;
    let mut i = 0;
    while i < vec_size {
        let va = f32x8::from(&a[i..i + LANE_WIDTH]);
        let vb = f32x8::from(&b[i..i + LANE_WIDTH]);
        min_sum += va.min(vb);
        max_sum += va.max(vb);
        i += LANE_WIDTH;
    }
    let mut mins = min_sum.reduce_add();
    let mut maxs = max_sum.reduce_add();
    for j in vec_size..len {
        mins += a[j].min(b[j]);
        maxs += a[j].max(b[j]);
    }
    if maxs == 0.0 {
        return 0.0;
    }
    1.0 - mins / maxs
}

/// Jaccard distance over the raw bit patterns; 64-bit overlay fast path.
#[must_use]
pub fn binary_jaccard(a: &[f32], b: &[f32]) -> f32 {
    binary::jaccard_words64(a, b)
}

/// Hamming distance over the raw bit patterns; 64-bit overlay fast path.
#[must_use]
pub fn hamming(a: &[f32], b: &[f32]) -> f32 {
    binary::hamming_words64(a, b)
}

/// Canberra distance with masked zero-denominator lanes.
#[must_use]
pub fn canberra(a: &[f32], b: &[f32]) -> f32 {
    contract2(a, b);
    let len = a.len();
    let vec_size = len - len % LANE_WIDTH;
    let mut sum = f32x8::ZERO;
    let mut i = 0;
    while i < vec_size {
        let va = f32x8::from(&a[i..i + LANE_WIDTH]);
        let vb = f32x8::from(&b[i..i + LANE_WIDTH]);
        let denom = va.abs() + vb.abs();
        // Substitute 1.0 as divisor where the denominator is 0, then force
        // those terms to 0; no divergent control flow.
        let mask = denom.cmp_gt(f32x8::ZERO);
        let safe = mask.blend(denom, f32x8::ONE);
        sum += mask.blend((va - vb).abs() / safe, f32x8::ZERO);
        i += LANE_WIDTH;
    }
    let mut total = sum.reduce_add();
    for j in vec_size..len {
        let denom = a[j].abs() + b[j].abs();
        if denom > 0.0 {
            total += (a[j] - b[j]).abs() / denom;
        }
    }
    total
}

/// Minkowski distance with runtime exponent p, masked zero-difference lanes.
#[must_use]
pub fn lp(a: &[f32], b: &[f32], p: f32) -> f32 {
    contract2(a, b);
    debug_assert!(p > 0.0, "Lp exponent must be > 0");
    let len = a.len();
    let vec_size = len - len % LANE_WIDTH;
    let pv = f32x8::splat(p);
    let mut sum = f32x8::ZERO;
    let mut i = 0;
    while i < vec_size {
        let va = f32x8::from(&a[i..i + LANE_WIDTH]);
        let vb = f32x8::from(&b[i..i + LANE_WIDTH]);
        let d = (va - vb).abs();
        // Keep `pow` away from 0 lanes: raise 1.0 there and discard.
        let mask = d.cmp_gt(f32x8::ZERO);
        let safe = mask.blend(d, f32x8::ONE);
        sum += mask.blend(safe.pow_f32x8(pv), f32x8::ZERO);
        i += LANE_WIDTH;
    }
    let mut total = sum.reduce_add();
    for j in vec_size..len {
        let d = (a[j] - b[j]).abs();
        if d > 0.0 {
            total += d.powf(p);
        }
    }
    total.powf(1.0 / p)
}

/// Bray-Curtis dissimilarity. Returns 0.0 when the denominator is 0.
#[must_use]
pub fn bray_curtis(a: &[f32], b: &[f32]) -> f32 {
    contract2(a, b);
    let len = a.len();
    let vec_size = len - len % LANE_WIDTH;
    let mut num_sum = f32x8::ZERO;
    let mut denom_sum = f32x8::ZERO;
    let mut i = 0;
    while i < vec_size {
        let va = f32x8::from(&a[i..i + LANE_WIDTH]);
        let vb = f32x8::from(&b[i..i + LANE_WIDTH]);
        num_sum += (va - vb).abs();
        denom_sum += (va + vb).abs();
        i += LANE_WIDTH;
    }
    let mut num = num_sum.reduce_add();
    let mut denom = denom_sum.reduce_add();
    for j in vec_size..len {
        num += (a[j] - b[j]).abs();
        denom += (a[j] + b[j]).abs();
    }
    if denom == 0.0 {
        return 0.0;
    }
    num / denom
}

/// Jensen-Shannon divergence with masked zero-operand lanes.
#[must_use]
pub fn jensen_shannon(a: &[f32], b: &[f32]) -> f32 {
    contract2(a, b);
    let len = a.len();
    let vec_size = len - len % LANE_WIDTH;
    let half = f32x8::splat(0.5);
    let mut sum = f32x8::ZERO;
    let mut i = 0;
    while i < vec_size {
        let va = f32x8::from(&a[i..i + LANE_WIDTH]);
        let vb = f32x8::from(&b[i..i + LANE_WIDTH]);
        let m = (va + vb) * half;
        // Zero operands contribute 0; the blended-away lanes may compute
        // NaN (0/0) but never reach the accumulator.
        let term_a = va.cmp_gt(f32x8::ZERO).blend(va * (va / m).ln(), f32x8::ZERO);
        let term_b = vb.cmp_gt(f32x8::ZERO).blend(vb * (vb / m).ln(), f32x8::ZERO);
        sum += term_a + term_b;
        i += LANE_WIDTH;
    }
    let mut total = sum.reduce_add();
    for j in vec_size..len {
        let m = 0.5 * (a[j] + b[j]);
        if a[j] > 0.0 {
            total += a[j] * (a[j] / m).ln();
        }
        if b[j] > 0.0 {
            total += b[j] * (b[j] / m).ln();
        }
    }
    0.5 * total
}

/// L∞ (Chebyshev) distance: lane-wise max, reduced across lanes.
#[must_use]
pub fn linf(a: &[f32], b: &[f32]) -> f32 {
    contract2(a, b);
    let len = a.len();
    let vec_size = len - len % LANE_WIDTH;
    let mut max_vec = f32x8::ZERO;
    let mut i = 0;
    while i < vec_size {
        let va = f32x8::from(&a[i..i + LANE_WIDTH]);
        let vb = f32x8::from(&b[i..i + LANE_WIDTH]);
        max_vec = max_vec.max((va - vb).abs());
        i += LANE_WIDTH;
    }
    let lanes: [f32; 8] = max_vec.into();
    let mut best = lanes.iter().fold(0.0f32, |m, &x| m.max(x));
    for j in vec_size..len {
        best = best.max((a[j] - b[j]).abs());
    }
    best
}

/// Cross entropy: `−Σ aᵢ·log(bᵢ)`.
#[must_use]
pub fn cross_entropy(a: &[f32], b: &[f32]) -> f32 {
    contract2(a, b);
    let len = a.len();
    let vec_size = len - len % LANE_WIDTH;
    let mut sum = f32x8::ZERO;
    let mut i = 0;
    while i < vec_size {
        let va = f32x8::from(&a[i..i + LANE_WIDTH]);
        let vb = f32x8::from(&b[i..i + LANE_WIDTH]);
        sum = va.mul_add(vb.ln(), sum);
        i += LANE_WIDTH;
    }
    let mut total = sum.reduce_add();
    for j in vec_size..len {
        total += a[j] * b[j].ln();
    }
    -total
}

/// Kullback-Leibler divergence with per-lane ε-clamp of non-positive
/// operands (see [`KLD_EPSILON`]).
#[must_use]
pub fn kld(a: &[f32], b: &[f32]) -> f32 {
    contract2(a, b);
    let len = a.len();
    let vec_size = len - len % LANE_WIDTH;
    let eps = f32x8::splat(KLD_EPSILON);
    let mut sum = f32x8::ZERO;
    let mut i = 0;
    while i < vec_size {
        let va = f32x8::from(&a[i..i + LANE_WIDTH]);
        let vb = f32x8::from(&b[i..i + LANE_WIDTH]);
        let x = va.cmp_gt(f32x8::ZERO).blend(va, eps);
        let y = vb.cmp_gt(f32x8::ZERO).blend(vb, eps);
        sum = x.mul_add((x / y).ln(), sum);
        i += LANE_WIDTH;
    }
    let mut total = sum.reduce_add();
    for j in vec_size..len {
        let x = if a[j] > 0.0 { a[j] } else { KLD_EPSILON };
        let y = if b[j] > 0.0 { b[j] } else { KLD_EPSILON };
        total += x * (x / y).ln();
    }
    total
}

/// Angle between the vectors: `arccos(clamp(cosine, [-1, 1]))`.
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
    contract1(v);
    let len = v.len();
    let vec_size = len - len % LANE_WIDTH;
    let mut sum = f32x8::ZERO;
    let mut i = 0;
    while i < vec_size {
        let vv = f32x8::from(&v[i..i + LANE_WIDTH]);
        sum = vv.mul_add(vv, sum);
        i += LANE_WIDTH;
    }
    let mut total = sum.reduce_add();
    for j in vec_size..len {
        total += v[j] * v[j];
    }
    total.sqrt()
}

/// Normalizes `v` to unit L2 norm in place. Zero vectors are left unchanged.
///
/// The caller must guarantee exclusive access to the buffer for the call's
/// duration; no internal locking is provided.
pub fn normalize(v: &mut [f32]) {
    let norm = norm_l2(v);
    normalize_with_norm(v, norm);
}

/// In-place normalize with a precomputed norm, saving a pass when the norm
/// is already known.
pub fn normalize_with_norm(v: &mut [f32], norm: f32) {
    if norm == 0.0 {
        return;
    }
    let inv = 1.0 / norm;
    let inv_vec = f32x8::splat(inv);
    let len = v.len();
    let vec_size = len - len % LANE_WIDTH;
    let mut i = 0;
    while i < vec_size {
        let vv = f32x8::from(&v[i..i + LANE_WIDTH]);
        let scaled: [f32; 8] = (vv * inv_vec).into();
        v[i..i + LANE_WIDTH].copy_from_slice(&scaled);
        i += LANE_WIDTH;
    }
    for x in &mut v[vec_size..] {
        *x *= inv;
    }
}

/// Out-of-place normalize: writes the unit-norm copy of `src` into `dst`.
/// Zero vectors are copied unchanged.
pub fn normalize_to(src: &[f32], dst: &mut [f32]) {
    let norm = norm_l2(src);
    normalize_with_norm_to(src, norm, dst);
}

/// Out-of-place normalize with a precomputed norm.
pub fn normalize_with_norm_to(src: &[f32], norm: f32, dst: &mut [f32]) {
    debug_assert_eq!(src.len(), dst.len(), "vector length mismatch");
    if norm == 0.0 {
        dst.copy_from_slice(src);
        return;
    }
    let inv = 1.0 / norm;
    let inv_vec = f32x8::splat(inv);
    let len = src.len();
    let vec_size = len - len % LANE_WIDTH;
    let mut i = 0;
    while i < vec_size {
        let vv = f32x8::from(&src[i..i + LANE_WIDTH]);
        let scaled: [f32; 8] = (vv * inv_vec).into();
        dst[i..i + LANE_WIDTH].copy_from_slice(&scaled);
        i += LANE_WIDTH;
    }
    for j in vec_size..len {
        dst[j] = src[j] * inv;
    }
}
