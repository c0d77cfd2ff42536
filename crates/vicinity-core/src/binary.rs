//! Bit-oriented kernels over integer overlays of the float buffers.
//!
//! Hamming and binary Jaccard operate on the raw bit patterns of the `f32`
//! buffers, reinterpreted without copying. This module is the only place in
//! the crate where that reinterpretation happens: a `u32` word view for the
//! scalar path, and a `u64` word view for the vectorized path (doubling
//! popcount throughput per lane). Trailing words that do not fill a `u64`
//! are handled through the 32-bit view.

use crate::aligned::is_aligned;
use crate::popcount::LanePopcount;
use wide::u64x4;

/// `u64` lanes per SIMD register on the vectorized path.
const QUAD_LANES: usize = 4;

#[inline(always)]
fn contract(a: &[f32], b: &[f32]) {
    debug_assert_eq!(a.len(), b.len(), "vector length mismatch");
}

#[inline(always)]
fn simd_contract(a: &[f32], b: &[f32]) {
    contract(a, b);
    debug_assert!(
        a.is_empty() || (is_aligned(a.as_ptr()) && is_aligned(b.as_ptr())),
        "buffers must be 64-byte aligned"
    );
}

/// Hamming distance over the 32-bit word view. Scalar reference path.
#[must_use]
pub fn hamming_words32(a: &[f32], b: &[f32]) -> f32 {
    contract(a, b);
    let aw: &[u32] = bytemuck::cast_slice(a);
    let bw: &[u32] = bytemuck::cast_slice(b);
    let count: u32 = aw.iter().zip(bw).map(|(x, y)| (x ^ y).count_ones()).sum();
    count as f32
}

/// Hamming distance over the 64-bit word view. Vectorized path; requires
/// 64-byte-aligned buffers.
#[must_use]
pub fn hamming_words64(a: &[f32], b: &[f32]) -> f32 {
    simd_contract(a, b);
    let (a_quads, a_rest) = quad_view(a);
    let (b_quads, b_rest) = quad_view(b);

    let vec_size = a_quads.len() - a_quads.len() % QUAD_LANES;
    let mut count = 0u32;
    let mut i = 0;
    while i < vec_size {
        let va = load_quads(a_quads, i);
        let vb = load_quads(b_quads, i);
        count += (va ^ vb).popcount();
        i += QUAD_LANES;
    }
    for (x, y) in a_quads[vec_size..].iter().zip(&b_quads[vec_size..]) {
        count += (x ^ y).count_ones();
    }
    for (x, y) in a_rest.iter().zip(b_rest) {
        count += (x ^ y).count_ones();
    }
    count as f32
}

/// Binary Jaccard distance over the 32-bit word view: `1 − |AND| / |OR|`.
/// Scalar reference path. Returns 0.0 when the union is empty.
#[must_use]
pub fn jaccard_words32(a: &[f32], b: &[f32]) -> f32 {
    contract(a, b);
    let aw: &[u32] = bytemuck::cast_slice(a);
    let bw: &[u32] = bytemuck::cast_slice(b);
    let mut inter = 0u32;
    let mut union = 0u32;
    for (x, y) in aw.iter().zip(bw) {
        inter += (x & y).count_ones();
        union += (x | y).count_ones();
    }
    jaccard_from_counts(inter, union)
}

/// Binary Jaccard distance over the 64-bit word view. Vectorized path;
/// requires 64-byte-aligned buffers.
#[must_use]
pub fn jaccard_words64(a: &[f32], b: &[f32]) -> f32 {
    simd_contract(a, b);
    let (a_quads, a_rest) = quad_view(a);
    let (b_quads, b_rest) = quad_view(b);

    let vec_size = a_quads.len() - a_quads.len() % QUAD_LANES;
    let mut inter = 0u32;
    let mut union = 0u32;
    let mut i = 0;
    while i < vec_size {
        let va = load_quads(a_quads, i);
        let vb = load_quads(b_quads, i);
        inter += (va & vb).popcount();
        union += (va | vb).popcount();
        i += QUAD_LANES;
    }
    for (x, y) in a_quads[vec_size..].iter().zip(&b_quads[vec_size..]) {
        inter += (x & y).count_ones();
        union += (x | y).count_ones();
    }
    for (x, y) in a_rest.iter().zip(b_rest) {
        inter += (x & y).count_ones();
        union += (x | y).count_ones();
    }
    jaccard_from_counts(inter, union)
}

#[inline]
fn jaccard_from_counts(inter: u32, union: u32) -> f32 {
    if union == 0 {
        return 0.0;
    }
    1.0 - inter as f32 / union as f32
}

/// Splits the buffer's bit pattern into a `u64` word view plus the trailing
/// `u32` word that does not fill a `u64` (odd dimensions).
#[inline]
fn quad_view(v: &[f32]) -> (&[u64], &[u32]) {
    let words: &[u32] = bytemuck::cast_slice(v);
    let (head, quads, tail) = bytemuck::pod_align_to::<u32, u64>(words);
    // 64-byte-aligned buffers leave no misaligned head.
    debug_assert!(head.is_empty() || v.is_empty() || !is_aligned(v.as_ptr()));
    if head.is_empty() {
        (quads, tail)
    } else {
        // Unaligned scalar-path callers: fall back to the pure word view.
        (&[], words)
    }
}

#[inline]
fn load_quads(quads: &[u64], i: usize) -> u64x4 {
    u64x4::new([quads[i], quads[i + 1], quads[i + 2], quads[i + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aligned::AlignedBuffer;

    fn bits(words: &[u32]) -> AlignedBuffer {
        AlignedBuffer::from_slice(bytemuck::cast_slice(words))
    }

    #[test]
    fn test_hamming_identical_is_zero() {
        let a = bits(&[0xDEAD_BEEF; 37]);
        assert_eq!(hamming_words32(&a, &a), 0.0);
        assert_eq!(hamming_words64(&a, &a), 0.0);
    }

    #[test]
    fn test_hamming_counts_differing_bits() {
        // One word differs by two bits.
        let mut aw = vec![0u32; 33];
        let mut bw = vec![0u32; 33];
        aw[32] = 0b1011;
        bw[32] = 0b0001;
        let a = bits(&aw);
        let b = bits(&bw);
        assert_eq!(hamming_words32(&a, &b), 2.0);
        assert_eq!(hamming_words64(&a, &b), 2.0);

        let a = bits(&[u32::MAX; 16]);
        let b = bits(&[0u32; 16]);
        assert_eq!(hamming_words64(&a, &b), 512.0);
    }

    #[test]
    fn test_hamming_paths_agree_on_odd_lengths() {
        // 1, 7, 63 words: exercises the u32 tail and the sub-register u64 tail.
        for n in [1usize, 7, 63, 64, 65] {
            let aw: Vec<u32> = (0..n as u32).map(|i| i.wrapping_mul(0x9E37_79B9)).collect();
            let bw: Vec<u32> = (0..n as u32).map(|i| i.wrapping_mul(0x85EB_CA6B)).collect();
            let a = bits(&aw);
            let b = bits(&bw);
            assert_eq!(
                hamming_words32(&a, &b),
                hamming_words64(&a, &b),
                "paths disagree at {n} words"
            );
        }
    }

    #[test]
    fn test_jaccard_known_counts() {
        // AND has 1 bit set, OR has 3.
        let a = bits(&[0b011]);
        let b = bits(&[0b110]);
        let expected = 1.0 - 1.0 / 3.0;
        assert!((jaccard_words32(&a, &b) - expected).abs() < 1e-6);
        assert!((jaccard_words64(&a, &b) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_jaccard_empty_union_is_zero() {
        let a = bits(&[0u32; 24]);
        assert_eq!(jaccard_words32(&a, &a), 0.0);
        assert_eq!(jaccard_words64(&a, &a), 0.0);
    }

    #[test]
    fn test_jaccard_paths_agree() {
        for n in [1usize, 7, 64, 65, 256] {
            let aw: Vec<u32> = (0..n as u32).map(|i| i.wrapping_mul(0xC2B2_AE35) | 1).collect();
            let bw: Vec<u32> = (0..n as u32).map(|i| i.rotate_left(7) | 1).collect();
            let a = bits(&aw);
            let b = bits(&bw);
            assert!(
                (jaccard_words32(&a, &b) - jaccard_words64(&a, &b)).abs() < 1e-6,
                "paths disagree at {n} words"
            );
        }
    }
}
