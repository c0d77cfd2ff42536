//! Population count across the lanes of a SIMD integer register.
//!
//! No portable wide-register popcount instruction is assumed: each lane is
//! counted with the scalar `count_ones` primitive and the per-lane counts
//! are summed explicitly. Used by the bit-oriented metrics in
//! [`crate::binary`].

use wide::{u32x4, u32x8, u64x2, u64x4};

/// Sum of set bits across all lanes of a SIMD integer register.
pub trait LanePopcount {
    /// Total number of set bits in the register.
    fn popcount(self) -> u32;
}

impl LanePopcount for u32x4 {
    #[inline]
    fn popcount(self) -> u32 {
        let l = self.to_array();
        l[0].count_ones() + l[1].count_ones() + l[2].count_ones() + l[3].count_ones()
    }
}

impl LanePopcount for u32x8 {
    #[inline]
    fn popcount(self) -> u32 {
        let l = self.to_array();
        l[0].count_ones()
            + l[1].count_ones()
            + l[2].count_ones()
            + l[3].count_ones()
            + l[4].count_ones()
            + l[5].count_ones()
            + l[6].count_ones()
            + l[7].count_ones()
    }
}

impl LanePopcount for u64x2 {
    #[inline]
    fn popcount(self) -> u32 {
        let l = self.to_array();
        l[0].count_ones() + l[1].count_ones()
    }
}

impl LanePopcount for u64x4 {
    #[inline]
    fn popcount(self) -> u32 {
        let l = self.to_array();
        l[0].count_ones() + l[1].count_ones() + l[2].count_ones() + l[3].count_ones()
    }
}
