//! # `Vicinity` Core
//!
//! Vector distance computation engine with scalar reference kernels and
//! portable SIMD kernels behind a per-metric dispatch descriptor.
//!
//! ## Features
//!
//! - **18 Metrics**: L1, L2, inner product, cosine, Jaccard, Hamming,
//!   Canberra, Lp, Bray-Curtis, Jensen-Shannon, KLD, angle and more
//! - **Dual Paths**: scalar semantic ground truth plus a vectorized
//!   fast path over 8-wide f32 lanes
//! - **Resolve Once**: [`VectorDistance`] binds kernels at construction;
//!   distance calls go through stored function pointers
//! - **Aligned Buffers**: [`AlignedBuffer`] allocates the 64-byte-aligned
//!   storage the vectorized path requires
//!
//! ## Quick Start
//!
//! ```rust
//! use vicinity_core::{AlignedBuffer, Metric, VectorDistance};
//!
//! let a = AlignedBuffer::from_slice(&[1.0, 0.0, 0.0, 0.0]);
//! let b = AlignedBuffer::from_slice(&[0.0, 1.0, 0.0, 0.0]);
//!
//! let dist = VectorDistance::new(Metric::L2);
//! let d = dist.distance(&a, &b);
//! assert!((d - 2.0_f32.sqrt()).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
// Numeric casts are pervasive in kernel code (popcounts to f32, lane
// arithmetic). Local try_from would add nothing here.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::imprecise_flops)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::inline_always)]

pub mod aligned;
pub mod binary;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod metric;
pub mod popcount;
pub mod scalar;
pub mod simd;

#[cfg(test)]
mod descriptor_tests;
#[cfg(test)]
mod scalar_tests;

pub use aligned::{is_aligned, vector_byte_size, AlignedBuffer, ALIGNMENT};
pub use config::DistanceConfig;
pub use descriptor::{KernelFn, VectorDistance, DEFAULT_LP_EXPONENT};
pub use error::{Error, Result};
pub use metric::Metric;
pub use scalar::KLD_EPSILON;
pub use simd::LANE_WIDTH;
