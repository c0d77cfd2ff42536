//! 64-byte alignment contract shared by the accelerated kernels.
//!
//! Every vectorized entry point in this crate assumes its input buffers are
//! aligned to [`ALIGNMENT`] bytes. The contract is owned by the caller (or
//! its allocator): the kernels only verify it with debug assertions.
//! [`AlignedBuffer`] is the in-crate way to satisfy the contract when the
//! caller does not already have aligned storage (tests, benchmarks, small
//! owned vectors).

use std::alloc::{alloc_zeroed, dealloc, handle_alloc_error, Layout};
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

/// Byte alignment required by the vectorized kernels.
///
/// Matches a full cache line and is a multiple of every SIMD register width
/// used by this crate.
pub const ALIGNMENT: usize = 64;

/// Returns true if `ptr` satisfies the [`ALIGNMENT`] contract.
#[inline]
#[must_use]
pub fn is_aligned<T>(ptr: *const T) -> bool {
    (ptr as usize) % ALIGNMENT == 0
}

/// Byte size of one vector of the given dimension.
///
/// The storage collaborator sizes its batch layout with this; it never
/// interprets vector contents.
#[inline]
#[must_use]
pub const fn vector_byte_size(dimension: usize) -> usize {
    dimension * std::mem::size_of::<f32>()
}

/// Owned `f32` buffer aligned to [`ALIGNMENT`] bytes.
///
/// Derefs to `[f32]`, so it can be handed to any kernel in this crate while
/// satisfying the alignment precondition of the vectorized path.
#[derive(Debug)]
pub struct AlignedBuffer {
    ptr: NonNull<f32>,
    len: usize,
}

// SAFETY: AlignedBuffer exclusively owns its heap allocation; the raw
// pointer is never shared outside `&self`/`&mut self` borrows.
unsafe impl Send for AlignedBuffer {}
// SAFETY: shared access only exposes `&[f32]`.
unsafe impl Sync for AlignedBuffer {}

impl AlignedBuffer {
    /// Allocates a zero-filled buffer of `len` floats.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails or the layout would overflow `isize`.
    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        if len == 0 {
            // Well-aligned sentinel, never dereferenced for an empty buffer.
            let dangling = unsafe { NonNull::new_unchecked(ALIGNMENT as *mut f32) };
            return Self { ptr: dangling, len: 0 };
        }

        let layout = Self::layout(len);
        // SAFETY: layout has non-zero size.
        let raw = unsafe { alloc_zeroed(layout) };
        let Some(ptr) = NonNull::new(raw.cast::<f32>()) else {
            handle_alloc_error(layout);
        };
        Self { ptr, len }
    }

    /// Allocates an aligned copy of `data`.
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        let mut buf = Self::zeroed(data.len());
        buf.copy_from_slice(data);
        buf
    }

    /// Number of floats in the buffer.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrows the buffer as an immutable slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        // SAFETY: ptr is valid for `len` initialized floats (zeroed or copied).
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Borrows the buffer as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        // SAFETY: ptr is valid for `len` floats and we hold `&mut self`.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    fn layout(len: usize) -> Layout {
        Layout::from_size_align(vector_byte_size(len), ALIGNMENT)
            .expect("aligned buffer layout overflow")
    }
}

impl Deref for AlignedBuffer {
    type Target = [f32];

    #[inline]
    fn deref(&self) -> &[f32] {
        self.as_slice()
    }
}

impl DerefMut for AlignedBuffer {
    #[inline]
    fn deref_mut(&mut self) -> &mut [f32] {
        self.as_mut_slice()
    }
}

impl Clone for AlignedBuffer {
    fn clone(&self) -> Self {
        Self::from_slice(self)
    }
}

impl PartialEq for AlignedBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Drop for AlignedBuffer {
    fn drop(&mut self) {
        if self.len > 0 {
            // SAFETY: allocated in `zeroed` with the same layout.
            unsafe {
                dealloc(self.ptr.as_ptr().cast::<u8>(), Self::layout(self.len));
            }
        }
    }
}

impl From<&[f32]> for AlignedBuffer {
    fn from(data: &[f32]) -> Self {
        Self::from_slice(data)
    }
}

impl From<Vec<f32>> for AlignedBuffer {
    fn from(data: Vec<f32>) -> Self {
        Self::from_slice(&data)
    }
}
