//! SIMD-aligned sample buffer allocation and elementwise primitives.
//!
//! [`SampleBuffer`] owns a heap allocation whose first usable sample sits on a
//! [`SIMD_ALIGN`]-byte boundary, so vectorized loops over it skip the serial
//! ramp-up a misaligned head would force. The buffer is allocated once during
//! setup; every per-block operation in this crate then works on plain `f32`
//! slices borrowed from it (or from any other caller-owned storage).
//!
//! The module also carries the elementwise primitives the rest of the crate
//! builds on: [`clear`], [`fill`], [`copy`], [`clamp_sample`], [`copy_clamp`].
//!
//! # Alignment strategy
//!
//! A `Vec<f32>` only guarantees 4-byte alignment, so the buffer over-allocates
//! by one SIMD width and records the element offset of the first aligned slot.
//! The `Vec` itself stays inside the handle, which is what lets `Drop` release
//! the true allocation — no pointer bookkeeping in slack bytes, no `unsafe`.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Byte alignment for sample buffers: one SIMD register width.
///
/// 32 bytes on AVX builds (256-bit registers), 16 bytes otherwise (128-bit).
#[cfg(target_feature = "avx")]
pub const SIMD_ALIGN: usize = 32;

/// Byte alignment for sample buffers: one SIMD register width.
///
/// 32 bytes on AVX builds (256-bit registers), 16 bytes otherwise (128-bit).
#[cfg(not(target_feature = "avx"))]
pub const SIMD_ALIGN: usize = 16;

/// Nominal full-scale peak amplitude. Samples beyond ±this value are clipping.
pub const PEAK_AMPLITUDE: f32 = 1.0;

/// An owning, fixed-length, SIMD-aligned buffer of `f32` samples.
///
/// Created zeroed via [`SampleBuffer::allocate`]; freed on drop. Derefs to
/// `[f32]`, so the whole operation vocabulary of this crate applies directly:
///
/// ```rust
/// use muestra_core::{SampleBuffer, gain};
///
/// let mut buf = SampleBuffer::allocate(1024).expect("out of memory");
/// buf.fill(1.0);
/// gain::apply_gain(&mut buf, 0.5);
/// assert_eq!(buf[0], 0.5);
/// ```
#[derive(Debug)]
pub struct SampleBuffer {
    data: Vec<f32>,
    offset: usize,
    len: usize,
}

// The aligned offset is a property of each allocation's base address, so a
// clone must reallocate and recompute it rather than copy the field.
impl Clone for SampleBuffer {
    fn clone(&self) -> Self {
        let pad = SIMD_ALIGN / core::mem::size_of::<f32>();
        let mut data = Vec::with_capacity(self.len + pad);
        data.resize(self.len + pad, 0.0);
        let addr = data.as_ptr() as usize;
        let offset = ((SIMD_ALIGN - addr % SIMD_ALIGN) % SIMD_ALIGN) / core::mem::size_of::<f32>();
        data[offset..offset + self.len].copy_from_slice(self.as_slice());
        Self {
            data,
            offset,
            len: self.len,
        }
    }
}

impl SampleBuffer {
    /// Allocates a zeroed buffer of `len` samples aligned to [`SIMD_ALIGN`].
    ///
    /// Returns `None` if the underlying allocation fails. Allocation failure
    /// is never retried; callers must check before use.
    pub fn allocate(len: usize) -> Option<Self> {
        let pad = SIMD_ALIGN / core::mem::size_of::<f32>();
        let mut data = Vec::new();
        if data.try_reserve_exact(len + pad).is_err() {
            #[cfg(feature = "tracing")]
            tracing::warn!("sample buffer allocation failed: {len} samples");
            return None;
        }
        data.resize(len + pad, 0.0);

        let addr = data.as_ptr() as usize;
        let offset = ((SIMD_ALIGN - addr % SIMD_ALIGN) % SIMD_ALIGN) / core::mem::size_of::<f32>();

        #[cfg(feature = "tracing")]
        tracing::debug!("allocated {len} samples at {SIMD_ALIGN}-byte alignment");

        Some(Self { data, offset, len })
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer has zero length.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the samples as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data[self.offset..self.offset + self.len]
    }

    /// Returns the samples as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data[self.offset..self.offset + self.len]
    }
}

impl core::ops::Deref for SampleBuffer {
    type Target = [f32];

    #[inline]
    fn deref(&self) -> &[f32] {
        self.as_slice()
    }
}

impl core::ops::DerefMut for SampleBuffer {
    #[inline]
    fn deref_mut(&mut self) -> &mut [f32] {
        self.as_mut_slice()
    }
}

/// Sets every sample to zero (digital silence).
#[inline]
pub fn clear(buffer: &mut [f32]) {
    buffer.fill(0.0);
}

/// Sets every sample to `value`.
#[inline]
pub fn fill(buffer: &mut [f32], value: f32) {
    buffer.fill(value);
}

/// Copies `src` into `dest`. Slices must have equal length.
#[inline]
pub fn copy(dest: &mut [f32], src: &[f32]) {
    dest.copy_from_slice(src);
}

/// Clamps one sample to the nominal full-scale range ±[`PEAK_AMPLITUDE`].
#[inline]
pub fn clamp_sample(sample: f32) -> f32 {
    sample.clamp(-PEAK_AMPLITUDE, PEAK_AMPLITUDE)
}

/// Copies `src` into `dest`, clamping every sample to ±[`PEAK_AMPLITUDE`].
pub fn copy_clamp(dest: &mut [f32], src: &[f32]) {
    debug_assert_eq!(dest.len(), src.len());
    for (d, &s) in dest.iter_mut().zip(src.iter()) {
        *d = clamp_sample(s);
    }
}
