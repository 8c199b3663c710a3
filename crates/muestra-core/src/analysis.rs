//! Amplitude and clipping analysis over sample buffers.
//!
//! All functions are single-pass reductions with straight-line bodies the
//! auto-vectorizer can handle. None of them mutate the buffer; clipping is
//! reported as a [`ClipStatus`] bitmask, not an error — it is a signal for
//! metering, not a fault.

use crate::buffer::PEAK_AMPLITUDE;

/// Per-channel clipping flags for an interleaved stereo buffer.
///
/// Bitmask newtype: flags combine with [`union`](Self::union) and test with
/// [`contains`](Self::contains).
///
/// # Example
///
/// ```rust
/// use muestra_core::ClipStatus;
///
/// let status = ClipStatus::LEFT.union(ClipStatus::RIGHT);
/// assert!(status.contains(ClipStatus::LEFT));
/// assert_eq!(status, ClipStatus::BOTH);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipStatus(u8);

impl ClipStatus {
    /// No channel clipped.
    pub const NONE: Self = Self(0);
    /// At least one left-channel sample exceeded the nominal peak.
    pub const LEFT: Self = Self(1 << 0);
    /// At least one right-channel sample exceeded the nominal peak.
    pub const RIGHT: Self = Self(1 << 1);
    /// Both channels clipped.
    pub const BOTH: Self = Self(Self::LEFT.0 | Self::RIGHT.0);

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns true if all flags in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Returns the maximum absolute sample value in the buffer.
///
/// Returns 0.0 for an empty buffer.
pub fn max_abs_amplitude(buffer: &[f32]) -> f32 {
    let mut max = 0.0_f32;
    for &s in buffer {
        let abs = s.abs();
        if abs > max {
            max = abs;
        }
    }
    max
}

/// Returns the sum of squared sample values.
pub fn sum_squared(buffer: &[f32]) -> f32 {
    let mut sum_sq = 0.0_f32;
    for &s in buffer {
        sum_sq += s * s;
    }
    sum_sq
}

/// Returns the root-mean-square amplitude of the buffer.
///
/// Returns 0.0 for an empty buffer.
pub fn rms(buffer: &[f32]) -> f32 {
    if buffer.is_empty() {
        return 0.0;
    }
    libm::sqrtf(sum_squared(buffer) / buffer.len() as f32)
}

/// Sums absolute sample values per stereo channel and detects clipping.
///
/// The buffer is interleaved stereo; a trailing odd sample is ignored.
/// Returns `(sum_abs_left, sum_abs_right, clip_status)` where a channel's
/// flag is set if any of its samples exceeds [`PEAK_AMPLITUDE`] in magnitude.
///
/// The clip counters accumulate as `f32` adds rather than booleans — a bool
/// in the loop body prevents vectorization.
pub fn sum_abs_per_channel(buffer: &[f32]) -> (f32, f32, ClipStatus) {
    let mut abs_left = 0.0_f32;
    let mut abs_right = 0.0_f32;
    let mut clipped_left = 0.0_f32;
    let mut clipped_right = 0.0_f32;

    for frame in buffer.chunks_exact(2) {
        let l = frame[0].abs();
        abs_left += l;
        clipped_left += if l > PEAK_AMPLITUDE { 1.0 } else { 0.0 };
        let r = frame[1].abs();
        abs_right += r;
        clipped_right += if r > PEAK_AMPLITUDE { 1.0 } else { 0.0 };
    }

    let mut status = ClipStatus::NONE;
    if clipped_left > 0.0 {
        status = status.union(ClipStatus::LEFT);
    }
    if clipped_right > 0.0 {
        status = status.union(ClipStatus::RIGHT);
    }
    (abs_left, abs_right, status)
}
