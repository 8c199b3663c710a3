//! Conversion between signed 16-bit fixed-point and normalized `f32` samples.
//!
//! The conversion factor is the *negated s16 minimum* (32768), not the
//! maximum: -32768 maps to exactly -1.0 and +32767 to just under +1.0, so
//! every s16 value survives an s16 → f32 → s16 round trip bit-exactly.
//! A float of +1.0 clamps to 32767 (≈ 0.99997 after conversion back) by
//! design — the fixed-point domain simply has one more negative value than
//! positive.

/// Scale factor between s16 and normalized float: `-(i16::MIN)`.
const CONVERSION_FACTOR: f32 = 32768.0;

/// Converts s16 samples to normalized floats in `[-1.0, 1.0)`.
///
/// Slices must have equal length.
pub fn convert_s16_to_float(dest: &mut [f32], src: &[i16]) {
    debug_assert_eq!(dest.len(), src.len());
    for (d, &s) in dest.iter_mut().zip(src.iter()) {
        *d = f32::from(s) / CONVERSION_FACTOR;
    }
}

/// Converts normalized floats to s16, clamping to the representable range.
///
/// Values at or above +1.0 saturate to `i16::MAX`; values at or below -1.0
/// saturate to `i16::MIN`. Slices must have equal length.
pub fn convert_float_to_s16(dest: &mut [i16], src: &[f32]) {
    debug_assert_eq!(dest.len(), src.len());
    for (d, &s) in dest.iter_mut().zip(src.iter()) {
        *d = (s * CONVERSION_FACTOR).clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16;
    }
}
