//! Buffer summation and weighted-copy mixing.
//!
//! Two families with identical gain semantics:
//!
//! - `add*` accumulates gain-scaled sources *into* the destination
//!   (`dest[i] += src[i] * gain`), the primitive of every mix bus.
//! - `copy*` overwrites the destination with the weighted sum, used for
//!   channel-matrix mixdown where the destination's old contents are dead.
//!
//! Every gain argument that is exactly 0.0 drops its source and degrades the
//! call to the next-lower-arity form — muted and faded-out sources are the
//! common case in a mixing graph, and skipping them saves both the multiplies
//! and the denormal traffic a silent source would generate. Ramped variants
//! use the same per-stereo-frame interpolation as [`crate::gain`].
//!
//! Destination/source disjointness is the borrow checker's problem, not a
//! documented footgun: `&mut [f32]` and `&[f32]` cannot alias.

use crate::analysis::max_abs_amplitude;
use crate::buffer::{clear, copy};
use crate::channel::mix_multichannel_to_mono;

/// Accumulates `src` into `dest` sample by sample.
pub fn add(dest: &mut [f32], src: &[f32]) {
    debug_assert_eq!(dest.len(), src.len());
    for (d, &s) in dest.iter_mut().zip(src.iter()) {
        *d += s;
    }
}

/// Accumulates gain-scaled `src` into `dest`. No-op when `gain` is zero.
pub fn add_with_gain(dest: &mut [f32], src: &[f32], gain: f32) {
    if gain == 0.0 {
        return;
    }
    debug_assert_eq!(dest.len(), src.len());
    for (d, &s) in dest.iter_mut().zip(src.iter()) {
        *d += s * gain;
    }
}

/// Accumulates `src` into `dest` with a per-stereo-frame gain ramp.
///
/// No-op only when both gain endpoints are zero. Ramp semantics match
/// [`crate::gain::apply_ramping_gain`].
pub fn add_with_ramping_gain(dest: &mut [f32], src: &[f32], old_gain: f32, new_gain: f32) {
    if old_gain == 0.0 && new_gain == 0.0 {
        return;
    }
    debug_assert_eq!(dest.len(), src.len());

    let gain_delta = (new_gain - old_gain) / (dest.len() / 2) as f32;
    if gain_delta != 0.0 {
        let start_gain = old_gain + gain_delta;
        for (i, (d, s)) in dest
            .chunks_exact_mut(2)
            .zip(src.chunks_exact(2))
            .enumerate()
        {
            let gain = start_gain + gain_delta * i as f32;
            d[0] += s[0] * gain;
            d[1] += s[1] * gain;
        }
    } else {
        for (d, &s) in dest.iter_mut().zip(src.iter()) {
            *d += s * old_gain;
        }
    }
}

/// Accumulates two gain-scaled sources into `dest` in one pass.
///
/// A zero gain drops its source and degrades to [`add_with_gain`].
pub fn add2_with_gain(dest: &mut [f32], src1: &[f32], gain1: f32, src2: &[f32], gain2: f32) {
    if gain1 == 0.0 {
        add_with_gain(dest, src2, gain2);
        return;
    }
    if gain2 == 0.0 {
        add_with_gain(dest, src1, gain1);
        return;
    }
    debug_assert_eq!(dest.len(), src1.len());
    debug_assert_eq!(dest.len(), src2.len());
    for (i, d) in dest.iter_mut().enumerate() {
        *d += src1[i] * gain1 + src2[i] * gain2;
    }
}

/// Accumulates three gain-scaled sources into `dest` in one pass.
///
/// A zero gain drops its source and degrades to [`add2_with_gain`].
pub fn add3_with_gain(
    dest: &mut [f32],
    src1: &[f32],
    gain1: f32,
    src2: &[f32],
    gain2: f32,
    src3: &[f32],
    gain3: f32,
) {
    if gain1 == 0.0 {
        add2_with_gain(dest, src2, gain2, src3, gain3);
        return;
    }
    if gain2 == 0.0 {
        add2_with_gain(dest, src1, gain1, src3, gain3);
        return;
    }
    if gain3 == 0.0 {
        add2_with_gain(dest, src1, gain1, src2, gain2);
        return;
    }
    debug_assert_eq!(dest.len(), src1.len());
    debug_assert_eq!(dest.len(), src2.len());
    debug_assert_eq!(dest.len(), src3.len());
    for (i, d) in dest.iter_mut().enumerate() {
        *d += src1[i] * gain1 + src2[i] * gain2 + src3[i] * gain3;
    }
}

/// Overwrites `dest` with gain-scaled `src`.
///
/// Unity gain degenerates to a plain copy, zero gain to a clear.
pub fn copy_with_gain(dest: &mut [f32], src: &[f32], gain: f32) {
    if gain == 1.0 {
        copy(dest, src);
        return;
    }
    if gain == 0.0 {
        clear(dest);
        return;
    }
    debug_assert_eq!(dest.len(), src.len());
    for (d, &s) in dest.iter_mut().zip(src.iter()) {
        *d = s * gain;
    }
}

/// Overwrites `dest` with `src` scaled by a per-stereo-frame gain ramp.
///
/// Unity endpoints degenerate to a plain copy, zero endpoints to a clear.
pub fn copy_with_ramping_gain(dest: &mut [f32], src: &[f32], old_gain: f32, new_gain: f32) {
    if old_gain == 1.0 && new_gain == 1.0 {
        copy(dest, src);
        return;
    }
    if old_gain == 0.0 && new_gain == 0.0 {
        clear(dest);
        return;
    }
    debug_assert_eq!(dest.len(), src.len());

    let gain_delta = (new_gain - old_gain) / (dest.len() / 2) as f32;
    if gain_delta != 0.0 {
        let start_gain = old_gain + gain_delta;
        for (i, (d, s)) in dest
            .chunks_exact_mut(2)
            .zip(src.chunks_exact(2))
            .enumerate()
        {
            let gain = start_gain + gain_delta * i as f32;
            d[0] = s[0] * gain;
            d[1] = s[1] * gain;
        }
    } else {
        for (d, &s) in dest.iter_mut().zip(src.iter()) {
            *d = s * old_gain;
        }
    }
}

/// Weighted-sum copy, arity 1: `dest[i] = src0[i] * gain0`.
///
/// Zero gain clears the destination. Unlike [`copy_with_gain`] there is no
/// unity shortcut — this is the tail of the mixdown cascade and the gain is
/// rarely exactly one there.
pub fn copy1_with_gain(dest: &mut [f32], src0: &[f32], gain0: f32) {
    if gain0 == 0.0 {
        clear(dest);
        return;
    }
    debug_assert_eq!(dest.len(), src0.len());
    for (d, &s) in dest.iter_mut().zip(src0.iter()) {
        *d = s * gain0;
    }
}

/// Ramped weighted-sum copy, arity 1.
///
/// Both endpoints zero clears the destination; otherwise the ramp formula
/// runs unconditionally (a zero step reduces to a flat multiply by itself).
pub fn copy1_with_ramping_gain(dest: &mut [f32], src0: &[f32], gain0_in: f32, gain0_out: f32) {
    if gain0_in == 0.0 && gain0_out == 0.0 {
        clear(dest);
        return;
    }
    debug_assert_eq!(dest.len(), src0.len());

    let delta0 = (gain0_out - gain0_in) / (dest.len() / 2) as f32;
    let start0 = gain0_in + delta0;
    for (i, (d, s)) in dest
        .chunks_exact_mut(2)
        .zip(src0.chunks_exact(2))
        .enumerate()
    {
        let gain0 = start0 + delta0 * i as f32;
        d[0] = s[0] * gain0;
        d[1] = s[1] * gain0;
    }
}

/// Weighted-sum copy, arity 2. A zero gain degrades to [`copy1_with_gain`].
pub fn copy2_with_gain(
    dest: &mut [f32],
    src0: &[f32],
    gain0: f32,
    src1: &[f32],
    gain1: f32,
) {
    if gain0 == 0.0 {
        copy1_with_gain(dest, src1, gain1);
        return;
    }
    if gain1 == 0.0 {
        copy1_with_gain(dest, src0, gain0);
        return;
    }
    debug_assert_eq!(dest.len(), src0.len());
    debug_assert_eq!(dest.len(), src1.len());
    for (i, d) in dest.iter_mut().enumerate() {
        *d = src0[i] * gain0 + src1[i] * gain1;
    }
}

/// Ramped weighted-sum copy, arity 2.
///
/// A source whose endpoints are both zero is dropped, degrading to
/// [`copy1_with_ramping_gain`].
pub fn copy2_with_ramping_gain(
    dest: &mut [f32],
    src0: &[f32],
    gain0_in: f32,
    gain0_out: f32,
    src1: &[f32],
    gain1_in: f32,
    gain1_out: f32,
) {
    if gain0_in == 0.0 && gain0_out == 0.0 {
        copy1_with_ramping_gain(dest, src1, gain1_in, gain1_out);
        return;
    }
    if gain1_in == 0.0 && gain1_out == 0.0 {
        copy1_with_ramping_gain(dest, src0, gain0_in, gain0_out);
        return;
    }
    debug_assert_eq!(dest.len(), src0.len());
    debug_assert_eq!(dest.len(), src1.len());

    let half = (dest.len() / 2) as f32;
    let delta0 = (gain0_out - gain0_in) / half;
    let start0 = gain0_in + delta0;
    let delta1 = (gain1_out - gain1_in) / half;
    let start1 = gain1_in + delta1;
    for (i, frame) in dest.chunks_exact_mut(2).enumerate() {
        let gain0 = start0 + delta0 * i as f32;
        let gain1 = start1 + delta1 * i as f32;
        frame[0] = src0[i * 2] * gain0 + src1[i * 2] * gain1;
        frame[1] = src0[i * 2 + 1] * gain0 + src1[i * 2 + 1] * gain1;
    }
}

/// Weighted-sum copy, arity 3. A zero gain degrades to [`copy2_with_gain`].
pub fn copy3_with_gain(
    dest: &mut [f32],
    src0: &[f32],
    gain0: f32,
    src1: &[f32],
    gain1: f32,
    src2: &[f32],
    gain2: f32,
) {
    if gain0 == 0.0 {
        copy2_with_gain(dest, src1, gain1, src2, gain2);
        return;
    }
    if gain1 == 0.0 {
        copy2_with_gain(dest, src0, gain0, src2, gain2);
        return;
    }
    if gain2 == 0.0 {
        copy2_with_gain(dest, src0, gain0, src1, gain1);
        return;
    }
    debug_assert_eq!(dest.len(), src0.len());
    debug_assert_eq!(dest.len(), src1.len());
    debug_assert_eq!(dest.len(), src2.len());
    for (i, d) in dest.iter_mut().enumerate() {
        *d = src0[i] * gain0 + src1[i] * gain1 + src2[i] * gain2;
    }
}

/// Ramped weighted-sum copy, arity 3.
///
/// A source whose endpoints are both zero is dropped, degrading to
/// [`copy2_with_ramping_gain`].
#[allow(clippy::too_many_arguments)]
pub fn copy3_with_ramping_gain(
    dest: &mut [f32],
    src0: &[f32],
    gain0_in: f32,
    gain0_out: f32,
    src1: &[f32],
    gain1_in: f32,
    gain1_out: f32,
    src2: &[f32],
    gain2_in: f32,
    gain2_out: f32,
) {
    if gain0_in == 0.0 && gain0_out == 0.0 {
        copy2_with_ramping_gain(dest, src1, gain1_in, gain1_out, src2, gain2_in, gain2_out);
        return;
    }
    if gain1_in == 0.0 && gain1_out == 0.0 {
        copy2_with_ramping_gain(dest, src0, gain0_in, gain0_out, src2, gain2_in, gain2_out);
        return;
    }
    if gain2_in == 0.0 && gain2_out == 0.0 {
        copy2_with_ramping_gain(dest, src0, gain0_in, gain0_out, src1, gain1_in, gain1_out);
        return;
    }
    debug_assert_eq!(dest.len(), src0.len());
    debug_assert_eq!(dest.len(), src1.len());
    debug_assert_eq!(dest.len(), src2.len());

    let half = (dest.len() / 2) as f32;
    let delta0 = (gain0_out - gain0_in) / half;
    let start0 = gain0_in + delta0;
    let delta1 = (gain1_out - gain1_in) / half;
    let start1 = gain1_in + delta1;
    let delta2 = (gain2_out - gain2_in) / half;
    let start2 = gain2_in + delta2;
    for (i, frame) in dest.chunks_exact_mut(2).enumerate() {
        let gain0 = start0 + delta0 * i as f32;
        let gain1 = start1 + delta1 * i as f32;
        let gain2 = start2 + delta2 * i as f32;
        frame[0] = src0[i * 2] * gain0 + src1[i * 2] * gain1 + src2[i * 2] * gain2;
        frame[1] = src0[i * 2 + 1] * gain0 + src1[i * 2 + 1] * gain1 + src2[i * 2 + 1] * gain2;
    }
}

/// Ramp-copies interleaved-stereo `src` into `dest`, normalized to a target peak.
///
/// Composite operation: folds `src` to mono (using `dest` as scratch),
/// measures the mono peak, computes `target_amplitude / peak` (1.0 for a
/// silent source), then ramp-copies `src` into `dest` from `old_gain` to the
/// computed gain. Returns the computed gain so the caller can carry ramp
/// state into the next block.
pub fn copy_with_ramping_normalization(
    dest: &mut [f32],
    src: &[f32],
    old_gain: f32,
    target_amplitude: f32,
) -> f32 {
    debug_assert_eq!(dest.len(), src.len());
    let num_mono = src.len() / 2;
    mix_multichannel_to_mono(&mut dest[..num_mono], src, 2);

    let max_amplitude = max_abs_amplitude(&dest[..num_mono]);
    let gain = if max_amplitude == 0.0 {
        1.0
    } else {
        target_amplitude / max_amplitude
    };
    copy_with_ramping_gain(dest, src, old_gain, gain);

    gain
}
