//! In-place gain application: constant, ramping, and per-channel alternating.
//!
//! Ramping exists to avoid audible clicks when gain changes between blocks:
//! instead of stepping to the new gain at a block boundary, the multiplier is
//! linearly interpolated across the block. The interpolation runs once per
//! *stereo frame* — both samples of a frame share one gain value — which
//! keeps the loop a straight two-lane multiply the vectorizer likes. Half the
//! samples carry the exact interpolated value and the paired channel shares
//! it; that trade of ramp smoothness for throughput is deliberate and part of
//! the numeric contract.
//!
//! The distinguished gains 1.0 (unity) and 0.0 (silence) short-circuit
//! everywhere: unity is a no-op, silence a [`clear`]. Mixing graphs are full
//! of muted and fading-out sources, and skipping their multiplies also avoids
//! propagating signed-zero and denormal artifacts.

use crate::buffer::clear;

/// Multiplies every sample by `gain` in place.
///
/// Unity gain returns without touching the buffer; zero gain clears it.
pub fn apply_gain(buffer: &mut [f32], gain: f32) {
    if gain == 1.0 {
        return;
    }
    if gain == 0.0 {
        clear(buffer);
        return;
    }

    for s in buffer.iter_mut() {
        *s *= gain;
    }
}

/// Ramps the gain linearly from just past `old_gain` to `new_gain` in place.
///
/// The buffer is interleaved stereo; both samples of a frame share one
/// interpolated gain. The ramp step is `(new_gain - old_gain) / (n/2)` and
/// the first frame is multiplied by `old_gain + step`, the last by
/// `new_gain`. When the computed step is zero the whole buffer gets a flat
/// multiply by `old_gain`. A trailing odd sample is ignored.
pub fn apply_ramping_gain(buffer: &mut [f32], old_gain: f32, new_gain: f32) {
    if old_gain == 1.0 && new_gain == 1.0 {
        return;
    }
    if old_gain == 0.0 && new_gain == 0.0 {
        clear(buffer);
        return;
    }

    let gain_delta = (new_gain - old_gain) / (buffer.len() / 2) as f32;
    if gain_delta != 0.0 {
        let start_gain = old_gain + gain_delta;
        for (i, frame) in buffer.chunks_exact_mut(2).enumerate() {
            let gain = start_gain + gain_delta * i as f32;
            frame[0] *= gain;
            frame[1] *= gain;
        }
    } else {
        for s in buffer.iter_mut() {
            *s *= old_gain;
        }
    }
}

/// Applies `gain1` to even-indexed samples and `gain2` to odd-indexed ones.
///
/// This is per-channel static gain for an interleaved stereo buffer.
/// Degenerates to [`apply_gain`] when the gains are equal (which also covers
/// the unity/unity and zero/zero fast paths).
pub fn apply_alternating_gain(buffer: &mut [f32], gain1: f32, gain2: f32) {
    if gain1 == gain2 {
        apply_gain(buffer, gain1);
        return;
    }

    for frame in buffer.chunks_exact_mut(2) {
        frame[0] *= gain1;
        frame[1] *= gain2;
    }
}

/// Independently ramps each channel's gain across an interleaved stereo buffer.
///
/// Channel 1 (even samples) ramps from just past `old1` to `new1`, channel 2
/// (odd samples) from just past `old2` to `new2`, each over `n/2` frames.
/// A channel whose computed step is zero gets a flat multiply by its old
/// gain. Degenerates to [`apply_alternating_gain`] when neither gain moved.
pub fn apply_ramping_alternating_gain(
    buffer: &mut [f32],
    old1: f32,
    new1: f32,
    old2: f32,
    new2: f32,
) {
    if new1 == old1 && new2 == old2 {
        apply_alternating_gain(buffer, new1, new2);
        return;
    }

    let half = (buffer.len() / 2) as f32;

    let delta1 = (new1 - old1) / half;
    if delta1 != 0.0 {
        let start_gain = old1 + delta1;
        for (i, frame) in buffer.chunks_exact_mut(2).enumerate() {
            frame[0] *= start_gain + delta1 * i as f32;
        }
    } else {
        for frame in buffer.chunks_exact_mut(2) {
            frame[0] *= old1;
        }
    }

    let delta2 = (new2 - old2) / half;
    if delta2 != 0.0 {
        let start_gain = old2 + delta2;
        for (i, frame) in buffer.chunks_exact_mut(2).enumerate() {
            frame[1] *= start_gain + delta2 * i as f32;
        }
    } else {
        for frame in buffer.chunks_exact_mut(2) {
            frame[1] *= old2;
        }
    }
}
