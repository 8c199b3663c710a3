//! Linear-ramp crossfades between two equal-length buffers.
//!
//! The mix factor ramps from 0 at the first frame to just under 1 at the
//! last, one value shared by all channels of a frame. The two entry points
//! are mathematical complements so a single pair of calls crossfades two
//! independent buffers symmetrically without a unified scratch buffer:
//!
//! - [`linear_crossfade_out`]: the destination *is* the fade-out signal; it
//!   is attenuated by `1 - mix` and the fade-in source is added scaled by
//!   `mix`.
//! - [`linear_crossfade_in`]: the destination *is* the fade-in signal; it
//!   ramps up by `mix` and the fade-out source's complement is added.
//!
//! Dispatch on [`ChannelLayout`] picks hand-specialized stereo and stem
//! loops (constant frame stride, vectorizable) with a generic nested-loop
//! fallback for arbitrary channel counts.

use crate::channel::ChannelLayout;

fn crossfade_stereo_out(dest_fade_out: &mut [f32], src_fade_in: &[f32]) {
    let cross_inc = 1.0 / (dest_fade_out.len() / 2) as f32;
    for (i, (d, s)) in dest_fade_out
        .chunks_exact_mut(2)
        .zip(src_fade_in.chunks_exact(2))
        .enumerate()
    {
        let cross_mix = cross_inc * i as f32;
        d[0] *= 1.0 - cross_mix;
        d[0] += s[0] * cross_mix;
        d[1] *= 1.0 - cross_mix;
        d[1] += s[1] * cross_mix;
    }
}

fn crossfade_stem_out(dest_fade_out: &mut [f32], src_fade_in: &[f32]) {
    let cross_inc = 1.0 / (dest_fade_out.len() / 8) as f32;
    for (i, (d, s)) in dest_fade_out
        .chunks_exact_mut(8)
        .zip(src_fade_in.chunks_exact(8))
        .enumerate()
    {
        let cross_mix = cross_inc * i as f32;
        for ch in 0..8 {
            d[ch] *= 1.0 - cross_mix;
            d[ch] += s[ch] * cross_mix;
        }
    }
}

fn crossfade_stereo_in(dest_fade_in: &mut [f32], src_fade_out: &[f32]) {
    let cross_inc = 1.0 / (dest_fade_in.len() / 2) as f32;
    for (i, (d, s)) in dest_fade_in
        .chunks_exact_mut(2)
        .zip(src_fade_out.chunks_exact(2))
        .enumerate()
    {
        let cross_mix = cross_inc * i as f32;
        d[0] *= cross_mix;
        d[0] += s[0] * (1.0 - cross_mix);
        d[1] *= cross_mix;
        d[1] += s[1] * (1.0 - cross_mix);
    }
}

fn crossfade_stem_in(dest_fade_in: &mut [f32], src_fade_out: &[f32]) {
    let cross_inc = 1.0 / (dest_fade_in.len() / 8) as f32;
    for (i, (d, s)) in dest_fade_in
        .chunks_exact_mut(8)
        .zip(src_fade_out.chunks_exact(8))
        .enumerate()
    {
        let cross_mix = cross_inc * i as f32;
        for ch in 0..8 {
            d[ch] *= cross_mix;
            d[ch] += s[ch] * (1.0 - cross_mix);
        }
    }
}

/// Crossfades from the destination's contents to `src_fade_in`, in place.
///
/// `dest_fade_out[i] = dest_fade_out[i] * (1 - mix) + src_fade_in[i] * mix`
/// with `mix` ramping from 0 to just under 1 across the block, one value per
/// frame. Buffers must have equal length, an exact multiple of the layout's
/// channel count.
pub fn linear_crossfade_out(
    dest_fade_out: &mut [f32],
    src_fade_in: &[f32],
    layout: ChannelLayout,
) {
    debug_assert_eq!(dest_fade_out.len(), src_fade_in.len());
    match layout {
        ChannelLayout::Stereo => crossfade_stereo_out(dest_fade_out, src_fade_in),
        ChannelLayout::Stem => crossfade_stem_out(dest_fade_out, src_fade_in),
        ChannelLayout::Other(channels) => {
            debug_assert!(channels > 0);
            debug_assert_eq!(dest_fade_out.len() % channels, 0);
            let cross_inc = 1.0 / (dest_fade_out.len() / channels) as f32;
            for (i, (d, s)) in dest_fade_out
                .chunks_exact_mut(channels)
                .zip(src_fade_in.chunks_exact(channels))
                .enumerate()
            {
                let cross_mix = cross_inc * i as f32;
                for ch in 0..channels {
                    d[ch] *= 1.0 - cross_mix;
                    d[ch] += s[ch] * cross_mix;
                }
            }
        }
    }
}

/// Crossfades from `src_fade_out` to the destination's contents, in place.
///
/// The complement of [`linear_crossfade_out`]:
/// `dest_fade_in[i] = dest_fade_in[i] * mix + src_fade_out[i] * (1 - mix)`.
pub fn linear_crossfade_in(dest_fade_in: &mut [f32], src_fade_out: &[f32], layout: ChannelLayout) {
    debug_assert_eq!(dest_fade_in.len(), src_fade_out.len());
    match layout {
        ChannelLayout::Stereo => crossfade_stereo_in(dest_fade_in, src_fade_out),
        ChannelLayout::Stem => crossfade_stem_in(dest_fade_in, src_fade_out),
        ChannelLayout::Other(channels) => {
            debug_assert!(channels > 0);
            debug_assert_eq!(dest_fade_in.len() % channels, 0);
            let cross_inc = 1.0 / (dest_fade_in.len() / channels) as f32;
            for (i, (d, s)) in dest_fade_in
                .chunks_exact_mut(channels)
                .zip(src_fade_out.chunks_exact(channels))
                .enumerate()
            {
                let cross_mix = cross_inc * i as f32;
                for ch in 0..channels {
                    d[ch] *= cross_mix;
                    d[ch] += s[ch] * (1.0 - cross_mix);
                }
            }
        }
    }
}
