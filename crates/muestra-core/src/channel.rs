//! Channel layout transforms: interleaving, folding, and frame reordering.
//!
//! Pure reshuffling and reduction over interleaved buffers — no gain staging
//! beyond the fixed averaging scales. Interleave/deinterleave come in
//! fixed-arity stereo and 8-channel stem forms rather than one generic-N
//! loop: constant strides are what lets the vectorizer turn these into
//! shuffles. [`ChannelLayout`] is the dispatch tag other modules use to pick
//! between the specialized and generic paths.
//!
//! Every transform expects buffer lengths that are exact multiples of the
//! stated frame stride. That is a precondition, not a runtime error:
//! violations are caught by `debug_assert!` and the `chunks_exact` iteration
//! simply leaves any ragged tail untouched.

/// Channel count tag used to dispatch to specialized per-layout loops.
///
/// Stereo (2) and stem (8, four stereo pairs) have hand-specialized paths in
/// this crate; anything else takes the generic fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// Two interleaved channels.
    Stereo,
    /// Eight interleaved channels: four stereo pairs forming a sub-mix stem.
    Stem,
    /// Any other channel count.
    Other(usize),
}

impl ChannelLayout {
    /// Number of samples per frame for this layout.
    #[inline]
    pub const fn count(self) -> usize {
        match self {
            Self::Stereo => 2,
            Self::Stem => 8,
            Self::Other(n) => n,
        }
    }

    /// Maps a raw channel count to its layout tag.
    #[inline]
    pub const fn from_count(channels: usize) -> Self {
        match channels {
            2 => Self::Stereo,
            8 => Self::Stem,
            n => Self::Other(n),
        }
    }
}

/// Interleaves two channel streams into one stereo buffer.
///
/// `dest` must hold `2 * src1.len()` samples; `src1` and `src2` must have
/// equal length.
pub fn interleave_stereo(dest: &mut [f32], src1: &[f32], src2: &[f32]) {
    debug_assert_eq!(src1.len(), src2.len());
    debug_assert!(dest.len() >= src1.len() * 2);
    for (i, frame) in dest.chunks_exact_mut(2).enumerate() {
        frame[0] = src1[i];
        frame[1] = src2[i];
    }
}

/// Interleaves eight channel streams into one stem buffer.
///
/// `dest` must hold `8 * srcs[0].len()` samples; all sources must have equal
/// length.
pub fn interleave_stem(dest: &mut [f32], srcs: [&[f32]; 8]) {
    debug_assert!(srcs.iter().all(|s| s.len() == srcs[0].len()));
    debug_assert!(dest.len() >= srcs[0].len() * 8);
    for (i, frame) in dest.chunks_exact_mut(8).enumerate() {
        for (ch, src) in srcs.iter().enumerate() {
            frame[ch] = src[i];
        }
    }
}

/// Splits one interleaved stereo buffer into two channel streams.
pub fn deinterleave_stereo(dest1: &mut [f32], dest2: &mut [f32], src: &[f32]) {
    debug_assert_eq!(dest1.len(), dest2.len());
    debug_assert!(src.len() >= dest1.len() * 2);
    for (i, frame) in src.chunks_exact(2).enumerate() {
        dest1[i] = frame[0];
        dest2[i] = frame[1];
    }
}

/// Splits one interleaved stem buffer into eight channel streams.
pub fn deinterleave_stem(mut dests: [&mut [f32]; 8], src: &[f32]) {
    debug_assert!(src.len() >= dests[0].len() * 8);
    for (i, frame) in src.chunks_exact(8).enumerate() {
        for (ch, dest) in dests.iter_mut().enumerate() {
            dest[i] = frame[ch];
        }
    }
}

/// Averages each stereo pair of `src` into both channel slots of `dest`.
///
/// The output stays stereo-shaped but mono-valued, for downstream stages
/// that still expect stereo frames. Slices must have equal length.
pub fn mix_stereo_to_mono(dest: &mut [f32], src: &[f32]) {
    debug_assert_eq!(dest.len(), src.len());
    let mix_scale = 1.0 / 2.0;
    for (d, s) in dest.chunks_exact_mut(2).zip(src.chunks_exact(2)) {
        let mono = (s[0] + s[1]) * mix_scale;
        d[0] = mono;
        d[1] = mono;
    }
}

/// In-place variant of [`mix_stereo_to_mono`].
pub fn mix_stereo_to_mono_in_place(buffer: &mut [f32]) {
    let mix_scale = 1.0 / 2.0;
    for frame in buffer.chunks_exact_mut(2) {
        let mono = (frame[0] + frame[1]) * mix_scale;
        frame[0] = mono;
        frame[1] = mono;
    }
}

/// Averages all `channels` samples of each frame into one mono sample.
///
/// Writes `src.len() / channels` samples to the front of `dest` (the buffer
/// shrinks by the channel count).
pub fn mix_multichannel_to_mono(dest: &mut [f32], src: &[f32], channels: usize) {
    debug_assert!(channels > 0);
    debug_assert!(dest.len() >= src.len() / channels);
    let mix_scale = 1.0 / channels as f32;
    for (d, frame) in dest.iter_mut().zip(src.chunks_exact(channels)) {
        let mut sum = 0.0;
        for &s in frame {
            sum += s;
        }
        *d = sum * mix_scale;
    }
}

/// Sums every stereo pair of a multichannel frame into one stereo frame.
///
/// `src` has `num_frames` frames of `channels` samples (`channels` even and
/// greater than 2); `dest` receives `num_frames` stereo frames. Equivalent to
/// [`mix_multichannel_to_stereo_masked`] with an empty mask.
pub fn mix_multichannel_to_stereo(
    dest: &mut [f32],
    src: &[f32],
    num_frames: usize,
    channels: usize,
) {
    mix_multichannel_to_stereo_masked(dest, src, num_frames, channels, 0);
}

/// [`mix_multichannel_to_stereo`] with selective stem-pair exclusion.
///
/// Bit `i` of `exclude_mask` set skips the i-th stereo pair of each frame,
/// so individual stems can be dropped from the fold without a separate pass.
pub fn mix_multichannel_to_stereo_masked(
    dest: &mut [f32],
    src: &[f32],
    num_frames: usize,
    channels: usize,
    exclude_mask: u32,
) {
    debug_assert!(channels > 2 && channels % 2 == 0);
    debug_assert!(src.len() >= num_frames * channels);
    debug_assert!(dest.len() >= num_frames * 2);
    let stereo_pair_count = channels / 2;
    debug_assert!(stereo_pair_count < 32, "exclusion mask is 32 bits");

    crate::buffer::clear(&mut dest[..num_frames * 2]);
    for pair_idx in 0..stereo_pair_count {
        if exclude_mask >> pair_idx & 0b1 == 0b1 {
            continue;
        }
        for i in 0..num_frames {
            let src_idx = channels * i + pair_idx * 2;
            let dest_idx = 2 * i;
            dest[dest_idx] += src[src_idx];
            dest[dest_idx + 1] += src[src_idx + 1];
        }
    }
}

/// Expands `num_frames` mono samples at the front of `buffer` into stereo
/// pairs, in place.
///
/// Iterates backward — required correctness, not style: each mono slot
/// expands into two output slots, so a forward pass would overwrite source
/// samples before reading them. `buffer` must hold `2 * num_frames` samples.
pub fn double_mono_to_dual_mono(buffer: &mut [f32], num_frames: usize) {
    debug_assert!(buffer.len() >= num_frames * 2);
    for i in (0..num_frames).rev() {
        let s = buffer[i];
        buffer[i * 2] = s;
        buffer[i * 2 + 1] = s;
    }
}

/// Copies each mono sample of `src` into a stereo pair of `dest`.
///
/// `dest` must hold `2 * src.len()` samples.
pub fn copy_mono_to_dual_mono(dest: &mut [f32], src: &[f32]) {
    debug_assert!(dest.len() >= src.len() * 2);
    for (frame, &s) in dest.chunks_exact_mut(2).zip(src.iter()) {
        frame[0] = s;
        frame[1] = s;
    }
}

/// Accumulates a gain-scaled mono source into both channels of a stereo
/// destination. No-op when `gain` is zero.
pub fn add_mono_to_stereo_with_gain(dest: &mut [f32], src: &[f32], gain: f32) {
    if gain == 0.0 {
        // no need to add silence
        return;
    }
    debug_assert!(dest.len() >= src.len() * 2);
    for (frame, &s) in dest.chunks_exact_mut(2).zip(src.iter()) {
        let v = s * gain;
        frame[0] += v;
        frame[1] += v;
    }
}

/// Accumulates a mono source into both channels of a stereo destination.
pub fn add_mono_to_stereo(dest: &mut [f32], src: &[f32]) {
    add_mono_to_stereo_with_gain(dest, src, 1.0);
}

/// Compacts the first stereo pair of each multichannel frame to the front of
/// the buffer, in place.
///
/// After the call the first `2 * num_frames` samples are the stereo content;
/// the tail is stale. Forward iteration is safe here because the read index
/// never trails the write index.
pub fn strip_multi_to_stereo(buffer: &mut [f32], num_frames: usize, channels: usize) {
    debug_assert!(channels > 2);
    debug_assert!(buffer.len() >= num_frames * channels);
    for i in 0..num_frames {
        buffer[i * 2] = buffer[i * channels];
        buffer[i * 2 + 1] = buffer[i * channels + 1];
    }
}

/// Extracts one stereo pair from each multichannel frame of `src` into the
/// stereo buffer `dest`.
///
/// `source_channel` is the even channel index of the pair to extract.
pub fn copy_one_stereo_from_multi(
    dest: &mut [f32],
    src: &[f32],
    channels: usize,
    source_channel: usize,
) {
    debug_assert!(channels > 2);
    debug_assert!(source_channel + 1 < channels);
    debug_assert!(dest.len() / 2 >= src.len() / channels);
    for (frame_out, frame_in) in dest.chunks_exact_mut(2).zip(src.chunks_exact(channels)) {
        frame_out[0] = frame_in[source_channel];
        frame_out[1] = frame_in[source_channel + 1];
    }
}

/// Splices the stereo buffer `src` into one stereo pair of each multichannel
/// frame of `dest`, leaving the other channels untouched.
///
/// `channel_offset` is the even channel index of the pair to overwrite.
pub fn insert_stereo_to_multi(
    dest: &mut [f32],
    src: &[f32],
    channels: usize,
    channel_offset: usize,
) {
    debug_assert!(channels > 2);
    debug_assert!(channel_offset + 1 < channels);
    debug_assert!(dest.len() / channels <= src.len() / 2);
    for (frame_out, frame_in) in dest.chunks_exact_mut(channels).zip(src.chunks_exact(2)) {
        frame_out[channel_offset] = frame_in[0];
        frame_out[channel_offset + 1] = frame_in[1];
    }
}

/// Reverses the frame order of an interleaved stereo buffer in place.
///
/// Each frame's two channel samples stay adjacent and in order; only the
/// frame sequence flips.
pub fn reverse(buffer: &mut [f32]) {
    let n = buffer.len();
    for j in 0..n / 4 {
        let endpos = n - 1 - j * 2;
        buffer.swap(j * 2, endpos - 1);
        buffer.swap(j * 2 + 1, endpos);
    }
}

/// Copies `src` into `dest` with frame order reversed, for any channel count.
///
/// Channel order within each frame is preserved. `src.len()` must be an
/// exact multiple of `channels`.
pub fn copy_reverse(dest: &mut [f32], src: &[f32], channels: usize) {
    debug_assert!(channels > 0);
    debug_assert_eq!(src.len() % channels, 0);
    debug_assert_eq!(dest.len(), src.len());
    let n = src.len();
    for (frame_idx, frame_out) in dest.chunks_exact_mut(channels).enumerate() {
        let start = n - (frame_idx + 1) * channels;
        frame_out.copy_from_slice(&src[start..start + channels]);
    }
}
