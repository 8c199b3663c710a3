//! Integration tests for muestra-core.
//!
//! Exercises the operations the way an engine's processing stages chain
//! them: decode → layout transform → gain staging → mix bus → analysis,
//! plus cross-block ramp continuity and deck-style crossfades.

use muestra_core::{
    ChannelLayout, ClipStatus, SampleBuffer, analysis, channel, convert, crossfade, gain, mix,
};

const BLOCK_FRAMES: usize = 256;
const TAU: f32 = core::f32::consts::TAU;

/// Interleaved stereo sine block: left at `freq_hz`, right at half amplitude.
fn stereo_sine(freq_hz: f32, sample_rate: f32, num_frames: usize) -> Vec<f32> {
    (0..num_frames)
        .flat_map(|n| {
            let s = libm::sinf(TAU * freq_hz * n as f32 / sample_rate);
            [s, s * 0.5]
        })
        .collect()
}

#[test]
fn decode_gain_mix_meter_pipeline() {
    // "Decode": synthesize an s16 stereo block and convert to float
    let pcm: Vec<i16> = (0..BLOCK_FRAMES)
        .flat_map(|n| {
            let s = libm::sinf(TAU * n as f32 / 64.0) * 12000.0;
            [s as i16, (s * 0.5) as i16]
        })
        .collect();
    let mut block = SampleBuffer::allocate(BLOCK_FRAMES * 2).expect("allocation failed");
    convert::convert_s16_to_float(&mut block, &pcm);

    // Channel gain trim, then accumulate onto a bus at half level
    gain::apply_alternating_gain(&mut block, 0.9, 1.1);
    let mut bus = SampleBuffer::allocate(BLOCK_FRAMES * 2).expect("allocation failed");
    mix::add_with_gain(&mut bus, &block, 0.5);

    // Metering: no clipping, level proportional to the trim gains
    let (left, right, status) = analysis::sum_abs_per_channel(&bus);
    assert_eq!(status, ClipStatus::NONE);
    assert!(left > 0.0 && right > 0.0);
    // Right channel: half-amplitude source * (1.1 / 0.9) trim ratio vs left
    let expected_ratio = 0.5 * 1.1 / 0.9;
    let ratio = right / left;
    assert!(
        (ratio - expected_ratio).abs() < 0.01,
        "expected L/R ratio {expected_ratio}, got {ratio}"
    );

    let peak = analysis::max_abs_amplitude(&bus);
    assert!(peak < 1.0, "trimmed half-level bus must not clip, peak {peak}");
    assert!(analysis::rms(&bus) < peak, "RMS of a sine is below its peak");
}

#[test]
fn ramp_continuity_across_blocks() {
    // An engine fading 1.0 → 0.25 over two blocks must not step at the
    // block boundary: each block ramps to its own endpoint and the next
    // block starts from it.
    let mut block_a = vec![1.0_f32; 64];
    let mut block_b = vec![1.0_f32; 64];
    gain::apply_ramping_gain(&mut block_a, 1.0, 0.625);
    gain::apply_ramping_gain(&mut block_b, 0.625, 0.25);

    // Boundary step equals the in-block step on both sides
    let step_a = block_a[2] - block_a[0];
    let boundary_step = block_b[0] - block_a[62];
    let step_b = block_b[2] - block_b[0];
    assert!(
        (boundary_step - step_a).abs() < 1e-5 && (boundary_step - step_b).abs() < 1e-5,
        "discontinuity at block boundary: {step_a} / {boundary_step} / {step_b}"
    );
    assert!((block_b[62] - 0.25).abs() < 1e-5, "fade must land on its target");
}

#[test]
fn deck_crossfade_preserves_total_energy_of_equal_sources() {
    // Crossfading a signal into itself must be an identity: the blend
    // weights always sum to one.
    let a = stereo_sine(440.0, 48000.0, BLOCK_FRAMES);
    let mut blended = a.clone();
    crossfade::linear_crossfade_out(&mut blended, &a, ChannelLayout::Stereo);
    for (i, (b, orig)) in blended.iter().zip(a.iter()).enumerate() {
        assert!((b - orig).abs() < 1e-5, "self-crossfade drifted at {i}");
    }
}

#[test]
fn stem_deck_to_stereo_master() {
    // A stem deck carries 4 stereo pairs; the master takes a stereo fold
    // with one pair muted, then a crossfade toward the next deck.
    let num_frames = 32;
    let stem: Vec<f32> = (0..num_frames * 8).map(|i| ((i % 8) as f32) * 0.01).collect();

    let mut master = vec![0.0_f32; num_frames * 2];
    // Exclude pair 3 (channels 6 and 7)
    channel::mix_multichannel_to_stereo_masked(&mut master, &stem, num_frames, 8, 0b1000);
    let expected_left = (0.0 + 0.02 + 0.04) as f32;
    let expected_right = (0.01 + 0.03 + 0.05) as f32;
    assert!((master[0] - expected_left).abs() < 1e-6);
    assert!((master[1] - expected_right).abs() < 1e-6);

    // Full 8-channel crossfade on the stem deck itself
    let next_stem = vec![0.0_f32; num_frames * 8];
    let mut fading = stem.clone();
    crossfade::linear_crossfade_out(&mut fading, &next_stem, ChannelLayout::Stem);
    // First frame untouched, last frame nearly silent
    assert_eq!(&fading[..8], &stem[..8]);
    let last = &fading[(num_frames - 1) * 8..];
    let orig_last = &stem[(num_frames - 1) * 8..];
    for (f, o) in last.iter().zip(orig_last.iter()) {
        assert!((f - o * (1.0 / num_frames as f32)).abs() < 1e-6);
    }
}

#[test]
fn mono_source_routing_round_trip() {
    // Mono file → dual mono deck buffer → stereo fold keeps the values
    let mono: Vec<f32> = (0..16).map(|i| i as f32 * 0.05 - 0.4).collect();
    let mut deck = vec![0.0_f32; 32];
    channel::copy_mono_to_dual_mono(&mut deck, &mono);

    let mut folded = vec![0.0_f32; 32];
    channel::mix_stereo_to_mono(&mut folded, &deck);
    for (i, frame) in folded.chunks_exact(2).enumerate() {
        assert_eq!(frame[0], mono[i], "dual-mono fold must be lossless");
        assert_eq!(frame[1], mono[i]);
    }

    // In-place expansion path matches the copying path
    let mut in_place = vec![0.0_f32; 32];
    in_place[..16].copy_from_slice(&mono);
    channel::double_mono_to_dual_mono(&mut in_place, 16);
    assert_eq!(in_place, deck);
}

#[test]
fn normalization_tracks_gain_across_blocks() {
    // Two blocks of the same quiet source: the first ramps up from unity,
    // the second holds the computed gain with no further ramp.
    let src = stereo_sine(220.0, 48000.0, BLOCK_FRAMES);
    let quiet: Vec<f32> = src.iter().map(|&s| s * 0.1).collect();

    let mut dest = vec![0.0_f32; quiet.len()];
    let gain1 = mix::copy_with_ramping_normalization(&mut dest, &quiet, 1.0, 0.8);
    assert!(gain1 > 1.0, "quiet source must be boosted, got {gain1}");

    let mut dest2 = vec![0.0_f32; quiet.len()];
    let gain2 = mix::copy_with_ramping_normalization(&mut dest2, &quiet, gain1, 0.8);
    assert!(
        (gain2 - gain1).abs() < 1e-4,
        "same content must yield the same gain: {gain1} vs {gain2}"
    );

    // The gain is derived from the mono fold, so the fold of the settled
    // output peaks at the target amplitude
    let mut fold = vec![0.0_f32; dest2.len()];
    channel::mix_stereo_to_mono(&mut fold, &dest2);
    let peak = analysis::max_abs_amplitude(&fold);
    assert!((peak - 0.8).abs() < 0.01, "normalized fold should peak at ~0.8, got {peak}");
}

#[test]
fn reverse_play_round_trip() {
    let block = stereo_sine(330.0, 48000.0, BLOCK_FRAMES);
    let mut reversed = vec![0.0_f32; block.len()];
    channel::copy_reverse(&mut reversed, &block, 2);

    // Frame N of the reversal is frame (last - N) of the original
    assert_eq!(&reversed[..2], &block[block.len() - 2..]);

    // Reversing twice restores the original
    let mut twice = reversed;
    channel::reverse(&mut twice);
    assert_eq!(twice, block);
}
