//! Property-based tests for muestra-core buffer arithmetic.
//!
//! Verifies the numeric contracts that downstream engine code depends on:
//! s16 round-trip exactness, gain fast-path identities, mix linearity, ramp
//! boundary values, crossfade complementarity, and mixdown conservation —
//! all over proptest-randomized buffer contents.

use proptest::prelude::*;

use muestra_core::{ChannelLayout, analysis, channel, convert, crossfade, gain, mix};

/// Random audio buffer with an even length (whole stereo frames).
fn stereo_buffer(max_frames: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-1.0f32..=1.0f32, 1..=max_frames)
        .prop_map(|half| half.iter().flat_map(|&s| [s, -s * 0.5]).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Every s16 sample survives s16 → f32 → s16 unchanged, including the
    /// extreme negative value (which maps to exactly -1.0).
    #[test]
    fn s16_round_trip(samples in prop::collection::vec(any::<i16>(), 1..=256)) {
        let mut floats = vec![0.0f32; samples.len()];
        let mut back = vec![0i16; samples.len()];
        convert::convert_s16_to_float(&mut floats, &samples);
        convert::convert_float_to_s16(&mut back, &floats);
        prop_assert_eq!(back, samples);
    }

    /// Converted floats stay inside [-1.0, 1.0) — the positive bound is
    /// exclusive because the fixed-point maximum is one short of the
    /// negated minimum.
    #[test]
    fn s16_conversion_range(samples in prop::collection::vec(any::<i16>(), 1..=256)) {
        let mut floats = vec![0.0f32; samples.len()];
        convert::convert_s16_to_float(&mut floats, &samples);
        for &f in &floats {
            prop_assert!((-1.0..1.0).contains(&f), "out of range: {}", f);
        }
    }

    /// Unity gain leaves every sample bit-identical; zero gain silences.
    #[test]
    fn gain_identities(buffer in stereo_buffer(128)) {
        let mut unity = buffer.clone();
        gain::apply_gain(&mut unity, 1.0);
        prop_assert_eq!(&unity, &buffer);

        let mut silence = buffer.clone();
        gain::apply_gain(&mut silence, 0.0);
        prop_assert!(silence.iter().all(|&s| s == 0.0));
    }

    /// `add_with_gain(dest, src, g)` equals `add(dest, scaled copy of src)`.
    #[test]
    fn add_with_gain_linearity(
        buffer in stereo_buffer(128),
        g in -4.0f32..=4.0f32,
    ) {
        let dest_init: Vec<f32> = buffer.iter().map(|&s| s * 0.25).collect();

        let mut fused = dest_init.clone();
        mix::add_with_gain(&mut fused, &buffer, g);

        let mut scaled = buffer.clone();
        gain::apply_gain(&mut scaled, g);
        let mut reference = dest_init;
        mix::add(&mut reference, &scaled);

        for (f, r) in fused.iter().zip(reference.iter()) {
            prop_assert!((f - r).abs() < 1e-5, "linearity broke: {} vs {}", f, r);
        }
    }

    /// The ramp multiplies the first frame by `old + step` (one step past
    /// the old gain) and the last frame by exactly `new`, with every frame
    /// pair sharing one gain value.
    #[test]
    fn ramp_boundary_values(
        frames in 2usize..=128,
        old in -2.0f32..=2.0f32,
        new in -2.0f32..=2.0f32,
    ) {
        prop_assume!(old != new);
        // All-ones input makes the buffer read back the applied gain directly
        let mut buf = vec![1.0f32; frames * 2];
        gain::apply_ramping_gain(&mut buf, old, new);

        let step = (new - old) / frames as f32;
        prop_assume!(step != 0.0); // tiny deltas fall back to the flat path

        let tol = 1e-4 * (1.0 + old.abs() + new.abs());
        prop_assert!(
            (buf[0] - (old + step)).abs() < tol,
            "first frame gain {} != old {} + step {}", buf[0], old, step
        );
        prop_assert!(
            (buf[buf.len() - 1] - new).abs() < tol,
            "last frame gain {} != new gain {}", buf[buf.len() - 1], new
        );
        for frame in buf.chunks_exact(2) {
            prop_assert_eq!(frame[0], frame[1], "frame pair must share a gain");
        }
    }

    /// Crossfading A out against B equals crossfading B in against A, and
    /// both match the direct `(1-mix)*A + mix*B` reference blend.
    #[test]
    fn crossfade_complementarity(
        a in stereo_buffer(64),
        scale in -1.0f32..=1.0f32,
    ) {
        let b: Vec<f32> = a.iter().rev().map(|&s| s * scale).collect();

        let mut faded_out = a.clone();
        crossfade::linear_crossfade_out(&mut faded_out, &b, ChannelLayout::Stereo);

        let mut faded_in = b.clone();
        crossfade::linear_crossfade_in(&mut faded_in, &a, ChannelLayout::Stereo);

        let frames = a.len() / 2;
        let cross_inc = 1.0 / frames as f32;
        for i in 0..frames * 2 {
            let mix = cross_inc * (i / 2) as f32;
            let reference = a[i] * (1.0 - mix) + b[i] * mix;
            prop_assert!(
                (faded_out[i] - reference).abs() < 1e-5,
                "out blend off at {}: {} vs {}", i, faded_out[i], reference
            );
            prop_assert!(
                (faded_in[i] - reference).abs() < 1e-5,
                "in blend off at {}: {} vs {}", i, faded_in[i], reference
            );
        }
    }

    /// The generic crossfade path agrees with the specialized stereo and
    /// stem paths on their own layouts.
    #[test]
    fn crossfade_specializations_agree(frames in 1usize..=32) {
        for channels in [2usize, 8] {
            let len = frames * channels;
            let a: Vec<f32> = (0..len).map(|i| (i as f32 * 0.37).sin()).collect();
            let b: Vec<f32> = (0..len).map(|i| (i as f32 * 0.11).cos()).collect();

            let mut specialized = a.clone();
            crossfade::linear_crossfade_out(
                &mut specialized,
                &b,
                ChannelLayout::from_count(channels),
            );

            let mut generic = a.clone();
            crossfade::linear_crossfade_out(&mut generic, &b, ChannelLayout::Other(channels));

            prop_assert_eq!(specialized, generic, "channels = {}", channels);
        }
    }

    /// The multichannel mono fold is the arithmetic mean of each frame,
    /// including all-zero and all-equal frames.
    #[test]
    fn mixdown_conservation(
        frames in 1usize..=64,
        channels in 1usize..=8,
        seed in -1.0f32..=1.0f32,
    ) {
        let src: Vec<f32> = (0..frames * channels)
            .map(|i| seed * ((i * 7 % 13) as f32 - 6.0) / 6.0)
            .collect();
        let mut dest = vec![0.0f32; frames];
        channel::mix_multichannel_to_mono(&mut dest, &src, channels);

        for (i, frame) in src.chunks_exact(channels).enumerate() {
            let mean: f32 = frame.iter().sum::<f32>() / channels as f32;
            prop_assert!(
                (dest[i] - mean).abs() < 1e-5,
                "frame {} fold {} != mean {}", i, dest[i], mean
            );
        }
    }

    /// Peak analysis is invariant under frame reversal and sign flips.
    #[test]
    fn peak_invariants(buffer in stereo_buffer(128)) {
        let peak = analysis::max_abs_amplitude(&buffer);

        let mut reversed = buffer.clone();
        channel::reverse(&mut reversed);
        prop_assert_eq!(analysis::max_abs_amplitude(&reversed), peak);

        let negated: Vec<f32> = buffer.iter().map(|&s| -s).collect();
        prop_assert_eq!(analysis::max_abs_amplitude(&negated), peak);
    }
}
