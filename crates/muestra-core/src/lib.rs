//! Muestra Core - real-time-safe sample buffer arithmetic
//!
//! This crate is the per-block arithmetic vocabulary of an audio engine:
//! pure, allocation-free operations over flat `f32` sample slices, designed
//! to run deterministically inside a real-time audio callback on every
//! active processing stage.
//!
//! # Operations
//!
//! ## Allocation
//!
//! - [`SampleBuffer`] - owning buffer aligned to [`SIMD_ALIGN`] bytes so
//!   vectorized loops skip the serial ramp-up a misaligned head would force
//!
//! ## Gain ([`gain`])
//!
//! - Constant, linearly ramping, and per-channel alternating gain, in place
//! - Unity gain is a no-op, zero gain a clear — fast paths everywhere a
//!   gain parameter appears
//!
//! ## Mixing ([`mix`])
//!
//! - `add*` - accumulate gain-scaled sources into a destination
//! - `copy*` - weighted-sum overwrite for channel-matrix mixdown
//! - Ramp-normalized copy that returns the computed gain for cross-block
//!   ramp tracking
//!
//! ## Format conversion ([`convert`])
//!
//! - s16 ↔ normalized f32, exact round trip over the whole s16 domain
//!
//! ## Channel layout ([`channel`])
//!
//! - Interleave/deinterleave (stereo and 8-channel stem), mono/stereo/
//!   multichannel folds, dual-mono expansion, stereo-pair extract/insert,
//!   frame-order reversal
//! - [`ChannelLayout`] - dispatch tag for the specialized stereo/stem loops
//!
//! ## Crossfading ([`crossfade`])
//!
//! - Complementary linear in/out crossfades with per-layout specialization
//!
//! ## Analysis ([`analysis`])
//!
//! - Peak, RMS, sum-of-squares, per-channel level sums with [`ClipStatus`]
//!   clipping flags
//!
//! # Real-time contract
//!
//! Every operation is a bounded-time pure function over caller-owned slices:
//! no allocation (after [`SampleBuffer::allocate`] at setup), no locks, no
//! data-dependent branching inside the loops. Buffers are exclusively owned
//! by the calling stage for the duration of the call — `&mut` makes that
//! contract structural rather than conventional. Layout preconditions
//! (lengths divisible by the channel count, equal-length pairs) are
//! `debug_assert!`ed, not runtime errors.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded audio applications.
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! muestra-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use muestra_core::{ChannelLayout, SampleBuffer, crossfade, gain, mix};
//!
//! let mut bus = SampleBuffer::allocate(512).expect("out of memory");
//! let mut voice = SampleBuffer::allocate(512).expect("out of memory");
//! voice.fill(0.25);
//!
//! // Ramp the voice from unity toward half gain, then mix it onto the bus.
//! gain::apply_ramping_gain(&mut voice, 1.0, 0.5);
//! mix::add_with_gain(&mut bus, &voice, 0.8);
//!
//! // Crossfade the bus into the next clip.
//! let next = SampleBuffer::allocate(512).expect("out of memory");
//! crossfade::linear_crossfade_out(&mut bus, &next, ChannelLayout::Stereo);
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: no allocations or locks in audio processing paths
//! - **Auto-vectorization over intrinsics**: straight-line `chunks_exact`
//!   loops with constant strides, specialized per channel layout
//! - **Aliasing by construction**: `&mut [f32]` destinations cannot overlap
//!   `&[f32]` sources; in-place operations are explicit single-slice APIs
//! - **No dependencies on std**: pure `no_std` with `libm` for math

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod analysis;
pub mod buffer;
pub mod channel;
pub mod convert;
pub mod crossfade;
pub mod gain;
pub mod mix;

// Re-export main types at crate root
pub use analysis::ClipStatus;
pub use buffer::{PEAK_AMPLITUDE, SIMD_ALIGN, SampleBuffer};
pub use channel::ChannelLayout;
