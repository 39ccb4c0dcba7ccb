//! Silence/speech detection engine.
//!
//! Two detection methods share one entry point:
//!
//! ```text
//! ┌──────────────┐    ┌───────────────┐    ┌──────────────┐
//! │ Audio Input  │───►│ Energy VAD    │───►│ SpeechSegment│
//! │ (16kHz mono) │    │ (db profile)  │    │ + confidence │
//! └──────────────┘    └───────┬───────┘    └──────────────┘
//!                             │ on failure
//!                             ▼
//!                     ┌───────────────┐    ┌──────────────┐
//!                     │ silencedetect │───►│SilenceInterval│
//!                     │ (FFmpeg)      │    │ (formatted)  │
//!                     └───────────────┘    └──────────────┘
//! ```
//!
//! The VAD path computes a frame-wise decibel energy profile, derives
//! an adaptive threshold from its percentile distribution, smooths the
//! resulting speech flags, extracts/pads/merges segments and scores
//! each with a heuristic confidence. The legacy path shells out to
//! FFmpeg's `silencedetect` filter and parses its diagnostic output.

pub mod analyzer;
pub mod confidence;
pub mod detect;
pub mod energy;
pub mod legacy;
pub mod segments;
pub mod signal;
pub mod smoothing;

pub use analyzer::analyze_audio_characteristics;
pub use detect::{detect_silence_segments, segment_samples};
pub use energy::{adaptive_threshold_db, compute_energy_profile, EnergyProfile};
pub use legacy::detect_silence_legacy;
pub use segments::{extract_segments, merge_segments, pad_segments, TimeSegment};

/// Sample rate the VAD path resamples to (Hz).
pub const VAD_SAMPLE_RATE: u32 = 16000;

/// Decibel floor for near-zero-energy frames; keeps the profile free
/// of `-inf`/`NaN`.
pub const DB_FLOOR: f64 = -100.0;
