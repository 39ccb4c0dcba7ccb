#![deny(unreachable_patterns)]
//! FFmpeg CLI wrapper and the audio segmentation engine.
//!
//! This crate provides:
//! - Media fetch (local path passthrough or remote URL download)
//! - FFmpeg/FFprobe subprocess plumbing
//! - Energy-based voice activity detection with adaptive thresholding,
//!   temporal smoothing, padding/merge and confidence scoring
//! - A legacy `silencedetect`-based detector with time-range filtering
//! - An orchestrator that degrades from VAD to the legacy detector
//! - A read-only audio characteristics analyzer

pub mod audio;
pub mod command;
pub mod error;
pub mod fetch;
pub mod probe;

pub use audio::analyzer::analyze_audio_characteristics;
pub use audio::detect::detect_silence_segments;
pub use audio::legacy::detect_silence_legacy;
pub use error::{MediaError, MediaResult};
pub use fetch::{fetch_media, FetchedMedia};
pub use probe::{probe_media, MediaInfo};
