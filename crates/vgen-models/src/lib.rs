//! Shared data models for the VideoGen backend.
//!
//! This crate provides Serde-serializable types for:
//! - Speech/silence segment records produced by audio analysis
//! - Analysis parameter bundles
//! - Audio characteristics diagnostics
//! - Timestamp parsing and formatting
//! - A TTL cache with an injected clock

pub mod cache;
pub mod characteristics;
pub mod params;
pub mod segment;
pub mod timestamp;

// Re-export common types
pub use cache::{Clock, SystemClock, TtlCache};
pub use characteristics::{AudioCharacteristics, AudioQuality};
pub use params::{AnalysisParams, ParamsError};
pub use segment::{SilenceDetection, SilenceInterval, SpeechSegment};
pub use timestamp::{format_time, parse_timestamp, TimestampError};
