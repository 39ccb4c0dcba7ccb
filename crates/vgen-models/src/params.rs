//! Analysis parameter bundle.
//!
//! These parameters control both detection methods. Unknown keys in a
//! request are ignored; type mismatches and out-of-range values are
//! reported before any processing starts.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timestamp::{parse_timestamp, TimestampError};

/// Parameter validation/conversion error. Fail-fast: raised before any
/// audio is loaded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("Invalid parameters: {0}")]
    Decode(String),

    #[error("volume_threshold must be within 0-100, got {0}")]
    VolumeThresholdOutOfRange(f64),

    #[error("min_speech_duration must be positive, got {0}")]
    NonPositiveSpeechDuration(f64),

    #[error("frame_duration_ms must be positive, got {0}")]
    NonPositiveFrameDuration(u64),

    #[error("Invalid {field}: {source}")]
    Timestamp {
        field: &'static str,
        source: TimestampError,
    },
}

/// Configuration for silence/speech detection.
///
/// The advanced VAD path reads the energy/smoothing/padding knobs; the
/// legacy path reads `noise_threshold`, `mono` and the time range.
/// Each detector ignores the other's parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AnalysisParams {
    /// Percentage (0-100) mapped onto the observed energy range to
    /// derive the speech threshold.
    ///
    /// - Lower values (20-30): more frames classified as speech
    /// - Default (40): balanced for narrated voice-over audio
    /// - Higher values (60+): only the loudest frames count as speech
    pub volume_threshold: f64,

    /// Minimum duration of a speech segment in seconds. Shorter
    /// candidate segments are discarded.
    pub min_speech_duration: f64,

    /// Padding added around each speech segment (milliseconds), so word
    /// onsets and tails are not clipped.
    pub speech_padding_ms: u64,

    /// Maximum silence gap between two segments before they merge into
    /// one (milliseconds).
    pub silence_padding_ms: u64,

    /// Analysis frame length in milliseconds. Hop is half of this.
    pub frame_duration_ms: u64,

    /// Noise threshold for the legacy detector, e.g. `"-30dB"`.
    pub noise_threshold: String,

    /// Downmix to mono inside the legacy filter.
    pub mono: bool,

    /// Optional lower bound of the interval filter (legacy only),
    /// `HH:MM:SS` form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    /// Optional upper bound of the interval filter (legacy only),
    /// `HH:MM:SS` form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            volume_threshold: 40.0,
            min_speech_duration: 0.5,
            speech_padding_ms: 50,
            silence_padding_ms: 450,
            frame_duration_ms: 30,
            noise_threshold: "-30dB".to_string(),
            mono: false,
            start_time: None,
            end_time: None,
        }
    }
}

impl AnalysisParams {
    /// Decode parameters from a JSON object.
    ///
    /// Unrecognized keys are silently ignored; wrong types fail.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ParamsError> {
        let params: Self =
            serde_json::from_value(value).map_err(|e| ParamsError::Decode(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Validate ranges and time strings. Called before any processing.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(0.0..=100.0).contains(&self.volume_threshold) {
            return Err(ParamsError::VolumeThresholdOutOfRange(self.volume_threshold));
        }
        if self.min_speech_duration <= 0.0 {
            return Err(ParamsError::NonPositiveSpeechDuration(
                self.min_speech_duration,
            ));
        }
        if self.frame_duration_ms == 0 {
            return Err(ParamsError::NonPositiveFrameDuration(self.frame_duration_ms));
        }
        if let Some(ts) = &self.start_time {
            parse_timestamp(ts).map_err(|source| ParamsError::Timestamp {
                field: "start_time",
                source,
            })?;
        }
        if let Some(ts) = &self.end_time {
            parse_timestamp(ts).map_err(|source| ParamsError::Timestamp {
                field: "end_time",
                source,
            })?;
        }
        Ok(())
    }

    /// Lower bound of the legacy interval filter in seconds (0 when unset).
    pub fn start_seconds(&self) -> f64 {
        self.start_time
            .as_deref()
            .and_then(|ts| parse_timestamp(ts).ok())
            .unwrap_or(0.0)
    }

    /// Upper bound of the legacy interval filter in seconds (+inf when unset).
    pub fn end_seconds(&self) -> f64 {
        self.end_time
            .as_deref()
            .and_then(|ts| parse_timestamp(ts).ok())
            .unwrap_or(f64::INFINITY)
    }

    /// Decibel noise threshold derived from the 0-100 volume threshold,
    /// used when degrading from VAD to the legacy detector.
    pub fn derived_noise_threshold(&self) -> String {
        format!("-{}dB", (100.0 - self.volume_threshold).round() as i64)
    }

    /// Builder-style setter for the volume threshold.
    pub fn with_volume_threshold(mut self, threshold: f64) -> Self {
        self.volume_threshold = threshold.clamp(0.0, 100.0);
        self
    }

    /// Builder-style setter for the minimum speech duration.
    pub fn with_min_speech_duration(mut self, secs: f64) -> Self {
        self.min_speech_duration = secs;
        self
    }

    /// Builder-style setter for the legacy time range.
    pub fn with_time_range(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.start_time = Some(start.into());
        self.end_time = Some(end.into());
        self
    }
}
