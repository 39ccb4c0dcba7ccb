//! Segment records produced by silence/speech detection.
//!
//! The advanced VAD path emits [`SpeechSegment`] records (speech
//! regions, with a heuristic confidence); the legacy path emits
//! [`SilenceInterval`] records (silence regions, formatted boundaries).
//! [`SilenceDetection`] tags which method produced a given result so
//! callers can tell a degraded response from a normal one.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timestamp::format_time;

/// A detected speech region, produced by the advanced VAD pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpeechSegment {
    /// 1-based sequential identifier within one detection result
    pub id: usize,

    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,

    /// Duration in seconds (`end - start`)
    pub duration: f64,

    /// Start time as `HH:MM:SS.mmm`
    pub start_formatted: String,

    /// End time as `HH:MM:SS.mmm`
    pub end_formatted: String,

    /// Heuristic confidence in [0, 1]
    pub confidence: f64,
}

impl SpeechSegment {
    /// Build an output record from raw boundaries and a confidence score.
    pub fn new(id: usize, start: f64, end: f64, confidence: f64) -> Self {
        Self {
            id,
            start,
            end,
            duration: end - start,
            start_formatted: format_time(start),
            end_formatted: format_time(end),
            confidence,
        }
    }
}

/// A detected silence interval, produced by the legacy detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SilenceInterval {
    /// Start time as `HH:MM:SS.mmm`
    pub start: String,

    /// End time as `HH:MM:SS.mmm`
    pub end: String,

    /// Duration in seconds, rounded to 2 decimals
    pub duration: f64,
}

impl SilenceInterval {
    /// Build an output record from raw second boundaries.
    pub fn new(start_secs: f64, end_secs: f64, duration_secs: f64) -> Self {
        Self {
            start: format_time(start_secs),
            end: format_time(end_secs),
            duration: (duration_secs * 100.0).round() / 100.0,
        }
    }
}

/// Tagged detection result: which method produced the segments.
///
/// The orchestrator degrades from VAD to the legacy detector on VAD
/// failure; the tag lets callers observe that degradation instead of
/// guessing from the record shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "method", content = "segments", rename_all = "snake_case")]
pub enum SilenceDetection {
    /// Advanced VAD result: speech regions with confidence scores.
    Vad(Vec<SpeechSegment>),
    /// Legacy result: silence intervals with formatted boundaries.
    Legacy(Vec<SilenceInterval>),
}

impl SilenceDetection {
    /// Method name for logging and job records.
    pub fn method(&self) -> &'static str {
        match self {
            Self::Vad(_) => "vad",
            Self::Legacy(_) => "legacy",
        }
    }

    /// Number of segments in the result, regardless of method.
    pub fn len(&self) -> usize {
        match self {
            Self::Vad(segments) => segments.len(),
            Self::Legacy(intervals) => intervals.len(),
        }
    }

    /// Returns true when no segments were detected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_segment_new() {
        let seg = SpeechSegment::new(1, 1.5, 4.25, 0.8);
        assert_eq!(seg.id, 1);
        assert!((seg.duration - 2.75).abs() < 1e-9);
        assert_eq!(seg.start_formatted, "00:00:01.500");
        assert_eq!(seg.end_formatted, "00:00:04.250");
    }

    #[test]
    fn test_silence_interval_rounding() {
        let interval = SilenceInterval::new(0.0, 5.0, 5.00499);
        assert_eq!(interval.duration, 5.0);
        assert_eq!(interval.start, "00:00:00.000");
        assert_eq!(interval.end, "00:00:05.000");
    }

    #[test]
    fn test_detection_tag() {
        let vad = SilenceDetection::Vad(vec![SpeechSegment::new(1, 0.0, 1.0, 0.5)]);
        assert_eq!(vad.method(), "vad");
        assert_eq!(vad.len(), 1);

        let legacy = SilenceDetection::Legacy(vec![]);
        assert_eq!(legacy.method(), "legacy");
        assert!(legacy.is_empty());
    }

    #[test]
    fn test_detection_serializes_with_method_tag() {
        let legacy = SilenceDetection::Legacy(vec![SilenceInterval::new(0.0, 2.0, 2.0)]);
        let json = serde_json::to_value(&legacy).unwrap();
        assert_eq!(json["method"], "legacy");
        assert_eq!(json["segments"][0]["duration"], 2.0);
    }
}
