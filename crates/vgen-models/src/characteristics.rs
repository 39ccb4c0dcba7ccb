//! Audio characteristics diagnostics.
//!
//! The analyzer inspects a file without producing segments: level
//! statistics, a dynamic-range estimate, and a recommended
//! `volume_threshold` for the detection pipeline.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Qualitative audio quality tier, derived from dynamic range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AudioQuality {
    /// Dynamic range above 25 dB: clean recording, clear separation
    /// between speech and noise floor.
    High,
    /// Dynamic range above 15 dB: usable, some background noise.
    Medium,
    /// Dynamic range of 15 dB or less: noisy or near-constant signal.
    Low,
}

impl AudioQuality {
    /// Classify a dynamic range (dB) into a quality tier.
    pub fn from_dynamic_range(dynamic_range_db: f64) -> Self {
        if dynamic_range_db > 25.0 {
            Self::High
        } else if dynamic_range_db > 15.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Returns the tier as a string for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Flat diagnostic record produced by the characteristics analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AudioCharacteristics {
    /// Total duration in seconds
    pub duration: f64,

    /// Native sample rate of the analyzed stream (Hz)
    pub sample_rate: u32,

    /// Global RMS energy of the signal (linear)
    pub rms_energy: f64,

    /// 10th percentile of the frame dB profile: estimated noise floor
    pub noise_floor_db: f64,

    /// 80th percentile of the frame dB profile: estimated speech level
    pub speech_level_db: f64,

    /// `speech_level_db - noise_floor_db`
    pub dynamic_range_db: f64,

    /// Mean zero-crossing rate over the signal
    pub zero_crossing_rate: f64,

    /// Spectral centroid in Hz
    pub spectral_centroid: f64,

    /// Recommended `volume_threshold` (30, 40 or 50) for detection
    pub recommended_volume_threshold: u8,

    /// Qualitative quality tier
    pub audio_quality: AudioQuality,
}

impl AudioCharacteristics {
    /// Three-tier `volume_threshold` recommendation from dynamic range.
    pub fn recommend_threshold(dynamic_range_db: f64) -> u8 {
        if dynamic_range_db > 30.0 {
            30
        } else if dynamic_range_db > 20.0 {
            40
        } else {
            50
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_tiers() {
        assert_eq!(AudioQuality::from_dynamic_range(30.0), AudioQuality::High);
        assert_eq!(AudioQuality::from_dynamic_range(25.0), AudioQuality::Medium);
        assert_eq!(AudioQuality::from_dynamic_range(20.0), AudioQuality::Medium);
        assert_eq!(AudioQuality::from_dynamic_range(15.0), AudioQuality::Low);
        assert_eq!(AudioQuality::from_dynamic_range(0.0), AudioQuality::Low);
        assert_eq!(AudioQuality::Low.as_str(), "low");
    }

    #[test]
    fn test_threshold_recommendation() {
        assert_eq!(AudioCharacteristics::recommend_threshold(35.0), 30);
        assert_eq!(AudioCharacteristics::recommend_threshold(25.0), 40);
        assert_eq!(AudioCharacteristics::recommend_threshold(20.0), 50);
        assert_eq!(AudioCharacteristics::recommend_threshold(5.0), 50);
    }

    #[test]
    fn test_quality_serializes_snake_case() {
        let json = serde_json::to_value(AudioQuality::High).unwrap();
        assert_eq!(json, "high");
    }
}
