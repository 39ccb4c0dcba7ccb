//! Read-only audio characteristics analyzer.
//!
//! Computes level statistics at the file's native sample rate and
//! recommends a `volume_threshold` for the detection pipeline. Frame
//! geometry here (2048-sample frames, 512 hop) is independent of the
//! VAD's millisecond-based framing.

use tracing::debug;
use uuid::Uuid;

use vgen_models::{AudioCharacteristics, AudioQuality};

use crate::audio::confidence::{rms, spectral_centroid, zero_crossing_rate};
use crate::audio::energy::{frame_rms, percentile, to_relative_db};
use crate::audio::signal::load_mono_samples;
use crate::error::MediaResult;
use crate::fetch::fetch_media;

/// Analyzer frame length in samples.
const ANALYZER_FRAME_LEN: usize = 2048;

/// Analyzer hop length in samples.
const ANALYZER_HOP: usize = 512;

/// Analyze `media` (local path or URL) without producing segments.
pub async fn analyze_audio_characteristics(media: &str) -> MediaResult<AudioCharacteristics> {
    let job_id = Uuid::new_v4();
    let fetched = fetch_media(media, job_id).await?;

    // Native rate: the diagnostics describe the file as-is
    let signal = load_mono_samples(fetched.path(), None).await?;
    let report = characterize(&signal.samples, signal.sample_rate);

    debug!(
        %job_id,
        duration = report.duration,
        dynamic_range_db = report.dynamic_range_db,
        quality = report.audio_quality.as_str(),
        "Audio characteristics computed"
    );

    Ok(report)
}

/// Compute the diagnostic record from an in-memory signal.
pub fn characterize(samples: &[f32], sample_rate: u32) -> AudioCharacteristics {
    let duration = samples.len() as f64 / sample_rate as f64;

    let db = to_relative_db(&frame_rms(samples, ANALYZER_FRAME_LEN, ANALYZER_HOP));
    let noise_floor_db = percentile(&db, 10.0);
    let speech_level_db = percentile(&db, 80.0);
    let dynamic_range_db = speech_level_db - noise_floor_db;

    AudioCharacteristics {
        duration,
        sample_rate,
        rms_energy: rms(samples),
        noise_floor_db,
        speech_level_db,
        dynamic_range_db,
        zero_crossing_rate: zero_crossing_rate(samples),
        spectral_centroid: spectral_centroid(samples, sample_rate),
        recommended_volume_threshold: AudioCharacteristics::recommend_threshold(dynamic_range_db),
        audio_quality: AudioQuality::from_dynamic_range(dynamic_range_db),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: u32 = 44100;

    fn speech_like(loud_db_down: f32) -> Vec<f32> {
        // Alternating 1s loud / 1s quiet stretches, 4s total
        let quiet_amp = 0.5 * 10f32.powf(-loud_db_down / 20.0);
        (0..(SR as usize * 4))
            .map(|i| {
                let t = i as f64 / SR as f64;
                let amp = if (t as usize) % 2 == 0 { 0.5 } else { quiet_amp };
                (2.0 * std::f64::consts::PI * 300.0 * t).sin() as f32 * amp
            })
            .collect()
    }

    #[test]
    fn test_characterize_clean_recording() {
        let report = characterize(&speech_like(35.0), SR);

        assert!((report.duration - 4.0).abs() < 0.01);
        assert_eq!(report.sample_rate, SR);
        assert!(report.rms_energy > 0.0);
        assert!(report.dynamic_range_db > 25.0);
        assert_eq!(report.audio_quality, AudioQuality::High);
        assert_eq!(report.recommended_volume_threshold, 30);
        assert!(report.noise_floor_db <= report.speech_level_db);
    }

    #[test]
    fn test_characterize_flat_recording() {
        // Nearly constant level: small dynamic range, low quality
        let samples: Vec<f32> = (0..(SR as usize * 2))
            .map(|i| (2.0 * std::f64::consts::PI * 300.0 * i as f64 / SR as f64).sin() as f32 * 0.4)
            .collect();
        let report = characterize(&samples, SR);

        assert!(report.dynamic_range_db < 15.0);
        assert_eq!(report.audio_quality, AudioQuality::Low);
        assert_eq!(report.recommended_volume_threshold, 50);
    }

    #[test]
    fn test_characterize_all_silence() {
        let samples = vec![0.0f32; SR as usize * 2];
        let report = characterize(&samples, SR);

        assert_eq!(report.rms_energy, 0.0);
        assert!(report.dynamic_range_db.abs() < 1e-9);
        assert_eq!(report.audio_quality, AudioQuality::Low);
        assert_eq!(report.spectral_centroid, 0.0);
    }

    #[test]
    fn test_characterize_medium_quality() {
        let report = characterize(&speech_like(22.0), SR);
        assert_eq!(report.audio_quality, AudioQuality::Medium);
        assert_eq!(report.recommended_volume_threshold, 40);
    }
}
