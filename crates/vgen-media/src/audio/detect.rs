//! Detection orchestrator.
//!
//! One entry point selects between the advanced energy VAD and the
//! legacy `silencedetect` parser. A VAD failure is not propagated:
//! the orchestrator logs it and degrades to the legacy method, so a
//! request still gets a usable (if coarser) result. Parameter and
//! fetch failures happen before method selection and stay fatal.

use std::time::Instant;

use metrics::{counter, histogram};
use tracing::{debug, info, warn};
use uuid::Uuid;

use vgen_models::{AnalysisParams, SilenceDetection, SpeechSegment};

use crate::audio::confidence::score_segment;
use crate::audio::energy::{adaptive_threshold_db, classify_speech, compute_energy_profile};
use crate::audio::legacy::detect_silence_legacy;
use crate::audio::segments::{extract_segments, merge_segments, pad_segments};
use crate::audio::signal::load_mono_samples;
use crate::audio::smoothing::smooth_flags;
use crate::audio::VAD_SAMPLE_RATE;
use crate::error::MediaResult;
use crate::fetch::fetch_media;

/// Detect speech/silence in `media` (local path or URL).
///
/// With `use_advanced_vad` the energy pipeline runs first and any of
/// its failures degrades to the legacy detector; without it the legacy
/// detector runs directly. When degrading (or selecting legacy through
/// this entry point), the legacy noise threshold is derived from
/// `volume_threshold` as `-(100 - volume_threshold)dB`; the explicit
/// `noise_threshold` parameter applies only when
/// [`detect_silence_legacy`] is called directly.
pub async fn detect_silence_segments(
    media: &str,
    use_advanced_vad: bool,
    params: &AnalysisParams,
) -> MediaResult<SilenceDetection> {
    // Fail fast, before any fetch or decode
    params.validate()?;

    let job_id = Uuid::new_v4();
    let started = Instant::now();
    let fetched = fetch_media(media, job_id).await?;

    let result = if use_advanced_vad {
        match plan_after_vad(run_vad(fetched.path(), params).await, params, job_id) {
            DetectionPlan::Vad(segments) => SilenceDetection::Vad(segments),
            DetectionPlan::Legacy(legacy_params) => SilenceDetection::Legacy(
                detect_silence_legacy(fetched.path(), &legacy_params).await?,
            ),
        }
    } else {
        SilenceDetection::Legacy(
            detect_silence_legacy(fetched.path(), &derived_legacy_params(params)).await?,
        )
    };

    counter!("audio_detection_total", "method" => result.method()).increment(1);
    histogram!("audio_detection_duration_seconds").record(started.elapsed().as_secs_f64());

    info!(
        %job_id,
        method = result.method(),
        segments = result.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Silence detection complete"
    );

    Ok(result)
}

/// How to finish a detection request after the VAD attempt.
#[derive(Debug, Clone, PartialEq)]
enum DetectionPlan {
    /// VAD succeeded; its segments are the result.
    Vad(Vec<SpeechSegment>),
    /// VAD failed; run the legacy detector with these parameters.
    Legacy(AnalysisParams),
}

/// Decide how a request proceeds once the VAD attempt has resolved.
///
/// A VAD failure is consumed here, not propagated: the request degrades
/// to the legacy detector with a noise threshold derived from
/// `volume_threshold`.
fn plan_after_vad(
    vad: MediaResult<Vec<SpeechSegment>>,
    params: &AnalysisParams,
    job_id: Uuid,
) -> DetectionPlan {
    match vad {
        Ok(segments) => DetectionPlan::Vad(segments),
        Err(error) => {
            warn!(%job_id, %error, "VAD pipeline failed, degrading to legacy detector");
            counter!("audio_detection_fallbacks_total").increment(1);
            DetectionPlan::Legacy(derived_legacy_params(params))
        }
    }
}

/// Legacy parameters with the noise threshold derived from the 0-100
/// volume threshold.
fn derived_legacy_params(params: &AnalysisParams) -> AnalysisParams {
    let mut legacy_params = params.clone();
    legacy_params.noise_threshold = params.derived_noise_threshold();
    legacy_params
}

/// Run the full VAD pipeline against a local file.
async fn run_vad(
    input: &std::path::Path,
    params: &AnalysisParams,
) -> MediaResult<Vec<SpeechSegment>> {
    let signal = load_mono_samples(input, Some(VAD_SAMPLE_RATE)).await?;
    segment_samples(&signal.samples, signal.sample_rate, params)
}

/// The VAD pipeline on an in-memory signal.
///
/// Profile -> adaptive threshold -> smoothing -> extraction ->
/// padding/merge -> confidence. Pure apart from allocation, which is
/// what makes the pipeline testable without FFmpeg.
pub fn segment_samples(
    samples: &[f32],
    sample_rate: u32,
    params: &AnalysisParams,
) -> MediaResult<Vec<SpeechSegment>> {
    let total_duration = samples.len() as f64 / sample_rate as f64;

    let profile = compute_energy_profile(samples, sample_rate, params.frame_duration_ms);
    let threshold_db = adaptive_threshold_db(&profile.db, params.volume_threshold);
    let flags = classify_speech(&profile.db, threshold_db);

    let min_frames =
        (params.min_speech_duration * sample_rate as f64 / profile.hop as f64).round() as usize;
    let smoothed = smooth_flags(&flags, min_frames);

    let mut segments = extract_segments(&smoothed, &profile.times, params.min_speech_duration);
    pad_segments(
        &mut segments,
        params.speech_padding_ms as f64 / 1000.0,
        total_duration,
    );
    let merged = merge_segments(segments, params.silence_padding_ms as f64 / 1000.0);

    debug!(
        frames = profile.len(),
        threshold_db,
        segments = merged.len(),
        "VAD pipeline produced segments"
    );

    Ok(merged
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let confidence = score_segment(samples, sample_rate, segment.start, segment.end);
            SpeechSegment::new(i + 1, segment.start, segment.end, confidence)
        })
        .collect())
}
