//! Legacy silence detection via FFmpeg's `silencedetect` filter.
//!
//! The filter always runs over the whole file; time-bounded invocation
//! interacts badly with the filter's internal state, so any requested
//! range is applied as a post-filter on the parsed intervals instead.
//!
//! Parsing is isolated in [`parse_silence_markers`]: the diagnostic
//! text format is owned by FFmpeg, and nothing outside this function
//! may depend on its shape.

use std::path::Path;

use tracing::debug;

use vgen_models::{AnalysisParams, SilenceInterval};

use crate::command::create_ffmpeg_command;
use crate::error::{MediaError, MediaResult};

/// Minimum silence duration the filter reports, pinned so the parse
/// contract does not depend on FFmpeg's default.
const MIN_SILENCE_SECS: f64 = 0.5;

/// A parsed `(start, end, duration)` triple in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilenceTriple {
    pub start: f64,
    pub end: f64,
    pub duration: f64,
}

/// Detect silence intervals with the legacy method.
///
/// Runs `silencedetect` with `params.noise_threshold` (and `mono`
/// downmix when requested), parses the diagnostic stream, applies the
/// `start_time`/`end_time` post-filter and formats the survivors.
pub async fn detect_silence_legacy(
    input: &Path,
    params: &AnalysisParams,
) -> MediaResult<Vec<SilenceInterval>> {
    params.validate()?;

    let stderr = run_silencedetect(input, &params.noise_threshold, params.mono).await?;
    let triples = parse_silence_markers(&stderr);
    let filtered = filter_by_range(triples, params.start_seconds(), params.end_seconds());

    debug!(
        input = %input.display(),
        noise = %params.noise_threshold,
        intervals = filtered.len(),
        "Legacy silence detection complete"
    );

    Ok(filtered
        .into_iter()
        .map(|t| SilenceInterval::new(t.start, t.end, t.duration))
        .collect())
}

/// Run the filter over the whole file and capture its diagnostic text.
async fn run_silencedetect(input: &Path, noise: &str, mono: bool) -> MediaResult<String> {
    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    let mut filter = format!("silencedetect=noise={noise}:d={MIN_SILENCE_SECS}");
    if mono {
        filter.push_str(":mono=1");
    }

    let output = create_ffmpeg_command()?
        .args([
            "-i",
            input.to_str().unwrap_or_default(),
            "-af",
            &filter,
            "-f",
            "null",
            "-",
        ])
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::piped())
        .output()
        .await
        .map_err(|e| MediaError::detection_failed(e.to_string()))?;

    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if !output.status.success() {
        return Err(MediaError::subprocess_failed(
            "silencedetect run failed",
            Some(stderr),
            output.status.code(),
        ));
    }

    Ok(stderr)
}

/// Parse `silence_start` / `silence_end` marker pairs.
///
/// The filter emits lines of the form:
///
/// ```text
/// [silencedetect @ 0x...] silence_start: 1.32
/// [silencedetect @ 0x...] silence_end: 2.5 | silence_duration: 1.18
/// ```
///
/// An end marker with no preceding start means the audio began silent;
/// the start is substituted with 0.
pub fn parse_silence_markers(text: &str) -> Vec<SilenceTriple> {
    let mut triples = Vec::new();
    let mut pending_start: Option<f64> = None;

    for line in text.lines() {
        if let Some(value) = marker_value(line, "silence_start:") {
            pending_start = Some(value);
        } else if let Some(end) = marker_value(line, "silence_end:") {
            let start = pending_start.take().unwrap_or(0.0);
            let duration = marker_value(line, "silence_duration:").unwrap_or(end - start);
            triples.push(SilenceTriple {
                start,
                end,
                duration,
            });
        }
    }

    triples
}

/// Extract the number following `marker` on a line, if present.
fn marker_value(line: &str, marker: &str) -> Option<f64> {
    let idx = line.find(marker)?;
    let rest = line[idx + marker.len()..].trim_start();
    let token = rest
        .split(|c: char| c.is_whitespace() || c == '|')
        .next()?;
    token.parse().ok()
}

/// Drop intervals outside the requested range.
///
/// An interval survives only when it lies inside
/// `[start_seconds, end_seconds]`: one reaching past either bound is
/// dropped. Note the filter operates on *silence* intervals even
/// though callers typically mean the range to bound speech of
/// interest; the behavior is kept as-is.
pub fn filter_by_range(
    triples: Vec<SilenceTriple>,
    start_seconds: f64,
    end_seconds: f64,
) -> Vec<SilenceTriple> {
    triples
        .into_iter()
        .filter(|t| t.start >= start_seconds && t.end <= end_seconds)
        .collect()
}
