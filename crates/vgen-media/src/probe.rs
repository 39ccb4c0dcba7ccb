//! FFprobe media information.

use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;

use crate::command::create_ffprobe_command;
use crate::error::{MediaError, MediaResult};

/// Audio stream information for an input file.
#[derive(Debug, Clone)]
pub struct MediaInfo {
    /// Duration in seconds
    pub duration: f64,
    /// Native sample rate of the audio stream (Hz)
    pub sample_rate: u32,
    /// Number of audio channels
    pub channels: u32,
    /// Audio codec name
    pub codec: String,
}

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    codec_name: Option<String>,
    sample_rate: Option<String>,
    channels: Option<u32>,
    duration: Option<String>,
}

/// Probe a media file for its audio stream.
///
/// Fails with a load error when the file has no audio stream.
pub async fn probe_media(path: impl AsRef<Path>) -> MediaResult<MediaInfo> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    let output = create_ffprobe_command()?
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::LoadFailed {
            message: "FFprobe failed".to_string(),
            stderr: Some(String::from_utf8_lossy(&output.stderr).to_string()),
        });
    }

    let probe: FfprobeOutput = serde_json::from_slice(&output.stdout)?;

    let audio_stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type == "audio")
        .ok_or(MediaError::NoAudioData)?;

    // Stream duration is more precise when present; fall back to container.
    let duration = audio_stream
        .duration
        .as_ref()
        .or(probe.format.duration.as_ref())
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0);

    let sample_rate = audio_stream
        .sample_rate
        .as_ref()
        .and_then(|r| r.parse::<u32>().ok())
        .unwrap_or(0);

    if sample_rate == 0 {
        return Err(MediaError::load_failed("Audio stream has no sample rate"));
    }

    Ok(MediaInfo {
        duration,
        sample_rate,
        channels: audio_stream.channels.unwrap_or(1),
        codec: audio_stream.codec_name.clone().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probe_missing_file() {
        let result = probe_media("/nonexistent/input.wav").await;
        assert!(matches!(result, Err(MediaError::FileNotFound(_))));
    }
}
