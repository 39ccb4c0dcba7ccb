//! Audio signal loading.
//!
//! Decodes any FFmpeg-readable input into mono f32 PCM, resampled to
//! the requested analysis rate. The intermediate raw file is a
//! `NamedTempFile`, deleted when it drops on every exit path.

use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::command::create_ffmpeg_command;
use crate::error::{MediaError, MediaResult};
use crate::probe::probe_media;

/// A decoded mono signal with its analysis sample rate.
#[derive(Debug, Clone)]
pub struct AudioSignal {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioSignal {
    /// Total duration in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Decode `input` to mono f32 samples.
///
/// With `sample_rate = Some(rate)` the audio is resampled; with `None`
/// the stream's native rate is probed and preserved (Analyzer path).
/// Fails with a load error when the input is missing, undecodable, or
/// decodes to zero samples.
pub async fn load_mono_samples(
    input: &Path,
    sample_rate: Option<u32>,
) -> MediaResult<AudioSignal> {
    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    let rate = match sample_rate {
        Some(rate) => rate,
        None => probe_media(input).await?.sample_rate,
    };

    let raw = NamedTempFile::new()?;
    extract_raw_pcm(input, raw.path(), rate).await?;

    let samples = read_f32le_samples(raw.path()).await?;
    if samples.is_empty() {
        return Err(MediaError::NoAudioData);
    }

    debug!(
        input = %input.display(),
        samples = samples.len(),
        sample_rate = rate,
        "Loaded audio signal"
    );

    Ok(AudioSignal {
        samples,
        sample_rate: rate,
    })
}

/// Decode to raw mono f32le PCM at the given rate via FFmpeg.
async fn extract_raw_pcm(input: &Path, output: &Path, sample_rate: u32) -> MediaResult<()> {
    let output_result = create_ffmpeg_command()?
        .args([
            "-i",
            input.to_str().unwrap_or_default(),
            "-vn", // No video
            "-ar",
            &sample_rate.to_string(),
            "-ac",
            "1", // Mono
            "-f",
            "f32le", // Raw 32-bit float little-endian
            output.to_str().unwrap_or_default(),
        ])
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::piped())
        .output()
        .await
        .map_err(|e| MediaError::load_failed(e.to_string()))?;

    if !output_result.status.success() {
        return Err(MediaError::LoadFailed {
            message: format!(
                "FFmpeg decode exited with code {:?}",
                output_result.status.code()
            ),
            stderr: Some(String::from_utf8_lossy(&output_result.stderr).to_string()),
        });
    }

    let metadata = tokio::fs::metadata(output).await?;
    if metadata.len() == 0 {
        return Err(MediaError::NoAudioData);
    }

    Ok(())
}

/// Read raw f32le samples from a file.
async fn read_f32le_samples(path: &Path) -> MediaResult<Vec<f32>> {
    let bytes = tokio::fs::read(path).await?;

    let samples: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_samples_empty_file() {
        let temp = NamedTempFile::new().unwrap();
        let samples = read_f32le_samples(temp.path()).await.unwrap();
        assert!(samples.is_empty());
    }

    #[tokio::test]
    async fn test_read_samples_with_data() {
        let temp = NamedTempFile::new().unwrap();

        let test_samples: Vec<f32> = vec![0.0, 0.5, 1.0, -1.0];
        let bytes: Vec<u8> = test_samples.iter().flat_map(|f| f.to_le_bytes()).collect();
        tokio::fs::write(temp.path(), &bytes).await.unwrap();

        let loaded = read_f32le_samples(temp.path()).await.unwrap();
        assert_eq!(loaded.len(), 4);
        assert!((loaded[0] - 0.0).abs() < 0.001);
        assert!((loaded[1] - 0.5).abs() < 0.001);
        assert!((loaded[2] - 1.0).abs() < 0.001);
        assert!((loaded[3] - (-1.0)).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_load_missing_input() {
        let result = load_mono_samples(Path::new("/nonexistent/a.wav"), Some(16000)).await;
        assert!(matches!(result, Err(MediaError::FileNotFound(_))));
    }

    #[test]
    fn test_signal_duration() {
        let signal = AudioSignal {
            samples: vec![0.0; 32000],
            sample_rate: 16000,
        };
        assert!((signal.duration() - 2.0).abs() < 1e-9);
    }
}
