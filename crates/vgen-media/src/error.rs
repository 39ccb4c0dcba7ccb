//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

use vgen_models::ParamsError;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur during media processing.
///
/// Three classes matter to callers: `Load*` (resource unreadable,
/// empty or corrupt), `Parameter` (rejected before any processing),
/// and `Detection` (internal computation or subprocess failure). VAD
/// `Detection` failures are consumed by the orchestrator's fallback
/// branch; everything else surfaces to the request layer.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFprobe not found in PATH")]
    FfprobeNotFound,

    #[error("Failed to load audio: {message}")]
    LoadFailed {
        message: String,
        stderr: Option<String>,
    },

    #[error("No audio data found in file")]
    NoAudioData,

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Download failed: {message}")]
    DownloadFailed { message: String },

    #[error("Invalid parameters: {0}")]
    Parameter(#[from] ParamsError),

    #[error("Detection failed: {message}")]
    Detection {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl MediaError {
    /// Create a load failure error.
    pub fn load_failed(message: impl Into<String>) -> Self {
        Self::LoadFailed {
            message: message.into(),
            stderr: None,
        }
    }

    /// Create a detection failure error.
    pub fn detection_failed(message: impl Into<String>) -> Self {
        Self::Detection {
            message: message.into(),
            stderr: None,
            exit_code: None,
        }
    }

    /// Create a detection failure carrying subprocess context.
    pub fn subprocess_failed(
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::Detection {
            message: message.into(),
            stderr,
            exit_code,
        }
    }

    /// Create a download failure error.
    pub fn download_failed(message: impl Into<String>) -> Self {
        Self::DownloadFailed {
            message: message.into(),
        }
    }

    /// True for failures of the load stage (empty, corrupt, unreadable).
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::LoadFailed { .. } | Self::NoAudioData | Self::FileNotFound(_)
        )
    }
}
