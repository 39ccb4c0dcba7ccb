//! FFmpeg/FFprobe subprocess helpers.

use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{MediaError, MediaResult};

/// Check if FFmpeg is available.
pub fn check_ffmpeg() -> MediaResult<PathBuf> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)
}

/// Check if FFprobe is available.
pub fn check_ffprobe() -> MediaResult<PathBuf> {
    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)
}

/// Create a base FFmpeg command with stdin closed and overwrite enabled.
///
/// Callers append their own input/output arguments.
pub fn create_ffmpeg_command() -> MediaResult<Command> {
    check_ffmpeg()?;
    let mut cmd = Command::new("ffmpeg");
    cmd.arg("-hide_banner").arg("-y").stdin(Stdio::null());
    Ok(cmd)
}

/// Create a base FFprobe command with stdin closed.
pub fn create_ffprobe_command() -> MediaResult<Command> {
    check_ffprobe()?;
    let mut cmd = Command::new("ffprobe");
    cmd.stdin(Stdio::null());
    Ok(cmd)
}
