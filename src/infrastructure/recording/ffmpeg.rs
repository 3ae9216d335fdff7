//! FFmpeg-based audio recorder adapter

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStdout, Command};
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};

use crate::application::ports::{PlatformRecorder, RecordBackListener, RecorderError};
use crate::domain::recording::RecorderConfig;
use crate::domain::voice::FILE_URI_SCHEME;

type SharedListener = Arc<StdMutex<Option<RecordBackListener>>>;

/// A running FFmpeg capture
struct ActiveCapture {
    child: Child,
    path: PathBuf,
}

/// FFmpeg recorder writing MP3 files to a temp directory
pub struct FfmpegRecorder {
    /// Current FFmpeg process and its output file
    active: Mutex<Option<ActiveCapture>>,
    /// Directory receiving recordings
    output_dir: PathBuf,
    /// Position listener fed from FFmpeg's progress output
    listener: SharedListener,
}

impl FfmpegRecorder {
    /// Create a recorder writing to the system temp directory
    pub fn new() -> Self {
        Self::with_output_dir(std::env::temp_dir())
    }

    /// Create a recorder writing to `dir`
    pub fn with_output_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            active: Mutex::new(None),
            output_dir: dir.into(),
            listener: Arc::new(StdMutex::new(None)),
        }
    }

    fn next_output_path(&self) -> PathBuf {
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.output_dir.join(format!("voicepost-{}.mp3", id))
    }

    /// Build FFmpeg args for recording
    fn build_ffmpeg_args(config: &RecorderConfig, output_path: &Path) -> Vec<String> {
        vec![
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-f".to_string(),
            config.input_format.clone(),
            "-i".to_string(),
            config.input_device.clone(),
            "-ar".to_string(),
            config.sample_rate.to_string(),
            "-ac".to_string(),
            config.channels.to_string(),
            "-c:a".to_string(),
            "libmp3lame".to_string(),
            "-b:a".to_string(),
            config.bitrate.clone(),
            // Machine-readable progress on stdout feeds the record-back listener
            "-progress".to_string(),
            "pipe:1".to_string(),
            "-nostats".to_string(),
            "-y".to_string(),
            output_path.to_string_lossy().to_string(),
        ]
    }

    /// Spawn FFmpeg process
    fn spawn_ffmpeg(args: &[String]) -> Result<Child, RecorderError> {
        Command::new("ffmpeg")
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RecorderError::FfmpegNotFound
                } else {
                    RecorderError::StartFailed(e.to_string())
                }
            })
    }

    /// Position in milliseconds from one `-progress` line.
    /// FFmpeg reports `out_time_us` and, despite its name, `out_time_ms` in microseconds.
    fn parse_progress_line(line: &str) -> Option<u64> {
        let (key, value) = line.trim().split_once('=')?;
        match key {
            "out_time_us" | "out_time_ms" => value.parse::<u64>().ok().map(|us| us / 1000),
            _ => None,
        }
    }

    fn forward_progress(stdout: ChildStdout, listener: SharedListener) {
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                let Some(position_ms) = Self::parse_progress_line(&line) else {
                    continue;
                };
                let current = listener
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .clone();
                if let Some(callback) = current {
                    callback(position_ms);
                }
            }
            trace!("ffmpeg progress stream closed");
        });
    }

    /// Ask FFmpeg to finish the file and exit
    #[cfg(unix)]
    fn request_stop(child: &mut Child) -> Result<(), RecorderError> {
        use nix::sys::signal::{self, Signal};
        use nix::unistd::Pid;

        if let Some(id) = child.id() {
            signal::kill(Pid::from_raw(id as i32), Signal::SIGINT)
                .map_err(|e| RecorderError::StopFailed(format!("Signal failed: {}", e)))?;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn request_stop(child: &mut Child) -> Result<(), RecorderError> {
        child
            .start_kill()
            .map_err(|e| RecorderError::StopFailed(e.to_string()))
    }

    async fn stderr_tail(child: &mut Child) -> String {
        use tokio::io::AsyncReadExt;

        let mut buf = Vec::new();
        if let Some(mut stderr) = child.stderr.take() {
            let _ = stderr.read_to_end(&mut buf).await;
        }
        String::from_utf8_lossy(&buf)
            .lines()
            .last()
            .unwrap_or("unknown error")
            .to_string()
    }

    fn uri_for(path: &Path) -> String {
        format!("{}{}", FILE_URI_SCHEME, path.to_string_lossy())
    }

    fn path_for(uri: &str) -> PathBuf {
        PathBuf::from(uri.strip_prefix(FILE_URI_SCHEME).unwrap_or(uri))
    }
}

impl Default for FfmpegRecorder {
    fn default() -> Self {
        Self::new()
    }
}

/// A capture still running at drop time is killed and its partial file removed
impl Drop for FfmpegRecorder {
    fn drop(&mut self) {
        let Some(mut capture) = self.active.get_mut().take() else {
            return;
        };
        let _ = capture.child.start_kill();
        match std::fs::remove_file(&capture.path) {
            Ok(()) => debug!(path = %capture.path.display(), "removed abandoned recording"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %capture.path.display(),
                error = %e,
                "failed to remove abandoned recording"
            ),
        }
    }
}

#[async_trait]
impl PlatformRecorder for FfmpegRecorder {
    async fn start_recorder(&self, config: &RecorderConfig) -> Result<(), RecorderError> {
        let mut active = self.active.lock().await;
        if active.is_some() {
            return Err(RecorderError::StartFailed(
                "Recording already in progress".to_string(),
            ));
        }

        let path = self.next_output_path();
        let args = Self::build_ffmpeg_args(config, &path);
        debug!(?args, "spawning ffmpeg");
        let mut child = Self::spawn_ffmpeg(&args)?;

        // Bad devices and formats make FFmpeg exit right away
        if let Ok(Some(status)) = child.try_wait() {
            let reason = Self::stderr_tail(&mut child).await;
            return Err(RecorderError::StartFailed(format!(
                "FFmpeg exited with {}: {}",
                status, reason
            )));
        }

        if let Some(stdout) = child.stdout.take() {
            Self::forward_progress(stdout, Arc::clone(&self.listener));
        }

        *active = Some(ActiveCapture { child, path });
        Ok(())
    }

    async fn stop_recorder(&self) -> Result<String, RecorderError> {
        let mut capture = self
            .active
            .lock()
            .await
            .take()
            .ok_or(RecorderError::NotRecording)?;

        Self::request_stop(&mut capture.child)?;

        let status = capture
            .child
            .wait()
            .await
            .map_err(|e| RecorderError::StopFailed(format!("FFmpeg failed: {}", e)))?;
        debug!(%status, path = %capture.path.display(), "ffmpeg exited");

        let size = fs::metadata(&capture.path)
            .await
            .map(|m| m.len())
            .unwrap_or(0);
        if size == 0 {
            let reason = Self::stderr_tail(&mut capture.child).await;
            let _ = fs::remove_file(&capture.path).await;
            return Err(RecorderError::StopFailed(format!(
                "Recording file is empty ({})",
                reason
            )));
        }

        Ok(Self::uri_for(&capture.path))
    }

    fn set_record_back_listener(&self, listener: RecordBackListener) {
        *self.listener.lock().unwrap_or_else(|e| e.into_inner()) = Some(listener);
    }

    fn remove_record_back_listener(&self) {
        *self.listener.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    async fn discard(&self, uri: &str) -> Result<(), RecorderError> {
        let path = Self::path_for(uri);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "recording already gone");
                Ok(())
            }
            Err(e) => Err(RecorderError::DiscardFailed(e.to_string())),
        }
    }
}
