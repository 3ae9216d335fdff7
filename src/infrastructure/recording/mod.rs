//! Recording infrastructure module
//!
//! Captures microphone audio by driving an FFmpeg process.

mod ffmpeg;

pub use ffmpeg::FfmpegRecorder;
