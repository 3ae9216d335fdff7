//! Configuration domain module

mod app_config;

pub use app_config::{AppConfig, MicrophoneCheck, RecorderSection};
