//! App runners for each subcommand

use std::env;
use std::process::ExitCode;
use std::time::Duration as StdDuration;

use crate::application::ports::{ConfigStore, QuickReply, Translator};
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::voice::{ChannelTarget, VoiceMessageFile};
use crate::infrastructure::{MattermostClient, XdgConfigStore};

use super::args::RecordOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

pub const ENV_SERVER_URL: &str = "VOICEPOST_SERVER_URL";
pub const ENV_TOKEN: &str = "VOICEPOST_TOKEN";

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, path = %store.path().display(), "ignoring config file");
            AppConfig::empty()
        }
    };

    let env_config = AppConfig {
        server_url: env::var(ENV_SERVER_URL).ok().filter(|s| !s.is_empty()),
        token: env::var(ENV_TOKEN).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

/// Server URL from a merged config
pub fn require_server_url(config: &AppConfig) -> Result<String, ConfigError> {
    config
        .server_url
        .clone()
        .filter(|s| !s.trim().is_empty())
        .ok_or(ConfigError::Missing("server_url"))
}

/// Resolve everything a recording needs from a merged config
pub fn build_record_options(
    config: &AppConfig,
    root: Option<String>,
    interactive: bool,
) -> Result<RecordOptions, ConfigError> {
    let server_url = require_server_url(config)?;
    let channel_id = config
        .channel_id
        .clone()
        .ok_or(ConfigError::Missing("channel_id"))?;
    let target = ChannelTarget::new(channel_id, root).map_err(|e| ConfigError::ValidationError {
        key: e.kind.to_string(),
        message: e.to_string(),
    })?;

    Ok(RecordOptions {
        server_url,
        token: config.token.clone(),
        target,
        recorder: config.recorder_config(),
        tick_interval: StdDuration::from_millis(config.tick_interval_or_default()),
        microphone_check: config.microphone_check_or_default(),
        notify: config.notify_or_default(),
        interactive,
    })
}

fn client_for(config: &AppConfig, presenter: &Presenter) -> Option<MattermostClient> {
    match require_server_url(config) {
        Ok(url) => Some(MattermostClient::new(url, config.token.clone())),
        Err(e) => {
            presenter.error(&e.to_string());
            None
        }
    }
}

/// Translate `text` and print the result
pub async fn run_translate(config: &AppConfig, text: &str, from: &str, to: &str) -> ExitCode {
    let presenter = Presenter::new();
    let Some(client) = client_for(config, &presenter) else {
        return ExitCode::from(EXIT_USAGE_ERROR);
    };

    match client.translate(text, from, to).await {
        Ok(translation) => {
            presenter.output(&translation);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Forward a post as a quick reply
pub async fn run_quick_reply(config: &AppConfig, post_id: &str, channel_id: &str) -> ExitCode {
    let presenter = Presenter::new();
    let Some(client) = client_for(config, &presenter) else {
        return ExitCode::from(EXIT_USAGE_ERROR);
    };

    match client.quick_reply(post_id, channel_id).await {
        Ok(status) => {
            presenter.success(&format!("Quick reply sent ({})", status));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Print where a voice post can be streamed from
pub fn run_playback_url(config: &AppConfig, post_id: &str, user_id: &str, json: bool) -> ExitCode {
    let presenter = Presenter::new();
    let server_url = match require_server_url(config) {
        Ok(url) => url,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let file = VoiceMessageFile::for_post(&server_url, post_id, user_id);
    if !json {
        presenter.output(&file.uri);
        return ExitCode::from(EXIT_SUCCESS);
    }

    match serde_json::to_string_pretty(&file) {
        Ok(body) => {
            presenter.output(&body);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}
