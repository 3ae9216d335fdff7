//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, MicrophoneCheck};
use crate::domain::error::ConfigError;
use crate::domain::voice::ChannelTarget;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;
    store.save(&config).await?;

    let shown = if key == "token" {
        mask_token(value)
    } else {
        value.to_string()
    };
    presenter.success(&format!("{} = {}", key, shown));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    let config = store.load().await?;
    presenter.output(&display_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()));
    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;
    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            &display_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()),
        );
    }
    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.into(),
    }
}

/// Validate `value` for `key` and store it in `config`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "server_url" => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(invalid(key, "URL must start with http:// or https://"));
            }
            config.server_url = Some(value.trim_end_matches('/').to_string());
        }
        "token" => config.token = Some(value.to_string()),
        "channel_id" => {
            ChannelTarget::new(value, None).map_err(|e| invalid(key, e.to_string()))?;
            config.channel_id = Some(value.to_string());
        }
        "tick_interval_ms" => {
            let ms = parse_number::<u64>(key, value)?;
            if ms == 0 {
                return Err(invalid(key, "Value must be greater than zero"));
            }
            config.tick_interval_ms = Some(ms);
        }
        "notify" => {
            config.notify =
                Some(parse_bool(value).map_err(|_| invalid(key, "Value must be 'true' or 'false'"))?)
        }
        "microphone_check" => {
            let check: MicrophoneCheck = value.parse().map_err(|e: String| invalid(key, e))?;
            config.microphone_check = Some(check.to_string());
        }
        _ => {
            let mut recorder = config.recorder.clone().unwrap_or_default();
            match key {
                "recorder.input_format" => recorder.input_format = Some(non_empty(key, value)?),
                "recorder.input_device" => recorder.input_device = Some(non_empty(key, value)?),
                "recorder.sample_rate" => {
                    recorder.sample_rate = Some(parse_number::<u32>(key, value)?)
                }
                "recorder.channels" => {
                    let channels = parse_number::<u16>(key, value)?;
                    if !(1..=2).contains(&channels) {
                        return Err(invalid(key, "Value must be 1 or 2"));
                    }
                    recorder.channels = Some(channels);
                }
                "recorder.bitrate" => recorder.bitrate = Some(non_empty(key, value)?),
                _ => return check_key(key),
            }
            config.recorder = Some(recorder);
        }
    }
    Ok(())
}

/// Value of `key` as shown to the user; tokens are masked
fn display_value(config: &AppConfig, key: &str) -> Option<String> {
    let recorder = config.recorder.as_ref();
    match key {
        "server_url" => config.server_url.clone(),
        "token" => config.token.as_deref().map(mask_token),
        "channel_id" => config.channel_id.clone(),
        "tick_interval_ms" => config.tick_interval_ms.map(|v| v.to_string()),
        "notify" => config.notify.map(|b| b.to_string()),
        "microphone_check" => config.microphone_check.clone(),
        "recorder.input_format" => recorder.and_then(|r| r.input_format.clone()),
        "recorder.input_device" => recorder.and_then(|r| r.input_device.clone()),
        "recorder.sample_rate" => recorder.and_then(|r| r.sample_rate).map(|v| v.to_string()),
        "recorder.channels" => recorder.and_then(|r| r.channels).map(|v| v.to_string()),
        "recorder.bitrate" => recorder.and_then(|r| r.bitrate.clone()),
        _ => None,
    }
}

fn non_empty(key: &str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid(key, "Value must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(key, format!("'{}' is not a valid number", value)))
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

/// Mask a token for display (show first 4 and last 4 chars)
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
