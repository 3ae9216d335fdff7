//! CLI argument definitions using Clap

use std::time::Duration as StdDuration;

use clap::{Parser, Subcommand};

use crate::domain::config::MicrophoneCheck;
use crate::domain::recording::RecorderConfig;
use crate::domain::voice::ChannelTarget;

/// Voicepost - record and send voice messages from the terminal
#[derive(Parser, Debug)]
#[command(name = "voicepost")]
#[command(version)]
#[command(about = "Record voice messages and post them to a Mattermost channel")]
#[command(long_about = None)]
pub struct Cli {
    /// Chat server URL (overrides config and VOICEPOST_SERVER_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// Show desktop notifications for failures
    #[arg(short = 'n', long, global = true)]
    pub notify: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a voice message and post it
    Record {
        /// Channel to post into (defaults to config channel_id)
        #[arg(short = 'c', long, value_name = "ID")]
        channel: Option<String>,

        /// Post as a reply in this thread
        #[arg(short = 'r', long, value_name = "POST_ID")]
        root: Option<String>,

        /// Do not read commands from stdin; Ctrl+C sends, SIGTERM discards
        #[arg(long)]
        no_input: bool,

        /// Interval between elapsed-time updates
        #[arg(long, value_name = "MS")]
        tick_interval_ms: Option<u64>,
    },
    /// Translate message text through the server's translate plugin
    Translate {
        /// Source language code
        #[arg(long, default_value = "auto")]
        from: String,

        /// Target language code
        #[arg(long)]
        to: String,

        /// Text to translate
        text: String,
    },
    /// Forward a post into another channel as a quick reply
    QuickReply {
        /// Post to forward
        post_id: String,

        /// Destination channel
        channel_id: String,
    },
    /// Print the playback URL of a voice post
    PlaybackUrl {
        /// Voice post id
        post_id: String,

        /// Author of the post
        #[arg(long, default_value = "")]
        user_id: String,

        /// Print the full file descriptor as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed options for one recording
#[derive(Debug, Clone)]
pub struct RecordOptions {
    pub server_url: String,
    pub token: Option<String>,
    pub target: ChannelTarget,
    pub recorder: RecorderConfig,
    pub tick_interval: StdDuration,
    pub microphone_check: MicrophoneCheck,
    pub notify: bool,
    /// Read send/cancel/quit commands from stdin
    pub interactive: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "server_url",
    "token",
    "channel_id",
    "tick_interval_ms",
    "notify",
    "microphone_check",
    "recorder.input_format",
    "recorder.input_device",
    "recorder.sample_rate",
    "recorder.channels",
    "recorder.bitrate",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_record_defaults() {
        let cli = Cli::parse_from(["voicepost", "record"]);
        assert!(cli.server.is_none());
        assert!(!cli.notify);
        match cli.command {
            Commands::Record {
                channel,
                root,
                no_input,
                tick_interval_ms,
            } => {
                assert!(channel.is_none());
                assert!(root.is_none());
                assert!(!no_input);
                assert!(tick_interval_ms.is_none());
            }
            other => panic!("expected record, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_record_target() {
        let cli = Cli::parse_from(["voicepost", "record", "-c", "chan", "--root", "p1", "--no-input"]);
        assert!(matches!(
            cli.command,
            Commands::Record { ref channel, ref root, no_input: true, .. }
                if channel.as_deref() == Some("chan") && root.as_deref() == Some("p1")
        ));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["voicepost", "record", "--server", "https://chat", "-n"]);
        assert_eq!(cli.server.as_deref(), Some("https://chat"));
        assert!(cli.notify);
    }

    #[test]
    fn cli_parses_translate() {
        let cli = Cli::parse_from(["voicepost", "translate", "--to", "de", "hello"]);
        match cli.command {
            Commands::Translate { from, to, text } => {
                assert_eq!(from, "auto");
                assert_eq!(to, "de");
                assert_eq!(text, "hello");
            }
            other => panic!("expected translate, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_quick_reply() {
        let cli = Cli::parse_from(["voicepost", "quick-reply", "p1", "c1"]);
        assert!(matches!(
            cli.command,
            Commands::QuickReply { ref post_id, ref channel_id } if post_id == "p1" && channel_id == "c1"
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["voicepost", "config", "set", "channel_id", "chan"]);
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Set { .. }
            }
        ));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["voicepost"]).is_err());
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("server_url"));
        assert!(is_valid_config_key("recorder.bitrate"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
