//! Voicepost CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use voicepost::cli::{
    app::{
        build_record_options, load_merged_config, run_playback_url, run_quick_reply,
        run_translate, EXIT_ERROR, EXIT_USAGE_ERROR,
    },
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    run_record,
};
use voicepost::domain::config::AppConfig;
use voicepost::infrastructure::XdgConfigStore;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Build CLI config from global args
    let mut cli_config = AppConfig {
        server_url: cli.server.clone(),
        notify: if cli.notify { Some(true) } else { None },
        ..Default::default()
    };

    match cli.command {
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Commands::Record {
            channel,
            root,
            no_input,
            tick_interval_ms,
        } => {
            cli_config.channel_id = channel;
            cli_config.tick_interval_ms = tick_interval_ms;
            let config = load_merged_config(cli_config).await;

            match build_record_options(&config, root, !no_input) {
                Ok(options) => run_record(options).await,
                Err(e) => {
                    presenter.error(&e.to_string());
                    ExitCode::from(EXIT_USAGE_ERROR)
                }
            }
        }
        Commands::Translate { from, to, text } => {
            let config = load_merged_config(cli_config).await;
            run_translate(&config, &text, &from, &to).await
        }
        Commands::QuickReply {
            post_id,
            channel_id,
        } => {
            let config = load_merged_config(cli_config).await;
            run_quick_reply(&config, &post_id, &channel_id).await
        }
        Commands::PlaybackUrl {
            post_id,
            user_id,
            json,
        } => {
            let config = load_merged_config(cli_config).await;
            run_playback_url(&config, &post_id, &user_id, json)
        }
    }
}
