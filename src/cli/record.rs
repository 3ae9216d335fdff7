//! Record command runner
//!
//! Drives one recording controller from stdin/OS signals and renders its
//! state on a spinner line until the recording is sent, cancelled or
//! torn down.

use std::process::ExitCode;

use tracing::debug;

use crate::application::{
    ControllerConfig, RecordingController, StopOutcome, UploadPostPipeline,
};
use crate::infrastructure::{
    create_notifier, create_permission_gate, FfmpegRecorder, MattermostClient, UuidIdGenerator,
};
use crate::presentation::{Decision, DecisionLatch, ViewFeed};

use super::app::{EXIT_ERROR, EXIT_SUCCESS};
use super::args::RecordOptions;
use super::presenter::{Presenter, TerminalNotifier};
use super::signals::{RecordSignal, RecordSignalHandler};

/// Record once and post (or discard) the result
pub async fn run_record(options: RecordOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    let mut signals = match RecordSignalHandler::new(options.interactive).await {
        Ok(handler) => handler,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let client = MattermostClient::new(options.server_url.clone(), options.token.clone());
    let controller = RecordingController::new(
        create_permission_gate(options.microphone_check),
        FfmpegRecorder::new(),
        UuidIdGenerator,
        TerminalNotifier::new(create_notifier(options.notify)),
        UploadPostPipeline::new(client.clone(), client),
        ControllerConfig {
            target: options.target.clone(),
            recorder: options.recorder.clone(),
            tick_interval: options.tick_interval,
        },
    );

    let mut feed = ViewFeed::new(controller.subscribe());
    let mut latch = DecisionLatch::new();

    // Failures were already shown by the notifier
    if controller.start().await.is_err() {
        return ExitCode::from(EXIT_ERROR);
    }
    latch.arm();
    presenter.start_spinner(&presenter.format_view(&feed.current(), options.interactive));

    let decision = loop {
        tokio::select! {
            view = feed.next() => match view {
                Some(view) => presenter.update_spinner(&presenter.format_view(&view, options.interactive)),
                None => break None,
            },
            signal = signals.recv() => match signal {
                Some(RecordSignal::Send) if latch.try_take(Decision::Send) => break Some(Decision::Send),
                Some(RecordSignal::Cancel) if latch.try_take(Decision::Cancel) => break Some(Decision::Cancel),
                Some(RecordSignal::Quit) | None => break None,
                Some(other) => debug!(?other, "decision already taken"),
            },
        }
    };

    let code = match decision {
        Some(Decision::Send) => {
            presenter.update_spinner("Sending voice message...");
            match controller.send().await {
                Ok(StopOutcome::Sent(post)) => {
                    presenter.spinner_success(&format!("Voice message sent ({})", post.duration));
                    presenter.output(&post.file_id);
                    EXIT_SUCCESS
                }
                Ok(_) => {
                    presenter.stop_spinner();
                    presenter.warn("Nothing was recorded");
                    EXIT_ERROR
                }
                Err(_) => {
                    presenter.stop_spinner();
                    EXIT_ERROR
                }
            }
        }
        Some(Decision::Cancel) => match controller.cancel().await {
            Ok(_) => {
                presenter.spinner_success("Recording discarded");
                EXIT_SUCCESS
            }
            Err(_) => {
                presenter.stop_spinner();
                EXIT_ERROR
            }
        },
        None => {
            latch.disarm();
            controller.teardown().await;
            presenter.stop_spinner();
            presenter.warn("Recording aborted");
            EXIT_ERROR
        }
    };

    ExitCode::from(code)
}
