//! CLI presenter for output formatting

use std::time::Duration as StdDuration;

use async_trait::async_trait;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::ports::{AlertLevel, NotificationError, Notifier, UserAlert};
use crate::presentation::VoiceActionView;

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.red} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(StdDuration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout (results meant for scripts)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// One-line rendering of the voice action area
    pub fn format_view(&self, view: &VoiceActionView, interactive: bool) -> String {
        if view.sending {
            return "Sending voice message...".to_string();
        }
        let Some(elapsed) = view.elapsed_label() else {
            return if view.trigger_enabled {
                "Ready to record".to_string()
            } else {
                "Recording unavailable".dimmed().to_string()
            };
        };

        let indicator = format!("{} {}", "●".red(), elapsed);
        if !view.controls_enabled() {
            format!("{}  stopping...", indicator)
        } else if interactive {
            format!(
                "{}  {} send  {} cancel  {} quit",
                indicator,
                "[enter]".bold(),
                "[c]".bold(),
                "[q]".bold()
            )
        } else {
            format!("{}  {} send", indicator, "[ctrl+c]".bold())
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints alerts on the terminal and forwards them to a desktop notifier
pub struct TerminalNotifier {
    desktop: Box<dyn Notifier>,
}

impl TerminalNotifier {
    pub fn new(desktop: Box<dyn Notifier>) -> Self {
        Self { desktop }
    }

    fn format_alert(alert: &UserAlert) -> String {
        let marker = match alert.level {
            AlertLevel::Info => "ℹ".cyan(),
            AlertLevel::Warning => "⚠".yellow(),
            AlertLevel::Error => "✗".red(),
        };
        format!("{} {}: {}", marker, alert.title.bold(), alert.message)
    }
}

#[async_trait]
impl Notifier for TerminalNotifier {
    async fn alert(&self, alert: &UserAlert) -> Result<(), NotificationError> {
        eprintln!("{}", Self::format_alert(alert));
        self.desktop.alert(alert).await
    }
}
