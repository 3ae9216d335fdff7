//! Command sources for a recording: stdin keys and OS signals

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

/// Commands driving one recording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSignal {
    /// Stop and post the recording
    Send,
    /// Stop and discard the recording
    Cancel,
    /// Tear everything down (SIGINT/SIGTERM or `q`)
    Quit,
}

impl RecordSignal {
    /// Parse one line typed on stdin
    pub fn from_input(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "" | "s" | "send" => Some(Self::Send),
            "c" | "cancel" => Some(Self::Cancel),
            "q" | "quit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Record signal handler
///
/// Merges OS signals and, when interactive, commands typed on stdin into
/// one channel the record loop waits on.
pub struct RecordSignalHandler {
    receiver: mpsc::Receiver<RecordSignal>,
}

impl RecordSignalHandler {
    /// Start listening. Interactive mode reads stdin and treats SIGINT as quit;
    /// otherwise SIGINT sends.
    pub async fn new(interactive: bool) -> Result<Self, std::io::Error> {
        let (tx, rx) = mpsc::channel(10);

        let on_interrupt = if interactive {
            RecordSignal::Quit
        } else {
            RecordSignal::Send
        };
        let tx_int = tx.clone();
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                eprintln!();
                if tx_int.send(on_interrupt).await.is_err() {
                    break;
                }
            }
        });

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let tx_term = tx.clone();
            let mut sigterm = signal(SignalKind::terminate())?;
            tokio::spawn(async move {
                sigterm.recv().await;
                eprintln!("{} Received SIGTERM (discarding)", "↓".cyan());
                let _ = tx_term.send(RecordSignal::Quit).await;
            });
        }

        if interactive {
            tokio::spawn(async move {
                let mut lines = BufReader::new(tokio::io::stdin()).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    match RecordSignal::from_input(&line) {
                        Some(signal) => {
                            if tx.send(signal).await.is_err() {
                                break;
                            }
                        }
                        None => debug!(input = %line, "ignoring unknown command"),
                    }
                }
                debug!("stdin closed");
            });
        }

        Ok(Self { receiver: rx })
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> Option<RecordSignal> {
        self.receiver.recv().await
    }
}
