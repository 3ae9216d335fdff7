//! Voicepost - voice messages for Mattermost from the terminal
//!
//! Records audio from the microphone, uploads it to a Mattermost server and
//! creates a voice post referencing the uploaded file.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Recording session state machine, value objects and errors
//! - **Application**: Recording controller, duration ticker, send pipeline and port traits
//! - **Presentation**: View state derived from controller snapshots
//! - **Infrastructure**: Adapter implementations (FFmpeg, pactl, Mattermost REST, notify-rust)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
