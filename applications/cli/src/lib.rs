//! Lollypop CLI Library
//!
//! Headless front end for the playback sequencer: builds a library in
//! `SQLite`, stores playback settings and prints what the sequencer would
//! play.
//!
//! This library exposes the command implementations for testing purposes.

pub mod commands;
pub mod config;
pub mod error;

pub use config::{CliConfig, PlaybackConfig};
pub use error::{CliError, Result};
