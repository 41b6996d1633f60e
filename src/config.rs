//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::{controller::SessionSettings, state::MAX_MINUTES};

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "pomodoro-daemon")]
#[command(about = "A local HTTP daemon running a focus/break interval timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Default focus time in minutes
    #[arg(
        short,
        long,
        default_value = "25",
        value_parser = clap::value_parser!(u64).range(1..=MAX_MINUTES)
    )]
    pub focus: u64,

    /// Default break time in minutes
    #[arg(
        short,
        long = "break",
        default_value = "5",
        value_parser = clap::value_parser!(u64).range(1..=MAX_MINUTES)
    )]
    pub break_minutes: u64,

    /// Default number of pomodoro sessions
    #[arg(
        short,
        long,
        default_value = "4",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub sessions: u64,

    /// Tick period in milliseconds
    #[arg(
        long,
        default_value = "1000",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub tick_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Prompt defaults and tick period for the session controller
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            focus_minutes: self.focus,
            break_minutes: self.break_minutes,
            sessions: self.sessions,
            tick_period: Duration::from_millis(self.tick_ms),
        }
    }
}
