//! Configuration and CLI argument handling

use clap::Parser;

use crate::alarm::DEFAULT_ALARM_URL;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "pomodoro-server")]
#[command(about = "A Pomodoro countdown timer served over a small local HTTP API")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Sound the browser plays when a countdown finishes
    #[arg(long, default_value = DEFAULT_ALARM_URL)]
    pub alarm_url: String,

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
}
