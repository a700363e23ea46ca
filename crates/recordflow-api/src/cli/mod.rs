//! CLI command definitions for the `recordflow` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod check;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use recordflow_observe::tracing_setup::LogFormat;

/// Bridge record-change webhooks to a workflow engine and write results back.
#[derive(Parser)]
#[command(name = "recordflow", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log line format: pretty or json.
    #[arg(long, global = true, default_value = "pretty", env = "RECORDFLOW_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the webhook server.
    Serve {
        /// Path to the bridge config (.yaml, .yml or .toml).
        #[arg(short, long, env = "RECORDFLOW_CONFIG", default_value = "config.yaml")]
        config: PathBuf,

        /// Address to bind.
        #[arg(long, env = "RECORDFLOW_HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on.
        #[arg(short, long, env = "RECORDFLOW_PORT", default_value_t = 8000)]
        port: u16,
    },

    /// Load and validate a config file, then list its pairs.
    Check {
        /// Path to the bridge config (.yaml, .yml or .toml).
        #[arg(short, long, env = "RECORDFLOW_CONFIG", default_value = "config.yaml")]
        config: PathBuf,
    },
}

impl Cli {
    /// Default log filter derived from the verbosity flags.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_serve_with_defaults() {
        let cli = Cli::try_parse_from(["recordflow", "serve"]).unwrap();
        match &cli.command {
            Commands::Serve { config, host, port } => {
                assert_eq!(*config, PathBuf::from("config.yaml"));
                assert_eq!(host, "0.0.0.0");
                assert_eq!(*port, 8000);
            }
            Commands::Check { .. } => panic!("expected serve"),
        }
        assert_eq!(cli.log_format, LogFormat::Pretty);
        assert_eq!(cli.log_directive(), "info");
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "recordflow", "check", "--config", "bridge.toml", "--json", "-vv", "--log-format", "json",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.log_directive(), "trace");
        assert!(matches!(cli.command, Commands::Check { config } if config == PathBuf::from("bridge.toml")));
    }

    #[test]
    fn quiet_lowers_log_level() {
        let cli = Cli::try_parse_from(["recordflow", "--quiet", "serve"]).unwrap();
        assert_eq!(cli.log_directive(), "error");
    }
}
