//! Command-line and environment configuration
//!
//! The server has no config file. Logging is the only tunable; each flag can
//! also be supplied through an environment variable so MCP client configs
//! that cannot pass arguments still work.

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Default tracing filter when neither `RUST_LOG` nor `--log-level` is given
pub const DEFAULT_LOG_FILTER: &str = "qrcode_mcp=info";

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// qrcode-mcp: MCP server that generates QR code images over stdio
#[derive(Debug, Clone, Parser)]
#[command(name = "qrcode-mcp", version, about)]
pub struct ServerConfig {
    /// Tracing filter directive, used when RUST_LOG is unset
    #[arg(long, env = "QRCODE_MCP_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_level: String,

    /// Log output format (logs always go to stderr)
    #[arg(long, env = "QRCODE_MCP_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Builds the tracing filter: `RUST_LOG` wins, then `--log-level`
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level:  DEFAULT_LOG_FILTER.to_string(),
            log_format: LogFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["qrcode-mcp"]).unwrap();

        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.log_level, ServerConfig::default().log_level);
    }

    #[test]
    fn test_flags() {
        let config = ServerConfig::try_parse_from([
            "qrcode-mcp",
            "--log-level",
            "qrcode_mcp=debug",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(config.log_level, "qrcode_mcp=debug");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_rejects_unknown_format() {
        let result = ServerConfig::try_parse_from(["qrcode-mcp", "--log-format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_command_is_consistent() {
        use clap::CommandFactory;
        ServerConfig::command().debug_assert();
    }
}
