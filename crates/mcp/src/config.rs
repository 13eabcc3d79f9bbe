// Command line / environment configuration

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use moodle_mcp_core::gather::DEFAULT_MAX_IN_FLIGHT;
use moodle_mcp_core::ResolverConfig;
use moodle_sdk::{ClientConfig, RetryConfig};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// MCP server for a Moodle site's web service API
#[derive(Debug, Parser)]
#[command(name = "moodle-mcp", version, about)]
pub struct Cli {
    /// REST endpoint, e.g. https://lms.example.edu/webservice/rest/server.php
    #[arg(long, env = "MOODLE_API_URL")]
    pub api_url: String,

    /// Web service token
    #[arg(long, env = "MOODLE_API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    /// Course used when a tool call names no course
    #[arg(long, env = "MOODLE_COURSE_ID")]
    pub course_id: Option<i64>,

    /// Per-request timeout in seconds
    #[arg(long, env = "MOODLE_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Retries for read calls (grade writes are never retried)
    #[arg(long, env = "MOODLE_MAX_RETRIES", default_value_t = 2)]
    pub max_retries: u32,

    /// Assignments fetched at once when building a submissions report
    #[arg(long, env = "MOODLE_MAX_CONCURRENCY", default_value_t = DEFAULT_MAX_IN_FLIGHT)]
    pub max_concurrency: usize,

    /// Log output format (logs go to stderr)
    #[arg(long, env = "MOODLE_MCP_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Validated settings, built once at startup and handed to constructors.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub client: ClientConfig,
    pub resolver: ResolverConfig,
    pub max_concurrency: usize,
    pub log_format: LogFormat,
}

impl Cli {
    pub fn into_config(self) -> Result<ServerConfig> {
        let base_url = Url::parse(self.api_url.trim())
            .with_context(|| format!("Invalid MOODLE_API_URL: {}", self.api_url))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            bail!("MOODLE_API_URL must be an http(s) URL, got {}", base_url.scheme());
        }

        let token = self.api_token.trim().to_string();
        if token.is_empty() {
            bail!("MOODLE_API_TOKEN must not be empty");
        }
        if self.timeout_secs == 0 {
            bail!("--timeout-secs must be at least 1");
        }
        if self.max_concurrency == 0 {
            bail!("--max-concurrency must be at least 1");
        }

        let client = ClientConfig {
            base_url,
            token,
            timeout: Duration::from_secs(self.timeout_secs),
            retry_config: RetryConfig::with_max_retries(self.max_retries),
        };

        Ok(ServerConfig {
            client,
            resolver: ResolverConfig {
                default_course_id: self.course_id,
                ..Default::default()
            },
            max_concurrency: self.max_concurrency,
            log_format: self.log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://lms.example.edu/webservice/rest/server.php";

    fn parse(extra: &[&str]) -> std::result::Result<Cli, clap::Error> {
        let mut argv = vec!["moodle-mcp", "--api-url", URL, "--api-token", "abc123"];
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap().into_config().unwrap();

        assert_eq!(config.client.base_url.as_str(), URL);
        assert_eq!(config.client.timeout, Duration::from_secs(30));
        assert_eq!(config.client.retry_config.max_retries, 2);
        assert_eq!(config.max_concurrency, 8);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_course_id_parsed_at_startup() {
        let config = parse(&["--course-id", "42"]).unwrap().into_config().unwrap();
        assert_eq!(config.resolver.default_course_id, Some(42));

        assert!(parse(&["--course-id", "forty-two"]).is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cli = Cli::try_parse_from(["moodle-mcp", "--api-url", "not a url", "--api-token", "x"])
            .unwrap();
        assert!(cli.into_config().is_err());

        let cli = Cli::try_parse_from(["moodle-mcp", "--api-url", URL, "--api-token", "  "]).unwrap();
        assert!(cli.into_config().is_err());

        assert!(parse(&["--max-concurrency", "0"]).unwrap().into_config().is_err());
    }

    #[test]
    fn test_json_log_format() {
        let cli = parse(&["--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}
