mod file_config;

pub use file_config::FileConfig;

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub port: u16,
    pub public_url: Option<String>,
    pub tc_api_base_url: Option<String>,
    pub auth_server_url: Option<String>,
    pub logging_level: RequestsLoggingLevel,
    pub request_timeout_sec: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub public_url: String,
    pub tc_api_base_url: String,
    pub auth_server_url: String,
    pub logging_level: RequestsLoggingLevel,
    pub request_timeout_sec: u64,
}

pub const DEFAULT_TC_API_BASE_URL: &str = "https://myacademy.trainercentral.in";
pub const DEFAULT_AUTH_SERVER_URL: &str = "https://accounts.zoho.in";

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let port = file.port.unwrap_or(cli.port);

        let public_url = file
            .public_url
            .or_else(|| cli.public_url.clone())
            .unwrap_or_else(|| format!("http://localhost:{}", port));

        let tc_api_base_url = file
            .tc_api_base_url
            .or_else(|| cli.tc_api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_TC_API_BASE_URL.to_string());

        let auth_server_url = file
            .auth_server_url
            .or_else(|| cli.auth_server_url.clone())
            .unwrap_or_else(|| DEFAULT_AUTH_SERVER_URL.to_string());

        for (name, url) in [
            ("public_url", &public_url),
            ("tc_api_base_url", &tc_api_base_url),
            ("auth_server_url", &auth_server_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                bail!("{} must be an http(s) URL, got: {}", name, url);
            }
            if url.ends_with('/') {
                bail!("{} must not have a trailing slash: {}", name, url);
            }
        }

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let request_timeout_sec = file.request_timeout_sec.unwrap_or(cli.request_timeout_sec);
        if request_timeout_sec == 0 {
            bail!("request_timeout_sec must be greater than zero");
        }

        Ok(Self {
            port,
            public_url,
            tc_api_base_url,
            auth_server_url,
            logging_level,
            request_timeout_sec,
        })
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
