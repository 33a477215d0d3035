use super::RequestsLoggingLevel;

#[derive(Clone)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    /// Public base URL of this gateway, used in OAuth discovery documents
    /// and in the `www_authenticate` challenge. No trailing slash.
    pub public_url: String,
    /// Base URL of the OAuth authorization server. No trailing slash.
    pub auth_server_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 8000,
            public_url: "http://localhost:8000".to_string(),
            auth_server_url: "https://accounts.zoho.in".to_string(),
        }
    }
}
