use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// In debug mode nothing is written to the error log file.
    pub debug: bool,
    pub error_log: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let bind = env::var("ENCORE_BIND")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        Self {
            bind,
            debug: env::var("ENCORE_DEBUG")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            error_log: env::var("ENCORE_ERROR_LOG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("error.log")),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
