//! Server configuration loaded from environment variables.

use std::io;
use std::str::FromStr;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "8080";
const DEFAULT_UI_ORIGINS: &str = "http://127.0.0.1:4200,http://localhost:4200";

/// Listener and CORS settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Origins allowed by CORS.
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Read `VESSELID_HOST`, `VESSELID_PORT` and `VESSELID_UI_ORIGINS`.
    #[cfg_attr(test, allow(dead_code))]
    pub fn from_env() -> io::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> io::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("VESSELID_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port_raw = lookup("VESSELID_PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
        let port = u16::from_str(port_raw.trim()).map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("VESSELID_PORT must be a u16 number, got {port_raw:?}: {err}"),
            )
        })?;
        let origins =
            lookup("VESSELID_UI_ORIGINS").unwrap_or_else(|| DEFAULT_UI_ORIGINS.to_string());
        Ok(Self {
            host,
            port,
            allowed_origins: parse_origins(&origins),
        })
    }

    /// `host:port` for log lines and bind errors.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
