use crate::content::ContentSource;
use crate::report::{ReportBranding, DEFAULT_BRAND};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub sam: SamSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            sam: SamSettings::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Branding, content and lead settings of the calculator.
#[derive(Debug, Clone)]
pub struct SamSettings {
    pub brand: String,
    pub content: ContentSource,
    pub lead_endpoint: Option<String>,
    pub report_dir: Option<PathBuf>,
}

impl SamSettings {
    fn from_env() -> Result<Self, ConfigError> {
        let brand = non_empty_var("SAM_BRAND").unwrap_or_else(|| DEFAULT_BRAND.to_string());

        // a local content directory wins over the remote CMS
        let content = match (non_empty_var("SAM_CONTENT_DIR"), non_empty_var("SAM_CONTENT_URL")) {
            (Some(dir), _) => ContentSource::Directory(PathBuf::from(dir)),
            (None, Some(url)) => ContentSource::Remote(validate_url("SAM_CONTENT_URL", url)?),
            (None, None) => ContentSource::None,
        };

        let lead_endpoint = non_empty_var("SAM_LEAD_ENDPOINT")
            .map(|url| validate_url("SAM_LEAD_ENDPOINT", url))
            .transpose()?;

        Ok(Self {
            brand,
            content,
            lead_endpoint,
            report_dir: non_empty_var("SAM_REPORT_DIR").map(PathBuf::from),
        })
    }

    pub fn branding(&self) -> ReportBranding {
        ReportBranding::new(self.brand.clone())
    }
}

impl Default for SamSettings {
    fn default() -> Self {
        Self {
            brand: DEFAULT_BRAND.to_string(),
            content: ContentSource::None,
            lead_endpoint: None,
            report_dir: None,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn validate_url(variable: &'static str, url: String) -> Result<String, ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url)
    } else {
        Err(ConfigError::InvalidUrl { variable, value: url })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidUrl { variable: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidUrl { variable, value } => {
                write!(f, "{variable} must be an http(s) URL, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidUrl { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "SAM_BRAND",
            "SAM_CONTENT_DIR",
            "SAM_CONTENT_URL",
            "SAM_LEAD_ENDPOINT",
            "SAM_REPORT_DIR",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.sam.brand, "Novartum");
        assert_eq!(config.sam.content, ContentSource::None);
        assert!(config.sam.lead_endpoint.is_none());
        assert!(config.sam.report_dir.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn content_directory_takes_precedence_over_url() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SAM_CONTENT_DIR", "/srv/site/public");
        env::set_var("SAM_CONTENT_URL", "https://cms.example.com");
        env::set_var("SAM_BRAND", "Acme");

        let config = AppConfig::load().expect("config loads");

        assert_eq!(
            config.sam.content,
            ContentSource::Directory(PathBuf::from("/srv/site/public"))
        );
        assert_eq!(config.sam.branding().file_name(), "Acme_SAM_Report.pdf");
        reset_env();
    }

    #[test]
    fn rejects_non_http_lead_endpoint() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SAM_LEAD_ENDPOINT", "ftp://forms.example.com");

        match AppConfig::load() {
            Err(ConfigError::InvalidUrl { variable, .. }) => {
                assert_eq!(variable, "SAM_LEAD_ENDPOINT")
            }
            other => panic!("expected invalid url, got {other:?}"),
        }
        reset_env();
    }
}
