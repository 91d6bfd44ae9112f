//! Server configuration
//!
//! Values are layered: built-in defaults, then an optional config file
//! (`AAROGYA_CONFIG_FILE`, default `aarogya.{toml,yaml,json}`), then
//! `AAROGYA__SECTION__KEY` environment variables. A `.env` file is honored.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

const ENV_PREFIX: &str = "AAROGYA";
const CONFIG_FILE_ENV: &str = "AAROGYA_CONFIG_FILE";
const DEFAULT_CONFIG_FILE: &str = "aarogya";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub catalog: CatalogConfig,
    pub search: SearchConfig,
    pub integrations: IntegrationsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub max_request_body_size: usize,
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["http://localhost:3000".to_string()],
            max_request_body_size: 1024 * 1024,
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    pub file_enabled: bool,
    pub file_directory: String,
    pub file_prefix: String,
    /// daily | hourly | minutely | never
    pub file_rotation: String,
    pub opentelemetry_enabled: bool,
    pub otlp_endpoint: String,
    pub otlp_timeout_seconds: u64,
    pub trace_sample_ratio: f64,
    pub service_name: String,
    pub service_version: Option<String>,
    pub deployment_environment: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_enabled: false,
            file_directory: "logs".to_string(),
            file_prefix: "aarogya".to_string(),
            file_rotation: "daily".to_string(),
            opentelemetry_enabled: false,
            otlp_endpoint: "http://localhost:4317".to_string(),
            otlp_timeout_seconds: 10,
            trace_sample_ratio: 1.0,
            service_name: "aarogya-server".to_string(),
            service_version: None,
            deployment_environment: "development".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// When disabled, no bearer tokens are checked and handlers see no principal.
    pub enabled: bool,
    pub oidc: OidcConfig,
}

impl AuthConfig {
    /// Firebase Authentication ID tokens: RS256 JWTs issued by Google's
    /// secure-token service for a single project.
    pub fn firebase(project_id: &str) -> Self {
        Self {
            enabled: true,
            oidc: OidcConfig {
                issuer_url: Some(format!("https://securetoken.google.com/{project_id}")),
                audience: Some(project_id.to_string()),
                jwks_url: Some(
                    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com"
                        .to_string(),
                ),
                ..OidcConfig::default()
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OidcConfig {
    pub issuer_url: Option<String>,
    pub audience: Option<String>,
    /// Skips discovery when set.
    pub jwks_url: Option<String>,
    pub jwks_cache_ttl_seconds: u64,
    pub http_timeout_seconds: u64,
}

impl Default for OidcConfig {
    fn default() -> Self {
        Self {
            issuer_url: None,
            audience: None,
            jwks_url: None,
            jwks_cache_ttl_seconds: 3600,
            http_timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON catalog snapshot replacing the built-in seed data.
    pub snapshot_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_radius_km: f64,
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_radius_km: aarogya_geo::DEFAULT_RADIUS_KM,
            default_limit: 20,
            max_limit: 100,
        }
    }
}

impl SearchConfig {
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .min(self.max_limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationsConfig {
    pub http_timeout_seconds: u64,
    pub openfda_base_url: String,
    pub rxnorm_base_url: String,
    pub who_base_url: String,
    pub google_maps_base_url: String,
    pub google_maps_api_key: Option<String>,
    pub tavus: TavusConfig,
}

impl Default for IntegrationsConfig {
    fn default() -> Self {
        Self {
            http_timeout_seconds: 10,
            openfda_base_url: "https://api.fda.gov".to_string(),
            rxnorm_base_url: "https://rxnav.nlm.nih.gov/REST".to_string(),
            who_base_url: "https://apps.who.int/gho/athena/api".to_string(),
            google_maps_base_url: "https://maps.googleapis.com/maps/api".to_string(),
            google_maps_api_key: None,
            tavus: TavusConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TavusConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for TavusConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.tavus.io/v1".to_string(),
            api_key: None,
            timeout_seconds: 30,
        }
    }
}

impl Config {
    /// Load configuration from defaults, optional file and environment.
    pub fn load() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();

        let file = std::env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let settings = config::Config::builder()
            .add_source(config::File::with_name(&file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            )
            .build()?;

        let mut config: Config = settings.try_deserialize()?;
        config.apply_legacy_env();
        Ok(config)
    }

    /// Variables understood by the previous deployment.
    fn apply_legacy_env(&mut self) {
        if self.integrations.google_maps_api_key.is_none() {
            self.integrations.google_maps_api_key = non_empty_env("GOOGLE_MAPS_API_KEY");
        }
        if self.integrations.tavus.api_key.is_none() {
            self.integrations.tavus.api_key = non_empty_env("TAVUS_API_KEY");
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be non-zero".to_string());
        }
        if self.server.request_timeout_seconds == 0 {
            return Err("server.request_timeout_seconds must be non-zero".to_string());
        }

        let radius = self.search.default_radius_km;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(format!(
                "search.default_radius_km must be a positive number, got {radius}"
            ));
        }
        if self.search.default_limit == 0 || self.search.max_limit == 0 {
            return Err("search limits must be non-zero".to_string());
        }
        if self.search.max_limit < self.search.default_limit {
            return Err(format!(
                "search.max_limit ({}) is below search.default_limit ({})",
                self.search.max_limit, self.search.default_limit
            ));
        }

        if !(0.0..=1.0).contains(&self.logging.trace_sample_ratio) {
            return Err("logging.trace_sample_ratio must be within [0, 1]".to_string());
        }
        if !matches!(
            self.logging.file_rotation.as_str(),
            "daily" | "hourly" | "minutely" | "never"
        ) {
            return Err(format!(
                "logging.file_rotation '{}' is not one of daily, hourly, minutely, never",
                self.logging.file_rotation
            ));
        }

        if self.auth.enabled
            && (self.auth.oidc.issuer_url.is_none() || self.auth.oidc.audience.is_none())
        {
            return Err(
                "auth.enabled requires auth.oidc.issuer_url and auth.oidc.audience".to_string(),
            );
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let raw = format!("{}:{}", self.server.host, self.server.port);
        raw.parse()
            .map_err(|e| anyhow::anyhow!("Invalid listen address '{raw}': {e}"))
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.default_radius_km, 10.0);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn rejects_non_positive_default_radius() {
        let mut config = Config::default();
        config.search.default_radius_km = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_max_limit_below_default() {
        let mut config = Config::default();
        config.search.max_limit = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn auth_requires_issuer_and_audience() {
        let mut config = Config::default();
        config.auth.enabled = true;
        assert!(config.validate().is_err());

        config.auth = AuthConfig::firebase("aarogya-ai");
        assert!(config.validate().is_ok());
        assert_eq!(
            config.auth.oidc.issuer_url.as_deref(),
            Some("https://securetoken.google.com/aarogya-ai")
        );
    }

    #[test]
    fn effective_limit_is_capped() {
        let search = SearchConfig::default();
        assert_eq!(search.effective_limit(None), 20);
        assert_eq!(search.effective_limit(Some(3)), 3);
        assert_eq!(search.effective_limit(Some(10_000)), 100);
    }

    #[test]
    fn socket_addr_parses_host_and_port() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 8080;
        assert_eq!(
            config.socket_addr().unwrap(),
            "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
        );
    }
}
