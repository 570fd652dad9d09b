//! API configuration loaded from environment variables.
//!
//! Every knob has a development-friendly default; a bare `cargo run` serves
//! the bundled sample sheet on port 3000.

use std::path::PathBuf;
use std::time::Duration;

use genescope_pubmed::MyGeneConfig;

/// Server configuration.
///
/// Environment variables:
/// - `GENESCOPE_BIND`: bind host (default: `0.0.0.0`)
/// - `PORT` / `GENESCOPE_PORT`: bind port (default: `3000`)
/// - `GENESCOPE_DATA_FILE`: expression sheet path (default: `data/expression.csv`)
/// - `GENESCOPE_PAGE_SIZE`: default publications page size (default: `5`)
/// - `GENESCOPE_VOLCANO_TTL_SECS`: volcano cache TTL (default: `3600`)
/// - `GENESCOPE_GENE_TTL_SECS`: per-gene view cache TTL (default: `3600`)
/// - `GENESCOPE_PUBLICATION_TTL_SECS`: publication page cache TTL (default: `86400`)
/// - `GENESCOPE_FETCH_TIMEOUT_SECS`: whole-page publication deadline (default: `100`)
/// - `GENESCOPE_REQUEST_TIMEOUT_SECS`: per-HTTP-request timeout (default: `15`)
/// - `GENESCOPE_MYGENE_URL` / `GENESCOPE_EUTILS_URL`: upstream base URLs
/// - `GENESCOPE_CORS_ORIGINS`: comma-separated allowed origins (empty = allow all)
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_host: String,
    pub bind_port: u16,
    pub data_file: PathBuf,
    pub default_page_size: u32,
    pub volcano_ttl: Duration,
    pub gene_ttl: Duration,
    pub publication_ttl: Duration,
    pub fetch_timeout: Duration,
    pub request_timeout: Duration,
    pub mygene_base_url: String,
    pub eutils_base_url: String,
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let upstream = MyGeneConfig::default();
        Self {
            bind_host: "0.0.0.0".to_string(),
            bind_port: 3000,
            data_file: PathBuf::from("data/expression.csv"),
            default_page_size: 5,
            volcano_ttl: Duration::from_secs(3600),
            gene_ttl: Duration::from_secs(3600),
            publication_ttl: Duration::from_secs(86400),
            fetch_timeout: upstream.fetch_timeout,
            request_timeout: upstream.request_timeout,
            mygene_base_url: upstream.mygene_base_url,
            eutils_base_url: upstream.eutils_base_url,
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from the environment, falling back to defaults
    /// for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let cors_origins = std::env::var("GENESCOPE_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            bind_host: env_string("GENESCOPE_BIND", defaults.bind_host),
            bind_port: std::env::var("PORT")
                .ok()
                .or_else(|| std::env::var("GENESCOPE_PORT").ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.bind_port),
            data_file: std::env::var("GENESCOPE_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            default_page_size: env_parse("GENESCOPE_PAGE_SIZE", defaults.default_page_size),
            volcano_ttl: env_secs("GENESCOPE_VOLCANO_TTL_SECS", defaults.volcano_ttl),
            gene_ttl: env_secs("GENESCOPE_GENE_TTL_SECS", defaults.gene_ttl),
            publication_ttl: env_secs("GENESCOPE_PUBLICATION_TTL_SECS", defaults.publication_ttl),
            fetch_timeout: env_secs("GENESCOPE_FETCH_TIMEOUT_SECS", defaults.fetch_timeout),
            request_timeout: env_secs("GENESCOPE_REQUEST_TIMEOUT_SECS", defaults.request_timeout),
            mygene_base_url: env_string("GENESCOPE_MYGENE_URL", defaults.mygene_base_url),
            eutils_base_url: env_string("GENESCOPE_EUTILS_URL", defaults.eutils_base_url),
            cors_origins,
        }
    }

    /// Upstream client configuration derived from this server configuration.
    pub fn publication_config(&self) -> MyGeneConfig {
        MyGeneConfig {
            mygene_base_url: self.mygene_base_url.clone(),
            eutils_base_url: self.eutils_base_url.clone(),
            request_timeout: self.request_timeout,
            fetch_timeout: self.fetch_timeout,
            ..MyGeneConfig::default()
        }
    }
}

fn env_string(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_secs(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}
