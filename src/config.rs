//! Configuration types for star-fetch

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name lookup service settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Lookup endpoint (default: MAST `invoke`)
    #[serde(default = "default_lookup_url")]
    pub base_url: String,

    /// Service named in the request payload (default: "Mast.Name.Lookup")
    #[serde(default = "default_lookup_service")]
    pub service: String,

    /// Response format requested from the service (default: "json")
    #[serde(default = "default_lookup_format")]
    pub format: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: default_lookup_url(),
            service: default_lookup_service(),
            format: default_lookup_format(),
        }
    }
}

/// How the remote product file name is derived
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum NamingStrategy {
    /// Always download the same product file
    Fixed {
        /// Product file name appended to the download base URL
        file_name: String,
    },
    /// Render a TESS light-curve product name from the TIC number in the identifier
    TessLightCurve {
        /// Observation timestamp prefix (e.g. "tess2021258175143")
        observation: String,
        /// TESS sector
        sector: u32,
        /// Camera/CCD fragment (e.g. "0214")
        camera_ccd: String,
        /// Trailing product suffix (e.g. "s_lc.fits")
        suffix: String,
    },
}

impl Default for NamingStrategy {
    fn default() -> Self {
        NamingStrategy::Fixed {
            file_name: DEFAULT_PRODUCT_FILE.to_string(),
        }
    }
}

/// Product download and local storage settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Base path the product file name is appended to
    #[serde(default = "default_download_url")]
    pub base_url: String,

    /// Local output directory (default: "data/raw")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Tag between identifier and extension in local file names (default: "cpp")
    #[serde(default = "default_variant")]
    pub variant: String,

    /// Local file extension (default: "fits")
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Product naming strategy
    #[serde(default)]
    pub naming: NamingStrategy,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            base_url: default_download_url(),
            output_dir: default_output_dir(),
            variant: default_variant(),
            extension: default_extension(),
            naming: NamingStrategy::default(),
        }
    }
}

/// TIC catalog query settings used to build identifier lists
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog service named in the request payload
    #[serde(default = "default_catalog_service")]
    pub service: String,

    /// Brightest TESS magnitude to include (default: 0.0)
    #[serde(default)]
    pub min_magnitude: f64,

    /// Faintest TESS magnitude to include (default: 6.0)
    #[serde(default = "default_max_magnitude")]
    pub max_magnitude: f64,

    /// Maximum number of identifiers to request and write (default: 2000)
    #[serde(default = "default_catalog_limit")]
    pub limit: usize,

    /// Identifier list path (default: "inputs/star_ids.txt")
    #[serde(default = "default_identifier_list")]
    pub output_path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            service: default_catalog_service(),
            min_magnitude: 0.0,
            max_magnitude: default_max_magnitude(),
            limit: default_catalog_limit(),
            output_path: default_identifier_list(),
        }
    }
}

/// Main configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Name lookup service
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Product download and storage
    #[serde(default)]
    pub download: DownloadConfig,

    /// TIC catalog queries
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Diagnostics log path (default: "data/logs/single_star_rs.log")
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,

    /// Whole-request timeout (default: 300 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// Connection timeout (default: 30 seconds)
    #[serde(default = "default_connect_timeout", with = "duration_serde")]
    pub connect_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookup: LookupConfig::default(),
            download: DownloadConfig::default(),
            catalog: CatalogConfig::default(),
            log_path: default_log_path(),
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl Config {
    /// Load a JSON configuration file; missing fields take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Check that URLs parse and required fields are set
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.lookup.base_url).map_err(|e| {
            Error::config(format!("invalid lookup URL: {e}"), "lookup.base_url")
        })?;
        url::Url::parse(&self.download.base_url).map_err(|e| {
            Error::config(format!("invalid download URL: {e}"), "download.base_url")
        })?;

        if self.download.variant.trim().is_empty() {
            return Err(Error::config("variant must not be empty", "download.variant"));
        }
        if self.download.extension.trim().is_empty() {
            return Err(Error::config(
                "extension must not be empty",
                "download.extension",
            ));
        }
        if let NamingStrategy::Fixed { file_name } = &self.download.naming
            && file_name.trim().is_empty()
        {
            return Err(Error::config(
                "fixed product file name must not be empty",
                "download.naming.file_name",
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(Error::config(
                "request timeout must be non-zero",
                "request_timeout",
            ));
        }
        if self.connect_timeout.is_zero() {
            return Err(Error::config(
                "connect timeout must be non-zero",
                "connect_timeout",
            ));
        }
        if self.catalog.min_magnitude > self.catalog.max_magnitude {
            return Err(Error::config(
                "min_magnitude must not exceed max_magnitude",
                "catalog.min_magnitude",
            ));
        }
        Ok(())
    }
}

/// Product downloaded when no naming strategy is configured
pub const DEFAULT_PRODUCT_FILE: &str = "tess2021258175143-s0043-0000000084441541-0214-s_lc.fits";

fn default_lookup_url() -> String {
    "https://mast.stsci.edu/api/v0/invoke".to_string()
}

fn default_lookup_service() -> String {
    "Mast.Name.Lookup".to_string()
}

fn default_lookup_format() -> String {
    "json".to_string()
}

fn default_download_url() -> String {
    "https://mast.stsci.edu/api/v0.1/Download/file?uri=mast:TESS/product".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/raw")
}

fn default_variant() -> String {
    "cpp".to_string()
}

fn default_extension() -> String {
    "fits".to_string()
}

fn default_catalog_service() -> String {
    "Mast.Catalogs.Filtered.Tic".to_string()
}

fn default_max_magnitude() -> f64 {
    6.0
}

fn default_catalog_limit() -> usize {
    2000
}

fn default_identifier_list() -> PathBuf {
    PathBuf::from("inputs/star_ids.txt")
}

fn default_log_path() -> PathBuf {
    PathBuf::from("data/logs/single_star_rs.log")
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(300) // 5 minutes
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(30)
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
