//! Artifact location: which product to download and where to put it
//!
//! The remote product name comes from a [`ProductNaming`] strategy. Two are
//! provided:
//!
//! - [`FixedProductName`]: always the same product file
//! - [`TessLightCurveName`]: a TESS light-curve name built from the TIC number
//!   in the identifier
//!
//! Neither strategy reads the lookup payload yet; the locator only requires
//! that one exists.

use crate::config::{DownloadConfig, NamingStrategy};
use crate::error::LocateError;
use crate::types::{ArtifactLocation, Identifier, Resolution};
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Derives a remote product file name for an identifier
pub trait ProductNaming: Send + Sync {
    /// Product file name, or an error if the identifier cannot be mapped
    fn product_name(
        &self,
        identifier: &Identifier,
        resolution: &Resolution,
    ) -> Result<String, LocateError>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

/// Always returns the configured file name
#[derive(Clone, Debug)]
pub struct FixedProductName {
    file_name: String,
}

impl FixedProductName {
    /// Use `file_name` for every identifier
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

impl ProductNaming for FixedProductName {
    fn product_name(&self, _: &Identifier, _: &Resolution) -> Result<String, LocateError> {
        Ok(self.file_name.clone())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Renders `<observation>-s<sector>-<tic>-<camera_ccd>-<suffix>`
///
/// The sector is zero-padded to 4 digits and the TIC number to 16, matching
/// TESS SPOC product names such as
/// `tess2021258175143-s0043-0000000084441541-0214-s_lc.fits`.
#[derive(Clone, Debug)]
pub struct TessLightCurveName {
    observation: String,
    sector: u32,
    camera_ccd: String,
    suffix: String,
}

impl TessLightCurveName {
    /// Build a light-curve naming strategy for one sector
    pub fn new(
        observation: impl Into<String>,
        sector: u32,
        camera_ccd: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            observation: observation.into(),
            sector,
            camera_ccd: camera_ccd.into(),
            suffix: suffix.into(),
        }
    }
}

/// TIC catalog number in identifiers like "TIC 84441541" or "tic84441541"
pub fn tic_number(identifier: &Identifier) -> Option<u64> {
    static TIC: OnceLock<Option<Regex>> = OnceLock::new();
    TIC.get_or_init(|| Regex::new(r"(?i)^\s*TIC[\s_-]*(\d{1,16})\s*$").ok())
        .as_ref()?
        .captures(identifier.as_str())?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

impl ProductNaming for TessLightCurveName {
    fn product_name(
        &self,
        identifier: &Identifier,
        _: &Resolution,
    ) -> Result<String, LocateError> {
        let tic = tic_number(identifier)
            .ok_or_else(|| LocateError::UnrecognizedIdentifier(identifier.to_string()))?;
        Ok(format!(
            "{}-s{:04}-{:016}-{}-{}",
            self.observation, self.sector, tic, self.camera_ccd, self.suffix
        ))
    }

    fn name(&self) -> &'static str {
        "tess_light_curve"
    }
}

/// Instantiate the naming strategy selected in configuration
pub fn naming_for(strategy: &NamingStrategy) -> Box<dyn ProductNaming> {
    match strategy {
        NamingStrategy::Fixed { file_name } => Box::new(FixedProductName::new(file_name)),
        NamingStrategy::TessLightCurve {
            observation,
            sector,
            camera_ccd,
            suffix,
        } => Box::new(TessLightCurveName::new(
            observation,
            *sector,
            camera_ccd,
            suffix,
        )),
    }
}

fn file_stem(identifier: &Identifier) -> String {
    identifier
        .as_str()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect()
}

/// Maps an identifier and its resolution to an [`ArtifactLocation`]
pub struct ArtifactLocator {
    base_url: String,
    output_dir: PathBuf,
    variant: String,
    extension: String,
    naming: Box<dyn ProductNaming>,
}

impl ArtifactLocator {
    /// Build a locator from download settings
    pub fn new(config: &DownloadConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            output_dir: config.output_dir.clone(),
            variant: config.variant.clone(),
            extension: config.extension.clone(),
            naming: naming_for(&config.naming),
        }
    }

    /// Replace the naming strategy
    pub fn with_naming(mut self, naming: Box<dyn ProductNaming>) -> Self {
        self.naming = naming;
        self
    }

    /// Local destination path for `identifier`
    ///
    /// Always a direct child of the output directory: path separators in the
    /// identifier are replaced with `_`.
    pub fn destination(&self, identifier: &Identifier) -> PathBuf {
        self.output_dir.join(format!(
            "{}_{}.{}",
            file_stem(identifier),
            self.variant,
            self.extension
        ))
    }

    /// Derive the artifact location for `identifier`
    ///
    /// Fails when `resolution` is absent or the naming strategy rejects the
    /// identifier. The output directory exists once this returns `Ok`.
    pub async fn locate(
        &self,
        identifier: &Identifier,
        resolution: Option<&Resolution>,
    ) -> Result<ArtifactLocation, LocateError> {
        let resolution = resolution.ok_or(LocateError::MissingResolution)?;
        let file_name = self.naming.product_name(identifier, resolution)?;
        let remote_url = format!("{}/{}", self.base_url.trim_end_matches('/'), file_name);

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| LocateError::OutputDir {
                path: self.output_dir.clone(),
                source,
            })?;

        tracing::debug!(
            identifier = %identifier,
            naming = self.naming.name(),
            url = %remote_url,
            "constructed download URL"
        );

        Ok(ArtifactLocation {
            file_name,
            remote_url,
            destination: self.destination(identifier),
        })
    }
}
