//! Resolve-then-fetch orchestration
//!
//! A fetch walks `Start → Resolving → Locating → Downloading` and ends in
//! `Succeeded` or `Failed`. The first failing stage ends the fetch; nothing is
//! retried. Each call produces exactly one [`FetchOutcome`] and exactly one
//! diagnostics entry:
//!
//! - resolution failures are recorded by the [`MetadataResolver`] itself
//! - every other terminal state is recorded here
//!
//! Only the download transport call is timed. A download that fails half-way
//! leaves whatever was written at the destination. A download that writes
//! zero bytes is a failure.

use crate::config::Config;
use crate::diagnostics::DiagnosticsSink;
use crate::error::{DownloadError, Error, Result};
use crate::locator::ArtifactLocator;
use crate::resolver::MetadataResolver;
use crate::transport::{HttpTransport, Transport};
use crate::types::{
    ArtifactLocation, FetchOutcome, Identifier, REASON_DOWNLOAD, REASON_LOCATE,
    REASON_RESOLUTION, Stage,
};
use std::sync::Arc;
use std::time::Instant;

/// Fetches the data product for one identifier at a time
pub struct Fetcher {
    resolver: MetadataResolver,
    locator: ArtifactLocator,
    transport: Arc<dyn Transport>,
    diagnostics: DiagnosticsSink,
}

impl Fetcher {
    /// Assemble a fetcher from explicit parts
    pub fn new(config: &Config, transport: Arc<dyn Transport>, diagnostics: DiagnosticsSink) -> Self {
        Self {
            resolver: MetadataResolver::new(
                config.lookup.clone(),
                Arc::clone(&transport),
                diagnostics.clone(),
            ),
            locator: ArtifactLocator::new(&config.download),
            transport,
            diagnostics,
        }
    }

    /// Validate `config`, open the diagnostics session, and build the HTTP transport
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let diagnostics = DiagnosticsSink::init(&config.log_path)?;
        let transport = HttpTransport::new(config).map_err(Error::Transport)?;
        Ok(Self::new(config, Arc::new(transport), diagnostics))
    }

    /// Replace the artifact locator (e.g. to plug in another naming strategy)
    pub fn with_locator(mut self, locator: ArtifactLocator) -> Self {
        self.locator = locator;
        self
    }

    /// Diagnostics sink this fetcher writes to
    pub fn diagnostics(&self) -> &DiagnosticsSink {
        &self.diagnostics
    }

    /// Fetch the data product for `identifier`
    ///
    /// Never fails: every stage error is folded into the returned outcome.
    pub async fn fetch(&self, identifier: &Identifier) -> FetchOutcome {
        tracing::info!(identifier = %identifier, "fetching star data");
        transition(identifier, Stage::Start, Stage::Resolving);

        let resolution = match self.resolver.resolve(identifier).await {
            Ok(resolution) => resolution,
            Err(_) => {
                // The resolver has already written the diagnostics entry
                transition(identifier, Stage::Resolving, Stage::Failed);
                return FetchOutcome::failed(identifier.clone(), Stage::Resolving, REASON_RESOLUTION);
            }
        };
        transition(identifier, Stage::Resolving, Stage::Locating);

        let location = match self.locator.locate(identifier, Some(&resolution)).await {
            Ok(location) => location,
            Err(e) => {
                tracing::warn!(identifier = %identifier, error = %e, "artifact location failed");
                self.diagnostics.append(&format!(
                    "Failed to fetch data for {identifier}. Error: {REASON_LOCATE}: {e}"
                ));
                transition(identifier, Stage::Locating, Stage::Failed);
                return FetchOutcome::failed(identifier.clone(), Stage::Locating, REASON_LOCATE);
            }
        };
        transition(identifier, Stage::Locating, Stage::Downloading);

        match self.download(&location).await {
            Ok(elapsed_seconds) => {
                tracing::info!(
                    identifier = %identifier,
                    elapsed_seconds,
                    destination = %location.destination.display(),
                    "star data fetched"
                );
                self.diagnostics.append(&format!(
                    "Successfully fetched data for {identifier} in {elapsed_seconds} seconds"
                ));
                transition(identifier, Stage::Downloading, Stage::Succeeded);
                FetchOutcome::succeeded(identifier.clone(), elapsed_seconds, location.destination)
            }
            Err(e) => {
                tracing::warn!(identifier = %identifier, error = %e, "download failed");
                self.diagnostics.append(&format!(
                    "Failed to fetch data for {identifier}. Error: {REASON_DOWNLOAD}: {e}"
                ));
                transition(identifier, Stage::Downloading, Stage::Failed);
                FetchOutcome::failed(identifier.clone(), Stage::Downloading, REASON_DOWNLOAD)
            }
        }
    }

    /// Stream the artifact to its destination; returns the download time in seconds
    async fn download(&self, location: &ArtifactLocation) -> std::result::Result<f64, DownloadError> {
        let mut file = tokio::fs::File::create(&location.destination)
            .await
            .map_err(|source| DownloadError::OpenDestination {
                path: location.destination.clone(),
                source,
            })?;

        let started = Instant::now();
        let result = self
            .transport
            .stream_to(&location.remote_url, &mut file)
            .await;
        let elapsed = started.elapsed().as_secs_f64();

        let bytes = result
            .map_err(|e| DownloadError::from_transport(e, location.destination.clone()))?;
        if bytes == 0 {
            return Err(DownloadError::EmptyBody {
                url: location.remote_url.clone(),
            });
        }
        tracing::debug!(
            url = %location.remote_url,
            bytes,
            elapsed_seconds = elapsed,
            "download complete"
        );
        Ok(elapsed)
    }
}

fn transition(identifier: &Identifier, from: Stage, to: Stage) {
    tracing::debug!(identifier = %identifier, from = %from, to = %to, "stage transition");
}
