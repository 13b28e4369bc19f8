//! Name lookup against the MAST `invoke` endpoint

use crate::config::LookupConfig;
use crate::diagnostics::DiagnosticsSink;
use crate::error::ResolutionError;
use crate::transport::Transport;
use crate::types::{Identifier, Resolution};
use serde_json::json;
use std::sync::Arc;

/// Turns an identifier into the lookup service's raw response
pub struct MetadataResolver {
    config: LookupConfig,
    transport: Arc<dyn Transport>,
    diagnostics: DiagnosticsSink,
}

impl MetadataResolver {
    /// Create a resolver over the given transport
    pub fn new(
        config: LookupConfig,
        transport: Arc<dyn Transport>,
        diagnostics: DiagnosticsSink,
    ) -> Self {
        Self {
            config,
            transport,
            diagnostics,
        }
    }

    /// JSON request payload for `identifier`
    pub fn request_payload(&self, identifier: &Identifier) -> String {
        json!({
            "service": self.config.service,
            "params": {
                "input": identifier.as_str(),
                "format": self.config.format,
            }
        })
        .to_string()
    }

    /// Full lookup URL with the payload as the `request` query parameter
    pub fn request_url(&self, identifier: &Identifier) -> String {
        format!(
            "{}?request={}",
            self.config.base_url,
            urlencoding::encode(&self.request_payload(identifier))
        )
    }

    /// Look up `identifier`
    ///
    /// On failure one diagnostics entry naming the identifier and the error is
    /// appended before the error is returned.
    pub async fn resolve(&self, identifier: &Identifier) -> Result<Resolution, ResolutionError> {
        let url = self.request_url(identifier);
        tracing::debug!(identifier = %identifier, url = %url, "querying name lookup");

        let result = match self.transport.get_bytes(&url).await {
            Ok(body) => Resolution::from_body(body).ok_or(ResolutionError::EmptyResponse),
            Err(e) => Err(ResolutionError::from(e)),
        };

        match &result {
            Ok(resolution) => {
                tracing::debug!(identifier = %identifier, bytes = resolution.len(), "lookup resolved");
            }
            Err(e) => {
                tracing::warn!(identifier = %identifier, error = %e, "lookup failed");
                self.diagnostics.append(&format!(
                    "Failed to fetch metadata for star_id: {identifier}. Error: {e}"
                ));
            }
        }
        result
    }
}
