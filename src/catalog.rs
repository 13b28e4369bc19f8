//! TIC catalog queries for building identifier lists
//!
//! Asks MAST's filtered TIC catalog for stars within a TESS magnitude range
//! and turns each row into a `TIC <ID>` identifier.

use crate::config::CatalogConfig;
use crate::error::{Error, Result};
use crate::identifiers::write_identifier_list;
use crate::transport::Transport;
use crate::types::Identifier;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: Vec<CatalogRow>,
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "ID")]
    id: Value,
}

/// Filtered TIC query over a [`Transport`]
pub struct CatalogQuery {
    invoke_url: String,
    config: CatalogConfig,
    transport: Arc<dyn Transport>,
}

impl CatalogQuery {
    /// Query the catalog through the MAST `invoke` endpoint at `invoke_url`
    pub fn new(
        invoke_url: impl Into<String>,
        config: CatalogConfig,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            invoke_url: invoke_url.into(),
            config,
            transport,
        }
    }

    /// JSON request payload
    pub fn request_payload(&self) -> String {
        json!({
            "service": self.config.service,
            "format": "json",
            "params": {
                "columns": "ID",
                "filters": [{
                    "paramName": "Tmag",
                    "values": [{
                        "min": self.config.min_magnitude,
                        "max": self.config.max_magnitude,
                    }],
                }],
            },
            "pagesize": self.config.limit,
            "page": 1,
        })
        .to_string()
    }

    /// Run the query and return up to `limit` identifiers
    pub async fn query_star_ids(&self) -> Result<Vec<Identifier>> {
        let url = format!(
            "{}?request={}",
            self.invoke_url,
            urlencoding::encode(&self.request_payload())
        );
        tracing::info!(
            service = %self.config.service,
            min = self.config.min_magnitude,
            max = self.config.max_magnitude,
            "querying star catalog"
        );

        let started = Instant::now();
        let body = self.transport.get_bytes(&url).await?;
        let mut ids = parse_star_ids(&body)?;
        tracing::info!(
            rows = ids.len(),
            elapsed_seconds = started.elapsed().as_secs_f64(),
            "catalog query completed"
        );

        if ids.len() < self.config.limit {
            tracing::warn!(
                fetched = ids.len(),
                wanted = self.config.limit,
                "fewer stars than requested"
            );
        }
        ids.truncate(self.config.limit);
        Ok(ids)
    }

    /// Query the catalog and write the identifier list to the configured path
    pub async fn save_star_ids(&self) -> Result<usize> {
        let ids = self.query_star_ids().await?;
        write_identifier_list(&self.config.output_path, &ids, self.config.limit).await
    }
}

/// Turn a catalog response body into `TIC <ID>` identifiers
pub fn parse_star_ids(body: &[u8]) -> Result<Vec<Identifier>> {
    let response: CatalogResponse = serde_json::from_slice(body)?;
    if let Some(status) = response.status.as_deref()
        && status.eq_ignore_ascii_case("ERROR")
    {
        return Err(Error::InvalidCatalogResponse(
            "catalog service reported an error".to_string(),
        ));
    }

    response
        .data
        .into_iter()
        .map(|row| match row.id {
            Value::Number(n) => Ok(Identifier::new(format!("TIC {n}"))),
            Value::String(s) if !s.trim().is_empty() => {
                Ok(Identifier::new(format!("TIC {}", s.trim())))
            }
            other => Err(Error::InvalidCatalogResponse(format!(
                "unexpected ID value: {other}"
            ))),
        })
        .collect()
}
