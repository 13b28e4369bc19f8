//! # star-fetch
//!
//! Resolve an astronomical object name through MAST and download its data
//! product, recording timing and failures for benchmarking.
//!
//! A fetch runs in three strictly sequential stages:
//!
//! 1. **Resolve** - [`MetadataResolver`] sends a `Mast.Name.Lookup` request
//!    and keeps the raw response
//! 2. **Locate** - [`ArtifactLocator`] derives the product URL and the local
//!    destination `<output_dir>/<identifier>_<variant>.<ext>`
//! 3. **Download** - [`Fetcher`] streams the product to disk and times the
//!    transfer
//!
//! Every fetch returns one [`FetchOutcome`] and appends one line to the
//! [`DiagnosticsSink`]. Failures never escape as errors.
//!
//! ## Quick Start
//!
//! ```no_run
//! use star_fetch::{Config, Fetcher, Identifier};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let fetcher = Fetcher::from_config(&config)?;
//!
//!     let outcome = fetcher.fetch(&Identifier::from("TIC 84441541")).await;
//!     println!("{}", outcome.summary());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// TIC catalog queries
pub mod catalog;
/// Configuration types
pub mod config;
/// Append-only diagnostics log
pub mod diagnostics;
/// Error types
pub mod error;
/// Resolve-then-fetch orchestration
pub mod fetcher;
/// Identifier list files
pub mod identifiers;
/// Artifact location and product naming
pub mod locator;
/// Name lookup
pub mod resolver;
/// HTTP transport
pub mod transport;
/// Core types
pub mod types;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use catalog::CatalogQuery;
pub use config::{CatalogConfig, Config, DownloadConfig, LookupConfig, NamingStrategy};
pub use diagnostics::DiagnosticsSink;
pub use error::{DownloadError, Error, LocateError, ResolutionError, Result, TransportError};
pub use fetcher::Fetcher;
pub use identifiers::{first_identifier, read_identifier_list, write_identifier_list};
pub use locator::{ArtifactLocator, FixedProductName, ProductNaming, TessLightCurveName};
pub use resolver::MetadataResolver;
pub use transport::{HttpTransport, Transport};
pub use types::{ArtifactLocation, FetchOutcome, Identifier, Resolution, Stage};
