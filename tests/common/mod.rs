//! Common test utilities for star-fetch integration tests
#![allow(dead_code)]

use star_fetch::{Config, DownloadConfig, LookupConfig};
use std::path::Path;
use tempfile::TempDir;
use wiremock::MockServer;

/// Lookup endpoint path on the mock server
pub const INVOKE_PATH: &str = "/api/v0/invoke";
/// Download base path on the mock server
pub const DOWNLOAD_PATH: &str = "/api/v0.1/Download/file";

/// Config pointing both services at `mock_server` and all files into `temp_dir`
pub fn mock_config(mock_server: &MockServer, temp_dir: &TempDir) -> Config {
    Config {
        lookup: LookupConfig {
            base_url: format!("{}{}", mock_server.uri(), INVOKE_PATH),
            ..Default::default()
        },
        download: DownloadConfig {
            base_url: format!("{}{}", mock_server.uri(), DOWNLOAD_PATH),
            output_dir: temp_dir.path().join("data/raw"),
            ..Default::default()
        },
        log_path: temp_dir.path().join("data/logs/single_star_rs.log"),
        ..Default::default()
    }
}

/// Every line in the log file, banners included
pub fn log_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Log lines that are neither banner rules nor session headers
pub fn event_lines(path: &Path) -> Vec<String> {
    log_lines(path)
        .into_iter()
        .filter(|l| !l.starts_with("=====") && !l.starts_with("Logging session started"))
        .collect()
}
