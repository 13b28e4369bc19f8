//! Newline-delimited identifier lists

use crate::error::{Error, Result};
use crate::types::Identifier;
use std::path::Path;

/// Parse identifiers from text, one per line
///
/// Lines are trimmed and blank lines are skipped.
pub fn parse_identifier_list(text: &str) -> Vec<Identifier> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Identifier::from)
        .collect()
}

/// Read every identifier from a list file
pub async fn read_identifier_list(path: impl AsRef<Path>) -> Result<Vec<Identifier>> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await?;
    let identifiers = parse_identifier_list(&text);
    tracing::debug!(path = %path.display(), count = identifiers.len(), "read identifier list");
    Ok(identifiers)
}

/// First identifier in a list file
pub async fn first_identifier(path: impl AsRef<Path>) -> Result<Identifier> {
    let path = path.as_ref();
    read_identifier_list(path)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| Error::EmptyIdentifierList(path.to_path_buf()))
}

/// Write at most `limit` identifiers, one per line, creating the parent directory
///
/// Returns the number of identifiers written.
pub async fn write_identifier_list(
    path: impl AsRef<Path>,
    identifiers: &[Identifier],
    limit: usize,
) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut text = String::new();
    for (i, identifier) in identifiers.iter().take(limit).enumerate() {
        text.push_str(identifier.as_str());
        text.push('\n');
        if i % 100 == 0 {
            tracing::debug!(written = i, "writing star IDs");
        }
    }
    tokio::fs::write(path, text).await?;

    let written = identifiers.len().min(limit);
    tracing::info!(path = %path.display(), written, "saved star IDs");
    Ok(written)
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn blank_lines_and_padding_are_ignored() {
        let ids = parse_identifier_list("\n  TIC 84441541  \n\n\tTIC 1\r\n   \n");
        assert_eq!(ids, vec![Identifier::from("TIC 84441541"), Identifier::from("TIC 1")]);
    }

    #[tokio::test]
    async fn first_identifier_skips_leading_blank_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("star_ids.txt");
        std::fs::write(&path, "\n\nTIC 84441541\nTIC 2\n").unwrap();

        let first = first_identifier(&path).await.unwrap();
        assert_eq!(first.as_str(), "TIC 84441541");
    }

    #[tokio::test]
    async fn empty_list_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("star_ids.txt");
        std::fs::write(&path, "\n   \n").unwrap();

        match first_identifier(&path).await {
            Err(Error::EmptyIdentifierList(p)) => assert_eq!(p, path),
            other => panic!("expected EmptyIdentifierList, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_list_is_an_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_identifier_list(temp_dir.path().join("absent.txt")).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn write_respects_limit_and_reads_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("inputs/star_ids.txt");
        let ids: Vec<Identifier> = (1..=5).map(|n| Identifier::new(format!("TIC {n}"))).collect();

        let written = write_identifier_list(&path, &ids, 3).await.unwrap();
        assert_eq!(written, 3);

        let back = read_identifier_list(&path).await.unwrap();
        assert_eq!(back, ids[..3].to_vec());
    }
}
