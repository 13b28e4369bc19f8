//! Shared helpers for unit tests

use crate::error::TransportError;
use crate::transport::Transport;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Canned response for a scripted transport call
#[derive(Clone, Debug)]
pub(crate) enum Reply {
    /// 200 with this body
    Body(Vec<u8>),
    /// Non-success status
    Status(u16),
    /// Transport-level failure
    Fail(String),
    /// Stream these bytes, then fail
    Partial(Vec<u8>, String),
}

impl Reply {
    pub(crate) fn body(bytes: &[u8]) -> Self {
        Reply::Body(bytes.to_vec())
    }

    pub(crate) fn fail(message: &str) -> Self {
        Reply::Fail(message.to_string())
    }
}

/// Transport double that replays canned replies and records every call
pub(crate) struct ScriptedTransport {
    lookup: Reply,
    download: Reply,
    lookup_calls: AtomicUsize,
    download_urls: Mutex<Vec<String>>,
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self {
            lookup: Reply::fail("no lookup scripted"),
            download: Reply::fail("no download scripted"),
            lookup_calls: AtomicUsize::new(0),
            download_urls: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedTransport {
    pub(crate) fn with_lookup(mut self, reply: Reply) -> Self {
        self.lookup = reply;
        self
    }

    pub(crate) fn with_download(mut self, reply: Reply) -> Self {
        self.download = reply;
        self
    }

    pub(crate) fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn download_urls(&self) -> Vec<String> {
        self.download_urls.lock().unwrap().clone()
    }
}

fn status_error(status: u16, url: &str) -> TransportError {
    TransportError::Status {
        status,
        url: url.to_string(),
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        match &self.lookup {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Status(status) => Err(status_error(*status, url)),
            Reply::Fail(msg) | Reply::Partial(_, msg) => Err(TransportError::Client(msg.clone())),
        }
    }

    async fn stream_to(
        &self,
        url: &str,
        sink: &mut (dyn AsyncWrite + Send + Unpin),
    ) -> Result<u64, TransportError> {
        self.download_urls.lock().unwrap().push(url.to_string());
        match &self.download {
            Reply::Body(body) => {
                sink.write_all(body).await?;
                sink.flush().await?;
                Ok(body.len() as u64)
            }
            Reply::Status(status) => Err(status_error(*status, url)),
            Reply::Fail(msg) => Err(TransportError::Client(msg.clone())),
            Reply::Partial(body, msg) => {
                sink.write_all(body).await?;
                sink.flush().await?;
                Err(TransportError::Client(msg.clone()))
            }
        }
    }
}

/// Diagnostics lines after the session banner
pub(crate) fn log_entries(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .skip(3)
        .map(str::to_string)
        .collect()
}
