//! Image provider integration
//!
//! HTTP against the provider is blocking (ureq), so every call runs
//! inside `tokio::task::spawn_blocking` and is awaited from an iced
//! task. A single failed attempt is terminal; the user re-triggers
//! explicitly, there are no retries and no timeouts.

pub mod pexels;

use std::io::Read;

use thiserror::Error;
use tokio::task;

/// Everything that can go wrong talking to the provider.
///
/// All variants are transient from the user's point of view; none are
/// fatal to the application.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Non-success HTTP status (includes rate-limit responses)
    #[error("provider returned HTTP {0}")]
    Status(u16),
    /// Transport-level failure (DNS, connect, TLS, read)
    #[error("network error: {0}")]
    Transport(String),
    /// Response body did not match the expected shape
    #[error("malformed provider response: {0}")]
    Payload(String),
    /// The background task running the request was lost
    #[error("background task failed: {0}")]
    Task(String),
}

impl From<ureq::Error> for ProviderError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, _) => ProviderError::Status(code),
            ureq::Error::Transport(t) => ProviderError::Transport(t.to_string()),
        }
    }
}

/// Download the bytes of a display image (thumbnail or viewer).
pub async fn fetch_image_bytes(url: String) -> Result<Vec<u8>, ProviderError> {
    // Spawn blocking because ureq performs synchronous I/O
    task::spawn_blocking(move || fetch_image_bytes_blocking(&url))
        .await
        .map_err(|e| ProviderError::Task(e.to_string()))?
}

fn fetch_image_bytes_blocking(url: &str) -> Result<Vec<u8>, ProviderError> {
    let response = ureq::get(url).call()?;
    let mut body = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut body)
        .map_err(|e| ProviderError::Transport(e.to_string()))?;
    Ok(body)
}
