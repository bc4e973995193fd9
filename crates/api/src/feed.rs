//! Rider feed loading.
//!
//! The feed is read exactly once at startup, either over HTTP(S) or from a
//! local file. Any failure is logged and yields an empty catalog; there is
//! no retry.

use pronostiek_core::catalog::RiderCatalog;

/// Errors while fetching the raw feed bytes.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The feed server returned a non-2xx status code.
    #[error("Rider feed returned status {status}")]
    Status { status: u16 },

    /// The feed file could not be read.
    #[error("Failed to read rider feed: {0}")]
    Io(#[from] std::io::Error),
}

/// Whether `source` should be fetched over the network.
fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Fetch the raw feed bytes from `source`.
pub async fn fetch_feed(source: &str) -> Result<Vec<u8>, FeedError> {
    if is_remote(source) {
        let response = reqwest::get(source).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    } else {
        Ok(tokio::fs::read(source).await?)
    }
}

/// Load the rider catalog from `source`, falling back to an empty catalog.
pub async fn load_catalog(source: &str) -> RiderCatalog {
    match fetch_feed(source).await {
        Ok(raw) => RiderCatalog::load(&raw),
        Err(e) => {
            tracing::error!(error = %e, source, "Failed to fetch rider feed, continuing with an empty catalog");
            RiderCatalog::empty()
        }
    }
}
