//! Members data API access
//!
//! The members API answers most data requests indirectly: the first request
//! returns a `{ "link": ... }` document and the real JSON lives behind that
//! signed URL. Large result sets are split into chunk files. [`DataApi`]
//! abstracts the transport so handlers can run against the real
//! [`MembersClient`] or an in-memory fake.

use async_trait::async_trait;
use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::schema::{ChunkInfo, LinkResponse};
use crate::{CertificateError, Result};

pub mod auth;
pub mod client;

pub use auth::{AuthCookie, AuthSource, CookieCache};
pub use client::MembersClient;

/// Transport for members API GET requests
///
/// Implementations attach authentication and map transport failures into
/// [`CertificateError`]:
/// - `Ok(body)` - 2xx response body
/// - `Err(Unauthenticated)` - no usable auth cookie
/// - `Err(Http { status, .. })` - non-success status or transport failure
#[async_trait]
pub trait DataApi: Send + Sync {
    /// GET `url` and return the response body.
    async fn get(&self, url: &str) -> Result<String>;
}

/// GET `url` and deserialize the JSON body.
pub async fn fetch_json<T: DeserializeOwned>(api: &dyn DataApi, url: &str) -> Result<T> {
    let body = api.get(url).await?;
    serde_json::from_str(&body).map_err(|e| CertificateError::parse_error(url, e))
}

/// Follow the signed-link indirection and deserialize the linked body.
pub async fn fetch_linked<T: DeserializeOwned>(api: &dyn DataApi, url: &str) -> Result<T> {
    let link: LinkResponse = fetch_json(api, url).await?;
    if link.link.is_empty() {
        return Err(CertificateError::malformed("link"));
    }
    debug!(url, "following signed link");
    fetch_json(api, &link.link).await
}

/// Download every chunk concurrently and concatenate the rows in chunk order.
pub async fn fetch_chunks<T: DeserializeOwned>(
    api: &dyn DataApi,
    info: &ChunkInfo,
) -> Result<Vec<T>> {
    let urls = info.chunk_urls();
    debug!(chunks = urls.len(), "fetching chunked rows");

    let chunks = try_join_all(urls.iter().map(|url| fetch_json::<Vec<T>>(api, url))).await?;
    Ok(chunks.into_iter().flatten().collect())
}
