//! `reqwest`-backed guestbook API client.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use guestbook_core::api::{
    CreateEntryRequest, CreateEntryResponse, DeleteEntryRequest, DeleteEntryResponse,
    ErrorResponse, ListEntriesResponse,
};
use guestbook_core::{EntryId, GuestbookEntry};

use crate::api::{ApiError, GuestbookApi};

/// Guestbook API client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGuestbookApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpGuestbookApi {
    /// Create a client for the server at `base_url` (e.g. `https://example.com/api/`).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Parse` if `base_url` is not a valid absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Parse(format!("invalid base URL '{base_url}': {e}")))?;
        Ok(Self::with_client(reqwest::Client::new(), base_url))
    }

    /// Create a client reusing an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: reqwest::Client, mut base_url: Url) -> Self {
        // Url::join replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    /// The normalized base URL, always ending in '/'.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Parse(format!("invalid endpoint '{path}': {e}")))
    }
}

#[async_trait]
impl GuestbookApi for HttpGuestbookApi {
    async fn list(&self) -> Result<Vec<GuestbookEntry>, ApiError> {
        let response = self.client.get(self.endpoint("guestbook")?).send().await?;
        let body: ListEntriesResponse = read_json(response).await?;
        Ok(body.entries)
    }

    async fn create(&self, name: &str, message: &str) -> Result<CreateEntryResponse, ApiError> {
        let request = CreateEntryRequest {
            name: Some(name.to_owned()),
            message: Some(message.to_owned()),
        };

        let response = self
            .client
            .post(self.endpoint("guestbook")?)
            .json(&request)
            .send()
            .await?;
        read_json(response).await
    }

    async fn delete(&self, id: EntryId, password: &str) -> Result<String, ApiError> {
        let request = DeleteEntryRequest {
            password: Some(password.to_owned()),
        };

        let response = self
            .client
            .delete(self.endpoint(&format!("guestbook/{id}"))?)
            .json(&request)
            .send()
            .await?;
        let body: DeleteEntryResponse = read_json(response).await?;
        Ok(body.message)
    }
}

/// Decode a success body, or map a failure status and its `{error}` text.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();

    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()));
    }

    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };

    tracing::debug!(status = status.as_u16(), %message, "Guestbook request failed");
    Err(error_for_status(status, message))
}

fn error_for_status(status: StatusCode, message: String) -> ApiError {
    match status {
        StatusCode::BAD_REQUEST => ApiError::Validation(message),
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        other => ApiError::Server {
            status: other.as_u16(),
            message,
        },
    }
}
