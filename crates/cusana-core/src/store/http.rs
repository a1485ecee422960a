//! REST client for the mail-storage API.

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::{ListQuery, MailStore};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::model::{Email, EmailId, EmailPatch, NewEmail};

/// Mail store reached over HTTP+JSON.
#[derive(Debug, Clone)]
pub struct HttpMailStore {
    client: Client,
    base_url: Url,
}

impl HttpMailStore {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be
    /// built.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim())?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        // Every request is JSON and must bypass intermediate caches.
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self { client, base_url })
    }

    /// Creates a client from the configured API URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL is invalid.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::new(&config.api_url)
    }

    /// Base URL of the API.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn list_url(&self, query: &ListQuery) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&["emails"])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("filter", query.filter.as_str());
            if let Some(search) = query.search_text() {
                pairs.append_pair("search", search);
            }
        }
        Ok(url)
    }

    fn email_url(&self, id: &EmailId) -> Result<Url, ApiError> {
        self.endpoint(&["emails", id.as_str()])
    }

    /// Sends a request and turns non-success statuses into errors.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        warn!("Mail store returned {}: {}", status.as_u16(), message);
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// Sends a request and decodes the JSON payload.
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Err(ApiError::EmptyResponse);
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(ApiError::EmptyResponse);
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Message for a failed response: the body text, the `detail` field of a
/// JSON error body, or a generic line when the body is empty.
fn error_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return format!("Request failed ({})", status.as_u16());
    }

    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl MailStore for HttpMailStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Email>, ApiError> {
        let url = self.list_url(query)?;
        debug!("GET {}", url);
        self.fetch(self.client.get(url)).await
    }

    async fn get(&self, id: &EmailId) -> Result<Email, ApiError> {
        let url = self.email_url(id)?;
        debug!("GET {}", url);
        self.fetch(self.client.get(url)).await
    }

    async fn create(&self, email: &NewEmail) -> Result<Email, ApiError> {
        let url = self.endpoint(&["emails"])?;
        debug!("POST {}", url);
        self.fetch(self.client.post(url).json(email)).await
    }

    async fn update(&self, id: &EmailId, patch: &EmailPatch) -> Result<Email, ApiError> {
        let url = self.email_url(id)?;
        debug!("PUT {}", url);
        self.fetch(self.client.put(url).json(patch)).await
    }

    async fn delete(&self, id: &EmailId) -> Result<(), ApiError> {
        let url = self.email_url(id)?;
        debug!("DELETE {}", url);
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Filter;

    #[test]
    fn test_list_url_omits_blank_search() {
        let store = HttpMailStore::new("http://localhost:8000").unwrap();
        let url = store
            .list_url(&ListQuery::new(Filter::Unread, "  "))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/emails?filter=unread");
    }

    #[test]
    fn test_list_url_encodes_search() {
        let store = HttpMailStore::new("http://localhost:8000").unwrap();
        let url = store
            .list_url(&ListQuery::new(Filter::All, "renewal & invoice"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/emails?filter=all&search=renewal+%26+invoice"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let store = HttpMailStore::new("https://mail.example.com/api/").unwrap();
        let url = store.email_url(&EmailId::new("42")).unwrap();
        assert_eq!(url.as_str(), "https://mail.example.com/api/emails/42");
    }

    #[test]
    fn test_email_url_escapes_id() {
        let store = HttpMailStore::new("http://localhost:8000").unwrap();
        let url = store.email_url(&EmailId::new("a/b")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/emails/a%2Fb");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpMailStore::new("not a url"),
            Err(ApiError::Url(_))
        ));
        assert!(matches!(
            HttpMailStore::new("mailto:someone@example.com"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_error_message_variants() {
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"detail":"Email not found"}"#),
            "Email not found"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "Request failed (500)"
        );
        assert_eq!(
            error_message(StatusCode::UNPROCESSABLE_ENTITY, r#"{"detail":[{"msg":"x"}]}"#),
            r#"{"detail":[{"msg":"x"}]}"#
        );
    }
}
