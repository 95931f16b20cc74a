//! The HTTP adapter every other component goes through.
//!
//! One `reqwest::Client` per process, rooted at the configured base URL, with
//! a cookie jar so the backend's session cookie rides along on every call.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Method, RequestBuilder, Url};
use serde::Serialize;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::errors::{ClientError, generic_status_message};

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    jar: Arc<Jar>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .timeout(config.timeout)
            .user_agent(concat!("hrdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            jar,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn cookie_url(&self) -> Option<Url> {
        Url::parse(&self.base_url).ok()
    }

    /// Cookies the jar would send to the backend, as a `Cookie` header value.
    pub fn session_cookie(&self) -> Option<String> {
        let url = self.cookie_url()?;
        self.jar
            .cookies(&url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    /// Seed the jar from a previously saved `Cookie` header value.
    pub fn restore_session_cookie(&self, header: &str) {
        let Some(url) = self.cookie_url() else {
            return;
        };
        for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            self.jar.add_cookie_str(pair, &url);
        }
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Value, ClientError> {
        tracing::debug!(%method, path, "request");
        let request = build(self.http.request(method.clone(), self.url(path)));
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = extract_error_message(status.as_u16(), &body);
            tracing::warn!(%method, path, status = status.as_u16(), %message, "request failed");
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.execute(Method::GET, path, |req| req).await
    }

    pub(crate) async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Value, ClientError> {
        self.execute(Method::GET, path, |req| req.query(query)).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ClientError> {
        self.execute(Method::POST, path, |req| req.json(body)).await
    }

    pub(crate) async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ClientError> {
        self.execute(Method::PATCH, path, |req| req.json(body)).await
    }

    pub(crate) async fn delete(&self, path: &str, body: Option<&Value>) -> Result<(), ClientError> {
        self.execute(Method::DELETE, path, |req| match body {
            Some(body) => req.json(body),
            None => req,
        })
        .await
        .map(|_| ())
    }
}

/// Pull a human-readable message out of an error body: `message`, then
/// `error`, then a generic status line.
pub fn extract_error_message(status: u16, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|v| {
            ["message", "error"]
                .iter()
                .find_map(|key| v.get(*key).and_then(Value::as_str))
        })
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| generic_status_message(status))
}
