//! HTTP plumbing for the WordPress REST API.
//!
//! [`HttpBackend`] is the seam between request building and the network:
//! [`ReqwestBackend`] talks to a real site, tests plug in a recorder.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::WordPressConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Bytes(Vec<u8>),
}

/// A fully built outgoing request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn json_body(&self) -> Option<&serde_json::Value> {
        match &self.body {
            RequestBody::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// Status and raw body of a response, whatever the status.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Send one request. Non-2xx statuses are returned as responses, not errors.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// [`HttpBackend`] over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: Client,
}

impl ReqwestBackend {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("wordpress-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut builder = self.client.request(request.method, &request.url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Bytes(bytes) => builder.body(bytes),
        };

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                warn!("Request timeout: {}", e);
            } else if e.is_connect() {
                warn!("Connection error: {}", e);
            }
            Error::Network(e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}

/// Per-invocation view of one site: API root plus a freshly derived
/// Authorization header.
pub struct WordPressClient {
    backend: Arc<dyn HttpBackend>,
    api_root: String,
    authorization: String,
}

impl WordPressClient {
    pub fn new(backend: Arc<dyn HttpBackend>, config: &WordPressConfig) -> Self {
        Self {
            backend,
            api_root: config.api_root(),
            authorization: config.authorization_header(),
        }
    }

    fn request(&self, method: Method, path: &str) -> ApiRequest {
        ApiRequest {
            method,
            url: format!("{}/{}", self.api_root, path),
            query: Vec::new(),
            headers: vec![("Authorization".to_string(), self.authorization.clone())],
            body: RequestBody::Empty,
        }
    }

    /// Send and turn any non-2xx status into [`Error::Api`].
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        debug!("{} {}", request.method, request.url);
        let response = self.backend.send(request).await?;

        if !response.is_success() {
            warn!("WordPress API error: {}", response.status);
            return Err(Error::Api {
                status: response.status,
                body: response.body,
            });
        }

        Ok(response)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T> {
        let mut request = self.request(Method::GET, path);
        request.query = query;
        let response = self.execute(request).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// WordPress uses POST for both create and partial update.
    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = self.request(Method::POST, path);
        request.body = RequestBody::Json(serde_json::to_value(body)?);
        let response = self.execute(request).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// The response body of a delete is not inspected.
    pub async fn delete(&self, path: &str, query: Vec<(String, String)>) -> Result<()> {
        let mut request = self.request(Method::DELETE, path);
        request.query = query;
        self.execute(request).await?;
        Ok(())
    }

    /// Raw-body upload as used by `/media`.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        data: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<T> {
        let mut request = self.request(Method::POST, path);
        request.headers.push((
            "Content-Disposition".to_string(),
            format!("attachment; filename={}", filename),
        ));
        request
            .headers
            .push(("Content-Type".to_string(), content_type.to_string()));
        request.body = RequestBody::Bytes(data);
        let response = self.execute(request).await?;
        Ok(serde_json::from_str(&response.body)?)
    }
}
