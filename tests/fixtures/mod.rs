//! Mock Services
//!
//! テスト用のモック WordPress バックエンドとユーティリティ

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use wordpress_mcp::handlers::wordpress::{
    ApiRequest, ApiResponse, Arguments, HttpBackend, WordPressHandler,
};
use wordpress_mcp::WordPressConfig;

/// Records every request and answers from a queue of canned responses.
pub struct MockWordPress {
    responses: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockWordPress {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Queue a JSON response
    pub fn respond(&self, status: u16, body: Value) {
        self.respond_raw(status, body.to_string());
    }

    pub fn respond_raw(&self, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(ApiResponse::new(status, body));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn only_request(&self) -> ApiRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

#[async_trait]
impl HttpBackend for MockWordPress {
    async fn send(&self, request: ApiRequest) -> wordpress_mcp::Result<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ApiResponse::new(500, "no mock response queued"));
        Ok(response)
    }
}

pub const SITE_URL: &str = "https://blog.example.com";
pub const API_ROOT: &str = "https://blog.example.com/wp-json/wp/v2";

pub fn test_config() -> WordPressConfig {
    WordPressConfig::new(SITE_URL, "editor", "abcd efgh ijkl mnop")
}

pub fn handler_with(mock: &Arc<MockWordPress>) -> WordPressHandler {
    WordPressHandler::with_backend(test_config(), mock.clone())
}

pub fn args(value: Value) -> Arguments {
    value
        .as_object()
        .cloned()
        .expect("arguments must be a JSON object")
}

pub fn post_json(id: u64, title: &str, status: &str) -> Value {
    json!({
        "id": id,
        "date": "2024-05-01T10:00:00",
        "slug": title.to_lowercase().replace(' ', "-"),
        "status": status,
        "type": "post",
        "link": format!("{}/?p={}", SITE_URL, id),
        "title": {"rendered": title},
        "content": {"rendered": "<p>Hello world</p>", "protected": false},
        "excerpt": {"rendered": "", "protected": false},
        "author": 1,
        "featured_media": 0
    })
}

pub fn term_json(id: u64, name: &str, count: u64) -> Value {
    json!({
        "id": id,
        "count": count,
        "description": "",
        "link": format!("{}/category/{}", SITE_URL, name.to_lowercase()),
        "name": name,
        "slug": name.to_lowercase(),
        "taxonomy": "category",
        "parent": 0
    })
}

pub fn media_json(id: u64, title: &str, source_url: &str) -> Value {
    json!({
        "id": id,
        "date": "2024-05-01T10:00:00",
        "slug": title,
        "status": "inherit",
        "type": "attachment",
        "title": {"rendered": title},
        "alt_text": "",
        "media_type": "image",
        "mime_type": "image/png",
        "source_url": source_url
    })
}
