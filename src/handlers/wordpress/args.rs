//! Typed views of the loosely-typed tool argument maps.
//!
//! Optional fields are `Option`s so that an omitted key stays out of the
//! outgoing payload and WordPress keeps its own value. An explicit JSON
//! `null` is treated the same as an omitted key.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Raw `arguments` object of a `tools/call` request
pub type Arguments = serde_json::Map<String, serde_json::Value>;

pub const DEFAULT_POST_STATUS: &str = "draft";
pub const DEFAULT_POSTS_PER_PAGE: u32 = 10;
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_TERMS_PER_PAGE: u32 = 100;

/// Deserialize an argument map into a tool's argument struct.
pub fn parse<T: DeserializeOwned>(arguments: Arguments) -> Result<T> {
    serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|e| Error::InvalidParams(e.to_string()))
}

/// Body of `POST /posts` and `POST /posts/{id}`; only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PostPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_media: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostArgs {
    pub title: String,
    pub content: String,
    pub status: Option<String>,
    pub excerpt: Option<String>,
    pub categories: Option<Vec<u64>>,
    pub tags: Option<Vec<u64>>,
    pub featured_media: Option<u64>,
}

impl From<CreatePostArgs> for PostPayload {
    fn from(args: CreatePostArgs) -> Self {
        PostPayload {
            title: Some(args.title),
            content: Some(args.content),
            status: Some(
                args.status
                    .unwrap_or_else(|| DEFAULT_POST_STATUS.to_string()),
            ),
            excerpt: args.excerpt,
            categories: args.categories,
            tags: args.tags,
            featured_media: args.featured_media,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePostArgs {
    pub post_id: u64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
    pub excerpt: Option<String>,
}

impl UpdatePostArgs {
    /// Split into the target id and a payload that never overwrites absent fields.
    pub fn into_parts(self) -> (u64, PostPayload) {
        let payload = PostPayload {
            title: self.title,
            content: self.content,
            status: self.status,
            excerpt: self.excerpt,
            ..PostPayload::default()
        };
        (self.post_id, payload)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostIdArgs {
    pub post_id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListPostsArgs {
    #[serde(default = "default_posts_per_page")]
    pub per_page: u32,
    #[serde(default = "default_page")]
    pub page: u32,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl ListPostsArgs {
    pub fn query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("per_page".to_string(), self.per_page.to_string()),
            ("page".to_string(), self.page.to_string()),
        ];
        if let Some(status) = &self.status {
            query.push(("status".to_string(), status.clone()));
        }
        if let Some(search) = &self.search {
            query.push(("search".to_string(), search.clone()));
        }
        query
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeletePostArgs {
    pub post_id: u64,
    #[serde(default)]
    pub force: bool,
}

impl DeletePostArgs {
    pub fn query(&self) -> Vec<(String, String)> {
        vec![("force".to_string(), self.force.to_string())]
    }
}

/// Arguments shared by `list_categories` and `list_tags`
#[derive(Debug, Clone, Deserialize)]
pub struct ListTermsArgs {
    #[serde(default = "default_terms_per_page")]
    pub per_page: u32,
}

impl ListTermsArgs {
    pub fn query(&self) -> Vec<(String, String)> {
        vec![("per_page".to_string(), self.per_page.to_string())]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadMediaArgs {
    pub file_path: String,
    pub title: Option<String>,
    pub alt_text: Option<String>,
}

/// Body of the follow-up `POST /media/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

impl UploadMediaArgs {
    /// `None` when neither title nor alt text was given and no second request is needed.
    pub fn metadata(&self) -> Option<MediaPayload> {
        if self.title.is_none() && self.alt_text.is_none() {
            return None;
        }
        Some(MediaPayload {
            title: self.title.clone(),
            alt_text: self.alt_text.clone(),
        })
    }
}

fn default_posts_per_page() -> u32 {
    DEFAULT_POSTS_PER_PAGE
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_terms_per_page() -> u32 {
    DEFAULT_TERMS_PER_PAGE
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: serde_json::Value) -> Arguments {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_create_post_defaults_to_draft() {
        let parsed: CreatePostArgs = parse(args(json!({"title": "T", "content": "C"}))).unwrap();
        let payload = serde_json::to_value(PostPayload::from(parsed)).unwrap();
        assert_eq!(payload, json!({"title": "T", "content": "C", "status": "draft"}));
    }

    #[test]
    fn test_create_post_keeps_falsy_values() {
        let parsed: CreatePostArgs = parse(args(json!({
            "title": "T",
            "content": "C",
            "excerpt": "",
            "categories": [],
            "featured_media": 0
        })))
        .unwrap();
        let payload = serde_json::to_value(PostPayload::from(parsed)).unwrap();
        assert_eq!(payload["excerpt"], "");
        assert_eq!(payload["categories"], json!([]));
        assert_eq!(payload["featured_media"], 0);
        assert!(payload.get("tags").is_none());
    }

    #[test]
    fn test_create_post_requires_title_and_content() {
        let err = parse::<CreatePostArgs>(args(json!({"title": "T"}))).unwrap_err();
        assert!(matches!(err, Error::InvalidParams(_)));
        assert!(err.to_string().contains("content"));
    }

    #[test]
    fn test_update_post_payload_only_has_present_keys() {
        let parsed: UpdatePostArgs = parse(args(json!({"post_id": 5, "title": "New"}))).unwrap();
        let (post_id, payload) = parsed.into_parts();
        assert_eq!(post_id, 5);
        assert_eq!(serde_json::to_value(payload).unwrap(), json!({"title": "New"}));
    }

    #[test]
    fn test_update_post_ignores_unrelated_keys() {
        let parsed: UpdatePostArgs =
            parse(args(json!({"post_id": 5, "tags": [1, 2], "excerpt": null}))).unwrap();
        let (_, payload) = parsed.into_parts();
        assert_eq!(serde_json::to_value(payload).unwrap(), json!({}));
    }

    #[test]
    fn test_list_posts_query_defaults() {
        let parsed: ListPostsArgs = parse(Arguments::new()).unwrap();
        assert_eq!(
            parsed.query(),
            vec![
                ("per_page".to_string(), "10".to_string()),
                ("page".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_posts_query_forwards_filters() {
        let parsed: ListPostsArgs =
            parse(args(json!({"per_page": 3, "status": "publish", "search": "rust"}))).unwrap();
        let query = parsed.query();
        assert!(query.contains(&("per_page".to_string(), "3".to_string())));
        assert!(query.contains(&("status".to_string(), "publish".to_string())));
        assert!(query.contains(&("search".to_string(), "rust".to_string())));
    }

    #[test]
    fn test_delete_post_force_defaults_false() {
        let parsed: DeletePostArgs = parse(args(json!({"post_id": 7}))).unwrap();
        assert_eq!(parsed.query(), vec![("force".to_string(), "false".to_string())]);
    }

    #[test]
    fn test_terms_per_page_default() {
        let parsed: ListTermsArgs = parse(Arguments::new()).unwrap();
        assert_eq!(parsed.per_page, DEFAULT_TERMS_PER_PAGE);
    }

    #[test]
    fn test_media_metadata_only_when_needed() {
        let parsed: UploadMediaArgs = parse(args(json!({"file_path": "/tmp/a.png"}))).unwrap();
        assert!(parsed.metadata().is_none());

        let parsed: UploadMediaArgs =
            parse(args(json!({"file_path": "/tmp/a.png", "alt_text": "A cat"}))).unwrap();
        assert_eq!(
            serde_json::to_value(parsed.metadata().unwrap()).unwrap(),
            json!({"alt_text": "A cat"})
        );
    }

    #[test]
    fn test_post_id_must_be_integer() {
        let err = parse::<PostIdArgs>(args(json!({"post_id": "abc"}))).unwrap_err();
        assert!(matches!(err, Error::InvalidParams(_)));
    }
}
