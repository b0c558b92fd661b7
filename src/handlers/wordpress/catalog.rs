//! Static definitions of every tool the server offers.

use serde_json::json;

use super::args::{DEFAULT_PAGE, DEFAULT_POSTS_PER_PAGE, DEFAULT_POST_STATUS, DEFAULT_TERMS_PER_PAGE};
use crate::mcp::Tool;

pub const CREATE_POST: &str = "create_post";
pub const UPDATE_POST: &str = "update_post";
pub const GET_POST: &str = "get_post";
pub const LIST_POSTS: &str = "list_posts";
pub const DELETE_POST: &str = "delete_post";
pub const LIST_CATEGORIES: &str = "list_categories";
pub const LIST_TAGS: &str = "list_tags";
pub const UPLOAD_MEDIA: &str = "upload_media";

pub const TOOL_NAMES: [&str; 8] = [
    CREATE_POST,
    UPDATE_POST,
    GET_POST,
    LIST_POSTS,
    DELETE_POST,
    LIST_CATEGORIES,
    LIST_TAGS,
    UPLOAD_MEDIA,
];

const POST_STATUSES: [&str; 4] = ["publish", "draft", "pending", "private"];

fn tool(name: &str, description: &str, input_schema: serde_json::Value) -> Tool {
    Tool {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

/// The complete, fixed tool set, in a stable order.
pub fn tool_definitions() -> Vec<Tool> {
    vec![
        tool(
            CREATE_POST,
            "Create a new WordPress post. Can be published immediately or saved as draft.",
            json!({
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Post title"
                    },
                    "content": {
                        "type": "string",
                        "description": "Post content (HTML or plain text)"
                    },
                    "status": {
                        "type": "string",
                        "enum": POST_STATUSES,
                        "description": "Post status (default: draft)",
                        "default": DEFAULT_POST_STATUS
                    },
                    "excerpt": {
                        "type": "string",
                        "description": "Post excerpt (optional)"
                    },
                    "categories": {
                        "type": "array",
                        "items": {"type": "integer"},
                        "description": "Array of category IDs (optional)"
                    },
                    "tags": {
                        "type": "array",
                        "items": {"type": "integer"},
                        "description": "Array of tag IDs (optional)"
                    },
                    "featured_media": {
                        "type": "integer",
                        "description": "Featured image ID (optional)"
                    }
                },
                "required": ["title", "content"]
            }),
        ),
        tool(
            UPDATE_POST,
            "Update an existing WordPress post. Only the fields supplied are changed.",
            json!({
                "type": "object",
                "properties": {
                    "post_id": {
                        "type": "integer",
                        "description": "ID of the post to update"
                    },
                    "title": {
                        "type": "string",
                        "description": "New post title (optional)"
                    },
                    "content": {
                        "type": "string",
                        "description": "New post content (optional)"
                    },
                    "status": {
                        "type": "string",
                        "enum": POST_STATUSES,
                        "description": "New post status (optional)"
                    },
                    "excerpt": {
                        "type": "string",
                        "description": "New post excerpt (optional)"
                    }
                },
                "required": ["post_id"]
            }),
        ),
        tool(
            GET_POST,
            "Get details of a specific WordPress post by ID.",
            json!({
                "type": "object",
                "properties": {
                    "post_id": {
                        "type": "integer",
                        "description": "ID of the post to retrieve"
                    }
                },
                "required": ["post_id"]
            }),
        ),
        tool(
            LIST_POSTS,
            "List WordPress posts with optional filtering.",
            json!({
                "type": "object",
                "properties": {
                    "per_page": {
                        "type": "integer",
                        "description": "Number of posts per page (default: 10, max: 100)",
                        "default": DEFAULT_POSTS_PER_PAGE
                    },
                    "page": {
                        "type": "integer",
                        "description": "Page number (default: 1)",
                        "default": DEFAULT_PAGE
                    },
                    "status": {
                        "type": "string",
                        "enum": ["publish", "draft", "pending", "private", "any"],
                        "description": "Filter by post status"
                    },
                    "search": {
                        "type": "string",
                        "description": "Search term to filter posts"
                    }
                }
            }),
        ),
        tool(
            DELETE_POST,
            "Delete a WordPress post (moves to trash or permanently deletes).",
            json!({
                "type": "object",
                "properties": {
                    "post_id": {
                        "type": "integer",
                        "description": "ID of the post to delete"
                    },
                    "force": {
                        "type": "boolean",
                        "description": "Whether to permanently delete (true) or move to trash (false)",
                        "default": false
                    }
                },
                "required": ["post_id"]
            }),
        ),
        tool(
            LIST_CATEGORIES,
            "List all WordPress categories.",
            json!({
                "type": "object",
                "properties": {
                    "per_page": {
                        "type": "integer",
                        "description": "Number of categories per page (default: 100)",
                        "default": DEFAULT_TERMS_PER_PAGE
                    }
                }
            }),
        ),
        tool(
            LIST_TAGS,
            "List all WordPress tags.",
            json!({
                "type": "object",
                "properties": {
                    "per_page": {
                        "type": "integer",
                        "description": "Number of tags per page (default: 100)",
                        "default": DEFAULT_TERMS_PER_PAGE
                    }
                }
            }),
        ),
        tool(
            UPLOAD_MEDIA,
            "Upload a local file to the WordPress media library.",
            json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Local file path to upload"
                    },
                    "title": {
                        "type": "string",
                        "description": "Media title (optional)"
                    },
                    "alt_text": {
                        "type": "string",
                        "description": "Alternative text for the image (optional)"
                    }
                },
                "required": ["file_path"]
            }),
        ),
    ]
}
