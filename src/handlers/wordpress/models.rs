//! The slices of WordPress REST resources that the tools report on, and the
//! text each tool renders from them.

use serde::Deserialize;

/// Characters of rendered content shown by `get_post`
pub const CONTENT_PREVIEW_CHARS: usize = 500;

pub const TRUNCATION_MARKER: &str = "...";

#[derive(Debug, Clone, Deserialize)]
pub struct WordPressContent {
    pub rendered: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordPressPost {
    pub id: u64,
    pub title: WordPressContent,
    pub status: String,
    #[serde(default)]
    pub date: Option<String>,
    pub link: String,
    #[serde(default)]
    pub content: Option<WordPressContent>,
}

/// A category or a tag; both share this shape.
#[derive(Debug, Clone, Deserialize)]
pub struct WordPressTerm {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordPressMedia {
    pub id: u64,
    pub title: WordPressContent,
    pub source_url: String,
}

impl WordPressPost {
    fn date(&self) -> &str {
        self.date.as_deref().unwrap_or_default()
    }

    /// `verb` is "created" or "updated".
    pub fn render_saved(&self, verb: &str) -> String {
        format!(
            "Post {} successfully!\nID: {}\nTitle: {}\nStatus: {}\nURL: {}",
            verb, self.id, self.title.rendered, self.status, self.link
        )
    }

    pub fn render_details(&self) -> String {
        let content = self
            .content
            .as_ref()
            .map(|c| c.rendered.as_str())
            .unwrap_or_default();
        format!(
            "Post Details:\nID: {}\nTitle: {}\nStatus: {}\nDate: {}\nURL: {}\n\nContent Preview:\n{}",
            self.id,
            self.title.rendered,
            self.status,
            self.date(),
            self.link,
            content_preview(content)
        )
    }

    pub fn render_summary(&self) -> String {
        format!(
            "ID: {}\nTitle: {}\nStatus: {}\nDate: {}\nURL: {}",
            self.id,
            self.title.rendered,
            self.status,
            self.date(),
            self.link
        )
    }
}

impl WordPressTerm {
    pub fn render_line(&self) -> String {
        format!(
            "ID: {} - {} (Slug: {}, Count: {})",
            self.id, self.name, self.slug, self.count
        )
    }
}

impl WordPressMedia {
    pub fn render_uploaded(&self) -> String {
        format!(
            "Media uploaded successfully!\nID: {}\nTitle: {}\nURL: {}",
            self.id, self.title.rendered, self.source_url
        )
    }
}

pub fn render_post_list(posts: &[WordPressPost]) -> String {
    let entries = posts
        .iter()
        .map(WordPressPost::render_summary)
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("Found {} posts:\n\n{}", posts.len(), entries)
}

/// `heading` is "Categories" or "Tags".
pub fn render_term_list(heading: &str, terms: &[WordPressTerm]) -> String {
    let lines = terms
        .iter()
        .map(WordPressTerm::render_line)
        .collect::<Vec<_>>()
        .join("\n");
    format!("WordPress {}:\n\n{}", heading, lines)
}

pub fn render_deleted(post_id: u64, force: bool) -> String {
    let action = if force {
        "permanently deleted"
    } else {
        "moved to trash"
    };
    format!("Post {} has been {} successfully.", post_id, action)
}

/// First [`CONTENT_PREVIEW_CHARS`] characters, plus a marker if anything was cut.
pub fn content_preview(content: &str) -> String {
    match content.char_indices().nth(CONTENT_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &content[..cut], TRUNCATION_MARKER),
        None => content.to_string(),
    }
}
