//! One async function per tool: parse arguments, make the REST call(s),
//! render the response.

use futures::future::BoxFuture;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::args::{
    self, Arguments, CreatePostArgs, DeletePostArgs, ListPostsArgs, ListTermsArgs, PostIdArgs,
    PostPayload, UpdatePostArgs, UploadMediaArgs,
};
use super::client::WordPressClient;
use super::models::{self, WordPressMedia, WordPressPost, WordPressTerm};
use crate::error::{Error, Result};

pub type ToolFuture<'a> = BoxFuture<'a, Result<String>>;

/// Signature shared by every registered tool
pub type ToolFn = for<'a> fn(&'a WordPressClient, Arguments) -> ToolFuture<'a>;

pub fn create_post(client: &WordPressClient, arguments: Arguments) -> ToolFuture<'_> {
    Box::pin(async move {
        let parsed: CreatePostArgs = args::parse(arguments)?;
        let payload = PostPayload::from(parsed);
        let post: WordPressPost = client.post_json("posts", &payload).await?;
        info!(post_id = post.id, "Post created");
        Ok(post.render_saved("created"))
    })
}

pub fn update_post(client: &WordPressClient, arguments: Arguments) -> ToolFuture<'_> {
    Box::pin(async move {
        let parsed: UpdatePostArgs = args::parse(arguments)?;
        let (post_id, payload) = parsed.into_parts();
        let post: WordPressPost = client
            .post_json(&format!("posts/{}", post_id), &payload)
            .await?;
        info!(post_id = post.id, "Post updated");
        Ok(post.render_saved("updated"))
    })
}

pub fn get_post(client: &WordPressClient, arguments: Arguments) -> ToolFuture<'_> {
    Box::pin(async move {
        let parsed: PostIdArgs = args::parse(arguments)?;
        let post: WordPressPost = client
            .get(&format!("posts/{}", parsed.post_id), Vec::new())
            .await?;
        Ok(post.render_details())
    })
}

pub fn list_posts(client: &WordPressClient, arguments: Arguments) -> ToolFuture<'_> {
    Box::pin(async move {
        let parsed: ListPostsArgs = args::parse(arguments)?;
        let posts: Vec<WordPressPost> = client.get("posts", parsed.query()).await?;
        Ok(models::render_post_list(&posts))
    })
}

pub fn delete_post(client: &WordPressClient, arguments: Arguments) -> ToolFuture<'_> {
    Box::pin(async move {
        let parsed: DeletePostArgs = args::parse(arguments)?;
        client
            .delete(&format!("posts/{}", parsed.post_id), parsed.query())
            .await?;
        info!(post_id = parsed.post_id, force = parsed.force, "Post deleted");
        Ok(models::render_deleted(parsed.post_id, parsed.force))
    })
}

pub fn list_categories(client: &WordPressClient, arguments: Arguments) -> ToolFuture<'_> {
    Box::pin(async move {
        let parsed: ListTermsArgs = args::parse(arguments)?;
        let terms: Vec<WordPressTerm> = client.get("categories", parsed.query()).await?;
        Ok(models::render_term_list("Categories", &terms))
    })
}

pub fn list_tags(client: &WordPressClient, arguments: Arguments) -> ToolFuture<'_> {
    Box::pin(async move {
        let parsed: ListTermsArgs = args::parse(arguments)?;
        let terms: Vec<WordPressTerm> = client.get("tags", parsed.query()).await?;
        Ok(models::render_term_list("Tags", &terms))
    })
}

/// Upload, then set title/alt text on the new item if either was given.
///
/// The second request has no compensation: if it fails the media item stays
/// in the library without its metadata and the failure is the tool result.
pub fn upload_media(client: &WordPressClient, arguments: Arguments) -> ToolFuture<'_> {
    Box::pin(async move {
        let parsed: UploadMediaArgs = args::parse(arguments)?;
        let path = PathBuf::from(&parsed.file_path);

        let data = tokio::fs::read(&path).await.map_err(|source| Error::FileRead {
            path: path.clone(),
            source,
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| parsed.file_path.clone());

        info!(file = %filename, bytes = data.len(), "Uploading media");
        let media: WordPressMedia = client
            .upload("media", data, &filename, content_type_for(&path))
            .await?;

        if let Some(metadata) = parsed.metadata() {
            let updated: Result<serde_json::Value> = client
                .post_json(&format!("media/{}", media.id), &metadata)
                .await;
            if let Err(e) = updated {
                warn!(
                    media_id = media.id,
                    "Media uploaded but metadata update failed; the upload is kept"
                );
                return Err(e);
            }
        }

        Ok(media.render_uploaded())
    })
}

/// MIME type from the file extension, `application/octet-stream` when unknown.
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("avif") => "image/avif",
        Some("heic") => "image/heic",
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("ppt") => "application/vnd.ms-powerpoint",
        Some("pptx") => {
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        }
        Some("zip") => "application/zip",
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        Some("mp4") | Some("m4v") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for(Path::new("/tmp/cat.PNG")), "image/png");
        assert_eq!(content_type_for(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("report.pdf")), "application/pdf");
        assert_eq!(content_type_for(Path::new("README")), "application/octet-stream");
        assert_eq!(content_type_for(Path::new("archive.tar.xz")), "application/octet-stream");
    }
}
