//! Content loader - loads posts from the JSON posts file

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::post::RawPost;
use super::{MarkdownRenderer, Post, PostCollection};
use crate::error::{Error, Result};
use crate::helpers;
use crate::Blog;

/// Loads and validates the posts file
pub struct ContentLoader {
    path: PathBuf,
    renderer: MarkdownRenderer,
}

impl ContentLoader {
    /// Create a content loader for a blog
    pub fn new(blog: &Blog) -> Self {
        Self::with_renderer(
            &blog.posts_path,
            MarkdownRenderer::with_options(&blog.config.highlight),
        )
    }

    /// Create a content loader for an explicit posts file
    pub fn with_renderer<P: AsRef<Path>>(path: P, renderer: MarkdownRenderer) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            renderer,
        }
    }

    /// Load every post, newest first
    ///
    /// Loading is all-or-nothing: the first bad record fails the whole load.
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        if !self.path.exists() {
            return Err(Error::SourceNotFound {
                path: self.path.clone(),
            });
        }

        let raw = fs::read_to_string(&self.path)?;
        let records: Vec<serde_json::Value> = serde_json::from_str(&raw).map_err(|e| {
            Error::malformed(&self.path, format!("expected an array of posts: {}", e))
        })?;

        let mut seen = HashSet::new();
        let mut posts = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            let raw: RawPost = serde_json::from_value(record)
                .map_err(|e| self.record_error(index, e.to_string()))?;

            if !seen.insert(raw.slug.clone()) {
                return Err(self.record_error(index, format!("duplicate slug '{}'", raw.slug)));
            }

            posts.push(self.load_post(index, raw)?);
        }

        // Stable, so posts sharing a date keep their file order
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        tracing::info!("Loaded {} posts from {:?}", posts.len(), self.path);

        Ok(posts)
    }

    /// Load every post and index it for queries
    pub fn load(&self) -> Result<PostCollection> {
        PostCollection::from_posts(self.load_posts()?)
    }

    /// Validate one record and render its content
    fn load_post(&self, index: usize, raw: RawPost) -> Result<Post> {
        if !is_valid_slug(&raw.slug) {
            return Err(self.record_error(index, format!("invalid slug '{}'", raw.slug)));
        }

        if raw.title.trim().is_empty() {
            return Err(self.record_error(index, "empty title"));
        }

        let date = helpers::parse_iso_date(&raw.date)
            .ok_or_else(|| self.record_error(index, format!("invalid date '{}'", raw.date)))?;

        tracing::debug!("Rendering post '{}'", raw.slug);
        let content = self.renderer.render(&raw.content);

        Ok(Post {
            slug: raw.slug,
            title: raw.title,
            date,
            excerpt: raw.excerpt,
            tags: raw.tags,
            content,
        })
    }

    fn record_error(&self, index: usize, message: impl std::fmt::Display) -> Error {
        Error::malformed(&self.path, format!("record {}: {}", index, message))
    }
}

/// A slug is non-empty and made only of URL-unreserved characters
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'))
}
