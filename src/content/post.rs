//! Post model and the raw record schema it is loaded from

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::helpers;

/// A blog post
#[derive(Debug, Clone)]
pub struct Post {
    /// URL-safe unique identifier
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date
    pub date: NaiveDateTime,

    /// Plain-text summary shown in lists
    pub excerpt: String,

    /// Post tags, in source order
    pub tags: Vec<String>,

    /// Rendered HTML content
    pub content: String,
}

impl Post {
    /// Human-readable publication date, e.g. "January 02, 2024"
    pub fn formatted_date(&self) -> String {
        helpers::full_date(&self.date)
    }

    /// Publication date for a `<time datetime>` attribute
    pub fn iso_date(&self) -> String {
        helpers::date_xml(&self.date)
    }

    /// Whether any tag equals `tag`, ignoring case
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }

    /// Whether a lowercased query occurs in the title or the joined tags
    pub fn matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(query)
            || self.tags.join(" ").to_lowercase().contains(query)
    }
}

/// One record of the posts file, before validation
#[derive(Debug, Clone, Deserialize)]
pub struct RawPost {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}
