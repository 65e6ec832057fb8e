//! Built-in page templates using the Tera template engine
//!
//! Templates are embedded in the binary; every page extends `layout.html`
//! and receives the shared context built by [`page_context`].

use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{Post, PostCollection};
use crate::error::Result;
use crate::helpers::{post_url, tag_url, url_for};

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("index.html", include_str!("theme/index.html")),
            ("tag.html", include_str!("theme/tag.html")),
            ("post.html", include_str!("theme/post.html")),
            ("about.html", include_str!("theme/about.html")),
            ("error.html", include_str!("theme/error.html")),
            (
                "partials/post_list.html",
                include_str!("theme/partials/post_list.html"),
            ),
        ])?;

        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        )))
    }
}

/// Context shared by every page: site metadata, navigation and the tag list
pub fn page_context(config: &SiteConfig, posts: &PostCollection) -> Context {
    let mut context = Context::new();
    context.insert("site", &SiteData::from(config));
    context.insert("home_url", &url_for(config, "/"));
    context.insert(
        "nav_links",
        &vec![
            NavLink::new("Home", url_for(config, "/")),
            NavLink::new("About", url_for(config, "/about")),
        ],
    );
    let all_tags: Vec<TagLink> = posts
        .all_tags()
        .into_iter()
        .map(|tag| TagLink::new(config, tag))
        .collect();
    context.insert("all_tags", &all_tags);
    context
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,
}

impl From<&SiteConfig> for SiteData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    pub fn new(label: &str, href: String) -> Self {
        Self {
            label: label.to_string(),
            href,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TagLink {
    pub name: String,
    pub href: String,
}

impl TagLink {
    pub fn new(config: &SiteConfig, name: &str) -> Self {
        Self {
            name: name.to_string(),
            href: tag_url(config, name),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub slug: String,
    pub title: String,
    pub url: String,
    pub date: String,
    pub formatted_date: String,
    pub excerpt: String,
    pub tags: Vec<TagLink>,
    pub content: String,
}

impl PostData {
    pub fn new(config: &SiteConfig, post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            url: post_url(config, &post.slug),
            date: post.iso_date(),
            formatted_date: post.formatted_date(),
            excerpt: post.excerpt.clone(),
            tags: post.tags.iter().map(|t| TagLink::new(config, t)).collect(),
            content: post.content.clone(),
        }
    }

    /// Summaries for a list view
    pub fn list<'a>(config: &SiteConfig, posts: impl IntoIterator<Item = &'a Post>) -> Vec<Self> {
        posts.into_iter().map(|p| Self::new(config, p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::parse_iso_date;

    fn sample_posts() -> PostCollection {
        PostCollection::from_posts(vec![Post {
            slug: "hello".to_string(),
            title: "Hello <World>".to_string(),
            date: parse_iso_date("2024-01-02").unwrap(),
            excerpt: "A first post".to_string(),
            tags: vec!["rust".to_string(), "c++".to_string()],
            content: "<p>Body <em>here</em></p>".to_string(),
        }])
        .unwrap()
    }

    #[test]
    fn test_templates_load() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_render_post_page() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let posts = sample_posts();

        let mut context = page_context(&config, &posts);
        context.insert("post", &PostData::new(&config, posts.by_slug("hello").unwrap()));
        context.insert("prev_post", &None::<PostData>);
        context.insert("next_post", &None::<PostData>);

        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.contains("<p>Body <em>here</em></p>"));
        assert!(html.contains("Hello &lt;World&gt;"));
        assert!(html.contains("January 02, 2024"));
        assert!(html.contains(r#"href="/tags/c%2B%2B""#));
        assert!(html.contains(r#"href="/about""#));
    }

    #[test]
    fn test_render_empty_list() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let posts = PostCollection::default();

        let mut context = page_context(&config, &posts);
        context.insert("posts", &Vec::<PostData>::new());
        context.insert("query", "nothing");

        let html = renderer.render("index.html", &context).unwrap();
        assert!(html.contains("No posts found"));
        assert!(html.contains(r#"value="nothing""#));
    }

    #[test]
    fn test_page_context_tags_and_nav() {
        let mut config = SiteConfig::default();
        config.root = "/blog/".to_string();
        let context = page_context(&config, &sample_posts()).into_json();

        assert_eq!(context["nav_links"][0]["href"], "/blog");
        assert_eq!(context["home_url"], "/blog");
        assert_eq!(context["nav_links"][1]["label"], "About");
        assert_eq!(context["all_tags"][0]["name"], "c++");
        assert_eq!(context["all_tags"][1]["href"], "/blog/tags/rust");
    }

    #[test]
    fn test_truncate_chars_filter() {
        let mut args = HashMap::new();
        args.insert("length".to_string(), tera::Value::from(5));
        let value = tera::Value::String("Hello world".to_string());
        let result = truncate_chars_filter(&value, &args).unwrap();
        assert_eq!(result, tera::Value::String("Hello...".to_string()));

        let short = tera::Value::String("Hi".to_string());
        assert_eq!(truncate_chars_filter(&short, &args).unwrap(), short);
    }
}
