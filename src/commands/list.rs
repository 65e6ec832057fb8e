//! List site content

use anyhow::Result;
use std::io::Write;

use crate::content::PostCollection;
use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let posts = blog.load_posts()?;
    let stdout = std::io::stdout();
    write_listing(&mut stdout.lock(), &posts, content_type)
}

/// Write a listing of posts or tags
pub fn write_listing<W: Write>(
    out: &mut W,
    posts: &PostCollection,
    content_type: &str,
) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            writeln!(out, "Posts ({}):", posts.len())?;
            for post in posts.all() {
                writeln!(
                    out,
                    "  {} - {} [{}]",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.slug
                )?;
            }
        }
        "tag" | "tags" => {
            let mut tags = posts.tag_counts();
            writeln!(out, "Tags ({}):", tags.len())?;
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            for (tag, count) in tags {
                writeln!(out, "  {} ({})", tag, count)?;
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(())
}
