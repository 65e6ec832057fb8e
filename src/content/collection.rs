//! Read-only queries over the loaded posts

use std::collections::{BTreeSet, HashMap};

use super::Post;
use crate::error::{Error, Result};

/// All posts, newest first, plus a slug index
///
/// Built once at startup and never mutated, so it can be shared freely
/// between request handlers.
#[derive(Debug, Clone, Default)]
pub struct PostCollection {
    posts: Vec<Post>,
    by_slug: HashMap<String, usize>,
}

impl PostCollection {
    /// Index an already sorted list of posts
    pub fn from_posts(posts: Vec<Post>) -> Result<Self> {
        let mut by_slug = HashMap::with_capacity(posts.len());
        for (i, post) in posts.iter().enumerate() {
            if by_slug.insert(post.slug.clone(), i).is_some() {
                return Err(Error::DuplicateSlug {
                    slug: post.slug.clone(),
                });
            }
        }
        Ok(Self { posts, by_slug })
    }

    /// Every post in load order
    pub fn all(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Posts whose title or tags contain `query`, ignoring case
    ///
    /// A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Post> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.posts.iter().collect();
        }
        self.posts.iter().filter(|p| p.matches(&query)).collect()
    }

    /// Posts carrying `tag`, ignoring case
    pub fn by_tag(&self, tag: &str) -> Result<Vec<&Post>> {
        let posts: Vec<&Post> = self.posts.iter().filter(|p| p.has_tag(tag)).collect();
        if posts.is_empty() {
            return Err(Error::TagNotFound {
                tag: tag.to_string(),
            });
        }
        Ok(posts)
    }

    /// The post with exactly this slug
    pub fn by_slug(&self, slug: &str) -> Result<&Post> {
        self.by_slug
            .get(slug)
            .map(|&i| &self.posts[i])
            .ok_or_else(|| Error::PostNotFound {
                slug: slug.to_string(),
            })
    }

    /// Distinct tags across all posts, sorted
    pub fn all_tags(&self) -> Vec<&str> {
        self.posts
            .iter()
            .flat_map(|p| p.tags.iter().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct tags with the number of posts carrying each, sorted by tag
    pub fn tag_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for post in &self.posts {
            let tags: BTreeSet<&str> = post.tags.iter().map(String::as_str).collect();
            for tag in tags {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }
        let mut counts: Vec<_> = counts.into_iter().collect();
        counts.sort_by(|a, b| a.0.cmp(b.0));
        counts
    }

    /// The next newer post
    pub fn prev(&self, slug: &str) -> Option<&Post> {
        let pos = *self.by_slug.get(slug)?;
        pos.checked_sub(1).map(|i| &self.posts[i])
    }

    /// The next older post
    pub fn next(&self, slug: &str) -> Option<&Post> {
        let pos = *self.by_slug.get(slug)?;
        self.posts.get(pos + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::parse_iso_date;

    fn post(slug: &str, title: &str, date: &str, tags: &[&str]) -> Post {
        Post {
            slug: slug.to_string(),
            title: title.to_string(),
            date: parse_iso_date(date).unwrap(),
            excerpt: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            content: String::new(),
        }
    }

    fn sample() -> PostCollection {
        PostCollection::from_posts(vec![
            post("async-rust", "Async Rust", "2024-03-01", &["rust", "async"]),
            post("go-tour", "A Tour of Go", "2024-02-01", &["go", "Tutorial"]),
            post("hello", "Hello World", "2024-01-01", &["go", "rust", "go"]),
        ])
        .unwrap()
    }

    fn slugs(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.slug.clone()).collect()
    }

    #[test]
    fn test_all_keeps_order() {
        let collection = sample();
        let all: Vec<_> = collection.all().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(all, vec!["async-rust", "go-tour", "hello"]);
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn test_search_title_and_tags() {
        let collection = sample();
        assert_eq!(slugs(&collection.search("TOUR")), vec!["go-tour"]);
        assert_eq!(slugs(&collection.search("rust")), vec!["async-rust", "hello"]);
        assert_eq!(slugs(&collection.search("tutorial")), vec!["go-tour"]);
        assert!(collection.search("haskell").is_empty());
    }

    #[test]
    fn test_search_spans_joined_tags() {
        let collection = sample();
        assert_eq!(slugs(&collection.search("go tutorial")), vec!["go-tour"]);
    }

    #[test]
    fn test_blank_search_returns_all() {
        let collection = sample();
        assert_eq!(collection.search("").len(), 3);
        assert_eq!(slugs(&collection.search("   ")), slugs(&collection.search("")));
    }

    #[test]
    fn test_by_tag_ignores_case() {
        let collection = sample();
        let lower = slugs(&collection.by_tag("go").unwrap());
        let upper = slugs(&collection.by_tag("Go").unwrap());
        assert_eq!(lower, vec!["go-tour", "hello"]);
        assert_eq!(lower, upper);
        assert_eq!(slugs(&collection.by_tag("tutorial").unwrap()), vec!["go-tour"]);
    }

    #[test]
    fn test_by_tag_is_exact_match() {
        let collection = sample();
        let err = collection.by_tag("asy").unwrap_err();
        assert!(matches!(err, Error::TagNotFound { .. }));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_by_slug_is_case_sensitive() {
        let collection = sample();
        assert_eq!(collection.by_slug("hello").unwrap().title, "Hello World");
        assert!(matches!(
            collection.by_slug("Hello"),
            Err(Error::PostNotFound { .. })
        ));
    }

    #[test]
    fn test_all_tags_distinct_and_sorted() {
        let collection = sample();
        assert_eq!(
            collection.all_tags(),
            vec!["Tutorial", "async", "go", "rust"]
        );
    }

    #[test]
    fn test_tag_counts() {
        let collection = sample();
        assert_eq!(
            collection.tag_counts(),
            vec![("Tutorial", 1), ("async", 1), ("go", 2), ("rust", 2)]
        );
    }

    #[test]
    fn test_prev_next() {
        let collection = sample();
        assert!(collection.prev("async-rust").is_none());
        assert_eq!(collection.next("async-rust").unwrap().slug, "go-tour");
        assert_eq!(collection.prev("hello").unwrap().slug, "go-tour");
        assert!(collection.next("hello").is_none());
        assert!(collection.next("missing").is_none());
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let err = PostCollection::from_posts(vec![
            post("a", "One", "2024-01-01", &[]),
            post("a", "Two", "2024-01-02", &[]),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateSlug { ref slug } if slug == "a"));
    }
}
