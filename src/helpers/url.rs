//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters left as-is in a single path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Generate a URL with the root path
///
/// The home page of a prefixed site is the bare prefix, which is where the
/// nested router mounts its index.
///
/// # Examples
/// ```ignore
/// url_for(&config, "/about") // -> "/blog/about"
/// url_for(&config, "/")      // -> "/blog"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        if root.is_empty() {
            "/".to_string()
        } else {
            root.to_string()
        }
    } else {
        format!("{}/{}", root, path)
    }
}

/// URL of a single post page
pub fn post_url(config: &SiteConfig, slug: &str) -> String {
    url_for(config, &format!("posts/{}", encode_segment(slug)))
}

/// URL of a tag listing page
pub fn tag_url(config: &SiteConfig, tag: &str) -> String {
    url_for(config, &format!("tags/{}", encode_segment(tag)))
}

/// Percent-encode a single URL path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.root = "/blog/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/about"), "/blog/about");
        assert_eq!(url_for(&config, ""), "/blog");
        assert_eq!(url_for(&config, "/"), "/blog");
        assert_eq!(url_for(&SiteConfig::default(), "/"), "/");
    }

    #[test]
    fn test_post_url() {
        let config = test_config();
        assert_eq!(post_url(&config, "hello-world"), "/blog/posts/hello-world");
    }

    #[test]
    fn test_tag_url_encodes() {
        let config = SiteConfig::default();
        assert_eq!(tag_url(&config, "rust"), "/tags/rust");
        assert_eq!(tag_url(&config, "c++ tips"), "/tags/c%2B%2B%20tips");
        assert_eq!(tag_url(&config, "a/b"), "/tags/a%2Fb");
    }
}
