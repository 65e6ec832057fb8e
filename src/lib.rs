//! inkwell: a small read-only blog server
//!
//! Posts are loaded once at startup from a JSON file, their markdown bodies
//! rendered to HTML, and then served from an immutable in-memory collection.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

pub use error::Error;

/// The blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Posts file
    pub posts_path: std::path::PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_path = base_dir.join(&config.posts_file);

        Ok(Self {
            config,
            base_dir,
            posts_path,
        })
    }

    /// Load and index every post
    pub fn load_posts(&self) -> error::Result<content::PostCollection> {
        content::ContentLoader::new(self).load()
    }
}
