//! blogbuild: turns a folder of Markdown articles into a static blog
//!
//! Each article carries a YAML (or JSON/TOML) front-matter header with a
//! `title` and a `date`. Articles are rendered into a post template, and a
//! listing page links them newest first.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use error::BuildError;
pub use generator::BuildSummary;

/// The blog being built
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the markdown articles
    pub source_dir: PathBuf,
    /// Directory holding the post and listing templates
    pub template_dir: PathBuf,
    /// Output directory, replaced on every build
    pub output_dir: PathBuf,
}

impl Blog {
    /// Open a blog rooted at a directory, reading `blog.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(config::CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Build from an explicit configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let source_dir = base_dir.join(&config.source_dir);
        let template_dir = base_dir.join(&config.template_dir);
        let output_dir = base_dir.join(&config.output_dir);

        Self {
            config,
            base_dir,
            source_dir,
            template_dir,
            output_dir,
        }
    }

    /// Override the article directory
    pub fn set_source_dir<P: AsRef<Path>>(&mut self, dir: P) {
        self.source_dir = self.base_dir.join(dir);
    }

    /// Override the output directory
    pub fn set_output_dir<P: AsRef<Path>>(&mut self, dir: P) {
        self.output_dir = self.base_dir.join(dir);
    }

    /// Build the site
    pub async fn build(&self) -> Result<BuildSummary> {
        commands::build::run(self).await
    }

    /// Remove the output directory
    pub async fn clean(&self) -> Result<()> {
        commands::clean::run(self).await
    }
}
