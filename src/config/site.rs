//! Site configuration (blog.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the base directory
pub const CONFIG_FILE: &str = "blog.yml";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Directory
    pub source_dir: String,
    pub template_dir: String,
    pub output_dir: String,

    // Templates
    pub post_template: String,
    pub list_template: String,

    // Rendering
    pub date_format: String,
    /// HTML-escape front-matter values before substituting them
    pub escape_html: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source_dir: "resource/blog/articles".to_string(),
            template_dir: "templates".to_string(),
            output_dir: "blog".to_string(),

            post_template: "blog-post.html".to_string(),
            list_template: "blog-list.html".to_string(),

            date_format: "YYYY年MM月DD日".to_string(),
            escape_html: false,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("reading config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config {:?}", path))?;
        Ok(config)
    }

    /// Default configuration as YAML, used when scaffolding a new site
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.source_dir, "resource/blog/articles");
        assert_eq!(config.output_dir, "blog");
        assert_eq!(config.date_format, "YYYY年MM月DD日");
        assert!(!config.escape_html);
    }

    #[test]
    fn test_parse_partial_config() {
        let yaml = r#"
source_dir: posts
output_dir: public/blog
escape_html: true
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.source_dir, "posts");
        assert_eq!(config.output_dir, "public/blog");
        assert!(config.escape_html);
        assert_eq!(config.template_dir, "templates");
        assert_eq!(config.post_template, "blog-post.html");
    }

    #[test]
    fn test_yaml_roundtrip_keeps_defaults() {
        let yaml = SiteConfig::default().to_yaml().unwrap();
        let config: SiteConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.list_template, "blog-list.html");
    }
}
