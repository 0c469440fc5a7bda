//! Page templates and placeholder substitution
//!
//! Templates are plain HTML files containing `{{NAME}}` tokens. There are no
//! loops or conditionals: the listing is assembled in Rust and substituted as
//! a single value.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tokio::fs;

use crate::config::SiteConfig;
use crate::content::ArticleRecord;
use crate::error::{BuildError, BuildResult};
use crate::helpers::{html_escape, tag_spans};

/// Post template written by `init`
pub const DEFAULT_POST_TEMPLATE: &str = include_str!("defaults/blog-post.html");
/// Listing template written by `init`
pub const DEFAULT_LIST_TEMPLATE: &str = include_str!("defaults/blog-list.html");

/// One listing entry; ends with the same indentation it starts with
const CARD_TEMPLATE: &str = r#"
    <article class="blog-card">
      <a href="{{ID}}/index.html">
        <h3 class="blog-card-title">{{TITLE}}</h3>
        <p class="blog-card-date">{{DATE_FORMATTED}}</p>
        <p class="blog-card-description">{{DESCRIPTION}}</p>
        <div class="blog-card-tags">
          {{TAGS}}
        </div>
      </a>
    </article>
  "#;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{\{([A-Z][A-Z0-9_]*)\}\}").unwrap();
}

/// How many occurrences of each placeholder get replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    All,
    First,
}

/// Replace `{{KEY}}` tokens with their mapped values in a single pass.
///
/// Substituted values are never rescanned. Tokens with no mapping are kept
/// verbatim.
pub fn substitute(template: &str, values: &HashMap<&str, String>, occurrence: Occurrence) -> String {
    let mut replaced: HashSet<String> = HashSet::new();

    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];
            match values.get(key) {
                Some(value) if occurrence == Occurrence::All || replaced.insert(key.to_string()) => {
                    value.clone()
                }
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// The post and listing templates, loaded once per build
#[derive(Debug, Clone)]
pub struct Templates {
    post: String,
    list: String,
    date_format: String,
    escape_html: bool,
}

impl Templates {
    /// Create from template text, with default rendering options
    pub fn new(post: impl Into<String>, list: impl Into<String>) -> Self {
        let defaults = SiteConfig::default();
        Self {
            post: post.into(),
            list: list.into(),
            date_format: defaults.date_format,
            escape_html: defaults.escape_html,
        }
    }

    /// Read both templates from `dir` as named in the config
    pub async fn load(dir: &Path, config: &SiteConfig) -> BuildResult<Self> {
        let post = read_template(&dir.join(&config.post_template)).await?;
        let list = read_template(&dir.join(&config.list_template)).await?;

        Ok(Self::new(post, list)
            .with_date_format(&config.date_format)
            .with_escape_html(config.escape_html))
    }

    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    pub fn with_escape_html(mut self, escape: bool) -> Self {
        self.escape_html = escape;
        self
    }

    /// Render the page of one article around its rendered markdown
    pub fn render_post(&self, article: &ArticleRecord, content_html: &str) -> String {
        let values = HashMap::from([
            ("TITLE", self.field(&article.title)),
            ("DESCRIPTION", self.field(article.description_or_title())),
            ("DATE", self.field(&article.date)),
            ("DATE_FORMATTED", self.formatted_date(article)),
            ("TAGS", self.tags(&article.tags)),
            ("CONTENT", content_html.to_string()),
        ]);
        substitute(&self.post, &values, Occurrence::All)
    }

    /// Render the listing card of one article
    pub fn render_card(&self, article: &ArticleRecord) -> String {
        let values = HashMap::from([
            ("ID", self.field(&article.id)),
            ("TITLE", self.field(&article.title)),
            ("DATE_FORMATTED", self.formatted_date(article)),
            (
                "DESCRIPTION",
                self.field(article.description.as_deref().unwrap_or("")),
            ),
            ("TAGS", self.tags(&article.tags)),
        ]);
        substitute(CARD_TEMPLATE, &values, Occurrence::All)
    }

    /// Render the listing page; articles must already be in display order
    pub fn render_listing(&self, articles: &[ArticleRecord]) -> String {
        let cards: String = articles.iter().map(|a| self.render_card(a)).collect();
        let values = HashMap::from([("ARTICLES", cards)]);
        substitute(&self.list, &values, Occurrence::First)
    }

    fn field(&self, value: &str) -> String {
        if self.escape_html {
            html_escape(value)
        } else {
            value.to_string()
        }
    }

    fn formatted_date(&self, article: &ArticleRecord) -> String {
        self.field(&article.formatted_date(&self.date_format))
    }

    fn tags(&self, tags: &[String]) -> String {
        if self.escape_html {
            let escaped: Vec<String> = tags.iter().map(|t| html_escape(t)).collect();
            tag_spans(&escaped)
        } else {
            tag_spans(tags)
        }
    }
}

async fn read_template(path: &Path) -> BuildResult<String> {
    tracing::debug!("Loading template {:?}", path);
    fs::read_to_string(path)
        .await
        .map_err(|source| BuildError::ReadTemplate {
            path: path.to_path_buf(),
            source,
        })
}
