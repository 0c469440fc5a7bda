//! Content module - handles articles, front-matter and markdown

mod article;
mod frontmatter;
pub mod loader;
mod markdown;

pub use article::{article_id, sort_articles, ArticleRecord, MARKDOWN_EXTENSION};
pub use frontmatter::FrontMatter;
pub use loader::{ContentLoader, SourceDocument};
pub use markdown::MarkdownRenderer;
