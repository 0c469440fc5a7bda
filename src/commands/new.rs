//! Create a new article

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::fs;

use crate::content::MARKDOWN_EXTENSION;
use crate::Blog;

/// Create a new article with a front-matter scaffold.
/// Returns the path of the created file.
pub async fn create_article(blog: &Blog, title: &str, path: Option<&str>) -> Result<PathBuf> {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    fs::create_dir_all(&blog.source_dir)
        .await
        .with_context(|| format!("creating {:?}", blog.source_dir))?;

    let stem = match path {
        Some(p) => p.trim_end_matches(MARKDOWN_EXTENSION).to_string(),
        None => slug::slugify(title),
    };
    if stem.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}, use --path", title);
    }

    let file_path = blog
        .source_dir
        .join(format!("{}{}", stem, MARKDOWN_EXTENSION));

    if fs::try_exists(&file_path).await.unwrap_or(false) {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, scaffold(title, &today))
        .await
        .with_context(|| format!("writing {:?}", file_path))?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}

fn scaffold(title: &str, date: &str) -> String {
    // Quote the title so YAML never reinterprets it
    let quoted = serde_json::to_string(title).unwrap_or_else(|_| format!("\"{}\"", title));
    format!(
        "---\ntitle: {}\ndate: {}\ndescription: \ntags: []\n---\n\n",
        quoted, date
    )
}
