//! Content loader - lists and reads articles from the source directory

use std::path::{Path, PathBuf};
use tokio::fs;

use super::article::MARKDOWN_EXTENSION;
use crate::error::{BuildError, BuildResult};

/// One article file as read from disk
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// File name inside the source directory
    pub filename: String,
    /// Full text, front-matter included
    pub content: String,
}

/// Loads articles from a single, flat source directory
pub struct ContentLoader {
    source_dir: PathBuf,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new<P: AsRef<Path>>(source_dir: P) -> Self {
        Self {
            source_dir: source_dir.as_ref().to_path_buf(),
        }
    }

    /// List markdown file names in directory order
    pub async fn list(&self) -> BuildResult<Vec<String>> {
        let dir_error = |source: std::io::Error| BuildError::ReadSourceDir {
            path: self.source_dir.clone(),
            source,
        };

        let mut entries = fs::read_dir(&self.source_dir).await.map_err(dir_error)?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(dir_error)? {
            let Ok(filename) = entry.file_name().into_string() else {
                tracing::debug!("Skipping non UTF-8 file name {:?}", entry.path());
                continue;
            };
            if !is_markdown_file(&filename) {
                continue;
            }
            // Follow symlinks, ignore directories named like articles
            let is_file = fs::metadata(entry.path())
                .await
                .map(|m| m.is_file())
                .unwrap_or(false);
            if is_file {
                files.push(filename);
            }
        }

        Ok(files)
    }

    /// Read a single article
    pub async fn load(&self, filename: &str) -> BuildResult<SourceDocument> {
        let path = self.source_dir.join(filename);
        tracing::debug!("Reading {:?}", path);

        let content = fs::read_to_string(&path)
            .await
            .map_err(|source| BuildError::ReadDocument { path, source })?;

        Ok(SourceDocument {
            filename: filename.to_string(),
            content,
        })
    }
}

/// Check if a file name is a markdown article
fn is_markdown_file(filename: &str) -> bool {
    filename.ends_with(MARKDOWN_EXTENSION)
}
