//! Build the site

use anyhow::Result;

use crate::generator::{BuildSummary, Generator};
use crate::Blog;

/// Build the blog from scratch
pub async fn run(blog: &Blog) -> Result<BuildSummary> {
    let start = std::time::Instant::now();

    tracing::debug!(
        "Building {:?} -> {:?} (templates in {:?})",
        blog.source_dir,
        blog.output_dir,
        blog.template_dir
    );

    let generator = Generator::new(blog).await?;
    let summary = generator.generate().await?;

    if !summary.skipped.is_empty() {
        tracing::info!("Skipped {} file(s) without title or date", summary.skipped.len());
    }

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(summary)
}
