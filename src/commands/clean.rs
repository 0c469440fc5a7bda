//! Clean the output directory

use anyhow::{Context, Result};
use tokio::fs;

use crate::Blog;

/// Remove the output directory
pub async fn run(blog: &Blog) -> Result<()> {
    let exists = fs::try_exists(&blog.output_dir)
        .await
        .with_context(|| format!("checking {:?}", blog.output_dir))?;
    if exists {
        fs::remove_dir_all(&blog.output_dir)
            .await
            .with_context(|| format!("removing {:?}", blog.output_dir))?;
        tracing::info!("Deleted: {:?}", blog.output_dir);
    } else {
        tracing::info!("Nothing to clean at {:?}", blog.output_dir);
    }

    Ok(())
}
