//! Initialize a new blog

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

use crate::config::{SiteConfig, CONFIG_FILE};
use crate::templates::{DEFAULT_LIST_TEMPLATE, DEFAULT_POST_TEMPLATE};
use crate::Blog;

/// Initialize a blog in the given directory. Existing files are kept.
pub async fn init_site(target_dir: &Path) -> Result<Blog> {
    fs::create_dir_all(target_dir)
        .await
        .with_context(|| format!("creating {:?}", target_dir))?;

    let config_path = target_dir.join(CONFIG_FILE);
    write_if_missing(&config_path, &default_config()?).await?;

    // Respect an existing config's directory layout
    let blog = Blog::new(target_dir)?;

    fs::create_dir_all(&blog.source_dir).await?;
    fs::create_dir_all(&blog.template_dir).await?;

    write_if_missing(
        &blog.template_dir.join(&blog.config.post_template),
        DEFAULT_POST_TEMPLATE,
    )
    .await?;
    write_if_missing(
        &blog.template_dir.join(&blog.config.list_template),
        DEFAULT_LIST_TEMPLATE,
    )
    .await?;

    let today = chrono::Local::now().format("%Y-%m-%d");
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
description: The first article of this blog
tags:
  - welcome
---

Welcome! This article lives in `{}`.

## Writing

Every article needs a `title` and a `date` in its front-matter.
Articles without them are skipped.

```bash
$ blogbuild new "My New Article"
```

## Building

```bash
$ blogbuild build
```
"#,
        today,
        blog.config.source_dir
    );
    write_if_missing(&blog.source_dir.join("hello-world.md"), &sample_post).await?;

    Ok(blog)
}

fn default_config() -> Result<String> {
    Ok(format!(
        "# blogbuild configuration\n{}",
        SiteConfig::default().to_yaml()?
    ))
}

async fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if fs::try_exists(path).await.unwrap_or(false) {
        tracing::info!("Keeping existing {:?}", path);
        return Ok(());
    }
    fs::write(path, content)
        .await
        .with_context(|| format!("writing {:?}", path))?;
    tracing::debug!("Created {:?}", path);
    Ok(())
}
