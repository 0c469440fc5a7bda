//! Generator module - runs the article pipeline and writes the site

use std::path::{Path, PathBuf};
use tokio::fs;

use crate::content::{
    article_id, sort_articles, ArticleRecord, ContentLoader, FrontMatter, MarkdownRenderer,
};
use crate::error::{BuildError, BuildResult};
use crate::templates::Templates;
use crate::Blog;

/// Name of the page written for each article and for the listing
pub const INDEX_FILE: &str = "index.html";

/// Outcome of a successful build
#[derive(Debug, Clone, Default)]
pub struct BuildSummary {
    /// Ids of generated articles, in listing order
    pub generated: Vec<String>,
    /// Source files skipped for missing `title` or `date`
    pub skipped: Vec<String>,
}

/// Static site generator
pub struct Generator {
    loader: ContentLoader,
    templates: Templates,
    renderer: MarkdownRenderer,
    output: OutputWriter,
}

impl Generator {
    /// Create a generator for a site, loading its templates
    pub async fn new(blog: &Blog) -> BuildResult<Self> {
        let templates = Templates::load(&blog.template_dir, &blog.config).await?;
        Ok(Self::with_templates(
            &blog.source_dir,
            &blog.output_dir,
            templates,
        ))
    }

    /// Create a generator from already loaded templates
    pub fn with_templates(source_dir: &Path, output_dir: &Path, templates: Templates) -> Self {
        Self {
            loader: ContentLoader::new(source_dir),
            templates,
            renderer: MarkdownRenderer::new(),
            output: OutputWriter::new(output_dir),
        }
    }

    /// Generate the entire site
    pub async fn generate(&self) -> BuildResult<BuildSummary> {
        tracing::info!("Processing articles...");

        // List first so an unreadable source leaves the old output alone
        let files = self.loader.list().await?;

        self.output.reset().await?;

        let mut summary = BuildSummary::default();

        if files.is_empty() {
            tracing::warn!("No markdown files found in source directory");
            return Ok(summary);
        }

        let mut articles = Vec::new();

        for filename in &files {
            match self.generate_article(filename).await? {
                Some(article) => articles.push(article),
                None => summary.skipped.push(filename.clone()),
            }
        }

        sort_articles(&mut articles);

        let listing = self.templates.render_listing(&articles);
        self.output.write_index(&listing).await?;
        tracing::info!("Generated article listing");

        summary.generated = articles.into_iter().map(|a| a.id).collect();
        tracing::info!("Done: processed {} articles", summary.generated.len());

        Ok(summary)
    }

    /// Render and write one article. Returns `None` when it was skipped.
    async fn generate_article(&self, filename: &str) -> BuildResult<Option<ArticleRecord>> {
        let doc = self.loader.load(filename).await?;
        let (fm, body) = FrontMatter::parse(&doc.content);

        let Some(id) = article_id(&doc.filename) else {
            tracing::warn!("{}: file name gives no usable id, skipping", doc.filename);
            return Ok(None);
        };
        let Some(article) = ArticleRecord::from_front_matter(id, fm) else {
            tracing::warn!("{}: missing title or date, skipping", doc.filename);
            return Ok(None);
        };

        let content_html = self.renderer.render(body);
        let page = self.templates.render_post(&article, &content_html);
        self.output.write_article(&article.id, &page).await?;

        tracing::info!("Generated {}", article.id);
        Ok(Some(article))
    }
}

/// Owns the output directory
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Remove everything under the output directory, leaving it empty
    pub async fn reset(&self) -> BuildResult<()> {
        let exists = fs::try_exists(&self.root)
            .await
            .map_err(|source| self.error(&self.root, source))?;
        if exists {
            fs::remove_dir_all(&self.root)
                .await
                .map_err(|source| self.error(&self.root, source))?;
            tracing::debug!("Deleted: {:?}", self.root);
        }
        fs::create_dir_all(&self.root)
            .await
            .map_err(|source| self.error(&self.root, source))
    }

    /// Write `<root>/<id>/index.html`
    pub async fn write_article(&self, id: &str, html: &str) -> BuildResult<PathBuf> {
        let dir = self.root.join(id);
        fs::create_dir_all(&dir)
            .await
            .map_err(|source| self.error(&dir, source))?;
        self.write(dir.join(INDEX_FILE), html).await
    }

    /// Write `<root>/index.html`
    pub async fn write_index(&self, html: &str) -> BuildResult<PathBuf> {
        self.write(self.root.join(INDEX_FILE), html).await
    }

    async fn write(&self, path: PathBuf, html: &str) -> BuildResult<PathBuf> {
        fs::write(&path, html)
            .await
            .map_err(|source| self.error(&path, source))?;
        tracing::debug!("Generated: {:?}", path);
        Ok(path)
    }

    fn error(&self, path: &Path, source: std::io::Error) -> BuildError {
        BuildError::WriteOutput {
            path: path.to_path_buf(),
            source,
        }
    }
}
