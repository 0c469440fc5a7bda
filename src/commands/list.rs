//! List articles without building

use anyhow::Result;

use crate::content::{article_id, sort_articles, ArticleRecord, ContentLoader, FrontMatter};
use crate::Blog;

/// Articles that would be published, newest first, and the files that
/// would be skipped
pub async fn collect(blog: &Blog) -> Result<(Vec<ArticleRecord>, Vec<String>)> {
    let loader = ContentLoader::new(&blog.source_dir);
    let mut articles = Vec::new();
    let mut skipped = Vec::new();

    for filename in loader.list().await? {
        let doc = loader.load(&filename).await?;
        let (fm, _) = FrontMatter::parse(&doc.content);
        let record = article_id(&doc.filename)
            .and_then(|id| ArticleRecord::from_front_matter(id, fm));
        match record {
            Some(article) => articles.push(article),
            None => skipped.push(filename),
        }
    }

    sort_articles(&mut articles);
    Ok((articles, skipped))
}

/// Print the article list
pub async fn run(blog: &Blog, json: bool) -> Result<()> {
    let (articles, skipped) = collect(blog).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&articles)?);
        return Ok(());
    }

    println!("Articles ({}):", articles.len());
    for article in &articles {
        println!(
            "  {} - {} [{}]",
            article.formatted_date(&blog.config.date_format),
            article.title,
            article.id
        );
    }

    if !skipped.is_empty() {
        println!("Skipped, missing title or date ({}):", skipped.len());
        for filename in skipped {
            println!("  {}", filename);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_collect_sorts_and_skips() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        fs::create_dir_all(&blog.source_dir).unwrap();
        fs::write(blog.source_dir.join("old.md"), "---\ntitle: Old\ndate: 2020-01-01\n---\n").unwrap();
        fs::write(blog.source_dir.join("new.md"), "---\ntitle: New\ndate: 2024-01-01\n---\n").unwrap();
        fs::write(blog.source_dir.join("wip.md"), "---\ntitle: WIP\n---\n").unwrap();

        let (articles, skipped) = collect(&blog).await.unwrap();
        let ids: Vec<_> = articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
        assert_eq!(skipped, vec!["wip.md"]);

        // Listing never writes output
        assert!(!blog.output_dir.exists());
    }

    #[test]
    fn test_json_shape() {
        let content = "---\ntitle: Hello\ndate: 2024-01-05\ntags: [a]\n---\n";
        let article =
            ArticleRecord::from_front_matter("hello", FrontMatter::parse(content).0).unwrap();
        let value = serde_json::to_value(&article).unwrap();
        assert_eq!(value["id"], "hello");
        assert_eq!(value["date"], "2024-01-05");
        assert_eq!(value["tags"][0], "a");
        assert!(value.get("published").is_none());
    }
}
