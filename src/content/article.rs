//! Article model

use chrono::NaiveDateTime;
use serde::Serialize;

use super::FrontMatter;
use crate::helpers;

/// Extension that marks a source file as an article
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Summary of one accepted article
#[derive(Debug, Clone, Serialize)]
pub struct ArticleRecord {
    /// Output directory name (file name without extension)
    pub id: String,

    /// Article title
    pub title: String,

    /// Date exactly as written in the front-matter
    pub date: String,

    /// Optional description
    pub description: Option<String>,

    /// Tags, in front-matter order
    pub tags: Vec<String>,

    /// Parsed date, used for ordering
    #[serde(skip)]
    pub published: Option<NaiveDateTime>,
}

impl ArticleRecord {
    /// Build a record from parsed front-matter.
    ///
    /// Returns `None` unless both `title` and `date` are present and
    /// non-empty.
    pub fn from_front_matter(id: &str, fm: FrontMatter) -> Option<Self> {
        let title = fm.title()?.to_string();
        let date = fm.date()?.to_string();
        let description = fm.description().map(str::to_string);

        Some(Self {
            id: id.to_string(),
            published: helpers::parse_date(&date),
            title,
            date,
            description,
            tags: fm.tags,
        })
    }

    /// Description, falling back to the title
    pub fn description_or_title(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.title)
    }

    /// Date rendered with a Moment-style pattern, or `Invalid Date`
    pub fn formatted_date(&self, format: &str) -> String {
        match &self.published {
            Some(date) => helpers::format_date(date, format),
            None => helpers::INVALID_DATE.to_string(),
        }
    }
}

/// Derive the article id from its file name. `None` when the id would not
/// name a directory of its own (`.md`, `..md`, `...md`).
pub fn article_id(filename: &str) -> Option<&str> {
    let id = filename
        .strip_suffix(MARKDOWN_EXTENSION)
        .unwrap_or(filename);
    match id {
        "" | "." | ".." => None,
        _ => Some(id),
    }
}

/// Sort by date descending (newest first). Dates that do not parse go last;
/// the sort is stable.
pub fn sort_articles(articles: &mut [ArticleRecord]) {
    articles.sort_by(|a, b| b.published.cmp(&a.published));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_matter(yaml: &str) -> FrontMatter {
        let content = format!("---\n{}\n---\n", yaml);
        FrontMatter::parse(&content).0
    }

    fn record(id: &str, date: &str) -> ArticleRecord {
        let fm = front_matter(&format!("title: {}\ndate: {}", id, date));
        ArticleRecord::from_front_matter(id, fm).unwrap()
    }

    #[test]
    fn test_requires_title_and_date() {
        assert!(ArticleRecord::from_front_matter("a", front_matter("title: Only title")).is_none());
        assert!(ArticleRecord::from_front_matter("b", front_matter("date: 2024-01-01")).is_none());
        assert!(ArticleRecord::from_front_matter("c", FrontMatter::default()).is_none());
        assert!(
            ArticleRecord::from_front_matter("d", front_matter("title: ''\ndate: 2024-01-01"))
                .is_none()
        );
    }

    #[test]
    fn test_description_fallback() {
        let fm = front_matter("title: Hello\ndate: 2024-01-05");
        let article = ArticleRecord::from_front_matter("hello", fm).unwrap();
        assert_eq!(article.description, None);
        assert_eq!(article.description_or_title(), "Hello");

        let fm = front_matter("title: Hello\ndate: 2024-01-05\ndescription: Greetings");
        let article = ArticleRecord::from_front_matter("hello", fm).unwrap();
        assert_eq!(article.description_or_title(), "Greetings");
    }

    #[test]
    fn test_formatted_date() {
        let article = record("hello", "2024-01-05");
        assert_eq!(article.formatted_date("YYYY年MM月DD日"), "2024年01月05日");

        let article = record("broken", "someday");
        assert_eq!(article.date, "someday");
        assert_eq!(article.formatted_date("YYYY年MM月DD日"), "Invalid Date");
    }

    #[test]
    fn test_article_id() {
        assert_eq!(article_id("hello.md"), Some("hello"));
        assert_eq!(article_id("notes.v2.md"), Some("notes.v2"));
        assert_eq!(article_id("README"), Some("README"));
    }

    #[test]
    fn test_article_id_must_name_a_directory() {
        assert_eq!(article_id(".md"), None);
        assert_eq!(article_id("..md"), None);
        assert_eq!(article_id("...md"), None);
        assert_eq!(article_id("....md"), Some("..."));
    }

    #[test]
    fn test_sort_newest_first() {
        let mut articles = vec![
            record("middle", "2024-02-01"),
            record("oldest", "2023-12-31"),
            record("newest", "2024-03-15 08:00"),
        ];
        sort_articles(&mut articles);
        let ids: Vec<_> = articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["newest", "middle", "oldest"]);
    }

    #[test]
    fn test_unparseable_dates_sort_last() {
        let mut articles = vec![
            record("broken", "tomorrow"),
            record("old", "2020-01-01"),
            record("new", "2024-01-01"),
        ];
        sort_articles(&mut articles);
        let ids: Vec<_> = articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old", "broken"]);
    }
}
