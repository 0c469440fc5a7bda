//! Front-matter parsing

use anyhow::{anyhow, Result};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

lazy_static! {
    /// Opening fence, optionally followed by a language tag (`---json`)
    static ref OPEN_FENCE: Regex = Regex::new(r"^---[ \t]*([A-Za-z]*)[ \t]*\r?\n").unwrap();
}

/// Accepts any scalar and keeps its textual form
struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Option<String>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(Some(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// A scalar list element
struct Scalar(Option<String>);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarVisitor).map(Scalar)
    }
}

/// Custom deserializer for scalar fields that may be written unquoted
/// (`title: 2024`, `date: 2024-01-05`)
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ScalarVisitor)
}

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
            Ok(vec![value])
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(Scalar(item)) = seq.next_element::<Scalar>()? {
                if let Some(item) = item {
                    vec.push(item);
                }
            }
            Ok(vec)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter data from an article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,

    /// Additional custom fields, in file order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Split front-matter from content.
    /// Returns (front_matter, remaining_content).
    ///
    /// Content without a well-formed header comes back untouched with an
    /// empty front-matter.
    pub fn parse(content: &str) -> (Self, &str) {
        let text = content.strip_prefix('\u{feff}').unwrap_or(content);

        let Some(open) = OPEN_FENCE.captures(text) else {
            return (FrontMatter::default(), content);
        };
        let lang = open.get(1).map_or("", |m| m.as_str()).to_ascii_lowercase();
        let rest = &text[open.get(0).map_or(0, |m| m.end())..];

        // Find the closing --- line
        let mut offset = 0;
        let mut split = None;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == "---" {
                split = Some((&rest[..offset], &rest[offset + line.len()..]));
                break;
            }
            offset += line.len();
        }

        let Some((header, body)) = split else {
            tracing::debug!("Front-matter fence is never closed, treating as content");
            return (FrontMatter::default(), content);
        };
        let body = body.trim_start_matches(['\n', '\r']);

        if header.trim().is_empty() {
            return (FrontMatter::default(), body);
        }

        match Self::parse_header(&lang, header) {
            Ok(fm) => (fm, body),
            Err(e) => {
                tracing::warn!("Failed to parse front-matter, treating as content: {}", e);
                (FrontMatter::default(), content)
            }
        }
    }

    fn parse_header(lang: &str, header: &str) -> Result<Self> {
        let value: serde_yaml::Value = match lang {
            "" | "yaml" | "yml" => serde_yaml::from_str(header)?,
            "json" => serde_json::from_str(header)?,
            "toml" => toml_to_yaml(toml::Value::Table(toml::from_str(header)?)),
            other => return Err(anyhow!("unsupported front-matter language {:?}", other)),
        };

        match value {
            serde_yaml::Value::Null => Ok(FrontMatter::default()),
            serde_yaml::Value::Mapping(map) => Ok(serde_yaml::from_value(
                serde_yaml::Value::Mapping(string_keys(map)),
            )?),
            _ => Err(anyhow!("front-matter is not a key/value mapping")),
        }
    }

    /// Title, unless missing or empty
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    /// Date as written, unless missing or empty
    pub fn date(&self) -> Option<&str> {
        non_empty(&self.date)
    }

    /// Description, unless missing or empty
    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// YAML allows `2024:` or `true:` as keys; keep them as text so they land in
/// `extra` instead of rejecting the whole header
fn string_keys(map: serde_yaml::Mapping) -> serde_yaml::Mapping {
    use serde_yaml::Value;

    map.into_iter()
        .map(|(key, value)| {
            let key = match key {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => "null".to_string(),
                other => serde_yaml::to_string(&other)
                    .map(|s| s.trim_end().to_string())
                    .unwrap_or_default(),
            };
            (Value::String(key), value)
        })
        .collect()
}

/// TOML dates become plain strings so every language yields the same shape
fn toml_to_yaml(value: toml::Value) -> serde_yaml::Value {
    use serde_yaml::Value;

    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Value::Number(f.into()),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Sequence(items.into_iter().map(toml_to_yaml).collect()),
        toml::Value::Table(table) => Value::Mapping(
            table
                .into_iter()
                .map(|(k, v)| (Value::String(k), toml_to_yaml(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
description: First post
tags:
  - rust
  - blog
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title(), Some("Hello World"));
        assert_eq!(fm.date(), Some("2024-01-15"));
        assert_eq!(fm.description(), Some("First post"));
        assert_eq!(fm.tags, vec!["rust", "blog"]);
        assert_eq!(remaining, "This is the content.\n");
    }

    #[test]
    fn test_parse_single_string_tag() {
        let content = "---\ntitle: One Tag\ndate: 2024-01-15\ntags: Notes\n---\nBody\n";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.tags, vec!["Notes"]);
    }

    #[test]
    fn test_unquoted_scalars_become_text() {
        let content = "---\ntitle: 2024\ndate: 2024-01-15 10:30:00\ntags: [1, two]\n---\n";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title(), Some("2024"));
        assert_eq!(fm.date(), Some("2024-01-15 10:30:00"));
        assert_eq!(fm.tags, vec!["1", "two"]);
        assert_eq!(remaining, "");
    }

    #[test]
    fn test_extra_fields_keep_order() {
        let content = "---\ntitle: T\nzebra: 1\napple: 2\n---\n";
        let (fm, _) = FrontMatter::parse(content);
        let keys: Vec<_> = fm.extra.keys().cloned().collect();
        assert_eq!(keys, vec!["zebra", "apple"]);
    }

    #[test]
    fn test_non_string_keys_keep_known_fields() {
        let content = "---\ntitle: T\ndate: 2024-01-01\n2024: x\ntrue: y\n---\nB\n";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title(), Some("T"));
        assert_eq!(fm.date(), Some("2024-01-01"));
        assert_eq!(fm.extra.keys().collect::<Vec<_>>(), vec!["2024", "true"]);
        assert_eq!(remaining, "B\n");
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = "---json\n{\"title\": \"Json Post\", \"date\": \"2024-02-01\", \"tags\": [\"a\", \"b\"]}\n---\n\nBody\n";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title(), Some("Json Post"));
        assert_eq!(fm.tags, vec!["a", "b"]);
        assert_eq!(remaining, "Body\n");
    }

    #[test]
    fn test_parse_toml_frontmatter() {
        let content = "---toml\ntitle = \"Toml Post\"\ndate = 2024-03-04\ntags = [\"x\"]\n---\nBody\n";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title(), Some("Toml Post"));
        assert_eq!(fm.date(), Some("2024-03-04"));
        assert_eq!(fm.tags, vec!["x"]);
        assert_eq!(remaining, "Body\n");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just markdown\n\nNo header here.\n";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title(), None);
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_fence_must_open_the_file() {
        let content = "\n---\ntitle: Late\n---\nBody\n";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title(), None);
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_unclosed_fence() {
        let content = "---\ntitle: Never closed\n\nBody\n";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title(), None);
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_malformed_yaml_is_not_fatal() {
        let content = "---\ntitle: [unclosed\n---\nBody\n";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title(), None);
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_prose_header_is_not_metadata() {
        let content = "---\njust a sentence\n---\nBody\n";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title(), None);
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_empty_title_counts_as_missing() {
        let content = "---\ntitle: \"\"\ndate:\n---\nBody\n";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title(), None);
        assert_eq!(fm.date(), None);
        assert_eq!(remaining, "Body\n");
    }

    #[test]
    fn test_byte_order_mark_and_crlf() {
        let content = "\u{feff}---\r\ntitle: Windows\r\ndate: 2024-01-01\r\n---\r\nBody\r\n";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title(), Some("Windows"));
        assert_eq!(remaining, "Body\r\n");
    }
}
