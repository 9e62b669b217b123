//! Front matter schemas for the two content collections.
//!
//! | Collection | Schema | Directory |
//! |------------|--------|-----------|
//! | `docs` | [`DocFrontmatter`] | `<content_dir>/docs/` |
//! | `blog` | [`BlogFrontmatter`] | `<content_dir>/blog/` |
//!
//! Unknown keys are ignored so theme-specific metadata can live alongside the
//! fields validated here.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A content collection. Also used as the `type` tag of a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Docs,
    Blog,
}

impl Collection {
    /// Directory name under the content root.
    pub const fn name(self) -> &'static str {
        match self {
            Collection::Docs => "docs",
            Collection::Blog => "blog",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Binds a front matter schema to the collection it validates.
pub trait CollectionSchema: DeserializeOwned + Serialize + Send {
    const COLLECTION: Collection;

    fn title(&self) -> &str;

    fn is_draft(&self) -> bool;

    fn tags(&self) -> &[String];
}

/// Page layout for a doc.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Doc,
    /// Wide layout without sidebars, used for landing pages.
    Splash,
}

/// Per-page sidebar overrides for autogenerated groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarMeta {
    /// Link text, defaults to the page title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Lower sorts first; unordered pages come after ordered ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    /// Keep the page out of autogenerated groups.
    pub hidden: bool,
}

/// Front matter of an entry in the `docs` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocFrontmatter {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub template: Template,
    #[serde(default)]
    pub sidebar: SidebarMeta,
    #[serde(default)]
    pub draft: bool,
    /// Whether the page is included in the search index.
    #[serde(default = "default_true")]
    pub pagefind: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl CollectionSchema for DocFrontmatter {
    const COLLECTION: Collection = Collection::Docs;

    fn title(&self) -> &str {
        &self.title
    }

    fn is_draft(&self) -> bool {
        self.draft
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Front matter of an entry in the `blog` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogFrontmatter {
    pub title: String,
    #[serde(deserialize_with = "coerce_date::deserialize")]
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub draft: bool,
}

impl CollectionSchema for BlogFrontmatter {
    const COLLECTION: Collection = Collection::Blog;

    fn title(&self) -> &str {
        &self.title
    }

    fn is_draft(&self) -> bool {
        self.draft
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Parse a date the way front matter authors write them.
///
/// - `2024-01-15` → midnight UTC
/// - `2024-01-15T10:30:00+02:00` → converted to UTC
/// - `2024-01-15T10:30:00` / `2024-01-15T10:30` / `2024-01-15 10:30:00` → taken as UTC
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// Lenient date deserialization: strings via [`parse_date`], integers as
/// milliseconds since the Unix epoch.
pub mod coerce_date {
    use super::parse_date;
    use chrono::{DateTime, Utc};
    use serde::Deserializer;
    use serde::de::{self, Visitor};
    use std::fmt;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DateVisitor)
    }

    struct DateVisitor;

    impl<'de> Visitor<'de> for DateVisitor {
        type Value = DateTime<Utc>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a date string or a millisecond timestamp")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            parse_date(v).ok_or_else(|| E::custom(format!("Invalid date: {v:?}")))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            DateTime::from_timestamp_millis(v)
                .ok_or_else(|| E::custom(format!("Invalid date: {v} is out of range")))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            let ms = i64::try_from(v)
                .map_err(|_| E::custom(format!("Invalid date: {v} is out of range")))?;
            self.visit_i64(ms)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            if !v.is_finite() {
                return Err(E::custom("Invalid date: not a finite number"));
            }
            self.visit_i64(v.trunc() as i64)
        }
    }
}
