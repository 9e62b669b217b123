//! Topic registry.
//!
//! Topics are the categories a reader browses by. There are two sources:
//!
//! - the static table [`TOPICS`], which names the curated categories of both
//!   collections;
//! - [`derive_doc_topics`], which infers doc categories from the first folder
//!   of each doc's slug so new folders show up without editing the table.
//!
//! Lookups never fail. A missing topic is `None`, an empty scan is an empty list.

use crate::content::{ContentError, Entry, get_docs};
use crate::naming::{first_segment, label_from_slug, locale_cmp};
use crate::schema::Collection;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    pub slug: Cow<'static, str>,
    pub label: Cow<'static, str>,
    #[serde(rename = "type")]
    pub kind: Collection,
}

impl Topic {
    pub const fn new(slug: &'static str, label: &'static str, kind: Collection) -> Self {
        Self {
            slug: Cow::Borrowed(slug),
            label: Cow::Borrowed(label),
            kind,
        }
    }
}

/// Curated topics, in display order. Slugs are unique.
pub const TOPICS: &[Topic] = &[
    Topic::new("tutorials", "Tutorials", Collection::Docs),
    Topic::new("development", "Development", Collection::Docs),
    Topic::new("devlog", "Dev Log", Collection::Blog),
    Topic::new("daily-life", "Daily Life", Collection::Blog),
];

/// Anything addressable by a slug.
pub trait Slugged {
    fn slug(&self) -> &str;
}

impl Slugged for str {
    fn slug(&self) -> &str {
        self
    }
}

impl Slugged for String {
    fn slug(&self) -> &str {
        self
    }
}

impl<T: Slugged + ?Sized> Slugged for &T {
    fn slug(&self) -> &str {
        (**self).slug()
    }
}

impl<S> Slugged for Entry<S> {
    fn slug(&self) -> &str {
        &self.slug
    }
}

pub fn topic_by_slug(slug: &str) -> Option<&'static Topic> {
    TOPICS.iter().find(|topic| topic.slug == slug)
}

pub fn doc_topics() -> Vec<&'static Topic> {
    topics_of(Collection::Docs)
}

pub fn blog_topics() -> Vec<&'static Topic> {
    topics_of(Collection::Blog)
}

fn topics_of(kind: Collection) -> Vec<&'static Topic> {
    TOPICS.iter().filter(|topic| topic.kind == kind).collect()
}

/// Infer doc topics from the top-level folders of a set of documents.
///
/// Each distinct first slug segment becomes one topic, labelled with
/// [`label_from_slug`] and sorted by label with [`locale_cmp`].
/// A slug without `/` is its own first segment; an empty one is skipped.
pub fn derive_doc_topics<I>(docs: I) -> Vec<Topic>
where
    I: IntoIterator,
    I::Item: Slugged,
{
    let segments: BTreeSet<String> = docs
        .into_iter()
        .filter_map(|doc| {
            let segment = first_segment(doc.slug());
            (!segment.is_empty()).then(|| segment.to_string())
        })
        .collect();

    let mut topics: Vec<Topic> = segments
        .into_iter()
        .map(|slug| Topic {
            label: Cow::Owned(label_from_slug(&slug)),
            slug: Cow::Owned(slug),
            kind: Collection::Docs,
        })
        .collect();

    topics.sort_by(|a, b| locale_cmp(&a.label, &b.label));
    topics
}

/// Load the docs collection and derive its topics.
///
/// Every entry counts, drafts included.
pub fn doc_topics_from_collection(content_dir: &Path) -> Result<Vec<Topic>, ContentError> {
    let docs = get_docs(content_dir)?;
    Ok(derive_doc_topics(&docs))
}
