//! Sidebar resolution.
//!
//! Turns the `[[sidebar]]` config into a navigation tree. Explicit groups pass
//! their links through untouched. Autogenerated groups mirror the folder
//! layout of the docs collection below their directory:
//!
//! ```text
//! content/docs/                       Documentation
//! ├── index.md        (order: 0)      ├── Welcome
//! ├── development/                    ├── Development
//! │   ├── setup.md                    │   ├── Releases
//! │   └── release-process.md          │   └── Local Setup
//! └── tutorials/                      └── Tutorials
//!     └── getting-started.md              └── Getting Started
//! ```
//!
//! Ordering within a level: entries with `sidebar.order` first (ascending),
//! then everything else by slug segment. Folders never carry an order. A
//! folder's `index.md` is the first link inside its group.
//! Link text is `sidebar.label` or the page title; folder labels follow the
//! topic label rule (`daily-notes` → "Daily notes").

use crate::config::{SidebarGroup, SiteConfig};
use crate::content::Entry;
use crate::naming::{label_from_slug, locale_cmp};
use crate::schema::DocFrontmatter;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarItem {
    Link {
        label: String,
        href: String,
    },
    Group {
        label: String,
        collapsed: bool,
        items: Vec<SidebarItem>,
    },
}

impl SidebarItem {
    pub fn label(&self) -> &str {
        match self {
            SidebarItem::Link { label, .. } | SidebarItem::Group { label, .. } => label,
        }
    }

    pub fn children(&self) -> &[SidebarItem] {
        match self {
            SidebarItem::Link { .. } => &[],
            SidebarItem::Group { items, .. } => items,
        }
    }
}

/// URL of a doc page. The root `index` page is the site root.
pub fn href_for_slug(slug: &str) -> String {
    if slug == "index" {
        "/".to_string()
    } else {
        format!("/{slug}/")
    }
}

/// Resolve every configured sidebar group against the docs collection.
pub fn resolve_sidebar(
    config: &SiteConfig,
    docs: &[Entry<DocFrontmatter>],
    include_drafts: bool,
) -> Vec<SidebarItem> {
    config
        .sidebar
        .iter()
        .map(|group| resolve_group(group, docs, include_drafts))
        .collect()
}

fn resolve_group(
    group: &SidebarGroup,
    docs: &[Entry<DocFrontmatter>],
    include_drafts: bool,
) -> SidebarItem {
    let items = match &group.autogenerate {
        Some(auto) => {
            // Config validation guarantees the directory points into docs
            let prefix = auto.docs_prefix().unwrap_or_default();
            autogenerate(&prefix, docs, auto.collapsed, include_drafts)
        }
        None => group
            .items
            .iter()
            .map(|link| SidebarItem::Link {
                label: link.label.clone(),
                href: link.link.clone(),
            })
            .collect(),
    };

    SidebarItem::Group {
        label: group.label.clone(),
        collapsed: group.collapsed,
        items,
    }
}

/// Sort key: explicitly ordered entries first, then by name.
#[derive(Debug, Clone)]
struct SortKey {
    order: Option<i32>,
    name: String,
}

impl SortKey {
    fn compare(&self, other: &Self) -> Ordering {
        match (self.order, other.order) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| locale_cmp(&self.name, &other.name))
    }
}

#[derive(Default)]
struct Folder<'a> {
    /// The folder's own page (`tutorials/index.md`), listed first.
    index: Option<&'a Entry<DocFrontmatter>>,
    pages: Vec<(SortKey, &'a Entry<DocFrontmatter>)>,
    folders: BTreeMap<String, Folder<'a>>,
}

impl<'a> Folder<'a> {
    fn insert(&mut self, segments: &[&str], doc: &'a Entry<DocFrontmatter>) {
        match segments {
            [] => {}
            [name] => self.pages.push((
                SortKey {
                    order: doc.data.sidebar.order,
                    name: name.to_string(),
                },
                doc,
            )),
            [folder, rest @ ..] => self
                .folders
                .entry(folder.to_string())
                .or_default()
                .insert(rest, doc),
        }
    }

    fn into_items(self, collapsed: bool) -> Vec<SidebarItem> {
        let Folder {
            index,
            pages,
            mut folders,
        } = self;
        let mut keyed: Vec<(SortKey, SidebarItem)> = Vec::new();

        for (key, doc) in pages {
            match folders.get_mut(&key.name) {
                Some(folder) if folder.index.is_none() => folder.index = Some(doc),
                _ => keyed.push((key, page_link(doc))),
            }
        }

        for (name, folder) in folders {
            keyed.push((
                SortKey {
                    order: None,
                    name: name.clone(),
                },
                SidebarItem::Group {
                    label: label_from_slug(&name),
                    collapsed,
                    items: folder.into_items(collapsed),
                },
            ));
        }

        keyed.sort_by(|(a, _), (b, _)| a.compare(b));
        index
            .map(page_link)
            .into_iter()
            .chain(keyed.into_iter().map(|(_, item)| item))
            .collect()
    }
}

fn page_link(doc: &Entry<DocFrontmatter>) -> SidebarItem {
    let label = doc
        .data
        .sidebar
        .label
        .clone()
        .unwrap_or_else(|| doc.data.title.clone());
    SidebarItem::Link {
        label,
        href: href_for_slug(&doc.slug),
    }
}

/// Build the items of one autogenerated group.
///
/// `prefix` is a slug prefix inside the docs collection; empty means the whole
/// collection. A folder's index page leads that folder's group; the index of
/// the prefix folder itself leads the returned items.
pub fn autogenerate(
    prefix: &str,
    docs: &[Entry<DocFrontmatter>],
    collapsed: bool,
    include_drafts: bool,
) -> Vec<SidebarItem> {
    let mut root = Folder::default();

    for doc in docs {
        if doc.data.sidebar.hidden || (doc.is_draft() && !include_drafts) {
            continue;
        }
        let relative = if prefix.is_empty() {
            doc.slug.as_str()
        } else if doc.slug == prefix {
            if root.index.is_none() {
                root.index = Some(doc);
            }
            continue;
        } else {
            match doc
                .slug
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('/'))
            {
                Some(rest) => rest,
                None => continue,
            }
        };
        let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
        root.insert(&segments, doc);
    }

    root.into_items(collapsed)
}
