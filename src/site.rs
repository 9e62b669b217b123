//! Whole-site loading and manifest generation.
//!
//! Loads the config and both collections in one go and assembles the
//! [`Manifest`] a renderer consumes: validated entries, topics, the resolved
//! sidebar, and blog tag counts. The manifest is plain JSON so it can be
//! inspected by hand.

use crate::config::{self, ConfigError, SiteConfig};
use crate::content::{self, ContentError, Entry};
use crate::schema::{BlogFrontmatter, DocFrontmatter};
use crate::sidebar::{SidebarItem, resolve_sidebar};
use crate::topics::{Topic, blog_topics, derive_doc_topics};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
}

/// Config plus every entry of both collections, drafts included.
#[derive(Debug)]
pub struct Site {
    pub config: SiteConfig,
    pub content_dir: PathBuf,
    pub docs: Vec<Entry<DocFrontmatter>>,
    pub blog: Vec<Entry<BlogFrontmatter>>,
}

#[derive(Debug, Serialize)]
pub struct TopicIndex {
    /// Derived from the docs collection folders.
    pub docs: Vec<Topic>,
    /// The curated blog topics.
    pub blog: Vec<Topic>,
}

#[derive(Debug, Serialize)]
pub struct Manifest {
    pub config: SiteConfig,
    pub docs: Vec<Entry<DocFrontmatter>>,
    /// Newest first.
    pub blog: Vec<Entry<BlogFrontmatter>>,
    pub topics: TopicIndex,
    pub sidebar: Vec<SidebarItem>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, usize>,
}

/// Load `config.toml` from the site root, then both collections from its
/// content directory.
pub fn load_site(root: &Path) -> Result<Site, SiteError> {
    let config = config::load_config(root)?;
    let content_dir = config.content_path(root);
    let docs = content::get_docs(&content_dir)?;
    let blog = content::get_blog(&content_dir)?;
    Ok(Site {
        config,
        content_dir,
        docs,
        blog,
    })
}

impl Site {
    /// Assemble the manifest. Drafts are dropped unless `include_drafts`.
    ///
    /// Derived doc topics always see every doc, drafts included, so a
    /// folder holding only drafts still has a topic.
    pub fn into_manifest(self, include_drafts: bool) -> Manifest {
        let doc_topics = derive_doc_topics(&self.docs);

        let (docs, mut blog) = if include_drafts {
            (self.docs, self.blog)
        } else {
            (content::published(self.docs), content::published(self.blog))
        };
        content::sort_by_date(&mut blog);

        let sidebar = resolve_sidebar(&self.config, &docs, include_drafts);
        let tags = content::tag_counts(&blog);

        Manifest {
            config: self.config,
            docs,
            blog,
            topics: TopicIndex {
                docs: doc_topics,
                blog: blog_topics().into_iter().cloned().collect(),
            },
            sidebar,
            tags,
        }
    }
}

/// Default manifest location, relative to the site root.
pub const DEFAULT_MANIFEST_PATH: &str = ".docblog/manifest.json";

/// Where to write the manifest. Relative paths are taken from the site root.
pub fn manifest_path(root: &Path, out: &Path) -> PathBuf {
    if out.is_absolute() {
        out.to_path_buf()
    } else {
        root.join(out)
    }
}

/// Load the site and build its manifest.
pub fn build_manifest(root: &Path, include_drafts: bool) -> Result<Manifest, SiteError> {
    Ok(load_site(root)?.into_manifest(include_drafts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_site_reads_config_and_collections() {
        let tmp = setup_fixtures();
        let site = load_site(tmp.path()).unwrap();
        assert_eq!(site.config.title, "Field Notes");
        assert_eq!(site.content_dir, tmp.path().join("content"));
        assert_eq!(site.docs.len(), 8);
        assert_eq!(site.blog.len(), 3);
    }

    #[test]
    fn manifest_excludes_drafts_by_default() {
        let tmp = setup_fixtures();
        let manifest = build_manifest(tmp.path(), false).unwrap();
        assert!(manifest.docs.iter().all(|d| !d.is_draft()));
        let slugs: Vec<&str> = manifest.blog.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["devlog/week-1", "hello-world"]);
    }

    #[test]
    fn manifest_with_drafts_keeps_everything() {
        let tmp = setup_fixtures();
        let manifest = build_manifest(tmp.path(), true).unwrap();
        assert_eq!(manifest.docs.len(), 8);
        assert_eq!(manifest.blog[0].slug, "daily-life/coffee");
    }

    #[test]
    fn manifest_topics() {
        let tmp = setup_fixtures();
        let manifest = build_manifest(tmp.path(), false).unwrap();
        assert_eq!(
            topic_labels(&manifest.topics.docs),
            vec!["Daily notes", "Development", "Index", "Tutorials"]
        );
        assert_eq!(
            topic_labels(&manifest.topics.blog),
            vec!["Dev Log", "Daily Life"]
        );
    }

    #[test]
    fn manifest_tags_count_published_posts_only() {
        let tmp = setup_fixtures();
        let manifest = build_manifest(tmp.path(), false).unwrap();
        assert_eq!(manifest.tags.get("rust"), Some(&2));
        assert_eq!(manifest.tags.get("life"), None);
    }

    #[test]
    fn manifest_serializes_to_json() {
        let tmp = setup_fixtures();
        let manifest = build_manifest(tmp.path(), false).unwrap();
        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["config"]["title"], "Field Notes");
        assert_eq!(json["topics"]["blog"][0]["type"], "blog");
        assert_eq!(json["blog"][0]["data"]["date"], "2024-02-01T10:00:00Z");
        assert_eq!(json["sidebar"][0]["type"], "group");
    }

    #[test]
    fn manifest_path_relative_to_site_root() {
        let root = Path::new("site");
        assert_eq!(
            manifest_path(root, Path::new(DEFAULT_MANIFEST_PATH)),
            root.join(".docblog").join("manifest.json")
        );
        let tmp = TempDir::new().unwrap();
        let absolute = tmp.path().join("out.json");
        assert_eq!(manifest_path(root, &absolute), absolute);
    }

    #[test]
    fn empty_site_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let manifest = build_manifest(tmp.path(), false).unwrap();
        assert_eq!(manifest.config.title, "My Site");
        assert!(manifest.docs.is_empty());
        assert!(manifest.topics.docs.is_empty());
        assert!(manifest.tags.is_empty());
    }

    #[test]
    fn bad_config_is_config_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "title = 3").unwrap();
        assert!(matches!(
            load_site(tmp.path()),
            Err(SiteError::Config(ConfigError::Toml(_)))
        ));
    }

    #[test]
    fn bad_content_is_content_error() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("content/blog")).unwrap();
        fs::write(tmp.path().join("content/blog/x.md"), "no front matter").unwrap();
        assert!(matches!(
            load_site(tmp.path()),
            Err(SiteError::Content(ContentError::Invalid { .. }))
        ));
    }
}
