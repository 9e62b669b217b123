//! Content collection loading.
//!
//! Each collection is a directory under the content root whose markdown
//! files are validated against the collection's front matter schema:
//!
//! ```text
//! content/
//! ├── docs/                        # DocFrontmatter
//! │   ├── index.md                 # slug: index
//! │   ├── _partials/               # underscore = ignored
//! │   └── tutorials/
//! │       ├── index.md             # slug: tutorials
//! │       └── Getting Started.md   # slug: tutorials/getting-started
//! └── blog/                        # BlogFrontmatter
//!     └── hello-world.md           # slug: hello-world
//! ```
//!
//! ## Loading
//!
//! [`load_collection`] is the single blocking fetch of a collection. Files are
//! parsed in parallel, then returned sorted by id. A collection directory that
//! does not exist is an empty collection.
//!
//! ## Validation
//!
//! Every file is checked. Instead of stopping at the first bad file, all
//! problems are gathered into [`ContentError::Invalid`] so one run reports
//! everything that needs fixing:
//!
//! - unreadable or unterminated front matter
//! - schema violations (missing `title`, bad `date`, wrong types)
//! - a `slug` override that is not a non-empty string
//! - two entries resolving to the same slug

use crate::frontmatter;
use crate::markdown::{Heading, extract_headings};
use crate::naming::slug_from_id;
use crate::schema::{BlogFrontmatter, Collection, CollectionSchema, DocFrontmatter};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{} invalid {collection} entries:{}", .issues.len(), format_issues(.issues))]
    Invalid {
        collection: Collection,
        issues: Vec<ValidationIssue>,
    },
}

/// One problem found while validating a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Path relative to the content root, e.g. `blog/hello.md`.
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues.iter().map(|issue| format!("\n  {issue}")).collect()
}

/// A validated content entry.
#[derive(Debug, Clone, Serialize)]
pub struct Entry<S> {
    /// File path relative to the collection directory, `/`-separated.
    pub id: String,
    /// URL slug, from the path or a front matter `slug` override.
    pub slug: String,
    pub collection: Collection,
    pub data: S,
    /// Markdown after the front matter.
    pub body: String,
    pub headings: Vec<Heading>,
}

impl<S: CollectionSchema> Entry<S> {
    pub fn is_draft(&self) -> bool {
        self.data.is_draft()
    }

    pub fn title(&self) -> &str {
        self.data.title()
    }
}

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Load and validate every entry of the collection bound to `S`.
pub fn load_collection<S: CollectionSchema>(
    content_dir: &Path,
) -> Result<Vec<Entry<S>>, ContentError> {
    let collection = S::COLLECTION;
    let dir = content_dir.join(collection.name());
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let files = collect_markdown_files(&dir)?;
    let parsed = files
        .par_iter()
        .map(|path| read_entry::<S>(&dir, path))
        .collect::<Result<Vec<_>, ContentError>>()?;

    let mut entries = Vec::with_capacity(parsed.len());
    let mut issues = Vec::new();
    for result in parsed {
        match result {
            Ok(entry) => entries.push(entry),
            Err(issue) => issues.push(issue),
        }
    }

    // Walk order is per directory, so `a/x.md` would precede `a.md`
    entries.sort_by(|a, b| a.id.cmp(&b.id));
    issues.extend(duplicate_slug_issues(&entries));

    if !issues.is_empty() {
        issues.sort_by(|a, b| a.path.cmp(&b.path));
        return Err(ContentError::Invalid { collection, issues });
    }

    Ok(entries)
}

/// Load the `docs` collection.
pub fn get_docs(content_dir: &Path) -> Result<Vec<Entry<DocFrontmatter>>, ContentError> {
    load_collection(content_dir)
}

/// Load the `blog` collection.
pub fn get_blog(content_dir: &Path) -> Result<Vec<Entry<BlogFrontmatter>>, ContentError> {
    load_collection(content_dir)
}

/// Drop draft entries.
pub fn published<S: CollectionSchema>(entries: Vec<Entry<S>>) -> Vec<Entry<S>> {
    entries.into_iter().filter(|e| !e.is_draft()).collect()
}

/// Sort blog posts newest first. Posts sharing a date keep slug order.
pub fn sort_by_date(posts: &mut [Entry<BlogFrontmatter>]) {
    posts.sort_by(|a, b| b.data.date.cmp(&a.data.date).then_with(|| a.slug.cmp(&b.slug)));
}

/// Count how many entries carry each tag.
pub fn tag_counts<S: CollectionSchema>(entries: &[Entry<S>]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for entry in entries {
        for tag in entry.data.tags() {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    counts
}

fn collect_markdown_files(dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_ignored(&e.file_name().to_string_lossy()));

    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && is_markdown(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Hidden files and `_`-prefixed files or folders are not content.
fn is_ignored(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_')
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext.as_str()))
}

/// Read one file. IO failures abort the load; content problems come back as
/// a [`ValidationIssue`] so the rest of the collection still gets checked.
fn read_entry<S: CollectionSchema>(
    dir: &Path,
    path: &Path,
) -> Result<Result<Entry<S>, ValidationIssue>, ContentError> {
    let collection = S::COLLECTION;
    let rel = path.strip_prefix(dir).unwrap_or(path);
    let id = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    let issue = |message: String| ValidationIssue {
        path: Path::new(collection.name()).join(rel),
        message,
    };

    let content = fs::read_to_string(path)?;
    let document = match frontmatter::parse(&content) {
        Ok(document) => document,
        Err(e) => return Ok(Err(issue(e.to_string()))),
    };

    let mut data = document.data;
    let slug = match data.remove("slug") {
        None => slug_from_id(&id),
        Some(Value::String(s)) => {
            let s = s.trim().trim_matches('/');
            if s.is_empty() {
                return Ok(Err(issue("slug must not be empty".to_string())));
            }
            s.to_string()
        }
        Some(_) => return Ok(Err(issue("slug must be a string".to_string()))),
    };

    let data: S = match serde_json::from_value(Value::Object(data)) {
        Ok(data) => data,
        Err(e) => return Ok(Err(issue(e.to_string()))),
    };

    Ok(Ok(Entry {
        headings: extract_headings(document.body),
        body: document.body.to_string(),
        id,
        slug,
        collection,
        data,
    }))
}

fn duplicate_slug_issues<S>(entries: &[Entry<S>]) -> Vec<ValidationIssue> {
    let mut first_seen: BTreeMap<&str, &str> = BTreeMap::new();
    let mut issues = Vec::new();
    for entry in entries {
        if let Some(other) = first_seen.insert(entry.slug.as_str(), entry.id.as_str()) {
            issues.push(ValidationIssue {
                path: Path::new(entry.collection.name()).join(&entry.id),
                message: format!("duplicate slug {:?} (also used by {other})", entry.slug),
            });
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn invalid_issues(err: ContentError) -> Vec<ValidationIssue> {
        match err {
            ContentError::Invalid { issues, .. } => issues,
            other => panic!("expected validation failure, got {other}"),
        }
    }

    // =========================================================================
    // Fixture collections
    // =========================================================================

    #[test]
    fn fixture_docs_load_sorted_by_id() {
        let tmp = setup_fixtures();
        let docs = get_docs(&tmp.path().join("content")).unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "daily-notes/private.md",
                "daily-notes/standup.md",
                "development/release-process.md",
                "development/roadmap.md",
                "development/setup.md",
                "index.md",
                "tutorials/first-post.md",
                "tutorials/getting-started.md",
            ]
        );
    }

    #[test]
    fn fixture_underscore_folder_ignored() {
        let tmp = setup_fixtures();
        let docs = get_docs(&tmp.path().join("content")).unwrap();
        assert!(docs.iter().all(|d| !d.id.starts_with('_')));
    }

    #[test]
    fn fixture_doc_slugs_and_titles() {
        let tmp = setup_fixtures();
        let docs = get_docs(&tmp.path().join("content")).unwrap();
        let doc = find_doc(&docs, "tutorials/getting-started");
        assert_eq!(doc.title(), "Getting Started");
        assert_eq!(doc.data.sidebar.order, Some(1));
        assert_eq!(doc.collection, Collection::Docs);
    }

    #[test]
    fn fixture_doc_headings_extracted() {
        let tmp = setup_fixtures();
        let docs = get_docs(&tmp.path().join("content")).unwrap();
        let doc = find_doc(&docs, "development/setup");
        let slugs: Vec<&str> = doc.headings.iter().map(|h| h.slug.as_str()).collect();
        assert_eq!(slugs, vec!["prerequisites", "install"]);
    }

    #[test]
    fn fixture_blog_posts_with_both_front_matter_styles() {
        let tmp = setup_fixtures();
        let posts = get_blog(&tmp.path().join("content")).unwrap();
        assert_eq!(posts.len(), 3);

        let coffee = find_post(&posts, "daily-life/coffee");
        assert!(coffee.is_draft());
        assert_eq!(coffee.data.date, Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap());

        let week = find_post(&posts, "devlog/week-1");
        assert_eq!(week.data.tags, vec!["devlog", "rust"]);
    }

    // =========================================================================
    // Loading rules
    // =========================================================================

    #[test]
    fn missing_collection_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(get_docs(tmp.path()).unwrap().is_empty());
        assert!(get_blog(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn non_markdown_and_hidden_files_skipped() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "docs/a.md", "---\ntitle: A\n---\n");
        write(tmp.path(), "docs/b.MARKDOWN", "---\ntitle: B\n---\n");
        write(tmp.path(), "docs/notes.txt", "not content");
        write(tmp.path(), "docs/.hidden.md", "---\ntitle: Hidden\n---\n");
        write(tmp.path(), "docs/_draft.md", "no front matter at all");

        let docs = get_docs(tmp.path()).unwrap();
        let slugs: Vec<&str> = docs.iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b"]);
    }

    #[test]
    fn slug_override_from_front_matter() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "docs/misc/old-name.md",
            "---\ntitle: Renamed\nslug: /guides/new-name/\n---\n",
        );
        let docs = get_docs(tmp.path()).unwrap();
        assert_eq!(docs[0].slug, "guides/new-name");
        assert_eq!(docs[0].id, "misc/old-name.md");
    }

    #[test]
    fn entries_sorted_by_full_id_across_folders() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "docs/a.md", "---\ntitle: A\n---\n");
        write(tmp.path(), "docs/a/x.md", "---\ntitle: X\n---\n");
        write(tmp.path(), "docs/a-b/y.md", "---\ntitle: Y\n---\n");

        let docs = get_docs(tmp.path()).unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a-b/y.md", "a.md", "a/x.md"]);
    }

    #[test]
    fn duplicate_slug_reported_against_later_id() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "docs/guide.md", "---\ntitle: One\n---\n");
        write(tmp.path(), "docs/guide/index.md", "---\ntitle: Two\n---\n");
        let issues = invalid_issues(get_docs(tmp.path()).unwrap_err());
        assert_eq!(issues[0].path, Path::new("docs").join("guide/index.md"));
        assert!(issues[0].message.contains("also used by guide.md"));
    }

    #[test]
    fn body_excludes_front_matter() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "docs/a.md", "---\ntitle: A\n---\nHello\n");
        let docs = get_docs(tmp.path()).unwrap();
        assert_eq!(docs[0].body, "Hello\n");
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn all_issues_reported_together() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "blog/good.md", "---\ntitle: Good\ndate: 2024-01-01\n---\n");
        write(tmp.path(), "blog/no-title.md", "---\ndate: 2024-01-01\n---\n");
        write(tmp.path(), "blog/bad-date.md", "---\ntitle: x\ndate: someday\n---\n");

        let issues = invalid_issues(get_blog(tmp.path()).unwrap_err());
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].path, Path::new("blog").join("bad-date.md"));
        assert!(issues[0].message.contains("Invalid date"));
        assert_eq!(issues[1].path, Path::new("blog").join("no-title.md"));
        assert!(issues[1].message.contains("title"));
    }

    #[test]
    fn missing_front_matter_fails_required_fields() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "docs/plain.md", "# Just markdown\n");
        let issues = invalid_issues(get_docs(tmp.path()).unwrap_err());
        assert!(issues[0].message.contains("missing field `title`"));
    }

    #[test]
    fn unterminated_front_matter_is_issue() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "docs/broken.md", "---\ntitle: Broken\n");
        let issues = invalid_issues(get_docs(tmp.path()).unwrap_err());
        assert!(issues[0].message.contains("never closed"));
    }

    #[test]
    fn non_string_slug_is_issue() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "docs/a.md", "---\ntitle: A\nslug: 42\n---\n");
        let issues = invalid_issues(get_docs(tmp.path()).unwrap_err());
        assert_eq!(issues[0].message, "slug must be a string");
    }

    #[test]
    fn duplicate_slugs_are_issue() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "docs/guide.md", "---\ntitle: One\n---\n");
        write(tmp.path(), "docs/guide/index.md", "---\ntitle: Two\n---\n");
        let issues = invalid_issues(get_docs(tmp.path()).unwrap_err());
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("duplicate slug \"guide\""));
    }

    #[test]
    fn invalid_error_display_lists_files() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "blog/x.md", "---\ntitle: x\n---\n");
        let err = get_blog(tmp.path()).unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("1 invalid blog entries:"));
        assert!(text.contains("x.md"));
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    #[test]
    fn published_drops_drafts() {
        let tmp = setup_fixtures();
        let posts = published(get_blog(&tmp.path().join("content")).unwrap());
        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(|p| !p.is_draft()));
    }

    #[test]
    fn sort_by_date_newest_first() {
        let tmp = setup_fixtures();
        let mut posts = get_blog(&tmp.path().join("content")).unwrap();
        sort_by_date(&mut posts);
        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["daily-life/coffee", "devlog/week-1", "hello-world"]);
    }

    #[test]
    fn tag_counts_across_posts() {
        let tmp = setup_fixtures();
        let posts = get_blog(&tmp.path().join("content")).unwrap();
        let counts = tag_counts(&posts);
        assert_eq!(counts.get("rust"), Some(&2));
        assert_eq!(counts.get("devlog"), Some(&1));
        assert_eq!(counts.get("intro"), Some(&1));
    }
}
