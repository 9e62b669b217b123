//! Shared test utilities for the docblog test suite.
//!
//! Provides fixture setup, entry lookups, and sidebar tree assertions.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let docs = get_docs(&tmp.path().join("content")).unwrap();
//!
//! let doc = find_doc(&docs, "tutorials/getting-started");
//! assert_eq!(doc.data.title, "Getting Started");
//!
//! assert_sidebar_shape(sidebar[0].children(), &[
//!     ("Welcome", &[]),
//!     ("Tutorials", &["Getting Started"]),
//! ]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::content::Entry;
use crate::schema::{BlogFrontmatter, DocFrontmatter};
use crate::sidebar::SidebarItem;
use crate::topics::Topic;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Collection lookups — panics with a clear message on miss
// =========================================================================

fn find_entry<'a, S>(entries: &'a [Entry<S>], slug: &str, kind: &str) -> &'a Entry<S> {
    entries.iter().find(|e| e.slug == slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = entries.iter().map(|e| e.slug.as_str()).collect();
        panic!("{kind} '{slug}' not found. Available: {slugs:?}")
    })
}

/// Find a doc by slug. Panics if not found.
pub fn find_doc<'a>(docs: &'a [Entry<DocFrontmatter>], slug: &str) -> &'a Entry<DocFrontmatter> {
    find_entry(docs, slug, "doc")
}

/// Find a blog post by slug. Panics if not found.
pub fn find_post<'a>(
    posts: &'a [Entry<BlogFrontmatter>],
    slug: &str,
) -> &'a Entry<BlogFrontmatter> {
    find_entry(posts, slug, "post")
}

// =========================================================================
// Topic extractors
// =========================================================================

/// Labels of a topic list, in order.
pub fn topic_labels<'a, I>(topics: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Topic>,
{
    topics.into_iter().map(|t| t.label.as_ref()).collect()
}

/// Slugs of a topic list, in order.
pub fn topic_slugs<'a, I>(topics: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Topic>,
{
    topics.into_iter().map(|t| t.slug.as_ref()).collect()
}

// =========================================================================
// Sidebar helpers
// =========================================================================

/// Assert that a sidebar level matches an expected two-level shape.
///
/// Each entry is `(label, child labels)`. Use `&[]` for links and empty groups.
///
/// ```rust
/// assert_sidebar_shape(items, &[
///     ("Welcome", &[]),
///     ("Tutorials", &["Getting Started", "Writing Your First Post"]),
/// ]);
/// ```
pub fn assert_sidebar_shape(items: &[SidebarItem], expected: &[(&str, &[&str])]) {
    let actual: Vec<&str> = items.iter().map(SidebarItem::label).collect();
    let expected_labels: Vec<&str> = expected.iter().map(|(l, _)| *l).collect();
    assert_eq!(actual, expected_labels, "sidebar labels mismatch");

    for (item, (label, children)) in items.iter().zip(expected) {
        let actual_children: Vec<&str> = item.children().iter().map(SidebarItem::label).collect();
        assert_eq!(
            actual_children,
            children.to_vec(),
            "sidebar children of '{label}' mismatch"
        );
    }
}
