//! CLI output formatting.
//!
//! Output is information-first: each entity leads with its positional index
//! and title, and the file it came from follows on an indented `Source:`
//! line. This reads as a content inventory while still pointing back at the
//! files to edit.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Config
//!     Title: Field Notes
//!     Content: content/
//!
//! Docs (8 entries)
//! 001 Private (hidden)
//!     Source: docs/daily-notes/private.md
//! 002 Standup
//!     Source: docs/daily-notes/standup.md
//!
//! Blog (3 posts)
//! 001 Coffee Notes (draft)
//!     Source: blog/daily-life/coffee.md
//!     Date: 2024-03-10
//! ```
//!
//! ## Sidebar
//!
//! ```text
//! Documentation
//!     001 Welcome → /
//!     002 Development
//!         001 Local Setup → /development/setup/
//! ```
//!
//! Each command has a `format_*` function returning lines, which keeps them
//! testable, and a `print_*` wrapper that writes to stdout.

use crate::content::Entry;
use crate::naming::slug_from_id;
use crate::schema::{BlogFrontmatter, CollectionSchema, DocFrontmatter};
use crate::sidebar::SidebarItem;
use crate::site::{Manifest, Site};
use crate::topics::Topic;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Section header with an item count, e.g. `Docs (8 entries)`.
fn section_header(name: &str, count: usize, singular: &str, plural: &str) -> String {
    let noun = if count == 1 { singular } else { plural };
    format!("{name} ({count} {noun})")
}

/// Entry header: index, title, and status flags.
///
/// ```text
/// 001 Coffee Notes (draft)
/// 002 Private (hidden)
/// ```
fn entry_header(index: usize, title: &str, flags: &[&str]) -> String {
    if flags.is_empty() {
        format!("{} {}", format_index(index), title)
    } else {
        format!("{} {} ({})", format_index(index), title, flags.join(", "))
    }
}

fn source_line<S>(entry: &Entry<S>, depth: usize) -> String {
    format!(
        "{}Source: {}/{}",
        indent(depth),
        entry.collection.name(),
        entry.id
    )
}

fn topic_line(index: usize, topic: &Topic) -> String {
    format!("{} {} ({})", format_index(index), topic.label, topic.slug)
}

// ============================================================================
// check
// ============================================================================

fn format_doc(index: usize, doc: &Entry<DocFrontmatter>) -> Vec<String> {
    let mut flags = Vec::new();
    if doc.is_draft() {
        flags.push("draft");
    }
    if doc.data.sidebar.hidden {
        flags.push("hidden");
    }
    let mut lines = vec![entry_header(index, doc.title(), &flags), source_line(doc, 1)];
    if doc.slug != slug_from_id(&doc.id) {
        lines.push(format!("{}Slug: {}", indent(1), doc.slug));
    }
    lines
}

fn format_post(index: usize, post: &Entry<BlogFrontmatter>) -> Vec<String> {
    let flags: &[&str] = if post.is_draft() { &["draft"] } else { &[] };
    let mut lines = vec![
        entry_header(index, post.title(), flags),
        source_line(post, 1),
        format!("{}Date: {}", indent(1), post.data.date.format("%Y-%m-%d")),
    ];
    if !post.data.tags().is_empty() {
        lines.push(format!("{}Tags: {}", indent(1), post.data.tags().join(", ")));
    }
    lines
}

/// Format the content inventory shown by `check`.
pub fn format_check_output(site: &Site, root: &Path) -> Vec<String> {
    let mut lines = vec![
        "Config".to_string(),
        format!("{}Title: {}", indent(1), site.config.title),
        format!(
            "{}Content: {}/",
            indent(1),
            site.content_dir
                .strip_prefix(root)
                .unwrap_or(&site.content_dir)
                .display()
        ),
        String::new(),
        section_header("Docs", site.docs.len(), "entry", "entries"),
    ];
    for (i, doc) in site.docs.iter().enumerate() {
        lines.extend(format_doc(i + 1, doc));
    }

    lines.push(String::new());
    lines.push(section_header("Blog", site.blog.len(), "post", "posts"));
    for (i, post) in site.blog.iter().enumerate() {
        lines.extend(format_post(i + 1, post));
    }
    lines
}

pub fn print_check_output(site: &Site, root: &Path) {
    for line in format_check_output(site, root) {
        println!("{}", line);
    }
}

// ============================================================================
// topics
// ============================================================================

/// Format the static and derived topic lists.
pub fn format_topics(doc_topics: &[&Topic], blog_topics: &[&Topic], derived: &[Topic]) -> Vec<String> {
    let mut lines = Vec::new();
    let sections: [(&str, Vec<&Topic>); 3] = [
        ("Doc topics", doc_topics.to_vec()),
        ("Blog topics", blog_topics.to_vec()),
        ("Derived doc topics", derived.iter().collect()),
    ];
    for (i, (name, topics)) in sections.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(name.to_string());
        if topics.is_empty() {
            lines.push(format!("{}(none)", indent(1)));
        }
        for (j, topic) in topics.iter().enumerate() {
            lines.push(topic_line(j + 1, topic));
        }
    }
    lines
}

pub fn print_topics(doc_topics: &[&Topic], blog_topics: &[&Topic], derived: &[Topic]) {
    for line in format_topics(doc_topics, blog_topics, derived) {
        println!("{}", line);
    }
}

/// Format the result of a single topic lookup.
pub fn format_topic_lookup(slug: &str, topic: Option<&Topic>) -> String {
    match topic {
        Some(topic) => format!("{} → {} ({})", topic.slug, topic.label, topic.kind),
        None => format!("No topic with slug {slug:?}"),
    }
}

// ============================================================================
// sidebar
// ============================================================================

fn format_sidebar_items(items: &[SidebarItem], depth: usize, lines: &mut Vec<String>) {
    for (i, item) in items.iter().enumerate() {
        match item {
            SidebarItem::Link { label, href } => lines.push(format!(
                "{}{} {} → {}",
                indent(depth),
                format_index(i + 1),
                label,
                href
            )),
            SidebarItem::Group { label, items, .. } => {
                lines.push(format!("{}{} {}", indent(depth), format_index(i + 1), label));
                format_sidebar_items(items, depth + 1, lines);
            }
        }
    }
}

/// Format the resolved sidebar as an indented tree.
///
/// Top-level groups are shown without an index, as section headings.
pub fn format_sidebar(sidebar: &[SidebarItem]) -> Vec<String> {
    let mut lines = Vec::new();
    for item in sidebar {
        match item {
            SidebarItem::Group { label, items, .. } => {
                lines.push(label.clone());
                if items.is_empty() {
                    lines.push(format!("{}(empty)", indent(1)));
                }
                format_sidebar_items(items, 1, &mut lines);
            }
            SidebarItem::Link { .. } => format_sidebar_items(std::slice::from_ref(item), 0, &mut lines),
        }
    }
    lines
}

pub fn print_sidebar(sidebar: &[SidebarItem]) {
    for line in format_sidebar(sidebar) {
        println!("{}", line);
    }
}

// ============================================================================
// manifest
// ============================================================================

/// One-line summary after writing the manifest.
pub fn format_manifest_summary(manifest: &Manifest, path: &Path) -> String {
    format!(
        "Wrote {} ({} docs, {} posts, {} doc topics)",
        path.display(),
        manifest.docs.len(),
        manifest.blog.len(),
        manifest.topics.docs.len()
    )
}
