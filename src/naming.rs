//! Centralized slug and label derivation for content entries.
//!
//! Every content file gets a URL slug derived from its path inside the
//! collection directory, and every folder can be turned into a display label.
//! Both conversions live here so the collection loader, the topic scan, and
//! the sidebar agree on them.
//!
//! ## Slugs
//!
//! Each path segment is slugified independently and the extension is dropped:
//!
//! - `tutorials/Getting Started.md` → `tutorials/getting-started`
//! - `development/index.md` → `development`
//! - `index.md` → `index`
//!
//! ## Labels
//!
//! The first character is uppercased and the remaining dashes become spaces:
//!
//! - `tutorials` → "Tutorials"
//! - `daily-notes` → "Daily notes"
//!
//! ## Ordering
//!
//! Labels are ordered with [`locale_cmp`], which approximates a locale-aware
//! collation: accents and case only break ties left by the base letters.

use std::cmp::Ordering;

/// Slugify a single path segment.
///
/// Lowercases, keeps letters, digits, `-` and `_`, turns whitespace into `-`
/// and drops everything else.
///
/// - `"Getting Started"` → `"getting-started"`
/// - `"What's New?"` → `"whats-new"`
/// - `"Ünïcode"` → `"ünïcode"`
pub fn slugify_segment(segment: &str) -> String {
    segment
        .trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else if c.is_whitespace() {
                Some('-')
            } else {
                None
            }
        })
        .collect()
}

/// Derive an entry slug from its id (path relative to the collection, `/`-separated).
///
/// The file extension is stripped, each segment is slugified, and a trailing
/// `/index` collapses onto its folder. A root `index` stays `index`.
pub fn slug_from_id(id: &str) -> String {
    let (dir, file) = match id.rsplit_once('/') {
        Some((dir, file)) => (dir, file),
        None => ("", id),
    };
    let stem = match file.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file,
    };

    let slug = dir
        .split('/')
        .chain(std::iter::once(stem))
        .filter(|s| !s.is_empty())
        .map(slugify_segment)
        .collect::<Vec<_>>()
        .join("/");

    match slug.strip_suffix("/index") {
        Some(parent) => parent.to_string(),
        None => slug,
    }
}

/// First `/`-separated segment of a slug. Empty when the slug starts with `/`.
pub fn first_segment(slug: &str) -> &str {
    slug.split('/').next().unwrap_or_default()
}

/// Turn a slug segment into a display label.
///
/// Uppercases the first character and replaces dashes in the rest with spaces.
/// A leading dash is kept as-is since it has no uppercase form.
pub fn label_from_slug(slug: &str) -> String {
    let mut chars = slug.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().replace('-', " ").chars())
            .collect(),
        None => String::new(),
    }
}

/// Compare two display strings the way a reader expects them sorted.
///
/// Three levels, each consulted only when the previous one ties:
///
/// 1. base letters: transliterated to ASCII and lowercased (`É` ~ `e`)
/// 2. accents: lowercased original text (`e` < `é`)
/// 3. case: lowercase before uppercase at the first difference (`a` < `A`)
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let base = |s: &str| deunicode::deunicode(s).to_lowercase();
    let case = |s: &str| s.chars().map(char::is_uppercase).collect::<Vec<_>>();

    base(a)
        .cmp(&base(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| case(a).cmp(&case(b)))
        .then_with(|| a.cmp(b))
}
