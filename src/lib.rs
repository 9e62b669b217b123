//! # docblog
//!
//! The content layer of a minimal documentation and blog site. The filesystem
//! is the data source: markdown files under `content/docs` and `content/blog`
//! become validated entries, folders become topics and sidebar groups, and a
//! single `config.toml` wires in the theme options.
//!
//! # Pipeline
//!
//! ```text
//! config.toml ──► config ──┐
//!                          ├──► site::Manifest ──► manifest.json
//! content/docs ─► content ─┤      (entries, topics, sidebar, tags)
//! content/blog ─► content ─┘
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`frontmatter`] | Splits YAML (`---`) or TOML (`+++`) front matter from the body |
//! | [`schema`] | Doc and blog front matter schemas, date coercion |
//! | [`content`] | Collection loading and validation |
//! | [`naming`] | Slug and label derivation, label ordering |
//! | [`markdown`] | Heading extraction for tables of contents |
//! | [`topics`] | Static topic table and derived doc topics |
//! | [`sidebar`] | Sidebar resolution from config and the docs collection |
//! | [`site`] | Whole-site load and manifest assembly |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Lookups Never Fail
//!
//! Topic lookups return `Option` and scans return possibly-empty lists.
//! Errors are reserved for things a site author must fix: bad config, bad
//! front matter, clashing slugs.
//!
//! ## Report Everything At Once
//!
//! Content validation walks the whole collection before failing, so a single
//! `docblog check` lists every broken file instead of one per run.
//!
//! ## Unknown Keys
//!
//! Config keys are strict (`deny_unknown_fields`) to catch typos. Front matter
//! keys are lenient: anything not in the schema is ignored, so theme-specific
//! metadata can sit next to the validated fields.

pub mod config;
pub mod content;
pub mod frontmatter;
pub mod markdown;
pub mod naming;
pub mod output;
pub mod schema;
pub mod sidebar;
pub mod site;
pub mod topics;

#[cfg(test)]
pub(crate) mod test_helpers;
