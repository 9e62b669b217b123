//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The site root holds
//! a single optional config file whose values are layered on top of stock
//! defaults, so a user file only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── config.toml              # Site config (overrides stock defaults)
//! └── content/
//!     ├── docs/
//!     └── blog/
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "My Site"
//! description = "A minimal blog and documentation site"
//! content_dir = "content"              # Relative to the site root
//! custom_css = ["./src/styles/site.css"]
//!
//! [[sidebar]]
//! label = "Documentation"
//! autogenerate = { directory = "docs" }
//!
//! [social]                             # name = "https://..."
//!
//! [components]                         # Overridable component → override file
//! Head = "./src/components/overrides/Head.astro"
//! SocialIcons = "./src/components/overrides/SocialIcons.astro"
//! ThemeSelect = "./src/components/overrides/ThemeSelect.astro"
//! ```
//!
//! ## Merging
//!
//! Tables merge key-by-key, everything else is replaced. A user `[[sidebar]]`
//! list therefore replaces the stock sidebar entirely, while a user
//! `[components]` table adds to (or repoints) the stock overrides.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Name of the collection every autogenerated sidebar group must point into.
pub const DOCS_DIRECTORY: &str = "docs";

/// Components the theme allows a site to replace with its own file.
pub const OVERRIDABLE_COMPONENTS: &[&str] = &[
    "Banner",
    "ContentPanel",
    "DraftContentNotice",
    "EditLink",
    "FallbackContentNotice",
    "Footer",
    "Head",
    "Header",
    "Hero",
    "LanguageSelect",
    "LastUpdated",
    "MarkdownContent",
    "MobileMenuFooter",
    "MobileMenuToggle",
    "MobileTableOfContents",
    "PageFrame",
    "PageSidebar",
    "PageTitle",
    "Pagination",
    "Search",
    "Sidebar",
    "SiteTitle",
    "SkipLink",
    "SocialIcons",
    "TableOfContents",
    "ThemeProvider",
    "ThemeSelect",
    "TwoColumnContent",
];

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title shown in the header and page titles.
    pub title: String,
    /// Site description used for meta tags.
    pub description: String,
    /// Content root, relative to the site root.
    pub content_dir: String,
    /// Stylesheets injected after the theme's own CSS.
    pub custom_css: Vec<String>,
    /// Sidebar groups, in display order.
    pub sidebar: Vec<SidebarGroup>,
    /// Social links: service name → URL.
    pub social: BTreeMap<String, String>,
    /// Component overrides: component name → override file path.
    pub components: BTreeMap<String, String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Site".to_string(),
            description: "A minimal blog and documentation site".to_string(),
            content_dir: "content".to_string(),
            custom_css: vec!["./src/styles/site.css".to_string()],
            sidebar: vec![SidebarGroup {
                label: "Documentation".to_string(),
                autogenerate: Some(Autogenerate {
                    directory: DOCS_DIRECTORY.to_string(),
                    collapsed: false,
                }),
                items: Vec::new(),
                collapsed: false,
            }],
            social: BTreeMap::new(),
            components: [
                ("Head", "./src/components/overrides/Head.astro"),
                ("SocialIcons", "./src/components/overrides/SocialIcons.astro"),
                ("ThemeSelect", "./src/components/overrides/ThemeSelect.astro"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are consistent and usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        if self.content_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "content_dir must not be empty".into(),
            ));
        }
        if self.custom_css.iter().any(|css| css.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "custom_css entries must not be empty".into(),
            ));
        }
        for group in &self.sidebar {
            group.validate()?;
        }
        for (name, url) in &self.social {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Validation(format!(
                    "social.{name} must be an http(s) URL, got {url:?}"
                )));
            }
        }
        for (name, path) in &self.components {
            if !OVERRIDABLE_COMPONENTS.contains(&name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "components.{name} is not an overridable component"
                )));
            }
            if path.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "components.{name} must point to a file"
                )));
            }
        }
        Ok(())
    }

    /// Absolute-or-relative path of the content root for a given site root.
    pub fn content_path(&self, root: &Path) -> PathBuf {
        root.join(&self.content_dir)
    }
}

/// One top-level sidebar group.
///
/// Exactly one of `autogenerate` or `items` must be set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarGroup {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autogenerate: Option<Autogenerate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<SidebarLink>,
    #[serde(default)]
    pub collapsed: bool,
}

impl SidebarGroup {
    fn validate(&self) -> Result<(), ConfigError> {
        match (&self.autogenerate, self.items.is_empty()) {
            (Some(_), false) => Err(ConfigError::Validation(format!(
                "sidebar group {:?} cannot set both autogenerate and items",
                self.label
            ))),
            (None, true) => Err(ConfigError::Validation(format!(
                "sidebar group {:?} needs autogenerate or items",
                self.label
            ))),
            (Some(auto), true) => {
                if auto.docs_prefix().is_none() {
                    return Err(ConfigError::Validation(format!(
                        "sidebar group {:?}: autogenerate directory {:?} is outside the {DOCS_DIRECTORY} collection",
                        self.label, auto.directory
                    )));
                }
                Ok(())
            }
            (None, false) => Ok(()),
        }
    }
}

/// Autogenerated sidebar source: every doc under `directory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Autogenerate {
    /// Directory relative to the content root, e.g. `docs` or `docs/tutorials`.
    pub directory: String,
    /// Whether nested groups start collapsed.
    #[serde(default)]
    pub collapsed: bool,
}

impl Autogenerate {
    /// Slug prefix inside the docs collection, or `None` if the directory
    /// does not point into it.
    ///
    /// - `docs` → `Some("")`
    /// - `./docs/tutorials/` → `Some("tutorials")`
    /// - `blog` → `None`
    pub fn docs_prefix(&self) -> Option<String> {
        let dir = self.directory.trim().trim_start_matches("./").trim_matches('/');
        let rest = dir.strip_prefix(DOCS_DIRECTORY)?;
        if !rest.is_empty() && !rest.starts_with('/') {
            return None;
        }
        Some(rest.trim_matches('/').to_string())
    }
}

/// An explicit sidebar link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarLink {
    pub label: String,
    pub link: String,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the site root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# docblog configuration
# =====================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Site title shown in the header and in page titles.
title = "My Site"

# Site description used for meta tags.
description = "A minimal blog and documentation site"

# Content root, relative to this file. Collections live in
# <content_dir>/docs and <content_dir>/blog.
content_dir = "content"

# Extra stylesheets, applied after the theme's own CSS.
custom_css = ["./src/styles/site.css"]

# ---------------------------------------------------------------------------
# Sidebar
# ---------------------------------------------------------------------------
# Each group either autogenerates its links from a folder of the docs
# collection, or lists them explicitly:
#
#   [[sidebar]]
#   label = "Guides"
#   items = [{ label = "Example", link = "/guides/example/" }]
#
# Setting [[sidebar]] in your own config replaces this list entirely.
[[sidebar]]
label = "Documentation"
autogenerate = { directory = "docs" }

# ---------------------------------------------------------------------------
# Social links (service name = URL)
# ---------------------------------------------------------------------------
[social]
# github = "https://github.com/you/your-site"

# ---------------------------------------------------------------------------
# Component overrides (component name = path to the replacement file)
# ---------------------------------------------------------------------------
[components]
Head = "./src/components/overrides/Head.astro"
SocialIcons = "./src/components/overrides/SocialIcons.astro"
ThemeSelect = "./src/components/overrides/ThemeSelect.astro"
"##
}
