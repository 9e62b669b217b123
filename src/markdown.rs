//! Markdown outline extraction.
//!
//! Each entry carries the list of its headings so a renderer can build the
//! on-page table of contents without re-parsing the body. Heading anchors are
//! slugified the same way as path segments, with `-1`, `-2`, ... appended to
//! repeats. An explicit `{#anchor}` attribute wins.

use crate::naming::slugify_segment;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// 1 for `#`, 6 for `######`.
    pub depth: u8,
    pub slug: String,
    pub text: String,
}

struct OpenHeading {
    depth: u8,
    id: Option<String>,
    text: String,
}

/// Extract all headings from a markdown document, in document order.
pub fn extract_headings(markdown: &str) -> Vec<Heading> {
    let parser = Parser::new_ext(markdown, Options::ENABLE_HEADING_ATTRIBUTES);
    let mut headings = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut open: Option<OpenHeading> = None;

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                open = Some(OpenHeading {
                    depth: level as u8,
                    id: id.map(|id| id.to_string()),
                    text: String::new(),
                });
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(heading) = open.as_mut() {
                    heading.text.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(heading) = open.as_mut() {
                    heading.text.push(' ');
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = open.take() {
                    let text = heading.text.trim().to_string();
                    let slug = match heading.id {
                        Some(id) => id,
                        None => unique_slug(&text, &mut seen),
                    };
                    headings.push(Heading {
                        depth: heading.depth,
                        slug,
                        text,
                    });
                }
            }
            _ => {}
        }
    }

    headings
}

fn unique_slug(text: &str, seen: &mut HashMap<String, usize>) -> String {
    let base = slugify_segment(text);
    let count = seen.entry(base.clone()).or_insert(0);
    let slug = if *count == 0 {
        base
    } else {
        format!("{base}-{count}")
    };
    *count += 1;
    slug
}
