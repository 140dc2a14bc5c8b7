//! Section splitting and bullet/count extraction for consultation documents.
//!
//! Consultation summaries are laid out as a sequence of parts, each headed
//! by a `Part <n>:` marker, listing the declared tallies and the individual
//! stakeholder remarks as bullets:
//!
//! ```text
//! Part 1: Scope of the rules
//! Comments in favour of the proposal: 12
//! Comments against the proposal: 3
//! • The definitions are clear.
//! - Small firms need a longer transition.
//! ```
//!
//! Only bullet lines count as comments. Free text, wrapped continuation lines
//! and numbered lists are not comments and are ignored.

use std::num::IntErrorKind;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Title used when a document carries no `Part <n>:` markers.
pub const FULL_DOCUMENT: &str = "Full Document";

static PART_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Part\s+\d+:").expect("part marker pattern is valid"));

static IN_FAVOUR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Comments in favour[^:\n]*:\s*([0-9]+)").expect("favour pattern is valid")
});

static AGAINST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Comments against[^:\n]*:\s*([0-9]+)").expect("against pattern is valid")
});

static BULLET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*[•\-\u{2022}]\s+.+$").expect("bullet pattern is valid")
});

/// A contiguous block of a document under one title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
}

impl Section {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Declared tallies found in a section. `None` means the section did not
/// state that tally at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionCounts {
    pub in_favour: Option<u64>,
    pub against: Option<u64>,
}

/// Bullets and declared tallies extracted from one section body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    pub counts: SectionCounts,
    pub bullets: Vec<String>,
}

/// Split a document into sections on `Part <n>:` markers.
///
/// Line endings are normalised to `\n` first. Each marker becomes the title
/// of the section that follows it; text before the first marker is not part
/// of any section. Without markers the whole (line-ending normalised) text
/// is returned as a single [`FULL_DOCUMENT`] section.
pub fn parse_sections(text: &str) -> Vec<Section> {
    let norm = text.replace("\r\n", "\n");

    let markers: Vec<_> = PART_MARKER.find_iter(&norm).collect();
    if markers.is_empty() {
        return vec![Section::new(FULL_DOCUMENT, norm)];
    }

    markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let end = markers.get(i + 1).map_or(norm.len(), |next| next.start());
            Section::new(
                marker.as_str().trim(),
                norm[marker.end()..end].trim(),
            )
        })
        .collect()
}

/// Extract declared favour/against tallies and bullet comments from a
/// section body.
///
/// Tallies match `Comments in favour…: <n>` and `Comments against…: <n>`
/// case-insensitively anywhere in the body; the first match of each wins.
/// A bullet is a line starting with `•` or `-` followed by whitespace; the
/// glyph and surrounding whitespace are stripped from the comment.
pub fn extract_bullets_and_counts(content: &str) -> Extracted {
    let counts = SectionCounts {
        in_favour: first_count(&IN_FAVOUR, content),
        against: first_count(&AGAINST, content),
    };

    let bullets = BULLET
        .find_iter(content)
        .map(|m| strip_bullet(m.as_str()).to_string())
        .collect();

    Extracted { counts, bullets }
}

/// Tallies too large for `u64` saturate rather than being dropped.
fn first_count(pattern: &Regex, content: &str) -> Option<u64> {
    let digits = pattern.captures(content)?.get(1)?.as_str();
    match digits.parse::<u64>() {
        Ok(n) => Some(n),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(u64::MAX),
        Err(_) => None,
    }
}

fn strip_bullet(line: &str) -> &str {
    line.trim_matches(|c| matches!(c, ' ' | '\n' | '\t' | '•' | '-'))
}
