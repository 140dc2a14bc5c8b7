//! Aggregation of per-section parse results into a document-level analysis.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sections::{Section, extract_bullets_and_counts};

/// Title given to a section that arrives without one.
pub const DEFAULT_SECTION_TITLE: &str = "Section";

/// One section after bullet and tally extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSection {
    pub title: String,
    pub in_favour: u64,
    pub against: u64,
    pub bullets: Vec<String>,
}

/// Document-level totals and the flat, ordered comment list.
///
/// `total_in_favour` and `total_against` start out as the sums of the
/// declared section tallies. The pipeline may later replace them with
/// sentiment-derived counts when the document declared none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub parts: Vec<ParsedSection>,
    pub total_in_favour: u64,
    pub total_against: u64,
    pub all_comments: Vec<String>,
}

impl Analysis {
    pub fn total_comments(&self) -> usize {
        self.all_comments.len()
    }

    pub fn section_count(&self) -> usize {
        self.parts.len()
    }

    /// Whether the document declared any favour/against tally at all.
    pub fn has_declared_stance(&self) -> bool {
        self.total_in_favour > 0 || self.total_against > 0
    }
}

/// Run bullet/tally extraction over every section, in order.
///
/// Missing tallies count as zero and totals saturate at `u64::MAX`. Comments are concatenated in section
/// order without deduplication.
pub fn aggregate(sections: &[Section]) -> Analysis {
    let mut analysis = Analysis::default();

    for section in sections {
        let extracted = extract_bullets_and_counts(&section.content);
        let in_favour = extracted.counts.in_favour.unwrap_or(0);
        let against = extracted.counts.against.unwrap_or(0);

        analysis.total_in_favour = analysis.total_in_favour.saturating_add(in_favour);
        analysis.total_against = analysis.total_against.saturating_add(against);
        analysis
            .all_comments
            .extend(extracted.bullets.iter().cloned());

        let title = if section.title.is_empty() {
            DEFAULT_SECTION_TITLE.to_string()
        } else {
            section.title.clone()
        };
        analysis.parts.push(ParsedSection {
            title,
            in_favour,
            against,
            bullets: extracted.bullets,
        });
    }

    debug!(
        sections = analysis.section_count(),
        comments = analysis.total_comments(),
        in_favour = analysis.total_in_favour,
        against = analysis.total_against,
        "aggregated sections"
    );
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(parts: &[(&str, &str)]) -> Vec<Section> {
        parts
            .iter()
            .map(|(title, content)| Section::new(*title, *content))
            .collect()
    }

    #[test]
    fn sums_declared_counts() {
        let input = sections(&[
            (
                "Part 1:",
                "Comments in favour: 10\nComments against: 2\n• yes\n• fine",
            ),
            ("Part 2:", "Comments in favour: 5\n- meh"),
            ("Part 3:", "Comments against: 8"),
        ]);
        let analysis = aggregate(&input);

        assert_eq!(analysis.total_in_favour, 15);
        assert_eq!(analysis.total_against, 10);
        assert_eq!(
            analysis.total_in_favour,
            analysis.parts.iter().map(|p| p.in_favour).sum::<u64>()
        );
        assert_eq!(
            analysis.total_against,
            analysis.parts.iter().map(|p| p.against).sum::<u64>()
        );
    }

    #[test]
    fn comments_concatenate_in_section_order() {
        let input = sections(&[
            ("Part 1:", "• a1\n• a2"),
            ("Part 2:", "no bullets here"),
            ("Part 3:", "- c1\n- a1"),
        ]);
        let analysis = aggregate(&input);

        assert_eq!(analysis.all_comments, vec!["a1", "a2", "c1", "a1"]);
        let flattened: Vec<String> = analysis
            .parts
            .iter()
            .flat_map(|p| p.bullets.iter().cloned())
            .collect();
        assert_eq!(analysis.all_comments, flattened);
        assert_eq!(analysis.section_count(), 3);
        assert!(analysis.parts[1].bullets.is_empty());
    }

    #[test]
    fn missing_counts_default_to_zero() {
        let analysis = aggregate(&sections(&[("Full Document", "• one\n• two")]));
        assert_eq!(analysis.parts[0].in_favour, 0);
        assert_eq!(analysis.parts[0].against, 0);
        assert!(!analysis.has_declared_stance());
        assert_eq!(analysis.total_comments(), 2);
    }

    #[test]
    fn untitled_section_gets_default_title() {
        let analysis = aggregate(&sections(&[("", "• body")]));
        assert_eq!(analysis.parts[0].title, DEFAULT_SECTION_TITLE);
    }

    #[test]
    fn empty_input_is_empty_analysis() {
        assert_eq!(aggregate(&[]), Analysis::default());
    }

    #[test]
    fn huge_tallies_saturate() {
        let input = sections(&[
            ("Part 1:", "Comments in favour: 18446744073709551615\nComments against: 3"),
            ("Part 2:", "Comments in favour: 1\nComments against: 4"),
        ]);
        let analysis = aggregate(&input);
        assert_eq!(analysis.total_in_favour, u64::MAX);
        assert_eq!(analysis.total_against, 7);
    }
}
