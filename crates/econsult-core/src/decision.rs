//! Summary narrative and pass/modify decision from aggregated tallies.
//!
//! The decision depends only on the favour/against totals and the number of
//! comments. The support ratio `favour / (favour + against)` is compared
//! against two fixed thresholds:
//!
//! | support ratio | decision |
//! |---|---|
//! | ≥ 0.70 | `PASS` |
//! | 0.50 ..< 0.70 | `PASS_WITH_MODIFICATIONS` |
//! | < 0.50 | `MODIFY` |
//!
//! With comments but no tallies the result is `REVIEW_REQUIRED`; with no
//! comments at all it is `INSUFFICIENT_DATA`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::Analysis;

pub const PASS_THRESHOLD: f64 = 0.70;
pub const MODIFY_THRESHOLD: f64 = 0.50;

pub const NO_COMMENTS_SUMMARY: &str = "No comments found in the uploaded file.";

/// Generic recommendations returned with every report.
///
/// Not derived from the comments. The negative-bucket keywords would be the
/// natural input if this ever becomes data-driven.
pub const SUGGESTED_CHANGES: &[&str] = &[
    "Consider stakeholder feedback on implementation timelines and provide more detailed transition periods",
    "Review cost implications mentioned in opposition comments and assess impact mitigation measures",
    "Clarify ambiguous language or definitions that generated questions or concerns",
    "Evaluate suggestions for alternative approaches or modifications proposed by stakeholders",
    "Consider pilot programs or phased implementation for contentious provisions",
    "Review enforcement mechanisms and penalties based on stakeholder input",
    "Address compliance burden concerns raised by affected parties",
    "Consider additional exemptions or special provisions for specific sectors or circumstances",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Pass,
    PassWithModifications,
    Modify,
    ReviewRequired,
    InsufficientData,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::PassWithModifications => "PASS_WITH_MODIFICATIONS",
            Self::Modify => "MODIFY",
            Self::ReviewRequired => "REVIEW_REQUIRED",
            Self::InsufficientData => "INSUFFICIENT_DATA",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub decision: Decision,
    pub rationale: String,
}

/// Compose the human-readable summary of an analysis.
pub fn summarize(analysis: &Analysis) -> String {
    let total_comments = analysis.total_comments();
    if total_comments == 0 {
        return NO_COMMENTS_SUMMARY.to_string();
    }

    let num_sections = analysis.section_count();
    let mut parts = vec![format!(
        "Analysis of {total_comments} stakeholder comments across {num_sections} section(s)."
    )];

    let favour = analysis.total_in_favour;
    let against = analysis.total_against;
    let with_stance = favour.saturating_add(against);
    if with_stance > 0 {
        let favour_pct = share(favour, against) * 100.0;
        let against_pct = share(against, favour) * 100.0;
        parts.push(format!(
            "Sentiment breakdown: {favour} in favour ({favour_pct:.1}%), {against} against ({against_pct:.1}%)."
        ));
    }

    if num_sections > 1 {
        let breakdown: Vec<String> = analysis
            .parts
            .iter()
            .map(|p| {
                format!(
                    "{}: {} comments ({} in favour, {} against)",
                    p.title,
                    p.bullets.len(),
                    p.in_favour,
                    p.against
                )
            })
            .collect();
        parts.push(format!("Section breakdown: {}", breakdown.join("; ")));
    }

    parts.join(" ")
}

/// Decide from an analysis. See [`decide_counts`].
pub fn decide(analysis: &Analysis) -> DecisionResult {
    decide_counts(
        analysis.total_in_favour,
        analysis.total_against,
        analysis.total_comments(),
    )
}

/// Decide from the favour/against totals and the comment count.
pub fn decide_counts(favour: u64, against: u64, total_comments: usize) -> DecisionResult {
    if total_comments == 0 {
        return DecisionResult {
            decision: Decision::InsufficientData,
            rationale: "No stakeholder comments available for decision-making.".to_string(),
        };
    }

    let with_stance = favour.saturating_add(against);
    if with_stance == 0 {
        return DecisionResult {
            decision: Decision::ReviewRequired,
            rationale: format!(
                "Manual review recommended for {total_comments} stakeholder comments to determine overall sentiment."
            ),
        };
    }

    let support_ratio = share(favour, against);
    let rate = support_ratio * 100.0;
    let (decision, rationale) = if support_ratio >= PASS_THRESHOLD {
        (
            Decision::Pass,
            format!(
                "Strong stakeholder support with {favour} in favour vs {against} against ({rate:.1}% support rate)."
            ),
        )
    } else if support_ratio >= MODIFY_THRESHOLD {
        (
            Decision::PassWithModifications,
            format!(
                "Moderate stakeholder support with {favour} in favour vs {against} against ({rate:.1}% support rate). Consider addressing concerns raised."
            ),
        )
    } else {
        (
            Decision::Modify,
            format!(
                "Limited stakeholder support with {favour} in favour vs {against} against ({rate:.1}% support rate). Significant modifications recommended."
            ),
        )
    };

    DecisionResult {
        decision,
        rationale,
    }
}

/// The fixed list of policy-review recommendations.
pub fn suggest_changes() -> Vec<String> {
    SUGGESTED_CHANGES.iter().map(|s| s.to_string()).collect()
}

/// `part / (part + rest)`, summed in `f64` so saturated tallies keep their
/// proportion.
fn share(part: u64, rest: u64) -> f64 {
    part as f64 / (part as f64 + rest as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ParsedSection;

    fn part(title: &str, in_favour: u64, against: u64, bullets: &[&str]) -> ParsedSection {
        ParsedSection {
            title: title.to_string(),
            in_favour,
            against,
            bullets: bullets.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn analysis(parts: Vec<ParsedSection>) -> Analysis {
        Analysis {
            total_in_favour: parts.iter().map(|p| p.in_favour).sum(),
            total_against: parts.iter().map(|p| p.against).sum(),
            all_comments: parts.iter().flat_map(|p| p.bullets.clone()).collect(),
            parts,
        }
    }

    #[test]
    fn boundary_exactly_seventy_percent_passes() {
        let result = decide_counts(70, 30, 100);
        assert_eq!(result.decision, Decision::Pass);
        assert_eq!(
            result.rationale,
            "Strong stakeholder support with 70 in favour vs 30 against (70.0% support rate)."
        );
    }

    #[test]
    fn boundary_just_below_seventy_percent() {
        let result = decide_counts(69, 31, 100);
        assert_eq!(result.decision, Decision::PassWithModifications);
        assert!(result.rationale.contains("69 in favour vs 31 against (69.0% support rate)"));
    }

    #[test]
    fn boundary_exactly_fifty_percent() {
        assert_eq!(
            decide_counts(50, 50, 1).decision,
            Decision::PassWithModifications
        );
    }

    #[test]
    fn boundary_below_fifty_percent_modifies() {
        let result = decide_counts(49, 51, 100);
        assert_eq!(result.decision, Decision::Modify);
        assert!(result.rationale.contains("(49.0% support rate)"));
        assert!(result.rationale.ends_with("Significant modifications recommended."));
    }

    #[test]
    fn no_tallies_requires_review() {
        let result = decide_counts(0, 0, 12);
        assert_eq!(result.decision, Decision::ReviewRequired);
        assert!(result.rationale.contains("12 stakeholder comments"));
    }

    #[test]
    fn no_comments_is_insufficient() {
        assert_eq!(decide_counts(0, 0, 0).decision, Decision::InsufficientData);
        // Tallies without any comment bodies are still insufficient.
        assert_eq!(decide_counts(10, 2, 0).decision, Decision::InsufficientData);
    }

    #[test]
    fn decide_is_deterministic() {
        for (f, a, n) in [(70, 30, 5), (1, 2, 3), (0, 0, 4), (3, 0, 0)] {
            assert_eq!(decide_counts(f, a, n), decide_counts(f, a, n));
        }
    }

    #[test]
    fn decide_reads_analysis_totals() {
        let a = analysis(vec![part("Part 1:", 8, 2, &["x", "y"])]);
        assert_eq!(decide(&a), decide_counts(8, 2, 2));
    }

    #[test]
    fn rationale_rounds_to_one_decimal() {
        let result = decide_counts(2, 1, 3);
        assert!(result.rationale.contains("(66.7% support rate)"));
    }

    #[test]
    fn summary_for_empty_analysis() {
        assert_eq!(summarize(&Analysis::default()), NO_COMMENTS_SUMMARY);
    }

    #[test]
    fn summary_single_section_without_stance() {
        let a = analysis(vec![part("Full Document", 0, 0, &["a", "b", "c"])]);
        assert_eq!(
            summarize(&a),
            "Analysis of 3 stakeholder comments across 1 section(s)."
        );
    }

    #[test]
    fn summary_with_stance_and_breakdown() {
        let a = analysis(vec![
            part("Part 1:", 3, 1, &["a", "b"]),
            part("Part 2:", 0, 4, &["c"]),
        ]);
        assert_eq!(
            summarize(&a),
            "Analysis of 3 stakeholder comments across 2 section(s). \
             Sentiment breakdown: 3 in favour (37.5%), 5 against (62.5%). \
             Section breakdown: Part 1:: 2 comments (3 in favour, 1 against); \
             Part 2:: 1 comments (0 in favour, 4 against)"
        );
    }

    #[test]
    fn suggested_changes_are_static() {
        let changes = suggest_changes();
        assert_eq!(changes.len(), 8);
        assert_eq!(changes, suggest_changes());
        assert!(changes[0].starts_with("Consider stakeholder feedback"));
    }

    #[test]
    fn decision_serialises_screaming_snake() {
        let json = serde_json::to_string(&Decision::PassWithModifications).unwrap();
        assert_eq!(json, r#""PASS_WITH_MODIFICATIONS""#);
        assert_eq!(Decision::ReviewRequired.to_string(), "REVIEW_REQUIRED");
    }

    #[test]
    fn saturated_tallies_still_decide() {
        let result = decide_counts(u64::MAX, 1, 2);
        assert_eq!(result.decision, Decision::Pass);
        assert!(result.rationale.contains("(100.0% support rate)"));

        let a = analysis(vec![part("Part 1:", u64::MAX, u64::MAX, &["a"])]);
        assert!(summarize(&a).contains("(50.0%)"));
        assert_eq!(decide(&a).decision, Decision::PassWithModifications);
    }
}
