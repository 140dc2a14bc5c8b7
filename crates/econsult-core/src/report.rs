//! The structured result handed to callers of the analysis pipeline.

use serde::Serialize;

use crate::analysis::{Analysis, ParsedSection};
use crate::decision::{Decision, decide, suggest_changes, summarize};
use crate::sentiment::{Sentiment, SentimentResult};

/// Full analysis of one consultation document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub summary: String,
    pub decision: Decision,
    pub rationale: String,
    pub suggested_changes: Vec<String>,
    pub sections: Vec<ParsedSection>,
    pub sentiments: SentimentResult,
    pub total_comments: usize,
    /// True when the document declared no favour/against tallies and the
    /// totals below were taken from the sentiment counts instead.
    pub inferred_from_sentiment: bool,
    pub total_in_favour: u64,
    pub total_against: u64,
}

impl AnalysisReport {
    /// Assemble the report from an aggregated analysis and its sentiment
    /// partition.
    ///
    /// When the document declared no tallies and at least one comment was
    /// classified, positive and negative counts stand in for the favour and
    /// against totals before the summary and decision are computed.
    pub fn build(mut analysis: Analysis, sentiments: SentimentResult) -> Self {
        let mut inferred_from_sentiment = false;
        if !analysis.has_declared_stance() && sentiments.total() > 0 {
            analysis.total_in_favour = sentiments.count(Sentiment::Positive) as u64;
            analysis.total_against = sentiments.count(Sentiment::Negative) as u64;
            inferred_from_sentiment = true;
        }

        let summary = summarize(&analysis);
        let decision = decide(&analysis);

        Self {
            summary,
            decision: decision.decision,
            rationale: decision.rationale,
            suggested_changes: suggest_changes(),
            total_comments: analysis.total_comments(),
            inferred_from_sentiment,
            total_in_favour: analysis.total_in_favour,
            total_against: analysis.total_against,
            sections: analysis.parts,
            sentiments,
        }
    }
}
