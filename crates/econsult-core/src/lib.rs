pub mod analysis;
pub mod decision;
pub mod keywords;
pub mod report;
pub mod sections;
pub mod sentiment;
pub mod text;

pub use analysis::{Analysis, ParsedSection, aggregate};
pub use decision::{Decision, DecisionResult, decide, suggest_changes, summarize};
pub use keywords::{KeywordFreqs, keyword_freqs};
pub use report::AnalysisReport;
pub use sections::{Section, SectionCounts, extract_bullets_and_counts, parse_sections};
pub use sentiment::{Sentiment, SentimentResult};
pub use text::{normalize, tokenize_and_filter};
