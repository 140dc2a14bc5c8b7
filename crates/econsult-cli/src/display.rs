//! Vertical card display for analysis reports.
//!
//! Renders an [`AnalysisReport`] as a grouped, human-readable card: the
//! decision first, then totals, per-section tallies, sentiment and the
//! suggested changes.

use econsult_core::{AnalysisReport, KeywordFreqs, Sentiment};

const MAX_LIST_ITEMS: usize = 10;

// ── Public API ──

/// Render a report as a card.
pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();

    line(&mut out, format_args!("=== {} ===", report.decision));
    line(&mut out, format_args!("{}", report.rationale));
    out.push('\n');

    header(&mut out, "Summary");
    line(&mut out, format_args!("  {}", report.summary));
    out.push('\n');

    render_totals(&mut out, report);
    render_sections(&mut out, report);
    render_sentiment(&mut out, report);
    render_keywords(&mut out, report);

    header(&mut out, "Suggested Changes");
    for change in &report.suggested_changes {
        line(&mut out, format_args!("  - {change}"));
    }

    out.trim_end().to_string()
}

// ── Card sections ──

fn render_totals(out: &mut String, report: &AnalysisReport) {
    header(out, "Totals");
    field(out, "comments", report.total_comments);
    field(out, "in favour", report.total_in_favour);
    field(out, "against", report.total_against);
    if report.inferred_from_sentiment {
        field(out, "tallies", "inferred from sentiment");
    }
    out.push('\n');
}

fn render_sections(out: &mut String, report: &AnalysisReport) {
    if report.sections.is_empty() {
        return;
    }
    header(out, "Sections");
    for section in &report.sections {
        line(
            out,
            format_args!(
                "  {:<26} {} comments ({} in favour, {} against)",
                section.title,
                section.bullets.len(),
                section.in_favour,
                section.against
            ),
        );
    }
    out.push('\n');
}

fn render_sentiment(out: &mut String, report: &AnalysisReport) {
    if report.sentiments.total() == 0 {
        return;
    }
    header(out, "Sentiment");
    for sentiment in Sentiment::ALL {
        field(out, sentiment.as_str(), report.sentiments.count(sentiment));
    }
    out.push('\n');
}

fn render_keywords(out: &mut String, report: &AnalysisReport) {
    let buckets: Vec<(Sentiment, &KeywordFreqs)> = Sentiment::ALL
        .into_iter()
        .filter_map(|s| {
            report
                .sentiments
                .keyword_freqs
                .get(&s)
                .filter(|f| !f.is_empty())
                .map(|f| (s, f))
        })
        .collect();
    if buckets.is_empty() {
        return;
    }

    header(out, "Top Keywords");
    for (sentiment, freqs) in buckets {
        let items: Vec<String> = freqs
            .iter()
            .take(MAX_LIST_ITEMS)
            .map(|(token, count)| format!("{token} ({count})"))
            .collect();
        let more = freqs.len().saturating_sub(MAX_LIST_ITEMS);
        if more > 0 {
            field(
                out,
                sentiment.as_str(),
                format_args!("{}, … and {more} more", items.join(", ")),
            );
        } else {
            field(out, sentiment.as_str(), items.join(", "));
        }
    }
    out.push('\n');
}

// ── Helpers ──

fn header(out: &mut String, title: &str) {
    line(out, format_args!("{title}"));
}

fn field(out: &mut String, name: &str, value: impl std::fmt::Display) {
    line(out, format_args!("  {name:<26} {value}"));
}

fn line(out: &mut String, args: std::fmt::Arguments<'_>) {
    out.push_str(&args.to_string());
    out.push('\n');
}
