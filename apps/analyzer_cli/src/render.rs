use std::fmt::Write as _;

use client_core::QualityReport;

const GAUGE_WIDTH: usize = 20;

/// Plain-text result panel: one bar per indicator, then the numbered
/// suggestion list.
pub fn render_report(report: &QualityReport<'_>) -> String {
    let mut out = String::from("Test case quality\n");
    for indicator in report.indicators() {
        let filled = usize::from(indicator.gauge.value()) * GAUGE_WIDTH / 100;
        let _ = writeln!(
            out,
            "  [{}{}] {}",
            "#".repeat(filled),
            "-".repeat(GAUGE_WIDTH - filled),
            indicator.caption
        );
    }

    out.push_str("Suggestions\n");
    if report.suggestion_count() == 0 {
        out.push_str("  (none)\n");
    }
    for (index, suggestion) in report.suggestions().enumerate() {
        let _ = writeln!(out, "  {}. {suggestion}", index + 1);
    }
    out
}
