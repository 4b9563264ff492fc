//! Text reporter: the detailed human-readable batch report.

use std::fmt::Write;

use mailsig_core::errors::ReportError;

use super::Reporter;
use crate::analysis::{BatchAnalysis, EmailAnalysis};
use crate::signals::{RiskLevel, SignalCategory};

const WIDE: usize = 100;
const NARROW: usize = 80;
const RULE: usize = 30;

/// Text reporter for the detailed analysis report.
pub struct TextReporter;

impl Reporter for TextReporter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn generate(&self, analysis: &BatchAnalysis) -> Result<String, ReportError> {
        render(analysis).map_err(|e| ReportError::RenderFailed {
            format: "text".to_string(),
            message: e.to_string(),
        })
    }
}

fn render(analysis: &BatchAnalysis) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    let total = analysis.signal_count;

    banner(&mut out, WIDE, &format!("DETAILED ANALYSIS REPORT: EMAIL DATA {}", analysis.span()))?;
    writeln!(out, "Total emails analyzed: {}", analysis.emails.len())?;
    writeln!(out, "Total detection signals: {total}")?;
    writeln!(out, "Data source: {}", analysis.source)?;

    for email in &analysis.emails {
        email_section(&mut out, email, total)?;
    }

    writeln!(out)?;
    banner(&mut out, WIDE, "COMPARATIVE ANALYSIS")?;
    writeln!(out, "SIGNAL ACTIVITY COMPARISON:")?;
    writeln!(out, "{}", "-".repeat(RULE))?;
    for email in &analysis.emails {
        writeln!(
            out,
            "{}: {}/{} signals ({:.1}%)",
            email.label,
            email.active_count(),
            total,
            email.activity_percentage(total)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "MOST COMMON ACTIVE SIGNALS:")?;
    writeln!(out, "{}", "-".repeat(RULE))?;
    let emails = analysis.emails.len().max(1);
    for freq in &analysis.signal_frequency {
        writeln!(
            out,
            "{}: active in {}/{} emails ({:.1}%)",
            freq.signal,
            freq.count,
            analysis.emails.len(),
            freq.count as f64 / emails as f64 * 100.0
        )?;
    }

    let stats = &analysis.stats;
    writeln!(out)?;
    writeln!(out, "SUMMARY CONCLUSIONS:")?;
    writeln!(out, "{}", "-".repeat(RULE))?;
    if let Some((label, count)) = &stats.most_active {
        writeln!(out, "Most active email: {label} ({count} signals)")?;
    }
    if let Some((label, count)) = &stats.least_active {
        writeln!(out, "Least active email: {label} ({count} signals)")?;
    }
    writeln!(
        out,
        "Average signal activity: {:.1} signals per email",
        stats.average_active
    )?;

    writeln!(out)?;
    banner(&mut out, NARROW, "BATCH SUMMARY")?;
    for email in &analysis.emails {
        writeln!(
            out,
            "{}: {} signals triggered - {} risk",
            email.label,
            email.active_count(),
            email.risk_level
        )?;
    }
    writeln!(out)?;
    writeln!(out, "BATCH STATISTICS:")?;
    writeln!(out, "- Average signals per email: {:.1}", stats.average_active)?;
    writeln!(out, "- Range of signals: {} - {}", stats.min_active, stats.max_active)?;
    writeln!(out, "- Risk distribution:")?;
    for level in RiskLevel::ALL {
        if let Some(count) = stats.risk_distribution.get(&level) {
            writeln!(out, "  - {level}: {count} emails")?;
        }
    }

    Ok(out)
}

fn email_section(out: &mut String, email: &EmailAnalysis, total: usize) -> std::fmt::Result {
    writeln!(out)?;
    banner(out, NARROW, &format!("EMAIL: {}", email.label))?;
    writeln!(out, "Total signals triggered: {}", email.active_count())?;
    writeln!(out, "Signal distribution:")?;
    for category in SignalCategory::ALL {
        let count = email.category_count(category);
        if count > 0 {
            writeln!(out, "  - {} signals: {count}", category.label())?;
        }
    }

    for category in SignalCategory::ALL {
        let mut signals = email.in_category(category).peekable();
        if signals.peek().is_none() {
            continue;
        }
        writeln!(out)?;
        writeln!(out, "{}:", category.heading())?;
        writeln!(out, "{}", "-".repeat(RULE))?;
        for signal in signals {
            writeln!(out, "  {}: {}", signal.name, signal.value)?;
        }
    }

    if !email.top_numeric.is_empty() {
        writeln!(out)?;
        writeln!(out, "TOP NUMERIC SIGNALS:")?;
        writeln!(out, "{}", "-".repeat(RULE))?;
        for (signal, value) in &email.top_numeric {
            writeln!(out, "  {signal}: {value}")?;
        }
        writeln!(out, "  Total numeric score: {:.3}", email.numeric_total)?;
    }

    if !email.inactive.is_empty() {
        writeln!(out)?;
        writeln!(out, "INACTIVE SIGNALS ({}):", email.inactive.len())?;
        writeln!(out, "{}", "-".repeat(RULE))?;
        for chunk in email.inactive.chunks(3) {
            writeln!(out, "  {}", chunk.join(", "))?;
        }
    }

    writeln!(out)?;
    writeln!(out, "RISK SUMMARY:")?;
    writeln!(out, "{}", "-".repeat(RULE))?;
    writeln!(out, "Total active signals: {}/{}", email.active_count(), total)?;
    writeln!(
        out,
        "Signal activity percentage: {:.1}%",
        email.activity_percentage(total)
    )?;
    if email.high_risk.is_empty() {
        writeln!(out, "No high-risk indicators detected.")?;
    } else {
        writeln!(out, "HIGH RISK INDICATORS:")?;
        for indicator in &email.high_risk {
            writeln!(out, "  [!] {indicator}")?;
        }
    }
    writeln!(out, "RISK ASSESSMENT: {}", email.risk_level)?;
    writeln!(out, "Recommendation: {}", email.recommendation)?;
    Ok(())
}

fn banner(out: &mut String, width: usize, title: &str) -> std::fmt::Result {
    writeln!(out, "{}", "=".repeat(width))?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(width))
}
