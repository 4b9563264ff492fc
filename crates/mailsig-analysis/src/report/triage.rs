//! Triage reporter: the No-Action triage text report.

use std::fmt::Write;

use mailsig_core::errors::ReportError;

use crate::triage::{CandidateStatus, TriageEntry, TriageOutcome};

const WIDE: usize = 80;
const RULE: usize = 50;

/// Renders a [`TriageOutcome`] as text.
pub struct TriageReporter;

impl TriageReporter {
    pub fn generate(&self, outcome: &TriageOutcome) -> Result<String, ReportError> {
        render(outcome).map_err(|e| ReportError::RenderFailed {
            format: "triage".to_string(),
            message: e.to_string(),
        })
    }
}

fn render(outcome: &TriageOutcome) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", "=".repeat(WIDE))?;
    writeln!(out, "NO ACTION TRIAGE")?;
    writeln!(out, "{}", "=".repeat(WIDE))?;
    writeln!(out, "Emails analyzed: {}", outcome.row_count)?;
    writeln!(
        out,
        "Current label column: {} (No Action = {})",
        outcome.label_column, outcome.no_action_label
    )?;

    for (n, tier) in outcome.tiers.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "TIER {}: {} ({})", n + 1, tier.rule_name.to_uppercase(), tier.rule_id)?;
        writeln!(out, "{}", "-".repeat(RULE))?;
        writeln!(out, "Found {} emails", tier.entries.len())?;
        for entry in &tier.entries {
            entry_line(&mut out, entry)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "GOOD AUTHENTICATION")?;
    writeln!(out, "{}", "-".repeat(RULE))?;
    writeln!(out, "Found {} emails", outcome.good_auth.len())?;
    for entry in &outcome.good_auth {
        writeln!(
            out,
            "{}: spf={} dkim={} dmarc={} reputation={} current={}",
            entry.label,
            entry.auth.spf.as_deref().unwrap_or("-"),
            entry.auth.dkim.as_deref().unwrap_or("-"),
            entry.auth.dmarc.as_deref().unwrap_or("-"),
            opt_num(entry.reputation),
            opt_label(entry.current_label),
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(WIDE))?;
    writeln!(out, "FINAL RECOMMENDATIONS")?;
    writeln!(out, "{}", "=".repeat(WIDE))?;
    let mut any = false;
    for tier in &outcome.tiers {
        let relabel: Vec<&TriageEntry> = tier
            .entries
            .iter()
            .filter(|e| e.status == CandidateStatus::ShouldBeNoAction)
            .collect();
        if relabel.is_empty() {
            continue;
        }
        any = true;
        writeln!(out, "{} ({} emails):", tier.rule_name, relabel.len())?;
        for entry in relabel {
            writeln!(
                out,
                "  {} -> No Action (currently {})",
                entry.label,
                opt_label(entry.current_label)
            )?;
        }
    }
    if !any {
        writeln!(out, "No emails need relabelling.")?;
    }

    writeln!(out)?;
    writeln!(out, "CANDIDATES BY CURRENT LABEL")?;
    writeln!(out, "{}", "-".repeat(RULE))?;
    for (label, rows) in &outcome.by_current_label {
        writeln!(out, "{label}: {} emails ({})", rows.len(), rows.join(", "))?;
    }

    writeln!(out)?;
    writeln!(out, "CURRENT NO ACTION EMAILS")?;
    writeln!(out, "{}", "-".repeat(RULE))?;
    writeln!(out, "Found {} emails", outcome.current_no_action.len())?;
    if !outcome.current_no_action.is_empty() {
        writeln!(out, "{}", outcome.current_no_action.join(", "))?;
        writeln!(out, "Patterns:")?;
        for (signal, avg) in &outcome.pattern.averages {
            writeln!(out, "  average {signal}: {avg:.3}")?;
        }
        for (signal, values) in &outcome.pattern.distinct {
            let values: Vec<&str> = values.iter().map(String::as_str).collect();
            writeln!(out, "  {signal} values: {}", values.join(", "))?;
        }
    }

    writeln!(out)?;
    writeln!(out, "BORDERLINE CASES ({})", outcome.borderline_signal)?;
    writeln!(out, "{}", "-".repeat(RULE))?;
    writeln!(out, "Found {} emails", outcome.borderline.len())?;
    for entry in &outcome.borderline {
        writeln!(
            out,
            "{}: {}={} spam={} request={} current={}",
            entry.label,
            outcome.borderline_signal,
            entry.value,
            opt_num(entry.spam),
            entry.request_type.as_deref().unwrap_or("-"),
            opt_label(entry.current_label),
        )?;
    }

    Ok(out)
}

fn entry_line(out: &mut String, entry: &TriageEntry) -> std::fmt::Result {
    writeln!(
        out,
        "{}: reputation={} spam={} request={} current={} [{}]",
        entry.label,
        opt_num(entry.reputation),
        opt_num(entry.spam),
        entry.request_type.as_deref().unwrap_or("-"),
        opt_label(entry.current_label),
        entry.status.label()
    )
}

fn opt_num(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn opt_label(v: Option<i64>) -> String {
    v.map_or_else(|| "-".to_string(), |v| v.to_string())
}
