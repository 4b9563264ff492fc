//! SPF/DKIM/DMARC authentication scoring.

use mailsig_core::types::Row;
use serde::Serialize;

use crate::columns::{DKIM_RESULT, DMARC_RESULT, SPF_RESULT};

const PASS: &str = "pass";

/// The three authentication results of a row, lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthResults {
    pub spf: Option<String>,
    pub dkim: Option<String>,
    pub dmarc: Option<String>,
}

impl AuthResults {
    /// Number of results equal to `pass`.
    pub fn score(&self) -> usize {
        [&self.spf, &self.dkim, &self.dmarc]
            .into_iter()
            .filter(|r| r.as_deref() == Some(PASS))
            .count()
    }
}

pub fn auth_results(row: &Row) -> AuthResults {
    let result = |signal: &str| {
        row.get(signal)
            .and_then(|v| v.as_category())
            .map(|c| c.into_owned())
    };
    AuthResults {
        spf: result(SPF_RESULT),
        dkim: result(DKIM_RESULT),
        dmarc: result(DMARC_RESULT),
    }
}

/// Count of passing authentication results, 0..=3.
pub fn auth_score(row: &Row) -> usize {
    auth_results(row).score()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_passes_case_insensitively() {
        let row = Row::from_pairs(
            "D5",
            [("spf_result", "PASS"), ("dkim_result", "pass"), ("dmarc_result", "fail")],
        );
        assert_eq!(auth_score(&row), 2);
    }

    #[test]
    fn missing_results_do_not_count() {
        let row = Row::from_pairs("D6", [("spf_result", "pass")]);
        let results = auth_results(&row);
        assert_eq!(results.score(), 1);
        assert!(results.dkim.is_none());
    }
}
