//! Built-in No-Action rules.
//!
//! Thresholds are the ones the analysts used when triaging the D1-D100
//! sheets by hand.

use crate::columns::*;

use super::types::{ClassificationRule, Predicate};

pub const HIGH_CONFIDENCE_NO_ACTION: &str = "high-confidence-no-action";
pub const MEDIUM_CONFIDENCE_NO_ACTION: &str = "medium-confidence-no-action";
pub const LEGITIMATE_EMAIL: &str = "legitimate-email";
pub const NO_ACTION_CANDIDATE: &str = "no-action-candidate";

/// Request types that never qualify for No Action.
pub const SUSPICIOUS_REQUESTS: &[&str] = &[
    "bank_detail_update",
    "gift_card_request",
    "password_reset",
    "payment_request",
];

/// Wider list used by the high-confidence tier.
pub const HIGH_CONFIDENCE_SUSPICIOUS_REQUESTS: &[&str] = &[
    "bank_detail_update",
    "gift_card_request",
    "password_reset",
    "payment_request",
    "document_download",
];

/// Narrower list used by the medium-confidence tier.
pub const MEDIUM_CONFIDENCE_SUSPICIOUS_REQUESTS: &[&str] =
    &["bank_detail_update", "gift_card_request", "password_reset"];

/// All built-in rules, in tier order.
pub fn builtin_rules() -> Vec<ClassificationRule> {
    vec![
        high_confidence_no_action(),
        medium_confidence_no_action(),
        legitimate_email(),
        no_action_candidate(),
    ]
}

pub fn high_confidence_no_action() -> ClassificationRule {
    ClassificationRule::new(HIGH_CONFIDENCE_NO_ACTION, "High-confidence No Action")
        .with_description("Strong reputation, clean content, no threats, no urgency")
        .with(Predicate::gt(SENDER_REPUTATION, 0.5))
        .with(Predicate::lt(SPAM_SCORE, 0.1))
        .with(Predicate::lt(TEMP_EMAIL_LIKELIHOOD, 0.1))
        .with(Predicate::equals(MALICIOUS_ATTACHMENTS, 0.0))
        .with(Predicate::equals(SENDER_KNOWN_MALICIOUS, 0.0))
        .with(Predicate::equals(SPOOF_DETECTED, 0.0))
        .with(Predicate::equals(EXPLOIT_DETECTED, 0.0))
        .with(Predicate::none_of(REQUEST_TYPE, HIGH_CONFIDENCE_SUSPICIOUS_REQUESTS))
        .with(Predicate::lt(BEHAVIORAL_SCORE, 0.2))
        .with(Predicate::lt(EXFILTRATION_SCORE, 0.2))
        .with(Predicate::lt(AMSI_SUSPICION, 0.1))
        .with(Predicate::equals(URGENCY_KEYWORDS, 0.0))
        .with(Predicate::equals(USER_MARKED_SPAM, 0.0))
}

pub fn medium_confidence_no_action() -> ClassificationRule {
    ClassificationRule::new(MEDIUM_CONFIDENCE_NO_ACTION, "Medium-confidence No Action")
        .with_description("Acceptable reputation, low spam, no malicious components")
        .with(Predicate::gt(SENDER_REPUTATION, 0.3))
        .with(Predicate::lt(SPAM_SCORE, 0.2))
        .with(Predicate::equals(MALICIOUS_ATTACHMENTS, 0.0))
        .with(Predicate::equals(SENDER_KNOWN_MALICIOUS, 0.0))
        .with(Predicate::equals(EXPLOIT_DETECTED, 0.0))
        .with(Predicate::none_of(REQUEST_TYPE, MEDIUM_CONFIDENCE_SUSPICIOUS_REQUESTS))
        .with(Predicate::lt(BEHAVIORAL_SCORE, 0.3))
        .with(Predicate::lt(EXFILTRATION_SCORE, 0.3))
        .with(Predicate::lt(AMSI_SUSPICION, 0.2))
}

pub fn legitimate_email() -> ClassificationRule {
    ClassificationRule::new(LEGITIMATE_EMAIL, "Legitimate email")
        .with_description("Good reputation and no threat indicators")
        .with(Predicate::gt(SENDER_REPUTATION, 0.5))
        .with(Predicate::lt(SPAM_SCORE, 0.1))
        .with(Predicate::lt(TEMP_EMAIL_LIKELIHOOD, 0.1))
        .with(Predicate::equals(MALICIOUS_ATTACHMENTS, 0.0))
        .with(Predicate::equals(SENDER_KNOWN_MALICIOUS, 0.0))
        .with(Predicate::equals(SPOOF_DETECTED, 0.0))
        .with(Predicate::equals(EXPLOIT_DETECTED, 0.0))
        .with(Predicate::none_of(REQUEST_TYPE, SUSPICIOUS_REQUESTS))
        .with(Predicate::lt(BEHAVIORAL_SCORE, 0.2))
        .with(Predicate::lt(EXFILTRATION_SCORE, 0.2))
        .with(Predicate::lt(AMSI_SUSPICION, 0.1))
}

pub fn no_action_candidate() -> ClassificationRule {
    ClassificationRule::new(NO_ACTION_CANDIDATE, "No Action candidate")
        .with_description("Legitimate-looking email with slightly wider behavioral limits")
        .with(Predicate::gt(SENDER_REPUTATION, 0.5))
        .with(Predicate::lt(SPAM_SCORE, 0.1))
        .with(Predicate::lt(TEMP_EMAIL_LIKELIHOOD, 0.1))
        .with(Predicate::equals(MALICIOUS_ATTACHMENTS, 0.0))
        .with(Predicate::equals(SENDER_KNOWN_MALICIOUS, 0.0))
        .with(Predicate::equals(SPOOF_DETECTED, 0.0))
        .with(Predicate::equals(EXPLOIT_DETECTED, 0.0))
        .with(Predicate::none_of(REQUEST_TYPE, SUSPICIOUS_REQUESTS))
        .with(Predicate::lt(BEHAVIORAL_SCORE, 0.3))
        .with(Predicate::lt(EXFILTRATION_SCORE, 0.3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_rules_non_empty() {
        let rules = builtin_rules();
        let mut ids: Vec<&str> = rules.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), rules.len());
        assert!(rules.iter().all(|r| !r.predicates.is_empty()));
    }

    #[test]
    fn medium_tier_is_looser_than_high() {
        assert!(medium_confidence_no_action().predicates.len() < high_confidence_no_action().predicates.len());
    }
}
