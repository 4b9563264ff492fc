//! Column names of the detection-signal sheet referenced by built-in rules.

pub const SENDER_REPUTATION: &str = "sender_domain_reputation_score";
pub const SPAM_SCORE: &str = "content_spam_score";
pub const TEMP_EMAIL_LIKELIHOOD: &str = "sender_temp_email_likelihood";
pub const MALICIOUS_ATTACHMENTS: &str = "malicious_attachment_Count";
/// Spelled as exported by the source sheet.
pub const SENDER_KNOWN_MALICIOUS: &str = "sender_known_malicios";
pub const SPOOF_DETECTED: &str = "sender_spoof_detected";
pub const EXPLOIT_DETECTED: &str = "any_exploit_pattern_detected";
pub const BEHAVIORAL_SCORE: &str = "max_behavioral_sandbox_score";
pub const EXFILTRATION_SCORE: &str = "max_exfiltration_behavior_score";
pub const AMSI_SUSPICION: &str = "max_amsi_suspicion_score";
pub const URGENCY_KEYWORDS: &str = "urgency_keywords_present";
pub const USER_MARKED_SPAM: &str = "user_marked_as_spam_before";
pub const REQUEST_TYPE: &str = "request_type";
pub const SPF_RESULT: &str = "spf_result";
pub const DKIM_RESULT: &str = "dkim_result";
pub const DMARC_RESULT: &str = "dmarc_result";
