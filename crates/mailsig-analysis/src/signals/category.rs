//! Keyword categorization of signal names.

use std::fmt;

use serde::Serialize;

/// Report grouping of a signal, assigned from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    Sender,
    Authentication,
    Attachment,
    Content,
    Url,
    Behavioral,
    Other,
}

const SENDER_OR_AUTH: &[&str] = &[
    "sender",
    "domain_reputation",
    "spf",
    "dkim",
    "dmarc",
    "return_path",
    "reply_path",
];
const SENDER_ONLY: &[&str] = &["sender", "domain", "return_path", "reply_path"];
const ATTACHMENT: &[&str] = &[
    "attachment",
    "file",
    "hash",
    "metadata",
    "executable",
    "macro",
    "vbscript",
    "javascript",
];
const CONTENT: &[&str] = &["content", "spam", "urgency", "html", "image", "marketing"];
const URL: &[&str] = &["url", "link", "redirect", "ssl", "site"];
const BEHAVIORAL: &[&str] = &["behavior", "sandbox", "execution", "process"];

impl SignalCategory {
    pub const ALL: [SignalCategory; 7] = [
        Self::Sender,
        Self::Authentication,
        Self::Attachment,
        Self::Content,
        Self::Url,
        Self::Behavioral,
        Self::Other,
    ];

    /// Categorize a signal by keywords in its lower-cased name. The first
    /// matching group wins.
    pub fn of(signal: &str) -> Self {
        let name = signal.to_ascii_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| name.contains(w));
        if has(SENDER_OR_AUTH) {
            if has(SENDER_ONLY) {
                Self::Sender
            } else {
                Self::Authentication
            }
        } else if has(ATTACHMENT) {
            Self::Attachment
        } else if has(CONTENT) {
            Self::Content
        } else if has(URL) {
            Self::Url
        } else if has(BEHAVIORAL) {
            Self::Behavioral
        } else {
            Self::Other
        }
    }

    /// Heading used in text reports.
    pub fn heading(self) -> &'static str {
        match self {
            Self::Sender => "SENDER-RELATED SIGNALS",
            Self::Authentication => "AUTHENTICATION SIGNALS",
            Self::Attachment => "ATTACHMENT SIGNALS",
            Self::Content => "CONTENT SIGNALS",
            Self::Url => "URL SIGNALS",
            Self::Behavioral => "BEHAVIORAL SIGNALS",
            Self::Other => "OTHER SIGNALS",
        }
    }

    /// Short label used in distribution lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sender => "Sender/Domain",
            Self::Authentication => "Authentication",
            Self::Attachment => "Attachment",
            Self::Content => "Content",
            Self::Url => "URL",
            Self::Behavioral => "Behavioral",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_beats_authentication_when_both_match() {
        assert_eq!(SignalCategory::of("sender_domain_reputation_score"), SignalCategory::Sender);
        assert_eq!(SignalCategory::of("spf_result"), SignalCategory::Authentication);
        assert_eq!(SignalCategory::of("return_path_mismatch_with_from"), SignalCategory::Sender);
    }

    #[test]
    fn keyword_groups() {
        assert_eq!(SignalCategory::of("malicious_attachment_Count"), SignalCategory::Attachment);
        assert_eq!(SignalCategory::of("content_spam_score"), SignalCategory::Content);
        assert_eq!(SignalCategory::of("ssl_validity_status"), SignalCategory::Url);
        assert_eq!(
            SignalCategory::of("max_behavioral_sandbox_score"),
            SignalCategory::Behavioral
        );
        assert_eq!(SignalCategory::of("total_components_detected_malicious"), SignalCategory::Other);
    }
}
