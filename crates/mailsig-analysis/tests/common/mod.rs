//! Shared fixtures for the analysis tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Five emails: D1/D2 clean, D3 medium-tier and borderline, D4 malicious,
/// D5 clean but missing its spam score.
pub const SAMPLE_CSV: &str = "\
Data ,sender_domain_reputation_score,content_spam_score,sender_temp_email_likelihood,malicious_attachment_Count,sender_known_malicios,sender_spoof_detected,any_exploit_pattern_detected,request_type,max_behavioral_sandbox_score,max_exfiltration_behavior_score,max_amsi_suspicion_score,urgency_keywords_present,user_marked_as_spam_before,spf_result,dkim_result,dmarc_result,ssl_validity_status,total_components_detected_malicious
D1,0.9,0.01,0.0,0,0,0,0,none,0.0,0.0,0.0,0,0,pass,pass,pass,valid,1
D2,0.8,0.05,0.0,0,0,0,0,newsletter,0.1,0.0,0.05,0,0,pass,pass,none,valid,2
D3,0.4,0.15,0.2,0,0,0,0,document_download,0.25,0.1,0.15,1,0,pass,fail,pass,valid,3
D4,0.1,0.7,0.6,2,1,1,1,payment_request,0.8,0.9,0.7,1,1,fail,softfail,fail,expired,5
D5,0.95,,0.0,0,0,0,0,none,0.0,0.0,0.0,0,0,pass,pass,,valid,1
";

/// Signal columns in `SAMPLE_CSV` (every column but `Data `).
pub const SAMPLE_SIGNAL_COUNT: usize = 18;

pub fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

pub fn write_sample(dir: &Path) -> PathBuf {
    write_csv(dir, "signals.csv", SAMPLE_CSV)
}

pub fn sample_batch() -> mailsig_analysis::Batch {
    mailsig_analysis::ingest::read_batch_from_reader(
        SAMPLE_CSV.as_bytes(),
        Path::new("signals.csv"),
        &Default::default(),
    )
    .unwrap()
}
