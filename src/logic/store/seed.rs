//! Mock Dataset Generator
//!
//! Fabricates the synthetic security log the console runs against.
//! Shapes and value pools mirror what a firewall appliance would emit:
//! four categories, message templates with interpolated source
//! addresses, timestamps spread over the trailing 24 hours.

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::Rng;

use crate::logic::records::{LogRecord, Severity};

pub const CATEGORIES: [&str; 4] = ["System", "Attack", "Network", "Policy"];

const MESSAGES: [&str; 8] = [
    "Suspicious connection attempt blocked from {ip}",
    "Potential SQL injection attack detected",
    "Multiple failed login attempts from {ip}",
    "Unusual outbound traffic pattern detected",
    "DDoS attack signature matched",
    "User authentication successful",
    "Policy violation detected",
    "Configuration changed",
];

const PROTOCOLS: [&str; 3] = ["TCP", "UDP", "ICMP"];
const APPLICATIONS: [&str; 4] = ["web-browser", "ssh-client", "vpn-client", "mail-client"];
const USERS: [&str; 4] = ["admin", "jsmith", "operator", "svc-backup"];

/// Generate `count` records with sequential ids, most-recent-first.
/// Ids start at "1" and are never reused within a dataset.
pub fn generate(count: usize, rng: &mut StdRng) -> Vec<LogRecord> {
    let now = Utc::now();
    let mut records = Vec::with_capacity(count);

    for i in 0..count {
        let source = random_ip(rng);
        let template = MESSAGES[rng.gen_range(0..MESSAGES.len())];
        let message = template.replacen("{ip}", &random_ip(rng), 1);
        let timestamp = now - Duration::milliseconds(rng.gen_range(0..86_400_000));
        let severity = Severity::ALL[rng.gen_range(0..Severity::ALL.len())];
        let category = CATEGORIES[rng.gen_range(0..CATEGORIES.len())];

        let mut record = LogRecord::new(
            &(i + 1).to_string(),
            timestamp,
            severity,
            category,
            &message,
            &source,
        );

        // Roughly half the records carry full connection context, the
        // way appliance exports mix terse and verbose entries.
        if rng.gen_bool(0.5) {
            record = record
                .with_connection(
                    rng.gen_range(1024..u16::MAX),
                    &random_ip(rng),
                    [80, 443, 22, 53][rng.gen_range(0..4)],
                    PROTOCOLS[rng.gen_range(0..PROTOCOLS.len())],
                )
                .with_user(USERS[rng.gen_range(0..USERS.len())])
                .with_application(APPLICATIONS[rng.gen_range(0..APPLICATIONS.len())]);
        }

        records.push(record);
    }

    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    records
}

fn random_ip(rng: &mut StdRng) -> String {
    format!(
        "192.168.{}.{}",
        rng.gen_range(0..255),
        rng.gen_range(0..255)
    )
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_generated_ids_are_unique() {
        let mut rng = StdRng::seed_from_u64(7);
        let records = generate(100, &mut rng);

        let ids: HashSet<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_generated_records_are_time_descending() {
        let mut rng = StdRng::seed_from_u64(7);
        let records = generate(50, &mut rng);

        for pair in records.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }

    #[test]
    fn test_records_start_untriaged() {
        let mut rng = StdRng::seed_from_u64(7);
        let records = generate(20, &mut rng);

        // Triage state belongs to the operator, never the generator.
        assert!(records.iter().all(|r| !r.is_innocuous));
        assert!(records.iter().all(|r| r.ai_analysis.is_none()));
    }

    #[test]
    fn test_same_seed_same_dataset() {
        let a = generate(30, &mut StdRng::seed_from_u64(42));
        let b = generate(30, &mut StdRng::seed_from_u64(42));

        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.id, y.id);
            assert_eq!(x.message, y.message);
            assert_eq!(x.severity, y.severity);
        }
    }
}
