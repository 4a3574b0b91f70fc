//! Dashboard Metrics - Fabricated Feeds
//!
//! Typed mock metrics for the dashboard cards and charts: threats, IPS,
//! VPN, device performance, content filtering and service licensing.
//! One explicit schema per entity; the variants the appliance exposes
//! under different field names are unified here.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

// ============================================================================
// THREATS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub timestamp: DateTime<Utc>,
    pub count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreatTypeCounts {
    pub malware: u64,
    pub ransomware: u64,
    pub phishing: u64,
    pub ddos: u64,
    pub botnet: u64,
    pub other: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatMetrics {
    pub total_threats_blocked: u64,
    pub threats_by_type: ThreatTypeCounts,
    pub threats_by_severity: SeverityCounts,
    pub trend: Vec<TrendPoint>,
}

// ============================================================================
// IPS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackCategory {
    pub category: String,
    pub count: u64,
    pub severity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackerCount {
    pub ip: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionTypeCount {
    pub kind: String,
    pub count: u64,
}

/// Unified IPS schema: the appliance variants expose either
/// `totalDetections`/`blockedAttacks` or `total_attacks_blocked`; both
/// collapse into these two fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpsMetrics {
    pub total_detections: u64,
    pub blocked_attacks: u64,
    pub attacks_by_category: Vec<AttackCategory>,
    pub top_attackers: Vec<AttackerCount>,
    pub detections_by_type: Vec<DetectionTypeCount>,
}

// ============================================================================
// VPN
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bandwidth {
    pub incoming_mbps: f64,
    pub outgoing_mbps: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpnSession {
    pub user: String,
    pub ip_address: String,
    pub duration_secs: u64,
    pub bytes_transferred: u64,
    pub last_activity: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolSessions {
    pub name: String,
    pub sessions: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpnMetrics {
    pub active_sessions: u64,
    pub total_users: u64,
    pub bandwidth: Bandwidth,
    pub sessions: Vec<VpnSession>,
    pub protocols: Vec<ProtocolSessions>,
}

// ============================================================================
// DEVICE PERFORMANCE
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub total_mb: u64,
    pub used_mb: u64,
    pub free_mb: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThroughputPoint {
    pub timestamp: DateTime<Utc>,
    pub incoming_mbps: f64,
    pub outgoing_mbps: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterfaceStatus {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceStats {
    pub name: String,
    pub status: InterfaceStatus,
    pub packets_in: u64,
    pub packets_out: u64,
    pub errors_in: u64,
    pub errors_out: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemPerformance {
    pub cpu_usage: f64,
    pub memory: MemoryUsage,
    pub throughput: Vec<ThroughputPoint>,
    pub interfaces: Vec<InterfaceStats>,
}

// ============================================================================
// CONTENT FILTERING & LICENSING
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryAction {
    Blocked,
    Allowed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterCategory {
    pub id: u32,
    pub name: String,
    pub action: CategoryAction,
    pub hits_today: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentFilteringStatus {
    pub database_version: String,
    pub last_updated: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
    pub total_requests_today: u64,
    pub total_blocked_today: u64,
    pub categories: Vec<FilterCategory>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LicenseStatus {
    Licensed,
    NotLicensed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceLicense {
    pub service: String,
    pub status: LicenseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityServicesStatus {
    pub services: Vec<ServiceLicense>,
}

impl SecurityServicesStatus {
    pub fn licensed_count(&self) -> usize {
        self.services
            .iter()
            .filter(|s| s.status == LicenseStatus::Licensed)
            .count()
    }
}

// ============================================================================
// METRICS FEED
// ============================================================================

/// Fabricated dashboard metrics, one generator per console session.
pub struct MetricsFeed {
    rng: Mutex<StdRng>,
}

impl MetricsFeed {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic feed for tests and demos.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn threat_metrics(&self) -> ThreatMetrics {
        let mut rng = self.rng.lock();
        ThreatMetrics {
            total_threats_blocked: 1247,
            threats_by_type: ThreatTypeCounts {
                malware: 456,
                ransomware: 89,
                phishing: 234,
                ddos: 178,
                botnet: 156,
                other: 134,
            },
            threats_by_severity: SeverityCounts {
                critical: 89,
                high: 234,
                medium: 567,
                low: 357,
            },
            trend: trend_series(&mut rng, 24, Duration::hours(24)),
        }
    }

    pub fn ips_metrics(&self) -> IpsMetrics {
        let mut rng = self.rng.lock();
        IpsMetrics {
            total_detections: 12_500,
            blocked_attacks: 8934,
            attacks_by_category: vec![
                AttackCategory {
                    category: "SQL Injection".to_string(),
                    count: 2345,
                    severity: "Critical".to_string(),
                },
                AttackCategory {
                    category: "Cross-Site Scripting".to_string(),
                    count: 1876,
                    severity: "High".to_string(),
                },
                AttackCategory {
                    category: "Directory Traversal".to_string(),
                    count: 1234,
                    severity: "Medium".to_string(),
                },
            ],
            top_attackers: (0..3)
                .map(|i| AttackerCount {
                    ip: format!("192.168.1.{}", 100 + i),
                    count: rng.gen_range(100..500),
                })
                .collect(),
            detections_by_type: vec![
                DetectionTypeCount {
                    kind: "Malware".to_string(),
                    count: 3456,
                },
                DetectionTypeCount {
                    kind: "Exploit".to_string(),
                    count: 2345,
                },
                DetectionTypeCount {
                    kind: "DoS".to_string(),
                    count: 1234,
                },
            ],
        }
    }

    pub fn vpn_metrics(&self) -> VpnMetrics {
        let mut rng = self.rng.lock();
        let now = Utc::now();
        VpnMetrics {
            active_sessions: 47,
            total_users: 89,
            bandwidth: Bandwidth {
                incoming_mbps: 156.7,
                outgoing_mbps: 98.4,
            },
            sessions: (0..10)
                .map(|i| VpnSession {
                    user: format!("user{}@company.com", i + 1),
                    ip_address: format!("192.168.1.{}", 100 + i),
                    duration_secs: rng.gen_range(0..7200),
                    bytes_transferred: rng.gen_range(0..1_000_000_000),
                    last_activity: now - Duration::seconds(rng.gen_range(0..3600)),
                })
                .collect(),
            protocols: vec![
                ProtocolSessions {
                    name: "IPSec".to_string(),
                    sessions: 23,
                },
                ProtocolSessions {
                    name: "SSL VPN".to_string(),
                    sessions: 15,
                },
                ProtocolSessions {
                    name: "L2TP".to_string(),
                    sessions: 9,
                },
            ],
        }
    }

    pub fn system_performance(&self) -> SystemPerformance {
        let mut rng = self.rng.lock();
        let now = Utc::now();
        SystemPerformance {
            cpu_usage: rng.gen_range(20.0..80.0),
            memory: MemoryUsage {
                total_mb: 16_384,
                used_mb: 12_288,
                free_mb: 4096,
            },
            // Last hour, minute by minute.
            throughput: (0..60)
                .map(|i| ThroughputPoint {
                    timestamp: now - Duration::minutes(59 - i),
                    incoming_mbps: rng.gen_range(0.0..1000.0),
                    outgoing_mbps: rng.gen_range(0.0..800.0),
                })
                .collect(),
            interfaces: vec![
                InterfaceStats {
                    name: "X1".to_string(),
                    status: InterfaceStatus::Up,
                    packets_in: 15_789_234,
                    packets_out: 14_567_890,
                    errors_in: 23,
                    errors_out: 12,
                },
                InterfaceStats {
                    name: "X2".to_string(),
                    status: InterfaceStatus::Up,
                    packets_in: 12_345_678,
                    packets_out: 11_234_567,
                    errors_in: 15,
                    errors_out: 8,
                },
                InterfaceStats {
                    name: "X3".to_string(),
                    status: InterfaceStatus::Down,
                    packets_in: 0,
                    packets_out: 0,
                    errors_in: 0,
                    errors_out: 0,
                },
            ],
        }
    }

    pub fn content_filtering(&self) -> ContentFilteringStatus {
        let now = Utc::now();
        ContentFilteringStatus {
            database_version: "20240112".to_string(),
            last_updated: now - Duration::days(1),
            expiration_date: now + Duration::days(480),
            total_requests_today: 15_000,
            total_blocked_today: 150,
            categories: vec![
                FilterCategory {
                    id: 1,
                    name: "Adult Content".to_string(),
                    action: CategoryAction::Blocked,
                    hits_today: 25,
                },
                FilterCategory {
                    id: 2,
                    name: "Business".to_string(),
                    action: CategoryAction::Allowed,
                    hits_today: 1250,
                },
                FilterCategory {
                    id: 3,
                    name: "Gambling".to_string(),
                    action: CategoryAction::Blocked,
                    hits_today: 12,
                },
                FilterCategory {
                    id: 4,
                    name: "Social Media".to_string(),
                    action: CategoryAction::Allowed,
                    hits_today: 3450,
                },
                FilterCategory {
                    id: 5,
                    name: "Malware Sites".to_string(),
                    action: CategoryAction::Blocked,
                    hits_today: 89,
                },
            ],
        }
    }

    pub fn services_status(&self) -> SecurityServicesStatus {
        let licensed = [
            ("Gateway Anti-Virus", None),
            ("Intrusion Prevention", None),
            ("Anti-Spyware", None),
            ("Content Filtering", None),
            ("App Control", None),
            ("Botnet Filter", None),
            ("DNS Filtering", None),
            ("Geo-IP Filter", None),
            ("SSL VPN", Some("12 nodes (0 in use)")),
            ("Global VPN Client", Some("10 licenses (1 in use)")),
            ("DPI-SSL", Some("Client/Server")),
        ];
        let not_licensed = ["Endpoint Security", "WAN Acceleration", "Analyzer"];

        let mut services: Vec<ServiceLicense> = licensed
            .iter()
            .map(|(name, detail)| ServiceLicense {
                service: name.to_string(),
                status: LicenseStatus::Licensed,
                detail: detail.map(str::to_string),
            })
            .collect();
        services.extend(not_licensed.iter().map(|name| ServiceLicense {
            service: name.to_string(),
            status: LicenseStatus::NotLicensed,
            detail: None,
        }));

        SecurityServicesStatus { services }
    }
}

impl Default for MetricsFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Evenly spaced trend points covering `span` up to now.
fn trend_series(rng: &mut StdRng, points: usize, span: Duration) -> Vec<TrendPoint> {
    let now = Utc::now();
    let step = span / points as i32;
    (0..points)
        .map(|i| TrendPoint {
            timestamp: now - step * (points - 1 - i) as i32,
            count: rng.gen_range(20..120),
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_series_is_time_ascending() {
        let feed = MetricsFeed::seeded(1);
        let metrics = feed.threat_metrics();

        assert_eq!(metrics.trend.len(), 24);
        for pair in metrics.trend.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[test]
    fn test_licensed_count() {
        let feed = MetricsFeed::seeded(1);
        let status = feed.services_status();

        assert_eq!(status.licensed_count(), 11);
        assert!(status.services.len() > status.licensed_count());
    }

    #[test]
    fn test_performance_throughput_covers_last_hour() {
        let feed = MetricsFeed::seeded(1);
        let perf = feed.system_performance();

        assert_eq!(perf.throughput.len(), 60);
        assert!(perf.cpu_usage >= 20.0 && perf.cpu_usage < 80.0);
        assert_eq!(perf.interfaces.len(), 3);
    }
}
