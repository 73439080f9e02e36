use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tunables for token rotation and the marking window.
///
/// Defaults match the product behavior: tokens rotate every 5 seconds and
/// stay scannable for 15, which leaves a superseded token two further
/// rotations of grace. Scans within 10 minutes of the scheduled start are
/// `present`, within 20 `late`, and later ones are refused.
#[derive(Debug, Clone)]
pub struct QrSettings {
    pub rotation_seconds: u64,
    pub token_ttl_seconds: i64,
    pub broadcast_max_seconds: i64,
    pub present_threshold_minutes: i64,
    pub late_threshold_minutes: i64,
}

impl Default for QrSettings {
    fn default() -> Self {
        Self {
            rotation_seconds: 5,
            token_ttl_seconds: 15,
            broadcast_max_seconds: 3600,
            present_threshold_minutes: 10,
            late_threshold_minutes: 20,
        }
    }
}

/// Status a successful scan can record.
///
/// `absent` and `excused` exist in the ledger but are written by
/// out-of-band processes, never by a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkStatus {
    Present,
    Late,
}

impl MarkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkStatus::Present => "present",
            MarkStatus::Late => "late",
        }
    }
}

/// A token handed out by a broadcast, with its issuance instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: DateTime<Utc>,
}

/// Result of a successful scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOutcome {
    pub status: MarkStatus,
    pub marked_at: DateTime<Utc>,
}
