//! # Attendance Core
//!
//! This crate holds the QR attendance-marking flow: rotating session tokens,
//! the per-class broadcast lifecycle, and the scan-to-record state machine.
//! Persistence and identity are consumed through the [`traits`] seams so the
//! HTTP layer and the database crate stay out of the policy logic.
//!
//! ## Key Concepts
//! - **TokenCodec**: mints and verifies tamper-evident rotating tokens.
//! - **BroadcastRegistry**: at most one active token broadcast per class,
//!   rotated on a timer and bounded by the token TTL.
//! - **ScanProcessor**: turns one scanned token plus an authenticated caller
//!   into exactly one attendance outcome.

pub mod error;
pub mod scan;
pub mod session;
pub mod token;
pub mod traits;
pub mod types;

pub use error::{BroadcastError, ScanError};
pub use scan::ScanProcessor;
pub use session::BroadcastRegistry;
pub use token::{TokenClaims, TokenCodec};
pub use types::{IssuedToken, MarkStatus, QrSettings, ScanOutcome};
