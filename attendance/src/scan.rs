//! The per-scan state machine.
//!
//! One call to [`ScanProcessor::process`] turns a raw scanned token plus an
//! authenticated principal into exactly one attendance outcome. Every check
//! is ordered so the cheap, in-memory rejections fire before any directory
//! lookup, and the only write is the ledger's atomic conditional insert.

use chrono::{DateTime, Duration, Utc};

use crate::error::ScanError;
use crate::session::BroadcastRegistry;
use crate::traits::{Directory, InsertOutcome, Ledger, NewAttendance};
use crate::types::{MarkStatus, ScanOutcome};

/// Validates scans against the live broadcast state and the directory, and
/// writes the attendance record through the ledger.
#[derive(Clone)]
pub struct ScanProcessor<S> {
    registry: BroadcastRegistry,
    store: S,
}

impl<S> ScanProcessor<S>
where
    S: Directory + Ledger,
{
    pub fn new(registry: BroadcastRegistry, store: S) -> Self {
        Self { registry, store }
    }

    /// Processes one scan attempt at `now`.
    ///
    /// Policy order: resolve the caller, verify the token's integrity, check
    /// it against the live broadcast, then class, enrollment and timing, and
    /// finally attempt the one atomic insert. Each failure is terminal for
    /// the attempt; the caller may scan a fresh code.
    pub async fn process(
        &self,
        raw_token: &str,
        principal: i64,
        now: DateTime<Utc>,
    ) -> Result<ScanOutcome, ScanError> {
        let student_id = self
            .store
            .resolve_student(principal)
            .await?
            .ok_or(ScanError::Unauthorized)?;

        let claims = self.registry.codec().decode(raw_token)?;

        if !self
            .registry
            .is_token_valid(claims.class_id, raw_token, now)
            .await
        {
            return Err(ScanError::ExpiredOrUnknownToken);
        }

        let class = self
            .store
            .class_session(claims.class_id)
            .await?
            .ok_or(ScanError::ClassNotFound)?;
        if class.is_cancelled {
            return Err(ScanError::ClassCancelled);
        }

        if !self.store.is_enrolled(student_id, class.course_id).await? {
            return Err(ScanError::NotEnrolled);
        }

        let status = self.status_for(class.scheduled_start, now)?;

        let outcome = self
            .store
            .try_insert(NewAttendance {
                student_id,
                class_id: class.id,
                status,
                marked_at: now,
                notes: None,
            })
            .await?;

        match outcome {
            InsertOutcome::Created => {
                tracing::info!(student_id, class_id = class.id, status = status.as_str(), "attendance marked");
                Ok(ScanOutcome {
                    status,
                    marked_at: now,
                })
            }
            InsertOutcome::AlreadyExists => Err(ScanError::AlreadyMarked),
        }
    }

    /// Bands the elapsed time since scheduled start into a status.
    ///
    /// Scans before the scheduled start clamp to zero elapsed and count as
    /// present.
    fn status_for(
        &self,
        scheduled_start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<MarkStatus, ScanError> {
        let settings = self.registry.settings();
        let elapsed = now
            .signed_duration_since(scheduled_start)
            .max(Duration::zero());

        if elapsed <= Duration::minutes(settings.present_threshold_minutes) {
            Ok(MarkStatus::Present)
        } else if elapsed <= Duration::minutes(settings.late_threshold_minutes) {
            Ok(MarkStatus::Late)
        } else {
            Err(ScanError::WindowClosed)
        }
    }
}
