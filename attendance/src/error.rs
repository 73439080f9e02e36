//! Error types for the QR attendance flow.
//!
//! Every variant is a terminal outcome of a single call. Nothing here is
//! retried internally; the HTTP layer maps each kind to a status code and
//! surfaces the message as-is.

use thiserror::Error;

/// Failure reported by a storage or directory collaborator.
///
/// Callers only ever see the generic [`ScanError::Internal`] message; the
/// wrapped source is for the server log.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Broadcast lifecycle violations.
#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("A QR broadcast is already active for this class")]
    AlreadyBroadcasting,
    #[error("No active QR broadcast for this class")]
    NotBroadcasting,
}

impl BroadcastError {
    /// Stable machine-readable kind for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            BroadcastError::AlreadyBroadcasting => "already_broadcasting",
            BroadcastError::NotBroadcasting => "not_broadcasting",
        }
    }
}

/// Everything that can stop a scan from producing an attendance record.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Invalid or expired token")]
    ExpiredOrUnknownToken,
    #[error("Class not found")]
    ClassNotFound,
    #[error("Class has been cancelled")]
    ClassCancelled,
    #[error("Student not enrolled in this course")]
    NotEnrolled,
    #[error("Attendance window has closed")]
    WindowClosed,
    #[error("Attendance already recorded")]
    AlreadyMarked,
    #[error("Student not found")]
    Unauthorized,
    #[error("An internal error occurred")]
    Internal(#[source] StoreError),
}

impl ScanError {
    /// Stable machine-readable kind for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ScanError::InvalidToken => "invalid_token",
            ScanError::ExpiredOrUnknownToken => "expired_or_unknown_token",
            ScanError::ClassNotFound => "class_not_found",
            ScanError::ClassCancelled => "class_cancelled",
            ScanError::NotEnrolled => "not_enrolled",
            ScanError::WindowClosed => "window_closed",
            ScanError::AlreadyMarked => "already_marked",
            ScanError::Unauthorized => "unauthorized",
            ScanError::Internal(_) => "internal",
        }
    }
}

impl From<StoreError> for ScanError {
    fn from(err: StoreError) -> Self {
        ScanError::Internal(err)
    }
}
