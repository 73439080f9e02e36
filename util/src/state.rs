//! Application state container shared across Axum route handlers.
//!
//! This struct holds shared resources such as the database connection and the
//! QR broadcast registry. It is cheap to clone and passed into route handlers
//! via Axum's `State<T>` extractor.

use attendance::BroadcastRegistry;
use sea_orm::DatabaseConnection;

/// Central application state shared across the server.
///
/// This includes:
/// - A cloned, thread-safe database connection for use with SeaORM.
/// - A global `BroadcastRegistry` tracking live QR broadcasts per class.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    qr: BroadcastRegistry,
}

impl AppState {
    /// Creates a new `AppState` with the given database connection and broadcast registry.
    ///
    /// # Arguments
    ///
    /// * `db` - A SeaORM `DatabaseConnection`, typically cloned from the main pool.
    /// * `qr` - A `BroadcastRegistry` responsible for rotating class QR tokens.
    pub fn new(db: DatabaseConnection, qr: BroadcastRegistry) -> Self {
        Self { db, qr }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    ///
    /// This is ideal when the caller does not need ownership.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Returns a shared reference to the internal `BroadcastRegistry`.
    pub fn qr(&self) -> &BroadcastRegistry {
        &self.qr
    }
}

impl AppState {
    /// Returns a cloned copy of the database connection.
    ///
    /// Useful for async contexts or spawning tasks that require ownership.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }

    /// Returns a cloned instance of the `BroadcastRegistry`.
    ///
    /// This allows handlers to start or stop broadcasts without holding a reference.
    pub fn qr_clone(&self) -> BroadcastRegistry {
        self.qr.clone()
    }
}
