//! Test database helper.

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

/// Connects to a fresh in-memory SQLite database and applies the full
/// schema. Each call gives an isolated database, so tests can run in
/// parallel without seeing each other's rows.
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory db");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}
