//! Idempotent schema management.
//!
//! Every statement uses `IF NOT EXISTS`, so [`ensure_schema`] is safe to run
//! on every startup. DDL is kept per backend because the two dialects
//! disagree on auto-increment keys; everything else, including the partial
//! unique index guarding the one-pending-request rule, is shared syntax.

use sha2::{Digest, Sha256};
use tracing::info;

use super::{Store, StoreError, now_utc};
use crate::database::BackendKind;

const SCHEMA_POSTGRES: &str = include_str!("sql/schema_postgres.sql");
const SCHEMA_SQLITE: &str = include_str!("sql/schema_sqlite.sql");
const FIND_ADMIN_BY_EMAIL: &str = include_str!("sql/find_admin_by_email.sql");
const CREATE_ADMIN: &str = include_str!("sql/create_admin.sql");

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_ADMIN_NAME: &str = "Administrator";

/// Create all tables and indexes for the active backend.
///
/// # Errors
///
/// Returns an error when a DDL statement is rejected.
pub async fn ensure_schema(store: &Store) -> Result<(), StoreError> {
    let ddl = match store.kind() {
        BackendKind::Postgres => SCHEMA_POSTGRES,
        BackendKind::Sqlite => SCHEMA_SQLITE,
    };

    // DDL cannot be prepared on PostgreSQL, so each statement runs unprepared.
    for statement in ddl.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        store.execute_raw(statement).await?;
    }

    info!(backend = store.kind().as_str(), "schema is up to date");

    Ok(())
}

/// Insert the bootstrap administrator account unless one already exists.
///
/// # Errors
///
/// Returns an error when the lookup or the insert fails.
pub async fn seed_default_admin(store: &Store) -> Result<(), StoreError> {
    let existing = store
        .query(FIND_ADMIN_BY_EMAIL)
        .bind(DEFAULT_ADMIN_EMAIL)
        .fetch_optional()
        .await?;

    if existing.is_some() {
        return Ok(());
    }

    store
        .query(CREATE_ADMIN)
        .bind(DEFAULT_ADMIN_EMAIL)
        .bind(sha256_hex(DEFAULT_ADMIN_PASSWORD))
        .bind(DEFAULT_ADMIN_NAME)
        .bind(now_utc())
        .execute()
        .await?;

    info!(email = DEFAULT_ADMIN_EMAIL, "seeded default admin account");

    Ok(())
}

/// Hex-encoded SHA-256 digest, the stored credential format.
#[must_use]
pub(crate) fn sha256_hex(input: &str) -> String {
    Sha256::digest(input.as_bytes())
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
