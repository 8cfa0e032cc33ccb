//! Schema migrations for the attendance database.
//!
//! Upgrades run as an ordered chain of idempotent steps recorded in the
//! `schema_version` table. Initialization never drops user data: a record
//! written in a previous app run is still there after the next start.
//! The only destructive path is [`reset_schema`], which callers must gate
//! behind explicit user consent.

use crate::errors::{AppError, AppResult};
use chrono::Local;
use rusqlite::Connection;

struct Migration {
    version: i64,
    name: &'static str,
    apply: fn(&Connection) -> rusqlite::Result<()>,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "create_attendance_records",
    apply: create_attendance_records,
}];

/// Schema version this build writes and expects.
pub fn latest_version() -> i64 {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}

fn create_attendance_records(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS attendance_records (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id          TEXT NOT NULL,
            full_name           TEXT NOT NULL,
            status              TEXT NOT NULL CHECK(status IN ('eligible','not_eligible')),
            academic_year       TEXT NOT NULL,
            timestamp           TEXT NOT NULL,
            verification_method TEXT NOT NULL CHECK(verification_method IN ('exam_card','manual')),
            UNIQUE(student_id, timestamp)
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_student_id ON attendance_records(student_id);
        CREATE INDEX IF NOT EXISTS idx_attendance_timestamp ON attendance_records(timestamp);
        CREATE INDEX IF NOT EXISTS idx_attendance_status ON attendance_records(status);
        "#,
    )
}

/// Ensure the `schema_version` bookkeeping table exists.
fn ensure_version_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            name       TEXT NOT NULL,
            applied_at TEXT NOT NULL
        );
        "#,
    )
}

/// Highest migration version recorded on disk (0 for a fresh database).
pub fn current_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT IFNULL(MAX(version), 0) FROM schema_version", [], |row| {
        row.get(0)
    })
}

fn record_applied(conn: &Connection, m: &Migration) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO schema_version (version, name, applied_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![m.version, m.name, Local::now().to_rfc3339()],
    )?;
    Ok(())
}

/// Public entry point: walk the chain forward from the on-disk version.
///
/// Invoked from `AttendanceStore::initialize()`. Each step runs in its own
/// transaction. A database written by a newer build fails with
/// `SchemaMismatch` rather than being touched.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_version_table(conn)?;

    let current = current_version(conn)?;
    let expected = latest_version();

    if current > expected {
        return Err(AppError::SchemaMismatch {
            found: current,
            expected,
        });
    }

    for m in MIGRATIONS.iter().filter(|m| m.version > current) {
        conn.execute_batch("BEGIN IMMEDIATE;")?;

        match (m.apply)(conn).and_then(|_| record_applied(conn, m)) {
            Ok(()) => conn.execute_batch("COMMIT;")?,
            Err(e) => {
                conn.execute_batch("ROLLBACK;").ok();
                return Err(e.into());
            }
        }
    }

    Ok(())
}

/// Destructive reset: drop everything and rebuild from the chain.
/// Discards all persisted records.
pub fn reset_schema(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        DROP TABLE IF EXISTS attendance_records;
        DROP TABLE IF EXISTS schema_version;
        "#,
    )?;

    run_pending_migrations(conn)
}
