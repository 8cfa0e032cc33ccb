//! Row-level queries against `attendance_records`.
//!
//! Ordering is part of the contract: `get_all`, `get_by_date` and `search`
//! return newest first for the reporting views; `get_by_date_range` returns
//! oldest first because it feeds exports that read chronologically.

use crate::errors::{AppError, AppResult};
use crate::models::record::{AttendanceRecord, TIMESTAMP_FORMAT, VerificationEvent};
use crate::models::{EligibilityStatus, VerificationMethod};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, Row, params};

/// Cap on `search` results to bound rendering cost in list views.
pub const SEARCH_LIMIT: usize = 100;

pub(crate) fn map_row(row: &Row) -> rusqlite::Result<AttendanceRecord> {
    let ts_str: String = row.get("timestamp")?;
    let timestamp = NaiveDateTime::parse_from_str(&ts_str, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(&ts_str, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(ts_str.clone())),
            )
        })?;

    let status_str: String = row.get("status")?;
    let status = EligibilityStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(status_str.clone())),
        )
    })?;

    let method_str: String = row.get("verification_method")?;
    let verification_method = VerificationMethod::from_db_str(&method_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidMethod(method_str.clone())),
        )
    })?;

    Ok(AttendanceRecord {
        id: row.get("id")?,
        student_id: row.get("student_id")?,
        full_name: row.get("full_name")?,
        status,
        academic_year: row.get("academic_year")?,
        timestamp,
        verification_method,
    })
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Insert a verification outcome with an explicit timestamp.
///
/// A collision on the `(student_id, timestamp)` uniqueness pair surfaces as
/// `DuplicateRecord` with the offending key; the table is left unchanged.
pub fn insert_at(
    conn: &Connection,
    event: &VerificationEvent,
    timestamp: NaiveDateTime,
) -> AppResult<i64> {
    let ts_str = timestamp.format(TIMESTAMP_FORMAT).to_string();
    let status = EligibilityStatus::from_eligibility(event.is_eligible);

    let mut stmt = conn.prepare_cached(
        "INSERT INTO attendance_records
         (student_id, full_name, status, academic_year, timestamp, verification_method)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;

    match stmt.execute(params![
        event.student_id,
        event.full_name,
        status.to_db_str(),
        event.academic_year,
        ts_str,
        event.method.to_db_str(),
    ]) {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(e) if is_unique_violation(&e) => Err(AppError::DuplicateRecord {
            student_id: event.student_id.clone(),
            timestamp: ts_str,
        }),
        Err(e) => Err(e.into()),
    }
}

/// Every record, newest first.
pub fn get_all(conn: &Connection) -> AppResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM attendance_records
         ORDER BY timestamp DESC",
    )?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Records on one local calendar day, newest first.
pub fn get_by_date(conn: &Connection, date: &NaiveDate) -> AppResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM attendance_records
         WHERE DATE(timestamp) = ?1
         ORDER BY timestamp DESC",
    )?;

    let date_str = date.format("%Y-%m-%d").to_string();
    let rows = stmt.query_map([date_str], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Records with a timestamp in `[start, end]` inclusive, oldest first.
pub fn get_by_date_range(
    conn: &Connection,
    start: &NaiveDate,
    end: &NaiveDate,
) -> AppResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM attendance_records
         WHERE DATE(timestamp) BETWEEN ?1 AND ?2
         ORDER BY timestamp ASC",
    )?;

    let rows = stmt.query_map(
        params![
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string()
        ],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Case-insensitive substring match over student_id OR full_name,
/// newest first, capped at [`SEARCH_LIMIT`] rows.
pub fn search(conn: &Connection, query: &str) -> AppResult<Vec<AttendanceRecord>> {
    // Escape LIKE wildcards so the query text is matched literally.
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    let pattern = format!("%{}%", escaped);

    let mut stmt = conn.prepare_cached(
        "SELECT * FROM attendance_records
         WHERE student_id LIKE ?1 ESCAPE '\\' OR full_name LIKE ?1 ESCAPE '\\'
         ORDER BY timestamp DESC
         LIMIT ?2",
    )?;

    let rows = stmt.query_map(params![pattern, SEARCH_LIMIT as i64], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Delete every record unconditionally. Returns the number of rows removed.
pub fn clear_all(conn: &Connection) -> AppResult<usize> {
    let deleted = conn.execute("DELETE FROM attendance_records", [])?;
    Ok(deleted)
}

/// Distinct local calendar dates with at least one record, descending.
pub fn get_distinct_dates(conn: &Connection) -> AppResult<Vec<NaiveDate>> {
    let mut stmt = conn.prepare_cached(
        "SELECT DISTINCT DATE(timestamp) AS date
         FROM attendance_records
         ORDER BY date DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        let date_str: String = row.get(0)?;
        NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(date_str.clone())),
            )
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
