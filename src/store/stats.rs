//! Aggregate statistics over `attendance_records`, plus the `db --info`
//! report. All counts are computed from the live table at call time.

use crate::errors::AppResult;
use crate::models::{DetailedStatistics, MethodCounts, Statistics, StatusCounts};
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension};
use std::fs;

fn count_where(conn: &Connection, sql: &str, params: &[&dyn rusqlite::ToSql]) -> AppResult<u64> {
    let n: i64 = conn.query_row(sql, params, |row| row.get(0))?;
    Ok(n as u64)
}

/// Summary counters. `today` is passed in (device-local day) so the
/// "today" bucket follows the caller's clock, not SQLite's UTC `now`.
pub fn statistics(conn: &Connection, today: &NaiveDate) -> AppResult<Statistics> {
    let total = count_where(conn, "SELECT COUNT(*) FROM attendance_records", &[])?;
    let eligible = count_where(
        conn,
        "SELECT COUNT(*) FROM attendance_records WHERE status = 'eligible'",
        &[],
    )?;
    let todays_count = count_where(
        conn,
        "SELECT COUNT(*) FROM attendance_records WHERE DATE(timestamp) = ?1",
        &[&today.format("%Y-%m-%d").to_string()],
    )?;

    Ok(Statistics {
        total,
        eligible,
        ineligible: total - eligible,
        todays_count,
    })
}

/// Breakdowns by status, method and hour of day, optionally restricted to
/// one calendar day. The hourly histogram is zero-filled across all 24 hours.
pub fn detailed_statistics(
    conn: &Connection,
    date: Option<&NaiveDate>,
) -> AppResult<DetailedStatistics> {
    let (filter, date_params): (&str, Vec<String>) = match date {
        Some(d) => (
            " WHERE DATE(timestamp) = ?1",
            vec![d.format("%Y-%m-%d").to_string()],
        ),
        None => ("", Vec::new()),
    };

    let mut by_status = StatusCounts::default();
    {
        let sql = format!(
            "SELECT status, COUNT(*) FROM attendance_records{} GROUP BY status",
            filter
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(date_params.iter()), |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        for r in rows {
            let (status, count) = r?;
            match status.as_str() {
                "eligible" => by_status.eligible = count as u64,
                _ => by_status.not_eligible = count as u64,
            }
        }
    }

    let mut by_method = MethodCounts::default();
    {
        let sql = format!(
            "SELECT verification_method, COUNT(*) FROM attendance_records{} GROUP BY verification_method",
            filter
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(date_params.iter()), |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        for r in rows {
            let (method, count) = r?;
            match method.as_str() {
                "exam_card" => by_method.exam_card = count as u64,
                _ => by_method.manual = count as u64,
            }
        }
    }

    let mut hourly = [0u64; 24];
    {
        let sql = format!(
            "SELECT CAST(strftime('%H', timestamp) AS INTEGER) AS hour, COUNT(*)
             FROM attendance_records{}
             GROUP BY hour
             ORDER BY hour",
            filter
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(date_params.iter()), |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
        })?;

        for r in rows {
            let (hour, count) = r?;
            if (0..24).contains(&hour) {
                hourly[hour as usize] = count as u64;
            }
        }
    }

    Ok(DetailedStatistics {
        by_status,
        by_method,
        hourly,
    })
}

/// Print database facts for `db --info`: file, size, record count, date range
/// and average records per recorded day.
pub fn print_db_info(conn: &Connection, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    let count: i64 = conn.query_row("SELECT COUNT(*) FROM attendance_records", [], |row| {
        row.get(0)
    })?;
    println!(
        "{}• Total records:{} {}{}{}",
        CYAN, RESET, GREEN, count, RESET
    );

    let first_date: Option<String> = conn
        .query_row(
            "SELECT DATE(timestamp) FROM attendance_records ORDER BY timestamp ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = conn
        .query_row(
            "SELECT DATE(timestamp) FROM attendance_records ORDER BY timestamp DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    if count > 0 {
        let recorded_days: i64 = conn.query_row(
            "SELECT COUNT(DISTINCT DATE(timestamp)) FROM attendance_records",
            [],
            |row| row.get(0),
        )?;
        let avg = count as f64 / recorded_days.max(1) as f64;
        println!("{}• Average records/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
