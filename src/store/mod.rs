//! Durable, queryable, append-mostly log of verification events, kept on
//! the device and independent of network connectivity.
//!
//! An [`AttendanceStore`] owns exactly one SQLite connection and moves
//! through two states: a freshly opened store is *uninitialized*, and every
//! operation except [`AttendanceStore::initialize`] fails with `NotReady`;
//! once `initialize` has run the migration chain the store is *ready* for
//! the rest of the process lifetime. There is no teardown transition.
//!
//! Instances are constructed explicitly and passed by reference to whoever
//! needs them, so tests can substitute an in-memory store.

pub mod migrate;
pub mod queries;
pub mod stats;

use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceRecord, DetailedStatistics, Statistics, VerificationEvent};
use crate::utils::date;
use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use std::path::Path;

/// Attempts at regenerating a colliding timestamp before surfacing
/// `DuplicateRecord` to the caller.
const INSERT_RETRIES: u32 = 3;

pub struct AttendanceStore {
    conn: Connection,
    ready: bool,
}

impl AttendanceStore {
    /// Open the backing database file. The store still needs
    /// [`initialize`](Self::initialize) before it accepts operations.
    pub fn open(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))
            .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;
        Ok(Self { conn, ready: false })
    }

    /// In-memory store for tests and fakes.
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;
        Ok(Self { conn, ready: false })
    }

    /// Run pending migrations and mark the store ready.
    ///
    /// Idempotent: repeated calls are no-ops and never touch existing
    /// records. Schema changes run through the versioned chain in
    /// [`migrate`], so an upgrade never silently discards data.
    pub fn initialize(&mut self) -> AppResult<()> {
        if self.ready {
            return Ok(());
        }
        migrate::run_pending_migrations(&self.conn)?;
        self.ready = true;
        Ok(())
    }

    /// Destructive reinitialization: drops every record and rebuilds the
    /// schema. The caller is responsible for obtaining explicit user
    /// consent first; this is also the only way out of `SchemaMismatch`.
    pub fn reset(&mut self) -> AppResult<()> {
        migrate::reset_schema(&self.conn)?;
        self.ready = true;
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    fn ensure_ready(&self, operation: &'static str) -> AppResult<&Connection> {
        if !self.ready {
            return Err(AppError::NotReady { operation });
        }
        Ok(&self.conn)
    }

    /// Persist a verification outcome, stamping the current local time.
    /// Returns the newly assigned surrogate id.
    ///
    /// On a `(student_id, timestamp)` collision the timestamp is
    /// regenerated up to [`INSERT_RETRIES`] times; microsecond precision
    /// makes a persistent collision practically unreachable, but if it
    /// does persist the last `DuplicateRecord` is surfaced, never
    /// swallowed.
    pub fn insert(&self, event: &VerificationEvent) -> AppResult<i64> {
        let conn = self.ensure_ready("insert")?;

        let mut last_err = None;
        for _ in 0..INSERT_RETRIES {
            let now = Local::now().naive_local();
            match queries::insert_at(conn, event, now) {
                Err(e @ AppError::DuplicateRecord { .. }) => last_err = Some(e),
                other => return other,
            }
        }

        Err(last_err.unwrap_or_else(|| {
            AppError::Other("insert retry loop exited without a result".into())
        }))
    }

    /// Persist a verification outcome with an explicit timestamp.
    /// Used by imports and tests; collisions surface directly.
    pub fn insert_at(
        &self,
        event: &VerificationEvent,
        timestamp: NaiveDateTime,
    ) -> AppResult<i64> {
        queries::insert_at(self.ensure_ready("insert_at")?, event, timestamp)
    }

    /// Every record, newest first.
    pub fn get_all(&self) -> AppResult<Vec<AttendanceRecord>> {
        queries::get_all(self.ensure_ready("get_all")?)
    }

    /// Records on the given local calendar day, newest first.
    pub fn get_by_date(&self, date: &NaiveDate) -> AppResult<Vec<AttendanceRecord>> {
        queries::get_by_date(self.ensure_ready("get_by_date")?, date)
    }

    /// Records in `[start, end]` inclusive, oldest first (export order).
    pub fn get_by_date_range(
        &self,
        start: &NaiveDate,
        end: &NaiveDate,
    ) -> AppResult<Vec<AttendanceRecord>> {
        queries::get_by_date_range(self.ensure_ready("get_by_date_range")?, start, end)
    }

    /// Case-insensitive substring search over student id and full name,
    /// newest first, capped at 100 rows.
    pub fn search(&self, query: &str) -> AppResult<Vec<AttendanceRecord>> {
        queries::search(self.ensure_ready("search")?, query)
    }

    /// Live aggregate counters; "today" follows the device-local calendar.
    pub fn get_statistics(&self) -> AppResult<Statistics> {
        stats::statistics(self.ensure_ready("get_statistics")?, &date::today())
    }

    /// Breakdowns by status, method and hour, optionally for one day.
    pub fn get_detailed_statistics(
        &self,
        date: Option<&NaiveDate>,
    ) -> AppResult<DetailedStatistics> {
        stats::detailed_statistics(self.ensure_ready("get_detailed_statistics")?, date)
    }

    /// Delete every record unconditionally. Irreversible; callers confirm
    /// with the user first. Returns the number of rows removed.
    pub fn clear_all(&self) -> AppResult<usize> {
        queries::clear_all(self.ensure_ready("clear_all")?)
    }

    /// Distinct calendar dates with at least one record, descending.
    pub fn get_distinct_dates(&self) -> AppResult<Vec<NaiveDate>> {
        queries::get_distinct_dates(self.ensure_ready("get_distinct_dates")?)
    }

    /// Run SQLite's integrity check; returns the engine's verdict string.
    pub fn integrity_check(&self) -> AppResult<String> {
        let verdict: String =
            self.conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
        Ok(verdict)
    }

    /// Reclaim free pages in the database file.
    pub fn vacuum(&self) -> AppResult<()> {
        self.conn.execute_batch("VACUUM;")?;
        Ok(())
    }

    /// Print file/size/count/date-range facts for `db --info`.
    pub fn print_info(&self, db_path: &str) -> AppResult<()> {
        stats::print_db_info(self.ensure_ready("print_info")?, db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EligibilityStatus, VerificationMethod};
    use chrono::NaiveDate;

    fn ready_store() -> AttendanceStore {
        let mut store = AttendanceStore::open_in_memory().expect("open");
        store.initialize().expect("initialize");
        store
    }

    fn event(student_id: &str, full_name: &str, eligible: bool) -> VerificationEvent {
        VerificationEvent {
            student_id: student_id.to_string(),
            full_name: full_name.to_string(),
            is_eligible: eligible,
            academic_year: "2024/2025".to_string(),
            method: VerificationMethod::ExamCard,
        }
    }

    fn ts(date: &str, time: &str) -> NaiveDateTime {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_time(time.parse().unwrap())
    }

    #[test]
    fn operations_fail_before_initialize() {
        let store = AttendanceStore::open_in_memory().unwrap();

        match store.get_all() {
            Err(AppError::NotReady { operation }) => assert_eq!(operation, "get_all"),
            other => panic!("expected NotReady, got {:?}", other),
        }
        assert!(matches!(
            store.insert(&event("STU001", "Ada Lovelace", true)),
            Err(AppError::NotReady { .. })
        ));
        assert!(matches!(
            store.clear_all(),
            Err(AppError::NotReady { .. })
        ));
    }

    #[test]
    fn initialize_is_idempotent() {
        let mut store = ready_store();
        store.insert(&event("STU001", "Ada Lovelace", true)).unwrap();

        store.initialize().expect("second initialize");
        assert_eq!(store.get_all().unwrap().len(), 1);
    }

    #[test]
    fn insert_round_trips_fields_and_assigns_unique_ids() {
        let store = ready_store();

        let id1 = store.insert(&event("STU001", "Ada Lovelace", true)).unwrap();
        let id2 = store
            .insert(&event("STU002", "Grace Hopper", false))
            .unwrap();
        assert_ne!(id1, id2);

        let all = store.get_all().unwrap();
        assert_eq!(all.len(), 2);

        let rec = all.iter().find(|r| r.id == id1).unwrap();
        assert_eq!(rec.student_id, "STU001");
        assert_eq!(rec.full_name, "Ada Lovelace");
        assert_eq!(rec.status, EligibilityStatus::Eligible);
        assert_eq!(rec.academic_year, "2024/2025");
        assert_eq!(rec.verification_method, VerificationMethod::ExamCard);
    }

    #[test]
    fn get_all_is_newest_first() {
        let store = ready_store();
        store
            .insert_at(&event("STU001", "Ada Lovelace", true), ts("2025-03-10", "09:00:00"))
            .unwrap();
        store
            .insert_at(&event("STU002", "Grace Hopper", true), ts("2025-03-11", "08:30:00"))
            .unwrap();
        store
            .insert_at(&event("STU003", "Alan Turing", true), ts("2025-03-10", "14:00:00"))
            .unwrap();

        let all = store.get_all().unwrap();
        let stamps: Vec<_> = all.iter().map(|r| r.timestamp).collect();
        assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(all[0].student_id, "STU002");
    }

    #[test]
    fn duplicate_timestamp_pair_is_rejected_without_side_effects() {
        let store = ready_store();
        let stamp = ts("2025-03-10", "09:15:00");

        store
            .insert_at(&event("STU001", "Ada Lovelace", true), stamp)
            .unwrap();

        match store.insert_at(&event("STU001", "Ada Lovelace", true), stamp) {
            Err(AppError::DuplicateRecord {
                student_id,
                timestamp,
            }) => {
                assert_eq!(student_id, "STU001");
                assert!(timestamp.starts_with("2025-03-10T09:15:00"));
            }
            other => panic!("expected DuplicateRecord, got {:?}", other),
        }

        assert_eq!(store.get_all().unwrap().len(), 1);
    }

    #[test]
    fn same_student_different_timestamps_is_allowed() {
        let store = ready_store();
        store
            .insert_at(&event("STU001", "Ada Lovelace", true), ts("2025-03-10", "09:00:00"))
            .unwrap();
        store
            .insert_at(&event("STU001", "Ada Lovelace", true), ts("2025-03-10", "09:00:01"))
            .unwrap();

        assert_eq!(store.get_all().unwrap().len(), 2);
    }

    #[test]
    fn date_range_is_inclusive_and_oldest_first() {
        let store = ready_store();
        store
            .insert_at(&event("STU001", "Ada Lovelace", true), ts("2025-03-09", "10:00:00"))
            .unwrap();
        store
            .insert_at(&event("STU002", "Grace Hopper", true), ts("2025-03-10", "10:00:00"))
            .unwrap();
        store
            .insert_at(&event("STU003", "Alan Turing", true), ts("2025-03-11", "10:00:00"))
            .unwrap();
        store
            .insert_at(&event("STU004", "Edsger Dijkstra", true), ts("2025-03-12", "10:00:00"))
            .unwrap();

        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
        let ranged = store.get_by_date_range(&start, &end).unwrap();

        assert_eq!(ranged.len(), 2);
        let stamps: Vec<_> = ranged.iter().map(|r| r.timestamp).collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
        assert!(ranged.iter().all(|r| r.date() >= start && r.date() <= end));
    }

    #[test]
    fn get_by_date_filters_one_day_newest_first() {
        let store = ready_store();
        store
            .insert_at(&event("STU001", "Ada Lovelace", true), ts("2025-03-10", "09:00:00"))
            .unwrap();
        store
            .insert_at(&event("STU002", "Grace Hopper", true), ts("2025-03-10", "11:00:00"))
            .unwrap();
        store
            .insert_at(&event("STU003", "Alan Turing", true), ts("2025-03-11", "09:00:00"))
            .unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let records = store.get_by_date(&day).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].student_id, "STU002");
    }

    #[test]
    fn statistics_identity_holds() {
        let store = ready_store();
        store.insert(&event("STU001", "Ada Lovelace", true)).unwrap();
        store
            .insert(&event("STU002", "Grace Hopper", false))
            .unwrap();
        store.insert(&event("STU003", "Alan Turing", true)).unwrap();

        let s = store.get_statistics().unwrap();
        assert_eq!(s.total, 3);
        assert_eq!(s.eligible, 2);
        assert_eq!(s.ineligible, 1);
        assert_eq!(s.total, s.eligible + s.ineligible);
        // inserts stamped "now" all land on today's local calendar day
        assert_eq!(s.todays_count, 3);
    }

    #[test]
    fn detailed_statistics_scenario_breakdowns() {
        let store = ready_store();
        store
            .insert_at(&event("STU001", "Ada Lovelace", true), ts("2025-03-10", "09:05:00"))
            .unwrap();
        store
            .insert_at(&event("STU002", "Grace Hopper", false), ts("2025-03-10", "09:40:00"))
            .unwrap();
        let mut manual = event("STU003", "Alan Turing", true);
        manual.method = VerificationMethod::Manual;
        store
            .insert_at(&manual, ts("2025-03-10", "14:10:00"))
            .unwrap();

        let detailed = store.get_detailed_statistics(None).unwrap();
        assert_eq!(detailed.by_status.eligible, 2);
        assert_eq!(detailed.by_status.not_eligible, 1);
        assert_eq!(detailed.by_method.exam_card, 2);
        assert_eq!(detailed.by_method.manual, 1);

        // zero-filled hourly histogram: 2 records at 09:xx, 1 at 14:xx
        assert_eq!(detailed.hourly[9], 2);
        assert_eq!(detailed.hourly[14], 1);
        assert_eq!(detailed.hourly.iter().sum::<u64>(), 3);
    }

    #[test]
    fn detailed_statistics_respects_date_filter() {
        let store = ready_store();
        store
            .insert_at(&event("STU001", "Ada Lovelace", true), ts("2025-03-10", "09:05:00"))
            .unwrap();
        store
            .insert_at(&event("STU002", "Grace Hopper", false), ts("2025-03-11", "09:40:00"))
            .unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let detailed = store.get_detailed_statistics(Some(&day)).unwrap();
        assert_eq!(detailed.by_status.eligible, 1);
        assert_eq!(detailed.by_status.not_eligible, 0);
        assert_eq!(detailed.hourly.iter().sum::<u64>(), 1);
    }

    #[test]
    fn clear_all_empties_table_and_zeroes_statistics() {
        let store = ready_store();
        store.insert(&event("STU001", "Ada Lovelace", true)).unwrap();
        store
            .insert(&event("STU002", "Grace Hopper", false))
            .unwrap();

        let deleted = store.clear_all().unwrap();
        assert_eq!(deleted, 2);
        assert!(store.get_all().unwrap().is_empty());
        assert_eq!(store.get_statistics().unwrap(), Statistics::default());
    }

    #[test]
    fn search_is_case_insensitive_over_both_columns() {
        let store = ready_store();
        store
            .insert_at(&event("STU2025-001", "Ada Lovelace", true), ts("2025-03-10", "09:00:00"))
            .unwrap();
        store
            .insert_at(&event("XYZ-77", "Grace Hopper", true), ts("2025-03-10", "09:01:00"))
            .unwrap();

        let by_id = store.search("stu2025").unwrap();
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].student_id, "STU2025-001");

        let by_name = store.search("HOPPER").unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].full_name, "Grace Hopper");

        assert!(store.search("nobody").unwrap().is_empty());
    }

    #[test]
    fn search_treats_like_wildcards_literally() {
        let store = ready_store();
        store
            .insert_at(&event("STU_001", "Ada Lovelace", true), ts("2025-03-10", "09:00:00"))
            .unwrap();
        store
            .insert_at(&event("STUX001", "Grace Hopper", true), ts("2025-03-10", "09:01:00"))
            .unwrap();

        // "_" must match only the literal underscore, not any character
        let hits = store.search("STU_0").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].student_id, "STU_001");

        assert!(store.search("%").unwrap().is_empty());
    }

    #[test]
    fn search_is_capped_at_100_results_newest_first() {
        let store = ready_store();
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        for i in 0..120u32 {
            let stamp = day.and_hms_opt(8, i / 60, i % 60).unwrap();
            store
                .insert_at(&event(&format!("STU{:03}", i), "Bulk Student", true), stamp)
                .unwrap();
        }

        let hits = store.search("STU").unwrap();
        assert_eq!(hits.len(), 100);
        let stamps: Vec<_> = hits.iter().map(|r| r.timestamp).collect();
        assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn distinct_dates_are_descending_and_unique() {
        let store = ready_store();
        store
            .insert_at(&event("STU001", "Ada Lovelace", true), ts("2025-03-10", "09:00:00"))
            .unwrap();
        store
            .insert_at(&event("STU002", "Grace Hopper", true), ts("2025-03-10", "11:00:00"))
            .unwrap();
        store
            .insert_at(&event("STU003", "Alan Turing", true), ts("2025-03-12", "09:00:00"))
            .unwrap();

        let dates = store.get_distinct_dates().unwrap();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            ]
        );
    }

    #[test]
    fn reset_discards_everything_but_leaves_store_ready() {
        let mut store = ready_store();
        store.insert(&event("STU001", "Ada Lovelace", true)).unwrap();

        store.reset().unwrap();
        assert!(store.is_ready());
        assert!(store.get_all().unwrap().is_empty());
    }
}
