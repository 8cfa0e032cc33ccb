use super::{method::VerificationMethod, status::EligibilityStatus};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Layout of the persisted `timestamp` column: local-naive ISO-8601 with
/// microsecond precision. Lexicographic order equals chronological order,
/// and SQLite's DATE() yields the device-local calendar day.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A single verification outcome, as persisted.
///
/// Records are immutable after creation: there is no update path, only
/// insert, read and bulk clear. `full_name`, `status` and `academic_year`
/// are denormalized snapshots taken at verification time.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRecord {
    pub id: i64, // ⇔ attendance_records.id (surrogate key, store-assigned)
    pub student_id: String,
    pub full_name: String,
    pub status: EligibilityStatus,
    pub academic_year: String, // e.g. "2024/2025"
    pub timestamp: NaiveDateTime,
    pub verification_method: VerificationMethod,
}

impl AttendanceRecord {
    pub fn timestamp_str(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Input to [`crate::store::AttendanceStore::insert`]: what the scan or
/// manual-entry flow hands over once the remote eligibility check has
/// completed. The store derives `status` from `is_eligible` and stamps
/// the timestamp itself.
#[derive(Debug, Clone)]
pub struct VerificationEvent {
    pub student_id: String,
    pub full_name: String,
    pub is_eligible: bool,
    pub academic_year: String,
    pub method: VerificationMethod,
}
