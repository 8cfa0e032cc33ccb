use crate::models::AttendanceRecord;
use serde::Serialize;

/// Flat row shape for CSV/JSON export: everything stringly-typed so the
/// payload can be handed to external report tooling as-is.
#[derive(Serialize, Clone, Debug)]
pub struct RecordExport {
    pub id: i64,
    pub student_id: String,
    pub full_name: String,
    pub status: String,
    pub academic_year: String,
    pub timestamp: String,
    pub verification_method: String,
}

impl From<&AttendanceRecord> for RecordExport {
    fn from(r: &AttendanceRecord) -> Self {
        Self {
            id: r.id,
            student_id: r.student_id.clone(),
            full_name: r.full_name.clone(),
            status: r.status.to_db_str().to_string(),
            academic_year: r.academic_year.clone(),
            timestamp: r.timestamp_str(),
            verification_method: r.verification_method.to_db_str().to_string(),
        }
    }
}
