use serde::Serialize;

/// How a verification event was produced: by scanning the barcode on a
/// generated exam card, or by manual student-id entry.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMethod {
    ExamCard,
    Manual,
}

impl VerificationMethod {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            VerificationMethod::ExamCard => "exam_card",
            VerificationMethod::Manual => "manual",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "exam_card" => Some(VerificationMethod::ExamCard),
            "manual" => Some(VerificationMethod::Manual),
            _ => None,
        }
    }

    /// Helper: parse a CLI/config spelling (accepts both `exam-card`
    /// and `exam_card`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().replace('-', "_").as_str() {
            "exam_card" => Some(VerificationMethod::ExamCard),
            "manual" => Some(VerificationMethod::Manual),
            _ => None,
        }
    }
}
