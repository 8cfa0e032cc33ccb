use serde::Serialize;

/// Snapshot of the eligibility decision taken at verification time.
/// Never recomputed after the record is written.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Eligible,
    NotEligible,
}

impl EligibilityStatus {
    /// Derive the status from the eligibility boolean handed over by the
    /// verification flow.
    pub fn from_eligibility(is_eligible: bool) -> Self {
        if is_eligible {
            EligibilityStatus::Eligible
        } else {
            EligibilityStatus::NotEligible
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EligibilityStatus::Eligible => "eligible",
            EligibilityStatus::NotEligible => "not_eligible",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "eligible" => Some(EligibilityStatus::Eligible),
            "not_eligible" => Some(EligibilityStatus::NotEligible),
            _ => None,
        }
    }

    pub fn is_eligible(&self) -> bool {
        matches!(self, EligibilityStatus::Eligible)
    }
}
