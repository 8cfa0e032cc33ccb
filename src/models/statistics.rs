use serde::Serialize;

/// Aggregate counters for the reports summary view.
/// Always computed live from the table, never cached.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct Statistics {
    pub total: u64,
    pub eligible: u64,
    pub ineligible: u64,
    pub todays_count: u64,
}

/// Record counts grouped by eligibility status.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub eligible: u64,
    pub not_eligible: u64,
}

/// Record counts grouped by verification method.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct MethodCounts {
    pub exam_card: u64,
    pub manual: u64,
}

/// Detailed breakdowns, optionally restricted to one calendar day.
///
/// `hourly` is zero-filled across all 24 hours (index = hour of day),
/// so chart consumers can index directly without probing for gaps.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DetailedStatistics {
    pub by_status: StatusCounts,
    pub by_method: MethodCounts,
    pub hourly: [u64; 24],
}
