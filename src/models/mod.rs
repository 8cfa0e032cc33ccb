pub mod method;
pub mod record;
pub mod statistics;
pub mod status;

pub use method::VerificationMethod;
pub use record::{AttendanceRecord, VerificationEvent};
pub use statistics::{DetailedStatistics, MethodCounts, Statistics, StatusCounts};
pub use status::EligibilityStatus;
