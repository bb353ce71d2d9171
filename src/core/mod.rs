mod engine;
mod types;

pub use engine::{build_schedule, monthly_payment, summarize};
pub use types::{LoanSummary, ScheduleEntry};
