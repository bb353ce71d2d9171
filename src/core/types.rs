use serde::Serialize;

/// One month of an amortization schedule: the fixed payment and the principal
/// balance remaining after that payment is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub month: u32,
    pub remaining_balance: f64,
    pub monthly_payment: f64,
}

/// Aggregate position of a loan as of a given month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    pub current_principal_balance: f64,
    pub aggregate_principal_paid: f64,
    pub aggregate_interest_paid: f64,
}
