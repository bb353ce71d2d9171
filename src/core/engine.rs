use super::types::{LoanSummary, ScheduleEntry};

fn monthly_rate(annual_rate: f64) -> f64 {
    annual_rate / 12.0 / 100.0
}

/// Fixed monthly payment that fully retires `principal` over `term_months` at
/// `annual_rate` percent per year, per the standard annuity formula.
///
/// Callers must ensure principal > 0, annual_rate > 0 and term_months >= 1.
/// The strictly positive rate keeps the denominator away from zero; a zero
/// rate has no branch here and is rejected upstream.
pub fn monthly_payment(principal: f64, annual_rate: f64, term_months: u32) -> f64 {
    let r = monthly_rate(annual_rate);
    (principal * r) / (1.0 - (1.0 + r).powi(-(term_months as i32)))
}

/// Month-by-month amortization schedule with exactly one entry per month of
/// the term.
///
/// The payment is constant across entries; the balance decreases every month
/// and lands within rounding distance of zero on the final entry. Balances
/// are carried at full precision, rounding is a display concern.
pub fn build_schedule(principal: f64, annual_rate: f64, term_months: u32) -> Vec<ScheduleEntry> {
    let r = monthly_rate(annual_rate);
    let payment = monthly_payment(principal, annual_rate, term_months);

    let mut entries = Vec::with_capacity(term_months as usize);
    let mut balance = principal;
    for month in 1..=term_months {
        let interest = balance * r;
        let principal_payment = payment - interest;
        balance -= principal_payment;
        entries.push(ScheduleEntry {
            month,
            remaining_balance: balance,
            monthly_payment: payment,
        });
    }
    entries
}

/// Aggregate principal/interest position after `month_number` payments.
///
/// Total paid is the constant payment times the month count, which only holds
/// for the fixed-rate, fixed-term loans modeled here. Requires
/// 1 <= month_number <= schedule.len(); out-of-range months are the caller's
/// error to reject.
pub fn summarize(principal: f64, month_number: u32, schedule: &[ScheduleEntry]) -> LoanSummary {
    let current_principal_balance = schedule[month_number as usize - 1].remaining_balance;
    let total_paid = schedule[0].monthly_payment * f64::from(month_number);

    let aggregate_principal_paid = principal - current_principal_balance;
    let aggregate_interest_paid = total_paid - aggregate_principal_paid;

    LoanSummary {
        current_principal_balance,
        aggregate_principal_paid,
        aggregate_interest_paid,
    }
}
