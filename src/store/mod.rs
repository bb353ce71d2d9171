mod memory;

pub use memory::MemoryStore;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: u64,
    pub user_id: u64,
    pub amount: f64,
    pub annual_rate: f64,
    pub term_months: u32,
}

/// Parameters for a loan about to be inserted; the store assigns the id.
#[derive(Debug, Clone, Copy)]
pub struct NewLoan {
    pub user_id: u64,
    pub amount: f64,
    pub annual_rate: f64,
    pub term_months: u32,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user {0} not found")]
    UserNotFound(u64),

    #[error("loan {0} not found")]
    LoanNotFound(u64),

    #[error("{0}")]
    InvalidLoan(&'static str),

    #[error("loan cannot be shared with its current owner")]
    SelfShare,

    #[error("record store lock poisoned")]
    Poisoned,
}

/// The storage seam between the HTTP layer and persistence. Implementations
/// guarantee per-call atomicity: each method either fully applies its write
/// and makes it visible, or changes nothing. No cross-call transactions.
pub trait RecordStore: Send + Sync {
    /// Inserts a user and assigns its id.
    fn create_user(&self, username: &str) -> Result<User, StoreError>;

    fn get_user(&self, id: u64) -> Result<User, StoreError>;

    /// Inserts a loan for an existing user. Rejects a non-positive amount or
    /// rate and a zero term with `InvalidLoan`.
    fn create_loan(&self, new_loan: NewLoan) -> Result<Loan, StoreError>;

    fn get_loan(&self, id: u64) -> Result<Loan, StoreError>;

    /// All loans owned by the user, in creation order.
    fn list_loans_for_user(&self, user_id: u64) -> Result<Vec<Loan>, StoreError>;

    /// Duplicates a loan onto another user: same amount, rate and term, a new
    /// id, the recipient as owner. The source loan is left untouched and the
    /// recipient must not already own it.
    fn create_shared_loan(&self, loan_id: u64, recipient_id: u64) -> Result<Loan, StoreError>;
}
