//! Loan amortization service: users, loans, schedules and summaries over an
//! injected record store.

pub mod api;
pub mod core;
pub mod error;
pub mod store;

pub use api::AppState;
pub use error::{ApiError, Result};
pub use store::{MemoryStore, RecordStore};
