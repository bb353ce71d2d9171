use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{Loan, NewLoan, RecordStore, StoreError, User};

struct Records {
    users: Vec<User>,
    loans: Vec<Loan>,
    next_user_id: u64,
    next_loan_id: u64,
}

/// In-memory record store. One lock acquisition per operation gives each call
/// row-level atomicity; ids are assigned sequentially from 1 like an
/// autoincrement column.
pub struct MemoryStore {
    records: RwLock<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Records {
                users: Vec::new(),
                loans: Vec::new(),
                next_user_id: 1,
                next_loan_id: 1,
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Records>, StoreError> {
        self.records.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Records>, StoreError> {
        self.records.write().map_err(|_| StoreError::Poisoned)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_loan_terms(new_loan: &NewLoan) -> Result<(), StoreError> {
    if !new_loan.amount.is_finite() || new_loan.amount <= 0.0 {
        return Err(StoreError::InvalidLoan("loan amount must be positive"));
    }
    if !new_loan.annual_rate.is_finite() || new_loan.annual_rate <= 0.0 {
        return Err(StoreError::InvalidLoan("annual interest rate must be positive"));
    }
    if new_loan.term_months == 0 {
        return Err(StoreError::InvalidLoan("loan term must be at least one month"));
    }
    Ok(())
}

impl RecordStore for MemoryStore {
    fn create_user(&self, username: &str) -> Result<User, StoreError> {
        let mut records = self.write()?;
        let user = User {
            id: records.next_user_id,
            username: username.to_string(),
        };
        records.next_user_id += 1;
        records.users.push(user.clone());
        Ok(user)
    }

    fn get_user(&self, id: u64) -> Result<User, StoreError> {
        let records = self.read()?;
        records
            .users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or(StoreError::UserNotFound(id))
    }

    fn create_loan(&self, new_loan: NewLoan) -> Result<Loan, StoreError> {
        validate_loan_terms(&new_loan)?;

        let mut records = self.write()?;
        if !records.users.iter().any(|user| user.id == new_loan.user_id) {
            return Err(StoreError::UserNotFound(new_loan.user_id));
        }

        let loan = Loan {
            id: records.next_loan_id,
            user_id: new_loan.user_id,
            amount: new_loan.amount,
            annual_rate: new_loan.annual_rate,
            term_months: new_loan.term_months,
        };
        records.next_loan_id += 1;
        records.loans.push(loan.clone());
        Ok(loan)
    }

    fn get_loan(&self, id: u64) -> Result<Loan, StoreError> {
        let records = self.read()?;
        records
            .loans
            .iter()
            .find(|loan| loan.id == id)
            .cloned()
            .ok_or(StoreError::LoanNotFound(id))
    }

    fn list_loans_for_user(&self, user_id: u64) -> Result<Vec<Loan>, StoreError> {
        let records = self.read()?;
        if !records.users.iter().any(|user| user.id == user_id) {
            return Err(StoreError::UserNotFound(user_id));
        }
        Ok(records
            .loans
            .iter()
            .filter(|loan| loan.user_id == user_id)
            .cloned()
            .collect())
    }

    fn create_shared_loan(&self, loan_id: u64, recipient_id: u64) -> Result<Loan, StoreError> {
        let mut records = self.write()?;
        let source = records
            .loans
            .iter()
            .find(|loan| loan.id == loan_id)
            .cloned()
            .ok_or(StoreError::LoanNotFound(loan_id))?;
        if !records.users.iter().any(|user| user.id == recipient_id) {
            return Err(StoreError::UserNotFound(recipient_id));
        }
        if source.user_id == recipient_id {
            return Err(StoreError::SelfShare);
        }

        let loan = Loan {
            id: records.next_loan_id,
            user_id: recipient_id,
            amount: source.amount,
            annual_rate: source.annual_rate,
            term_months: source.term_months,
        };
        records.next_loan_id += 1;
        records.loans.push(loan.clone());
        Ok(loan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_loan(user_id: u64) -> NewLoan {
        NewLoan {
            user_id,
            amount: 10_000.0,
            annual_rate: 5.0,
            term_months: 120,
        }
    }

    #[test]
    fn assigns_sequential_ids_per_entity() {
        let store = MemoryStore::new();

        let alice = store.create_user("alice").expect("create alice");
        let bob = store.create_user("bob").expect("create bob");
        assert_eq!(alice.id, 1);
        assert_eq!(bob.id, 2);

        let first = store.create_loan(sample_loan(alice.id)).expect("first loan");
        let second = store.create_loan(sample_loan(bob.id)).expect("second loan");
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn create_loan_requires_existing_user() {
        let store = MemoryStore::new();
        let err = store.create_loan(sample_loan(42)).expect_err("unknown user");
        assert!(matches!(err, StoreError::UserNotFound(42)));
    }

    #[test]
    fn create_loan_rejects_non_positive_terms() {
        let store = MemoryStore::new();
        let user = store.create_user("alice").expect("create user");

        let mut bad_amount = sample_loan(user.id);
        bad_amount.amount = 0.0;
        assert!(matches!(
            store.create_loan(bad_amount),
            Err(StoreError::InvalidLoan(_))
        ));

        let mut bad_rate = sample_loan(user.id);
        bad_rate.annual_rate = -1.0;
        assert!(matches!(
            store.create_loan(bad_rate),
            Err(StoreError::InvalidLoan(_))
        ));

        let mut bad_term = sample_loan(user.id);
        bad_term.term_months = 0;
        assert!(matches!(
            store.create_loan(bad_term),
            Err(StoreError::InvalidLoan(_))
        ));
    }

    #[test]
    fn lists_loans_in_creation_order() {
        let store = MemoryStore::new();
        let alice = store.create_user("alice").expect("create alice");
        let bob = store.create_user("bob").expect("create bob");

        let first = store.create_loan(sample_loan(alice.id)).expect("loan 1");
        store.create_loan(sample_loan(bob.id)).expect("loan 2");
        let third = store.create_loan(sample_loan(alice.id)).expect("loan 3");

        let loans = store.list_loans_for_user(alice.id).expect("list");
        assert_eq!(
            loans.iter().map(|loan| loan.id).collect::<Vec<_>>(),
            vec![first.id, third.id]
        );

        assert!(matches!(
            store.list_loans_for_user(99),
            Err(StoreError::UserNotFound(99))
        ));
    }

    #[test]
    fn share_copies_terms_to_recipient_without_touching_source() {
        let store = MemoryStore::new();
        let alice = store.create_user("alice").expect("create alice");
        let bob = store.create_user("bob").expect("create bob");
        let source = store.create_loan(sample_loan(alice.id)).expect("loan");

        let shared = store
            .create_shared_loan(source.id, bob.id)
            .expect("share loan");
        assert_ne!(shared.id, source.id);
        assert_eq!(shared.user_id, bob.id);
        assert_eq!(shared.amount, source.amount);
        assert_eq!(shared.annual_rate, source.annual_rate);
        assert_eq!(shared.term_months, source.term_months);

        let original = store.get_loan(source.id).expect("source still there");
        assert_eq!(original, source);
    }

    #[test]
    fn share_rejects_current_owner_and_unknown_ids() {
        let store = MemoryStore::new();
        let alice = store.create_user("alice").expect("create alice");
        let loan = store.create_loan(sample_loan(alice.id)).expect("loan");

        assert!(matches!(
            store.create_shared_loan(loan.id, alice.id),
            Err(StoreError::SelfShare)
        ));
        assert!(matches!(
            store.create_shared_loan(loan.id, 77),
            Err(StoreError::UserNotFound(77))
        ));
        assert!(matches!(
            store.create_shared_loan(99, alice.id),
            Err(StoreError::LoanNotFound(99))
        ));
    }
}
