use async_trait::async_trait;

use super::domain::{Customer, NewCustomer};
use super::errors::CustomerError;

/// Repository abstraction for customer persistence.
///
/// Implementations receive already-normalized values; `find_by_email` is
/// still expected to compare case-insensitively.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert a row; a duplicate email must surface as [`CustomerError::Conflict`].
    async fn insert(&self, new: &NewCustomer) -> Result<Customer, CustomerError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, CustomerError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, CustomerError>;
    async fn find_by_name_containing(&self, term: &str) -> Result<Vec<Customer>, CustomerError>;
    async fn list_all_ordered_by_name(&self) -> Result<Vec<Customer>, CustomerError>;
    async fn delete(&self, id: i32) -> Result<bool, CustomerError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct State {
        rows: Vec<Customer>,
        last_id: i32,
    }

    #[derive(Default)]
    pub struct MockCustomerRepository {
        state: Mutex<State>,
        calls: AtomicUsize,
    }

    impl MockCustomerRepository {
        /// Number of repository calls made so far.
        pub fn store_calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn touch(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }

        fn sorted(mut rows: Vec<Customer>) -> Vec<Customer> {
            rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
            rows
        }
    }

    #[async_trait]
    impl CustomerRepository for MockCustomerRepository {
        async fn insert(&self, new: &NewCustomer) -> Result<Customer, CustomerError> {
            self.touch();
            let mut state = self.state.lock().unwrap();
            if state.rows.iter().any(|c| c.email.eq_ignore_ascii_case(&new.email)) {
                return Err(CustomerError::email_taken(&new.email));
            }
            state.last_id += 1;
            let customer = Customer {
                id: state.last_id,
                name: new.name.clone(),
                email: new.email.clone(),
                phone: new.phone.clone(),
                created_at: Utc::now().into(),
                updated_at: None,
            };
            state.rows.push(customer.clone());
            Ok(customer)
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, CustomerError> {
            self.touch();
            let state = self.state.lock().unwrap();
            Ok(state.rows.iter().find(|c| c.id == id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, CustomerError> {
            self.touch();
            let state = self.state.lock().unwrap();
            Ok(state.rows.iter().find(|c| c.email.eq_ignore_ascii_case(email)).cloned())
        }

        async fn find_by_name_containing(&self, term: &str) -> Result<Vec<Customer>, CustomerError> {
            self.touch();
            let needle = term.to_lowercase();
            let state = self.state.lock().unwrap();
            let hits = state.rows.iter().filter(|c| c.name.to_lowercase().contains(&needle)).cloned().collect();
            Ok(Self::sorted(hits))
        }

        async fn list_all_ordered_by_name(&self) -> Result<Vec<Customer>, CustomerError> {
            self.touch();
            let state = self.state.lock().unwrap();
            Ok(Self::sorted(state.rows.clone()))
        }

        async fn delete(&self, id: i32) -> Result<bool, CustomerError> {
            self.touch();
            let mut state = self.state.lock().unwrap();
            let before = state.rows.len();
            state.rows.retain(|c| c.id != id);
            Ok(state.rows.len() != before)
        }
    }
}
