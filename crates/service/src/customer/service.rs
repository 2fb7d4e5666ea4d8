use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::domain::{CreateCustomerInput, Customer, NewCustomer};
use super::errors::CustomerError;
use super::repository::CustomerRepository;

/// Customer business service independent of web framework.
///
/// Holds no state besides its repository handle, so one instance can be
/// shared across requests behind an `Arc`.
pub struct CustomerService<R: CustomerRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: CustomerRepository + ?Sized> CustomerService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Register a new customer.
    ///
    /// Name, email and phone are validated in that order, normalized, and the
    /// email is checked for an existing owner before inserting. A unique
    /// violation raised by the store at insert time is reported as a conflict too.
    ///
    /// # Examples
    /// ```
    /// use service::customer::{CustomerService, CreateCustomerInput, repository::mock::MockCustomerRepository};
    /// use std::sync::Arc;
    /// let svc = CustomerService::new(Arc::new(MockCustomerRepository::default()));
    /// let input = CreateCustomerInput { name: "  Maria Silva  ".into(), email: "MARIA@EMAIL.COM".into(), phone: None };
    /// let customer = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(customer.name, "Maria Silva");
    /// assert_eq!(customer.email, "maria@email.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: CreateCustomerInput) -> Result<Customer, CustomerError> {
        let new = NewCustomer::from_input(&input)?;

        if let Some(existing) = self.repo.find_by_email(&new.email).await? {
            warn!(customer_id = existing.id, "email_already_registered");
            return Err(CustomerError::email_taken(&new.email));
        }

        let customer = self.repo.insert(&new).await.map_err(|e| match e {
            CustomerError::Conflict(_) => {
                warn!("email_registered_concurrently");
                CustomerError::email_taken(&new.email)
            }
            other => other,
        })?;
        info!(customer_id = customer.id, email = %customer.email, "customer_created");
        Ok(customer)
    }

    /// All customers ordered by name.
    pub async fn list_all(&self) -> Result<Vec<Customer>, CustomerError> {
        self.repo.list_all_ordered_by_name().await
    }

    /// Look a customer up by id; a missing row is `Ok(None)`.
    ///
    /// Ids are positive 32-bit integers; anything else is a caller error.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, CustomerError> {
        let id = i32::try_from(id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| CustomerError::Validation("invalid id".into()))?;
        self.repo.find_by_id(id).await
    }

    /// Case-insensitive substring search on the name.
    ///
    /// # Examples
    /// ```
    /// use service::customer::{CustomerService, repository::mock::MockCustomerRepository};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockCustomerRepository::default());
    /// let svc = CustomerService::new(repo.clone());
    /// let found = tokio_test::block_on(svc.find_by_name("   ")).unwrap();
    /// assert!(found.is_empty());
    /// assert_eq!(repo.store_calls(), 0);
    /// ```
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, term: &str) -> Result<Vec<Customer>, CustomerError> {
        let term = term.trim();
        if term.is_empty() {
            debug!("blank name filter, skipping query");
            return Ok(Vec::new());
        }
        self.repo.find_by_name_containing(term).await
    }

    /// Exact lookup by email after trimming and lowercasing.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, CustomerError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Ok(None);
        }
        self.repo.find_by_email(&email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::repo::seaorm::SeaOrmCustomerRepository;
    use crate::customer::repository::mock::MockCustomerRepository;
    use crate::test_support::get_db;
    use async_trait::async_trait;

    fn input(name: &str, email: &str, phone: Option<&str>) -> CreateCustomerInput {
        CreateCustomerInput { name: name.into(), email: email.into(), phone: phone.map(Into::into) }
    }

    fn mock_service() -> (Arc<MockCustomerRepository>, CustomerService<MockCustomerRepository>) {
        let repo = Arc::new(MockCustomerRepository::default());
        (repo.clone(), CustomerService::new(repo))
    }

    #[tokio::test]
    async fn create_valid_customer() {
        let (_, svc) = mock_service();
        let c = svc.create(input("João da Silva", "joao@email.com", Some("41999999999"))).await.unwrap();
        assert!(c.id > 0);
        assert_eq!(c.name, "João da Silva");
        assert_eq!(c.email, "joao@email.com");
        assert_eq!(c.phone.as_deref(), Some("41999999999"));
        assert!(c.updated_at.is_none());
    }

    #[tokio::test]
    async fn create_without_phone() {
        let (_, svc) = mock_service();
        let c = svc.create(input("Maria Santos", "maria@email.com", None)).await.unwrap();
        assert!(c.phone.is_none());
        let c = svc.create(input("Ana", "ana@email.com", Some("   "))).await.unwrap();
        assert!(c.phone.is_none());
    }

    #[tokio::test]
    async fn create_trims_name_and_lowercases_email() {
        let (_, svc) = mock_service();
        let c = svc.create(input("  Maria Silva  ", "TESTE@EMAIL.COM", None)).await.unwrap();
        assert_eq!(c.name, "Maria Silva");
        assert_eq!(c.email, "teste@email.com");
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict_in_either_order() {
        for (first, second) in [("mesmo@email.com", "MESMO@email.com"), ("MESMO@email.com", " mesmo@email.com ")] {
            let (repo, svc) = mock_service();
            svc.create(input("Cliente 1", first, None)).await.unwrap();
            let err = svc.create(input("Cliente 2", second, None)).await.unwrap_err();
            assert!(matches!(err, CustomerError::Conflict(ref m) if m == "email already registered: mesmo@email.com"), "got {err:?}");
            assert_eq!(repo.list_all_ordered_by_name().await.unwrap().len(), 1);
        }
    }

    #[tokio::test]
    async fn blank_name_rejected_without_insert() {
        let (repo, svc) = mock_service();
        let err = svc.create(input("   ", "a@email.com", None)).await.unwrap_err();
        assert!(matches!(err, CustomerError::Validation(ref m) if m.contains("name")));
        assert_eq!(repo.store_calls(), 0);
    }

    #[tokio::test]
    async fn invalid_email_rejected_without_insert() {
        let (repo, svc) = mock_service();
        let err = svc.create(input("Ana", "emailinvalido", None)).await.unwrap_err();
        assert!(matches!(err, CustomerError::Validation(ref m) if m == "invalid email"));
        let err = svc.create(input("Ana", "  ", None)).await.unwrap_err();
        assert!(matches!(err, CustomerError::Validation(ref m) if m == "email required"));
        assert_eq!(repo.store_calls(), 0);
    }

    #[tokio::test]
    async fn invalid_phone_rejected() {
        let (_, svc) = mock_service();
        let err = svc.create(input("Ana", "ana@email.com", Some("telefone"))).await.unwrap_err();
        assert!(matches!(err, CustomerError::Validation(ref m) if m == "invalid phone"));
    }

    #[tokio::test]
    async fn find_by_email_after_create_ignores_case() {
        let (_, svc) = mock_service();
        let c = svc.create(input("Maria", "maria@email.com", None)).await.unwrap();
        let found = svc.find_by_email("  MARIA@Email.COM ").await.unwrap().unwrap();
        assert_eq!(found, c);
        assert!(svc.find_by_email("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_all_empty_then_ordered() {
        let (_, svc) = mock_service();
        assert!(svc.list_all().await.unwrap().is_empty());
        for (n, e) in [("Pedro Costa", "pedro@email.com"), ("Maria Silva", "maria@email.com"), ("João Silva", "joao@email.com")] {
            svc.create(input(n, e, None)).await.unwrap();
        }
        let names: Vec<String> = svc.list_all().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["João Silva", "Maria Silva", "Pedro Costa"]);
    }

    #[tokio::test]
    async fn find_by_name_is_case_insensitive_substring() {
        let (_, svc) = mock_service();
        for (n, e) in [("Pedro Costa", "pedro@email.com"), ("Maria Silva", "maria@email.com"), ("João Silva", "joao@email.com")] {
            svc.create(input(n, e, None)).await.unwrap();
        }
        let names: Vec<String> = svc.find_by_name("silva").await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["João Silva", "Maria Silva"]);
        assert!(svc.find_by_name("Inexistente").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_name_filter_skips_store() {
        let (repo, svc) = mock_service();
        assert!(svc.find_by_name("").await.unwrap().is_empty());
        assert!(svc.find_by_name("   ").await.unwrap().is_empty());
        assert_eq!(repo.store_calls(), 0);
    }

    #[tokio::test]
    async fn find_by_id_missing_and_invalid() {
        let (_, svc) = mock_service();
        assert!(svc.find_by_id(999).await.unwrap().is_none());
        assert!(matches!(svc.find_by_id(0).await, Err(CustomerError::Validation(_))));
        assert!(matches!(svc.find_by_id(-5).await, Err(CustomerError::Validation(_))));
        assert!(matches!(svc.find_by_id(i64::from(i32::MAX) + 1).await, Err(CustomerError::Validation(_))));

        let c = svc.create(input("Ana", "ana@email.com", None)).await.unwrap();
        assert_eq!(svc.find_by_id(i64::from(c.id)).await.unwrap(), Some(c));
    }

    /// Lookup never sees the existing row, as when another request inserts
    /// between the check and the insert.
    struct RacingRepository(MockCustomerRepository);

    #[async_trait]
    impl CustomerRepository for RacingRepository {
        async fn insert(&self, new: &NewCustomer) -> Result<Customer, CustomerError> { self.0.insert(new).await }
        async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, CustomerError> { self.0.find_by_id(id).await }
        async fn find_by_email(&self, _email: &str) -> Result<Option<Customer>, CustomerError> { Ok(None) }
        async fn find_by_name_containing(&self, term: &str) -> Result<Vec<Customer>, CustomerError> { self.0.find_by_name_containing(term).await }
        async fn list_all_ordered_by_name(&self) -> Result<Vec<Customer>, CustomerError> { self.0.list_all_ordered_by_name().await }
        async fn delete(&self, id: i32) -> Result<bool, CustomerError> { self.0.delete(id).await }
    }

    #[tokio::test]
    async fn insert_time_violation_is_conflict() {
        let svc = CustomerService::new(Arc::new(RacingRepository(MockCustomerRepository::default())));
        svc.create(input("A", "race@email.com", None)).await.unwrap();
        let err = svc.create(input("B", "race@email.com", None)).await.unwrap_err();
        assert!(matches!(err, CustomerError::Conflict(_)));
    }

    struct BrokenRepository;

    #[async_trait]
    impl CustomerRepository for BrokenRepository {
        async fn insert(&self, _new: &NewCustomer) -> Result<Customer, CustomerError> { Err(CustomerError::Storage("connection reset".into())) }
        async fn find_by_id(&self, _id: i32) -> Result<Option<Customer>, CustomerError> { Err(CustomerError::Storage("connection reset".into())) }
        async fn find_by_email(&self, _email: &str) -> Result<Option<Customer>, CustomerError> { Ok(None) }
        async fn find_by_name_containing(&self, _term: &str) -> Result<Vec<Customer>, CustomerError> { Err(CustomerError::Storage("connection reset".into())) }
        async fn list_all_ordered_by_name(&self) -> Result<Vec<Customer>, CustomerError> { Err(CustomerError::Storage("connection reset".into())) }
        async fn delete(&self, _id: i32) -> Result<bool, CustomerError> { Err(CustomerError::Storage("connection reset".into())) }
    }

    #[tokio::test]
    async fn storage_failures_propagate_unchanged() {
        let svc = CustomerService::new(Arc::new(BrokenRepository));
        assert!(matches!(svc.create(input("A", "a@email.com", None)).await, Err(CustomerError::Storage(_))));
        assert!(matches!(svc.list_all().await, Err(CustomerError::Storage(_))));
        assert!(matches!(svc.find_by_id(1).await, Err(CustomerError::Storage(_))));
    }

    #[tokio::test]
    async fn works_through_trait_object() {
        let repo: Arc<dyn CustomerRepository> = Arc::new(MockCustomerRepository::default());
        let svc: CustomerService<dyn CustomerRepository> = CustomerService::new(repo);
        let c = svc.create(input("Ana", "ana@email.com", None)).await.unwrap();
        assert_eq!(svc.find_by_id(i64::from(c.id)).await.unwrap(), Some(c));
    }

    #[tokio::test]
    async fn concurrent_creates_same_email_one_wins() -> Result<(), anyhow::Error> {
        let repo = Arc::new(SeaOrmCustomerRepository::new(get_db().await?));
        let svc = Arc::new(CustomerService::new(repo));

        let a = tokio::spawn({
            let svc = svc.clone();
            async move { svc.create(input("Primeiro", "corrida@email.com", None)).await }
        });
        let b = tokio::spawn({
            let svc = svc.clone();
            async move { svc.create(input("Segundo", "CORRIDA@email.com", None)).await }
        });
        let results = [a.await?, b.await?];

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(results.iter().filter(|r| matches!(r, Err(CustomerError::Conflict(_)))).count(), 1);
        assert_eq!(svc.list_all().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn sqlite_backed_search_matches_properties() -> Result<(), anyhow::Error> {
        let svc = CustomerService::new(Arc::new(SeaOrmCustomerRepository::new(get_db().await?)));
        for (n, e) in [("João Silva", "joao@email.com"), ("Maria Silva", "maria@email.com"), ("Pedro Costa", "pedro@email.com")] {
            svc.create(input(n, e, None)).await?;
        }
        let names: Vec<String> = svc.find_by_name("silva").await?.into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["João Silva", "Maria Silva"]);
        assert_eq!(svc.list_all().await?.len(), 3);
        assert!(svc.find_by_id(999).await?.is_none());
        Ok(())
    }
}
