use sea_orm::DatabaseConnection;

use models::customer;
use models::errors::ModelError;

use crate::customer::domain::{Customer, NewCustomer};
use crate::customer::errors::CustomerError;
use crate::customer::repository::CustomerRepository;

/// SeaORM-backed repository; each call borrows a pooled connection for its statement.
pub struct SeaOrmCustomerRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn insert(&self, new: &NewCustomer) -> Result<Customer, CustomerError> {
        let created = customer::create(&self.db, &new.name, &new.email, new.phone.as_deref())
            .await
            .map_err(|e| match e {
                ModelError::Conflict(_) => CustomerError::email_taken(&new.email),
                other => other.into(),
            })?;
        Ok(created.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, CustomerError> {
        let res = customer::find_by_id(&self.db, id).await?;
        Ok(res.map(Customer::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, CustomerError> {
        let res = customer::find_by_email(&self.db, email).await?;
        Ok(res.map(Customer::from))
    }

    async fn find_by_name_containing(&self, term: &str) -> Result<Vec<Customer>, CustomerError> {
        let res = customer::find_by_name_containing(&self.db, term).await?;
        Ok(res.into_iter().map(Customer::from).collect())
    }

    async fn list_all_ordered_by_name(&self) -> Result<Vec<Customer>, CustomerError> {
        let res = customer::list_ordered_by_name(&self.db).await?;
        Ok(res.into_iter().map(Customer::from).collect())
    }

    async fn delete(&self, id: i32) -> Result<bool, CustomerError> {
        Ok(customer::hard_delete(&self.db, id).await?)
    }
}
