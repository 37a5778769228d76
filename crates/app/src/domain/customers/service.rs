//! Customers service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::customers::{
        data::NewCustomer,
        errors::CustomersServiceError,
        records::{CustomerRecord, CustomerUuid},
        repository::PgCustomersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCustomersService {
    db: Db,
    repository: PgCustomersRepository,
}

impl PgCustomersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCustomersRepository::new(),
        }
    }
}

#[async_trait]
impl CustomersService for PgCustomersService {
    async fn get_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let customer = self
            .repository
            .find_customer(&mut tx, customer)
            .await?
            .ok_or(CustomersServiceError::NotFound)?;

        tx.commit().await?;

        Ok(customer)
    }

    #[tracing::instrument(
        name = "customers.service.create_customer",
        skip(self, customer),
        fields(customer_uuid = %customer.uuid),
        err
    )]
    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_customer(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Retrieve a single customer.
    async fn get_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Register a new customer.
    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError>;
}
