use crate::domain::model::{Customer, CustomerId, SearchScope, SortState};
use crate::utils::error::Result;
use crate::utils::validation::ValidationRules;
use async_trait::async_trait;

/// Persistence contract for customer records.
///
/// `get_by_id` reports absence as `Ok(None)`; an `Err` always means the lookup
/// itself failed. `update` must fail with `DeskError::Conflict` when the
/// stored version no longer matches `customer.version`.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Customer>>;
    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>>;
    /// Stores a new record and returns the identity assigned to it.
    async fn add(&self, customer: Customer) -> Result<CustomerId>;
    async fn update(&self, customer: Customer) -> Result<()>;
    async fn remove(&self, id: CustomerId) -> Result<()>;
}

#[async_trait]
impl<R: CustomerRepository + ?Sized> CustomerRepository for std::sync::Arc<R> {
    async fn get_all(&self) -> Result<Vec<Customer>> {
        (**self).get_all().await
    }

    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>> {
        (**self).get_by_id(id).await
    }

    async fn add(&self, customer: Customer) -> Result<CustomerId> {
        (**self).add(customer).await
    }

    async fn update(&self, customer: Customer) -> Result<()> {
        (**self).update(customer).await
    }

    async fn remove(&self, id: CustomerId) -> Result<()> {
        (**self).remove(id).await
    }
}

pub trait ConfigProvider: Send + Sync {
    fn data_path(&self) -> &str;
    fn default_sort(&self) -> SortState;
    fn search_scope(&self) -> SearchScope;
    fn validation_rules(&self) -> ValidationRules;
}
