use crate::adapters::table::CustomerTable;
use crate::domain::model::{Customer, CustomerId};
use crate::domain::ports::CustomerRepository;
use crate::utils::error::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    table: RwLock<CustomerTable>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(CustomerTable::new()),
        }
    }

    pub fn with_customers(customers: Vec<Customer>) -> Self {
        Self {
            table: RwLock::new(CustomerTable::from_customers(customers)),
        }
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.len()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn get_all(&self) -> Result<Vec<Customer>> {
        Ok(self.table.read().await.all().to_vec())
    }

    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>> {
        Ok(self.table.read().await.get(id).cloned())
    }

    async fn add(&self, customer: Customer) -> Result<CustomerId> {
        self.table.write().await.add(customer)
    }

    async fn update(&self, customer: Customer) -> Result<()> {
        self.table.write().await.update(customer)
    }

    async fn remove(&self, id: CustomerId) -> Result<()> {
        self.table.write().await.remove(id).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_crud_round() {
        let repo = InMemoryCustomerRepository::new();
        let id = repo
            .add(Customer::new("Jack", "Sparrow", "Tortuga", "10"))
            .await
            .unwrap();

        let mut stored = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.last_name, "Sparrow");

        stored.discount = "15".to_string();
        repo.update(stored).await.unwrap();
        assert_eq!(repo.get_by_id(id).await.unwrap().unwrap().discount, "15");

        repo.remove(id).await.unwrap();
        assert!(repo.get_by_id(id).await.unwrap().is_none());
        assert_eq!(repo.len().await, 0);
    }
}
