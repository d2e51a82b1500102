use crate::domain::model::{Customer, CustomerId};
use crate::utils::error::{DeskError, Result};
use serde::{Deserialize, Serialize};

/// Ordered customer table with id assignment and version checks.
///
/// Shared by the in-memory and file-backed repositories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerTable {
    next_id: CustomerId,
    customers: Vec<Customer>,
}

impl CustomerTable {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            customers: Vec::new(),
        }
    }

    /// Loads pre-existing records as stored (ids and versions kept).
    pub fn from_customers(customers: Vec<Customer>) -> Self {
        let next_id = customers
            .iter()
            .map(|c| c.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        Self { next_id, customers }
    }

    pub fn all(&self) -> &[Customer] {
        &self.customers
    }

    pub fn get(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Fails once the id space is exhausted.
    pub fn add(&mut self, mut customer: Customer) -> Result<CustomerId> {
        // next_id may lag behind hand-edited data files
        let highest = self.customers.iter().map(|c| c.id).max().unwrap_or(0);
        let id = highest
            .checked_add(1)
            .map(|candidate| self.next_id.max(candidate))
            .ok_or_else(|| DeskError::storage("customer id space exhausted"))?;
        self.next_id = id.saturating_add(1);
        customer.id = id;
        customer.version = 1;
        self.customers.push(customer);
        Ok(id)
    }

    /// Rejects tables holding the same id twice.
    pub fn check_unique_ids(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::with_capacity(self.customers.len());
        for customer in &self.customers {
            if !seen.insert(customer.id) {
                return Err(DeskError::storage(format!(
                    "duplicate customer id {} in stored data",
                    customer.id
                )));
            }
        }
        Ok(())
    }

    pub fn update(&mut self, customer: Customer) -> Result<()> {
        let stored = self
            .customers
            .iter_mut()
            .find(|c| c.id == customer.id)
            .ok_or(DeskError::NotFound { id: customer.id })?;

        if stored.version != customer.version {
            return Err(DeskError::Conflict {
                id: customer.id,
                expected: customer.version,
                found: stored.version,
            });
        }

        let version = stored
            .version
            .checked_add(1)
            .ok_or_else(|| DeskError::storage(format!("version of customer {} exhausted", customer.id)))?;
        *stored = Customer {
            version,
            ..customer
        };
        Ok(())
    }

    pub fn remove(&mut self, id: CustomerId) -> Result<Customer> {
        let index = self
            .customers
            .iter()
            .position(|c| c.id == id)
            .ok_or(DeskError::NotFound { id })?;
        Ok(self.customers.remove(index))
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}
