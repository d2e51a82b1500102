use crate::core::outcome::{Outcome, Rejection};
use crate::core::query::compose;
use crate::domain::model::{Customer, CustomerId, CustomerQuery, SearchScope, SortState};
use crate::domain::ports::CustomerRepository;
use crate::utils::validation::FieldErrors;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingOptions {
    pub default_sort: SortState,
    pub search_scope: SearchScope,
}

/// Runs the customer workflows against a repository and classifies every result.
///
/// Each call is independent. Failure tiers are kept apart: lookup failures are
/// `Invalid`, absence is `NotFound`, version collisions on update are
/// `Conflict`, and failed removals come back as a soft `Rejected`.
pub struct CustomerDesk<R: CustomerRepository> {
    repository: R,
    options: ListingOptions,
}

impl<R: CustomerRepository> CustomerDesk<R> {
    pub fn new(repository: R) -> Self {
        Self::with_options(repository, ListingOptions::default())
    }

    pub fn with_options(repository: R, options: ListingOptions) -> Self {
        Self {
            repository,
            options,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn options(&self) -> ListingOptions {
        self.options
    }

    pub async fn index(&self, search: Option<&str>, sort: Option<SortState>) -> Outcome {
        let query = CustomerQuery::new(search, sort).with_scope(self.options.search_scope);
        self.query(&query).await
    }

    pub async fn query(&self, query: &CustomerQuery) -> Outcome {
        match self.repository.get_all().await {
            Ok(all) => Outcome::Listed(compose(&all, query, self.options.default_sort)),
            Err(e) => {
                tracing::warn!("Listing customers failed: {}", e);
                Outcome::Invalid(e.to_string())
            }
        }
    }

    /// Blank form for a new customer.
    pub fn new_form(&self) -> Customer {
        Customer::default()
    }

    pub async fn show(&self, id: CustomerId) -> Outcome {
        self.lookup(id, "show").await
    }

    pub async fn edit_form(&self, id: CustomerId) -> Outcome {
        self.lookup(id, "edit").await
    }

    pub async fn delete_confirm(&self, id: CustomerId) -> Outcome {
        self.lookup(id, "delete").await
    }

    async fn lookup(&self, id: CustomerId, action: &str) -> Outcome {
        match self.repository.get_by_id(id).await {
            Ok(Some(customer)) => {
                tracing::debug!("{}: found customer {}", action, id);
                Outcome::Found(customer)
            }
            Ok(None) => {
                tracing::debug!("{}: customer {} not found", action, id);
                Outcome::NotFound
            }
            Err(e) => {
                tracing::warn!("{}: lookup of customer {} failed: {}", action, id, e);
                Outcome::Invalid(e.to_string())
            }
        }
    }

    pub async fn create(&self, draft: Customer, errors: &FieldErrors) -> Outcome {
        if !errors.is_valid() {
            tracing::debug!("create: draft rejected ({})", errors);
            return Outcome::Rejected(Rejection::Draft {
                draft,
                errors: errors.clone(),
            });
        }

        match self.repository.add(draft).await {
            Ok(id) => {
                tracing::info!("Created customer {}", id);
                Outcome::Created(id)
            }
            Err(e) => {
                tracing::warn!("create: storing customer failed: {}", e);
                Outcome::Invalid(e.to_string())
            }
        }
    }

    pub async fn edit(&self, id: CustomerId, draft: Customer, errors: &FieldErrors) -> Outcome {
        if draft.id != id {
            tracing::debug!("edit: route id {} does not match draft id {}", id, draft.id);
            return Outcome::NotFound;
        }

        if !errors.is_valid() {
            tracing::debug!("edit: draft for customer {} rejected ({})", id, errors);
            return Outcome::Rejected(Rejection::Draft {
                draft,
                errors: errors.clone(),
            });
        }

        match self.repository.update(draft).await {
            Ok(()) => {
                tracing::info!("Updated customer {}", id);
                Outcome::Updated(id)
            }
            Err(e) if e.is_conflict() => {
                tracing::warn!("edit: {}", e);
                Outcome::Conflict { id }
            }
            Err(e) => {
                tracing::warn!("edit: updating customer {} failed: {}", id, e);
                Outcome::Invalid(e.to_string())
            }
        }
    }

    pub async fn delete(&self, id: CustomerId) -> Outcome {
        match self.repository.remove(id).await {
            Ok(()) => {
                tracing::info!("Deleted customer {}", id);
                Outcome::Deleted(id)
            }
            Err(e) => {
                tracing::warn!("delete: removing customer {} failed: {}", id, e);
                Outcome::Rejected(Rejection::Delete {
                    id,
                    reason: e.to_string(),
                })
            }
        }
    }
}
