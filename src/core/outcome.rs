use crate::domain::model::{Customer, CustomerId, CustomerListView};
use crate::utils::validation::FieldErrors;

/// Why a request was turned back to the caller for re-display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The submitted draft failed validation; it is returned as submitted.
    Draft { draft: Customer, errors: FieldErrors },
    /// Removal failed; the caller should show the delete confirmation again.
    Delete { id: CustomerId, reason: String },
}

/// Classified result of one desk operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Listed(CustomerListView),
    Found(Customer),
    NotFound,
    /// Lookup or storage failure; not recoverable within this request.
    Invalid(String),
    Rejected(Rejection),
    Conflict { id: CustomerId },
    Created(CustomerId),
    Updated(CustomerId),
    Deleted(CustomerId),
}

impl Outcome {
    pub fn name(&self) -> &'static str {
        match self {
            Outcome::Listed(_) => "Listed",
            Outcome::Found(_) => "Found",
            Outcome::NotFound => "NotFound",
            Outcome::Invalid(_) => "Invalid",
            Outcome::Rejected(_) => "Rejected",
            Outcome::Conflict { .. } => "Conflict",
            Outcome::Created(_) => "Created",
            Outcome::Updated(_) => "Updated",
            Outcome::Deleted(_) => "Deleted",
        }
    }

    /// True for outcomes that end the workflow successfully (the caller would redirect).
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Outcome::Listed(_)
                | Outcome::Found(_)
                | Outcome::Created(_)
                | Outcome::Updated(_)
                | Outcome::Deleted(_)
        )
    }

    pub fn customer(&self) -> Option<&Customer> {
        match self {
            Outcome::Found(customer) => Some(customer),
            Outcome::Rejected(Rejection::Draft { draft, .. }) => Some(draft),
            _ => None,
        }
    }

    pub fn into_listing(self) -> Option<CustomerListView> {
        match self {
            Outcome::Listed(view) => Some(view),
            _ => None,
        }
    }
}
