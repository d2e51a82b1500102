pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::TomlConfig;

pub use adapters::{InMemoryCustomerRepository, JsonFileRepository};
pub use core::desk::{CustomerDesk, ListingOptions};
pub use core::outcome::{Outcome, Rejection};
pub use domain::model::{Customer, CustomerId, CustomerListView, SearchScope, SortField, SortState};
pub use domain::ports::{ConfigProvider, CustomerRepository};
pub use utils::error::{DeskError, Result};
pub use utils::validation::{validate_customer, FieldErrors, ValidationRules};
