pub mod desk;
pub mod export;
pub mod outcome;
pub mod query;
pub mod sort;

pub use crate::domain::model::{Customer, CustomerId, CustomerListView, CustomerQuery, SortState};
pub use crate::domain::ports::{ConfigProvider, CustomerRepository};
pub use crate::utils::error::Result;
