// Adapters layer: concrete customer stores behind the `CustomerRepository` port.

pub mod json_file;
pub mod memory;
pub mod table;

pub use json_file::JsonFileRepository;
pub use memory::InMemoryCustomerRepository;
pub use table::CustomerTable;
