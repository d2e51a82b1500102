use crate::config::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::domain::model::{CustomerId, SearchScope, SortState};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate, ValidationRules};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "customer-desk")]
#[command(about = "List, search, sort and edit customer records")]
pub struct CliConfig {
    /// Customer data file [default: ./customers.json]
    #[arg(long, global = true)]
    pub data_file: Option<String>,

    /// TOML configuration file; flags given explicitly take precedence over it
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Ordering used when a listing names no sort token [default: LastNameAsc]
    #[arg(long, global = true)]
    pub default_sort: Option<SortState>,

    /// Name fields the search term is matched against [default: any_name]
    #[arg(long, global = true)]
    pub search_scope: Option<SearchScope>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List customers, optionally filtered and sorted
    List {
        #[arg(short, long)]
        search: Option<String>,
        /// Sort token such as LastNameDesc; unknown tokens use the default
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show a single customer
    Show { id: CustomerId },
    /// Add a customer
    Create {
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "")]
        discount: String,
    },
    /// Replace the fields of an existing customer
    Edit {
        id: CustomerId,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        discount: Option<String>,
        /// Version the edit is based on; defaults to the stored one
        #[arg(long)]
        expected_version: Option<u64>,
    },
    /// Delete a customer
    Delete {
        id: CustomerId,
        /// Skip the confirmation step
        #[arg(short, long)]
        yes: bool,
    },
    /// Write a listing as CSV
    Export {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        sort: Option<String>,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
    },
}

pub const DEFAULT_DATA_FILE: &str = "./customers.json";

impl CliConfig {
    /// Copies explicitly given flags over the values loaded from a TOML file.
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(path) = &self.data_file {
            tracing::info!("🔧 Data file overridden to: {}", path);
            config.storage.path = path.clone();
        }
        if let Some(sort) = self.default_sort {
            tracing::info!("🔧 Default sort overridden to: {}", sort);
            config.listing.default_sort = Some(sort.token().to_string());
        }
        if let Some(scope) = self.search_scope {
            tracing::info!("🔧 Search scope overridden to: {:?}", scope);
            config.listing.search_scope = Some(scope);
        }
    }
}

impl ConfigProvider for CliConfig {
    fn data_path(&self) -> &str {
        self.data_file.as_deref().unwrap_or(DEFAULT_DATA_FILE)
    }

    fn default_sort(&self) -> SortState {
        self.default_sort.unwrap_or_default()
    }

    fn search_scope(&self) -> SearchScope {
        self.search_scope.unwrap_or_default()
    }

    fn validation_rules(&self) -> ValidationRules {
        ValidationRules::default()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_file", self.data_path())?;
        if let Some(config) = &self.config {
            validate_path("config", config)?;
        }
        Ok(())
    }
}
