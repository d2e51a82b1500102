use crate::core::ConfigProvider;
use crate::domain::model::{SearchScope, SortState};
use crate::utils::error::{DeskError, Result};
use crate::utils::validation::{validate_path, Validate, ValidationRules};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub storage: StorageConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    pub validation: Option<ValidationConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Sort token, e.g. "LastNameAsc"
    pub default_sort: Option<String>,
    pub search_scope: Option<SearchScope>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub required_fields: Option<Vec<String>>,
    pub max_name_length: Option<usize>,
    pub max_address_length: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// Loads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DeskError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DeskError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` references with environment values; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DeskError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("storage.path", &self.storage.path)?;

        if let Some(token) = &self.listing.default_sort {
            if token.parse::<SortState>().is_err() {
                return Err(DeskError::InvalidConfigValueError {
                    field: "listing.default_sort".to_string(),
                    value: token.clone(),
                    reason: "Unknown sort token".to_string(),
                });
            }
        }

        self.validation_rules().validate()
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn data_path(&self) -> &str {
        &self.storage.path
    }

    fn default_sort(&self) -> SortState {
        SortState::from_token_or(self.listing.default_sort.as_deref(), SortState::default())
    }

    fn search_scope(&self) -> SearchScope {
        self.listing.search_scope.unwrap_or_default()
    }

    fn validation_rules(&self) -> ValidationRules {
        let defaults = ValidationRules::default();
        match &self.validation {
            Some(v) => ValidationRules {
                required_fields: v.required_fields.clone().unwrap_or(defaults.required_fields),
                max_name_length: v.max_name_length.unwrap_or(defaults.max_name_length),
                max_address_length: v.max_address_length.unwrap_or(defaults.max_address_length),
            },
            None => defaults,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
