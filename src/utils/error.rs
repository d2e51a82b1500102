use crate::domain::model::CustomerId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Customer {id} not found")]
    NotFound { id: CustomerId },

    #[error("Customer {id} was modified concurrently (expected version {expected}, found {found})")]
    Conflict {
        id: CustomerId,
        expected: u64,
        found: u64,
    },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

pub type Result<T> = std::result::Result<T, DeskError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lookup,
    Concurrency,
    Storage,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DeskError {
    pub fn storage(message: impl Into<String>) -> Self {
        DeskError::Storage {
            message: message.into(),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, DeskError::Conflict { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DeskError::NotFound { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DeskError::NotFound { .. } => ErrorCategory::Lookup,
            DeskError::Conflict { .. } => ErrorCategory::Concurrency,
            DeskError::Storage { .. }
            | DeskError::IoError(_)
            | DeskError::SerializationError(_)
            | DeskError::CsvError(_) => ErrorCategory::Storage,
            DeskError::ConfigValidationError { .. }
            | DeskError::InvalidConfigValueError { .. }
            | DeskError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DeskError::ValidationError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup | ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Concurrency => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DeskError::NotFound { id } => format!("No customer with id {}", id),
            DeskError::Conflict { id, .. } => {
                format!("Customer {} was changed by someone else", id)
            }
            DeskError::ConfigValidationError { .. }
            | DeskError::InvalidConfigValueError { .. }
            | DeskError::MissingConfigError { .. } => format!("Configuration problem: {}", self),
            DeskError::ValidationError { message } => format!("Invalid input: {}", message),
            _ => format!("Storage failure: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Lookup => "Run `list` to see the existing customer ids",
            ErrorCategory::Concurrency => "Reload the customer and apply your changes again",
            ErrorCategory::Storage => "Check that the data file exists and is writable",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
            ErrorCategory::Input => "Correct the highlighted fields and retry",
        }
    }
}
