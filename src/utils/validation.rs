use crate::domain::model::Customer;
use crate::utils::error::{DeskError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Per-field validation messages collected for a submitted draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| (field.as_str(), m.as_str())))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Input rules applied to customer drafts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
    pub required_fields: Vec<String>,
    pub max_name_length: usize,
    pub max_address_length: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            required_fields: vec!["firstName".to_string(), "lastName".to_string()],
            max_name_length: 50,
            max_address_length: 200,
        }
    }
}

pub const CUSTOMER_FIELDS: [&str; 4] = ["firstName", "lastName", "address", "discount"];

fn field_value<'a>(customer: &'a Customer, field: &str) -> Option<&'a str> {
    match field {
        "firstName" => Some(&customer.first_name),
        "lastName" => Some(&customer.last_name),
        "address" => Some(&customer.address),
        "discount" => Some(&customer.discount),
        _ => None,
    }
}

pub fn validate_customer(customer: &Customer, rules: &ValidationRules) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for field in &rules.required_fields {
        if let Some(value) = field_value(customer, field) {
            if value.trim().is_empty() {
                errors.add(field.as_str(), "Required");
            }
        }
    }

    for (field, value) in [
        ("firstName", &customer.first_name),
        ("lastName", &customer.last_name),
    ] {
        if value.chars().count() > rules.max_name_length {
            errors.add(
                field,
                format!("Must be at most {} characters", rules.max_name_length),
            );
        }
    }

    if customer.address.chars().count() > rules.max_address_length {
        errors.add(
            "address",
            format!("Must be at most {} characters", rules.max_address_length),
        );
    }

    errors
}

impl Validate for ValidationRules {
    fn validate(&self) -> Result<()> {
        validate_positive_number("validation.max_name_length", self.max_name_length, 1)?;
        validate_positive_number("validation.max_address_length", self.max_address_length, 1)?;
        for field in &self.required_fields {
            if !CUSTOMER_FIELDS.contains(&field.as_str()) {
                return Err(DeskError::InvalidConfigValueError {
                    field: "validation.required_fields".to_string(),
                    value: field.clone(),
                    reason: format!("Known fields: {}", CUSTOMER_FIELDS.join(", ")),
                });
            }
        }
        Ok(())
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(DeskError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DeskError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(DeskError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}
