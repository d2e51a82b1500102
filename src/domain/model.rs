use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage-assigned identifier. `0` marks a draft that has not been added yet.
pub type CustomerId = u64;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    /// Kept as entered; ordering on this field is lexical.
    pub discount: String,
    /// Row version used as the optimistic concurrency token.
    #[serde(default)]
    pub version: u64,
}

impl Customer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
        discount: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: address.into(),
            discount: discount.into(),
            version: 0,
        }
    }

    pub fn with_id(mut self, id: CustomerId) -> Self {
        self.id = id;
        self
    }

    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    pub fn is_draft(&self) -> bool {
        self.id == 0
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    FirstName,
    LastName,
    Address,
    Discount,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::FirstName,
        SortField::LastName,
        SortField::Address,
        SortField::Discount,
    ];

    pub fn key<'a>(&self, customer: &'a Customer) -> &'a str {
        match self {
            SortField::FirstName => &customer.first_name,
            SortField::LastName => &customer.last_name,
            SortField::Address => &customer.address,
            SortField::Discount => &customer.discount,
        }
    }
}

/// A sortable column together with its direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortState {
    FirstNameAsc,
    FirstNameDesc,
    #[default]
    LastNameAsc,
    LastNameDesc,
    AddressAsc,
    AddressDesc,
    DiscountAsc,
    DiscountDesc,
}

impl SortState {
    pub const ALL: [SortState; 8] = [
        SortState::FirstNameAsc,
        SortState::FirstNameDesc,
        SortState::LastNameAsc,
        SortState::LastNameDesc,
        SortState::AddressAsc,
        SortState::AddressDesc,
        SortState::DiscountAsc,
        SortState::DiscountDesc,
    ];

    pub fn ascending(field: SortField) -> Self {
        match field {
            SortField::FirstName => SortState::FirstNameAsc,
            SortField::LastName => SortState::LastNameAsc,
            SortField::Address => SortState::AddressAsc,
            SortField::Discount => SortState::DiscountAsc,
        }
    }

    pub fn field(&self) -> SortField {
        match self {
            SortState::FirstNameAsc | SortState::FirstNameDesc => SortField::FirstName,
            SortState::LastNameAsc | SortState::LastNameDesc => SortField::LastName,
            SortState::AddressAsc | SortState::AddressDesc => SortField::Address,
            SortState::DiscountAsc | SortState::DiscountDesc => SortField::Discount,
        }
    }

    pub fn is_descending(&self) -> bool {
        matches!(
            self,
            SortState::FirstNameDesc
                | SortState::LastNameDesc
                | SortState::AddressDesc
                | SortState::DiscountDesc
        )
    }

    /// The same column in the opposite direction.
    pub fn toggled(&self) -> Self {
        match self {
            SortState::FirstNameAsc => SortState::FirstNameDesc,
            SortState::FirstNameDesc => SortState::FirstNameAsc,
            SortState::LastNameAsc => SortState::LastNameDesc,
            SortState::LastNameDesc => SortState::LastNameAsc,
            SortState::AddressAsc => SortState::AddressDesc,
            SortState::AddressDesc => SortState::AddressAsc,
            SortState::DiscountAsc => SortState::DiscountDesc,
            SortState::DiscountDesc => SortState::DiscountAsc,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            SortState::FirstNameAsc => "FirstNameAsc",
            SortState::FirstNameDesc => "FirstNameDesc",
            SortState::LastNameAsc => "LastNameAsc",
            SortState::LastNameDesc => "LastNameDesc",
            SortState::AddressAsc => "AddressAsc",
            SortState::AddressDesc => "AddressDesc",
            SortState::DiscountAsc => "DiscountAsc",
            SortState::DiscountDesc => "DiscountDesc",
        }
    }

    /// Parses a request token, falling back to `default` for anything unknown.
    pub fn from_token_or(token: Option<&str>, default: SortState) -> Self {
        token
            .and_then(|t| t.parse().ok())
            .unwrap_or(default)
    }
}

impl fmt::Display for SortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownToken(pub String);

impl fmt::Display for UnknownToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown token '{}'", self.0)
    }
}

impl std::error::Error for UnknownToken {}

impl FromStr for SortState {
    type Err = UnknownToken;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        SortState::ALL
            .into_iter()
            .find(|state| state.token().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownToken(s.to_string()))
    }
}

/// Which name fields the free-text search looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    LastName,
    FirstName,
    #[default]
    AnyName,
}

impl FromStr for SearchScope {
    type Err = UnknownToken;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "last_name" | "lastname" => Ok(SearchScope::LastName),
            "first_name" | "firstname" => Ok(SearchScope::FirstName),
            "any_name" | "anyname" | "any" => Ok(SearchScope::AnyName),
            _ => Err(UnknownToken(s.to_string())),
        }
    }
}

/// Query parameters for one listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerQuery {
    pub search: Option<String>,
    pub sort: Option<SortState>,
    pub scope: SearchScope,
}

impl CustomerQuery {
    pub fn new(search: Option<&str>, sort: Option<SortState>) -> Self {
        Self {
            search: search.map(str::to_string),
            sort,
            scope: SearchScope::default(),
        }
    }

    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }
}

/// "Next click" state for every sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortLinks {
    pub first_name: SortState,
    pub last_name: SortState,
    pub address: SortState,
    pub discount: SortState,
}

impl SortLinks {
    pub fn get(&self, field: SortField) -> SortState {
        match field {
            SortField::FirstName => self.first_name,
            SortField::LastName => self.last_name,
            SortField::Address => self.address,
            SortField::Discount => self.discount,
        }
    }
}

/// Everything a listing page needs to re-render itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerListView {
    pub customers: Vec<Customer>,
    pub current_filter: Option<String>,
    pub current_sort: SortState,
    pub links: SortLinks,
}

impl CustomerListView {
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}
