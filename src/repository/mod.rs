use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::db::{DbConnection, DbPool};
use crate::domain::customer::{Customer, NewCustomer};
use crate::domain::types::CustomerId;
use crate::repository::errors::RepositoryResult;

pub mod customer;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Ordering applied to a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    /// Accepts exactly `ASC` or `DESC`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            other => Err(format!(
                "Invalid direction '{other}': expected 'ASC' or 'DESC'"
            )),
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "ASC"),
            Self::Desc => write!(f, "DESC"),
        }
    }
}

/// Customer columns a page can be ordered by, keyed by their JSON field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CustomerSortField {
    #[serde(rename = "id")]
    Id,
    #[serde(rename = "nome")]
    Name,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "cpf")]
    TaxId,
    #[serde(rename = "rg")]
    RegistryId,
    #[serde(rename = "renda")]
    Income,
}

impl FromStr for CustomerSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "nome" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "cpf" => Ok(Self::TaxId),
            "rg" => Ok(Self::RegistryId),
            "renda" => Ok(Self::Income),
            other => Err(format!("Invalid orderBy '{other}': unknown customer field")),
        }
    }
}

/// Zero-based page request over the customer table.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerPageQuery {
    pub page: usize,
    pub per_page: usize,
    pub direction: SortDirection,
    pub order_by: CustomerSortField,
}

impl CustomerPageQuery {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page,
            per_page,
            direction: SortDirection::Asc,
            order_by: CustomerSortField::Name,
        }
    }

    pub fn order_by(mut self, field: CustomerSortField, direction: SortDirection) -> Self {
        self.order_by = field;
        self.direction = direction;
        self
    }

    /// SQL `LIMIT`, clamped to what SQLite accepts.
    pub fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }

    /// SQL `OFFSET`, or `None` when the page starts beyond any representable row.
    pub fn offset(&self) -> Option<i64> {
        self.page
            .checked_mul(self.per_page)
            .and_then(|offset| i64::try_from(offset).ok())
    }
}

pub trait CustomerReader {
    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;
    fn list_customers(&self) -> RepositoryResult<Vec<Customer>>;
    /// Returns the total number of customers together with the requested page.
    fn list_customers_page(
        &self,
        query: &CustomerPageQuery,
    ) -> RepositoryResult<(usize, Vec<Customer>)>;
}

pub trait CustomerWriter {
    /// Stores the customer with its addresses and phones in one transaction.
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    /// Writes back the scalar columns of an already stored customer.
    fn update_customer(&self, customer: &Customer) -> RepositoryResult<Customer>;
    fn delete_customer(&self, id: CustomerId) -> RepositoryResult<()>;
}

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(crate::db::get_connection(&self.pool)?)
    }
}
