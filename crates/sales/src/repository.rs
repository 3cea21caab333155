//! Persistence contract for the sale aggregate.
//!
//! The domain consumes this trait; implementations live at the application
//! or infrastructure layer. A fetch must reconstruct the sale exactly as
//! persisted (status and timestamps included) — implementations go through
//! [`Sale::rehydrate`](crate::sale::Sale::rehydrate), never the public
//! factory.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sale::{Sale, SaleId, SaleStatus};

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Infrastructure-level failures of a sale repository.
///
/// Kept separate from `DomainError`: a broken storage backend is not a
/// business outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Unique sale-number constraint rejected an insert.
    #[error("sale number '{0}' already exists")]
    DuplicateSaleNumber(String),

    /// The storage backend failed.
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Filter criteria for listing/counting sales.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleFilter {
    /// External customer id, exact match.
    pub customer_id: Option<String>,
    /// External branch id, exact match.
    pub branch_id: Option<String>,
    pub status: Option<SaleStatus>,
    pub min_date: Option<DateTime<Utc>>,
    pub max_date: Option<DateTime<Utc>>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
}

/// Sortable columns of a sale listing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleSortKey {
    SaleDate,
    TotalAmount,
    CreatedAt,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Paged, filtered, ordered sale listing request.
///
/// `page` is 1-based. An empty `order_by` falls back to newest-first
/// (created-at descending).
#[derive(Debug, Clone, PartialEq)]
pub struct SaleQuery {
    pub page: usize,
    pub size: usize,
    pub order_by: Vec<(SaleSortKey, SortDirection)>,
    pub filter: SaleFilter,
}

impl Default for SaleQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: 10,
            order_by: Vec::new(),
            filter: SaleFilter::default(),
        }
    }
}

/// Repository contract for sales.
///
/// Synchronous and dyn-safe; callers own transaction boundaries and
/// per-aggregate serialization.
pub trait SaleRepository: Send + Sync {
    fn get_by_id(&self, id: &SaleId) -> RepositoryResult<Option<Sale>>;

    fn get_by_number(&self, sale_number: &str) -> RepositoryResult<Option<Sale>>;

    fn get_all(&self, query: &SaleQuery) -> RepositoryResult<Vec<Sale>>;

    fn insert(&self, sale: &Sale) -> RepositoryResult<()>;

    fn update(&self, sale: &Sale) -> RepositoryResult<()>;

    /// Hard delete. Returns whether a sale with that id existed.
    fn delete(&self, id: &SaleId) -> RepositoryResult<bool>;

    fn sale_number_exists(&self, sale_number: &str) -> RepositoryResult<bool>;

    fn count(&self, filter: &SaleFilter) -> RepositoryResult<usize>;
}
