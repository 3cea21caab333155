//! `vendora-sales` — the sale aggregate and its collaborating contracts.
//!
//! A [`Sale`](sale::Sale) owns its [`SaleItem`](item::SaleItem)s and enforces
//! the lifecycle and pricing invariants; repositories and event dispatch are
//! consumed through the contracts in [`repository`] and `vendora-events`.

pub mod event;
pub mod item;
pub mod repository;
pub mod sale;

pub use event::{ItemCancelled, SaleCancelled, SaleCreated, SaleEvent, SaleModified};
pub use item::{MAX_ITEM_QUANTITY, SaleItem, SaleItemId};
pub use repository::{
    RepositoryError, RepositoryResult, SaleFilter, SaleQuery, SaleRepository, SaleSortKey,
    SortDirection,
};
pub use sale::{Sale, SaleId, SaleState, SaleStatus};
