//! `vendora-app` — application layer over the sales domain.
//!
//! Command/query handlers orchestrating the [`Sale`](vendora_sales::Sale)
//! aggregate against a [`SaleRepository`](vendora_sales::SaleRepository),
//! with domain-event dispatch after successful persistence, plus an
//! in-memory repository for tests and development.

pub mod command;
pub mod error;
pub mod handler;
pub mod in_memory;

pub use command::{
    BranchInput, CreateSaleCommand, CustomerInput, ItemInput, ProductInput, UpdateSaleCommand,
};
pub use error::{AppError, AppResult};
pub use handler::{SalesApp, SalesPage};
pub use in_memory::InMemorySaleRepository;
