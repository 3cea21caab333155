//! `vendora-catalog` — product reference data consumed by the sales domain.

pub mod product;

pub use product::Product;
