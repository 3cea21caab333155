//! `vendora-parties` — external parties referenced by sales.

pub mod branch;
pub mod customer;

pub use branch::Branch;
pub use customer::Customer;
