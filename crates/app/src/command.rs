//! Command inputs for the sales handlers.
//!
//! Plain data carried in from the outer surface; field validation happens in
//! the value-object constructors, so a malformed input never reaches the
//! aggregate.

use rust_decimal::Decimal;

use vendora_catalog::Product;
use vendora_core::DomainResult;
use vendora_parties::{Branch, Customer};
use vendora_sales::SaleId;

#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub external_id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub brand: String,
}

impl ProductInput {
    pub fn into_domain(self) -> DomainResult<Product> {
        Product::new(
            self.external_id,
            self.name,
            self.description,
            self.category,
            self.brand,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerInput {
    pub external_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl CustomerInput {
    pub fn into_domain(self) -> DomainResult<Customer> {
        Customer::new(self.external_id, self.name, self.email, self.phone)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BranchInput {
    pub external_id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
}

impl BranchInput {
    pub fn into_domain(self) -> DomainResult<Branch> {
        Branch::new(self.external_id, self.name, self.address, self.city, self.state)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemInput {
    pub product: ProductInput,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// Command: create a sale with its items.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSaleCommand {
    pub sale_number: String,
    pub customer: CustomerInput,
    pub branch: BranchInput,
    pub items: Vec<ItemInput>,
}

/// Command: replace customer/branch of an existing sale.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSaleCommand {
    pub id: SaleId,
    pub customer: CustomerInput,
    pub branch: BranchInput,
}
