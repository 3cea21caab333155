use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vendora_catalog::Product;
use vendora_core::{DomainError, DomainResult, Entity, EntityId};

/// Sale item identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleItemId(pub EntityId);

impl SaleItemId {
    pub fn new() -> Self {
        Self(EntityId::new())
    }
}

impl Default for SaleItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SaleItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Largest quantity of one product a single sale item may carry.
pub const MAX_ITEM_QUANTITY: u32 = 20;

/// A line of a sale: one product, its quantity, and derived pricing.
///
/// The discount percentage is driven by quantity alone:
///
/// | quantity | discount |
/// |----------|----------|
/// | 1-3      | 0%       |
/// | 4-9      | 10%      |
/// | 10-20    | 20%      |
///
/// Quantities above 20 are rejected outright. `total_amount` and
/// `discount_percentage` are derived; every quantity change re-derives the
/// discount before the total, price changes recompute the total only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItem {
    id: SaleItemId,
    product: Product,
    quantity: u32,
    unit_price: Decimal,
    discount_percentage: Decimal,
    total_amount: Decimal,
}

impl SaleItem {
    /// Create a sale item, deriving discount and total.
    pub fn new(product: Product, quantity: u32, unit_price: Decimal) -> DomainResult<Self> {
        Self::from_parts(SaleItemId::new(), product, quantity, unit_price)
    }

    /// Rebuild an item from persisted state, keeping its identifier.
    ///
    /// Discount and total are deterministic functions of quantity and price,
    /// so recomputing them reproduces the persisted values exactly.
    pub fn from_parts(
        id: SaleItemId,
        product: Product,
        quantity: u32,
        unit_price: Decimal,
    ) -> DomainResult<Self> {
        check_quantity(quantity)?;
        check_unit_price(unit_price)?;

        let mut item = Self {
            id,
            product,
            quantity,
            unit_price,
            discount_percentage: Decimal::ZERO,
            total_amount: Decimal::ZERO,
        };
        item.derive_discount();
        item.recalculate_total();
        Ok(item)
    }

    pub fn id_typed(&self) -> SaleItemId {
        self.id
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn discount_percentage(&self) -> Decimal {
        self.discount_percentage
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    /// Change the quantity; re-derives the discount, then the total.
    pub fn update_quantity(&mut self, new_quantity: u32) -> DomainResult<()> {
        check_quantity(new_quantity)?;

        self.quantity = new_quantity;
        self.derive_discount();
        self.recalculate_total();
        Ok(())
    }

    /// Change the unit price; recomputes the total. The discount is
    /// quantity-driven and stays untouched.
    pub fn update_unit_price(&mut self, new_unit_price: Decimal) -> DomainResult<()> {
        check_unit_price(new_unit_price)?;

        self.unit_price = new_unit_price;
        self.recalculate_total();
        Ok(())
    }

    fn derive_discount(&mut self) {
        self.discount_percentage = match self.quantity {
            0..=3 => Decimal::ZERO,
            4..=9 => Decimal::TEN,
            _ => Decimal::from(20u32),
        };
    }

    fn recalculate_total(&mut self) {
        let subtotal = Decimal::from(self.quantity) * self.unit_price;
        let discount_amount = subtotal * self.discount_percentage / Decimal::ONE_HUNDRED;
        self.total_amount = subtotal - discount_amount;
    }
}

impl Entity for SaleItem {
    type Id = SaleItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn check_quantity(quantity: u32) -> DomainResult<()> {
    if quantity == 0 {
        return Err(DomainError::validation("quantity must be greater than zero"));
    }
    if quantity > MAX_ITEM_QUANTITY {
        return Err(DomainError::business_rule(
            "cannot sell more than 20 identical items",
        ));
    }
    Ok(())
}

fn check_unit_price(unit_price: Decimal) -> DomainResult<()> {
    if unit_price <= Decimal::ZERO {
        return Err(DomainError::validation(
            "unit price must be greater than zero",
        ));
    }
    Ok(())
}
