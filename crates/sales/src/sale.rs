use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vendora_core::{AggregateRoot, DomainError, DomainResult, EntityId, PendingEvents};
use vendora_parties::{Branch, Customer};

use crate::event::{ItemCancelled, SaleCancelled, SaleCreated, SaleEvent, SaleModified};
use crate::item::{SaleItem, SaleItemId};

/// Sale identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(pub EntityId);

impl SaleId {
    pub fn new() -> Self {
        Self(EntityId::new())
    }
}

impl Default for SaleId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SaleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Sale lifecycle status.
///
/// The only transition is `Active -> Cancelled`; a cancelled sale rejects
/// every further mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    Active,
    Cancelled,
}

/// Full persisted state of a sale, used to rebuild the aggregate from
/// storage without going through the public factory (which always starts a
/// sale as Active at "now").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleState {
    pub id: SaleId,
    pub sale_number: String,
    pub sale_date: DateTime<Utc>,
    pub customer: Customer,
    pub branch: Branch,
    pub items: Vec<SaleItem>,
    pub total_amount: Decimal,
    pub status: SaleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Aggregate root: Sale.
///
/// Owns its items (an item's lifetime is bound to its sale), references
/// customer and branch as shared value objects, keeps `total_amount` equal to
/// the sum of the current items' totals, and records a domain event for every
/// mutation. Sale-number uniqueness is the calling collaborator's job (a
/// repository existence check before [`Sale::create`]).
///
/// No internal locking: concurrent access to one instance must be serialized
/// by the caller (typically a transaction boundary keyed on the sale id).
#[derive(Debug, Clone, PartialEq)]
pub struct Sale {
    id: SaleId,
    sale_number: String,
    sale_date: DateTime<Utc>,
    customer: Customer,
    branch: Branch,
    items: Vec<SaleItem>,
    total_amount: Decimal,
    status: SaleStatus,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    events: PendingEvents<SaleEvent>,
}

impl Sale {
    /// Assemble a new active sale and record `SaleCreated`.
    ///
    /// Items go through [`Sale::add_item`] so total recomputation applies
    /// uniformly.
    pub fn create(
        sale_number: impl Into<String>,
        customer: Customer,
        branch: Branch,
        items: Vec<SaleItem>,
    ) -> DomainResult<Self> {
        let now = Utc::now();
        let mut sale = Self {
            id: SaleId::new(),
            sale_number: sale_number.into(),
            sale_date: now,
            customer,
            branch,
            items: Vec::new(),
            total_amount: Decimal::ZERO,
            status: SaleStatus::Active,
            created_at: now,
            updated_at: None,
            events: PendingEvents::new(),
        };

        for item in items {
            sale.add_item(item)?;
        }

        sale.recalculate_total();
        let event = SaleEvent::SaleCreated(SaleCreated {
            sale_id: sale.id,
            sale_number: sale.sale_number.clone(),
            occurred_at: Utc::now(),
        });
        sale.events.record(event);

        Ok(sale)
    }

    /// Rebuild a sale exactly as persisted (status and timestamps included).
    ///
    /// Records no events; the pending list starts empty.
    pub fn rehydrate(state: SaleState) -> Self {
        Self {
            id: state.id,
            sale_number: state.sale_number,
            sale_date: state.sale_date,
            customer: state.customer,
            branch: state.branch,
            items: state.items,
            total_amount: state.total_amount,
            status: state.status,
            created_at: state.created_at,
            updated_at: state.updated_at,
            events: PendingEvents::new(),
        }
    }

    /// Snapshot the persisted state of this sale (pending events excluded).
    pub fn state(&self) -> SaleState {
        SaleState {
            id: self.id,
            sale_number: self.sale_number.clone(),
            sale_date: self.sale_date,
            customer: self.customer.clone(),
            branch: self.branch.clone(),
            items: self.items.clone(),
            total_amount: self.total_amount,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn id_typed(&self) -> SaleId {
        self.id
    }

    pub fn sale_number(&self) -> &str {
        &self.sale_number
    }

    pub fn sale_date(&self) -> DateTime<Utc> {
        self.sale_date
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn branch(&self) -> &Branch {
        &self.branch
    }

    pub fn items(&self) -> &[SaleItem] {
        &self.items
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn status(&self) -> SaleStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, SaleStatus::Active)
    }

    /// Append an item and recompute the total.
    pub fn add_item(&mut self, item: SaleItem) -> DomainResult<()> {
        self.ensure_active("cannot add items to a cancelled sale")?;

        self.items.push(item);
        self.recalculate_total();
        Ok(())
    }

    /// Remove the item with the given id, recompute the total, and record
    /// `ItemCancelled`.
    ///
    /// A missing id is a silent no-op: no error, no event, nothing changes.
    pub fn remove_item(&mut self, item_id: SaleItemId) -> DomainResult<()> {
        self.ensure_active("cannot remove items from a cancelled sale")?;

        if let Some(position) = self.items.iter().position(|i| i.id_typed() == item_id) {
            self.items.remove(position);
            self.recalculate_total();
            self.events.record(SaleEvent::ItemCancelled(ItemCancelled {
                sale_id: self.id,
                item_id,
                occurred_at: Utc::now(),
            }));
        }

        Ok(())
    }

    /// Replace customer and branch atomically and record `SaleModified`.
    pub fn update(&mut self, customer: Customer, branch: Branch) -> DomainResult<()> {
        self.ensure_active("cannot update a cancelled sale")?;

        self.customer = customer;
        self.branch = branch;
        self.updated_at = Some(Utc::now());

        self.events.record(SaleEvent::SaleModified(SaleModified {
            sale_id: self.id,
            sale_number: self.sale_number.clone(),
            occurred_at: Utc::now(),
        }));
        Ok(())
    }

    /// Cancel the sale (terminal) and record `SaleCancelled`.
    pub fn cancel(&mut self) -> DomainResult<()> {
        if self.status == SaleStatus::Cancelled {
            return Err(DomainError::invalid_state("sale is already cancelled"));
        }

        self.status = SaleStatus::Cancelled;
        self.updated_at = Some(Utc::now());

        self.events.record(SaleEvent::SaleCancelled(SaleCancelled {
            sale_id: self.id,
            sale_number: self.sale_number.clone(),
            occurred_at: Utc::now(),
        }));
        Ok(())
    }

    /// Events recorded since creation or the last drain.
    pub fn pending_events(&self) -> &[SaleEvent] {
        self.events.as_slice()
    }

    /// Drain the pending events for dispatch.
    pub fn take_events(&mut self) -> Vec<SaleEvent> {
        self.events.drain()
    }

    /// Discard pending events without dispatching them.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    fn ensure_active(&self, message: &str) -> DomainResult<()> {
        if self.status != SaleStatus::Active {
            return Err(DomainError::invalid_state(message));
        }
        Ok(())
    }

    // Always a full re-sum: correct under any add/remove/update sequence and
    // idempotent with no intervening mutation.
    fn recalculate_total(&mut self) {
        self.total_amount = self.items.iter().map(|i| i.total_amount()).sum();
    }
}

impl AggregateRoot for Sale {
    type Id = SaleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use vendora_catalog::Product;
    use vendora_events::Event;

    fn test_customer() -> Customer {
        Customer::new("CUST-7", "Ana Souza", "ana@example.com", "+55 11 99999-0000").unwrap()
    }

    fn test_branch() -> Branch {
        Branch::new("BR-01", "Centro", "Av. Paulista 100", "Sao Paulo", "SP").unwrap()
    }

    fn test_product(external_id: &str) -> Product {
        Product::new(external_id, "Pale Lager", "330ml bottle", "Beer", "Vendora").unwrap()
    }

    fn item(external_id: &str, quantity: u32, unit_price: Decimal) -> SaleItem {
        SaleItem::new(test_product(external_id), quantity, unit_price).unwrap()
    }

    fn sum_of_items(sale: &Sale) -> Decimal {
        sale.items().iter().map(|i| i.total_amount()).sum()
    }

    #[test]
    fn create_computes_total_and_records_created_event() {
        let sale = Sale::create(
            "SALE-001",
            test_customer(),
            test_branch(),
            vec![item("PRD-1", 5, dec!(10.00))],
        )
        .unwrap();

        assert_eq!(sale.status(), SaleStatus::Active);
        assert_eq!(sale.total_amount(), dec!(45.00));
        assert_eq!(sale.updated_at(), None);

        let events = sale.pending_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            SaleEvent::SaleCreated(e) => {
                assert_eq!(e.sale_id, sale.id_typed());
                assert_eq!(e.sale_number, "SALE-001");
            }
            other => panic!("expected SaleCreated, got {other:?}"),
        }
        assert_eq!(events[0].event_type(), "sales.sale.created");
    }

    #[test]
    fn total_is_sum_of_items_after_every_mutation() {
        let a = item("PRD-A", 2, dec!(5.00));
        let b = item("PRD-B", 10, dec!(3.00));
        let a_id = a.id_typed();

        let mut sale =
            Sale::create("SALE-002", test_customer(), test_branch(), vec![a, b]).unwrap();
        // A: 10.00 at 0%, B: 24.00 at 20%.
        assert_eq!(sale.total_amount(), dec!(34.00));
        assert_eq!(sale.total_amount(), sum_of_items(&sale));

        sale.add_item(item("PRD-C", 4, dec!(2.50))).unwrap();
        assert_eq!(sale.total_amount(), sum_of_items(&sale));

        sale.remove_item(a_id).unwrap();
        assert_eq!(sale.total_amount(), dec!(24.00) + dec!(9.00));
        assert_eq!(sale.total_amount(), sum_of_items(&sale));
    }

    #[test]
    fn remove_item_records_item_cancelled() {
        let a = item("PRD-A", 2, dec!(5.00));
        let a_id = a.id_typed();
        let mut sale = Sale::create("SALE-003", test_customer(), test_branch(), vec![a]).unwrap();
        sale.clear_events();

        sale.remove_item(a_id).unwrap();
        assert_eq!(sale.total_amount(), dec!(0));

        let events = sale.take_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            SaleEvent::ItemCancelled(e) => {
                assert_eq!(e.sale_id, sale.id_typed());
                assert_eq!(e.item_id, a_id);
            }
            other => panic!("expected ItemCancelled, got {other:?}"),
        }
    }

    #[test]
    fn removing_a_missing_item_is_a_silent_no_op() {
        let mut sale = Sale::create(
            "SALE-004",
            test_customer(),
            test_branch(),
            vec![item("PRD-A", 3, dec!(7.00))],
        )
        .unwrap();
        sale.clear_events();
        let total_before = sale.total_amount();

        sale.remove_item(SaleItemId::new()).unwrap();

        assert_eq!(sale.items().len(), 1);
        assert_eq!(sale.total_amount(), total_before);
        assert!(sale.pending_events().is_empty());
    }

    #[test]
    fn update_replaces_customer_and_branch_and_touches_updated_at() {
        let mut sale =
            Sale::create("SALE-005", test_customer(), test_branch(), vec![]).unwrap();
        sale.clear_events();

        let new_customer =
            Customer::new("CUST-9", "Joao Lima", "joao@example.com", "+55 11 98888-0000").unwrap();
        let new_branch = Branch::new("BR-02", "Norte", "Rua A 1", "Campinas", "SP").unwrap();

        sale.update(new_customer.clone(), new_branch.clone()).unwrap();

        assert_eq!(sale.customer(), &new_customer);
        assert_eq!(sale.branch(), &new_branch);
        assert!(sale.updated_at().is_some());
        assert!(matches!(
            sale.pending_events(),
            [SaleEvent::SaleModified(_)]
        ));
    }

    #[test]
    fn cancel_is_terminal_and_gates_every_mutation() {
        let mut sale = Sale::create(
            "SALE-006",
            test_customer(),
            test_branch(),
            vec![item("PRD-A", 2, dec!(5.00))],
        )
        .unwrap();
        let total_before = sale.total_amount();
        let existing_item = sale.items()[0].id_typed();

        sale.cancel().unwrap();
        assert_eq!(sale.status(), SaleStatus::Cancelled);
        assert!(sale.updated_at().is_some());

        let add = sale.add_item(item("PRD-B", 1, dec!(1.00))).unwrap_err();
        assert!(matches!(add, DomainError::InvalidState(_)));

        let remove = sale.remove_item(existing_item).unwrap_err();
        assert!(matches!(remove, DomainError::InvalidState(_)));

        let update = sale.update(test_customer(), test_branch()).unwrap_err();
        assert!(matches!(update, DomainError::InvalidState(_)));

        let cancel = sale.cancel().unwrap_err();
        match cancel {
            DomainError::InvalidState(msg) => assert!(msg.contains("already cancelled")),
            other => panic!("expected InvalidState, got {other:?}"),
        }

        assert_eq!(sale.status(), SaleStatus::Cancelled);
        assert_eq!(sale.total_amount(), total_before);
    }

    #[test]
    fn take_events_drains_the_pending_list() {
        let mut sale =
            Sale::create("SALE-007", test_customer(), test_branch(), vec![]).unwrap();
        sale.cancel().unwrap();

        let events = sale.take_events();
        assert_eq!(events.len(), 2);
        assert!(sale.pending_events().is_empty());
        assert!(sale.take_events().is_empty());
    }

    #[test]
    fn rehydrate_restores_status_and_timestamps_exactly() {
        let mut sale = Sale::create(
            "SALE-008",
            test_customer(),
            test_branch(),
            vec![item("PRD-A", 6, dec!(2.00))],
        )
        .unwrap();
        sale.cancel().unwrap();

        let state = sale.state();
        let rebuilt = Sale::rehydrate(state.clone());

        assert_eq!(rebuilt.id_typed(), sale.id_typed());
        assert_eq!(rebuilt.status(), SaleStatus::Cancelled);
        assert_eq!(rebuilt.created_at(), sale.created_at());
        assert_eq!(rebuilt.updated_at(), sale.updated_at());
        assert_eq!(rebuilt.total_amount(), sale.total_amount());
        assert_eq!(rebuilt.items(), sale.items());
        // Pending events never survive persistence.
        assert!(rebuilt.pending_events().is_empty());
        assert_eq!(rebuilt.state(), state);
    }
}
