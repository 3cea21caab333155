use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendora_events::Event;

use crate::item::SaleItemId;
use crate::sale::SaleId;

/// Event: SaleCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleCreated {
    pub sale_id: SaleId,
    pub sale_number: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SaleModified (customer/branch replaced).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleModified {
    pub sale_id: SaleId,
    pub sale_number: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SaleCancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleCancelled {
    pub sale_id: SaleId,
    pub sale_number: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemCancelled (an item was removed from an active sale).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCancelled {
    pub sale_id: SaleId,
    pub item_id: SaleItemId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleEvent {
    SaleCreated(SaleCreated),
    SaleModified(SaleModified),
    SaleCancelled(SaleCancelled),
    ItemCancelled(ItemCancelled),
}

impl SaleEvent {
    /// Identifier of the sale the event belongs to.
    pub fn sale_id(&self) -> SaleId {
        match self {
            SaleEvent::SaleCreated(e) => e.sale_id,
            SaleEvent::SaleModified(e) => e.sale_id,
            SaleEvent::SaleCancelled(e) => e.sale_id,
            SaleEvent::ItemCancelled(e) => e.sale_id,
        }
    }
}

impl Event for SaleEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SaleEvent::SaleCreated(_) => "sales.sale.created",
            SaleEvent::SaleModified(_) => "sales.sale.modified",
            SaleEvent::SaleCancelled(_) => "sales.sale.cancelled",
            SaleEvent::ItemCancelled(_) => "sales.sale.item_cancelled",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SaleEvent::SaleCreated(e) => e.occurred_at,
            SaleEvent::SaleModified(e) => e.occurred_at,
            SaleEvent::SaleCancelled(e) => e.occurred_at,
            SaleEvent::ItemCancelled(e) => e.occurred_at,
        }
    }
}
