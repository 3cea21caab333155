//! Command/query handlers for sales.
//!
//! Each mutating handler follows the same shape: load or assemble the
//! aggregate, let it enforce its invariants, persist, then drain and
//! dispatch the recorded domain events. Dispatch happens only after the
//! repository call succeeds, so consumers never see an event for a sale
//! that was not persisted.

use vendora_events::{Event, EventBus};
use vendora_sales::{
    Sale, SaleEvent, SaleId, SaleItem, SaleQuery, SaleRepository,
};

use crate::command::{CreateSaleCommand, UpdateSaleCommand};
use crate::error::{AppError, AppResult};

/// One page of a sale listing.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesPage {
    pub sales: Vec<Sale>,
    pub total_count: usize,
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Application facade over the sales domain.
pub struct SalesApp<R, B> {
    repository: R,
    bus: B,
}

impl<R, B> SalesApp<R, B>
where
    R: SaleRepository,
    B: EventBus<SaleEvent>,
{
    pub fn new(repository: R, bus: B) -> Self {
        Self { repository, bus }
    }

    /// Create a sale. The sale number must not be in use; uniqueness is
    /// checked here, not by the aggregate.
    pub fn create_sale(&self, command: CreateSaleCommand) -> AppResult<Sale> {
        if self.repository.sale_number_exists(&command.sale_number)? {
            return Err(AppError::Conflict(format!(
                "sale number '{}' already exists",
                command.sale_number
            )));
        }

        let customer = command.customer.into_domain()?;
        let branch = command.branch.into_domain()?;

        let mut items = Vec::with_capacity(command.items.len());
        for input in command.items {
            let product = input.product.into_domain()?;
            items.push(SaleItem::new(product, input.quantity, input.unit_price)?);
        }

        let mut sale = Sale::create(command.sale_number, customer, branch, items)?;
        self.repository.insert(&sale)?;
        self.dispatch(&mut sale);

        Ok(sale)
    }

    /// Replace customer and branch of an active sale.
    pub fn update_sale(&self, command: UpdateSaleCommand) -> AppResult<Sale> {
        let mut sale = self.fetch(&command.id)?;

        let customer = command.customer.into_domain()?;
        let branch = command.branch.into_domain()?;
        sale.update(customer, branch)?;

        self.repository.update(&sale)?;
        self.dispatch(&mut sale);

        Ok(sale)
    }

    /// Cancel an active sale (terminal).
    pub fn cancel_sale(&self, id: &SaleId) -> AppResult<Sale> {
        let mut sale = self.fetch(id)?;
        sale.cancel()?;

        self.repository.update(&sale)?;
        self.dispatch(&mut sale);

        Ok(sale)
    }

    /// Hard-delete a sale.
    pub fn delete_sale(&self, id: &SaleId) -> AppResult<()> {
        if !self.repository.delete(id)? {
            return Err(AppError::NotFound(format!("sale '{id}' was not found")));
        }
        Ok(())
    }

    pub fn get_sale(&self, id: &SaleId) -> AppResult<Sale> {
        self.fetch(id)
    }

    pub fn get_sale_by_number(&self, sale_number: &str) -> AppResult<Sale> {
        self.repository
            .get_by_number(sale_number)?
            .ok_or_else(|| AppError::NotFound(format!("sale '{sale_number}' was not found")))
    }

    /// List sales with filtering, ordering, and pagination.
    pub fn list_sales(&self, query: &SaleQuery) -> AppResult<SalesPage> {
        let sales = self.repository.get_all(query)?;
        let total_count = self.repository.count(&query.filter)?;
        let total_pages = if query.size == 0 {
            0
        } else {
            total_count.div_ceil(query.size)
        };

        Ok(SalesPage {
            sales,
            total_count,
            current_page: query.page,
            page_size: query.size,
            total_pages,
        })
    }

    fn fetch(&self, id: &SaleId) -> AppResult<Sale> {
        self.repository
            .get_by_id(id)?
            .ok_or_else(|| AppError::NotFound(format!("sale '{id}' was not found")))
    }

    fn dispatch(&self, sale: &mut Sale) {
        for event in sale.take_events() {
            tracing::info!(
                event_type = event.event_type(),
                sale_id = %event.sale_id(),
                "dispatching sale event"
            );
            if let Err(err) = self.bus.publish(event) {
                // The sale is already persisted; the bus is at-least-once,
                // so a failed publish is survivable and worth a warning only.
                tracing::warn!(?err, "failed to publish sale event");
            }
        }
    }
}
