//! In-memory sale repository for tests/dev.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;

use vendora_sales::{
    RepositoryError, RepositoryResult, Sale, SaleFilter, SaleId, SaleQuery, SaleRepository,
    SaleSortKey, SaleState, SortDirection,
};

/// Mutex-guarded map of persisted sale state.
///
/// Stores [`SaleState`] snapshots rather than live aggregates, so a fetch
/// goes through [`Sale::rehydrate`] exactly like a real backend would —
/// pending events never survive a round-trip.
#[derive(Debug, Default)]
pub struct InMemorySaleRepository {
    sales: Mutex<HashMap<SaleId, SaleState>>,
}

impl InMemorySaleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked<T>(
        &self,
        f: impl FnOnce(&mut HashMap<SaleId, SaleState>) -> RepositoryResult<T>,
    ) -> RepositoryResult<T> {
        let mut sales = self
            .sales
            .lock()
            .map_err(|_| RepositoryError::Storage("sale store lock poisoned".into()))?;
        f(&mut sales)
    }
}

impl SaleRepository for InMemorySaleRepository {
    fn get_by_id(&self, id: &SaleId) -> RepositoryResult<Option<Sale>> {
        self.locked(|sales| Ok(sales.get(id).cloned().map(Sale::rehydrate)))
    }

    fn get_by_number(&self, sale_number: &str) -> RepositoryResult<Option<Sale>> {
        self.locked(|sales| {
            Ok(sales
                .values()
                .find(|s| s.sale_number == sale_number)
                .cloned()
                .map(Sale::rehydrate))
        })
    }

    fn get_all(&self, query: &SaleQuery) -> RepositoryResult<Vec<Sale>> {
        self.locked(|sales| {
            let mut matching: Vec<&SaleState> = sales
                .values()
                .filter(|s| matches_filter(s, &query.filter))
                .collect();
            matching.sort_by(|a, b| compare(a, b, &query.order_by));

            let start = query.page.saturating_sub(1) * query.size;
            Ok(matching
                .into_iter()
                .skip(start)
                .take(query.size)
                .cloned()
                .map(Sale::rehydrate)
                .collect())
        })
    }

    fn insert(&self, sale: &Sale) -> RepositoryResult<()> {
        self.locked(|sales| {
            if sales.values().any(|s| s.sale_number == sale.sale_number()) {
                return Err(RepositoryError::DuplicateSaleNumber(
                    sale.sale_number().to_owned(),
                ));
            }
            sales.insert(sale.id_typed(), sale.state());
            Ok(())
        })
    }

    fn update(&self, sale: &Sale) -> RepositoryResult<()> {
        self.locked(|sales| {
            if !sales.contains_key(&sale.id_typed()) {
                return Err(RepositoryError::Storage(format!(
                    "cannot update missing sale '{}'",
                    sale.id_typed()
                )));
            }
            sales.insert(sale.id_typed(), sale.state());
            Ok(())
        })
    }

    fn delete(&self, id: &SaleId) -> RepositoryResult<bool> {
        self.locked(|sales| Ok(sales.remove(id).is_some()))
    }

    fn sale_number_exists(&self, sale_number: &str) -> RepositoryResult<bool> {
        self.locked(|sales| Ok(sales.values().any(|s| s.sale_number == sale_number)))
    }

    fn count(&self, filter: &SaleFilter) -> RepositoryResult<usize> {
        self.locked(|sales| {
            Ok(sales.values().filter(|s| matches_filter(s, filter)).count())
        })
    }
}

fn matches_filter(state: &SaleState, filter: &SaleFilter) -> bool {
    if let Some(customer_id) = &filter.customer_id {
        if state.customer.external_id() != customer_id {
            return false;
        }
    }
    if let Some(branch_id) = &filter.branch_id {
        if state.branch.external_id() != branch_id {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if state.status != status {
            return false;
        }
    }
    if let Some(min_date) = filter.min_date {
        if state.sale_date < min_date {
            return false;
        }
    }
    if let Some(max_date) = filter.max_date {
        if state.sale_date > max_date {
            return false;
        }
    }
    if let Some(min_amount) = filter.min_amount {
        if state.total_amount < min_amount {
            return false;
        }
    }
    if let Some(max_amount) = filter.max_amount {
        if state.total_amount > max_amount {
            return false;
        }
    }
    true
}

fn compare(a: &SaleState, b: &SaleState, order_by: &[(SaleSortKey, SortDirection)]) -> Ordering {
    // Newest first when no ordering was requested.
    if order_by.is_empty() {
        return b.created_at.cmp(&a.created_at);
    }

    for (key, direction) in order_by {
        let ordering = match key {
            SaleSortKey::SaleDate => a.sale_date.cmp(&b.sale_date),
            SaleSortKey::TotalAmount => a.total_amount.cmp(&b.total_amount),
            SaleSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        let ordering = match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use vendora_catalog::Product;
    use vendora_parties::{Branch, Customer};
    use vendora_sales::SaleItem;

    fn sale(number: &str, quantity: u32) -> Sale {
        let customer =
            Customer::new("CUST-7", "Ana Souza", "ana@example.com", "+55 11 99999-0000").unwrap();
        let branch =
            Branch::new("BR-01", "Centro", "Av. Paulista 100", "Sao Paulo", "SP").unwrap();
        let product =
            Product::new("PRD-1", "Pale Lager", "330ml bottle", "Beer", "Vendora").unwrap();
        let item = SaleItem::new(product, quantity, dec!(10.00)).unwrap();
        Sale::create(number, customer, branch, vec![item]).unwrap()
    }

    #[test]
    fn round_trip_rehydrates_without_pending_events() {
        let repo = InMemorySaleRepository::new();
        let mut stored = sale("S-1", 2);
        repo.insert(&stored).unwrap();
        assert!(!stored.take_events().is_empty());

        let fetched = repo.get_by_id(&stored.id_typed()).unwrap().unwrap();
        assert_eq!(fetched.state(), stored.state());
        assert!(fetched.pending_events().is_empty());
    }

    #[test]
    fn insert_rejects_duplicate_numbers() {
        let repo = InMemorySaleRepository::new();
        repo.insert(&sale("S-1", 2)).unwrap();

        let err = repo.insert(&sale("S-1", 3)).unwrap_err();
        assert_eq!(err, RepositoryError::DuplicateSaleNumber("S-1".into()));
    }

    #[test]
    fn update_requires_an_existing_row() {
        let repo = InMemorySaleRepository::new();
        let err = repo.update(&sale("S-1", 2)).unwrap_err();
        assert!(matches!(err, RepositoryError::Storage(_)));
    }

    #[test]
    fn amount_filter_bounds_are_inclusive() {
        let repo = InMemorySaleRepository::new();
        repo.insert(&sale("S-1", 1)).unwrap(); // 10.00
        repo.insert(&sale("S-2", 2)).unwrap(); // 20.00
        repo.insert(&sale("S-3", 3)).unwrap(); // 30.00

        let filter = SaleFilter {
            min_amount: Some(dec!(10.00)),
            max_amount: Some(dec!(20.00)),
            ..SaleFilter::default()
        };
        assert_eq!(repo.count(&filter).unwrap(), 2);
    }

    #[test]
    fn default_listing_is_newest_first() {
        let repo = InMemorySaleRepository::new();
        repo.insert(&sale("S-1", 1)).unwrap();
        repo.insert(&sale("S-2", 1)).unwrap();
        repo.insert(&sale("S-3", 1)).unwrap();

        let page = repo.get_all(&SaleQuery::default()).unwrap();
        let numbers: Vec<_> = page.iter().map(|s| s.sale_number().to_owned()).collect();
        assert_eq!(numbers, ["S-3", "S-2", "S-1"]);
    }

    #[test]
    fn pagination_is_one_based() {
        let repo = InMemorySaleRepository::new();
        for n in 1..=5 {
            repo.insert(&sale(&format!("S-{n}"), 1)).unwrap();
        }

        let query = SaleQuery {
            page: 2,
            size: 2,
            ..SaleQuery::default()
        };
        assert_eq!(repo.get_all(&query).unwrap().len(), 2);

        let query = SaleQuery {
            page: 3,
            size: 2,
            ..SaleQuery::default()
        };
        assert_eq!(repo.get_all(&query).unwrap().len(), 1);
    }
}
