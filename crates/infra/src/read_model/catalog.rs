//! In-memory catalog of persisted lines and products.

use lineforge_core::Entity;
use lineforge_products::{Product, ProductId};
use lineforge_sales::{LineId, LineRecord, LookupPort};
use tracing::debug;

use super::store::{InMemoryStore, KeyValueStore};

/// Lookup port backed by two in-memory stores.
///
/// Lines are indexed at every level: storing a line also makes each of its
/// persisted sub-lines addressable by its own id.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    lines: InMemoryStore<LineId, LineRecord>,
    products: InMemoryStore<ProductId, Product>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_product(&self, product: Product) {
        put(&self.products, product);
    }

    /// Store a line and index each of its descendants.
    pub fn upsert_line(&self, line: &LineRecord) {
        for l in line.walk() {
            put(&self.lines, l.clone());
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }
}

fn put<E>(store: &InMemoryStore<E::Id, E>, entity: E)
where
    E: Entity + Clone + Send + Sync + 'static,
    E::Id: Send + Sync + 'static,
{
    store.upsert(entity.id().clone(), entity);
}

impl LookupPort for InMemoryCatalog {
    fn find_line(&self, id: LineId) -> Option<LineRecord> {
        let found = self.lines.get(&id);
        if found.is_none() {
            debug!(line_id = %id, "line not in catalog");
        }
        found
    }

    fn find_product(&self, id: ProductId) -> Option<Product> {
        self.products.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineforge_products::UpdateType;
    use std::sync::Arc;

    #[test]
    fn nested_lines_are_addressable() {
        let catalog = InMemoryCatalog::new();
        catalog.upsert_line(&LineRecord::new(1, 2).with_items(vec![
            LineRecord::new(2, 3).with_items(vec![LineRecord::new(4, 1)]),
            LineRecord::new(3, 5),
        ]));

        assert_eq!(catalog.line_count(), 4);
        let nested = catalog.find_line(LineId::from(4)).unwrap();
        assert_eq!(nested.quantity, 1);
        let mid = catalog.find_line(LineId::from(2)).unwrap();
        assert_eq!(mid.items.len(), 1);
        assert!(catalog.find_line(LineId::from(9)).is_none());
    }

    #[test]
    fn products_round_trip_through_the_port() {
        let catalog = Arc::new(InMemoryCatalog::new());
        catalog.upsert_product(Product::new(ProductId::from(10), UpdateType::Children));

        let port: &dyn LookupPort = &catalog;
        let product = port.find_product(ProductId::from(10)).unwrap();
        assert_eq!(product.update_type(), UpdateType::Children);
        assert!(port.find_product(ProductId::from(11)).is_none());
    }
}
