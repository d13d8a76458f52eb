//! Lookup port: read access to persisted lines and products.

use std::sync::Arc;

use lineforge_products::{Product, ProductId};

use crate::line::{LineId, LineRecord};

/// Blocking read capability the reconciliation engine is constructed with.
///
/// Implementations return `None` for identifiers with no persisted record; the
/// engine treats that as "no additional data" rather than an error.
pub trait LookupPort: Send + Sync {
    /// Fetch a persisted line together with its persisted sub-lines.
    fn find_line(&self, id: LineId) -> Option<LineRecord>;

    /// Fetch a product (used to read its update policy).
    fn find_product(&self, id: ProductId) -> Option<Product>;
}

impl<S> LookupPort for Arc<S>
where
    S: LookupPort + ?Sized,
{
    fn find_line(&self, id: LineId) -> Option<LineRecord> {
        (**self).find_line(id)
    }

    fn find_product(&self, id: ProductId) -> Option<Product> {
        (**self).find_product(id)
    }
}

impl<S> LookupPort for &S
where
    S: LookupPort + ?Sized,
{
    fn find_line(&self, id: LineId) -> Option<LineRecord> {
        (**self).find_line(id)
    }

    fn find_product(&self, id: ProductId) -> Option<Product> {
        (**self).find_product(id)
    }
}

/// Lookup port backed by plain maps, with a call counter (test support).
#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use lineforge_products::{Product, ProductId, UpdateType};

    use super::LookupPort;
    use crate::line::{LineId, LineRecord};

    #[derive(Debug, Default)]
    pub struct FakeLookup {
        lines: HashMap<LineId, LineRecord>,
        products: HashMap<ProductId, Product>,
        calls: AtomicUsize,
    }

    impl FakeLookup {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_product(mut self, id: i64, update_type: UpdateType) -> Self {
            let id = ProductId::from(id);
            self.products.insert(id, Product::new(id, update_type));
            self
        }

        /// Index the line and every persisted descendant.
        pub fn with_line(mut self, line: LineRecord) -> Self {
            for l in line.walk() {
                self.lines.insert(l.id, l.clone());
            }
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl LookupPort for FakeLookup {
        fn find_line(&self, id: LineId) -> Option<LineRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.lines.get(&id).cloned()
        }

        fn find_product(&self, id: ProductId) -> Option<Product> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.products.get(&id).cloned()
        }
    }
}
