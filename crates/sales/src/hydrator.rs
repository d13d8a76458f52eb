//! Item hydration: fill in what the form did not send from persisted lines.

use tracing::debug;

use lineforge_core::DomainError;
use lineforge_products::UpdateType;

use crate::item::ItemRecord;
use crate::line::LineRecord;
use crate::lookup::LookupPort;

/// Lazily loads persisted children, prices and products into an item tree.
pub struct Hydrator<'a, L: ?Sized> {
    lookup: &'a L,
}

impl<L: LookupPort + ?Sized> Hydrator<'_, L> {
    /// Persisted counterpart of `item`, if it has one.
    ///
    /// Unsaved rows are never looked up. A persisted id with no record behind it
    /// is a missing reference: logged, then treated as "nothing stored".
    pub fn persisted_line(&self, item: &ItemRecord) -> Option<LineRecord> {
        let id = item.persisted_id()?;
        let line = self.lookup.find_line(id);
        if line.is_none() {
            let err = DomainError::missing_reference(format!("order line {id}"));
            debug!(kind = err.kind(), %err, "using supplied fields only");
        }
        line
    }

    /// Supplied quantity, else the persisted one, else 0.
    pub fn item_quantity(&self, item: &ItemRecord) -> u64 {
        match item.quantity.copied() {
            Some(q) => q,
            None => self.persisted_line(item).map(|l| l.quantity).unwrap_or(0),
        }
    }

    /// Update policy of the item's product; unknown products resolve to `None`.
    pub fn update_type(&self, item: &ItemRecord) -> UpdateType {
        let Some(product_id) = item.product_id() else {
            return UpdateType::None;
        };
        match self.lookup.find_product(product_id) {
            Some(product) => product.update_type(),
            None => {
                let err = DomainError::missing_reference(format!("product {product_id}"));
                debug!(kind = err.kind(), %err, "no update policy");
                UpdateType::None
            }
        }
    }

    /// Make sure `item.children` is populated.
    ///
    /// Absent or `null` children are replaced by minimal records for the persisted
    /// sub-lines (empty for unsaved rows). Supplied children without a `price` or
    /// `product` key get those from their own persisted line; keys that were sent,
    /// even as `null`, are kept.
    pub fn hydrate(&self, item: &mut ItemRecord) {
        if !item.children.is_present() {
            let children = self
                .persisted_line(item)
                .map(|line| line.items.iter().map(ItemRecord::from_persisted).collect())
                .unwrap_or_default();
            item.children.set(children);
            return;
        }

        for child in item.children.get_mut().into_iter().flatten() {
            if !child.price.is_absent() && !child.product.is_absent() {
                continue;
            }
            let Some(line) = self.persisted_line(child) else {
                continue;
            };
            if child.price.is_absent() {
                child.price = line.price.into();
            }
            if child.product.is_absent() {
                child.product = line.product.into();
            }
        }
    }
}

impl<'a, L: ?Sized> Hydrator<'a, L> {
    pub fn new(lookup: &'a L) -> Self {
        Self { lookup }
    }
}

impl<L: ?Sized> Clone for Hydrator<'_, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L: ?Sized> Copy for Hydrator<'_, L> {}
