//! Aggregate-up reconciliation (`UpdateType::Parent`).

use crate::hydrator::Hydrator;
use crate::item::ItemRecord;
use crate::lookup::LookupPort;

/// Recomputes line quantities bottom-up as the sum of their sub-lines.
pub struct Aggregator<'a, L: ?Sized> {
    hydrator: Hydrator<'a, L>,
}

impl<'a, L: LookupPort + ?Sized> Aggregator<'a, L> {
    pub fn new(hydrator: Hydrator<'a, L>) -> Self {
        Self { hydrator }
    }

    /// Reconcile `node` and return its quantity.
    ///
    /// The edited node keeps the quantity the user typed. When one of a node's
    /// direct children is the edited one, the children are summed at face value
    /// without descending further.
    pub fn aggregate(&self, node: &mut ItemRecord) -> u64 {
        if node.changed {
            node.changed = false;
            let quantity = self.hydrator.item_quantity(node);
            node.quantity.set(quantity);
            return quantity;
        }

        self.hydrator.hydrate(node);

        if node.children().is_empty() {
            let quantity = self.hydrator.item_quantity(node);
            node.quantity.set(quantity);
            return quantity;
        }

        let shallow = node.children().iter().any(|child| child.changed);
        let mut total: u64 = 0;
        for child in node.children.get_mut().into_iter().flatten() {
            let quantity = if shallow {
                self.hydrator.item_quantity(child)
            } else {
                self.aggregate(child)
            };
            child.quantity.set(quantity);
            child.changed = false;
            total = total.saturating_add(quantity);
        }

        node.quantity.set(total);
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::LineRecord;
    use crate::lookup::testing::FakeLookup;

    fn leaf(quantity: u64) -> ItemRecord {
        ItemRecord::new().with_quantity(quantity).with_children(vec![])
    }

    fn sum_children(node: &ItemRecord) -> u64 {
        node.children().iter().map(|c| c.quantity.copied().unwrap_or(0)).sum()
    }

    #[test]
    fn changed_sibling_sums_face_values() {
        let lookup = FakeLookup::new();
        let aggregator = Aggregator::new(Hydrator::new(&lookup));

        let mut root = ItemRecord::new()
            .with_quantity(5)
            .with_children(vec![leaf(6), leaf(10).mark_changed()]);

        assert_eq!(aggregator.aggregate(&mut root), 16);
        assert_eq!(root.quantity, Some(16));
        assert_eq!(root.count_changed(), 0);
    }

    #[test]
    fn recurses_through_intermediate_levels() {
        let lookup = FakeLookup::new();
        let aggregator = Aggregator::new(Hydrator::new(&lookup));

        let mut root = ItemRecord::new().with_quantity(0).with_children(vec![
            ItemRecord::new()
                .with_quantity(99)
                .with_children(vec![leaf(1), leaf(7).mark_changed()]),
            ItemRecord::new()
                .with_quantity(42)
                .with_children(vec![leaf(2), leaf(3)]),
        ]);

        assert_eq!(aggregator.aggregate(&mut root), 13);
        assert_eq!(root.children()[0].quantity, Some(8));
        assert_eq!(root.children()[1].quantity, Some(5));
        assert_eq!(root.quantity.copied().unwrap(), sum_children(&root));
    }

    #[test]
    fn shallow_override_leaves_grandchildren_alone() {
        let lookup = FakeLookup::new();
        let aggregator = Aggregator::new(Hydrator::new(&lookup));

        // The sibling with its own sub-lines is taken at face value (4), not re-summed.
        let mut root = ItemRecord::new().with_children(vec![
            ItemRecord::new()
                .with_quantity(4)
                .with_children(vec![leaf(1), leaf(1)]),
            leaf(3).mark_changed(),
        ]);

        assert_eq!(aggregator.aggregate(&mut root), 7);
        assert_eq!(root.children()[0].quantity, Some(4));
    }

    #[test]
    fn edited_root_is_authoritative() {
        let lookup = FakeLookup::new();
        let aggregator = Aggregator::new(Hydrator::new(&lookup));

        let mut root = ItemRecord::new()
            .with_quantity(20)
            .mark_changed()
            .with_children(vec![leaf(1), leaf(2)]);

        assert_eq!(aggregator.aggregate(&mut root), 20);
        assert!(!root.changed);
        assert_eq!(root.children()[0].quantity, Some(1));
    }

    #[test]
    fn leaves_without_quantity_use_storage() {
        let lookup = FakeLookup::new().with_line(
            LineRecord::new(1, 9).with_items(vec![LineRecord::new(2, 4), LineRecord::new(3, 5)]),
        );
        let aggregator = Aggregator::new(Hydrator::new(&lookup));

        // Root sends no sub-lines: they are loaded, then summed from stored quantities.
        let mut root = ItemRecord::new().with_id(1);
        assert_eq!(aggregator.aggregate(&mut root), 9);
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[0].quantity, Some(4));
        assert_eq!(root.children()[1].quantity, Some(5));
    }

    #[test]
    fn unknown_leaf_counts_as_zero() {
        let lookup = FakeLookup::new();
        let aggregator = Aggregator::new(Hydrator::new(&lookup));

        let mut root = ItemRecord::new().with_children(vec![
            ItemRecord::new().with_id(404),
            leaf(2).mark_changed(),
        ]);
        assert_eq!(aggregator.aggregate(&mut root), 2);
        assert_eq!(root.children()[0].quantity, Some(0));
    }
}
