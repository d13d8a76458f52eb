//! Distribute-down reconciliation (`UpdateType::Children`).

use crate::hydrator::Hydrator;
use crate::item::ItemRecord;
use crate::lookup::LookupPort;
use crate::ratio::Ratio;

/// Rescales every descendant of the edited line by the same ratio.
pub struct Distributor<'a, L: ?Sized> {
    hydrator: Hydrator<'a, L>,
}

impl<'a, L: LookupPort + ?Sized> Distributor<'a, L> {
    pub fn new(hydrator: Hydrator<'a, L>) -> Self {
        Self { hydrator }
    }

    /// Rescale the sub-lines of `node` (not `node` itself), all the way down.
    pub fn distribute(&self, node: &mut ItemRecord, ratio: Ratio) {
        self.hydrator.hydrate(node);
        for child in node.children.get_mut().into_iter().flatten() {
            let quantity = self.hydrator.item_quantity(child);
            child.quantity.set(ratio.apply(quantity));
            self.distribute(child, ratio);
        }
    }
}
