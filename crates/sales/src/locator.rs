//! Change detection across a forest of item trees.

use tracing::warn;

use crate::config::ScanPolicy;
use crate::item::ItemRecord;

/// Position of the edited node: the top-level tree it lives in, plus the child
/// indices leading from that root down to it (empty when the root itself was edited).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditLocation {
    pub root: usize,
    pub path: Vec<usize>,
}

impl EditLocation {
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Top-level tree holding the edit.
    pub fn root_of<'f>(&self, forest: &'f [ItemRecord]) -> Option<&'f ItemRecord> {
        forest.get(self.root)
    }

    pub fn root_mut<'f>(&self, forest: &'f mut [ItemRecord]) -> Option<&'f mut ItemRecord> {
        forest.get_mut(self.root)
    }

    pub fn edited<'f>(&self, forest: &'f [ItemRecord]) -> Option<&'f ItemRecord> {
        forest.get(self.root)?.node_at(&self.path)
    }

    pub fn edited_mut<'f>(&self, forest: &'f mut [ItemRecord]) -> Option<&'f mut ItemRecord> {
        forest.get_mut(self.root)?.node_at_mut(&self.path)
    }
}

/// Find the edited node in `forest`.
///
/// Each tree is flattened in pre-order and its first changed node is taken.
/// With [`ScanPolicy::LastTree`] a later tree's match replaces an earlier one;
/// with [`ScanPolicy::FirstMatch`] the first tree holding a change wins.
pub fn locate(forest: &[ItemRecord], policy: ScanPolicy) -> Option<EditLocation> {
    let matches: Vec<EditLocation> = forest
        .iter()
        .enumerate()
        .filter_map(|(root, item)| {
            item.first_changed_path()
                .map(|path| EditLocation { root, path })
        })
        .collect();

    let changed: usize = forest.iter().map(ItemRecord::count_changed).sum();
    if changed > 1 {
        warn!(
            changed,
            trees = matches.len(),
            policy = %policy,
            "more than one item marked as changed"
        );
    }

    match policy {
        ScanPolicy::LastTree => matches.into_iter().last(),
        ScanPolicy::FirstMatch => matches.into_iter().next(),
    }
}
