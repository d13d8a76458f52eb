//! Sales order lines: quantity reconciliation for hierarchical order forms.
//!
//! When a user edits the quantity of one line in a tree of lines and sub-lines,
//! the [`PropagationEngine`] reconciles the rest of the tree according to the
//! edited line's product policy: re-sum the tree upward ([`UpdateType::Parent`])
//! or rescale the sub-lines downward ([`UpdateType::Children`]).
//!
//! Pure domain logic plus a read-only [`LookupPort`]; nothing here persists.
//!
//! [`UpdateType::Parent`]: lineforge_products::UpdateType::Parent
//! [`UpdateType::Children`]: lineforge_products::UpdateType::Children

pub mod aggregator;
pub mod config;
pub mod distributor;
pub mod engine;
pub mod field;
pub mod hydrator;
pub mod item;
pub mod line;
pub mod locator;
pub mod lookup;
pub mod payload;
pub mod ratio;

pub use aggregator::Aggregator;
pub use config::{EngineConfig, ScanPolicy};
pub use distributor::Distributor;
pub use engine::{Outcome, PropagationEngine, Reconciliation, SkipReason};
pub use field::Field;
pub use hydrator::Hydrator;
pub use item::{ItemRecord, OriginalSnapshot};
pub use line::{LineId, LineRecord, Price};
pub use locator::{locate, EditLocation};
pub use lookup::LookupPort;
pub use payload::parse_items;
pub use ratio::Ratio;
