//! Propagation engine: locate the edit, resolve the product policy, reconcile.

use serde_json::Value;
use tracing::{debug, instrument, warn, Span};

use lineforge_core::DomainError;
use lineforge_products::UpdateType;

use crate::aggregator::Aggregator;
use crate::config::EngineConfig;
use crate::distributor::Distributor;
use crate::hydrator::Hydrator;
use crate::item::ItemRecord;
use crate::locator::{self, EditLocation};
use crate::lookup::LookupPort;
use crate::payload;
use crate::ratio::Ratio;

/// What a reconciliation pass did to the forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Nothing was marked as changed.
    NoEdit,
    /// The edited line's product has no update policy; only flags were cleared.
    NoPolicy { location: EditLocation },
    /// The tree containing the edit was re-summed from its root.
    Aggregated {
        location: EditLocation,
        root_quantity: u64,
    },
    /// The edited line's descendants were rescaled.
    Distributed { location: EditLocation, ratio: Ratio },
}

impl Reconciliation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reconciliation::NoEdit => "no_edit",
            Reconciliation::NoPolicy { .. } => "no_policy",
            Reconciliation::Aggregated { .. } => "aggregated",
            Reconciliation::Distributed { .. } => "distributed",
        }
    }
}

/// Why a form payload was left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// `items` absent, `null` or empty.
    NoItems,
    /// The payload could not be decoded.
    Malformed(DomainError),
}

/// Result of [`PropagationEngine::compute_items`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Reconciled {
        items: Vec<ItemRecord>,
        reconciliation: Reconciliation,
    },
    Skipped(SkipReason),
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Reconciled { .. } => "reconciled",
            Outcome::Skipped(_) => "skipped",
        }
    }

    /// Response payload: `{"items": [...]}` when a forest was processed, `{}` otherwise.
    pub fn to_response(&self) -> Value {
        match self {
            Outcome::Reconciled { items, .. } => payload::items_response(items),
            Outcome::Skipped(_) => Value::Object(Default::default()),
        }
    }
}

/// Quantity reconciliation over an order-line forest.
///
/// Stateless between calls; everything it reads from storage goes through the
/// injected [`LookupPort`].
#[derive(Debug, Clone)]
pub struct PropagationEngine<L> {
    lookup: L,
    config: EngineConfig,
}

impl<L: LookupPort> PropagationEngine<L> {
    pub fn new(lookup: L) -> Self {
        Self::with_config(lookup, EngineConfig::default())
    }

    pub fn with_config(lookup: L, config: EngineConfig) -> Self {
        Self { lookup, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Reconcile `forest` in place after a single-line quantity edit.
    ///
    /// Never fails: missing references, ambiguous ratios and unknown policies all
    /// degrade to pass-through values. On return no item is marked as changed.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            roots = forest.len(),
            root_id = tracing::field::Empty,
            policy = tracing::field::Empty
        )
    )]
    pub fn reconcile(&self, forest: &mut [ItemRecord]) -> Reconciliation {
        let Some(location) = locator::locate(forest, self.config.scan_policy) else {
            return Reconciliation::NoEdit;
        };

        if let Some(root_id) = location.root_of(forest).and_then(|root| root.id.copied()) {
            Span::current().record("root_id", root_id.0.get());
        }

        let hydrator = Hydrator::new(&self.lookup);
        let update_type = location
            .edited(forest)
            .map(|item| hydrator.update_type(item))
            .unwrap_or_default();
        Span::current().record("policy", update_type.as_str());

        let result = match update_type {
            UpdateType::None => Reconciliation::NoPolicy { location },
            UpdateType::Parent => match location.root_mut(forest) {
                Some(root) => {
                    let root_quantity = Aggregator::new(hydrator).aggregate(root);
                    Reconciliation::Aggregated {
                        location,
                        root_quantity,
                    }
                }
                None => Reconciliation::NoPolicy { location },
            },
            UpdateType::Children => match location.edited_mut(forest) {
                Some(edited) => {
                    let ratio = Ratio::from_change(edited).unwrap_or_else(|err| {
                        debug!(kind = err.kind(), %err, "distributing with identity ratio");
                        Ratio::IDENTITY
                    });
                    debug!(%ratio, identity = ratio.is_identity(), "distributing to sub-lines");
                    Distributor::new(hydrator).distribute(edited, ratio);
                    Reconciliation::Distributed { location, ratio }
                }
                None => Reconciliation::NoPolicy { location },
            },
        };

        for item in forest.iter_mut() {
            item.clear_changed();
        }

        debug!(outcome = result.as_str(), "reconciled order lines");
        result
    }

    /// Form-level entry point: decode `items`, reconcile, hand back the forest.
    ///
    /// Absent or empty `items` and malformed payloads are skipped, never errors.
    pub fn compute_items(&self, payload: &Value) -> Outcome {
        let mut items = match payload::parse_items(payload) {
            Ok(Some(items)) if !items.is_empty() => items,
            Ok(_) => return Outcome::Skipped(SkipReason::NoItems),
            Err(err) => {
                warn!(kind = err.kind(), %err, "ignoring order form payload");
                return Outcome::Skipped(SkipReason::Malformed(err));
            }
        };

        let reconciliation = self.reconcile(&mut items);
        Outcome::Reconciled {
            items,
            reconciliation,
        }
    }
}
