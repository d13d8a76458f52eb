//! Quantity-change ratio used to rescale sub-lines.

use lineforge_core::{DomainError, DomainResult, ValueObject};

use crate::item::ItemRecord;

/// Exact ratio `numerator / denominator` between an edited line's new and
/// original quantity. The denominator is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio {
    numerator: u64,
    denominator: u64,
}

impl ValueObject for Ratio {}

impl Ratio {
    pub const IDENTITY: Ratio = Ratio {
        numerator: 1,
        denominator: 1,
    };

    pub fn new(numerator: u64, denominator: u64) -> DomainResult<Self> {
        if denominator == 0 {
            return Err(DomainError::ambiguous_ratio("original quantity is zero"));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Ratio of `item`'s current quantity to its quantity before the edit.
    ///
    /// The prior quantity comes from `_original` when the form sent a snapshot,
    /// otherwise (absent or `null`) from the current quantity, which makes the
    /// ratio 1.
    pub fn from_change(item: &ItemRecord) -> DomainResult<Self> {
        let current = item.quantity.copied();
        let original = match item.original.get() {
            Some(snapshot) => snapshot.quantity(),
            None => current,
        };
        let (Some(original), Some(current)) = (original, current) else {
            return Err(DomainError::ambiguous_ratio(
                "original or new quantity unavailable",
            ));
        };
        Self::new(current, original)
    }

    pub fn is_identity(&self) -> bool {
        self.numerator == self.denominator
    }

    /// `round_half_up(quantity × ratio)`, computed exactly in integers.
    pub fn apply(&self, quantity: u64) -> u64 {
        let product = u128::from(quantity) * u128::from(self.numerator);
        let d = u128::from(self.denominator);
        let mut scaled = product / d;
        if 2 * (product % d) >= d {
            scaled += 1;
        }
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }
}

impl core::fmt::Display for Ratio {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
