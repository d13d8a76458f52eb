//! Persisted order lines, as returned by the lookup port.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use lineforge_core::{Entity, RecordId, ValueObject};
use lineforge_products::ProductRef;

/// Order line identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub RecordId);

impl LineId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }

    /// Unsaved rows carry `0` or a negative client-side id.
    pub fn is_persisted(&self) -> bool {
        self.0.is_persisted()
    }
}

impl From<i64> for LineId {
    fn from(value: i64) -> Self {
        Self(RecordId::new(value))
    }
}

impl core::fmt::Display for LineId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Unit price, passed through untouched.
///
/// Forms send decimals either as JSON numbers or as strings (to keep scale);
/// whichever representation arrived is the one written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Number(Number),
    Text(String),
}

impl ValueObject for Price {}

impl From<&str> for Price {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A persisted order line with its persisted sub-lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub id: LineId,
    /// Optimistic-lock token; opaque here.
    #[serde(default)]
    pub version: Option<Value>,
    #[serde(default)]
    pub quantity: u64,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub product: Option<ProductRef>,
    #[serde(default)]
    pub items: Vec<LineRecord>,
}

impl LineRecord {
    pub fn new(id: i64, quantity: u64) -> Self {
        Self {
            id: LineId::from(id),
            version: None,
            quantity,
            price: None,
            product: None,
            items: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<Value>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_price(mut self, price: impl Into<Price>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn with_product(mut self, product: ProductRef) -> Self {
        self.product = Some(product);
        self
    }

    pub fn with_items(mut self, items: Vec<LineRecord>) -> Self {
        self.items = items;
        self
    }

    /// Pre-order walk over this line and every persisted descendant.
    pub fn walk(&self) -> Vec<&LineRecord> {
        let mut out = vec![self];
        for item in &self.items {
            out.extend(item.walk());
        }
        out
    }
}

impl Entity for LineRecord {
    type Id = LineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn price_keeps_its_wire_representation() {
        let as_text: Price = serde_json::from_value(json!("12.50")).unwrap();
        assert_eq!(as_text, Price::from("12.50"));
        assert_eq!(serde_json::to_value(&as_text).unwrap(), json!("12.50"));

        let as_number: Price = serde_json::from_value(json!(7)).unwrap();
        assert!(matches!(as_number, Price::Number(_)));
        assert_eq!(serde_json::to_value(&as_number).unwrap(), json!(7));
    }

    #[test]
    fn walk_is_pre_order() {
        let line = LineRecord::new(1, 0).with_items(vec![
            LineRecord::new(2, 1).with_items(vec![LineRecord::new(3, 1)]),
            LineRecord::new(4, 1),
        ]);
        let ids: Vec<i64> = line.walk().iter().map(|l| l.id.0.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn deserializes_with_defaults() {
        let line: LineRecord = serde_json::from_value(json!({"id": 5})).unwrap();
        assert_eq!(line.quantity, 0);
        assert!(line.items.is_empty());
        assert!(line.product.is_none());
    }

    #[test]
    fn version_token_is_opaque() {
        let line: LineRecord =
            serde_json::from_value(json!({"id": 5, "version": "a1b2"})).unwrap();
        assert_eq!(line.version, Some(json!("a1b2")));
    }
}
