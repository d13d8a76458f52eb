//! Item records: the in-memory order-line tree submitted by the form.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use lineforge_products::{ProductId, ProductRef};

use crate::field::Field;
use crate::line::{LineId, LineRecord, Price};

/// Prior field values captured by the form before the edit (`_original`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OriginalSnapshot(pub Map<String, Value>);

impl OriginalSnapshot {
    pub fn with_quantity(quantity: u64) -> Self {
        let mut map = Map::new();
        map.insert("quantity".to_string(), Value::from(quantity));
        Self(map)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Prior quantity, if it was captured and is a non-negative integer.
    pub fn quantity(&self) -> Option<u64> {
        self.get("quantity").and_then(Value::as_u64)
    }
}

/// One node of the order-line tree (a line or a sub-line).
///
/// Every wire field is a [`Field`], so a key the form sent as `null` is written
/// back as `null`. `children` (`items`) reads as:
/// - absent or `null`: the form did not send sub-lines; load them from storage.
/// - `[]`: the line has no sub-lines.
/// - `[...]`: use these sub-lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub id: Field<LineId>,
    /// Optimistic-lock token, passed through as sent.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub version: Field<Value>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub quantity: Field<u64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub price: Field<Price>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub product: Field<ProductRef>,
    #[serde(default, rename = "items", skip_serializing_if = "Field::is_absent")]
    pub children: Field<Vec<ItemRecord>>,
    #[serde(
        default,
        rename = "_changed",
        deserialize_with = "deserialize_flag",
        skip_serializing_if = "is_false"
    )]
    pub changed: bool,
    #[serde(default, rename = "_original", skip_serializing_if = "Field::is_absent")]
    pub original: Field<OriginalSnapshot>,
    /// Every other field on the row, written back verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ItemRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id.set(LineId::from(id));
        self
    }

    pub fn with_quantity(mut self, quantity: u64) -> Self {
        self.quantity.set(quantity);
        self
    }

    pub fn with_product(mut self, product: i64) -> Self {
        self.product.set(ProductRef::new(ProductId::from(product)));
        self
    }

    pub fn with_children(mut self, children: Vec<ItemRecord>) -> Self {
        self.children.set(children);
        self
    }

    pub fn with_original_quantity(mut self, quantity: u64) -> Self {
        self.original.set(OriginalSnapshot::with_quantity(quantity));
        self
    }

    pub fn mark_changed(mut self) -> Self {
        self.changed = true;
        self
    }

    /// Minimal record standing in for a persisted sub-line the form did not send.
    ///
    /// Quantity is left unset; reconciliation resolves it on demand.
    pub fn from_persisted(line: &LineRecord) -> Self {
        Self {
            id: Field::Present(line.id),
            version: line.version.clone().into(),
            price: line.price.clone().into(),
            product: line.product.clone().into(),
            ..Self::default()
        }
    }

    /// Id of a record that can exist in storage.
    pub fn persisted_id(&self) -> Option<LineId> {
        self.id.copied().filter(LineId::is_persisted)
    }

    pub fn product_id(&self) -> Option<ProductId> {
        self.product.get().and_then(|p| p.id)
    }

    pub fn children(&self) -> &[ItemRecord] {
        self.children.get().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Pre-order flattening: the node, then each child subtree left to right.
    pub fn flatten(&self) -> Vec<&ItemRecord> {
        let mut out = vec![self];
        for child in self.children() {
            out.extend(child.flatten());
        }
        out
    }

    /// Index path (child positions from this node) of the first changed node in pre-order.
    pub fn first_changed_path(&self) -> Option<Vec<usize>> {
        if self.changed {
            return Some(Vec::new());
        }
        for (i, child) in self.children().iter().enumerate() {
            if let Some(mut path) = child.first_changed_path() {
                path.insert(0, i);
                return Some(path);
            }
        }
        None
    }

    pub fn count_changed(&self) -> usize {
        self.flatten().iter().filter(|i| i.changed).count()
    }

    pub fn node_at(&self, path: &[usize]) -> Option<&ItemRecord> {
        match path.split_first() {
            None => Some(self),
            Some((&i, rest)) => self.children.get()?.get(i)?.node_at(rest),
        }
    }

    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut ItemRecord> {
        match path.split_first() {
            None => Some(self),
            Some((&i, rest)) => self.children.get_mut()?.get_mut(i)?.node_at_mut(rest),
        }
    }

    /// Clear the edit flag on this node and every supplied descendant.
    pub fn clear_changed(&mut self) {
        self.changed = false;
        if let Some(children) = self.children.get_mut() {
            for child in children {
                child.clear_changed();
            }
        }
    }
}

/// `_changed` arrives as a bool or as the string `"true"`; anything else is unset.
fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    })
}

fn is_false(flag: &bool) -> bool {
    !*flag
}
