use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use lineforge_core::{Entity, RecordId};

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub RecordId);

impl ProductId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(RecordId::new(value))
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// How an edit to a line of this product propagates through its tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UpdateType {
    /// No propagation.
    #[default]
    None,
    /// Recompute the top-level line as the sum of its sub-lines.
    Parent,
    /// Rescale every sub-line of the edited line by the quantity change.
    Children,
}

impl UpdateType {
    /// Lenient parse of a stored policy value.
    ///
    /// Blank and unrecognised values resolve to [`UpdateType::None`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "parent" => Self::Parent,
            "children" => Self::Children,
            _ => Self::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Parent => "parent",
            Self::Children => "children",
        }
    }
}

impl core::fmt::Display for UpdateType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for UpdateType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UpdateType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(UpdateType::parse).unwrap_or_default())
    }
}

/// Product as seen by the order form: identity, display fields, update policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "updateType")]
    pub update_type: UpdateType,
}

impl Product {
    pub fn new(id: ProductId, update_type: UpdateType) -> Self {
        Self {
            id,
            code: None,
            name: None,
            update_type,
        }
    }

    pub fn update_type(&self) -> UpdateType {
        self.update_type
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Compact product reference carried on an order line.
///
/// Fields the form sends beyond `id`/`code`/`name` are kept in `extra` and
/// written back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProductRef {
    pub fn new(id: ProductId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}
