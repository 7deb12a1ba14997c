//! Entity references as they arrive from the backend.
//!
//! The same reference field may be a bare identifier (`"64f0..."`) or a
//! populated document (`{"_id": "64f0...", "ad": "Merkez"}`), depending on
//! whether the endpoint populated it. [`EntityRef`] accepts both shapes;
//! [`crate::normalize`] collapses them to the bare identifier.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A reference to another entity, either by bare identifier or embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    Id(String),
    Embedded(EmbeddedRef),
}

/// A populated reference. Only the identifier is interpreted; every other
/// field is carried along untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmbeddedRef {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl EntityRef {
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    pub fn embedded(id: impl Into<String>) -> Self {
        Self::Embedded(EmbeddedRef {
            id: Some(id.into()),
            fields: Map::new(),
        })
    }

    /// Embedded reference with extra populated fields.
    pub fn embedded_with<I, K>(id: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self::Embedded(EmbeddedRef {
            id: Some(id.into()),
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        })
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded(_))
    }
}

impl EmbeddedRef {
    /// `_id` wins; some endpoints serialize a plain `id` instead.
    pub fn identifier(&self) -> Option<&str> {
        self.id
            .as_deref()
            .or_else(|| self.fields.get("id").and_then(Value::as_str))
    }
}

impl From<&str> for EntityRef {
    fn from(value: &str) -> Self {
        Self::Id(value.to_string())
    }
}

impl From<String> for EntityRef {
    fn from(value: String) -> Self {
        Self::Id(value)
    }
}

impl From<&String> for EntityRef {
    fn from(value: &String) -> Self {
        Self::Id(value.clone())
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Embedded(embedded) => match embedded.identifier() {
                Some(id) => write!(f, "{id}"),
                None => write!(f, "<unidentified>"),
            },
        }
    }
}
