//! Identifier normalization.
//!
//! Every reference value passes through here before it is compared, stored
//! or emitted. A reference may be a bare identifier or an embedded document;
//! both collapse to the bare identifier string. Normalizing a value that is
//! already a bare identifier returns it unchanged.

use serde_json::Value;

use crate::types::{EmbeddedRef, EntityRef};

/// Anything that can name an entity.
pub trait Identifier {
    /// The bare identifier, or `None` when the value carries no identifier
    /// (null, or an embedded document without `_id`/`id`).
    fn normalized_id(&self) -> Option<String>;
}

impl Identifier for str {
    fn normalized_id(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl Identifier for String {
    fn normalized_id(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl Identifier for EmbeddedRef {
    fn normalized_id(&self) -> Option<String> {
        self.identifier().map(str::to_string)
    }
}

impl Identifier for EntityRef {
    fn normalized_id(&self) -> Option<String> {
        match self {
            EntityRef::Id(id) => Some(id.clone()),
            EntityRef::Embedded(embedded) => embedded.normalized_id(),
        }
    }
}

impl Identifier for Value {
    fn normalized_id(&self) -> Option<String> {
        match self {
            Value::String(id) => Some(id.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Object(map) => map
                .get("_id")
                .or_else(|| map.get("id"))
                .and_then(|inner| match inner {
                    Value::Object(_) => None,
                    other => other.normalized_id(),
                }),
            Value::Null | Value::Bool(_) | Value::Array(_) => None,
        }
    }
}

impl<T: Identifier + ?Sized> Identifier for &T {
    fn normalized_id(&self) -> Option<String> {
        (**self).normalized_id()
    }
}

impl<T: Identifier> Identifier for Option<T> {
    fn normalized_id(&self) -> Option<String> {
        self.as_ref().and_then(Identifier::normalized_id)
    }
}

/// Normalizes a single reference.
pub fn normalize<T: Identifier + ?Sized>(value: &T) -> Option<String> {
    value.normalized_id()
}

/// Normalizes a list of references, preserving order and duplicates.
/// Entries without an identifier are dropped.
pub fn normalize_all<I>(values: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Identifier,
{
    values
        .into_iter()
        .filter_map(|value| value.normalized_id())
        .collect()
}

/// Normalized, non-empty identifier. Form fields use the empty string for
/// "nothing selected".
pub fn normalize_selected<T: Identifier + ?Sized>(value: &T) -> Option<String> {
    value.normalized_id().filter(|id| !id.is_empty())
}

/// String equality of two references after normalization.
pub fn same_id<A, B>(a: &A, b: &B) -> bool
where
    A: Identifier + ?Sized,
    B: Identifier + ?Sized,
{
    match (a.normalized_id(), b.normalized_id()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Whether any reference in `refs` names `id`.
pub fn contains_id<T: Identifier>(refs: &[T], id: &str) -> bool {
    refs.iter()
        .any(|candidate| candidate.normalized_id().as_deref() == Some(id))
}
