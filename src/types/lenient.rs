//! Tolerant field readers for backend documents.
//!
//! Records written by older console forms carry numbers as strings, and
//! populated reference arrays hold `null` where the referenced document was
//! deleted. One such record must not fail the whole collection.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::entities::DurationField;
use super::reference::EntityRef;

/// Reference array that drops `null` elements and treats a `null` array as
/// empty.
pub(crate) fn reference_list<'de, D>(deserializer: D) -> Result<Vec<EntityRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<EntityRef>>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default().into_iter().flatten().collect())
}

/// Number or numeric string. Anything else reads as absent.
pub(crate) fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(as_f64))
}

/// Whole non-negative number or numeric string. Anything else reads as
/// absent.
pub(crate) fn count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(as_f64).and_then(to_count))
}

/// Duration of any known shape; unknown shapes read as absent.
pub(crate) fn duration<'de, D>(deserializer: D) -> Result<Option<DurationField>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| DurationField::deserialize(value).ok()))
}

fn as_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

fn to_count(value: f64) -> Option<u32> {
    (0.0..=f64::from(u32::MAX))
        .contains(&value)
        .then_some(value.trunc() as u32)
}
