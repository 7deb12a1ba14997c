use serde::{Deserialize, Serialize};

/// One `{value, label}` entry of a select control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Builds options for any entity list with a [`SelectOption`] conversion.
pub fn options_from<'a, T>(items: impl IntoIterator<Item = &'a T>) -> Vec<SelectOption>
where
    T: 'a,
    &'a T: Into<SelectOption>,
{
    items.into_iter().map(Into::into).collect()
}
