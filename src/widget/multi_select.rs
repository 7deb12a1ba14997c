//! Searchable multi-value select over `{value, label}` options.
//!
//! The widget is controlled: the caller owns the selected values and passes
//! them in; every operation returns the next selection instead of storing
//! it. The widget itself only keeps transient state (open/closed and the
//! search text). Incoming selections may hold bare ids or embedded
//! references; they are normalized before any comparison.

use crate::core::Messages;
use crate::normalize::{Identifier, normalize_all};
use crate::types::SelectOption;

/// Where a pointer-down landed relative to the widget's rendered bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Inside,
    Outside,
}

/// A selected value rendered as a removable tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedTag {
    pub value: String,
    pub label: String,
    /// False when the value is not among the current options and the raw
    /// identifier is shown instead of a label.
    pub known: bool,
}

/// One row of the open dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow<'a> {
    pub option: &'a SelectOption,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSelectLabels {
    pub placeholder: String,
    pub no_options: String,
    pub select_all: String,
    pub clear: String,
    pub search: String,
}

#[derive(Debug, Clone, Default)]
pub struct MultiSelect {
    options: Vec<SelectOption>,
    open: bool,
    search: String,
    labels: MultiSelectLabels,
}

impl Default for MultiSelectLabels {
    fn default() -> Self {
        Self::from(&Messages::default())
    }
}

impl From<&Messages> for MultiSelectLabels {
    fn from(messages: &Messages) -> Self {
        Self {
            placeholder: messages.multi_select_placeholder.clone(),
            no_options: messages.multi_select_no_options.clone(),
            select_all: messages.multi_select_select_all.clone(),
            clear: messages.multi_select_clear.clone(),
            search: messages.multi_select_search.clone(),
        }
    }
}

impl MultiSelect {
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn with_labels(mut self, labels: MultiSelectLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Replaces the option list, e.g. after an upstream load. The search
    /// text and open state survive.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn labels(&self) -> &MultiSelectLabels {
        &self.labels
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Header click.
    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// Pointer-down anywhere in the document. Outside the widget an open
    /// dropdown closes; the selection is never touched.
    pub fn handle_pointer(&mut self, target: PointerTarget) {
        if self.open && target == PointerTarget::Outside {
            self.open = false;
        }
    }

    /// Caller-driven replacement of the selection, normalized.
    pub fn set_selection<I>(&self, values: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: Identifier,
    {
        normalize_all(values)
    }

    /// Removes `value` if selected, appends it otherwise.
    pub fn toggle<T, V>(&self, selected: &[T], value: &V) -> Vec<String>
    where
        T: Identifier,
        V: Identifier + ?Sized,
    {
        let mut current = normalize_all(selected);
        let Some(value) = value.normalized_id() else {
            return current;
        };

        if current.contains(&value) {
            current.retain(|v| v != &value);
        } else {
            current.push(value);
        }
        current
    }

    /// Case-insensitive substring match on labels. The option list itself
    /// is left untouched.
    pub fn filter_options(&self, search: &str) -> Vec<&SelectOption> {
        let needle = search.to_lowercase();
        self.options
            .iter()
            .filter(|option| option.label.to_lowercase().contains(&needle))
            .collect()
    }

    /// Rows of the open dropdown under the current search text.
    pub fn visible_rows<T: Identifier>(&self, selected: &[T]) -> Vec<OptionRow<'_>> {
        let current = normalize_all(selected);
        self.filter_options(&self.search)
            .into_iter()
            .map(|option| OptionRow {
                checked: current.contains(&option.value),
                option,
            })
            .collect()
    }

    /// Whether the "no results" row should be shown.
    pub fn shows_no_results(&self) -> bool {
        self.filter_options(&self.search).is_empty()
    }

    /// Every option value, in option order.
    pub fn select_all(&self) -> Vec<String> {
        self.options.iter().map(|o| o.value.clone()).collect()
    }

    pub fn clear(&self) -> Vec<String> {
        Vec::new()
    }

    /// Tags for the header. Values missing from the options (stale after an
    /// upstream change) still get a removable tag labelled with the raw id.
    pub fn selected_tags<T: Identifier>(&self, selected: &[T]) -> Vec<SelectedTag> {
        normalize_all(selected)
            .into_iter()
            .map(|value| match self.options.iter().find(|o| o.value == value) {
                Some(option) => SelectedTag {
                    label: option.label.clone(),
                    value,
                    known: true,
                },
                None => SelectedTag {
                    label: value.clone(),
                    value,
                    known: false,
                },
            })
            .collect()
    }

    /// Header text when nothing is selected.
    pub fn placeholder<T: Identifier>(&self, selected: &[T]) -> Option<&str> {
        if normalize_all(selected).is_empty() {
            Some(&self.labels.placeholder)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityRef;

    fn widget() -> MultiSelect {
        MultiSelect::new(vec![
            SelectOption::new("k1", "Kadıköy Merkez"),
            SelectOption::new("k2", "Beşiktaş"),
            SelectOption::new("k3", "Moda Kliniği"),
        ])
    }

    #[test]
    fn toggle_appends_then_removes() {
        let w = widget();
        let empty: Vec<String> = Vec::new();
        let once = w.toggle(&empty, "k2");
        assert_eq!(once, vec!["k2"]);
        let twice = w.toggle(&once, "k2");
        assert!(twice.is_empty());
    }

    #[test]
    fn toggle_normalizes_embedded_selection() {
        let w = widget();
        let selected = vec![EntityRef::embedded("k1"), EntityRef::id("k3")];
        assert_eq!(w.toggle(&selected, "k1"), vec!["k3"]);
        assert_eq!(w.toggle(&selected, "k2"), vec!["k1", "k3", "k2"]);
    }

    #[test]
    fn filter_is_case_insensitive_and_non_destructive() {
        let w = widget();
        let hits: Vec<_> = w.filter_options("MERKEZ").iter().map(|o| o.value.clone()).collect();
        assert_eq!(hits, vec!["k1"]);
        assert_eq!(w.options().len(), 3);
    }

    #[test]
    fn select_all_keeps_option_order() {
        assert_eq!(widget().select_all(), vec!["k1", "k2", "k3"]);
    }

    #[test]
    fn stale_values_render_with_raw_id() {
        let w = widget();
        let tags = w.selected_tags(&["k9".to_string(), "k1".to_string()]);
        assert_eq!(tags[0].label, "k9");
        assert!(!tags[0].known);
        assert_eq!(tags[1].label, "Kadıköy Merkez");
    }

    #[test]
    fn outside_pointer_closes_without_touching_selection() {
        let mut w = widget();
        w.toggle_open();
        w.handle_pointer(PointerTarget::Inside);
        assert!(w.is_open());
        w.handle_pointer(PointerTarget::Outside);
        assert!(!w.is_open());
    }

    #[test]
    fn visible_rows_follow_search_text() {
        let mut w = widget();
        w.set_search("ş");
        let rows = w.visible_rows(&["k2".to_string()]);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].checked);

        w.set_search("zzz");
        assert!(w.shows_no_results());
    }
}
