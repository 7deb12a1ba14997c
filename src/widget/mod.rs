pub mod multi_select;

pub use multi_select::{MultiSelect, MultiSelectLabels, OptionRow, PointerTarget, SelectedTag};
