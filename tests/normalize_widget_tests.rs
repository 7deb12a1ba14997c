mod common;

use clinic_scheduler::*;
use common::*;
use serde_json::json;

#[test]
fn test_json_references_normalize_alike() {
    assert_eq!(normalize(&json!("c1")), Some("c1".to_string()));
    assert_eq!(normalize(&json!({ "_id": "c1", "ad": "X" })), Some("c1".to_string()));
    assert_eq!(normalize(&json!({ "id": "c1" })), Some("c1".to_string()));
    assert_eq!(normalize(&json!(null)), None);
    assert_eq!(normalize(&json!({ "ad": "no id" })), None);
}

#[test]
fn test_wire_references_deserialize_to_either_shape() {
    let consultants = consultants();
    assert!(consultants[0].clinic.as_ref().unwrap().is_embedded());
    assert!(!consultants[1].clinic.as_ref().unwrap().is_embedded());
    assert_eq!(
        normalize(&consultants[0].clinic),
        normalize(&consultants[1].clinic)
    );
}

#[test]
fn test_widget_over_loaded_consultants() {
    let consultants = consultants();
    let mut widget = MultiSelect::new(options_from(&consultants));

    let selection = widget.toggle(&[consultants[0].clinic.clone().unwrap()], "cons2");
    assert_eq!(selection, vec!["clinicA", "cons2"]);

    let tags = widget.selected_tags(&selection);
    assert!(!tags[0].known);
    assert_eq!(tags[0].label, "clinicA");
    assert_eq!(tags[1].label, "Mehmet Kaya");

    widget.set_search("AYŞE");
    let rows = widget.visible_rows(&selection);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].option.value, "cons1");
    assert!(!rows[0].checked);
}

#[test]
fn test_widget_select_all_and_clear() {
    let widget = MultiSelect::new(options_from(&clinics()));
    assert_eq!(widget.select_all(), vec!["clinicA", "clinicB"]);
    assert!(widget.clear().is_empty());

    let empty: Vec<String> = Vec::new();
    assert_eq!(widget.placeholder(&empty), Some("Select..."));
    assert_eq!(widget.placeholder(&widget.select_all()), None);
}

#[test]
fn test_widget_labels_follow_messages() {
    let messages = Messages {
        multi_select_placeholder: "Seçiniz...".to_string(),
        ..Messages::default()
    };
    let widget = MultiSelect::default().with_labels((&messages).into());
    let empty: Vec<String> = Vec::new();
    assert_eq!(widget.placeholder(&empty), Some("Seçiniz..."));
    assert!(widget.shows_no_results());
}

#[test]
fn test_appointment_filter_over_fixture() {
    let appointments = appointments();
    let filter = AppointmentFilter::new()
        .with_clinic(&EntityRef::embedded("clinicA"))
        .with_consultants([json!({ "_id": "cons1" })]);
    assert_eq!(filter.apply(&appointments).len(), 1);

    let other = AppointmentFilter::new().with_clinic("clinicB");
    assert!(other.apply(&appointments).is_empty());
}

#[test]
fn test_status_presentation() {
    let status: AppointmentStatus = "İptal Edildi".parse().unwrap();
    assert_eq!(status, AppointmentStatus::Cancelled);
    assert_eq!(status.label(), "Cancelled");
    assert_eq!(status.badge(), BadgeVariant::Danger);
    assert_eq!(AppointmentStatus::default().badge(), BadgeVariant::Warning);
}
