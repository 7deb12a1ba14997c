mod common;

use chrono::{FixedOffset, TimeZone, Utc};
use chrono_tz::America::New_York;
use clinic_scheduler::*;
use common::*;

async fn filled_form(stores: &MemoryStores) -> (AppointmentForm, RecordingNotifier) {
    let (cascade, notifier) = controller(stores.stores(), SchedulerConfig::default());
    let mut form = AppointmentForm::create(cascade);
    form.mount().await;

    let cascade = form.cascade();
    cascade.select_clinic("clinicA").await;
    cascade.select_consultants(["cons1"]).await;
    cascade.select_service("svcA").await;
    cascade.select_member("m1").await;
    form.set_local_datetime("2024-03-10T14:30", &Utc).unwrap();
    (form, notifier)
}

#[tokio::test]
async fn test_submit_writes_normalized_payload() {
    let stores = memory_stores();
    let (form, notifier) = filled_form(&stores).await;

    let saved = form.submit().await.unwrap();

    assert!(saved.id.is_some());
    assert_eq!(saved.clinic, Some(EntityRef::id("clinicA")));
    assert_eq!(saved.consultants, vec![EntityRef::id("cons1")]);
    assert_eq!(saved.service, Some(EntityRef::id("svcA")));
    assert_eq!(saved.status, AppointmentStatus::Pending);
    assert_eq!(stores.appointments.len().await, 2);
    assert_eq!(
        notifier.successes(),
        vec![Messages::default().appointment_created]
    );

    let wire = serde_json::to_value(&saved).unwrap();
    assert_eq!(wire["klinik"], "clinicA");
    assert_eq!(wire["danismanlar"], serde_json::json!(["cons1"]));
    assert_eq!(wire["durum"], "Beklemede");
}

#[tokio::test]
async fn test_missing_service_blocks_submit_without_writing() {
    let stores = memory_stores();
    let (form, notifier) = filled_form(&stores).await;
    form.cascade().select_service("").await;

    let err = form.submit().await.unwrap_err();

    let SchedulerError::Validation(report) = &err else {
        panic!("expected a validation error, got {err:?}");
    };
    assert_eq!(report.fields(), vec![FormField::Service]);
    assert!(err.user_message().contains("service"));
    assert_eq!(stores.appointments.len().await, 1);
    assert_eq!(notifier.errors().len(), 1);
    assert!(notifier.errors()[0].contains("service"));
}

#[tokio::test]
async fn test_aggregated_message_names_every_missing_field() {
    let stores = memory_stores();
    let (cascade, _) = controller(stores.stores(), SchedulerConfig::default());
    let form = AppointmentForm::create(cascade);

    let report = form.validate().await;
    assert_eq!(
        report.summary(),
        "Please fill in all required fields: clinic, consultant, service, member, date/time"
    );
}

#[tokio::test]
async fn test_service_outside_consultant_offering_is_rejected() {
    let stores = memory_stores();
    let (form, _) = filled_form(&stores).await;
    form.cascade().select_service("svcC").await;

    let report = form.validate().await;
    assert_eq!(report.issues()[0].code, IssueCode::ServiceNotOffered);
    assert!(form.submit().await.is_err());
    assert_eq!(stores.appointments.len().await, 1);
}

#[tokio::test]
async fn test_store_failure_is_notified() {
    let stores = memory_stores();
    let (form, notifier) = filled_form(&stores).await;
    stores.appointments.fail_with("Invalid data: tarih").await;

    let err = form.submit().await.unwrap_err();
    assert!(!err.is_validation());
    assert!(err.is_recoverable());
    assert!(notifier.errors()[0].ends_with("Invalid data: tarih"));
}

#[tokio::test]
async fn test_edit_hydrates_and_updates() {
    let stores = memory_stores();
    let (cascade, notifier) = controller(stores.stores(), SchedulerConfig::default());

    let mut form = AppointmentForm::edit(cascade, "apt1").await.unwrap();
    assert_eq!(form.mode(), &FormMode::Edit { id: "apt1".into() });
    assert_eq!(form.status(), AppointmentStatus::Confirmed);

    let istanbul = FixedOffset::east_opt(3 * 3600).unwrap();
    assert_eq!(form.local_datetime(&istanbul), "2024-03-10T14:30");

    let state = form.cascade().snapshot().await;
    assert_eq!(state.selection().consultants, vec!["cons1"]);
    assert_eq!(state.selection().service.as_deref(), Some("svcB"));
    assert_eq!(state.service_details().unwrap().name, "Çift Terapisi");

    form.set_status(AppointmentStatus::Completed);
    let saved = form.submit().await.unwrap();
    assert_eq!(saved.id.as_deref(), Some("apt1"));
    assert_eq!(saved.status, AppointmentStatus::Completed);
    assert_eq!(stores.appointments.len().await, 1);
    assert_eq!(
        notifier.successes(),
        vec![Messages::default().appointment_updated]
    );
}

#[tokio::test]
async fn test_edit_of_unknown_appointment_fails() {
    let stores = memory_stores();
    let (cascade, notifier) = controller(stores.stores(), SchedulerConfig::default());

    let err = AppointmentForm::edit(cascade, "missing").await.unwrap_err();
    assert!(matches!(err, SchedulerError::NotFound { .. }));
    assert_eq!(
        notifier.errors(),
        vec![Messages::default().appointment_load_failed]
    );
}

#[tokio::test]
async fn test_delete_only_in_edit_mode() {
    let stores = memory_stores();
    let (create_form, _) = filled_form(&stores).await;
    assert!(create_form.delete().await.is_err());

    let (cascade, notifier) = controller(stores.stores(), SchedulerConfig::default());
    let form = AppointmentForm::edit(cascade, "apt1").await.unwrap();
    form.delete().await.unwrap();

    assert!(stores.appointments.is_empty().await);
    assert_eq!(
        notifier.successes(),
        vec![Messages::default().appointment_deleted]
    );
}

#[tokio::test]
async fn test_local_datetime_round_trip_across_offsets() {
    let stores = memory_stores();
    let (cascade, _) = controller(stores.stores(), SchedulerConfig::default());
    let mut form = AppointmentForm::create(cascade);

    for hours in [-11, -5, 0, 3, 9, 14] {
        let tz = FixedOffset::east_opt(hours * 3600).unwrap();
        form.set_local_datetime("2024-03-10T14:30", &tz).unwrap();
        assert_eq!(form.local_datetime(&tz), "2024-03-10T14:30");
    }

    form.set_local_datetime("", &Utc).unwrap();
    assert!(form.scheduled_at().is_none());
    assert_eq!(form.local_datetime(&Utc), "");
}

#[tokio::test]
async fn test_local_datetime_across_new_york_dst() {
    let stores = memory_stores();
    let (cascade, _) = controller(stores.stores(), SchedulerConfig::default());
    let mut form = AppointmentForm::create(cascade);

    form.set_local_datetime("2024-03-10T14:30", &New_York).unwrap();
    assert_eq!(form.local_datetime(&New_York), "2024-03-10T14:30");
    let stored = form.scheduled_at();

    let err = form
        .set_local_datetime("2024-03-10T02:30", &New_York)
        .unwrap_err();
    assert!(matches!(err, SchedulerError::InvalidDateTime { .. }));
    assert_eq!(form.scheduled_at(), stored);

    form.set_local_datetime("2024-11-03T01:30", &New_York).unwrap();
    assert_eq!(
        form.scheduled_at(),
        Some(Utc.with_ymd_and_hms(2024, 11, 3, 5, 30, 0).unwrap())
    );
}

#[tokio::test]
async fn test_default_status_comes_from_config() {
    let stores = memory_stores();
    let config = SchedulerConfig::default().with_default_status(AppointmentStatus::Confirmed);
    let (cascade, _) = controller(stores.stores(), config);
    let form = AppointmentForm::create(cascade);
    assert_eq!(form.status(), AppointmentStatus::Confirmed);
}

#[test]
fn test_display_date_helper() {
    let tz = FixedOffset::east_opt(3 * 3600).unwrap();
    let instant = tz.with_ymd_and_hms(2024, 1, 5, 0, 15, 0).unwrap();
    assert_eq!(format_display_date(&instant.to_rfc3339(), &tz), "05.01.2024");
    assert_eq!(format_display_date("not a date", &tz), "not a date");
}
