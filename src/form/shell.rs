use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;
use tracing::{info, warn};

use super::datetime::{instant_to_local, local_to_instant};
use crate::cascade::{CascadeController, CascadeState, Selection};
use crate::error::{Result, SchedulerError};
use crate::notification::Notification;
use crate::types::{Appointment, AppointmentPayload, AppointmentStatus, EntityKind};
use crate::validation::{SubmissionDraft, SubmissionValidator, ValidationReport};

/// Whether the form writes a new appointment or updates a stored one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// Binds the cascade to the remaining appointment fields and exposes the
/// single submit operation.
#[derive(Debug)]
pub struct AppointmentForm {
    mode: FormMode,
    cascade: CascadeController,
    validator: SubmissionValidator,
    scheduled_at: Option<DateTime<Utc>>,
    status: AppointmentStatus,
}

impl AppointmentForm {
    /// An empty form for a new appointment. Call [`Self::mount`] to load the
    /// clinic and member lists.
    pub fn create(cascade: CascadeController) -> Self {
        let config = cascade.config();
        let validator = SubmissionValidator::new(&config.form, &config.messages);
        let status = config.form.default_status;
        Self {
            mode: FormMode::Create,
            cascade,
            validator,
            scheduled_at: None,
            status,
        }
    }

    /// Loads appointment `id` and hydrates the form with it. The seeded
    /// selections are kept while the dependent lists load.
    pub async fn edit(cascade: CascadeController, id: &str) -> Result<Self> {
        let appointment = match cascade.stores().appointments.get(id).await {
            Ok(appointment) => appointment,
            Err(err) => {
                warn!(%id, error = %err, "appointment could not be loaded");
                cascade.notifier().notify(Notification::error(
                    cascade.config().messages.appointment_load_failed.clone(),
                ));
                return Err(err);
            }
        };

        let mut form = Self::create(cascade);
        form.mode = FormMode::Edit { id: id.to_string() };
        form.scheduled_at = appointment.scheduled_at;
        form.status = appointment.status;

        let selection = Selection::from_appointment(&appointment);
        futures::join!(form.cascade.mount(), form.cascade.seed(selection));
        Ok(form)
    }

    pub async fn mount(&self) {
        self.cascade.mount().await;
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn cascade(&self) -> &CascadeController {
        &self.cascade
    }

    pub fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        self.scheduled_at
    }

    pub fn set_scheduled_at(&mut self, scheduled_at: Option<DateTime<Utc>>) {
        self.scheduled_at = scheduled_at;
    }

    /// Takes the input control's value, interpreted in `tz`. An empty value
    /// clears the field.
    pub fn set_local_datetime<Tz: TimeZone>(&mut self, input: &str, tz: &Tz) -> Result<()> {
        if input.trim().is_empty() {
            self.scheduled_at = None;
            return Ok(());
        }
        self.scheduled_at = Some(local_to_instant(input, tz)?);
        Ok(())
    }

    /// The input control's value in `tz`, empty when unset.
    pub fn local_datetime<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.scheduled_at
            .map(|instant| instant_to_local(&instant, tz))
            .unwrap_or_default()
    }

    pub fn status(&self) -> AppointmentStatus {
        self.status
    }

    pub fn set_status(&mut self, status: AppointmentStatus) {
        self.status = status;
    }

    /// Current submit preconditions without writing anything.
    pub async fn validate(&self) -> ValidationReport {
        self.check(&self.cascade.snapshot().await)
    }

    /// Validates and writes the appointment. Nothing is written when a
    /// precondition fails; the aggregated message is notified instead.
    pub async fn submit(&self) -> Result<Appointment> {
        let state = self.cascade.snapshot().await;
        let report = self.check(&state);
        let payload = match self.payload(&report, state.selection()) {
            Some(payload) => payload,
            None => {
                warn!(fields = ?report.fields(), "submit rejected");
                self.notify(Notification::error(report.summary()));
                return Err(SchedulerError::Validation(report));
            }
        };

        let store = &self.cascade.stores().appointments;
        let messages = &self.cascade.config().messages;
        let written = match &self.mode {
            FormMode::Create => store.create(Appointment::from(payload)).await,
            FormMode::Edit { id } => store.update(id, Appointment::from(payload)).await,
        };

        match written {
            Ok(appointment) => {
                info!(id = ?appointment.id, mode = ?self.mode, "appointment saved");
                let message = match self.mode {
                    FormMode::Create => &messages.appointment_created,
                    FormMode::Edit { .. } => &messages.appointment_updated,
                };
                self.notify(Notification::success(message.clone()));
                Ok(appointment)
            }
            Err(err) => {
                warn!(error = %err, "appointment could not be saved");
                self.notify(Notification::error(format!(
                    "{} {}",
                    messages.appointment_save_failed,
                    err.user_message()
                )));
                Err(err)
            }
        }
    }

    /// Deletes the stored appointment. Only available while editing.
    pub async fn delete(&self) -> Result<()> {
        let FormMode::Edit { id } = &self.mode else {
            return Err(SchedulerError::not_found(EntityKind::Appointment, "<unsaved>"));
        };

        let messages = &self.cascade.config().messages;
        match self.cascade.stores().appointments.delete(id).await {
            Ok(()) => {
                info!(%id, "appointment deleted");
                self.notify(Notification::success(messages.appointment_deleted.clone()));
                Ok(())
            }
            Err(err) => {
                warn!(%id, error = %err, "appointment could not be deleted");
                self.notify(Notification::error(format!(
                    "{} {}",
                    messages.appointment_delete_failed,
                    err.user_message()
                )));
                Err(err)
            }
        }
    }

    fn check(&self, state: &CascadeState) -> ValidationReport {
        let offered = state
            .services()
            .is_ready()
            .then(|| state.services().items());
        self.validator.validate(&SubmissionDraft {
            selection: state.selection(),
            scheduled_at: self.scheduled_at,
            offered_services: offered,
        })
    }

    /// The write payload, or `None` while `report` has issues.
    fn payload(&self, report: &ValidationReport, selection: &Selection) -> Option<AppointmentPayload> {
        if !report.is_valid() {
            return None;
        }
        Some(AppointmentPayload {
            clinic: selection.clinic.clone()?,
            consultants: selection.consultants.clone(),
            service: selection.service.clone()?,
            member: selection.member.clone()?,
            scheduled_at: self.scheduled_at?,
            status: self.status,
        })
    }

    fn notify(&self, notification: Notification) {
        self.cascade.notifier().notify(notification);
    }
}
