//! Clinic and consultant filters of the appointment list page.

use serde::{Deserialize, Serialize};

use crate::normalize::{Identifier, normalize, normalize_all, normalize_selected};
use crate::types::Appointment;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentFilter {
    pub clinic: Option<String>,
    pub consultants: Vec<String>,
}

impl AppointmentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clinic<C: Identifier + ?Sized>(mut self, clinic: &C) -> Self {
        self.clinic = normalize_selected(clinic);
        self
    }

    pub fn with_consultants<I>(mut self, consultants: I) -> Self
    where
        I: IntoIterator,
        I::Item: Identifier,
    {
        self.consultants = normalize_all(consultants)
            .into_iter()
            .filter(|id| !id.is_empty())
            .collect();
        self
    }

    pub fn is_active(&self) -> bool {
        self.clinic.is_some() || !self.consultants.is_empty()
    }

    pub fn clear(&mut self) {
        self.clinic = None;
        self.consultants.clear();
    }

    /// Whether `appointment` passes both filters. An unset filter passes
    /// everything; the consultant filter needs one shared consultant.
    pub fn matches(&self, appointment: &Appointment) -> bool {
        if let Some(clinic) = &self.clinic
            && normalize(&appointment.clinic).as_ref() != Some(clinic)
        {
            return false;
        }
        if self.consultants.is_empty() {
            return true;
        }
        normalize_all(&appointment.consultants)
            .iter()
            .any(|id| self.consultants.contains(id))
    }

    /// Appointments passing the filter, in their original order.
    pub fn apply<'a>(&self, appointments: &'a [Appointment]) -> Vec<&'a Appointment> {
        appointments.iter().filter(|a| self.matches(a)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityRef;

    fn appointment(clinic: &str, consultants: &[&str]) -> Appointment {
        Appointment {
            clinic: Some(EntityRef::embedded(clinic)),
            consultants: consultants.iter().map(|c| EntityRef::id(*c)).collect(),
            ..Appointment::default()
        }
    }

    #[test]
    fn inactive_filter_keeps_everything() {
        let list = vec![appointment("k1", &["c1"]), appointment("k2", &[])];
        let filter = AppointmentFilter::new();
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&list).len(), 2);
    }

    #[test]
    fn clinic_and_consultant_filters_combine() {
        let list = vec![
            appointment("k1", &["c1"]),
            appointment("k1", &["c2", "c3"]),
            appointment("k2", &["c3"]),
        ];
        let filter = AppointmentFilter::new()
            .with_clinic("k1")
            .with_consultants(["c3", "c9"]);
        let hits = filter.apply(&list);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].consultants.len(), 2);
    }

    #[test]
    fn clear_resets_both_filters() {
        let mut filter = AppointmentFilter::new().with_clinic("k1").with_consultants(["c1"]);
        filter.clear();
        assert_eq!(filter, AppointmentFilter::default());
    }
}
