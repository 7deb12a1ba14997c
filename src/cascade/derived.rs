use serde::Serialize;

use crate::normalize::Identifier;
use crate::types::{Service, ServiceDuration};

/// Read-only attributes shown next to the selected service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceDetails {
    pub service_id: String,
    pub name: String,
    pub duration: ServiceDuration,
    pub category: Option<String>,
    pub fee: Option<f64>,
}

impl From<&Service> for ServiceDetails {
    fn from(service: &Service) -> Self {
        Self {
            service_id: service.id.clone(),
            name: service.display_name().to_string(),
            duration: service.resolved_duration(),
            category: service.display_category().map(str::to_string),
            fee: service.display_fee(),
        }
    }
}

/// Looks the selected service up in the already loaded list. A miss (the
/// id belongs to a list that has since been replaced) means there is
/// nothing to show.
pub fn derive_service_details<S>(services: &[Service], selected: &S) -> Option<ServiceDetails>
where
    S: Identifier + ?Sized,
{
    let id = selected.normalized_id().filter(|id| !id.is_empty())?;
    if services.is_empty() {
        return None;
    }
    services
        .iter()
        .find(|service| service.id == id)
        .map(ServiceDetails::from)
}
