//! Client-side narrowing of loaded collections.
//!
//! Identifiers are compared as normalized strings; a reference that came in
//! embedded matches the same id given bare.

use crate::normalize::{Identifier, contains_id, normalize};
use crate::types::{Consultant, Service};

/// Consultants whose clinic reference names `clinic`.
pub fn consultants_for_clinic<C>(consultants: &[Consultant], clinic: &C) -> Vec<Consultant>
where
    C: Identifier + ?Sized,
{
    let Some(clinic) = clinic.normalized_id() else {
        return Vec::new();
    };
    consultants
        .iter()
        .filter(|c| normalize(&c.clinic).as_deref() == Some(clinic.as_str()))
        .cloned()
        .collect()
}

/// Services whose consultant set contains `consultant`.
pub fn services_for_consultant<C>(services: &[Service], consultant: &C) -> Vec<Service>
where
    C: Identifier + ?Sized,
{
    let Some(consultant) = consultant.normalized_id() else {
        return Vec::new();
    };
    services
        .iter()
        .filter(|s| contains_id(&s.consultants, &consultant))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityRef;
    use serde_json::json;

    fn service(id: &str, consultants: Vec<EntityRef>) -> Service {
        Service {
            id: id.to_string(),
            name: Some(id.to_uppercase()),
            short_name: None,
            category: None,
            legacy_category: None,
            fee: None,
            legacy_fee: None,
            duration: None,
            clinics: Vec::new(),
            consultants,
        }
    }

    #[test]
    fn consultant_lookup_ignores_representation() {
        let services = vec![
            service("s1", vec![EntityRef::embedded("c1"), EntityRef::id("c2")]),
            service("s2", vec![EntityRef::id("c2")]),
        ];

        let bare = services_for_consultant(&services, "c1");
        let embedded = services_for_consultant(
            &services,
            &EntityRef::embedded_with("c1", [("ad", json!("X"))]),
        );

        assert_eq!(bare.len(), 1);
        assert_eq!(bare, embedded);
        assert_eq!(bare[0].id, "s1");
    }

    #[test]
    fn consultants_without_clinic_are_excluded() {
        let consultants = vec![
            Consultant {
                id: "c1".into(),
                first_name: "Ayşe".into(),
                last_name: "Yılmaz".into(),
                specialty: None,
                clinic: Some(EntityRef::embedded("k1")),
            },
            Consultant {
                id: "c2".into(),
                first_name: "Mehmet".into(),
                last_name: "Kaya".into(),
                specialty: None,
                clinic: None,
            },
        ];
        let hits = consultants_for_clinic(&consultants, "k1");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "c1");
    }
}
