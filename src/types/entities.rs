//! Entities the scheduling forms read, with the backend's JSON field names.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::lenient;
use super::option::SelectOption;
use super::reference::EntityRef;
use super::status::AppointmentStatus;

/// Kind of entity served by the reference store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Clinic,
    Consultant,
    Service,
    Member,
    Appointment,
}

impl EntityKind {
    /// REST collection segment.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Clinic => "clinics",
            EntityKind::Consultant => "consultants",
            EntityKind::Service => "services",
            EntityKind::Member => "members",
            EntityKind::Appointment => "appointments",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Clinic => "clinic",
            EntityKind::Consultant => "consultant",
            EntityKind::Service => "service",
            EntityKind::Member => "member",
            EntityKind::Appointment => "appointment",
        };
        f.write_str(name)
    }
}

/// Common surface for everything the store hands out.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    const KIND: EntityKind;

    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: String);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clinic {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "ad", default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consultant {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "ad", default)]
    pub first_name: String,
    #[serde(rename = "soyad", default)]
    pub last_name: String,
    #[serde(rename = "uzmanlik", default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(rename = "klinik", default, skip_serializing_if = "Option::is_none")]
    pub clinic: Option<EntityRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "hizmet_adi", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "ad", default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(
        rename = "hizmet_kategorisi",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(rename = "kategori", default, skip_serializing_if = "Option::is_none")]
    pub legacy_category: Option<String>,
    #[serde(
        rename = "ucret",
        default,
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub fee: Option<f64>,
    #[serde(
        rename = "fiyat",
        default,
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub legacy_fee: Option<f64>,
    #[serde(
        rename = "sure",
        default,
        deserialize_with = "lenient::duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<DurationField>,
    #[serde(rename = "klinikler", default, deserialize_with = "lenient::reference_list")]
    pub clinics: Vec<EntityRef>,
    #[serde(rename = "danismanlar", default, deserialize_with = "lenient::reference_list")]
    pub consultants: Vec<EntityRef>,
}

/// Duration as stored on a service: either `{saat, dakika}` or a bare
/// number of minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationField {
    Parts {
        #[serde(
            rename = "saat",
            default,
            deserialize_with = "lenient::count",
            skip_serializing_if = "Option::is_none"
        )]
        hours: Option<u32>,
        #[serde(
            rename = "dakika",
            default,
            deserialize_with = "lenient::count",
            skip_serializing_if = "Option::is_none"
        )]
        minutes: Option<u32>,
    },
    Minutes(u32),
    Text(String),
}

/// Hours/minutes pair shown next to the selected service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceDuration {
    pub hours: u32,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "ad", default)]
    pub first_name: String,
    #[serde(rename = "soyad", default)]
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "klinik", default, skip_serializing_if = "Option::is_none")]
    pub clinic: Option<EntityRef>,
    #[serde(rename = "danismanlar", default, deserialize_with = "lenient::reference_list")]
    pub consultants: Vec<EntityRef>,
    #[serde(rename = "hizmet", default, skip_serializing_if = "Option::is_none")]
    pub service: Option<EntityRef>,
    #[serde(rename = "uye", default, skip_serializing_if = "Option::is_none")]
    pub member: Option<EntityRef>,
    #[serde(
        rename = "tarih",
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(rename = "durum", default)]
    pub status: AppointmentStatus,
}

/// What the form shell writes: every reference is a bare identifier and the
/// consultant field stays an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentPayload {
    #[serde(rename = "klinik")]
    pub clinic: String,
    #[serde(rename = "danismanlar")]
    pub consultants: Vec<String>,
    #[serde(rename = "hizmet")]
    pub service: String,
    #[serde(rename = "uye")]
    pub member: String,
    #[serde(rename = "tarih")]
    pub scheduled_at: DateTime<Utc>,
    #[serde(rename = "durum")]
    pub status: AppointmentStatus,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => DateTime::parse_from_rfc3339(value)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom),
    }
}

fn full_name(first: &str, last: &str) -> String {
    format!("{first} {last}").trim().to_string()
}

impl Consultant {
    pub fn display_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

impl Member {
    pub fn display_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

impl Service {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.short_name.as_deref())
            .unwrap_or(&self.id)
    }

    pub fn display_category(&self) -> Option<&str> {
        self.category.as_deref().or(self.legacy_category.as_deref())
    }

    pub fn display_fee(&self) -> Option<f64> {
        self.fee.or(self.legacy_fee)
    }

    /// Missing substructure counts as zero.
    pub fn resolved_duration(&self) -> ServiceDuration {
        match &self.duration {
            Some(DurationField::Parts { hours, minutes }) => ServiceDuration {
                hours: hours.unwrap_or(0),
                minutes: minutes.unwrap_or(0),
            },
            Some(DurationField::Minutes(total)) => ServiceDuration::from_minutes(*total),
            Some(DurationField::Text(text)) => text
                .trim()
                .parse::<u32>()
                .map(ServiceDuration::from_minutes)
                .unwrap_or_default(),
            None => ServiceDuration::default(),
        }
    }
}

impl ServiceDuration {
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self { hours, minutes }
    }

    pub fn from_minutes(total: u32) -> Self {
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }

    pub fn total_minutes(&self) -> u32 {
        self.hours * 60 + self.minutes
    }
}

impl fmt::Display for ServiceDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

impl From<AppointmentPayload> for Appointment {
    fn from(payload: AppointmentPayload) -> Self {
        Self {
            id: None,
            clinic: Some(EntityRef::Id(payload.clinic)),
            consultants: payload.consultants.into_iter().map(EntityRef::Id).collect(),
            service: Some(EntityRef::Id(payload.service)),
            member: Some(EntityRef::Id(payload.member)),
            scheduled_at: Some(payload.scheduled_at),
            status: payload.status,
        }
    }
}

macro_rules! keyed_entity {
    ($ty:ty, $kind:expr) => {
        impl Entity for $ty {
            const KIND: EntityKind = $kind;

            fn id(&self) -> Option<&str> {
                Some(&self.id)
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        }
    };
}

keyed_entity!(Clinic, EntityKind::Clinic);
keyed_entity!(Consultant, EntityKind::Consultant);
keyed_entity!(Service, EntityKind::Service);
keyed_entity!(Member, EntityKind::Member);

impl Entity for Appointment {
    const KIND: EntityKind = EntityKind::Appointment;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

impl From<&Clinic> for SelectOption {
    fn from(clinic: &Clinic) -> Self {
        SelectOption::new(&clinic.id, &clinic.name)
    }
}

impl From<&Consultant> for SelectOption {
    fn from(consultant: &Consultant) -> Self {
        SelectOption::new(&consultant.id, consultant.display_name())
    }
}

impl From<&Service> for SelectOption {
    fn from(service: &Service) -> Self {
        SelectOption::new(&service.id, service.display_name())
    }
}

impl From<&Member> for SelectOption {
    fn from(member: &Member) -> Self {
        SelectOption::new(&member.id, member.display_name())
    }
}
