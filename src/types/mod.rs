pub mod entities;
mod lenient;
pub mod option;
pub mod reference;
pub mod status;

pub use entities::{
    Appointment, AppointmentPayload, Clinic, Consultant, DurationField, Entity, EntityKind,
    Member, Service, ServiceDuration,
};
pub use option::{SelectOption, options_from};
pub use reference::{EmbeddedRef, EntityRef};
pub use status::{AppointmentStatus, BadgeVariant};
