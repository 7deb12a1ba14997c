pub mod controller;
pub mod derived;
pub mod filters;
pub mod stage;

pub use controller::{CascadeController, CascadeState, Selection};
pub use derived::{ServiceDetails, derive_service_details};
pub use filters::{consultants_for_clinic, services_for_consultant};
pub use stage::{RequestToken, Resolution, Stage, StageState};
