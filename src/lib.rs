//! # Clinic Scheduler
//!
//! The selection engine behind appointment forms of a multi-clinic
//! scheduling console: picking a clinic narrows the consultants, picking a
//! consultant narrows the services, and the picked service shows its
//! duration, fee and category.
//!
//! ## Features
//!
//! - **Cascade**: clinic → consultant → service loads where a superseded
//!   response is discarded instead of overwriting a newer one
//! - **Normalization**: references arrive as bare ids or embedded documents
//!   and are compared only after collapsing to the bare id
//! - **MultiSelect**: searchable multi-value select with a caller-owned
//!   selection
//! - **Form shell**: aggregated submit validation and a timezone-safe
//!   date/time round trip
//! - **Stores**: async CRUD collaborators, in memory or over REST
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clinic_scheduler::*;
//! use std::sync::Arc;
//!
//! # async fn schedule(stores: Stores) -> Result<()> {
//! let config = Arc::new(SchedulerConfig::default());
//! let cascade = CascadeController::new(stores, Arc::new(TracingNotifier), config);
//!
//! let mut form = AppointmentForm::create(cascade.clone());
//! form.mount().await;
//! cascade.select_clinic("clinicA").await;
//! cascade.select_consultants(["cons1"]).await;
//! cascade.select_service("svcA").await;
//! cascade.select_member("m1").await;
//! form.set_local_datetime("2024-03-10T14:30", &chrono::Utc)?;
//! form.submit().await?;
//! # Ok(())
//! # }
//! ```

pub mod cascade;
pub mod core;
pub mod error;
pub mod form;
pub mod listing;
pub mod normalize;
pub mod notification;
pub mod storage;
pub mod types;
pub mod validation;
pub mod widget;

pub use cascade::{
    CascadeController, CascadeState, RequestToken, Resolution, Selection, ServiceDetails, Stage,
    StageState,
};
pub use crate::core::{
    CascadeConfig, FormConfig, LookupStrategy, Messages, RestConfig, SchedulerConfig,
};
pub use error::Result; // Our Result type takes precedence
pub use error::{LoadError, SchedulerError};
pub use form::{AppointmentForm, FormMode, format_display_date};
pub use listing::AppointmentFilter;
pub use normalize::{Identifier, normalize, normalize_all};
pub use notification::{Notification, NotificationLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use storage::*;
pub use types::*;
pub use validation::{FormField, IssueCode, ValidationIssue, ValidationReport};
pub use widget::{MultiSelect, PointerTarget, SelectedTag};
