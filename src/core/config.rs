use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::error::{Result, SchedulerError};
use crate::types::AppointmentStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub cascade: CascadeConfig,
    pub form: FormConfig,
    pub messages: Messages,
    pub rest: RestConfig,
}

/// How consultants for a clinic are fetched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LookupStrategy {
    /// Always list the whole collection and filter locally.
    ClientFilter,
    /// Ask the store for a clinic-scoped list first; fall back to the whole
    /// collection when the store cannot scope. Results are filtered locally
    /// either way.
    PreferScoped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeConfig {
    pub consultant_lookup: LookupStrategy,
    pub notify_load_failures: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub default_status: AppointmentStatus,
    /// Reject reference fields that are not 24-hex object ids at submit.
    pub require_object_ids: bool,
}

/// Every user-facing string the engine produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub clinics_load_failed: String,
    pub consultants_load_failed: String,
    pub services_load_failed: String,
    pub members_load_failed: String,
    pub appointment_load_failed: String,
    pub appointment_created: String,
    pub appointment_updated: String,
    pub appointment_deleted: String,
    pub appointment_save_failed: String,
    pub appointment_delete_failed: String,
    pub required_fields_missing: String,
    pub invalid_object_id: String,
    pub multi_select_placeholder: String,
    pub multi_select_no_options: String,
    pub multi_select_select_all: String,
    pub multi_select_clear: String,
    pub multi_select_search: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RestConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Sent as a bearer token when present. Obtaining it is the host's job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            cascade: CascadeConfig::default(),
            form: FormConfig::default(),
            messages: Messages::default(),
            rest: RestConfig::default(),
        }
    }
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            consultant_lookup: LookupStrategy::PreferScoped,
            notify_load_failures: true,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_status: AppointmentStatus::Pending,
            require_object_ids: false,
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            clinics_load_failed: "An error occurred while loading clinics.".to_string(),
            consultants_load_failed: "An error occurred while loading consultants.".to_string(),
            services_load_failed:
                "An error occurred while loading the consultant's services.".to_string(),
            members_load_failed: "An error occurred while loading members.".to_string(),
            appointment_load_failed: "Appointment details could not be loaded.".to_string(),
            appointment_created: "Appointment created successfully.".to_string(),
            appointment_updated: "Appointment updated successfully.".to_string(),
            appointment_deleted: "Appointment deleted successfully.".to_string(),
            appointment_save_failed: "The appointment could not be saved.".to_string(),
            appointment_delete_failed: "The appointment could not be deleted.".to_string(),
            required_fields_missing: "Please fill in all required fields".to_string(),
            invalid_object_id: "is not a valid identifier".to_string(),
            multi_select_placeholder: "Select...".to_string(),
            multi_select_no_options: "No results found".to_string(),
            multi_select_select_all: "Select all".to_string(),
            multi_select_clear: "Clear".to_string(),
            multi_select_search: "Search...".to_string(),
        }
    }
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5005/api/".to_string(),
            timeout: Duration::from_secs(30),
            bearer_token: None,
        }
    }
}

impl SchedulerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn with_cascade_config(mut self, cascade: CascadeConfig) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn with_form_config(mut self, form: FormConfig) -> Self {
        self.form = form;
        self
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_rest_config(mut self, rest: RestConfig) -> Self {
        self.rest = rest;
        self
    }

    pub fn with_consultant_lookup(mut self, strategy: LookupStrategy) -> Self {
        self.cascade.consultant_lookup = strategy;
        self
    }

    pub fn with_default_status(mut self, status: AppointmentStatus) -> Self {
        self.form.default_status = status;
        self
    }

    pub fn with_strict_ids(mut self, enabled: bool) -> Self {
        self.form.require_object_ids = enabled;
        self
    }

    /// Checks values that would otherwise only fail at the first request.
    pub fn validate(&self) -> Result<()> {
        if self.rest.timeout.is_zero() {
            return Err(SchedulerError::configuration("REST timeout cannot be zero"));
        }
        self.rest.parsed_base_url()?;
        Ok(())
    }
}

impl RestConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        let rest = Self {
            base_url: base_url.to_string(),
            ..Default::default()
        };
        rest.parsed_base_url()?;
        Ok(rest)
    }

    /// Base URL with a trailing slash so joined collection paths land under
    /// the api prefix.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        if url.cannot_be_a_base() {
            return Err(SchedulerError::configuration(format!(
                "REST base URL cannot be used as a base: {}",
                self.base_url
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// `{base}/{collection}` or `{base}/{collection}/{id}`.
    pub fn endpoint(&self, collection: &str, id: Option<&str>) -> Result<Url> {
        let base = self.parsed_base_url()?;
        let url = match id {
            Some(id) => base.join(&format!("{collection}/{id}"))?,
            None => base.join(collection)?,
        };
        Ok(url)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Production builds talk to the relative `/api` prefix behind the same
    /// origin.
    pub fn same_origin(origin: &str) -> Result<Self> {
        Self::new(&format!("{}/api/", origin.trim_end_matches('/')))
    }
}

impl CascadeConfig {
    pub fn client_filter_only() -> Self {
        Self {
            consultant_lookup: LookupStrategy::ClientFilter,
            notify_load_failures: true,
        }
    }

    pub fn quiet() -> Self {
        Self {
            notify_load_failures: false,
            ..Default::default()
        }
    }
}
