//! Clinic → consultant → service cascade.
//!
//! The controller owns the selection and the loaded lists for one form
//! instance. Store calls never run under the state lock: a load is begun
//! (which bumps the stage's request token), the lock is released for the
//! fetch, and the result is applied only if its token is still current.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::derived::{ServiceDetails, derive_service_details};
use super::filters::{consultants_for_clinic, services_for_consultant};
use super::stage::{RequestToken, Resolution, Stage};
use crate::core::{LookupStrategy, SchedulerConfig};
use crate::error::{LoadError, Result};
use crate::normalize::{Identifier, normalize_all, normalize_selected};
use crate::notification::{Notification, Notifier};
use crate::storage::{StoreScope, Stores};
use crate::types::{
    Appointment, Clinic, Consultant, EntityKind, Member, SelectOption, Service, options_from,
};

/// Trigger used by loads that do not depend on another selection.
const UNSCOPED: &str = "*";

fn to_load_outcome<T>(
    entity: EntityKind,
    outcome: Result<Vec<T>>,
) -> std::result::Result<Vec<T>, LoadError> {
    outcome.map_err(|err| LoadError::from_error(entity, &err))
}

/// The four cascade selections, always held as bare identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub clinic: Option<String>,
    pub consultants: Vec<String>,
    pub service: Option<String>,
    pub member: Option<String>,
}

impl Selection {
    /// Normalized selection of a stored appointment.
    pub fn from_appointment(appointment: &Appointment) -> Self {
        Self {
            clinic: normalize_selected(&appointment.clinic),
            consultants: normalize_all(&appointment.consultants)
                .into_iter()
                .filter(|id| !id.is_empty())
                .collect(),
            service: normalize_selected(&appointment.service),
            member: normalize_selected(&appointment.member),
        }
    }

    /// The consultant Stage B loads services for: the only one selected.
    pub fn single_consultant(&self) -> Option<&str> {
        match self.consultants.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }
}

/// Selection plus the loaded lists of one form instance.
#[derive(Debug, Clone, Default)]
pub struct CascadeState {
    selection: Selection,
    clinics: Stage<Clinic>,
    members: Stage<Member>,
    consultants: Stage<Consultant>,
    services: Stage<Service>,
}

impl CascadeState {
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn clinics(&self) -> &Stage<Clinic> {
        &self.clinics
    }

    pub fn members(&self) -> &Stage<Member> {
        &self.members
    }

    pub fn consultants(&self) -> &Stage<Consultant> {
        &self.consultants
    }

    pub fn services(&self) -> &Stage<Service> {
        &self.services
    }

    pub fn clinic_options(&self) -> Vec<SelectOption> {
        options_from(self.clinics.items())
    }

    pub fn member_options(&self) -> Vec<SelectOption> {
        options_from(self.members.items())
    }

    pub fn consultant_options(&self) -> Vec<SelectOption> {
        options_from(self.consultants.items())
    }

    pub fn service_options(&self) -> Vec<SelectOption> {
        options_from(self.services.items())
    }

    /// Attributes of the selected service, absent when the id is not in the
    /// loaded list.
    pub fn service_details(&self) -> Option<ServiceDetails> {
        derive_service_details(self.services.items(), &self.selection.service)
    }

    /// Clears everything below the clinic.
    fn clear_below_clinic(&mut self) {
        self.selection.consultants.clear();
        self.selection.service = None;
        self.services.reset();
    }
}

/// Drives the cascade for one form instance. Clones share state.
#[derive(Clone)]
pub struct CascadeController {
    stores: Stores,
    notifier: Arc<dyn Notifier>,
    config: Arc<SchedulerConfig>,
    state: Arc<RwLock<CascadeState>>,
}

impl std::fmt::Debug for CascadeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CascadeController")
            .field("stores", &self.stores)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CascadeController {
    pub fn new(stores: Stores, notifier: Arc<dyn Notifier>, config: Arc<SchedulerConfig>) -> Self {
        Self {
            stores,
            notifier,
            config,
            state: Arc::new(RwLock::new(CascadeState::default())),
        }
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    pub async fn snapshot(&self) -> CascadeState {
        self.state.read().await.clone()
    }

    pub async fn selection(&self) -> Selection {
        self.state.read().await.selection.clone()
    }

    /// Loads the independent lists a form needs on mount.
    pub async fn mount(&self) {
        futures::join!(self.load_clinics(), self.load_members());
    }

    pub async fn load_clinics(&self) -> Resolution {
        let token = self.state.write().await.clinics.begin(UNSCOPED);
        let outcome = to_load_outcome(EntityKind::Clinic, self.stores.clinics.list().await);
        let failure = outcome.as_ref().err().cloned();

        let resolution = self.state.write().await.clinics.resolve(&token, outcome);
        self.report(EntityKind::Clinic, &token, resolution, failure)
    }

    pub async fn load_members(&self) -> Resolution {
        let token = self.state.write().await.members.begin(UNSCOPED);
        let outcome = to_load_outcome(EntityKind::Member, self.stores.members.list().await);
        let failure = outcome.as_ref().err().cloned();

        let resolution = self.state.write().await.members.resolve(&token, outcome);
        self.report(EntityKind::Member, &token, resolution, failure)
    }

    /// Stage A. An empty value clears everything below the clinic without
    /// fetching.
    pub async fn select_clinic<C>(&self, clinic: &C) -> Resolution
    where
        C: Identifier + ?Sized,
    {
        match self.begin_consultants(clinic, true).await {
            Some(token) => self.fetch_consultants(token, true).await,
            None => Resolution::Cleared,
        }
    }

    /// Stage B. Services load only while exactly one consultant is
    /// selected; any other selection clears the service list.
    pub async fn select_consultants<I>(&self, consultants: I) -> Resolution
    where
        I: IntoIterator,
        I::Item: Identifier,
    {
        let consultants: Vec<String> = normalize_all(consultants)
            .into_iter()
            .filter(|id| !id.is_empty())
            .collect();

        let token = {
            let mut state = self.state.write().await;
            state.selection.consultants = consultants;
            state.selection.service = None;
            Self::begin_services_locked(&mut state)
        };

        match token {
            Some(token) => self.fetch_services(token, true).await,
            None => Resolution::Cleared,
        }
    }

    /// Stage C input. Derived attributes are computed from the loaded list
    /// on demand.
    pub async fn select_service<S>(&self, service: &S) -> Option<ServiceDetails>
    where
        S: Identifier + ?Sized,
    {
        let mut state = self.state.write().await;
        state.selection.service = normalize_selected(service);
        state.service_details()
    }

    pub async fn select_member<M>(&self, member: &M)
    where
        M: Identifier + ?Sized,
    {
        self.state.write().await.selection.member = normalize_selected(member);
    }

    /// Hydrates the cascade with an existing selection: the clinic's
    /// consultants and the first consultant's services are loaded without
    /// clearing the seeded values.
    pub async fn seed(&self, selection: Selection) {
        debug!(?selection, "seeding cascade");
        let first_consultant = selection.consultants.first().cloned();
        let clinic = selection.clinic.clone();
        {
            let mut state = self.state.write().await;
            state.selection = selection;
            state.consultants.reset();
            state.services.reset();
        }

        let consultants = async {
            if let Some(token) = self.begin_consultants_seeded(clinic.as_deref()).await {
                self.fetch_consultants(token, false).await;
            }
        };
        let services = async {
            if let Some(token) = self.begin_services_seeded(first_consultant.as_deref()).await {
                self.fetch_services(token, false).await;
            }
        };
        futures::join!(consultants, services);
    }

    /// Updates the clinic selection and, for a non-empty clinic, starts a
    /// consultant load. With `clear_downstream` the consultant and service
    /// selections are dropped immediately.
    pub async fn begin_consultants<C>(&self, clinic: &C, clear_downstream: bool) -> Option<RequestToken>
    where
        C: Identifier + ?Sized,
    {
        let clinic = normalize_selected(clinic);
        let mut state = self.state.write().await;
        state.selection.clinic = clinic.clone();
        if clear_downstream {
            state.clear_below_clinic();
        }
        match clinic {
            Some(clinic) => {
                debug!(%clinic, "loading consultants");
                Some(state.consultants.begin(clinic))
            }
            None => {
                debug!("clinic cleared");
                state.clear_below_clinic();
                state.consultants.reset();
                None
            }
        }
    }

    /// Applies a consultant load started with [`Self::begin_consultants`].
    /// The fetched list is narrowed to the token's clinic.
    pub async fn complete_consultants(
        &self,
        token: &RequestToken,
        outcome: Result<Vec<Consultant>>,
        clear_downstream: bool,
    ) -> Resolution {
        let outcome = outcome.map(|fetched| consultants_for_clinic(&fetched, token.trigger()));
        let outcome = to_load_outcome(EntityKind::Consultant, outcome);
        let failure = outcome.as_ref().err().cloned();

        let mut state = self.state.write().await;
        let resolution = state.consultants.resolve(token, outcome);
        if resolution == Resolution::Applied && (clear_downstream || failure.is_some()) {
            state.clear_below_clinic();
        }
        drop(state);
        self.report(EntityKind::Consultant, token, resolution, failure)
    }

    /// Starts a service load for the current consultant selection, or clears
    /// the service list when it does not hold exactly one consultant.
    pub async fn begin_services(&self) -> Option<RequestToken> {
        let mut state = self.state.write().await;
        Self::begin_services_locked(&mut state)
    }

    /// Applies a service load started with [`Self::begin_services`].
    /// The fetched list is narrowed to the token's consultant.
    pub async fn complete_services(
        &self,
        token: &RequestToken,
        outcome: Result<Vec<Service>>,
        clear_downstream: bool,
    ) -> Resolution {
        let outcome = outcome.map(|fetched| services_for_consultant(&fetched, token.trigger()));
        let outcome = to_load_outcome(EntityKind::Service, outcome);
        let failure = outcome.as_ref().err().cloned();

        let mut state = self.state.write().await;
        let resolution = state.services.resolve(token, outcome);
        if resolution == Resolution::Applied && (clear_downstream || failure.is_some()) {
            state.selection.service = None;
        }
        drop(state);
        self.report(EntityKind::Service, token, resolution, failure)
    }

    fn begin_services_locked(state: &mut CascadeState) -> Option<RequestToken> {
        match state.selection.single_consultant().map(str::to_string) {
            Some(consultant) => {
                debug!(%consultant, "loading services");
                Some(state.services.begin(consultant))
            }
            None => {
                debug!(
                    selected = state.selection.consultants.len(),
                    "service list cleared"
                );
                state.services.reset();
                None
            }
        }
    }

    async fn begin_consultants_seeded(&self, clinic: Option<&str>) -> Option<RequestToken> {
        let clinic = clinic.filter(|id| !id.is_empty())?;
        Some(self.state.write().await.consultants.begin(clinic))
    }

    async fn begin_services_seeded(&self, consultant: Option<&str>) -> Option<RequestToken> {
        let consultant = consultant.filter(|id| !id.is_empty())?;
        Some(self.state.write().await.services.begin(consultant))
    }

    async fn fetch_consultants(&self, token: RequestToken, clear_downstream: bool) -> Resolution {
        let clinic = token.trigger().to_string();
        let outcome = self.list_consultants(&clinic).await;
        self.complete_consultants(&token, outcome, clear_downstream)
            .await
    }

    async fn fetch_services(&self, token: RequestToken, clear_downstream: bool) -> Resolution {
        let outcome = self.stores.services.list().await;
        self.complete_services(&token, outcome, clear_downstream)
            .await
    }

    /// Scoped when the store can scope. Completion filters locally either
    /// way.
    async fn list_consultants(&self, clinic: &str) -> Result<Vec<Consultant>> {
        let store = &self.stores.consultants;
        match self.config.cascade.consultant_lookup {
            LookupStrategy::PreferScoped => {
                match store.list_scoped(&StoreScope::Clinic(clinic.to_string())).await? {
                    Some(scoped) => Ok(scoped),
                    None => store.list().await,
                }
            }
            LookupStrategy::ClientFilter => store.list().await,
        }
    }

    /// Logs the outcome of a load and notifies applied failures. Stale
    /// results are never surfaced.
    fn report(
        &self,
        entity: EntityKind,
        token: &RequestToken,
        resolution: Resolution,
        failure: Option<LoadError>,
    ) -> Resolution {
        if resolution == Resolution::Stale {
            debug!(%entity, trigger = token.trigger(), "discarding stale result");
            return resolution;
        }

        match failure {
            Some(err) => {
                warn!(%entity, trigger = token.trigger(), error = %err.message, "load failed");
                if self.config.cascade.notify_load_failures {
                    self.notifier
                        .notify(Notification::error(self.load_failed_message(entity)));
                }
            }
            None => info!(%entity, trigger = token.trigger(), "loaded"),
        }
        resolution
    }

    fn load_failed_message(&self, entity: EntityKind) -> String {
        let messages = &self.config.messages;
        match entity {
            EntityKind::Clinic => messages.clinics_load_failed.clone(),
            EntityKind::Consultant => messages.consultants_load_failed.clone(),
            EntityKind::Service => messages.services_load_failed.clone(),
            EntityKind::Member => messages.members_load_failed.clone(),
            EntityKind::Appointment => messages.appointment_load_failed.clone(),
        }
    }
}
