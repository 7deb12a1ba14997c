use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{Appointment, Clinic, Consultant, Entity, Member, Service};

/// Server-side narrowing of a list request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreScope {
    Clinic(String),
    Consultant(String),
}

impl StoreScope {
    /// Query parameter used by REST collaborators.
    pub fn query_pair(&self) -> (&'static str, &str) {
        match self {
            StoreScope::Clinic(id) => ("klinik", id.as_str()),
            StoreScope::Consultant(id) => ("danisman", id.as_str()),
        }
    }
}

/// Remote CRUD endpoints for one entity collection.
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    async fn list(&self) -> Result<Vec<E>>;

    /// Scoped listing. `Ok(None)` means the collaborator cannot scope and the
    /// caller should list everything and filter locally.
    async fn list_scoped(&self, _scope: &StoreScope) -> Result<Option<Vec<E>>> {
        Ok(None)
    }

    async fn get(&self, id: &str) -> Result<E>;

    async fn create(&self, entity: E) -> Result<E>;

    async fn update(&self, id: &str, entity: E) -> Result<E>;

    async fn delete(&self, id: &str) -> Result<()>;
}

/// The five collections the scheduling forms talk to.
#[derive(Clone)]
pub struct Stores {
    pub clinics: Arc<dyn EntityStore<Clinic>>,
    pub consultants: Arc<dyn EntityStore<Consultant>>,
    pub services: Arc<dyn EntityStore<Service>>,
    pub members: Arc<dyn EntityStore<Member>>,
    pub appointments: Arc<dyn EntityStore<Appointment>>,
}

impl Stores {
    pub fn new(
        clinics: Arc<dyn EntityStore<Clinic>>,
        consultants: Arc<dyn EntityStore<Consultant>>,
        services: Arc<dyn EntityStore<Service>>,
        members: Arc<dyn EntityStore<Member>>,
        appointments: Arc<dyn EntityStore<Appointment>>,
    ) -> Self {
        Self {
            clinics,
            consultants,
            services,
            members,
            appointments,
        }
    }

    pub fn with_clinics(mut self, store: Arc<dyn EntityStore<Clinic>>) -> Self {
        self.clinics = store;
        self
    }

    pub fn with_consultants(mut self, store: Arc<dyn EntityStore<Consultant>>) -> Self {
        self.consultants = store;
        self
    }

    pub fn with_services(mut self, store: Arc<dyn EntityStore<Service>>) -> Self {
        self.services = store;
        self
    }

    pub fn with_members(mut self, store: Arc<dyn EntityStore<Member>>) -> Self {
        self.members = store;
        self
    }

    pub fn with_appointments(mut self, store: Arc<dyn EntityStore<Appointment>>) -> Self {
        self.appointments = store;
        self
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}
