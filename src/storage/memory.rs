use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::error::{Result, SchedulerError};
use crate::normalize::{contains_id, normalize};
use crate::storage::{EntityStore, StoreScope, Stores};
use crate::types::{Appointment, Clinic, Consultant, Entity, Member, Service};

/// Whether an entity belongs to a store scope.
pub trait ScopeFilter {
    /// Kinds with no clinic or consultant relation cannot be narrowed.
    const SCOPABLE: bool = true;

    fn in_scope(&self, scope: &StoreScope) -> bool;
}

impl ScopeFilter for Clinic {
    const SCOPABLE: bool = false;

    fn in_scope(&self, _scope: &StoreScope) -> bool {
        false
    }
}

impl ScopeFilter for Member {
    const SCOPABLE: bool = false;

    fn in_scope(&self, _scope: &StoreScope) -> bool {
        false
    }
}

impl ScopeFilter for Consultant {
    fn in_scope(&self, scope: &StoreScope) -> bool {
        match scope {
            StoreScope::Clinic(id) => normalize(&self.clinic).as_deref() == Some(id.as_str()),
            StoreScope::Consultant(id) => &self.id == id,
        }
    }
}

impl ScopeFilter for Service {
    fn in_scope(&self, scope: &StoreScope) -> bool {
        match scope {
            StoreScope::Clinic(id) => contains_id(&self.clinics, id),
            StoreScope::Consultant(id) => contains_id(&self.consultants, id),
        }
    }
}

impl ScopeFilter for Appointment {
    fn in_scope(&self, scope: &StoreScope) -> bool {
        match scope {
            StoreScope::Clinic(id) => normalize(&self.clinic).as_deref() == Some(id.as_str()),
            StoreScope::Consultant(id) => contains_id(&self.consultants, id),
        }
    }
}

/// Insertion-ordered in-memory collection.
#[derive(Debug)]
pub struct MemoryStore<E> {
    entries: Arc<RwLock<Vec<E>>>,
    failure: Arc<RwLock<Option<String>>>,
    latency: Option<Duration>,
    scoped: bool,
}

impl<E: Entity> MemoryStore<E> {
    pub fn new() -> Self {
        Self::with_entries(Vec::new())
    }

    pub fn with_entries(entries: Vec<E>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(entries)),
            failure: Arc::new(RwLock::new(None)),
            latency: None,
            scoped: true,
        }
    }

    /// Every call sleeps this long before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Behave like a collaborator without server-side filtering.
    pub fn without_scoping(mut self) -> Self {
        self.scoped = false;
        self
    }

    /// Make every following call fail with `message` until cleared.
    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write().await = Some(message.into());
    }

    pub async fn clear_failure(&self) {
        *self.failure.write().await = None;
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn snapshot(&self) -> Vec<E> {
        self.entries.read().await.clone()
    }

    async fn gate(&self) -> Result<()> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match self.failure.read().await.as_ref() {
            Some(message) => Err(SchedulerError::load(E::KIND, message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<E: Entity + ScopeFilter> EntityStore<E> for MemoryStore<E> {
    async fn list(&self) -> Result<Vec<E>> {
        self.gate().await?;
        Ok(self.entries.read().await.clone())
    }

    async fn list_scoped(&self, scope: &StoreScope) -> Result<Option<Vec<E>>> {
        if !self.scoped || !E::SCOPABLE {
            return Ok(None);
        }
        self.gate().await?;
        let entries = self.entries.read().await;
        Ok(Some(
            entries.iter().filter(|e| e.in_scope(scope)).cloned().collect(),
        ))
    }

    async fn get(&self, id: &str) -> Result<E> {
        self.gate().await?;
        self.entries
            .read()
            .await
            .iter()
            .find(|e| e.id() == Some(id))
            .cloned()
            .ok_or_else(|| SchedulerError::not_found(E::KIND, id))
    }

    async fn create(&self, mut entity: E) -> Result<E> {
        self.gate().await?;
        if entity.id().is_none_or(str::is_empty) {
            entity.set_id(uuid::Uuid::new_v4().simple().to_string());
        }
        let mut entries = self.entries.write().await;
        if entries.iter().any(|e| e.id() == entity.id()) {
            return Err(SchedulerError::storage(format!(
                "{} {} already exists",
                E::KIND,
                entity.id().unwrap_or_default()
            )));
        }
        entries.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, id: &str, mut entity: E) -> Result<E> {
        self.gate().await?;
        let mut entries = self.entries.write().await;
        let slot = entries
            .iter_mut()
            .find(|e| e.id() == Some(id))
            .ok_or_else(|| SchedulerError::not_found(E::KIND, id))?;
        entity.set_id(id.to_string());
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.gate().await?;
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.id() != Some(id));
        if entries.len() == before {
            return Err(SchedulerError::not_found(E::KIND, id));
        }
        Ok(())
    }
}

impl<E: Entity> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for MemoryStore<E> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            failure: Arc::clone(&self.failure),
            latency: self.latency,
            scoped: self.scoped,
        }
    }
}

/// Memory stores for every collection, handed out both as the concrete
/// stores (for seeding and failure injection) and as a [`Stores`] bundle.
#[derive(Debug, Clone, Default)]
pub struct MemoryStores {
    pub clinics: MemoryStore<Clinic>,
    pub consultants: MemoryStore<Consultant>,
    pub services: MemoryStore<Service>,
    pub members: MemoryStore<Member>,
    pub appointments: MemoryStore<Appointment>,
}

impl MemoryStores {
    pub fn new(
        clinics: Vec<Clinic>,
        consultants: Vec<Consultant>,
        services: Vec<Service>,
        members: Vec<Member>,
        appointments: Vec<Appointment>,
    ) -> Self {
        Self {
            clinics: MemoryStore::with_entries(clinics),
            consultants: MemoryStore::with_entries(consultants),
            services: MemoryStore::with_entries(services),
            members: MemoryStore::with_entries(members),
            appointments: MemoryStore::with_entries(appointments),
        }
    }

    pub fn stores(&self) -> Stores {
        Stores::new(
            Arc::new(self.clinics.clone()),
            Arc::new(self.consultants.clone()),
            Arc::new(self.services.clone()),
            Arc::new(self.members.clone()),
            Arc::new(self.appointments.clone()),
        )
    }
}
