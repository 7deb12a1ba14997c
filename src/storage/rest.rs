//! REST collaborator backed by `reqwest`.
//!
//! Collections live at `{base}/{collection}` and single documents at
//! `{base}/{collection}/{id}`. Bodies are either the bare JSON payload or a
//! `{"data": ...}` envelope.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

use crate::core::RestConfig;
use crate::error::{Result, SchedulerError};
use crate::storage::api_error::{format_api_error, format_transport_error};
use crate::storage::{EntityStore, StoreScope};
use crate::types::Entity;

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

pub struct RestStore<E> {
    client: Client,
    config: RestConfig,
    scoped_queries: bool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> RestStore<E> {
    pub fn new(config: RestConfig) -> Result<Self> {
        config.parsed_base_url()?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            config,
            scoped_queries: false,
            _entity: PhantomData,
        })
    }

    /// The backend understands `?klinik=`/`?danisman=` filters on this
    /// collection.
    pub fn with_scoped_queries(mut self, enabled: bool) -> Self {
        self.scoped_queries = enabled;
        self
    }

    fn request(&self, method: Method, id: Option<&str>) -> Result<RequestBuilder> {
        let url = self.config.endpoint(E::KIND.collection(), id)?;
        let mut builder = self.client.request(method, url);
        if let Some(token) = &self.config.bearer_token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|err| {
            tracing::warn!(entity = %E::KIND, error = %err, "request failed before a response");
            SchedulerError::load(E::KIND, format_transport_error(""))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = format_api_error(status.as_u16(), &body);
        tracing::warn!(entity = %E::KIND, status = status.as_u16(), "{message}");
        Err(SchedulerError::load(E::KIND, message))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await?;
        let envelope: Envelope<T> = serde_json::from_slice(&bytes)?;
        Ok(envelope.into_inner())
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for RestStore<E> {
    async fn list(&self) -> Result<Vec<E>> {
        let response = self.send(self.request(Method::GET, None)?).await?;
        Self::decode(response).await
    }

    async fn list_scoped(&self, scope: &StoreScope) -> Result<Option<Vec<E>>> {
        if !self.scoped_queries {
            return Ok(None);
        }
        let (key, value) = scope.query_pair();
        let builder = self.request(Method::GET, None)?.query(&[(key, value)]);
        let response = self.send(builder).await?;
        Ok(Some(Self::decode(response).await?))
    }

    async fn get(&self, id: &str) -> Result<E> {
        let response = self.send(self.request(Method::GET, Some(id))?).await?;
        Self::decode(response).await
    }

    async fn create(&self, entity: E) -> Result<E> {
        let builder = self.request(Method::POST, None)?.json(&entity);
        let response = self.send(builder).await?;
        Self::decode(response).await
    }

    async fn update(&self, id: &str, entity: E) -> Result<E> {
        let builder = self.request(Method::PUT, Some(id))?.json(&entity);
        let response = self.send(builder).await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, Some(id))?).await?;
        Ok(())
    }
}

impl<E> std::fmt::Debug for RestStore<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStore")
            .field("base_url", &self.config.base_url)
            .field("scoped_queries", &self.scoped_queries)
            .finish_non_exhaustive()
    }
}
