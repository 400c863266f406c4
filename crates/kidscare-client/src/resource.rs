//! Generic CRUD client for record endpoints.

use std::fmt;
use std::marker::PhantomData;

use tracing::info;
use validator::Validate;

use kidscare_core::error::AppError;
use kidscare_core::result::AppResult;
use kidscare_entity::Resource;

use crate::http::ApiClient;

/// `get_all`/`get_by_id`/`create`/`update`/`delete` over `E::ENDPOINT`.
pub struct ResourceApi<E> {
    client: ApiClient,
    _resource: PhantomData<fn() -> E>,
}

impl<E: Resource> ResourceApi<E> {
    /// Create the API over a shared client.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    /// Every record.
    pub async fn get_all(&self) -> AppResult<Vec<E>> {
        self.client.get(&format!("{}/", E::ENDPOINT)).await
    }

    /// One record.
    pub async fn get_by_id(&self, id: i64) -> AppResult<E> {
        self.client.get(&format!("{}/{id}", E::ENDPOINT)).await
    }

    /// Create a record.
    pub async fn create(&self, payload: &E::Create) -> AppResult<E> {
        check(payload)?;
        let created: E = self.client.post(&format!("{}/", E::ENDPOINT), payload).await?;
        info!(resource = E::LABEL, id = created.id(), "Created record");
        Ok(created)
    }

    /// Update a record.
    pub async fn update(&self, id: i64, payload: &E::Update) -> AppResult<E> {
        check(payload)?;
        let updated = self
            .client
            .put(&format!("{}/{id}", E::ENDPOINT), payload)
            .await?;
        info!(resource = E::LABEL, id, "Updated record");
        Ok(updated)
    }

    /// Delete a record. Returns the server's message when it sends one.
    pub async fn delete(&self, id: i64) -> AppResult<Option<String>> {
        let detail = self.client.delete(&format!("{}/{id}", E::ENDPOINT)).await?;
        info!(resource = E::LABEL, id, "Deleted record");
        Ok(detail)
    }
}

impl<E> Clone for ResourceApi<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _resource: PhantomData,
        }
    }
}

impl<E: Resource> fmt::Debug for ResourceApi<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceApi")
            .field("endpoint", &E::ENDPOINT)
            .finish()
    }
}

fn check<T: Validate>(payload: &T) -> AppResult<()> {
    payload
        .validate()
        .map_err(|e| AppError::validation(format!("Missing or invalid fields: {e}")))
}
