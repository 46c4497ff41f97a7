//! Generic exists-then-act service over a [`Resource`]

use std::marker::PhantomData;

use sea_orm::DatabaseConnection;
use tracing::info;

use super::resource::{Resource, ResourceKey};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::repositories::CrudRepository;

pub struct CrudService<R: Resource> {
    db: DatabaseConnection,
    repo: CrudRepository<R::Entity>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> CrudService<R> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            repo: CrudRepository::new(db.clone()),
            db,
            _resource: PhantomData,
        }
    }

    fn not_found(key: &R::Key) -> DomainError {
        DomainError::not_found(R::NAME, "id", key.to_path())
    }

    pub async fn list(&self) -> DomainResult<Vec<R::Model>> {
        self.repo.list().await
    }

    pub async fn get(&self, key: R::Key) -> DomainResult<R::Model> {
        self.repo
            .find_by_id(key)
            .await?
            .ok_or_else(|| Self::not_found(&key))
    }

    /// Insert a new row. Body ids of server-keyed resources are ignored;
    /// client-keyed rows must not exist yet.
    pub async fn create(&self, payload: R::Payload) -> DomainResult<R::Model> {
        R::verify_references(&self.db, &payload).await?;

        let key = if <R::Key as ResourceKey>::SERVER_ASSIGNED {
            None
        } else {
            let key = R::payload_key(&payload).ok_or_else(|| {
                DomainError::Validation(format!("{} key is required", R::NAME))
            })?;
            if self.repo.exists(key).await? {
                return Err(DomainError::Conflict(format!(
                    "{} {} already exists",
                    R::NAME,
                    key.to_path()
                )));
            }
            Some(key)
        };

        let created = self.repo.insert(R::into_active_model(payload, key)).await?;
        info!(
            resource = R::NAME,
            key = %R::model_key(&created).to_path(),
            "Created"
        );
        Ok(created)
    }

    /// Replace a row. The key in the body must equal the addressed key.
    pub async fn update(&self, key: R::Key, payload: R::Payload) -> DomainResult<R::Model> {
        if R::payload_key(&payload) != Some(key) {
            return Err(DomainError::Validation(format!(
                "{} key in path ({}) does not match the body",
                R::NAME,
                key.to_path()
            )));
        }
        R::verify_references(&self.db, &payload).await?;

        let updated = self
            .repo
            .update(key, R::into_active_model(payload, Some(key)))
            .await?
            .ok_or_else(|| Self::not_found(&key))?;
        info!(resource = R::NAME, key = %key.to_path(), "Updated");
        Ok(updated)
    }

    pub async fn delete(&self, key: R::Key) -> DomainResult<()> {
        if !self.repo.delete(key).await? {
            return Err(Self::not_found(&key));
        }
        info!(resource = R::NAME, key = %key.to_path(), "Deleted");
        Ok(())
    }
}
