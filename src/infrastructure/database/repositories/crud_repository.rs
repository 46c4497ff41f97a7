//! Generic SeaORM repository
//!
//! Works for any entity, with a single or a composite primary key. Callers
//! get `None`/`false` when a keyed row is missing and decide how to report it.

use std::marker::PhantomData;

use log::debug;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait,
    IdenStatic, IntoActiveModel, Iterable, PrimaryKeyToColumn, PrimaryKeyTrait,
};

use super::db_err;
use crate::domain::DomainResult;

type KeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

pub struct CrudRepository<E> {
    db: DatabaseConnection,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for CrudRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> CrudRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub async fn list(&self) -> DomainResult<Vec<E::Model>> {
        E::find().all(&self.db).await.map_err(db_err)
    }

    pub async fn find_by_id<K>(&self, key: K) -> DomainResult<Option<E::Model>>
    where
        K: Into<KeyOf<E>>,
    {
        E::find_by_id(key).one(&self.db).await.map_err(db_err)
    }

    pub async fn exists<K>(&self, key: K) -> DomainResult<bool>
    where
        K: Into<KeyOf<E>>,
    {
        Ok(self.find_by_id(key).await?.is_some())
    }

    pub async fn insert(&self, model: E::ActiveModel) -> DomainResult<E::Model> {
        debug!("Inserting into {}", E::default().table_name());
        model.insert(&self.db).await.map_err(db_err)
    }

    /// Full-row update. Returns `None` when the row disappeared before the
    /// write landed; any other zero-row outcome is a storage fault.
    pub async fn update<K>(&self, key: K, model: E::ActiveModel) -> DomainResult<Option<E::Model>>
    where
        K: Into<KeyOf<E>>,
    {
        debug!("Updating {}", E::default().table_name());
        if !writes_non_key_columns::<E>(&model) {
            // key-only rows: nothing to write beyond confirming the row exists
            return self.find_by_id(key).await;
        }
        match model.update(&self.db).await {
            Ok(updated) => Ok(Some(updated)),
            Err(e @ (DbErr::RecordNotUpdated | DbErr::RecordNotFound(_))) => {
                if self.exists(key).await? {
                    Err(db_err(e))
                } else {
                    Ok(None)
                }
            }
            Err(e) => Err(db_err(e)),
        }
    }

    /// Returns `false` when no row matched the key.
    pub async fn delete<K>(&self, key: K) -> DomainResult<bool>
    where
        K: Into<KeyOf<E>>,
    {
        debug!("Deleting from {}", E::default().table_name());
        let res = E::delete_by_id(key).exec(&self.db).await.map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }
}

fn writes_non_key_columns<E: EntityTrait>(model: &E::ActiveModel) -> bool {
    E::Column::iter().any(|col| {
        let is_key = E::PrimaryKey::iter().any(|pk| pk.into_column().as_str() == col.as_str());
        !is_key && model.get(col).is_set()
    })
}
