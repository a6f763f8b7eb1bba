//! Repository Layer - Core Traits
//!
//! The CRUD contract every portal table implements.

use async_trait::async_trait;
use crate::domain::{Entity, DomainResult};

/// Core repository trait for CRUD operations
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Insert `entity`. An id of 0 is assigned the next free id.
    async fn create(&self, entity: &T) -> DomainResult<T>;

    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Replace the stored entity; fails with `NotFound` if it is gone.
    async fn update(&self, entity: &T) -> DomainResult<T>;

    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}
