/*
 * Responsibility
 *  - Accept the `{id}` path segment as a typed resource id (UUID)
 *  - A segment that cannot name any resource is reported as 404 for that
 *    resource, the same answer an unknown but well-formed id gets
 */
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::error::AppError;

/// Names the resource in "not found" messages.
pub trait ResourceTag {
    const NAME: &'static str;
}

pub struct ResourceId<T> {
    pub id: Uuid,
    _marker: PhantomData<T>,
}

impl<T> ResourceId<T> {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for ResourceId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ResourceId<T> {}

impl<T: ResourceTag> ResourceId<T> {
    fn parse(raw: &str) -> Result<Self, AppError> {
        Uuid::parse_str(raw)
            .map(Self::new)
            .map_err(|_| AppError::not_found(T::NAME))
    }
}

impl<T, S> FromRequestParts<S> for ResourceId<T>
where
    T: ResourceTag + Send + Sync,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found(T::NAME))?;
        Self::parse(&raw)
    }
}

impl<T> std::fmt::Debug for ResourceId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceId").field("id", &self.id).finish()
    }
}
