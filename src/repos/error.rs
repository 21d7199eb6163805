/**
 * Responsibility
 * - What a repo reports upward. Handlers turn every variant into a 500.
 */
use thiserror::Error;

use crate::domain::listing::UnknownVariant;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("corrupt row: {0}")]
    Corrupt(#[from] UnknownVariant),
    #[error("store lock poisoned")]
    Poisoned,
}

pub type RepoResult<T> = Result<T, RepoError>;
