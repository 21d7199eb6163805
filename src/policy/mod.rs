/*
 * Responsibility
 * - Object-level authorization (who may touch which resource)
 * - Coarse authentication stays in middleware::auth
 */
pub mod ownership;

pub use ownership::ensure_owner;
