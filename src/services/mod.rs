/*
 * Responsibility
 * - Process-level services injected through AppState
 */
pub mod auth;
pub mod media;
