/*
 * Responsibility
 * - Router-level middleware (auth, CORS, HTTP plumbing)
 */
pub mod auth;
pub mod cors;
pub mod http;
