/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Hand the authenticated identity (AuthCtx) to handlers
 * - axum specifics live in core, the type itself in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use self::core::AuthCtxExtractor;
pub use types::AuthCtx;
