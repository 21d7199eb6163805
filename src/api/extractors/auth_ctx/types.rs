/*
 * Responsibility
 * - The "authenticated context" type handlers see
 * - The middleware verifies the token and stores it in request extensions;
 *   handlers only ever receive this type
 *
 * Notes
 * - Token verification lives in middleware/services
 * - Resource ownership (BOLA) is checked separately in the policy layer
 */

use uuid::Uuid;

/// Context attached to an authenticated request.
///
/// - `user_id` is the identity from the verified token
/// - `issued_at` is kept for log correlation only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_id: Uuid,
    pub issued_at: Option<u64>,
}

impl AuthCtx {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            issued_at: None,
        }
    }
}
