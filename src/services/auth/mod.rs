pub mod access_jwt;
pub mod factory;

pub use access_jwt::{AccessJwtError, AccessTokenClaims, AuthService, VerifiedAccessToken};
pub use factory::build_auth_service;
