use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::{error::Error as StdError, fmt};
use uuid::Uuid;

// Errors returned by access-token verification + claim validation.
#[derive(Debug)]
pub enum AccessJwtError {
    Jwt(jsonwebtoken::errors::Error),
    EmptyClaim(&'static str),
    InvalidIdUuid,
}

impl fmt::Display for AccessJwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::EmptyClaim(name) => write!(f, "empty '{}' claim", name),
            Self::InvalidIdUuid => write!(f, "invalid 'id' (expected UUID)"),
        }
    }
}

impl StdError for AccessJwtError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccessJwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

/// Access token (JWT) claims.
///
/// The payload schema is fixed: a token missing `id` (or its `sub` alias) or
/// `exp`, or carrying them with the wrong type, fails to decode and is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    #[serde(alias = "sub")]
    pub id: String,
    pub exp: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
}

/// What the middleware hands on: the verified identity only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAccessToken {
    pub user_id: Uuid,
    pub issued_at: Option<u64>,
}

/// HS256 access-token verifier/issuer over a shared secret.
///
/// - Debug output omits key material.
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AuthService {
    pub fn new(secret: &[u8], leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    // Verify signature + expiry and decode the claims.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Verify, validate the claim schema, and convert into the type handlers use.
    ///
    /// This is the entry-point for the access middleware. Every failure is an
    /// error; there is no path that lets an unverified token through.
    pub fn verify_verified(&self, token: &str) -> Result<VerifiedAccessToken, AccessJwtError> {
        let claims = self.verify(token)?;

        if claims.id.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("id"));
        }

        let user_id = Uuid::parse_str(&claims.id).map_err(|_| AccessJwtError::InvalidIdUuid)?;

        Ok(VerifiedAccessToken {
            user_id,
            issued_at: claims.iat,
        })
    }

    pub fn sign(&self, claims: &AccessTokenClaims) -> Result<String, AccessJwtError> {
        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        Ok(jsonwebtoken::encode(&header, claims, &self.encoding_key)?)
    }

    /// Mint a token for `user_id` valid for `ttl_seconds`.
    pub fn issue(&self, user_id: Uuid, ttl_seconds: u64) -> Result<String, AccessJwtError> {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        self.sign(&AccessTokenClaims {
            id: user_id.to_string(),
            exp: now + ttl_seconds,
            iat: Some(now),
        })
    }
}
