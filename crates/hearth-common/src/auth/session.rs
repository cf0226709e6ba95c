//! Session token verification
//!
//! The identity provider hands clients an HS256-signed JWT. Its subject is the
//! provider's stable user id; profile fields ride along as optional claims.

use chrono::{Duration, Utc};
use hearth_core::Identity;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::error::AppError;

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (external user id)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl SessionClaims {
    /// Claims for `user_id` valid for `ttl` from now
    pub fn new(user_id: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: None,
            name: None,
            email: None,
            picture: None,
        }
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// The identity asserted by these claims
    ///
    /// # Errors
    /// Returns `InvalidToken` if the subject is blank
    pub fn identity(&self) -> Result<Identity, AppError> {
        let user_id = self.sub.trim();
        if user_id.is_empty() {
            return Err(AppError::InvalidToken);
        }
        Ok(Identity {
            user_id: user_id.to_string(),
            name: self.name.clone(),
            image_url: self.picture.clone(),
            email: self.email.clone(),
        })
    }
}

/// Verifies (and, for tooling, signs) session tokens
#[derive(Clone)]
pub struct SessionVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: Option<String>,
}

impl SessionVerifier {
    #[must_use]
    pub fn new(secret: &str, issuer: Option<String>, leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(iss) = &issuer {
            validation.set_issuer(&[iss.as_str()]);
        }

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer,
        }
    }

    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(&config.secret, config.issuer.clone(), config.leeway_secs)
    }

    /// Decode and validate a token
    ///
    /// # Errors
    /// Returns `TokenExpired` for expired tokens and `InvalidToken` otherwise
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }

    /// Validate a token and return the identity it asserts
    pub fn authenticate(&self, token: &str) -> Result<Identity, AppError> {
        self.verify(token)?.identity()
    }

    /// Sign claims with the shared secret, stamping the configured issuer
    ///
    /// # Errors
    /// Returns an internal error if encoding fails
    pub fn issue(&self, claims: &SessionClaims) -> Result<String, AppError> {
        let mut claims = claims.clone();
        if claims.iss.is_none() {
            claims.iss.clone_from(&self.issuer);
        }
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode session token")))
    }
}

impl std::fmt::Debug for SessionVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionVerifier")
            .field("issuer", &self.issuer)
            .field("leeway", &self.validation.leeway)
            .finish_non_exhaustive()
    }
}
