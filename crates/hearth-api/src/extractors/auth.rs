//! Authentication extractors
//!
//! Verifies the session token from the Authorization header and resolves the
//! caller's Profile.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use hearth_core::entities::{Identity, Profile};
use hearth_service::IdentityService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated identity extracted from the session token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub identity: Identity,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }
}

fn verify(state: &AppState, token: &str) -> Result<Identity, ApiError> {
    IdentityService::new(state.service_context())
        .authenticate(token)
        .map_err(|_| ApiError::InvalidAuthFormat)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract the Authorization header
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        let identity = verify(&app_state, bearer.token())?;

        Ok(AuthUser::new(identity))
    }
}

/// Optional authenticated identity
///
/// Returns None if no authorization header is present,
/// or an error if the token is invalid.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref().map(|user| &user.identity)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_result =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await;

        match auth_result {
            Ok(TypedHeader(Authorization(bearer))) => {
                let app_state = AppState::from_ref(state);
                let identity = verify(&app_state, bearer.token())?;
                Ok(OptionalAuthUser(Some(AuthUser::new(identity))))
            }
            Err(_) => Ok(OptionalAuthUser(None)),
        }
    }
}

/// The caller's Profile, provisioned on first sight
#[derive(Debug, Clone)]
pub struct CurrentProfile(pub Profile);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentProfile
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;

        let app_state = AppState::from_ref(state);
        let profile = IdentityService::new(app_state.service_context())
            .resolve_profile(Some(&auth.identity))
            .await?;

        Ok(CurrentProfile(profile))
    }
}
