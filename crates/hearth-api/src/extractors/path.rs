//! Path parameter extractors
//!
//! Path segments arrive as strings and are parsed into typed ids, so a
//! malformed id is a 400 rather than a 404.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use hearth_core::{ChannelId, MemberId, ServerId};
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// Path extractor whose rejection is an [`ApiError`]
#[derive(Debug, Clone)]
pub struct ParsedPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ParsedPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(ParsedPath(inner))
    }
}

fn parse_server_id(raw: &str) -> Result<ServerId, ApiError> {
    ServerId::parse(raw).map_err(|_| ApiError::invalid_path("Invalid server_id format"))
}

/// Path parameters with server_id
#[derive(Debug, serde::Deserialize)]
pub struct ServerIdPath {
    pub server_id: String,
}

impl ServerIdPath {
    pub fn server_id(&self) -> Result<ServerId, ApiError> {
        parse_server_id(&self.server_id)
    }
}

/// Path parameters with server_id and member_id
#[derive(Debug, serde::Deserialize)]
pub struct ServerMemberPath {
    pub server_id: String,
    pub member_id: String,
}

impl ServerMemberPath {
    pub fn server_id(&self) -> Result<ServerId, ApiError> {
        parse_server_id(&self.server_id)
    }

    pub fn member_id(&self) -> Result<MemberId, ApiError> {
        MemberId::parse(&self.member_id)
            .map_err(|_| ApiError::invalid_path("Invalid member_id format"))
    }
}

/// Path parameters with server_id and channel_id
#[derive(Debug, serde::Deserialize)]
pub struct ServerChannelPath {
    pub server_id: String,
    pub channel_id: String,
}

impl ServerChannelPath {
    pub fn server_id(&self) -> Result<ServerId, ApiError> {
        parse_server_id(&self.server_id)
    }

    pub fn channel_id(&self) -> Result<ChannelId, ApiError> {
        ChannelId::parse(&self.channel_id)
            .map_err(|_| ApiError::invalid_path("Invalid channel_id format"))
    }
}

/// Path parameters for invite code
///
/// Left unparsed: a malformed code is an outcome of the invite flow, not a
/// path error.
#[derive(Debug, serde::Deserialize)]
pub struct InviteCodePath {
    pub invite_code: String,
}

impl InviteCodePath {
    /// Get the invite code
    pub fn code(&self) -> &str {
        &self.invite_code
    }
}
