//! Channel entity - a named conversation surface inside a server
//!
//! Every server owns exactly one channel called [`GENERAL_CHANNEL_NAME`]. It is
//! created with the server and can never be renamed or deleted; all channel
//! mutations go through [`Channel::check_assignable_name`] and
//! [`Channel::is_general`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{ChannelId, ProfileId, ServerId};

/// Name of the permanent default channel
pub const GENERAL_CHANNEL_NAME: &str = "general";

/// Channel type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChannelType {
    #[default]
    Text,
    Audio,
    Video,
}

impl ChannelType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Audio => "AUDIO",
            Self::Video => "VIDEO",
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ChannelType {
    fn from(value: &str) -> Self {
        match value {
            "AUDIO" => Self::Audio,
            "VIDEO" => Self::Video,
            _ => Self::Text, // Default for TEXT and unknown values
        }
    }
}

/// Channel entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    pub channel_type: ChannelType,
    /// Creator
    pub profile_id: ProfileId,
    pub server_id: ServerId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Channel {
    pub fn new(
        id: ChannelId,
        server_id: ServerId,
        profile_id: ProfileId,
        name: String,
        channel_type: ChannelType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            channel_type,
            profile_id,
            server_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// The default text channel created with every server
    pub fn general(id: ChannelId, server_id: ServerId, profile_id: ProfileId) -> Self {
        Self::new(
            id,
            server_id,
            profile_id,
            GENERAL_CHANNEL_NAME.to_string(),
            ChannelType::Text,
        )
    }

    /// Check if this is the server's permanent default channel
    #[inline]
    pub fn is_general(&self) -> bool {
        is_reserved_name(&self.name)
    }

    /// Reject names that may not be given to a channel by a client
    pub fn check_assignable_name(name: &str) -> Result<(), DomainError> {
        if is_reserved_name(name) {
            return Err(DomainError::ReservedChannelName);
        }
        Ok(())
    }
}

#[inline]
fn is_reserved_name(name: &str) -> bool {
    name.trim() == GENERAL_CHANNEL_NAME
}
