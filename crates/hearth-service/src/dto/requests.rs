//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Field names follow the client's camelCase JSON.

use hearth_core::{ChannelType, MemberId, MemberRole};
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Reject names made only of whitespace
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

// ============================================================================
// Server Requests
// ============================================================================

/// Create server request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateServerRequest {
    #[validate(
        length(min = 1, max = 100, message = "Server name must be 1-100 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,

    #[validate(length(min = 1, max = 2048, message = "Server image is required"))]
    pub image_url: String,
}

/// Update server request (name and image are replaced together)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServerRequest {
    #[validate(
        length(min = 1, max = 100, message = "Server name must be 1-100 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,

    #[validate(length(min = 1, max = 2048, message = "Server image is required"))]
    pub image_url: String,
}

// ============================================================================
// Member Requests
// ============================================================================

/// Change a member's role
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMemberRoleRequest {
    pub role: MemberRole,
}

// ============================================================================
// Channel Requests
// ============================================================================

/// Create channel request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateChannelRequest {
    #[validate(
        length(min = 1, max = 100, message = "Channel name must be 1-100 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,

    #[serde(rename = "type", default)]
    pub channel_type: ChannelType,
}

/// Edit channel request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateChannelRequest {
    #[validate(
        length(min = 1, max = 100, message = "Channel name must be 1-100 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,

    #[serde(rename = "type", default)]
    pub channel_type: ChannelType,
}

// ============================================================================
// Conversation Requests
// ============================================================================

/// The two members of a direct conversation, in the order the caller gave them
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConversationRequest {
    pub member_one_id: MemberId,
    pub member_two_id: MemberId,
}
