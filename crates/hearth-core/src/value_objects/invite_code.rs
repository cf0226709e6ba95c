//! Invite code - the rotatable token that lets a profile join a server

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Error for an invite code that is empty or not a well-formed token
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("malformed invite code")]
pub struct MalformedInviteCode;

/// Invite code, stored as a hyphenated lowercase UUID v4
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct InviteCode(String);

impl InviteCode {
    /// Mint a fresh random code
    pub fn generate() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    /// Parse a code supplied by a client (typically from an invite link).
    ///
    /// Accepts any UUID spelling and normalizes it to the stored form.
    pub fn parse(raw: &str) -> Result<Self, MalformedInviteCode> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(MalformedInviteCode);
        }
        Uuid::parse_str(raw)
            .map(|uuid| Self(uuid.hyphenated().to_string()))
            .map_err(|_| MalformedInviteCode)
    }

    /// Wrap a code read back from storage
    pub fn from_stored(code: String) -> Self {
        Self(code)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
