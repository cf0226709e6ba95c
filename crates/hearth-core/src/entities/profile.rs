//! Profile entity - the application-level record for an identity-provider user

use chrono::{DateTime, Utc};

use crate::value_objects::ProfileId;

/// Display name used when the identity provider supplies none
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Identity asserted by the identity provider for the current session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Stable external user id (the token subject)
    pub user_id: String,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub email: Option<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: None,
            image_url: None,
            email: None,
        }
    }

    /// Build the profile that is stored the first time this identity is seen
    pub fn to_profile(&self, id: ProfileId) -> Profile {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(ANONYMOUS_NAME);

        Profile::new(
            id,
            self.user_id.clone(),
            name.to_string(),
            self.image_url.clone().unwrap_or_default(),
            self.email.clone().unwrap_or_default(),
        )
    }
}

/// Profile entity (one per identity-provider user)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: ProfileId,
    /// External user id, unique
    pub user_id: String,
    pub name: String,
    pub image_url: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(
        id: ProfileId,
        user_id: String,
        name: String,
        image_url: String,
        email: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            name,
            image_url,
            email,
            created_at: now,
            updated_at: now,
        }
    }
}
