//! Conversation entity - a 1:1 relation between two members
//!
//! Slots keep the order in which the conversation was started; lookups and
//! uniqueness work on the unordered pair.

use chrono::{DateTime, Utc};

use super::MemberWithProfile;
use crate::value_objects::{ConversationId, MemberId};

/// Conversation entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: ConversationId,
    pub member_one_id: MemberId,
    pub member_two_id: MemberId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(id: ConversationId, member_one_id: MemberId, member_two_id: MemberId) -> Self {
        let now = Utc::now();
        Self {
            id,
            member_one_id,
            member_two_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this conversation joins exactly `a` and `b`, in either order
    pub fn connects(&self, a: MemberId, b: MemberId) -> bool {
        self.pair_key() == normalized_pair(a, b)
    }

    /// Order-insensitive key of the member pair
    pub fn pair_key(&self) -> (MemberId, MemberId) {
        normalized_pair(self.member_one_id, self.member_two_id)
    }
}

/// Canonical ordering of a member pair (smaller id first)
pub fn normalized_pair(a: MemberId, b: MemberId) -> (MemberId, MemberId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// A conversation with both participants expanded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationDetail {
    pub conversation: Conversation,
    pub member_one: MemberWithProfile,
    pub member_two: MemberWithProfile,
}
