//! Value objects - immutable types that represent domain concepts

mod ids;
mod invite_code;

pub use ids::{ChannelId, ConversationId, IdParseError, MemberId, ProfileId, ServerId};
pub use invite_code::{InviteCode, MalformedInviteCode};
