//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in hearth-core.
//! Each repository handles database operations for a specific domain entity.

mod channel;
mod conversation;
mod error;
mod health;
mod member;
mod profile;
mod server;

pub use channel::PgChannelRepository;
pub use conversation::PgConversationRepository;
pub use health::PgStoreHealth;
pub use member::PgMemberRepository;
pub use profile::PgProfileRepository;
pub use server::PgServerRepository;
