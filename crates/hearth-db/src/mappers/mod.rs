//! Entity to model mappers
//!
//! `From<Model> for Entity` conversions between database rows and domain objects.

mod channel;
mod conversation;
mod member;
mod profile;
mod server;

pub use member::channel_manager_roles;
