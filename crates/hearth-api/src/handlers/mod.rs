//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod channels;
pub mod conversations;
pub mod health;
pub mod invites;
pub mod members;
pub mod profile;
pub mod servers;
