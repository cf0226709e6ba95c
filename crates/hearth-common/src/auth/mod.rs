//! Session authentication

mod session;

pub use session::{SessionClaims, SessionVerifier};
