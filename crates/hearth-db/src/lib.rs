//! # hearth-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `hearth-core`. It handles:
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations whose authorization predicates live in the
//!   same statement as the write
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hearth_db::pool::{create_pool, DatabaseConfig};
//! use hearth_db::repositories::PgServerRepository;
//! use hearth_core::traits::ServerRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::default();
//!     let pool = create_pool(&config).await?;
//!     let servers = PgServerRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgChannelRepository, PgConversationRepository, PgMemberRepository, PgProfileRepository,
    PgServerRepository, PgStoreHealth,
};
