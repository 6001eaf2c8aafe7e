//! Warden DB - Durable user storage
//!
//! SQLx-based user store gateway.
//!
//! # Example
//!
//! ```rust,ignore
//! use warden_db::{create_pool, run_migrations, PgUserRepository, UserRepository};
//!
//! let pool = create_pool("postgres://localhost/warden").await?;
//! run_migrations(&pool).await?;
//! let users = PgUserRepository::new(pool);
//!
//! let user = users.find_by_email("user@example.com").await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::PgUserRepository;
pub use pool::{create_pool, create_pool_with_options, run_migrations, DbPool, PoolOptions};
pub use repo::*;
