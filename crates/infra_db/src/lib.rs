//! Infrastructure Database Layer
//!
//! Storage adapters for every domain port:
//!
//! - [`PostgresStore`]: PostgreSQL via sqlx, schema in `migrations/`
//! - [`InMemoryStore`]: process-local collections with the same semantics
//!
//! Both adapters enforce owner scoping, cascade deletes from policies to
//! claims to documents, and create a claim together with its inline document
//! atomically.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, PostgresStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/health_portal")).await?;
//! let store = PostgresStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod memory;
pub mod postgres;

pub use pool::{DatabasePool, DatabaseConfig, create_pool, run_migrations};
pub use error::DatabaseError;
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
