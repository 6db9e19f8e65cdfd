//! PostgreSQL adapter
//!
//! `PostgresStore` implements every domain port over sqlx. Owned tables are
//! always accessed through [`scoped::ScopedTable`], multi-row writes run in a
//! transaction, and cascading deletes are left to the foreign keys declared
//! in `migrations/`.
//!
//! Timestamps come from the injected [`Clock`] rather than `now()` in SQL, so
//! both adapters stamp records identically.

mod rows;
mod scoped;
mod users;
mod policies;
mod claims;
mod medical;
mod items;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use core_kernel::{
    AdapterHealth, Clock, DomainPort, HealthCheckResult, HealthCheckable, SystemClock,
};

/// sqlx-backed implementation of every storage port
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
    clock: Arc<dyn Clock>,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self::with_clock(pool, Arc::new(SystemClock))
    }

    pub fn with_clock(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl DomainPort for PostgresStore {}

#[async_trait]
impl HealthCheckable for PostgresStore {
    /// Runs `SELECT 1` against the pool
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: "postgres-store".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: self.clock.now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: "postgres-store".to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: self.clock.now(),
            },
        }
    }
}
