//! In-memory adapter
//!
//! `InMemoryStore` implements every domain port over plain collections behind
//! one `tokio::sync::RwLock`. Each mutating operation validates its input
//! before taking the write lock and then completes under a single lock
//! acquisition, so multi-record writes (a claim with its inline document, a
//! policy with its claims) are all-or-nothing just like their PostgreSQL
//! counterparts.
//!
//! Used for local development (`API_STORAGE=memory`) and as the backing store
//! of the HTTP tests.

mod table;
mod users;
mod policies;
mod claims;
mod medical;
mod items;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{
    AdapterHealth, Clock, DomainPort, HealthCheckResult, HealthCheckable, SystemClock,
};
use domain_catalog::Item;
use domain_claims::Claim;
use domain_party::{MedicalRecord, User};
use domain_policy::Policy;

use table::OwnedTable;

#[derive(Debug)]
struct UserRecord {
    user: User,
    password_hash: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<UserRecord>,
    policies: OwnedTable<Policy>,
    claims: OwnedTable<Claim>,
    medical_history: OwnedTable<MedicalRecord>,
    items: Vec<Item>,
}

/// Process-local implementation of every storage port
#[derive(Clone)]
pub struct InMemoryStore {
    state: Arc<RwLock<MemoryState>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Store whose timestamps come from the given clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState::default())),
            clock,
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainPort for InMemoryStore {}

#[async_trait]
impl HealthCheckable for InMemoryStore {
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();
        let _guard = self.state.read().await;

        HealthCheckResult {
            adapter_id: "memory-store".to_string(),
            status: AdapterHealth::Healthy,
            latency_ms: start.elapsed().as_millis() as u64,
            message: None,
            checked_at: self.clock.now(),
        }
    }
}
