//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use attendance::domain::RedemptionPolicy;
use attendance::inbound::http::health::StoreBackend;
use attendance::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) policy: RedemptionPolicy,
    pub(crate) seed_roster: bool,
}

impl ServerConfig {
    /// Configuration serving the in-memory store with default policy and
    /// roster seeding enabled.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            policy: RedemptionPolicy::default(),
            seed_roster: true,
        }
    }

    /// Attach a database connection pool; the Diesel adapters replace the
    /// in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override the redemption policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RedemptionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enable or disable roster seeding at startup.
    #[must_use]
    pub fn with_seed_roster(mut self, seed_roster: bool) -> Self {
        self.seed_roster = seed_roster;
        self
    }

    /// Which record store the server will run against.
    #[must_use]
    pub fn store_backend(&self) -> StoreBackend {
        if self.db_pool.is_some() {
            StoreBackend::Postgres
        } else {
            StoreBackend::Memory
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
