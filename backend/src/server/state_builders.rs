//! Builders for the record store bundle and HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use attendance::domain::RosterSeeder;
use attendance::domain::ports::{CredentialVerifier, PlaintextCredentialVerifier, StorePorts};
use attendance::inbound::http::state::{HttpState, ServiceDependencies};
use attendance::outbound::code_generator::RandomCodeGenerator;
use attendance::outbound::memory::InMemoryStore;
use attendance::outbound::persistence::diesel_store_ports;

use super::ServerConfig;

/// Diesel adapters when a pool is configured, otherwise a fresh in-memory
/// store.
pub(crate) fn build_store_ports(config: &ServerConfig) -> StorePorts {
    match &config.db_pool {
        Some(pool) => diesel_store_ports(pool),
        None => StorePorts::from_shared(Arc::new(InMemoryStore::new())),
    }
}

/// Seed the roster when enabled, then wire every service over the store.
///
/// # Errors
/// Returns [`std::io::Error`] when roster seeding fails.
pub(crate) async fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let store = build_store_ports(config);
    let verifier: Arc<dyn CredentialVerifier> = Arc::new(PlaintextCredentialVerifier);

    if config.seed_roster {
        let summary = RosterSeeder::new(store.clone(), verifier.clone())
            .seed_if_empty()
            .await
            .map_err(|err| std::io::Error::other(format!("roster seeding failed: {err}")))?;
        if !summary.is_empty() {
            info!(
                lecturers = summary.lecturers,
                courses = summary.courses,
                students = summary.students,
                "seeded initial roster"
            );
        }
    }

    let state = HttpState::from_store(
        store,
        ServiceDependencies {
            generator: Arc::new(RandomCodeGenerator),
            clock: Arc::new(mockable::DefaultClock),
            verifier,
            policy: config.policy,
        },
    );
    Ok(web::Data::new(state))
}
