//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and depend only on
//! driving ports, so they can be exercised against mocks or the in-memory
//! store without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountCommand, AttendanceCodeCommand, AttendanceCodeQuery, AttendanceCommand,
    AttendanceQuery, CodeGenerator, CredentialVerifier, DirectoryCommand, DirectoryQuery,
    EnrollmentCommand, EnrollmentQuery, StorePorts,
};
use crate::domain::{
    AccountService, AttendanceCodeService, AttendanceService, DirectoryService,
    EnrollmentService, RedemptionPolicy,
};

/// Collaborators shared by the services behind [`HttpState`].
#[derive(Clone)]
pub struct ServiceDependencies {
    pub generator: Arc<dyn CodeGenerator>,
    pub clock: Arc<dyn Clock>,
    pub verifier: Arc<dyn CredentialVerifier>,
    pub policy: RedemptionPolicy,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub codes: Arc<dyn AttendanceCodeCommand>,
    pub codes_query: Arc<dyn AttendanceCodeQuery>,
    pub attendance: Arc<dyn AttendanceCommand>,
    pub attendance_query: Arc<dyn AttendanceQuery>,
    pub enrollment: Arc<dyn EnrollmentCommand>,
    pub enrollment_query: Arc<dyn EnrollmentQuery>,
    pub directory: Arc<dyn DirectoryCommand>,
    pub directory_query: Arc<dyn DirectoryQuery>,
    pub accounts: Arc<dyn AccountCommand>,
}

impl HttpState {
    /// Wire every domain service over one record store.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use attendance::domain::RedemptionPolicy;
    /// use attendance::domain::ports::{PlaintextCredentialVerifier, StorePorts};
    /// use attendance::inbound::http::state::{HttpState, ServiceDependencies};
    /// use attendance::outbound::code_generator::RandomCodeGenerator;
    /// use attendance::outbound::memory::InMemoryStore;
    ///
    /// let store = StorePorts::from_shared(Arc::new(InMemoryStore::new()));
    /// let state = HttpState::from_store(
    ///     store,
    ///     ServiceDependencies {
    ///         generator: Arc::new(RandomCodeGenerator),
    ///         clock: Arc::new(mockable::DefaultClock),
    ///         verifier: Arc::new(PlaintextCredentialVerifier),
    ///         policy: RedemptionPolicy::default(),
    ///     },
    /// );
    /// let _codes = state.codes.clone();
    /// ```
    pub fn from_store(store: StorePorts, deps: ServiceDependencies) -> Self {
        let ServiceDependencies {
            generator,
            clock,
            verifier,
            policy,
        } = deps;
        let codes = Arc::new(AttendanceCodeService::new(
            store.clone(),
            generator,
            clock.clone(),
        ));
        let attendance = Arc::new(AttendanceService::with_policy(store.clone(), clock, policy));
        let enrollment = Arc::new(EnrollmentService::new(store.clone()));
        let directory = Arc::new(DirectoryService::new(store.clone(), verifier.clone()));
        let accounts = Arc::new(AccountService::new(store, verifier));
        Self {
            codes: codes.clone(),
            codes_query: codes,
            attendance: attendance.clone(),
            attendance_query: attendance,
            enrollment: enrollment.clone(),
            enrollment_query: enrollment,
            directory: directory.clone(),
            directory_query: directory,
            accounts,
        }
    }
}
