//! Application settings loaded via OrthoConfig.
//!
//! Values come from `ATTENDANCE_*` environment variables, an optional
//! configuration file, or command-line flags.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::RedemptionPolicy;

const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Process-wide settings for the attendance server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ATTENDANCE")]
pub struct AppSettings {
    /// Postgres URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Interface to listen on.
    pub bind_host: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// Refuse attendance from students not enrolled in the course.
    ///
    /// Read from the environment or file only; there is no CLI flag.
    #[ortho_config(skip_cli)]
    pub require_enrollment: Option<bool>,
    /// Seed the initial roster into an empty store at startup.
    #[ortho_config(skip_cli)]
    pub seed_roster: Option<bool>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl AppSettings {
    /// Configured bind host, falling back to all interfaces.
    pub fn bind_host(&self) -> &str {
        self.bind_host.as_deref().unwrap_or(DEFAULT_BIND_HOST)
    }

    /// Configured port, falling back to 5000.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Socket address built from host and port.
    ///
    /// # Errors
    /// Returns [`std::net::AddrParseError`] when the host is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.bind_host(), self.port()).parse()
    }

    /// Redemption pipeline switches.
    pub fn redemption_policy(&self) -> RedemptionPolicy {
        RedemptionPolicy {
            require_enrollment: self.require_enrollment.unwrap_or(true),
        }
    }

    /// Whether to seed the roster at startup.
    pub fn seed_roster(&self) -> bool {
        self.seed_roster.unwrap_or(true)
    }

    /// Pool size for the Diesel adapter.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Database URL with surrounding whitespace removed; blank counts as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    //! Settings parsing against a locked environment.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "ATTENDANCE_DATABASE_URL",
        "ATTENDANCE_BIND_HOST",
        "ATTENDANCE_PORT",
        "ATTENDANCE_REQUIRE_ENROLLMENT",
        "ATTENDANCE_SEED_ROSTER",
        "ATTENDANCE_DB_MAX_CONNECTIONS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("attendance")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.database_url(), None);
        assert_eq!(
            settings.bind_addr().expect("valid address").to_string(),
            "0.0.0.0:5000"
        );
        assert!(settings.redemption_policy().require_enrollment);
        assert!(settings.seed_roster());
        assert_eq!(settings.db_max_connections(), DEFAULT_DB_MAX_CONNECTIONS);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "ATTENDANCE_DATABASE_URL",
                Some("postgres://localhost/attendance".to_owned()),
            ),
            ("ATTENDANCE_BIND_HOST", Some("127.0.0.1".to_owned())),
            ("ATTENDANCE_PORT", Some("8081".to_owned())),
            ("ATTENDANCE_REQUIRE_ENROLLMENT", Some("false".to_owned())),
            ("ATTENDANCE_SEED_ROSTER", Some("false".to_owned())),
            ("ATTENDANCE_DB_MAX_CONNECTIONS", Some("3".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/attendance")
        );
        assert_eq!(
            settings.bind_addr().expect("valid address").to_string(),
            "127.0.0.1:8081"
        );
        assert!(!settings.redemption_policy().require_enrollment);
        assert!(!settings.seed_roster());
        assert_eq!(settings.db_max_connections(), 3);
    }

    #[rstest]
    #[case("true", true)]
    #[case("false", false)]
    fn switches_follow_the_environment(#[case] raw: &str, #[case] expected: bool) {
        let mut guarded = VARS.map(|name| (name, None::<String>));
        guarded[3].1 = Some(raw.to_owned());
        guarded[4].1 = Some(raw.to_owned());
        let _guard = lock_env(guarded);

        let settings = load_from_empty_args();
        assert_eq!(settings.redemption_policy().require_enrollment, expected);
        assert_eq!(settings.seed_roster(), expected);
    }

    #[rstest]
    fn blank_database_url_means_in_memory() {
        let mut guarded = VARS.map(|name| (name, None::<String>));
        guarded[0].1 = Some("   ".to_owned());
        let _guard = lock_env(guarded);

        assert_eq!(load_from_empty_args().database_url(), None);
    }
}
