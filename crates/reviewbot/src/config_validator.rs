//! Validation utilities.

use std::fmt::Write;

use reviewbot_config::{Config, DatabaseDriver, MAX_REVIEWERS_LIMIT};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on environment variables:\n{}", errors)]
    EnvVarsError { errors: String },
}

fn validate_env_vars(config: &Config) -> Result<(), ValidationError> {
    #[inline]
    fn _missing(error: &mut String, name: &str) {
        error.push('\n');
        let _ = write!(error, "  - Missing env. var.: {}", name);
    }

    #[inline]
    fn _invalid(error: &mut String, name: &str, reason: &str) {
        error.push('\n');
        let _ = write!(error, "  - Invalid env. var.: {} ({})", name, reason);
    }

    let mut error = String::new();

    // Check server configuration
    if config.server.bind_ip.is_empty() {
        _missing(&mut error, "REVIEWBOT_SERVER_BIND_IP");
    }
    if config.server.bind_port == 0 {
        _missing(&mut error, "REVIEWBOT_SERVER_BIND_PORT");
    }

    // Check PG configuration
    if config.database.driver == DatabaseDriver::Postgres {
        if config.database.pg.url.is_empty() {
            _missing(&mut error, "REVIEWBOT_DATABASE_PG_URL");
        }
        if config.database.pg.pool_size == 0 {
            _invalid(
                &mut error,
                "REVIEWBOT_DATABASE_PG_POOL_SIZE",
                "must be positive",
            );
        }
    }

    if config.max_reviewers > MAX_REVIEWERS_LIMIT {
        _invalid(
            &mut error,
            "REVIEWBOT_MAX_REVIEWERS",
            "must be 2 or lower",
        );
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EnvVarsError { errors: error })
    }
}

/// Validate configuration.
pub fn validate_configuration(config: &Config) -> Result<(), ValidationError> {
    validate_env_vars(config)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::from_env_no_version();
        config.database.driver = DatabaseDriver::Memory;
        config.server.bind_ip = "127.0.0.1".into();
        config.server.bind_port = 8080;
        config.max_reviewers = 2;
        config
    }

    #[test]
    fn valid() {
        assert!(validate_configuration(&valid_config()).is_ok());
    }

    #[test]
    fn memory_driver_ignores_pg_url() {
        let mut config = valid_config();
        config.database.pg.url = String::new();

        assert!(validate_configuration(&config).is_ok());
    }

    #[test]
    fn missing_vars() {
        let mut config = valid_config();
        config.database.driver = DatabaseDriver::Postgres;
        config.database.pg.url = String::new();
        config.server.bind_port = 0;

        let ValidationError::EnvVarsError { errors } =
            validate_configuration(&config).unwrap_err();
        assert_eq!(
            errors,
            "\n  - Missing env. var.: REVIEWBOT_SERVER_BIND_PORT\n  - Missing env. var.: REVIEWBOT_DATABASE_PG_URL"
        );
    }

    #[test]
    fn too_many_reviewers() {
        let mut config = valid_config();
        config.max_reviewers = 3;

        assert!(matches!(
            validate_configuration(&config),
            Err(ValidationError::EnvVarsError { errors }) if errors.contains("REVIEWBOT_MAX_REVIEWERS")
        ));
    }
}
