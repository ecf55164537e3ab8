use std::{fmt, str::FromStr};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Unknown database driver '{name}', expected one of: memory, pg")]
    UnknownDriver { name: String },
}

/// Storage backend, selected with `REVIEWBOT_DATABASE_DRIVER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatabaseDriver {
    #[default]
    Memory,
    Postgres,
}

impl DatabaseDriver {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres => "pg",
        }
    }
}

impl fmt::Display for DatabaseDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseDriver {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Memory, Self::Postgres]
            .into_iter()
            .find(|driver| driver.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DriverError::UnknownDriver { name: s.into() })
    }
}
