//! Runtime settings read from the environment (and `.env` via dotenvy).

use bcrypt::DEFAULT_COST;
use std::{num::NonZeroU32, path::PathBuf};

const DEFAULT_LOGIN_RATE: NonZeroU32 = NonZeroU32::new(10).unwrap();

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub database_file: PathBuf,
    pub file_root: PathBuf,
    pub port: u16,
    pub bcrypt_cost: u32,
    pub login_rate_per_second: NonZeroU32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(Self {
            jwt_secret,
            database_file: lookup("DATABASE_FILE")
                .unwrap_or_else(|| "database.json".into())
                .into(),
            file_root: lookup("FILE_ROOT").unwrap_or_else(|| ".".into()).into(),
            port: parse_or(&lookup, "PORT", 8080)?,
            bcrypt_cost,
            login_rate_per_second: parse_or(
                &lookup,
                "LOGIN_RATE_PER_SECOND",
                DEFAULT_LOGIN_RATE,
            )?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
