//! Configuration management and environment variable loading

use crate::templates::SUPPORTED_LOCALES;
use crate::{PeerHabitError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Environment variable holding the primary key length
pub const ENV_KEY_LENGTH: &str = "PEERHABIT_KEY_LENGTH";
/// Environment variable holding the key generation attempt bound
pub const ENV_MAX_KEY_ATTEMPTS: &str = "PEERHABIT_MAX_KEY_ATTEMPTS";
/// Environment variable selecting the string catalog
pub const ENV_LOCALE: &str = "PEERHABIT_LOCALE";

/// Load environment variables from a .env file
///
/// A missing file is not an error; a malformed one is.
pub fn load_env() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::info!("Loaded environment from: {}", path.display());
            Ok(())
        }
        Err(dotenvy::Error::LineParse(line, pos)) => Err(PeerHabitError::config(format!(
            "Failed to parse .env file at line {}, position {}",
            line, pos
        ))),
        Err(dotenvy::Error::Io(_)) => {
            tracing::debug!("No .env file found - using system environment variables only");
            Ok(())
        }
        Err(e) => Err(PeerHabitError::config(format!(
            "Failed to load .env file: {}",
            e
        ))),
    }
}

/// Load environment variables from a specific file
pub fn load_env_from_path<P: AsRef<Path>>(path: P) -> Result<()> {
    dotenvy::from_path(path.as_ref()).map_err(|e| {
        PeerHabitError::config(format!(
            "Failed to load {} environment file: {}",
            path.as_ref().display(),
            e
        ))
    })?;
    tracing::info!("Loaded environment from: {}", path.as_ref().display());
    Ok(())
}

/// Get optional environment variable with default
pub fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get environment variable as integer, falling back on parse failure
pub fn get_env_int<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Registry settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Type tag placed before the random part of every primary key
    pub key_prefix: String,
    /// Number of random letters in a primary key
    pub key_length: usize,
    /// Upper bound on primary key candidates before giving up
    pub max_key_attempts: usize,
    /// String catalog locale (`ko` or `en`)
    pub locale: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            key_prefix: "robot".to_string(),
            key_length: 25,
            max_key_attempts: 64,
            locale: "ko".to_string(),
        }
    }
}

impl RegistryConfig {
    /// Build a config from `PEERHABIT_*` environment variables.
    ///
    /// A `.env` file, when present, is loaded first.
    pub fn from_env() -> Result<Self> {
        load_env()?;
        let defaults = Self::default();
        Ok(Self {
            key_prefix: defaults.key_prefix,
            key_length: get_env_int(ENV_KEY_LENGTH, defaults.key_length),
            max_key_attempts: get_env_int(ENV_MAX_KEY_ATTEMPTS, defaults.max_key_attempts),
            locale: get_env_or(ENV_LOCALE, &defaults.locale),
        })
    }

    /// Reject settings the registry cannot operate with
    pub fn validate(&self) -> Result<()> {
        if self.key_length == 0 {
            return Err(PeerHabitError::config("key_length must be at least 1"));
        }
        if self.max_key_attempts == 0 {
            return Err(PeerHabitError::config("max_key_attempts must be at least 1"));
        }
        if self.key_prefix.is_empty()
            || self
                .key_prefix
                .chars()
                .any(|c| c == ':' || c.is_whitespace())
        {
            return Err(PeerHabitError::config(format!(
                "Invalid key prefix '{}': must be non-empty without ':' or whitespace",
                self.key_prefix
            )));
        }
        if !SUPPORTED_LOCALES.contains(&self.locale.as_str()) {
            return Err(PeerHabitError::config(format!(
                "Unsupported locale '{}', expected one of: {}",
                self.locale,
                SUPPORTED_LOCALES.join(", ")
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_get_env_int() {
        env::set_var("PEERHABIT_TEST_INT", "42");
        env::set_var("PEERHABIT_TEST_INT_BAD", "forty-two");

        assert_eq!(get_env_int("PEERHABIT_TEST_INT", 0usize), 42);
        assert_eq!(get_env_int("PEERHABIT_TEST_INT_BAD", 7usize), 7);
        assert_eq!(get_env_int("PEERHABIT_TEST_INT_UNSET", 9usize), 9);
    }

    #[test]
    fn test_from_env_overrides_and_fallbacks() {
        env::set_var(ENV_KEY_LENGTH, "30");
        env::set_var(ENV_MAX_KEY_ATTEMPTS, "not-a-number");
        env::set_var(ENV_LOCALE, "en");

        let config = RegistryConfig::from_env().unwrap();
        assert_eq!(config.key_length, 30);
        assert_eq!(config.max_key_attempts, 64);
        assert_eq!(config.locale, "en");
        assert_eq!(config.key_prefix, "robot");

        env::remove_var(ENV_KEY_LENGTH);
        env::remove_var(ENV_MAX_KEY_ATTEMPTS);
        env::remove_var(ENV_LOCALE);
    }

    #[test]
    fn test_validate() {
        assert!(RegistryConfig::default().validate().is_ok());

        let zero_len = RegistryConfig {
            key_length: 0,
            ..Default::default()
        };
        assert!(zero_len.validate().is_err());

        let zero_attempts = RegistryConfig {
            max_key_attempts: 0,
            ..Default::default()
        };
        assert!(zero_attempts.validate().is_err());

        let bad_prefix = RegistryConfig {
            key_prefix: "ro:bot".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            bad_prefix.validate(),
            Err(PeerHabitError::Config(_))
        ));

        let english = RegistryConfig {
            locale: "en".to_string(),
            ..Default::default()
        };
        assert!(english.validate().is_ok());

        let french = RegistryConfig {
            locale: "fr".to_string(),
            ..Default::default()
        };
        assert!(matches!(french.validate(), Err(PeerHabitError::Config(_))));
    }

    #[test]
    fn test_load_env_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "PEERHABIT_TEST_DOTENV_KEY=from-dotenv").unwrap();
        writeln!(file, "PEERHABIT_TEST_DOTENV_INT=17").unwrap();

        load_env_from_path(file.path()).unwrap();
        assert_eq!(
            get_env_or("PEERHABIT_TEST_DOTENV_KEY", "unset"),
            "from-dotenv"
        );
        assert_eq!(get_env_int("PEERHABIT_TEST_DOTENV_INT", 0u32), 17);
    }

    #[test]
    fn test_load_env_from_missing_path_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_env_from_path(dir.path().join("absent.env")).unwrap_err();
        assert!(matches!(err, PeerHabitError::Config(_)));
    }

    #[test]
    fn test_load_env_without_file_is_ok() {
        assert!(load_env().is_ok());
    }
}
