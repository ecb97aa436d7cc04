//! Configuration loading and representation.
//!
//! Everything comes from the process environment, after a `.env` file (if
//! any) has been merged into it. `from_lookup` takes the lookup as a closure
//! so tests never have to mutate the real environment.

use std::path::{Path, PathBuf};

use phonebook_core::EntryPolicy;
use thiserror::Error;

/// Port used when `PORT` is unset or empty.
pub const DEFAULT_PORT: u16 = 3001;

/// Directory of the bundled frontend when `STATIC_DIR` is unset.
pub const DEFAULT_STATIC_DIR: &str = "build";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to load env file: {0}")]
    EnvFile(String),
}

/// Which storage backend the service runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    InMemory,
    Postgres { database_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhonebookConfig {
    pub port: u16,
    pub backend: Backend,
    pub policy: EntryPolicy,
    pub static_dir: PathBuf,
}

impl Default for PhonebookConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            backend: Backend::InMemory,
            policy: EntryPolicy::default(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl PhonebookConfig {
    /// Read configuration from the process environment, loading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv()?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let backend = match get("DATABASE_URL") {
            Some(database_url) => Backend::Postgres { database_url },
            None => Backend::InMemory,
        };

        let reject_duplicates = match get("PHONEBOOK_REJECT_DUPLICATES") {
            Some(raw) => parse_flag("PHONEBOOK_REJECT_DUPLICATES", &raw)?,
            None => false,
        };

        let static_dir = get("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        Ok(Self {
            port,
            backend,
            policy: EntryPolicy { reject_duplicates },
            static_dir,
        })
    }
}

/// Merge `.env` from the working directory (or a parent) into the process
/// environment. Variables that are already set win; a missing file is fine.
pub fn load_dotenv() -> Result<Option<PathBuf>, ConfigError> {
    env_file_result(dotenvy::dotenv())
}

/// Same as [`load_dotenv`] for an explicit path.
pub fn load_env_file(path: &Path) -> Result<Option<PathBuf>, ConfigError> {
    env_file_result(dotenvy::from_path(path).map(|()| path.to_path_buf()))
}

fn env_file_result(result: Result<PathBuf, dotenvy::Error>) -> Result<Option<PathBuf>, ConfigError> {
    match result {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded env file");
            Ok(Some(path))
        }
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(ConfigError::EnvFile(e.to_string())),
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "expected true/false".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<PhonebookConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PhonebookConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_in_memory_on_port_3001() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg, PhonebookConfig::default());
        assert_eq!(cfg.port, 3001);
        assert!(!cfg.policy.reject_duplicates);
    }

    #[test]
    fn empty_port_falls_back_to_default() {
        assert_eq!(config(&[("PORT", "")]).unwrap().port, DEFAULT_PORT);
        assert_eq!(config(&[("PORT", "8080")]).unwrap().port, 8080);
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = config(&[("PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn database_url_selects_postgres() {
        let cfg = config(&[("DATABASE_URL", "postgres://localhost/phonebook")]).unwrap();
        assert_eq!(
            cfg.backend,
            Backend::Postgres {
                database_url: "postgres://localhost/phonebook".to_string()
            }
        );
    }

    #[test]
    fn duplicate_flag_parses_common_spellings() {
        assert!(config(&[("PHONEBOOK_REJECT_DUPLICATES", "true")]).unwrap().policy.reject_duplicates);
        assert!(config(&[("PHONEBOOK_REJECT_DUPLICATES", "1")]).unwrap().policy.reject_duplicates);
        assert!(!config(&[("PHONEBOOK_REJECT_DUPLICATES", "no")]).unwrap().policy.reject_duplicates);
        assert!(config(&[("PHONEBOOK_REJECT_DUPLICATES", "maybe")]).is_err());
    }

    #[test]
    fn env_file_values_reach_the_process_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "PHONEBOOK_ENV_FILE_MARKER=loaded\n").unwrap();

        assert_eq!(load_env_file(&path).unwrap(), Some(path.clone()));
        assert_eq!(std::env::var("PHONEBOOK_ENV_FILE_MARKER").as_deref(), Ok("loaded"));
    }

    #[test]
    fn missing_env_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_env_file(&dir.path().join(".env")).unwrap(), None);
    }
}
