//! Infrastructure layer: entry storage backends, the phonebook service, config.

pub mod config;
pub mod phonebook;
pub mod store;

pub use config::{Backend, ConfigError, PhonebookConfig};
pub use phonebook::Phonebook;
pub use store::{EntryStore, InMemoryEntryStore, PostgresEntryStore};
