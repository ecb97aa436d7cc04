use std::sync::Arc;

use anyhow::Context;

use phonebook_infra::{Backend, EntryStore, InMemoryEntryStore, Phonebook, PhonebookConfig, PostgresEntryStore};

/// Phonebook over a type-erased backend, shared by all handlers.
pub type SharedPhonebook = Phonebook<Arc<dyn EntryStore>>;

pub struct AppServices {
    pub phonebook: SharedPhonebook,
}

impl AppServices {
    pub fn new(phonebook: SharedPhonebook) -> Self {
        Self { phonebook }
    }
}

/// Wire the storage backend selected by `config`.
pub async fn build_services(config: &PhonebookConfig) -> anyhow::Result<AppServices> {
    let store: Arc<dyn EntryStore> = match &config.backend {
        Backend::InMemory => {
            tracing::warn!("DATABASE_URL not set; entries are kept in memory and lost on restart");
            Arc::new(InMemoryEntryStore::new())
        }
        Backend::Postgres { database_url } => Arc::new(
            PostgresEntryStore::connect(database_url)
                .await
                .context("failed to connect to postgres")?,
        ),
    };

    tracing::info!(
        reject_duplicates = config.policy.reject_duplicates,
        "phonebook services ready"
    );

    Ok(AppServices::new(Phonebook::new(store, config.policy)))
}
