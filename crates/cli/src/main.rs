//! Administrative seeding tool for the durable phonebook.
//!
//! `phonebook-cli list` prints every entry; `phonebook-cli insert NAME NUMBER`
//! adds one. Both go through the same validation as the HTTP API.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use phonebook_core::EntryCandidate;
use phonebook_infra::{EntryStore, Phonebook, PhonebookConfig, PostgresEntryStore};

#[derive(Debug, Parser)]
#[command(name = "phonebook-cli")]
#[command(about = "List or insert phonebook entries in the durable store")]
struct Args {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
enum Command {
    /// Print all entries (the default)
    List,
    /// Validate and store one entry
    Insert { name: String, number: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    phonebook_infra::config::load_dotenv().context("invalid .env file")?;
    phonebook_observability::init_stderr();
    let args = Args::parse();

    // Only the duplicate policy is taken from the environment; the backend is always Postgres here.
    let policy = PhonebookConfig::from_env()
        .context("invalid configuration")?
        .policy;

    let store = PostgresEntryStore::connect(&args.database_url)
        .await
        .context("failed to connect to postgres")?;
    let store = Arc::new(store);
    let book = Phonebook::new(store.clone(), policy);

    let result = run(&book, args.command.unwrap_or(Command::List)).await;
    store.close().await;
    tracing::debug!("connection closed");

    for line in result? {
        println!("{line}");
    }
    Ok(())
}

/// Execute one command, returning the lines to print.
async fn run<S: EntryStore>(book: &Phonebook<S>, command: Command) -> anyhow::Result<Vec<String>> {
    match command {
        Command::List => {
            let entries = book.list_all().await.context("failed to list entries")?;
            let mut lines = Vec::with_capacity(entries.len() + 1);
            lines.push("Phonebook:".to_string());
            lines.extend(entries.into_iter().map(|e| format!("{} {}", e.name, e.number)));
            Ok(lines)
        }
        Command::Insert { name, number } => {
            let entry = book
                .insert(EntryCandidate::new(name, number))
                .await
                .context("failed to insert entry")?;
            Ok(vec![format!(
                "added {} number {} to phonebook",
                entry.name, entry.number
            )])
        }
    }
}
