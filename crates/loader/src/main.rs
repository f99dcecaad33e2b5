//! The Librarium dump loader. Loads the Open Library author and work dumps into a local SQLite
//! library database: the authors pass runs first and to completion, because the works pass
//! resolves every referenced author identifier to a display name through the author store.

use anyhow::{Context as _, Error};
use librarium_core::database::queries::Db;
use librarium_core::ingest::authors::AuthorIngestor;
use librarium_core::ingest::works::WorkIngestor;
use std::env;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{EnvFilter, fmt};

/// Database file used when `LIBRARY_DATABASE_PATH` is not set.
const LIBRARY_DATABASE_NAME: &str = "library.db";

#[allow(
    clippy::print_stderr,
    reason = "No logging loaded at this point if run() failed before its initialization"
)]
#[allow(clippy::exit, reason = "Startup failures must fail the process")]
fn main() {
    if dotenvy::dotenv().is_err() {
        eprintln!("No .env file found, reading configuration from the process environment");
    }
    if let Err(error) = run() {
        eprintln!("Failed to load dumps! Error: {error:#}");
        process::exit(1);
    }
}

#[tokio::main]
async fn run() -> Result<(), Error> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let authors_dump = PathBuf::from(
        env::var("AUTHORS_DUMP_LOCATION")
            .context("AUTHORS_DUMP_LOCATION must point to the authors dump file")?,
    );
    let works_dump = PathBuf::from(
        env::var("WORKS_DUMP_LOCATION")
            .context("WORKS_DUMP_LOCATION must point to the works dump file")?,
    );
    let database_path =
        env::var("LIBRARY_DATABASE_PATH").unwrap_or_else(|_| LIBRARY_DATABASE_NAME.to_owned());

    log::info!("Using database at {database_path}");
    let db = Db::init(Path::new(&database_path))
        .await
        .context("failed to open the library database")?;

    // An aborted pass is logged and the other pass still runs; re-running the loader later
    // overwrites records by id rather than duplicating them.
    match AuthorIngestor::new(&db).ingest(&authors_dump).await {
        Ok(count) => log::info!("Loaded {count} authors from {}", authors_dump.display()),
        Err(error) => log::error!("Authors pass aborted: {error}"),
    }

    match WorkIngestor::new(&db, &db).ingest(&works_dump).await {
        Ok(count) => log::info!("Loaded {count} works from {}", works_dump.display()),
        Err(error) => log::error!("Works pass aborted: {error}"),
    }

    db.close().await;
    Ok(())
}
