use crate::database::types::AuthorRecord;
use crate::ingest::errors::IngestError;
use crate::ingest::line::{extract_record, field_text, strip_key_prefix};
use crate::ingest::store::AuthorStore;
use log::debug;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub(crate) const AUTHOR_KEY_PREFIX: &str = "/authors/";

/// Streaming loader for the authors dump. Must run to completion before the works pass, which
/// looks every referenced author up in the store this pass populates.
pub struct AuthorIngestor<'store, S: AuthorStore> {
    store: &'store S,
}

impl<'store, S: AuthorStore> AuthorIngestor<'store, S> {
    #[must_use]
    #[inline]
    pub const fn new(store: &'store S) -> Self {
        Self { store }
    }

    /// Streams the dump one line at a time (the whole file is never held in memory), saving one
    /// `AuthorRecord` per line. Returns the number of records saved; the first failing line
    /// aborts the pass.
    #[allow(
        clippy::missing_inline_in_public_items,
        reason = "Called once per program run"
    )]
    pub async fn ingest(&self, path: &Path) -> Result<u64, IngestError> {
        let file = File::open(path)?;
        self.ingest_lines(BufReader::new(file)).await
    }

    async fn ingest_lines<R: BufRead>(&self, reader: R) -> Result<u64, IngestError> {
        let mut saved: u64 = 0;
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let record = extract_record(&line).map_err(|source| IngestError::Extract {
                line: index + 1,
                source,
            })?;
            let author = author_from_record(&record);
            debug!("Saving author {}...", author.name);
            self.store.save(&author).await?;
            saved += 1;
        }
        Ok(saved)
    }
}

fn author_from_record(record: &Value) -> AuthorRecord {
    AuthorRecord::new(
        strip_key_prefix(&field_text(&record["key"]), AUTHOR_KEY_PREFIX),
        field_text(&record["name"]),
        field_text(&record["personal_name"]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::store::memory::MemoryAuthorStore;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    const TWAIN_LINE: &str = "/type/author\t/authors/OL1A\t3\t2008-04-01T03:28:50.625462\t\
        {\"key\":\"/authors/OL1A\",\"name\":\"Mark Twain\",\"personal_name\":\"Samuel Clemens\"}";

    #[tokio::test]
    async fn ingests_a_complete_author_line() {
        let store = MemoryAuthorStore::default();
        let ingestor = AuthorIngestor::new(&store);

        let saved = ingestor.ingest_lines(Cursor::new(TWAIN_LINE)).await.unwrap();

        assert_eq!(saved, 1);
        let expected = AuthorRecord::new(
            "OL1A".to_owned(),
            "Mark Twain".to_owned(),
            "Samuel Clemens".to_owned(),
        );
        assert_eq!(
            store.authors.lock().unwrap().get("OL1A"),
            Some(&expected)
        );
    }

    #[tokio::test]
    async fn missing_scalar_fields_become_the_text_null() {
        let store = MemoryAuthorStore::default();
        let ingestor = AuthorIngestor::new(&store);

        let dump = "/authors/OL2A\t{\"key\":\"/authors/OL2A\",\"personal_name\":\"N. N.\"}";
        ingestor.ingest_lines(Cursor::new(dump)).await.unwrap();

        let saved = store.authors.lock().unwrap().get("OL2A").cloned().unwrap();
        assert_eq!(saved.name, "null");
        assert_eq!(saved.personal_name, "N. N.");
    }

    #[tokio::test]
    async fn a_malformed_line_aborts_the_pass_but_keeps_earlier_saves() {
        let store = MemoryAuthorStore::default();
        let ingestor = AuthorIngestor::new(&store);

        let dump = format!("{TWAIN_LINE}\n/authors/OL3A\tno json here");
        let error = ingestor.ingest_lines(Cursor::new(dump)).await.unwrap_err();

        assert_eq!(error.to_string(), "line 2: no JSON object found");
        assert_eq!(store.authors.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn reingesting_the_same_dump_overwrites_instead_of_duplicating() {
        let store = MemoryAuthorStore::default();
        let ingestor = AuthorIngestor::new(&store);

        ingestor.ingest_lines(Cursor::new(TWAIN_LINE)).await.unwrap();
        ingestor.ingest_lines(Cursor::new(TWAIN_LINE)).await.unwrap();

        let authors = store.authors.lock().unwrap();
        assert_eq!(authors.len(), 1);
        assert_eq!(authors.get("OL1A").unwrap().name, "Mark Twain");
    }
}
