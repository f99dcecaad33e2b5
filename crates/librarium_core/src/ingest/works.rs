use crate::database::types::{AuthorRef, BookRecord};
use crate::ingest::authors::AUTHOR_KEY_PREFIX;
use crate::ingest::errors::{IngestError, StoreError};
use crate::ingest::line::{extract_record, field_text, strip_key_prefix};
use crate::ingest::store::{AuthorStore, BookStore};
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub(crate) const WORK_KEY_PREFIX: &str = "/works/";

/// Display name substituted for author references that are not present in the author store. The
/// unresolved identifier itself is kept on the record.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Fixed timestamp layout of the `created.value` field in the works dump
/// (`yyyy-MM-dd'T'HH:mm:ss.SSSSSS`). A present value that does not match is fatal to the pass.
const CREATED_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Streaming loader for the works dump. Reads the author store (populated by the authors pass)
/// to denormalize author display names onto each saved book, and writes the book store.
pub struct WorkIngestor<'store, A: AuthorStore, B: BookStore> {
    authors: &'store A,
    books: &'store B,
}

impl<'store, A: AuthorStore, B: BookStore> WorkIngestor<'store, A, B> {
    #[must_use]
    #[inline]
    pub const fn new(authors: &'store A, books: &'store B) -> Self {
        Self { authors, books }
    }

    /// Streams the dump one line at a time, saving one `BookRecord` per line. Returns the number
    /// of records saved; the first failing line aborts the pass.
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
            let line_number = index + 1;
            let line = line?;
            let record = extract_record(&line).map_err(|source| IngestError::Extract {
                line: line_number,
                source,
            })?;

            let author_ids = extract_author_ids(&record, line_number)?;
            let authors = self.resolve_authors(author_ids).await?;
            let book = BookRecord::new(
                strip_key_prefix(&field_text(&record["key"]), WORK_KEY_PREFIX),
                field_text(&record["title"]),
                extract_description(&record, line_number)?,
                extract_published_date(&record, line_number)?,
                extract_cover_ids(&record, line_number)?,
                authors,
            );
            debug!("Saving book {}...", book.title);
            self.books.save(&book).await?;
            saved += 1;
        }
        Ok(saved)
    }

    /// One `find_by_id` per reference, in dump order, never batched. Resolution is purely
    /// read-time: an unknown author is not written back to the store.
    async fn resolve_authors(&self, ids: Vec<String>) -> Result<Vec<AuthorRef>, StoreError> {
        let mut resolved = Vec::with_capacity(ids.len());
        for id in ids {
            let name = match self.authors.find_by_id(&id).await? {
                Some(author) => author.name,
                None => UNKNOWN_AUTHOR.to_owned(),
            };
            resolved.push(AuthorRef::new(id, name));
        }
        Ok(resolved)
    }
}

/// The scalar quirk applies inside the gate: a `description` object without a `value` yields the
/// text `"null"`, while an absent `description` yields no description at all.
fn extract_description(record: &Value, line: usize) -> Result<Option<String>, IngestError> {
    match &record["description"] {
        Value::Null => Ok(None),
        Value::Object(description) => Ok(Some(field_text(
            description.get("value").unwrap_or(&Value::Null),
        ))),
        _ => Err(IngestError::FieldShape {
            line,
            field: "description",
        }),
    }
}

fn extract_published_date(record: &Value, line: usize) -> Result<Option<NaiveDate>, IngestError> {
    match &record["created"] {
        Value::Null => Ok(None),
        Value::Object(created) => {
            let raw = created
                .get("value")
                .and_then(Value::as_str)
                .ok_or(IngestError::FieldShape {
                    line,
                    field: "created.value",
                })?;
            let parsed = NaiveDateTime::parse_from_str(raw, CREATED_TIMESTAMP_FORMAT).map_err(
                |source| IngestError::Timestamp {
                    line,
                    value: raw.to_owned(),
                    source,
                },
            )?;
            Ok(Some(parsed.date()))
        }
        _ => Err(IngestError::FieldShape {
            line,
            field: "created",
        }),
    }
}

fn extract_cover_ids(record: &Value, line: usize) -> Result<Vec<String>, IngestError> {
    match &record["covers"] {
        Value::Null => Ok(Vec::new()),
        Value::Array(covers) => Ok(covers.iter().map(field_text).collect()),
        _ => Err(IngestError::FieldShape {
            line,
            field: "covers",
        }),
    }
}

fn extract_author_ids(record: &Value, line: usize) -> Result<Vec<String>, IngestError> {
    match &record["authors"] {
        Value::Null => Ok(Vec::new()),
        Value::Array(entries) => entries
            .iter()
            .map(|entry| {
                entry["author"]["key"]
                    .as_str()
                    .map(|key| strip_key_prefix(key, AUTHOR_KEY_PREFIX))
                    .ok_or(IngestError::FieldShape {
                        line,
                        field: "authors.author.key",
                    })
            })
            .collect(),
        _ => Err(IngestError::FieldShape {
            line,
            field: "authors",
        }),
    }
}
