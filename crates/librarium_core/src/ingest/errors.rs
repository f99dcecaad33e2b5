/// Failure to pull a JSON record out of a single dump line.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The line held no `{` at all, so there is no record to parse.
    #[error("no JSON object found")]
    MissingObject,

    /// The text from the first `{` onwards was not valid JSON.
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Failure of the backing store while saving or looking up a record.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Errors that abort an ingestion pass. There is no per-line recovery: the first failing line
/// ends the pass, and the error carries that line's number.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read dump: {0}")]
    Read(#[from] std::io::Error),

    #[error("line {line}: {source}")]
    Extract {
        line: usize,
        #[source]
        source: ExtractError,
    },

    /// A nested field did not have the expected shape, e.g. an `authors` entry without an
    /// `author.key` or a `created` object whose `value` is not a string.
    #[error("line {line}: field `{field}` has unexpected shape")]
    FieldShape { line: usize, field: &'static str },

    #[error("line {line}: invalid timestamp `{value}`: {source}")]
    Timestamp {
        line: usize,
        value: String,
        #[source]
        source: chrono::format::ParseError,
    },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
