use crate::database::queries::Db;
use crate::database::types::{AuthorRecord, BookRecord};
use crate::ingest::errors::StoreError;

/// Save/lookup capability for author records. During the works pass the store is only read,
/// never mutated.
#[allow(
    async_fn_in_trait,
    reason = "Consumed through generics only, no Send bound needed"
)]
pub trait AuthorStore {
    async fn save(&self, author: &AuthorRecord) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<AuthorRecord>, StoreError>;
}

/// Save capability for book records.
#[allow(
    async_fn_in_trait,
    reason = "Consumed through generics only, no Send bound needed"
)]
pub trait BookStore {
    async fn save(&self, book: &BookRecord) -> Result<(), StoreError>;
}

impl AuthorStore for Db {
    #[inline]
    async fn save(&self, author: &AuthorRecord) -> Result<(), StoreError> {
        Ok(self.upsert_author(author).await?)
    }

    #[inline]
    async fn find_by_id(&self, id: &str) -> Result<Option<AuthorRecord>, StoreError> {
        Ok(self.fetch_author(id).await?)
    }
}

impl BookStore for Db {
    #[inline]
    async fn save(&self, book: &BookRecord) -> Result<(), StoreError> {
        Ok(self.upsert_book(book).await?)
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use super::{AuthorRecord, AuthorStore, BookRecord, BookStore, StoreError};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory stand-in for the author table, used by the ingestor tests.
    #[derive(Default)]
    pub struct MemoryAuthorStore {
        pub authors: Mutex<HashMap<String, AuthorRecord>>,
    }

    impl AuthorStore for MemoryAuthorStore {
        async fn save(&self, author: &AuthorRecord) -> Result<(), StoreError> {
            self.authors
                .lock()
                .unwrap()
                .insert(author.id.clone(), author.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<AuthorRecord>, StoreError> {
            Ok(self.authors.lock().unwrap().get(id).cloned())
        }
    }

    /// In-memory stand-in for the book table, keeping save order.
    #[derive(Default)]
    pub struct MemoryBookStore {
        pub books: Mutex<Vec<BookRecord>>,
    }

    impl BookStore for MemoryBookStore {
        async fn save(&self, book: &BookRecord) -> Result<(), StoreError> {
            self.books.lock().unwrap().push(book.clone());
            Ok(())
        }
    }
}
