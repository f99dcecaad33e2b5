use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One author from the Open Library authors dump, keyed by the dump identifier with the
/// `/authors/` prefix stripped.
///
/// Fields that are absent in the dump line carry the literal text `"null"` rather than an empty
/// string. The loader preserves this quirk of the dump tooling instead of masking it.
#[non_exhaustive]
#[derive(Serialize, Debug, Deserialize, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AuthorRecord {
    pub id: String,
    pub name: String,
    pub personal_name: String,
}

impl AuthorRecord {
    #[must_use]
    #[inline]
    pub const fn new(id: String, name: String, personal_name: String) -> Self {
        Self {
            id,
            name,
            personal_name,
        }
    }
}

/// One author reference on a work, resolved at load time. Keeping the identifier and the
/// resolved display name in a single pair keeps the two in lockstep per index.
#[non_exhaustive]
#[derive(Serialize, Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AuthorRef {
    pub id: String,
    pub name: String,
}

impl AuthorRef {
    #[must_use]
    #[inline]
    pub const fn new(id: String, name: String) -> Self {
        Self { id, name }
    }
}

/// One work from the Open Library works dump, keyed by the dump identifier with the `/works/`
/// prefix stripped. `authors` is a read-once snapshot taken while loading; it is never refreshed
/// if the referenced author records change afterwards.
#[non_exhaustive]
#[derive(Serialize, Debug, Deserialize, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub published_date: Option<NaiveDate>,
    #[sqlx(json)]
    pub cover_ids: Vec<String>,
    #[sqlx(json)]
    pub authors: Vec<AuthorRef>,
}

impl BookRecord {
    #[must_use]
    #[inline]
    pub const fn new(
        id: String,
        title: String,
        description: Option<String>,
        published_date: Option<NaiveDate>,
        cover_ids: Vec<String>,
        authors: Vec<AuthorRef>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            published_date,
            cover_ids,
            authors,
        }
    }

    /// The referenced author identifiers, in dump order.
    #[inline]
    pub fn author_ids(&self) -> impl Iterator<Item = &str> {
        self.authors.iter().map(|author| author.id.as_str())
    }

    /// The resolved author display names, index-parallel to [`Self::author_ids`].
    #[inline]
    pub fn author_names(&self) -> impl Iterator<Item = &str> {
        self.authors.iter().map(|author| author.name.as_str())
    }
}
