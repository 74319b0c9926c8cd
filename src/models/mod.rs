//! Data models for Bookshelf

pub mod book;
pub mod claims;
pub mod member;

use serde::{de::DeserializeOwned, Serialize};

pub use book::Book;
pub use claims::Claims;
pub use member::Member;

/// An entity persisted in the primary store and mirrored into a search index.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Name of the search index holding this entity
    const INDEX: &'static str;
    /// Human readable singular name, used in logs and error messages
    const LABEL: &'static str;
    /// Plural form of [`Document::LABEL`]
    const LABEL_PLURAL: &'static str;

    /// Identifier assigned by the primary store, `None` before create
    fn id(&self) -> Option<i64>;
}
