//! Record types served by the content API and the traits that let the rest
//! of the crate treat them uniformly.
//!
//! A [`Resource`] knows its endpoints and how to decode list/create
//! responses; its [`Draft`] is the create form for it.

mod date;
mod devotion;
mod post;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ValidationError;
use crate::filter::Searchable;
use crate::transport::{RequestBody, TransportError};

pub use date::format_date;
pub use devotion::{DailyDevotion, DevotionDraft};
pub use post::{DailyPost, PostDraft, PostFields, PostMode};

/// Pagination position of a paginated collection. Server-authoritative:
/// `page <= total_pages` is expected but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub page: u32,
    pub total_pages: u32,
}

/// One decoded list response.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<R> {
    pub items: Vec<R>,
    /// Present only for paginated resources.
    pub cursor: Option<Cursor>,
}

/// A record type managed by the dashboard.
pub trait Resource: Searchable + Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Path segment of the collection, e.g. `"posts"`.
    const COLLECTION: &'static str;
    /// Singular display noun, e.g. `"Post"`.
    const NOUN: &'static str;

    /// Create form for this resource.
    type Draft: Draft<Resource = Self>;

    fn id(&self) -> u64;

    /// Short text identifying the record in confirmations.
    fn label(&self) -> &str;

    /// List endpoint for the given page. Unpaginated resources ignore `page`.
    fn list_path(page: u32) -> String;

    fn decode_list(body: Value) -> Result<Listing<Self>, TransportError>;

    /// Decode a create response into the records it created.
    fn decode_created(body: Value) -> Result<Vec<Self>, TransportError>;

    fn collection_path() -> String {
        format!("/{}", Self::COLLECTION)
    }

    fn item_path(id: u64) -> String {
        format!("/{}/{}", Self::COLLECTION, id)
    }

    fn decode_one(body: Value) -> Result<Self, TransportError> {
        decode(body)
    }
}

/// Editable create form for a resource.
pub trait Draft: Default + Clone + Send + Sync + 'static {
    type Resource: Resource;

    /// Check required fields. Runs before any request is made.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Multipart payload for `POST /{collection}`.
    fn to_body(&self) -> RequestBody;

    /// Toast shown after a successful create.
    fn success_message(&self) -> &'static str;
}

pub(crate) fn decode<T: DeserializeOwned>(body: Value) -> Result<T, TransportError> {
    serde_json::from_value(body.clone()).map_err(|_| TransportError::Decode {
        raw: body.to_string(),
    })
}

/// Push `(name, value)` when the trimmed value is not blank.
pub(crate) fn push_optional(fields: &mut Vec<(String, String)>, name: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        fields.push((name.to_string(), value.to_string()));
    }
}
