use std::future::Future;

use crate::model::Resource;
use crate::transport::{RequestBody, TransportError};

/// Remote operations on one resource collection.
///
/// Dialogs, confirmations and detail views depend only on this trait, so the
/// same create/delete flow drives both posts and devotions.
pub trait ResourceController: Send + Sync {
    type Item: Resource;

    /// Re-fetch the authoritative list into the local store.
    fn reload(&self) -> impl Future<Output = Result<Vec<Self::Item>, TransportError>> + Send;

    /// `POST /{collection}` with a multipart body; yields the created records.
    fn create(
        &self,
        body: RequestBody,
    ) -> impl Future<Output = Result<Vec<Self::Item>, TransportError>> + Send;

    /// `DELETE /{collection}/{id}`.
    fn delete(&self, id: u64) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// `GET /{collection}/{id}`.
    fn fetch_one(&self, id: u64) -> impl Future<Output = Result<Self::Item, TransportError>> + Send;
}
