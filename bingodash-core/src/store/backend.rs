use async_trait::async_trait;
use bingodash_contracts::prelude::CollectionItem;
use bingodash_model::{EntityId, Page};
use std::fmt::Debug;

use crate::api::ListRequest;
use crate::error::ApiResult;
use crate::query::PageSource;

/// The API calls one collection store needs, plus how its pages are cut.
#[async_trait]
pub trait CollectionBackend: Send + Sync + 'static {
    type Item: CollectionItem;
    type Filter: Clone + Default + PartialEq + Debug + Send + Sync + 'static;
    type Create: Send + Sync;
    type Update: Send + Sync;

    /// Collection name used in logs.
    const NAME: &'static str;
    const SOURCE: PageSource;
    /// Whether the list view owns the sort. Such a sort is dropped whenever
    /// the filter selects a different dataset.
    const SELF_MANAGED_SORT: bool = false;

    async fn list(
        &self,
        request: &ListRequest<Self::Filter>,
    ) -> ApiResult<Page<Self::Item>>;

    async fn create(&self, payload: &Self::Create) -> ApiResult<Self::Item>;

    async fn update(
        &self,
        id: &EntityId,
        payload: &Self::Update,
    ) -> ApiResult<Self::Item>;

    async fn remove(&self, id: &EntityId) -> ApiResult<()>;

    /// Rejects a create payload before any request is issued.
    fn validate_create(&self, _payload: &Self::Create) -> ApiResult<()> {
        Ok(())
    }
}
