use std::sync::Arc;

use async_trait::async_trait;
use bingodash_model::{
    BingoCard, CategoryFilter, ChallengeCategory, CreateBingoCardRequest,
    EntityId, Page, UpdateBingoCardRequest,
};
use parking_lot::RwLock;
use tracing::warn;

use super::backend::CollectionBackend;
use super::collection::CollectionStore;
use crate::api::{AdminApi, ListRequest};
use crate::error::ApiResult;
use crate::query::PageSource;

/// Bingo cards are paged server-side and filtered by category.
#[derive(Clone)]
pub struct BingoCardsBackend {
    api: Arc<dyn AdminApi>,
    categories: Arc<RwLock<Vec<ChallengeCategory>>>,
}

impl BingoCardsBackend {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self {
            api,
            categories: Arc::default(),
        }
    }
}

impl std::fmt::Debug for BingoCardsBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BingoCardsBackend")
            .field("categories", &self.categories.read().len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CollectionBackend for BingoCardsBackend {
    type Item = BingoCard;
    type Filter = CategoryFilter;
    type Create = CreateBingoCardRequest;
    type Update = UpdateBingoCardRequest;

    const NAME: &'static str = "bingo_cards";
    const SOURCE: PageSource = PageSource::Server;
    const SELF_MANAGED_SORT: bool = true;

    async fn list(
        &self,
        request: &ListRequest<CategoryFilter>,
    ) -> ApiResult<Page<BingoCard>> {
        self.api.list_bingo_cards(request).await
    }

    async fn create(
        &self,
        payload: &CreateBingoCardRequest,
    ) -> ApiResult<BingoCard> {
        self.api.create_bingo_card(payload).await
    }

    async fn update(
        &self,
        id: &EntityId,
        payload: &UpdateBingoCardRequest,
    ) -> ApiResult<BingoCard> {
        self.api.update_bingo_card(id, payload).await
    }

    async fn remove(&self, id: &EntityId) -> ApiResult<()> {
        self.api.delete_bingo_card(id).await
    }

    fn validate_create(
        &self,
        payload: &CreateBingoCardRequest,
    ) -> ApiResult<()> {
        payload.validate().map_err(Into::into)
    }
}

pub type BingoCardStore = CollectionStore<BingoCardsBackend>;

impl CollectionStore<BingoCardsBackend> {
    /// Loads the category list used by the filter and the card form.
    ///
    /// A failure is logged and returned but does not touch the card list's
    /// error.
    pub async fn load_categories(&self) -> ApiResult<Vec<ChallengeCategory>> {
        let backend = self.backend();
        match backend.api.list_categories().await {
            Ok(categories) => {
                *backend.categories.write() = categories.clone();
                Ok(categories)
            }
            Err(err) => {
                warn!(error = %err, "failed to load challenge categories");
                Err(err)
            }
        }
    }

    pub fn categories(&self) -> Vec<ChallengeCategory> {
        self.backend().categories.read().clone()
    }

    pub fn category_name(&self, id: &EntityId) -> Option<String> {
        self.backend()
            .categories
            .read()
            .iter()
            .find(|c| &c.id == id)
            .map(|c| c.name.clone())
    }

    /// Switches the category filter, returning to page 1, and refetches.
    pub async fn select_category(
        &self,
        filter: CategoryFilter,
    ) -> ApiResult<()> {
        self.set_filter(filter);
        self.fetch().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockAdminApi;
    use crate::error::ApiError;
    use crate::query::SortState;

    fn category(id: &str, name: &str) -> ChallengeCategory {
        ChallengeCategory {
            id: id.into(),
            name: name.into(),
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn category_filter_resets_page_and_is_sent() {
        let mut api = MockAdminApi::new();
        api.expect_list_bingo_cards()
            .withf(|request| {
                request.page == 1
                    && request.filter
                        == CategoryFilter::Category(EntityId::from("fit"))
            })
            .times(1)
            .returning(|_| Ok(Page::unpaged(Vec::new())));

        let store =
            BingoCardStore::new(BingoCardsBackend::new(Arc::new(api)), 50);
        store.set_page(5);
        store
            .select_category(CategoryFilter::Category("fit".into()))
            .await
            .unwrap();
        assert_eq!(store.page().current_page(), 1);
    }

    #[tokio::test]
    async fn switching_category_drops_the_table_sort() {
        let mut api = MockAdminApi::new();
        api.expect_list_bingo_cards()
            .withf(|request| request.sort == SortState::Unsorted)
            .times(1)
            .returning(|_| Ok(Page::unpaged(Vec::new())));

        let store =
            BingoCardStore::new(BingoCardsBackend::new(Arc::new(api)), 50);
        store.set_sort(SortState::descending("title"));
        store
            .select_category(CategoryFilter::Category("food".into()))
            .await
            .unwrap();
        assert_eq!(store.sort(), SortState::Unsorted);
    }

    #[tokio::test]
    async fn categories_are_cached_and_failures_stay_off_the_list() {
        let mut api = MockAdminApi::new();
        let mut first = true;
        api.expect_list_categories().times(2).returning(move || {
            if std::mem::take(&mut first) {
                Ok(vec![category("fit", "Fitness"), category("food", "Food")])
            } else {
                Err(ApiError::Transport("connection reset".into()))
            }
        });

        let store =
            BingoCardStore::new(BingoCardsBackend::new(Arc::new(api)), 50);
        store.load_categories().await.unwrap();
        assert_eq!(
            store.category_name(&EntityId::from("food")).as_deref(),
            Some("Food")
        );

        assert!(store.load_categories().await.is_err());
        assert_eq!(store.categories().len(), 2);
        assert_eq!(store.error(), None);
    }
}
