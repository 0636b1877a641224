use std::sync::Arc;

use async_trait::async_trait;
use bingodash_model::chrono::{DateTime, Utc};
use bingodash_model::{
    CreatePromoCodeRequest, EntityId, Page, PromoCode, PromoCodeSummary,
    UpdatePromoCodeRequest,
};

use super::backend::CollectionBackend;
use super::collection::CollectionStore;
use crate::api::{AdminApi, ListRequest};
use crate::error::ApiResult;
use crate::query::PageSource;

/// Promo codes arrive as one unpaged list; search and paging happen
/// locally.
#[derive(Clone)]
pub struct PromoCodesBackend {
    api: Arc<dyn AdminApi>,
}

impl PromoCodesBackend {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self { api }
    }
}

impl std::fmt::Debug for PromoCodesBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromoCodesBackend").finish_non_exhaustive()
    }
}

#[async_trait]
impl CollectionBackend for PromoCodesBackend {
    type Item = PromoCode;
    type Filter = ();
    type Create = CreatePromoCodeRequest;
    type Update = UpdatePromoCodeRequest;

    const NAME: &'static str = "promo_codes";
    const SOURCE: PageSource = PageSource::Client;

    async fn list(&self, _request: &ListRequest) -> ApiResult<Page<PromoCode>> {
        let codes = self.api.list_promo_codes().await?;
        Ok(Page::unpaged(codes))
    }

    async fn create(
        &self,
        payload: &CreatePromoCodeRequest,
    ) -> ApiResult<PromoCode> {
        self.api.create_promo_code(payload).await
    }

    async fn update(
        &self,
        id: &EntityId,
        payload: &UpdatePromoCodeRequest,
    ) -> ApiResult<PromoCode> {
        self.api.update_promo_code(id, payload).await
    }

    async fn remove(&self, id: &EntityId) -> ApiResult<()> {
        self.api.delete_promo_code(id).await
    }

    fn validate_create(
        &self,
        payload: &CreatePromoCodeRequest,
    ) -> ApiResult<()> {
        payload.validate().map_err(Into::into)
    }
}

pub type PromoCodeStore = CollectionStore<PromoCodesBackend>;

impl CollectionStore<PromoCodesBackend> {
    /// Flips a code between enabled and disabled and splices the returned
    /// row in place.
    pub async fn toggle(&self, id: &EntityId) -> ApiResult<PromoCode> {
        let api = &self.backend().api;
        let code = self.tracked("toggle", api.toggle_promo_code(id)).await?;
        self.upsert_local(code.clone());
        Ok(code)
    }

    /// Header counters over the whole loaded list, ignoring search.
    pub fn summary(&self, now: DateTime<Utc>) -> PromoCodeSummary {
        PromoCodeSummary::from_codes(&self.items(), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockAdminApi;
    use crate::query::SortState;
    use bingodash_model::chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn code(n: usize) -> PromoCode {
        PromoCode {
            id: format!("p{n}").into(),
            code: format!("CODE{n:02}"),
            expiration_date: now() + Duration::days(n as i64 - 3),
            usage_limit: 10,
            deleted: n == 7,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn store_with(count: usize) -> PromoCodeStore {
        let mut api = MockAdminApi::new();
        api.expect_list_promo_codes()
            .returning(move || Ok((1..=count).map(code).collect()));
        api.expect_toggle_promo_code().returning(|id| {
            let mut toggled = code(1);
            toggled.id = id.clone();
            toggled.deleted = true;
            Ok(toggled)
        });
        PromoCodeStore::new(PromoCodesBackend::new(Arc::new(api)), 10)
    }

    #[tokio::test]
    async fn pages_are_local_windows_over_the_filtered_list() {
        let store = store_with(23);
        store.fetch().await.unwrap();

        let page = store.page();
        assert_eq!((page.total(), page.total_pages()), (23, 3));

        store.set_page(3);
        let visible = store.visible();
        assert_eq!(visible.len(), 3);
        assert_eq!(visible[0].code, "CODE21");
    }

    #[tokio::test]
    async fn search_filters_code_and_resets_page() {
        let store = store_with(23);
        store.fetch().await.unwrap();
        store.set_page(2);

        store.set_search_term("code1");
        assert_eq!(store.page().current_page(), 1);
        let codes: Vec<_> =
            store.visible().into_iter().map(|c| c.code).collect();
        assert_eq!(codes.len(), 10);
        assert!(codes.iter().all(|c| c.starts_with("CODE1")));
        assert_eq!(store.page().total(), 10);
    }

    #[tokio::test]
    async fn forced_page_past_the_end_is_empty_not_clamped() {
        let store = store_with(25);
        store.fetch().await.unwrap();
        store.set_page(4);
        assert_eq!(store.page().current_page(), 4);
        assert_eq!(store.page().total_pages(), 3);
        assert!(store.visible().is_empty());
    }

    #[tokio::test]
    async fn store_sort_applies_before_windowing() {
        let store = store_with(12);
        store.fetch().await.unwrap();
        store.set_sort(SortState::descending("code"));
        assert_eq!(store.visible()[0].code, "CODE12");
    }

    #[tokio::test]
    async fn toggle_splices_row_and_summary_counts_it() {
        let store = store_with(5);
        store.fetch().await.unwrap();
        let before = store.summary(now());

        store.toggle(&EntityId::from("p5")).await.unwrap();
        let after = store.summary(now());

        assert_eq!(store.items().len(), 5);
        assert_eq!(after.total, before.total);
        assert_eq!(after.active + 1, before.active);
    }
}
