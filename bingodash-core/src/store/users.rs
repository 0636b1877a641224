use std::sync::Arc;

use async_trait::async_trait;
use bingodash_model::{
    CreateAdminRequest, EntityId, Page, UpdateUserRequest, User,
};
use tracing::info;

use super::backend::CollectionBackend;
use super::collection::CollectionStore;
use crate::api::{AdminApi, ListRequest};
use crate::error::ApiResult;
use crate::query::PageSource;

/// Users are paged, sorted and searched server-side.
#[derive(Clone)]
pub struct UsersBackend {
    api: Arc<dyn AdminApi>,
}

impl UsersBackend {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self { api }
    }
}

impl std::fmt::Debug for UsersBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsersBackend").finish_non_exhaustive()
    }
}

#[async_trait]
impl CollectionBackend for UsersBackend {
    type Item = User;
    type Filter = ();
    type Create = CreateAdminRequest;
    type Update = UpdateUserRequest;

    const NAME: &'static str = "users";
    const SOURCE: PageSource = PageSource::Server;

    async fn list(&self, request: &ListRequest) -> ApiResult<Page<User>> {
        self.api.list_users(request).await
    }

    async fn create(&self, payload: &CreateAdminRequest) -> ApiResult<User> {
        self.api.create_admin(payload).await
    }

    async fn update(
        &self,
        id: &EntityId,
        payload: &UpdateUserRequest,
    ) -> ApiResult<User> {
        self.api.update_user(id, payload).await
    }

    async fn remove(&self, id: &EntityId) -> ApiResult<()> {
        self.api.delete_user(id).await
    }

    fn validate_create(&self, payload: &CreateAdminRequest) -> ApiResult<()> {
        payload.validate().map_err(Into::into)
    }
}

pub type UserStore = CollectionStore<UsersBackend>;

impl CollectionStore<UsersBackend> {
    /// Asks the backend to issue a password reset for `id`. The list is
    /// left as is.
    pub async fn reset_password(&self, id: &EntityId) -> ApiResult<()> {
        let api = &self.backend().api;
        self.tracked("reset_password", api.reset_password(id))
            .await?;
        info!(user = %id, "password reset requested");
        Ok(())
    }

    /// Fetches one user and refreshes its row if loaded.
    pub async fn load_one(&self, id: &EntityId) -> ApiResult<User> {
        let api = &self.backend().api;
        let user = self.tracked("get", api.get_user(id)).await?;
        self.upsert_local(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockAdminApi;
    use crate::error::ApiError;
    use crate::query::SortState;
    use bingodash_model::WirePagination;
    use bingodash_model::chrono::{TimeZone, Utc};
    use mockall::predicate::eq;

    fn user(id: &str, email: &str) -> User {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        User {
            id: id.into(),
            email: email.into(),
            first_name: "Test".into(),
            last_name: id.into(),
            display_name: None,
            country: None,
            timezone: None,
            push_reminders: false,
            auth_provider: "email".into(),
            image: None,
            role: "user".into(),
            activated: Some(true),
            created_at: at,
            updated_at: at,
        }
    }

    fn store(api: MockAdminApi) -> UserStore {
        UserStore::new(UsersBackend::new(Arc::new(api)), 10)
    }

    #[tokio::test]
    async fn fetch_sends_query_and_adopts_server_pagination() {
        let mut api = MockAdminApi::new();
        api.expect_list_users()
            .withf(|request| {
                request.page == 1
                    && request.search.as_deref() == Some("ada")
                    && request.sort == SortState::descending("email")
            })
            .times(1)
            .returning(|_| {
                Ok(Page::new(
                    vec![user("u1", "ada@x.io")],
                    WirePagination {
                        total: 31,
                        page: 1,
                        page_size: 10,
                        total_pages: 4,
                    },
                ))
            });

        let store = store(api);
        store.set_page(3);
        store.set_search_term("ada");
        store.set_sort(SortState::descending("email"));
        store.fetch().await.unwrap();

        assert_eq!(store.visible().len(), 1);
        assert_eq!(store.page().total_pages(), 4);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn failed_fetch_keeps_prior_rows() {
        let mut api = MockAdminApi::new();
        let mut calls = 0;
        api.expect_list_users().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(Page::unpaged(vec![user("u1", "a@x.io")]))
            } else {
                Err(ApiError::Request {
                    status: 500,
                    message: "database unavailable".into(),
                })
            }
        });

        let store = store(api);
        store.fetch().await.unwrap();
        assert!(store.fetch().await.is_err());

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.error().as_deref(), Some("database unavailable"));
        store.clear_error();
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn auth_expiry_is_surfaced_distinctly() {
        let mut api = MockAdminApi::new();
        api.expect_list_users()
            .returning(|_| Err(ApiError::AuthExpired));

        let err = store(api).fetch().await.unwrap_err();
        assert!(err.is_auth_expired());
    }

    #[tokio::test]
    async fn invalid_admin_is_rejected_before_any_request() {
        let mut api = MockAdminApi::new();
        api.expect_create_admin().never();

        let store = store(api);
        let request = CreateAdminRequest {
            email: "ops@x.io".into(),
            first_name: "Op".into(),
            last_name: "Erator".into(),
            password: "abc".into(),
            confirm_password: "abc".into(),
            ..Default::default()
        };
        let err = store.create(&request).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn create_appends_and_update_replaces_by_id() {
        let mut api = MockAdminApi::new();
        api.expect_list_users().returning(|_| {
            Ok(Page::unpaged(vec![user("u1", "a@x.io"), user("u2", "b@x.io")]))
        });
        api.expect_create_admin()
            .returning(|_| Ok(user("u3", "c@x.io")));
        api.expect_update_user()
            .with(eq(EntityId::from("u1")), mockall::predicate::always())
            .returning(|_, _| Ok(user("u1", "renamed@x.io")));

        let store = store(api);
        store.fetch().await.unwrap();

        let request = CreateAdminRequest {
            email: "c@x.io".into(),
            first_name: "C".into(),
            last_name: "Admin".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            ..Default::default()
        };
        store.create(&request).await.unwrap();
        let ids: Vec<_> =
            store.items().into_iter().map(|u| u.id.to_string()).collect();
        assert_eq!(ids, ["u1", "u2", "u3"]);

        store
            .update(&EntityId::from("u1"), &UpdateUserRequest::default())
            .await
            .unwrap();
        let items = store.items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].email, "renamed@x.io");
    }

    #[tokio::test]
    async fn failed_remove_leaves_list_untouched() {
        let mut api = MockAdminApi::new();
        api.expect_list_users()
            .returning(|_| Ok(Page::unpaged(vec![user("u1", "a@x.io")])));
        api.expect_delete_user().returning(|_| {
            Err(ApiError::Request {
                status: 409,
                message: "user owns active challenges".into(),
            })
        });

        let store = store(api);
        store.fetch().await.unwrap();
        assert!(store.remove(&EntityId::from("u1")).await.is_err());
        assert_eq!(store.items().len(), 1);
        assert_eq!(
            store.error().as_deref(),
            Some("user owns active challenges")
        );
    }

    #[test]
    fn caller_driven_sort_survives_filter_reset() {
        let store = store(MockAdminApi::new());
        store.set_sort(SortState::descending("created_at"));
        store.set_filter(());
        assert_eq!(store.sort(), SortState::descending("created_at"));
        assert_eq!(store.page().current_page(), 1);
    }
}
