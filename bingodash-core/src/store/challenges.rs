use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use bingodash_model::{
    Challenge, ChallengeStatus, EntityId, Page, StartNextWeekResponse,
    StatusFilter, UpdateChallengeStatusRequest,
};
use tracing::{info, warn};

use super::backend::CollectionBackend;
use super::collection::CollectionStore;
use crate::api::{AdminApi, ListRequest};
use crate::error::ApiResult;
use crate::query::PageSource;

/// Challenges are created by organizers in the app, so the dashboard can
/// only moderate them: status changes, week rollover and deletion.
#[derive(Clone)]
pub struct ChallengesBackend {
    api: Arc<dyn AdminApi>,
}

impl ChallengesBackend {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self { api }
    }
}

impl std::fmt::Debug for ChallengesBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChallengesBackend").finish_non_exhaustive()
    }
}

#[async_trait]
impl CollectionBackend for ChallengesBackend {
    type Item = Challenge;
    type Filter = StatusFilter;
    type Create = Infallible;
    type Update = UpdateChallengeStatusRequest;

    const NAME: &'static str = "challenges";
    const SOURCE: PageSource = PageSource::Server;
    const SELF_MANAGED_SORT: bool = true;

    async fn list(
        &self,
        request: &ListRequest<StatusFilter>,
    ) -> ApiResult<Page<Challenge>> {
        self.api.list_challenges(request).await
    }

    async fn create(&self, payload: &Infallible) -> ApiResult<Challenge> {
        match *payload {}
    }

    async fn update(
        &self,
        id: &EntityId,
        payload: &UpdateChallengeStatusRequest,
    ) -> ApiResult<Challenge> {
        self.api.update_challenge_status(id, payload.status).await
    }

    async fn remove(&self, id: &EntityId) -> ApiResult<()> {
        self.api.delete_challenge(id).await
    }
}

pub type ChallengeStore = CollectionStore<ChallengesBackend>;

impl CollectionStore<ChallengesBackend> {
    /// Moves a challenge to `next`, then reloads the current page.
    ///
    /// When the row is loaded, transitions its lifecycle does not allow are
    /// rejected without a request.
    pub async fn change_status(
        &self,
        id: &EntityId,
        next: ChallengeStatus,
    ) -> ApiResult<Challenge> {
        if let Some(current) = self.find(id) {
            current.status.ensure_transition(next)?;
        }
        let updated = self
            .update(id, &UpdateChallengeStatusRequest { status: next })
            .await?;
        info!(challenge = %id, status = %next, "challenge status changed");
        self.refresh_after_write().await;
        Ok(updated)
    }

    /// Rolls the challenge over to its next week, then reloads the page.
    pub async fn start_next_week(
        &self,
        id: &EntityId,
    ) -> ApiResult<StartNextWeekResponse> {
        let api = &self.backend().api;
        let response = self
            .tracked("start_next_week", api.start_next_week(id))
            .await?;
        info!(
            challenge = %id,
            week = response.week_number,
            "started next challenge week"
        );
        self.refresh_after_write().await;
        Ok(response)
    }

    /// Deletes the challenge, then reloads so the page refills.
    pub async fn delete(&self, id: &EntityId) -> ApiResult<()> {
        self.remove(id).await?;
        self.refresh_after_write().await;
        Ok(())
    }

    pub async fn select_status(&self, filter: StatusFilter) -> ApiResult<()> {
        self.set_filter(filter);
        self.fetch().await
    }

    /// Reloads after an accepted write. A failure only marks the store.
    async fn refresh_after_write(&self) {
        if let Err(err) = self.fetch().await {
            warn!(
                store = ChallengesBackend::NAME,
                error = %err,
                "reload after write failed"
            );
        }
    }
}
