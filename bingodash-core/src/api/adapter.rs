use async_trait::async_trait;
use bingodash_model::{
    AuthPayload, BingoCard, CategoryFilter, Challenge, ChallengeCategory,
    ChallengeStatus, CreateAdminRequest, CreateBingoCardRequest,
    CreatePromoCodeRequest, DailyRevenue, DateRange, DateRangeRevenue,
    EntityId, MonthlyRevenue, Page, PromoCode, RefreshRequest, SignInRequest,
    StartNextWeekResponse, StatusFilter, TotalRevenue, UpdateBingoCardRequest,
    UpdateChallengeStatusRequest, UpdatePromoCodeRequest, UpdateUserRequest,
    User, WeeklyRevenue, WirePagination,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::client::HttpApiClient;
use super::params::{ListRequest, range_params};
use super::routes::{self, with_id};
use super::service::AdminApi;
use crate::error::{ApiError, ApiResult};

#[derive(Deserialize)]
struct UsersPayload {
    #[serde(default)]
    users: Vec<User>,
    pagination: Option<WirePagination>,
}

#[derive(Deserialize)]
struct BingoCardsPayload {
    #[serde(rename = "bingoCards", default)]
    bingo_cards: Vec<BingoCard>,
    pagination: Option<WirePagination>,
}

#[derive(Deserialize)]
struct DailyPayload {
    #[serde(rename = "dailyRevenue", default)]
    daily_revenue: Vec<DailyRevenue>,
}

#[derive(Deserialize)]
struct WeeklyPayload {
    #[serde(rename = "weeklyRevenue", default)]
    weekly_revenue: Vec<WeeklyRevenue>,
}

#[derive(Deserialize)]
struct MonthlyPayload {
    #[serde(rename = "monthlyRevenue", default)]
    monthly_revenue: Vec<MonthlyRevenue>,
}

/// Builds a page, falling back to an empty first page when the response
/// carries no pagination block.
fn into_page<T>(
    items: Vec<T>,
    nested: Option<WirePagination>,
    outer: Option<WirePagination>,
    page_size: u32,
) -> Page<T> {
    let pagination = nested.or(outer).unwrap_or(WirePagination {
        page_size,
        ..WirePagination::default()
    });
    Page::new(items, pagination)
}

#[async_trait]
impl AdminApi for HttpApiClient {
    async fn set_token(&self, token: Option<String>) {
        HttpApiClient::set_token(self, token).await;
    }

    async fn token(&self) -> Option<String> {
        self.get_token().await
    }

    async fn sign_in(&self, request: &SignInRequest) -> ApiResult<AuthPayload> {
        debug!(email = %request.email, "signing in");
        Ok(self.post(routes::auth::SIGN_IN, request).await?.data)
    }

    async fn refresh(
        &self,
        request: &RefreshRequest,
    ) -> ApiResult<AuthPayload> {
        Ok(self.post(routes::auth::REFRESH, request).await?.data)
    }

    async fn verify_token(&self) -> ApiResult<bool> {
        match self.post_empty(routes::auth::VERIFY).await {
            Ok(()) => Ok(true),
            Err(ApiError::AuthExpired | ApiError::Request { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    async fn list_users(&self, request: &ListRequest) -> ApiResult<Page<User>> {
        let envelope = self
            .get::<UsersPayload>(
                routes::users::COLLECTION,
                &request.user_params(),
            )
            .await?;
        Ok(into_page(
            envelope.data.users,
            envelope.data.pagination,
            envelope.pagination,
            request.page_size,
        ))
    }

    async fn get_user(&self, id: &EntityId) -> ApiResult<User> {
        let path = with_id(routes::users::ITEM, id);
        Ok(self.get(&path, &[]).await?.data)
    }

    async fn create_admin(
        &self,
        request: &CreateAdminRequest,
    ) -> ApiResult<User> {
        Ok(self.post(routes::users::CREATE_ADMIN, request).await?.data)
    }

    async fn update_user(
        &self,
        id: &EntityId,
        request: &UpdateUserRequest,
    ) -> ApiResult<User> {
        let path = with_id(routes::users::ITEM, id);
        Ok(self.put(&path, request).await?.data)
    }

    async fn delete_user(&self, id: &EntityId) -> ApiResult<()> {
        self.delete(&with_id(routes::users::ITEM, id)).await
    }

    async fn reset_password(&self, id: &EntityId) -> ApiResult<()> {
        self.post_empty(&with_id(routes::users::RESET_PASSWORD, id))
            .await
    }

    async fn list_promo_codes(&self) -> ApiResult<Vec<PromoCode>> {
        Ok(self.get(routes::promo::COLLECTION, &[]).await?.data)
    }

    async fn get_promo_code(&self, id: &EntityId) -> ApiResult<PromoCode> {
        let path = with_id(routes::promo::ITEM, id);
        Ok(self.get(&path, &[]).await?.data)
    }

    async fn create_promo_code(
        &self,
        request: &CreatePromoCodeRequest,
    ) -> ApiResult<PromoCode> {
        Ok(self.post(routes::promo::COLLECTION, request).await?.data)
    }

    async fn update_promo_code(
        &self,
        id: &EntityId,
        request: &UpdatePromoCodeRequest,
    ) -> ApiResult<PromoCode> {
        let path = with_id(routes::promo::ITEM, id);
        Ok(self.put(&path, request).await?.data)
    }

    async fn delete_promo_code(&self, id: &EntityId) -> ApiResult<()> {
        self.delete(&with_id(routes::promo::ITEM, id)).await
    }

    async fn toggle_promo_code(&self, id: &EntityId) -> ApiResult<PromoCode> {
        let path = with_id(routes::promo::TOGGLE, id);
        Ok(self.patch(&path, &Value::Null).await?.data)
    }

    async fn list_bingo_cards(
        &self,
        request: &ListRequest<CategoryFilter>,
    ) -> ApiResult<Page<BingoCard>> {
        let envelope = self
            .get::<BingoCardsPayload>(
                routes::bingo_cards::COLLECTION,
                &request.card_params(),
            )
            .await?;
        Ok(into_page(
            envelope.data.bingo_cards,
            envelope.data.pagination,
            envelope.pagination,
            request.page_size,
        ))
    }

    async fn get_bingo_card(&self, id: &EntityId) -> ApiResult<BingoCard> {
        let path = with_id(routes::bingo_cards::ITEM, id);
        Ok(self.get(&path, &[]).await?.data)
    }

    async fn create_bingo_card(
        &self,
        request: &CreateBingoCardRequest,
    ) -> ApiResult<BingoCard> {
        Ok(self.post(routes::bingo_cards::COLLECTION, request).await?.data)
    }

    async fn update_bingo_card(
        &self,
        id: &EntityId,
        request: &UpdateBingoCardRequest,
    ) -> ApiResult<BingoCard> {
        let path = with_id(routes::bingo_cards::ITEM, id);
        Ok(self.patch(&path, request).await?.data)
    }

    async fn delete_bingo_card(&self, id: &EntityId) -> ApiResult<()> {
        self.delete(&with_id(routes::bingo_cards::ITEM, id)).await
    }

    async fn list_categories(&self) -> ApiResult<Vec<ChallengeCategory>> {
        Ok(self.get(routes::categories::COLLECTION, &[]).await?.data)
    }

    async fn list_challenges(
        &self,
        request: &ListRequest<StatusFilter>,
    ) -> ApiResult<Page<Challenge>> {
        let envelope = self
            .get::<Vec<Challenge>>(
                routes::challenges::ADMIN_COLLECTION,
                &request.challenge_params(),
            )
            .await?;
        Ok(into_page(
            envelope.data,
            None,
            envelope.pagination,
            request.page_size,
        ))
    }

    async fn start_next_week(
        &self,
        id: &EntityId,
    ) -> ApiResult<StartNextWeekResponse> {
        let path = with_id(routes::challenges::START_NEXT_WEEK, id);
        Ok(self.post(&path, &Value::Null).await?.data)
    }

    async fn delete_challenge(&self, id: &EntityId) -> ApiResult<()> {
        self.delete(&with_id(routes::challenges::ADMIN_ITEM, id))
            .await
    }

    async fn update_challenge_status(
        &self,
        id: &EntityId,
        status: ChallengeStatus,
    ) -> ApiResult<Challenge> {
        let path = with_id(routes::challenges::STATUS, id);
        let body = UpdateChallengeStatusRequest { status };
        Ok(self.patch(&path, &body).await?.data)
    }

    async fn revenue_total(&self) -> ApiResult<TotalRevenue> {
        Ok(self.get(routes::revenue::TOTAL, &[]).await?.data)
    }

    async fn revenue_daily(&self) -> ApiResult<Vec<DailyRevenue>> {
        let envelope = self.get::<DailyPayload>(routes::revenue::DAILY, &[]);
        Ok(envelope.await?.data.daily_revenue)
    }

    async fn revenue_weekly(&self) -> ApiResult<Vec<WeeklyRevenue>> {
        let envelope = self.get::<WeeklyPayload>(routes::revenue::WEEKLY, &[]);
        Ok(envelope.await?.data.weekly_revenue)
    }

    async fn revenue_monthly(&self) -> ApiResult<Vec<MonthlyRevenue>> {
        let envelope =
            self.get::<MonthlyPayload>(routes::revenue::MONTHLY, &[]);
        Ok(envelope.await?.data.monthly_revenue)
    }

    async fn revenue_range(
        &self,
        range: &DateRange,
    ) -> ApiResult<DateRangeRevenue> {
        Ok(self
            .get(routes::revenue::RANGE, &range_params(range))
            .await?
            .data)
    }
}
