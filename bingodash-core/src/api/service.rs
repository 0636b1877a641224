//! Service trait over the admin REST surface.
//!
//! Stores depend on this trait rather than on [`HttpApiClient`] so tests can
//! swap in mocks and scripted stubs.
//!
//! [`HttpApiClient`]: super::HttpApiClient

use async_trait::async_trait;
use bingodash_model::{
    AuthPayload, BingoCard, CategoryFilter, Challenge, ChallengeCategory,
    ChallengeStatus, CreateAdminRequest, CreateBingoCardRequest,
    CreatePromoCodeRequest, DailyRevenue, DateRange, DateRangeRevenue,
    EntityId, MonthlyRevenue, Page, PromoCode, RefreshRequest, SignInRequest,
    StartNextWeekResponse, StatusFilter, TotalRevenue, UpdateBingoCardRequest,
    UpdatePromoCodeRequest, UpdateUserRequest, User, WeeklyRevenue,
};

use super::params::ListRequest;
use crate::error::ApiResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminApi: Send + Sync {
    // === Session ===

    async fn set_token(&self, token: Option<String>);
    async fn token(&self) -> Option<String>;

    async fn sign_in(&self, request: &SignInRequest) -> ApiResult<AuthPayload>;
    async fn refresh(&self, request: &RefreshRequest)
    -> ApiResult<AuthPayload>;
    /// `true` while the installed token is still accepted.
    async fn verify_token(&self) -> ApiResult<bool>;

    // === Users ===

    async fn list_users(&self, request: &ListRequest) -> ApiResult<Page<User>>;
    async fn get_user(&self, id: &EntityId) -> ApiResult<User>;
    async fn create_admin(&self, request: &CreateAdminRequest)
    -> ApiResult<User>;
    async fn update_user(
        &self,
        id: &EntityId,
        request: &UpdateUserRequest,
    ) -> ApiResult<User>;
    async fn delete_user(&self, id: &EntityId) -> ApiResult<()>;
    async fn reset_password(&self, id: &EntityId) -> ApiResult<()>;

    // === Promo codes ===

    /// The promo endpoint is unpaged; the whole collection comes back.
    async fn list_promo_codes(&self) -> ApiResult<Vec<PromoCode>>;
    async fn get_promo_code(&self, id: &EntityId) -> ApiResult<PromoCode>;
    async fn create_promo_code(
        &self,
        request: &CreatePromoCodeRequest,
    ) -> ApiResult<PromoCode>;
    async fn update_promo_code(
        &self,
        id: &EntityId,
        request: &UpdatePromoCodeRequest,
    ) -> ApiResult<PromoCode>;
    async fn delete_promo_code(&self, id: &EntityId) -> ApiResult<()>;
    async fn toggle_promo_code(&self, id: &EntityId) -> ApiResult<PromoCode>;

    // === Bingo cards ===

    async fn list_bingo_cards(
        &self,
        request: &ListRequest<CategoryFilter>,
    ) -> ApiResult<Page<BingoCard>>;
    async fn get_bingo_card(&self, id: &EntityId) -> ApiResult<BingoCard>;
    async fn create_bingo_card(
        &self,
        request: &CreateBingoCardRequest,
    ) -> ApiResult<BingoCard>;
    async fn update_bingo_card(
        &self,
        id: &EntityId,
        request: &UpdateBingoCardRequest,
    ) -> ApiResult<BingoCard>;
    async fn delete_bingo_card(&self, id: &EntityId) -> ApiResult<()>;
    async fn list_categories(&self) -> ApiResult<Vec<ChallengeCategory>>;

    // === Challenges ===

    async fn list_challenges(
        &self,
        request: &ListRequest<StatusFilter>,
    ) -> ApiResult<Page<Challenge>>;
    async fn start_next_week(
        &self,
        id: &EntityId,
    ) -> ApiResult<StartNextWeekResponse>;
    async fn delete_challenge(&self, id: &EntityId) -> ApiResult<()>;
    async fn update_challenge_status(
        &self,
        id: &EntityId,
        status: ChallengeStatus,
    ) -> ApiResult<Challenge>;

    // === Revenue ===

    async fn revenue_total(&self) -> ApiResult<TotalRevenue>;
    async fn revenue_daily(&self) -> ApiResult<Vec<DailyRevenue>>;
    async fn revenue_weekly(&self) -> ApiResult<Vec<WeeklyRevenue>>;
    async fn revenue_monthly(&self) -> ApiResult<Vec<MonthlyRevenue>>;
    async fn revenue_range(
        &self,
        range: &DateRange,
    ) -> ApiResult<DateRangeRevenue>;
}
