//! Core data model definitions shared across bingodash crates.
#![allow(missing_docs)]

pub use ::chrono;

pub mod auth;
pub mod bingo_card;
pub mod challenge;
pub mod error;
pub mod ids;
pub mod pagination;
pub mod promo;
pub mod revenue;
pub mod user;

// Intentionally curated re-exports for downstream consumers.
pub use auth::{AuthPayload, RefreshRequest, SignInRequest};
pub use bingo_card::{
    BingoCard, BingoCardType, CategoryFilter, ChallengeCategory,
    CreateBingoCardRequest, UpdateBingoCardRequest,
};
pub use challenge::{
    Challenge, ChallengeOrganizer, ChallengePlan, ChallengeStatus,
    StartNextWeekResponse, StatusFilter, UpdateChallengeStatusRequest,
};
pub use error::{ModelError, Result as ModelResult};
pub use ids::EntityId;
pub use pagination::{Page, WirePagination};
pub use promo::{
    CreatePromoCodeRequest, PromoCode, PromoCodeSummary,
    UpdatePromoCodeRequest,
};
pub use revenue::{
    DailyRevenue, DateRange, DateRangeRevenue, MonthlyRevenue, PaymentHistory,
    PaymentHistoryChallenge, PaymentHistoryUser, RevenuePeriod, TotalRevenue,
    WeeklyRevenue,
};
pub use user::{CreateAdminRequest, UpdateUserRequest, User};
