//! REST routes exposed by the Health Bingo backend.
//!
//! `{id}` placeholders are filled with [`with_id`].

macro_rules! api_path {
    ($path:literal) => {
        concat!("/api", $path)
    };
}

pub mod auth {
    pub const SIGN_IN: &str = api_path!("/auth/signin");
    pub const REFRESH: &str = api_path!("/auth/refresh");
    pub const VERIFY: &str = api_path!("/auth/verify");
}

pub mod users {
    pub const COLLECTION: &str = api_path!("/user");
    pub const ITEM: &str = api_path!("/user/{id}");
    pub const CREATE_ADMIN: &str = api_path!("/user/admin");
    pub const RESET_PASSWORD: &str = api_path!("/user/{id}/reset-password");
}

pub mod promo {
    pub const COLLECTION: &str = api_path!("/promo");
    pub const ITEM: &str = api_path!("/promo/{id}");
    pub const TOGGLE: &str = api_path!("/promo/{id}/toggle");
}

pub mod bingo_cards {
    pub const COLLECTION: &str = api_path!("/bingo-card");
    pub const ITEM: &str = api_path!("/bingo-card/{id}");
}

pub mod categories {
    pub const COLLECTION: &str = api_path!("/challenge-category");
}

pub mod challenges {
    pub const ADMIN_COLLECTION: &str = api_path!("/challenge/admin");
    pub const ADMIN_ITEM: &str = api_path!("/challenge/admin/{id}");
    pub const START_NEXT_WEEK: &str =
        api_path!("/challenge/admin/{id}/start-next-week");
    pub const STATUS: &str = api_path!("/challenge/admin/{id}/status");
}

pub mod revenue {
    pub const TOTAL: &str = api_path!("/payment/revenue/total");
    pub const DAILY: &str = api_path!("/payment/revenue/daily");
    pub const WEEKLY: &str = api_path!("/payment/revenue/weekly");
    pub const MONTHLY: &str = api_path!("/payment/revenue/monthly");
    pub const RANGE: &str = api_path!("/payment/revenue/range");
}

/// Substitutes the `{id}` placeholder of `template`.
pub fn with_id(template: &str, id: impl AsRef<str>) -> String {
    template.replace("{id}", id.as_ref())
}
