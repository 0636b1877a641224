use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::ids::EntityId;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Promotional code as returned by `/api/promo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoCode {
    pub id: EntityId,
    pub code: String,
    pub expiration_date: DateTime<Utc>,
    #[serde(default)]
    pub usage_limit: u32,
    #[serde(default)]
    pub deleted: bool,
    #[serde(rename = "createdAt", alias = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", alias = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

impl PromoCode {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date < now
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.deleted && !self.is_expired(now)
    }

    /// Whole days left before expiry, rounded up and never below one.
    ///
    /// Used to prefill `expiration_duration` when editing an existing code.
    pub fn remaining_days(&self, now: DateTime<Utc>) -> u32 {
        let seconds = (self.expiration_date - now).num_seconds();
        if seconds <= 0 {
            return 1;
        }
        let days = (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
        u32::try_from(days).unwrap_or(u32::MAX).max(1)
    }

    /// Edit payload that keeps the current limits.
    pub fn edit_defaults(&self, now: DateTime<Utc>) -> UpdatePromoCodeRequest {
        UpdatePromoCodeRequest {
            expiration_duration: Some(self.remaining_days(now)),
            usage_limit: Some(self.usage_limit),
        }
    }
}

/// Request payload to issue a new promo code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePromoCodeRequest {
    /// Validity window in days.
    pub expiration_duration: u32,
    pub usage_limit: u32,
}

impl CreatePromoCodeRequest {
    pub fn validate(&self) -> Result<()> {
        if self.expiration_duration == 0 {
            return Err(ModelError::NotPositive {
                field: "expiration_duration",
            });
        }
        if self.usage_limit == 0 {
            return Err(ModelError::NotPositive {
                field: "usage_limit",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePromoCodeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
}

/// Headline counters shown above the promo code list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PromoCodeSummary {
    pub active: usize,
    pub total: usize,
    pub expired_or_deleted: usize,
}

impl PromoCodeSummary {
    pub fn from_codes(codes: &[PromoCode], now: DateTime<Utc>) -> Self {
        let active = codes.iter().filter(|c| c.is_active(now)).count();
        Self {
            active,
            total: codes.len(),
            expired_or_deleted: codes.len() - active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn code(expires_in: Duration, deleted: bool) -> PromoCode {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        PromoCode {
            id: EntityId::from("p"),
            code: "SPRING".into(),
            expiration_date: now + expires_in,
            usage_limit: 5,
            deleted,
            created_at: now,
            updated_at: now,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn remaining_days_rounds_up() {
        let promo = code(Duration::hours(25), false);
        assert_eq!(promo.remaining_days(now()), 2);
    }

    #[test]
    fn remaining_days_floors_at_one_for_expired_codes() {
        let promo = code(Duration::days(-3), false);
        assert_eq!(promo.remaining_days(now()), 1);
        assert_eq!(promo.edit_defaults(now()).usage_limit, Some(5));
    }

    #[test]
    fn summary_counts_deleted_and_expired_together() {
        let codes = vec![
            code(Duration::days(2), false),
            code(Duration::days(2), true),
            code(Duration::days(-2), false),
        ];
        let summary = PromoCodeSummary::from_codes(&codes, now());
        assert_eq!(summary.active, 1);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.expired_or_deleted, 2);
    }
}
