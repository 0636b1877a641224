use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::ids::EntityId;

/// Aggregation window for the revenue report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevenuePeriod {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Range,
}

impl fmt::Display for RevenuePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RevenuePeriod::Daily => "daily",
            RevenuePeriod::Weekly => "weekly",
            RevenuePeriod::Monthly => "monthly",
            RevenuePeriod::Range => "range",
        })
    }
}

impl FromStr for RevenuePeriod {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(RevenuePeriod::Daily),
            "weekly" => Ok(RevenuePeriod::Weekly),
            "monthly" => Ok(RevenuePeriod::Monthly),
            "range" => Ok(RevenuePeriod::Range),
            _ => Err(ModelError::InvalidValue {
                kind: "revenue period",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalRevenue {
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRevenue {
    pub date: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyRevenue {
    pub week: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentHistoryUser {
    pub id: EntityId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentHistoryChallenge {
    pub id: EntityId,
    pub organizer_id: EntityId,
    pub title: String,
    pub plan: String,
    pub duration: u32,
    pub card_size: u32,
    pub status: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category_id: Option<EntityId>,
    #[serde(default)]
    pub invitation_code: String,
    #[serde(default)]
    pub payment_intent_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentHistory {
    pub id: EntityId,
    pub user_id: EntityId,
    #[serde(default)]
    pub stripe_payment_id: String,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub payment_intent: String,
    #[serde(rename = "type", default)]
    pub payment_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: PaymentHistoryUser,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<PaymentHistoryChallenge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRangeRevenue {
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
    pub revenue: f64,
    #[serde(
        rename = "paymentHistory",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub payment_history: Vec<PaymentHistory>,
}

/// Inclusive reporting window, validated so that `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ModelError> {
        if start > end {
            return Err(ModelError::InvalidValue {
                kind: "date range",
                value: format!("{start}..{end}"),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}
