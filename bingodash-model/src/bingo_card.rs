use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ModelError, Result};
use crate::ids::EntityId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BingoCardType {
    #[default]
    Default,
    Custom,
}

impl fmt::Display for BingoCardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BingoCardType::Default => "default",
            BingoCardType::Custom => "custom",
        })
    }
}

/// Bingo card template from the catalog (`/api/bingo-card`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BingoCard {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(rename = "type", default)]
    pub card_type: BingoCardType,
    #[serde(default)]
    pub category_ids: Vec<EntityId>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub font_color: String,
    #[serde(default)]
    pub font_name: String,
    #[serde(rename = "createdAt", alias = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", alias = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBingoCardRequest {
    pub name: String,
    pub color: String,
    pub category_ids: Vec<EntityId>,
    pub font_color: String,
    pub font_name: String,
}

impl CreateBingoCardRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::MissingField { field: "name" });
        }
        if self.category_ids.is_empty() {
            return Err(ModelError::MissingField {
                field: "category_ids",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBingoCardRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<Vec<EntityId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeCategory {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Category selector for the card catalog; `All` sends no filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Category(EntityId),
}

impl CategoryFilter {
    pub fn category_id(&self) -> Option<&EntityId> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Category(id) => Some(id),
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" => Err(ModelError::InvalidValue {
                kind: "category",
                value: s.to_string(),
            }),
            "all" => Ok(CategoryFilter::All),
            id => Ok(CategoryFilter::Category(EntityId::from(id))),
        }
    }
}
