use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::bingo_card::ChallengeCategory;
use crate::error::{ModelError, Result};
use crate::ids::EntityId;

/// Lifecycle state of a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeStatus {
    Active,
    Inactive,
    Finish,
    Pending,
    Unpaid,
}

impl ChallengeStatus {
    pub const ALL: [ChallengeStatus; 5] = [
        ChallengeStatus::Active,
        ChallengeStatus::Inactive,
        ChallengeStatus::Finish,
        ChallengeStatus::Pending,
        ChallengeStatus::Unpaid,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChallengeStatus::Active => "active",
            ChallengeStatus::Inactive => "inactive",
            ChallengeStatus::Finish => "finish",
            ChallengeStatus::Pending => "pending",
            ChallengeStatus::Unpaid => "unpaid",
        }
    }

    /// Statuses a moderator may move a challenge to from `self`.
    ///
    /// `Finish` is terminal.
    pub fn valid_transitions(self) -> &'static [ChallengeStatus] {
        use ChallengeStatus::*;
        match self {
            Unpaid => &[Pending, Finish],
            Pending => &[Unpaid, Active, Inactive, Finish],
            Active => &[Inactive, Finish],
            Inactive => &[Active, Finish],
            Finish => &[],
        }
    }

    pub fn can_transition_to(self, next: ChallengeStatus) -> bool {
        self.valid_transitions().contains(&next)
    }

    pub fn ensure_transition(self, next: ChallengeStatus) -> Result<()> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(ModelError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }
}

impl fmt::Display for ChallengeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChallengeStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        ChallengeStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::InvalidValue {
                kind: "challenge status",
                value: s.to_string(),
            })
    }
}

/// Status selector for the moderation list; `All` sends no filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Only(ChallengeStatus),
}

impl StatusFilter {
    pub fn status(self) -> Option<ChallengeStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(status),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengePlan {
    Premium,
    Pro,
    Free,
    Basic,
}

impl fmt::Display for ChallengePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChallengePlan::Premium => "premium",
            ChallengePlan::Pro => "pro",
            ChallengePlan::Free => "free",
            ChallengePlan::Basic => "basic",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeOrganizer {
    pub id: EntityId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

impl ChallengeOrganizer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Challenge as listed by `/api/challenge/admin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: EntityId,
    pub organizer_id: EntityId,
    pub title: String,
    pub plan: ChallengePlan,
    #[serde(default)]
    pub is_organizer_participant: bool,
    /// Length of the challenge in weeks.
    pub duration: u32,
    pub card_size: u32,
    pub status: ChallengeStatus,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category_id: Option<EntityId>,
    #[serde(default)]
    pub invitation_code: String,
    #[serde(default)]
    pub payment_intent_id: Option<String>,
    #[serde(default)]
    pub promo_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_day_of_week: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_week: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_invitations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_count: Option<u32>,
    #[serde(rename = "createdAt", alias = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", alias = "updated_at")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<ChallengeOrganizer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ChallengeCategory>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateChallengeStatusRequest {
    pub status: ChallengeStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartNextWeekResponse {
    pub challenge_id: EntityId,
    pub week_number: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_is_terminal() {
        assert!(ChallengeStatus::Finish.valid_transitions().is_empty());
        for status in ChallengeStatus::ALL {
            assert!(!ChallengeStatus::Finish.can_transition_to(status));
        }
    }

    #[test]
    fn unpaid_can_only_move_to_pending_or_finish() {
        assert!(
            ChallengeStatus::Unpaid.can_transition_to(ChallengeStatus::Pending)
        );
        assert!(
            ChallengeStatus::Unpaid
                .ensure_transition(ChallengeStatus::Active)
                .is_err()
        );
    }

    #[test]
    fn status_filter_parses_all_and_statuses() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "Pending".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(ChallengeStatus::Pending)
        );
        assert!("paused".parse::<StatusFilter>().is_err());
    }
}
