use bingodash_model::{BingoCard, Challenge, EntityId, PromoCode, User};

use crate::field::{FieldAccess, FieldValue};
use crate::keyed::Keyed;
use crate::search::{Searchable, contains_folded};

macro_rules! keyed_by_id {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Keyed for $ty {
                fn key(&self) -> &EntityId {
                    &self.id
                }
            }
        )+
    };
}

keyed_by_id!(User, PromoCode, BingoCard, Challenge);

impl FieldAccess for User {
    fn field(&self, column: &str) -> FieldValue<'_> {
        match column {
            "id" => self.id.as_str().into(),
            "email" => self.email.as_str().into(),
            "first_name" => self.first_name.as_str().into(),
            "last_name" => self.last_name.as_str().into(),
            "name" => self.full_name().into(),
            "display_name" => self.display_name.as_deref().into(),
            "country" => self.country.as_deref().into(),
            "timezone" => self.timezone.as_deref().into(),
            "role" => self.role.as_str().into(),
            "auth_provider" => self.auth_provider.as_str().into(),
            "push_reminders" => self.push_reminders.into(),
            "activated" => {
                self.activated.map_or(FieldValue::Null, FieldValue::from)
            }
            "created_at" | "createdAt" => self.created_at.into(),
            "updated_at" | "updatedAt" => self.updated_at.into(),
            _ => FieldValue::Null,
        }
    }
}

impl Searchable for User {
    fn matches_search(&self, needle: &str) -> bool {
        contains_folded(&self.email, needle)
            || contains_folded(&self.full_name(), needle)
            || contains_folded(self.id.as_str(), needle)
    }
}

impl FieldAccess for PromoCode {
    fn field(&self, column: &str) -> FieldValue<'_> {
        match column {
            "id" => self.id.as_str().into(),
            "code" => self.code.as_str().into(),
            "expiration_date" => self.expiration_date.into(),
            "usage_limit" => self.usage_limit.into(),
            "deleted" => self.deleted.into(),
            "created_at" | "createdAt" => self.created_at.into(),
            "updated_at" | "updatedAt" => self.updated_at.into(),
            _ => FieldValue::Null,
        }
    }
}

impl Searchable for PromoCode {
    fn matches_search(&self, needle: &str) -> bool {
        contains_folded(&self.code, needle)
            || contains_folded(self.id.as_str(), needle)
    }
}

impl FieldAccess for BingoCard {
    fn field(&self, column: &str) -> FieldValue<'_> {
        match column {
            "id" => self.id.as_str().into(),
            "name" => self.name.as_str().into(),
            "color" => self.color.as_str().into(),
            "type" => self.card_type.to_string().into(),
            "categories" => {
                FieldValue::Number(self.category_ids.len() as f64)
            }
            "created_by" => self.created_by.as_str().into(),
            "font_color" => self.font_color.as_str().into(),
            "font_name" => self.font_name.as_str().into(),
            "created_at" | "createdAt" => self.created_at.into(),
            "updated_at" | "updatedAt" => self.updated_at.into(),
            _ => FieldValue::Null,
        }
    }
}

impl Searchable for BingoCard {
    fn matches_search(&self, needle: &str) -> bool {
        contains_folded(&self.name, needle)
            || contains_folded(self.id.as_str(), needle)
    }
}

impl FieldAccess for Challenge {
    fn field(&self, column: &str) -> FieldValue<'_> {
        match column {
            "id" => self.id.as_str().into(),
            "title" => self.title.as_str().into(),
            "plan" => self.plan.to_string().into(),
            "status" => self.status.as_str().into(),
            "duration" => self.duration.into(),
            "card_size" => self.card_size.into(),
            "invitation_code" => self.invitation_code.as_str().into(),
            "promo_code" => self.promo_code.as_deref().into(),
            "organizer" => self
                .organizer
                .as_ref()
                .map_or(FieldValue::Null, |o| o.full_name().into()),
            "category" => self
                .category
                .as_ref()
                .map_or(FieldValue::Null, |c| c.name.as_str().into()),
            "current_week" => self.current_week.into(),
            "joined_count" => self.joined_count.into(),
            "total_invitations" => self.total_invitations.into(),
            "created_at" | "createdAt" => self.created_at.into(),
            "updated_at" | "updatedAt" => self.updated_at.into(),
            _ => FieldValue::Null,
        }
    }
}

impl Searchable for Challenge {
    fn matches_search(&self, needle: &str) -> bool {
        contains_folded(&self.title, needle)
            || contains_folded(&self.invitation_code, needle)
            || contains_folded(self.id.as_str(), needle)
    }
}
