use anyhow::{Context, Result};
use bingodash_core::ColumnSpec;
use bingodash_core::model::chrono::Utc;
use bingodash_core::model::{
    CreatePromoCodeRequest, EntityId, PromoCode, UpdatePromoCodeRequest,
};
use bingodash_core::store::PromoCodeStore;

use super::{App, SortOwner, list_screen};
use crate::cli::PromoAction;
use crate::render::key_values;

fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::fixed("id", "ID"),
        ColumnSpec::sortable("code", "Code"),
        ColumnSpec::sortable("expiration_date", "Expires"),
        ColumnSpec::sortable("usage_limit", "Limit"),
        ColumnSpec::sortable("deleted", "Deleted"),
        ColumnSpec::sortable("created_at", "Created"),
    ]
}

pub async fn run(app: &App, action: PromoAction) -> Result<()> {
    let screen = app.ctx.promo_codes();
    let store = &screen.store;
    match action {
        PromoAction::List(args) => {
            list_screen(app, &screen, &args, None, columns(), SortOwner::Store)
                .await
        }
        PromoAction::Create { days, usage_limit } => {
            let code = store
                .create(&CreatePromoCodeRequest {
                    expiration_duration: days,
                    usage_limit,
                })
                .await?;
            print!("{}", describe(&code));
            Ok(())
        }
        PromoAction::Update {
            id,
            days,
            usage_limit,
        } => {
            let mut request = UpdatePromoCodeRequest {
                expiration_duration: days,
                usage_limit,
            };
            if days.is_none() || usage_limit.is_none() {
                let defaults = edit_defaults(store, &id).await?;
                request.expiration_duration =
                    days.or(defaults.expiration_duration);
                request.usage_limit = usage_limit.or(defaults.usage_limit);
            }
            let code = store.update(&id, &request).await?;
            print!("{}", describe(&code));
            Ok(())
        }
        PromoAction::Delete { id } => {
            store.remove(&id).await?;
            println!("deleted promo code {id}");
            Ok(())
        }
        PromoAction::Toggle { id } => {
            let code = store.toggle(&id).await?;
            let state = if code.deleted { "disabled" } else { "enabled" };
            println!("promo code {} {state}", code.code);
            Ok(())
        }
        PromoAction::Stats => {
            store.fetch().await?;
            let summary = store.summary(Utc::now());
            print!(
                "{}",
                key_values(&[
                    ("active", summary.active.to_string()),
                    ("total", summary.total.to_string()),
                    (
                        "expired or deleted",
                        summary.expired_or_deleted.to_string()
                    ),
                ])
            );
            Ok(())
        }
    }
}

/// Current values of the code, so an edit only changes what was passed.
async fn edit_defaults(
    store: &PromoCodeStore,
    id: &EntityId,
) -> Result<UpdatePromoCodeRequest> {
    store.fetch().await?;
    let code = store
        .find(id)
        .with_context(|| format!("promo code {id} not found"))?;
    Ok(code.edit_defaults(Utc::now()))
}

fn describe(code: &PromoCode) -> String {
    let now = Utc::now();
    let status = if code.is_active(now) {
        "active".to_string()
    } else if code.deleted {
        "deleted".to_string()
    } else {
        "expired".to_string()
    };
    key_values(&[
        ("id", code.id.to_string()),
        ("code", code.code.clone()),
        ("status", status),
        ("expires", code.expiration_date.to_rfc3339()),
        ("days left", code.remaining_days(now).to_string()),
        ("usage limit", code.usage_limit.to_string()),
    ])
}
