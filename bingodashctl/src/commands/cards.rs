use anyhow::Result;
use bingodash_core::ColumnSpec;
use bingodash_core::model::{
    BingoCard, CreateBingoCardRequest, UpdateBingoCardRequest,
};
use bingodash_core::store::BingoCardStore;
use tracing::warn;

use super::{App, SortOwner, list_screen};
use crate::cli::CardsAction;
use crate::render::{Table, key_values};

fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::fixed("id", "ID"),
        ColumnSpec::sortable("name", "Name"),
        ColumnSpec::sortable("type", "Type"),
        ColumnSpec::fixed("color", "Color"),
        ColumnSpec::sortable("categories", "Categories"),
        ColumnSpec::sortable("created_at", "Created"),
    ]
}

pub async fn run(app: &App, action: CardsAction) -> Result<()> {
    let screen = app.ctx.bingo_cards();
    let store = &screen.store;
    match action {
        CardsAction::List { list, category } => {
            list_screen(
                app,
                &screen,
                &list,
                category,
                columns(),
                SortOwner::Table,
            )
            .await
        }
        CardsAction::Create {
            name,
            color,
            categories,
            font_color,
            font_name,
        } => {
            let card = store
                .create(&CreateBingoCardRequest {
                    name,
                    color,
                    category_ids: categories,
                    font_color,
                    font_name,
                })
                .await?;
            print!("{}", describe(store, &card).await);
            Ok(())
        }
        CardsAction::Update {
            id,
            name,
            color,
            categories,
            font_color,
            font_name,
        } => {
            let request = UpdateBingoCardRequest {
                name,
                color,
                category_ids: (!categories.is_empty()).then_some(categories),
                font_color,
                font_name,
            };
            let card = store.update(&id, &request).await?;
            print!("{}", describe(store, &card).await);
            Ok(())
        }
        CardsAction::Delete { id } => {
            store.remove(&id).await?;
            println!("deleted bingo card {id}");
            Ok(())
        }
        CardsAction::Categories => {
            let categories = store.load_categories().await?;
            let mut table = Table::new(["ID", "Name"]);
            for category in &categories {
                table.push_row(vec![
                    category.id.to_string(),
                    category.name.clone(),
                ]);
            }
            print!("{table}");
            Ok(())
        }
    }
}

/// Card details with category ids resolved to names where possible.
async fn describe(store: &BingoCardStore, card: &BingoCard) -> String {
    if let Err(err) = store.load_categories().await {
        warn!(error = %err, "showing raw category ids");
    }
    let categories = card
        .category_ids
        .iter()
        .map(|id| store.category_name(id).unwrap_or_else(|| id.to_string()))
        .collect::<Vec<_>>()
        .join(", ");
    key_values(&[
        ("id", card.id.to_string()),
        ("name", card.name.clone()),
        ("type", card.card_type.to_string()),
        ("color", card.color.clone()),
        ("font", format!("{} {}", card.font_name, card.font_color)),
        ("categories", categories),
        ("created by", card.created_by.clone()),
    ])
}
