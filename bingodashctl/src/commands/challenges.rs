use anyhow::Result;
use bingodash_core::ColumnSpec;

use super::{App, SortOwner, list_screen};
use crate::cli::ChallengesAction;

fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::fixed("id", "ID"),
        ColumnSpec::sortable("title", "Title"),
        ColumnSpec::sortable("plan", "Plan"),
        ColumnSpec::sortable("status", "Status"),
        ColumnSpec::sortable("organizer", "Organizer"),
        ColumnSpec::fixed("invitation_code", "Invite"),
        ColumnSpec::sortable("current_week", "Week"),
        ColumnSpec::sortable("joined_count", "Joined"),
        ColumnSpec::sortable("created_at", "Created"),
    ]
}

pub async fn run(app: &App, action: ChallengesAction) -> Result<()> {
    let screen = app.ctx.challenges();
    let store = &screen.store;
    match action {
        ChallengesAction::List { list, status } => {
            list_screen(app, &screen, &list, status, columns(), SortOwner::Table)
                .await
        }
        ChallengesAction::Status { id, status } => {
            let challenge = store.change_status(&id, status).await?;
            println!("challenge {} is now {}", challenge.title, challenge.status);
            Ok(())
        }
        ChallengesAction::StartNextWeek { id } => {
            let response = store.start_next_week(&id).await?;
            println!(
                "challenge {} started week {}",
                response.challenge_id, response.week_number
            );
            Ok(())
        }
        ChallengesAction::Delete { id } => {
            store.delete(&id).await?;
            println!("deleted challenge {id}");
            Ok(())
        }
    }
}
