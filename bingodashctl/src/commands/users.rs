use anyhow::Result;
use bingodash_core::ColumnSpec;
use bingodash_core::model::{CreateAdminRequest, UpdateUserRequest, User};

use super::{App, SortOwner, list_screen};
use crate::cli::UsersAction;
use crate::render::key_values;

fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::fixed("id", "ID"),
        ColumnSpec::sortable("first_name", "Name"),
        ColumnSpec::sortable("email", "Email"),
        ColumnSpec::fixed("role", "Role"),
        ColumnSpec::sortable("country", "Country"),
        ColumnSpec::fixed("activated", "Activated"),
        ColumnSpec::sortable("created_at", "Joined"),
    ]
}

pub async fn run(app: &App, action: UsersAction) -> Result<()> {
    let screen = app.ctx.users();
    let store = &screen.store;
    match action {
        UsersAction::List(args) => {
            list_screen(app, &screen, &args, None, columns(), SortOwner::Store)
                .await
        }
        UsersAction::Show { id } => {
            let user = store.load_one(&id).await?;
            print!("{}", describe(&user));
            Ok(())
        }
        UsersAction::CreateAdmin {
            email,
            first_name,
            last_name,
            password,
            confirm_password,
            country,
            timezone,
        } => {
            let request = CreateAdminRequest {
                confirm_password: confirm_password
                    .unwrap_or_else(|| password.clone()),
                email,
                first_name,
                last_name,
                password,
                country,
                timezone,
            };
            let user = store.create(&request).await?;
            println!("created admin {} <{}>", user.id, user.email);
            Ok(())
        }
        UsersAction::Update {
            id,
            first_name,
            last_name,
            display_name,
            country,
            timezone,
            role,
            activated,
        } => {
            let request = UpdateUserRequest {
                first_name,
                last_name,
                display_name,
                country,
                timezone,
                role,
                activated,
            };
            if request.is_empty() {
                anyhow::bail!("nothing to update; pass at least one field");
            }
            let user = store.update(&id, &request).await?;
            print!("{}", describe(&user));
            Ok(())
        }
        UsersAction::Delete { id } => {
            store.remove(&id).await?;
            println!("deleted user {id}");
            Ok(())
        }
        UsersAction::ResetPassword { id } => {
            store.reset_password(&id).await?;
            println!("password reset sent for user {id}");
            Ok(())
        }
    }
}

fn describe(user: &User) -> String {
    let optional = |value: &Option<String>| value.clone().unwrap_or_default();
    key_values(&[
        ("id", user.id.to_string()),
        ("name", user.full_name()),
        ("display name", optional(&user.display_name)),
        ("email", user.email.clone()),
        ("role", user.role.clone()),
        ("provider", user.auth_provider.clone()),
        ("country", optional(&user.country)),
        ("timezone", optional(&user.timezone)),
        (
            "activated",
            user.activated.map(|a| a.to_string()).unwrap_or_default(),
        ),
        ("reminders", user.push_reminders.to_string()),
        ("joined", user.created_at.to_rfc3339()),
    ])
}
