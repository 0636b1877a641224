use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};
use tracing::info;

use super::App;
use crate::render::key_values;

pub async fn login(
    app: &App,
    email: &str,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };
    let session = app.ctx.auth().sign_in(email, &password).await?;
    app.session.save(&session)?;
    println!(
        "signed in as {} <{}>",
        session.user.full_name(),
        session.user.email
    );
    Ok(())
}

fn read_password() -> Result<String> {
    eprint!("password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("a password is required");
    }
    Ok(password)
}

pub async fn logout(app: &App) -> Result<()> {
    app.ctx.auth().sign_out().await;
    app.session.clear()?;
    println!("signed out");
    Ok(())
}

pub async fn whoami(app: &App, verify: bool) -> Result<()> {
    let Some(session) = app.ctx.auth().current() else {
        println!("not signed in");
        return Ok(());
    };
    let user = &session.user;
    print!(
        "{}",
        key_values(&[
            ("id", user.id.to_string()),
            ("name", user.full_name()),
            ("email", user.email.clone()),
            ("role", user.role.clone()),
        ])
    );

    if verify {
        if app.ctx.auth().verify().await? {
            println!("token accepted");
        } else {
            app.expire_session().await;
            println!("token rejected; sign in again");
        }
    }
    Ok(())
}

pub async fn refresh(app: &App) -> Result<()> {
    app.require_session()?;
    match app.ctx.auth().refresh().await {
        Ok(session) => {
            app.session.save(&session)?;
            info!("session refreshed");
            println!("session refreshed");
            Ok(())
        }
        Err(err) => {
            // The service already signed out.
            app.session.clear()?;
            Err(err.into())
        }
    }
}
