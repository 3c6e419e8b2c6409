use std::io::{self, Write};

use anyhow::{Context as _, Result};
use schoolhub_core::auth::CredentialStore;
use schoolhub_core::Route;
use serde_json::json;
use tracing::warn;

use super::Context;
use crate::output;

pub async fn login(ctx: &mut Context, email: Option<String>, remember: bool) -> Result<()> {
    let email = match email {
        Some(email) => email.trim().to_string(),
        None => prompt_email(ctx.config.last_email.as_deref())?,
    };

    let keychain = CredentialStore::for_email(&email)?;
    let stored = match keychain.recall() {
        Ok(stored) => stored,
        Err(e) => {
            warn!(error = %e, "Keychain unavailable");
            None
        }
    };
    let password = match stored {
        Some(stored) if confirm("Use stored password? [Y/n]: ")? => stored,
        _ => rpassword::prompt_password("Password: ").context("Failed to read password")?,
    };

    let profile = ctx.api.login(&email, &password).await?;

    if remember {
        keychain.remember(&password)?;
    }

    ctx.config.last_email = Some(email);
    if let Err(e) = ctx.config.save() {
        warn!(error = %e, "Failed to save config");
    }

    let home = Route::Dashboard(profile.role);
    if ctx.json {
        return output::json_pretty(&json!({ "user": profile, "home": home.path() }));
    }
    output::success(&format!(
        "Logged in as {} ({})",
        profile.display_name(),
        profile.role
    ));
    output::field("Home", &home.path());
    Ok(())
}

pub fn logout(ctx: &Context, forget: bool) -> Result<()> {
    let email = ctx.session.user().map(|u| u.email);
    ctx.api.logout();

    if forget {
        if let Some(email) = email.or_else(|| ctx.config.last_email.clone()) {
            if CredentialStore::for_email(&email)?.forget()? {
                output::success(&format!("Forgot stored password for {}", email));
            }
        }
    }

    output::success("Logged out");
    Ok(())
}

pub fn whoami(ctx: &Context) -> Result<()> {
    let snapshot = ctx.session.snapshot();
    let home = Route::home_for(&snapshot);

    if ctx.json {
        return output::json_pretty(&json!({
            "isAuthenticated": snapshot.is_authenticated(),
            "user": snapshot.user(),
            "home": home.path(),
        }));
    }

    match snapshot.user() {
        Some(user) if snapshot.is_authenticated() => {
            output::field("Name", user.display_name());
            output::field("Email", &user.email);
            output::field("Role", &user.role.to_string());
            output::field("Home", &home.path());
        }
        _ => println!("Not logged in."),
    }
    Ok(())
}

fn prompt_email(last: Option<&str>) -> Result<String> {
    match last {
        Some(last) => print!("Email [{}]: ", last),
        None => print!("Email: "),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    match (input.is_empty(), last) {
        (true, Some(last)) => Ok(last.to_string()),
        _ => Ok(input.to_string()),
    }
}

fn confirm(question: &str) -> Result<bool> {
    print!("{}", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_lowercase() != "n")
}
