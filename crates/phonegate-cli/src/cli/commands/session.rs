//! Session command handlers: login, logout, whoami, route.

use anyhow::{Context, Result};
use phonegate_core::config::Config;
use phonegate_core::login::login as run_login;
use phonegate_core::profile::RandomUserClient;
use phonegate_core::route::GateDecision;
use phonegate_core::session::SessionContext;

pub async fn login(config: &Config, phone: &str) -> Result<()> {
    let client = RandomUserClient::from_config(config)?;
    let session = SessionContext::open_default();

    match run_login(&session, &client, phone).await {
        Ok(profile) => {
            println!("Logged in as {} {}", profile.full_name(), profile.email);
            Ok(())
        }
        Err(e) => anyhow::bail!("{e}"),
    }
}

pub fn logout() -> Result<()> {
    SessionContext::open_default()
        .logout()
        .context("log out")?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami() -> Result<()> {
    match SessionContext::open_default().activate_protected() {
        GateDecision::Allow(profile) => {
            println!("{}", profile.full_name());
            println!("{}", profile.email);
            if !profile.avatar_url.is_empty() {
                println!("{}", profile.avatar_url);
            }
            Ok(())
        }
        GateDecision::Redirect(_) | GateDecision::ClearAndRedirect(_) => {
            anyhow::bail!("Not logged in")
        }
    }
}

pub fn route() {
    println!("{}", SessionContext::open_default().landing_route());
}
