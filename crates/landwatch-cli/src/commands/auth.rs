//! `landwatch login`, `register`, `forgot-password`, `language` and
//! `translations`.

use super::{Env, bound, finish};
use crate::console::ConsolePage;
use anyhow::Context;
use landwatch_ui::sections::auth::*;
use std::sync::Arc;

pub async fn login(env: &Env, email: &str, password: &str, role: &str) -> anyhow::Result<()> {
    // Only credentials from this login count.
    env.session().clear();
    let page = Arc::new(
        ConsolePage::new()
            .with_elements(&[LOGIN_FORM, LOGIN_ERROR])
            .with_field(LOGIN_EMAIL, Some(email))
            .with_field(LOGIN_PASSWORD, Some(password))
            .with_field(LOGIN_ROLE, Some(role)),
    );
    let cx = env.context(&page);
    bound(LoginSection::bind(&cx), "login")?.submit().await;

    let credentials = env
        .session()
        .credentials()
        .ok_or_else(|| anyhow::anyhow!("Login failed"))?;
    println!("Role: {}", credentials.role);
    if !credentials.token.is_empty() {
        println!("Token: {}", credentials.token);
        println!("Export LANDWATCH_TOKEN and LANDWATCH_ROLE to reuse this session.");
    }
    Ok(())
}

pub async fn register(
    env: &Env,
    name: &str,
    email: &str,
    password: &str,
    confirm: Option<&str>,
    role: &str,
) -> anyhow::Result<()> {
    let page = Arc::new(
        ConsolePage::new()
            .with_elements(&[REGISTER_FORM, REGISTER_ERROR, REGISTER_SUCCESS])
            .with_field(REGISTER_NAME, Some(name))
            .with_field(REGISTER_EMAIL, Some(email))
            .with_field(REGISTER_PASSWORD, Some(password))
            .with_field(REGISTER_CONFIRM, Some(confirm.unwrap_or(password)))
            .with_field(REGISTER_ROLE, Some(role)),
    );
    let cx = env.context(&page);
    bound(RegisterSection::bind(&cx), "register")?.submit().await;

    if page.redirect().is_none() {
        anyhow::bail!("Registration failed");
    }
    Ok(())
}

pub async fn forgot_password(env: &Env, email: &str) -> anyhow::Result<()> {
    let page = Arc::new(
        ConsolePage::new()
            .with_elements(&[FORGOT_FORM, FORGOT_MESSAGE])
            .with_field(FORGOT_EMAIL, Some(email)),
    );
    let cx = env.context(&page);
    bound(ForgotPasswordSection::bind(&cx), "forgot password")?
        .submit()
        .await;
    finish(&cx, "password reset")
}

pub async fn language(env: &Env, code: &str) -> anyhow::Result<()> {
    let page = Arc::new(ConsolePage::new().with_field(LANGUAGE_SELECT, Some(code)));
    let cx = env.context(&page);
    bound(LanguageSection::bind(&cx), "language")?
        .on_change()
        .await;
    finish(&cx, "language change")
}

/// Print the interface texts, one `key: text` line each.
pub async fn translations(env: &Env, language: Option<&str>) -> anyhow::Result<()> {
    let translations = env
        .client
        .translations(language)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .context("Failed to load translations")?;
    for (key, text) in translations.texts() {
        println!("{key}: {text}");
    }
    Ok(())
}
