//! `landwatch alerts` and `landwatch users ...`.

use super::{Env, bound, finish};
use crate::console::ConsolePage;
use landwatch_ui::actions::{ACTION_ATTR, EMAIL_ATTR};
use landwatch_ui::sections::admin::*;
use landwatch_ui::{LocalPushBus, MountedSections, PushEvent, RowAction};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Print the alerts table.
///
/// With `follow`, the table is reprinted on every push event until Ctrl-C.
/// Events are published by a timer every `interval`.
pub async fn alerts(env: &Env, follow: bool, interval: Duration) -> anyhow::Result<()> {
    let page = Arc::new(ConsolePage::new().with_element(ALERTS_TABLE));
    let cx = env.context(&page);
    let mounted = MountedSections::mount(&cx).await;
    if !follow {
        return finish(&cx, "alerts");
    }

    let bus = LocalPushBus::default();
    let follower = mounted
        .follow_alerts(&bus)
        .ok_or_else(|| anyhow::anyhow!("alerts section is not on the page"))?;

    let event = env.config.ui.push_event.clone();
    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                bus.publish(PushEvent::new(event.clone(), Value::Null));
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    drop(bus);
    follower.await?;
    Ok(())
}

pub async fn list_users(env: &Env) -> anyhow::Result<()> {
    let page = Arc::new(ConsolePage::new().with_element(USERS_TABLE));
    let cx = env.context(&page);
    bound(UsersSection::bind(&cx), "users")?.load().await;
    finish(&cx, "users")
}

pub async fn add_user(
    env: &Env,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<()> {
    let page = Arc::new(
        ConsolePage::new()
            .with_elements(&[USERS_TABLE, ADD_USER_FORM])
            .with_field(NEW_USER_NAME, Some(name))
            .with_field(NEW_USER_EMAIL, Some(email))
            .with_field(NEW_USER_PASSWORD, Some(password))
            .with_field(NEW_USER_ROLE, Some(role)),
    );
    let cx = env.context(&page);
    bound(UsersSection::bind(&cx), "users")?.add_user().await;
    finish(&cx, "add user")
}

/// Edit a user. Without any flag the three questions are asked on stdin.
pub async fn edit_user(
    env: &Env,
    email: &str,
    name: Option<String>,
    role: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let mut page = ConsolePage::new().with_element(USERS_TABLE);
    if name.is_some() || role.is_some() || password.is_some() {
        page = page.with_answers(vec![name, role, password]);
    }
    let page = Arc::new(page);
    let cx = env.context(&page);
    bound(UsersSection::bind(&cx), "users")?
        .on_container_click(row_control(RowAction::Edit, email))
        .await;
    finish(&cx, "edit user")
}

pub async fn delete_user(env: &Env, email: &str, yes: bool) -> anyhow::Result<()> {
    let page = Arc::new(
        ConsolePage::new()
            .with_element(USERS_TABLE)
            .assume_yes(yes),
    );
    let cx = env.context(&page);
    bound(UsersSection::bind(&cx), "users")?
        .on_container_click(row_control(RowAction::Delete, email))
        .await;
    finish(&cx, "delete user")
}

/// Attributes of the row control the command stands for.
fn row_control<'a>(action: RowAction, email: &'a str) -> impl Fn(&str) -> Option<&'a str> + 'a {
    move |name| match name {
        ACTION_ATTR => Some(action.as_str()),
        EMAIL_ATTR => Some(email),
        _ => None,
    }
}
