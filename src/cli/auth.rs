use super::ui;
use crate::core::auth::{LoginCredentials, RegisterCredentials};
use crate::store::session::AuthSession;
use anyhow::Result;

pub async fn login(session: &mut AuthSession, credentials: LoginCredentials) -> Result<String> {
    let pb = ui::new_spinner("Logging in...");
    let result = session.login(credentials).await;
    pb.finish_and_clear();

    let user = result?;
    Ok(format!(
        "Logged in as {} <{}>",
        ui::style_text(&user.name, ui::StyleType::TotalLabel),
        user.email
    ))
}

pub async fn register(session: &mut AuthSession, credentials: RegisterCredentials) -> Result<String> {
    let pb = ui::new_spinner("Creating account...");
    let result = session.register(credentials).await;
    pb.finish_and_clear();

    let user = result?;
    Ok(format!(
        "Registered and logged in as {} <{}>",
        ui::style_text(&user.name, ui::StyleType::TotalLabel),
        user.email
    ))
}

pub async fn logout(session: &mut AuthSession) -> Result<String> {
    session.logout().await?;
    Ok("Logged out".to_string())
}

pub fn whoami(session: &AuthSession) -> String {
    match session.user() {
        Some(user) => format!("{} <{}> (id {})", user.name, user.email, user.id),
        None => ui::style_text("Not logged in", ui::StyleType::Subtle),
    }
}
