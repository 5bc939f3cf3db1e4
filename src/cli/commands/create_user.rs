//! Create user command handler

use crate::config::Config;
use crate::domain::Role;
use crate::state::SharedState;

pub async fn cmd_create_user(
    config: &Config,
    username: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<()> {
    let role: Role = role.parse()?;
    let state = SharedState::new(config.clone()).await?;

    let user = state
        .auth_service
        .register(username, password, Some(role))
        .await?;

    println!("✓ Created {} '{}' ({})", user.role, user.username, user.id);
    Ok(())
}
