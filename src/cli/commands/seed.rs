//! Seed command handler

use anyhow::Context;
use tracing::info;

use crate::config::Config;
use crate::domain::Role;
use crate::services::{AuthError, GadgetUpdate};
use crate::state::SharedState;

const USERS: [(&str, &str, Role); 2] = [
    ("admin", "IMF-admin-2025!", Role::Admin),
    ("agent", "IMF-agent-2025!", Role::Agent),
];

const GADGETS: [(&str, &str, &str); 3] = [
    (
        "Laser Watch",
        "Watch with built-in high-powered laser",
        "Available",
    ),
    (
        "Explosive Pen",
        "Pen that doubles as a small explosive device",
        "Deployed",
    ),
    (
        "Grappling Hook",
        "Compact grappling hook for scaling buildings",
        "Available",
    ),
];

/// Creates the default accounts (skipping existing usernames) and, when the
/// inventory is empty, three sample gadgets.
pub async fn cmd_seed(config: &Config) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    for (username, password, role) in USERS {
        match state
            .auth_service
            .register(username, password, Some(role))
            .await
        {
            Ok(user) => println!("✓ Created {} '{}'", user.role, user.username),
            Err(AuthError::UsernameTaken) => println!("• User '{username}' already exists"),
            Err(e) => return Err(anyhow::anyhow!("Failed to create user {username}: {e}")),
        }
    }

    let existing = state
        .gadget_service
        .list(None)
        .await?;

    if !existing.is_empty() {
        println!("• Inventory already holds {} gadgets", existing.len());
        return Ok(());
    }

    for (name, description, status) in GADGETS {
        let gadget = state
            .gadget_service
            .create(name, Some(description.to_string()))
            .await
            .with_context(|| format!("Failed to create gadget {name}"))?;

        if status != gadget.status.as_str() {
            state
                .gadget_service
                .update(
                    &gadget.id,
                    GadgetUpdate {
                        status: Some(status.to_string()),
                        ..Default::default()
                    },
                )
                .await
                .with_context(|| format!("Failed to update gadget {name}"))?;
        }

        println!("✓ Created '{}' as {}", name, gadget.codename);
    }

    info!("Seed complete");
    Ok(())
}
