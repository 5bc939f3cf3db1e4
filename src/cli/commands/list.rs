//! List gadgets command handler

use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_list_gadgets(config: &Config, status: Option<&str>) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let gadgets = state
        .gadget_service
        .list(status)
        .await?;

    if gadgets.is_empty() {
        println!("No gadgets in the inventory.");
        println!();
        println!("Seed sample data with: imf-gadgets seed");
        return Ok(());
    }

    println!("Gadgets ({} total)", gadgets.len());
    println!("{:-<70}", "");

    for entry in gadgets {
        let gadget = entry.gadget;
        println!("{} [{}]", gadget.codename, gadget.status);
        println!("  ID: {} | Name: {}", gadget.id, gadget.name);
        if let Some(description) = gadget.description {
            println!("  {description}");
        }
    }

    Ok(())
}
