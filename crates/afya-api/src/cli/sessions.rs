//! Session management commands.

use anyhow::{Result, bail};
use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};
use dialoguer::Confirm;

use afya_core::inference::InferenceClient;
use afya_core::observer::PersistenceObserver;
use afya_core::registry::SessionRegistry;
use afya_core::store::SessionStore;
use afya_types::identity::OwnerId;
use afya_types::session::SessionId;

/// Print the owner's sessions, most recently updated first.
pub async fn list<S, I, O>(registry: &mut SessionRegistry<S, I, O>, owner: &OwnerId) -> Result<()>
where
    S: SessionStore + 'static,
    I: InferenceClient,
    O: PersistenceObserver + 'static,
{
    registry.refresh_sessions(owner).await;

    if registry.sessions().is_empty() {
        println!("No sessions.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["ID", "TITLE", "UPDATED", "PERSISTED"]);
    for session in registry.sessions() {
        table.add_row(vec![
            session.id.to_string(),
            session.title.clone(),
            session.updated_at.format("%Y-%m-%d %H:%M").to_string(),
            if session.id.is_durable() { "yes" } else { "local only" }.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Delete a session after confirmation. Unlike the rest of the store
/// policy, a failure here is fatal to the command.
pub async fn delete<S, I, O>(
    registry: &mut SessionRegistry<S, I, O>,
    owner: &OwnerId,
    id: String,
    yes: bool,
) -> Result<()>
where
    S: SessionStore + 'static,
    I: InferenceClient,
    O: PersistenceObserver + 'static,
{
    let id = SessionId::from(id);

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete session {id} and all its messages?"))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Err(e) = registry.delete_session(&id, owner).await {
        bail!("delete failed, the session is still listed: {e}");
    }
    println!("Deleted {id}.");
    Ok(())
}
