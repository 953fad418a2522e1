//! Interactive chat loop.
//!
//! Reads utterances line by line, drives the session registry, and prints
//! assistant replies. Inference failures show up twice: inline in the
//! transcript and as a dismissible banner line.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use afya_core::inference::InferenceClient;
use afya_core::observer::PersistenceObserver;
use afya_core::registry::{SessionRegistry, TimelineSource};
use afya_core::store::SessionStore;
use afya_types::identity::OwnerId;
use afya_types::message::Sender;
use afya_types::session::SessionId;

/// Run the chat loop until EOF or `/quit`.
pub async fn run<S, I, O>(
    mut registry: SessionRegistry<S, I, O>,
    owner: OwnerId,
    resume: Option<String>,
) -> Result<()>
where
    S: SessionStore + 'static,
    I: InferenceClient,
    O: PersistenceObserver + 'static,
{
    registry.refresh_sessions(&owner).await;

    if let Some(id) = resume {
        let id = SessionId::from(id);
        match registry.load_session(id.clone()).await {
            TimelineSource::Loaded => {
                println!("Resumed session {id}.");
                for entry in registry.timeline().entries() {
                    print_entry(entry.sender, &entry.text);
                }
            }
            TimelineSource::Unpersisted => {
                println!("Session {id} was never persisted; starting with empty history.");
            }
            TimelineSource::LoadFailed => {
                println!("Could not fetch history for {id}; continuing without it.");
            }
        }
    } else {
        println!("New conversation. Type a message, or /help for commands.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "/quit" | "/q" => break,
            "/help" => {
                println!("/sessions  list sessions\n/load <id> resume a session\n/clear     dismiss the error banner\n/quit      exit");
            }
            "/sessions" => {
                registry.refresh_sessions(&owner).await;
                for session in registry.sessions() {
                    println!("{}  {}  {}", session.id, session.updated_at, session.title);
                }
            }
            "/clear" => registry.clear_error(),
            _ if line.starts_with("/load ") => {
                let id = SessionId::from(line["/load ".len()..].trim().to_string());
                let source = registry.load_session(id).await;
                if source == TimelineSource::LoadFailed {
                    println!("History unavailable; the conversation can continue.");
                }
                for entry in registry.timeline().entries() {
                    print_entry(entry.sender, &entry.text);
                }
            }
            _ => {
                let before = registry.timeline().entries().len();
                registry.send(&owner, line).await;
                for entry in &registry.timeline().entries()[before..] {
                    if entry.sender == Sender::Assistant {
                        print_entry(entry.sender, &entry.text);
                    }
                }
                if let Some(error) = registry.last_error() {
                    println!("[{}] {} {}", error.title, error.message, error.suggested_action);
                }
            }
        }
    }

    Ok(())
}

fn print_entry(sender: Sender, text: &str) {
    match sender {
        Sender::User => println!("you: {text}"),
        Sender::Assistant => println!("assistant: {text}"),
    }
}
