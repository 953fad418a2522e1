//! Afya chat CLI entry point.
//!
//! Binary name: `afya`
//!
//! Parses arguments, initializes telemetry and configuration, wires the
//! adapters into a session registry, and dispatches to the command
//! handlers.

mod cli;
mod config;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use secrecy::SecretString;

use afya_core::inference::InferenceClient;
use afya_core::observer::TracingObserver;
use afya_core::registry::SessionRegistry;
use afya_core::store::SessionStore;
use afya_infra::docstore::DocStoreClient;
use afya_infra::inference::HttpInferenceClient;
use afya_infra::memory::MemorySessionStore;
use afya_observe::tracing_setup::{self, LogFormat};
use afya_types::identity::OwnerId;

use cli::{Cli, Commands, SessionsCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "info,afya=debug",
        _ => "trace",
    };
    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    tracing_setup::init(format, false, default_filter)
        .map_err(|e| anyhow::anyhow!("telemetry init failed: {e}"))?;

    let config = config::load(&config::default_config_path())?;
    tracing::debug!(
        store_url = %config.store_url,
        inference_url = %config.inference_url,
        offline = cli.offline,
        "Configuration loaded"
    );
    let owner = OwnerId::from(cli.owner.clone());

    let mut inference = HttpInferenceClient::new(config.inference_url.clone())
        .with_timeout(Duration::from_secs(config.inference_timeout_secs));
    if let Some(key) = &config.inference_api_key {
        inference = inference.with_api_key(SecretString::from(key.clone()));
    }
    let inference = Arc::new(inference);

    let result = if cli.offline {
        let store = Arc::new(MemorySessionStore::new());
        dispatch(cli, store, inference, owner).await
    } else {
        let store = Arc::new(DocStoreClient::new(config.store_url.clone()));
        dispatch(cli, store, inference, owner).await
    };

    tracing_setup::shutdown();
    result
}

async fn dispatch<S, I>(
    cli: Cli,
    store: Arc<S>,
    inference: Arc<I>,
    owner: OwnerId,
) -> anyhow::Result<()>
where
    S: SessionStore + 'static,
    I: InferenceClient,
{
    let mut registry = SessionRegistry::new(store, inference, Arc::new(TracingObserver));

    match cli.command {
        Commands::Chat { session } => cli::chat::run(registry, owner, session).await,
        Commands::Sessions { action } => match action {
            SessionsCommand::List => cli::sessions::list(&mut registry, &owner).await,
            SessionsCommand::Delete { id, yes } => {
                cli::sessions::delete(&mut registry, &owner, id, yes).await
            }
        },
    }
}
