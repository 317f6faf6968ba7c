mod commands;
mod config;
mod main_lib;

use std::sync::Arc;

use commands::{execute, Command, HELP};
use config::Config;
use main_lib::{build_session, init_tracing};
use pocketfx_core::events::EventBus;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing();

    let bus = EventBus::default();
    let mut events = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => tracing::debug!(target: "pocketfx::events", "{}", json),
                    Err(e) => tracing::warn!("Failed to serialize event: {}", e),
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Event log skipped {} events", skipped)
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut session = build_session(&config, Arc::new(bus));
    if let Err(e) = session.init().await {
        tracing::error!("Starting without rates: {}", e);
    }

    let mut stdout = tokio::io::stdout();
    stdout.write_all(format!("{}\n", HELP).as_bytes()).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let output = match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => execute(&mut session, command).await,
            Err(e) => Err(e),
        };
        match output {
            Ok(text) => stdout.write_all(format!("{}\n", text).as_bytes()).await?,
            Err(e) => stdout.write_all(format!("error: {:#}\n", e).as_bytes()).await?,
        }
    }
    Ok(())
}
