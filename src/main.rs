mod command;
mod config;
mod context;
mod event;
mod handler;
mod helper;
mod logging;
mod persistent_state;
mod volatile_state;

use crate::{
    command::registry::GuildCommands, config::Credentials, persistent_state::PersistentState,
    volatile_state::VolatileState,
};
use anyhow::Result;
use serenity::{all::GatewayIntents, Client};
use std::{future::Future, sync::Arc};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::{Mutex, Notify},
};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = crate::config::Config::load().await?;
    let credentials = Credentials::load(&cfg.credentials_path()).await?;
    let pstate = PersistentState::load(&cfg.parameters_path()).await?;
    log_internal!(
        "Loaded parameters from `{}`: {:?}",
        pstate.path().to_string_lossy(),
        pstate.parameters()
    );
    let guild_id = cfg.guild_id();

    let vstate = Arc::new(Mutex::new(VolatileState::new()));
    let shutdown = Arc::new(Notify::new());
    let handler = handler::Handler::new(cfg, pstate, vstate.clone(), shutdown.clone());

    // Slash commands arrive as interactions, which need no privileged intents.
    let mut client = Client::builder(&credentials.discord_token, GatewayIntents::GUILDS)
        .event_handler(handler)
        .await?;

    let shard_manager = client.shard_manager.clone();
    let watcher_vstate = vstate.clone();
    tokio::spawn(async move {
        watch_for_shutdown(wait_for_signal(), &shutdown, &watcher_vstate).await;
        shard_manager.shutdown_all().await;
    });

    log_internal!("Bot is now running.  Press CTRL-C to exit.");
    let run = client.start().await;

    let platform = GuildCommands::new(client.http.clone(), guild_id);
    let mut vstate = vstate.lock().await;
    log_internal!("Withdrawing {} command(s)", vstate.registered().len());
    let failed = vstate.unregister_commands(&platform).await;
    if failed > 0 {
        log_error!("{} command(s) could not be withdrawn", failed);
    }
    log_internal!("Goodbye");

    if let Some(e) = vstate.take_startup_failure() {
        return Err(e);
    }
    run.map_err(Into::into)
}

/// Resolves once the bot should stop: on a termination signal or an internal shutdown request.
///
/// Failing to install the signal handlers counts as a failed startup.
async fn watch_for_shutdown(
    signals: impl Future<Output = Result<()>>,
    shutdown: &Notify,
    vstate: &Mutex<VolatileState>,
) {
    tokio::select! {
        result = signals => match result {
            Ok(()) => log_internal!("Termination signal received, shutting down"),
            Err(e) => {
                log_error!("Could not listen for termination signals: {}", e);
                vstate.lock().await.set_startup_failure(e);
            }
        },
        _ = shutdown.notified() => log_internal!("Shutting down"),
    }
}

/// Resolves on SIGINT or SIGTERM.
async fn wait_for_signal() -> Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = sigint.recv() => {}
        _ = sigterm.recv() => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[tokio::test]
    async fn broken_signal_handling_fails_startup() {
        let vstate = Mutex::new(VolatileState::new());
        let shutdown = Notify::new();

        watch_for_shutdown(
            async { Err(anyhow!("signal driver unavailable")) },
            &shutdown,
            &vstate,
        )
        .await;

        let failure = vstate.lock().await.take_startup_failure();
        assert!(failure.unwrap().to_string().contains("signal driver unavailable"));
    }

    #[tokio::test]
    async fn termination_signal_is_a_clean_exit() {
        let vstate = Mutex::new(VolatileState::new());
        let shutdown = Notify::new();

        watch_for_shutdown(async { Ok(()) }, &shutdown, &vstate).await;

        assert!(vstate.lock().await.take_startup_failure().is_none());
    }

    #[tokio::test]
    async fn internal_request_stops_the_watcher() {
        let vstate = Mutex::new(VolatileState::new());
        let shutdown = Notify::new();
        shutdown.notify_one();

        watch_for_shutdown(std::future::pending::<Result<()>>(), &shutdown, &vstate).await;

        assert!(vstate.lock().await.take_startup_failure().is_none());
    }
}
