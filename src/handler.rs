use crate::{
    config::Config, context::Context, event::Event, persistent_state::PersistentState,
    volatile_state::VolatileState,
};
use serenity::all::{Interaction, Ready};
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

/// Discord event handler
pub struct Handler {
    cfg: Config,
    pstate: Mutex<PersistentState>,
    vstate: Arc<Mutex<VolatileState>>,
    shutdown: Arc<Notify>,
}

impl Handler {
    pub fn new(
        cfg: Config,
        pstate: PersistentState,
        vstate: Arc<Mutex<VolatileState>>,
        shutdown: Arc<Notify>,
    ) -> Self {
        Self {
            cfg,
            pstate: Mutex::new(pstate),
            vstate,
            shutdown,
        }
    }

    fn ctx(&self) -> Context<'_> {
        Context {
            cfg: &self.cfg,
            pstate: &self.pstate,
            vstate: &self.vstate,
            shutdown: &self.shutdown,
        }
    }
}

#[serenity::async_trait]
impl serenity::all::EventHandler for Handler {
    async fn ready(&self, discord_ctx: serenity::all::Context, ready: Ready) {
        Event::Ready(ready).handle(self.ctx(), &discord_ctx).await;
    }

    async fn interaction_create(&self, discord_ctx: serenity::all::Context, interaction: Interaction) {
        // Buttons, autocomplete and the like are never registered, so only commands arrive.
        if let Interaction::Command(command) = interaction {
            Event::Command(command).handle(self.ctx(), &discord_ctx).await;
        }
    }
}
