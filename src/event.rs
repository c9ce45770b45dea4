//! Serenity hands us events through callbacks.  The `Handler` turns them into this enum so all the
//! reaction logic lives in one place.

use crate::{
    command::{self, registry::GuildCommands},
    context::Context,
    helper::CommandInteractionHelper,
    log_error, log_event, log_internal,
    logging::{AsyncPrintColor, CachedPrintColor, CommandName, Glue, PrintColor},
};
use serenity::all::{CommandInteraction, Ready};

/// A Discord event
pub enum Event {
    Ready(Ready),
    Command(CommandInteraction),
}

impl Event {
    pub async fn handle(self, ctx: Context<'_>, discord_ctx: &serenity::all::Context) {
        match self {
            Event::Ready(ready) => handle_ready(&ctx, discord_ctx, ready).await,
            Event::Command(interaction) => handle_command(&ctx, discord_ctx, interaction).await,
        }
    }
}

async fn handle_ready(ctx: &Context<'_>, discord_ctx: &serenity::all::Context, ready: Ready) {
    log_event!(
        "Connected to {} server(s) as {}",
        ready.guilds.len(),
        ready.user.color(),
    );

    // Guild command endpoints are keyed by application id.
    discord_ctx.http.set_application_id(ready.application.id);

    let guild_id = ctx.cfg.guild_id();
    let guild = guild_id.color(&discord_ctx.http).await;
    log_internal!("Registering commands in \"{}\"", guild);

    let platform = GuildCommands::new(discord_ctx.http.clone(), guild_id);
    let mut vstate = ctx.vstate.lock().await;
    if let Err(e) = vstate
        .register_commands(&platform, &command::definitions())
        .await
    {
        log_error!("Startup failed: {}", e);
        vstate.set_startup_failure(e);
        ctx.shutdown.notify_one();
    }
}

async fn handle_command(
    ctx: &Context<'_>,
    discord_ctx: &serenity::all::Context,
    interaction: CommandInteraction,
) {
    let invocation = interaction.invocation();
    let guild = interaction.guild_id.cached_color(&discord_ctx.cache);

    log_event!(
        "{}{}{} used {}",
        guild,
        Glue {}.color(),
        interaction.user.color(),
        CommandName(&invocation.name).color(),
    );

    let Some(response) = command::dispatch(ctx, &invocation).await else {
        log_internal!(
            "Ignoring unknown command {}",
            CommandName(&invocation.name).color()
        );
        return;
    };

    if let Err(e) = interaction.respond(&discord_ctx.http, response).await {
        log_error!(
            "Could not respond to {}: {}",
            CommandName(&invocation.name).color(),
            e
        );
    }
}
