use super::{CommandDefinition, OptionRange, OptionSpec, Response};
use crate::{context::Context, log_error, log_internal};
use serenity::all::Permissions;

pub const PERCENTAGE: OptionSpec = OptionSpec {
    name: "percentage",
    description: "This value is the chance that Shem-Ha will respond to a message, must be between 0 and 100.",
    required: true,
    range: OptionRange::Number {
        min: 0.0,
        max: 100.0,
    },
};

pub fn definition() -> CommandDefinition {
    CommandDefinition {
        name: "set_chance",
        description: "This sets the value of the chance that Shem-Ha will respond to a message.",
        permissions: Permissions::MANAGE_GUILD,
        options: vec![PERCENTAGE],
    }
}

pub async fn handle(ctx: &Context<'_>, percentage: f64) -> Response {
    // Hold the lock until the file is written so concurrent updates can't interleave.
    let mut pstate = ctx.pstate.lock().await;

    match pstate.set_chance(percentage).await {
        Ok(()) => {
            let chance = pstate.parameters().chance;
            log_internal!("Response chance set to {} percent", chance);
            Response::new(format!(
                "Successfully updated the response chance. The response chance is now {} percent.",
                chance
            ))
        }
        Err(e) => {
            log_error!("Could not update response chance: {}", e);
            Response::new(format!("FAILED TO UPDATE CHANCE: {}", e))
        }
    }
}
