use super::{CommandDefinition, OptionRange, OptionSpec, Response};
use crate::{context::Context, log_error, log_internal};
use serenity::all::Permissions;

pub const TOKENS: OptionSpec = OptionSpec {
    name: "tokens",
    description: "This is the maximum response length in tokens. A token is about 4 characters.",
    required: true,
    range: OptionRange::Integer { min: 60, max: 512 },
};

pub fn definition() -> CommandDefinition {
    CommandDefinition {
        name: "set_length",
        description: "This sets the maximum length of a response from Shem-Ha in tokens. A token is about 4 characters.",
        permissions: Permissions::MANAGE_GUILD,
        options: vec![TOKENS],
    }
}

pub async fn handle(ctx: &Context<'_>, tokens: i64) -> Response {
    let mut pstate = ctx.pstate.lock().await;

    match pstate.set_length(tokens).await {
        Ok(()) => {
            let length = pstate.parameters().length;
            log_internal!("Response length set to {} tokens", length);
            Response::new(format!(
                "Successfully updated the response length. The response length is now {} tokens.",
                length
            ))
        }
        Err(e) => {
            log_error!("Could not update response length: {}", e);
            Response::new(format!("FAILED TO UPDATE LENGTH: {}", e))
        }
    }
}
