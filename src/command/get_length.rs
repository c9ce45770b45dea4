use super::{CommandDefinition, Response};
use crate::context::Context;
use serenity::all::Permissions;

pub fn definition() -> CommandDefinition {
    CommandDefinition {
        name: "get_length",
        description: "This returns the maximum length of a response from Shem-Ha in tokens. A token is about 4 characters.",
        permissions: Permissions::MANAGE_GUILD,
        options: Vec::new(),
    }
}

pub async fn handle(ctx: &Context<'_>) -> Response {
    let length = ctx.pstate.lock().await.parameters().length;
    Response::new(format!("The current response length is {} tokens.", length))
}
