use super::{CommandDefinition, Response};
use crate::context::Context;
use serenity::all::Permissions;

pub fn definition() -> CommandDefinition {
    CommandDefinition {
        name: "get_chance",
        description: "This returns the value of the chance that Shem-Ha will respond to a message.",
        permissions: Permissions::MANAGE_GUILD,
        options: Vec::new(),
    }
}

pub async fn handle(ctx: &Context<'_>) -> Response {
    let chance = ctx.pstate.lock().await.parameters().chance;
    Response::new(format!("The current response chance is {} percent.", chance))
}
