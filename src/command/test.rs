use super::{CommandDefinition, Response};
use crate::context::Context;
use serenity::all::Permissions;

pub fn definition() -> CommandDefinition {
    CommandDefinition {
        name: "test",
        description: "This is just a test command!",
        permissions: Permissions::MANAGE_GUILD,
        options: Vec::new(),
    }
}

pub async fn handle(_ctx: &Context<'_>) -> Response {
    Response::new("Congrats on using the test command!")
}
