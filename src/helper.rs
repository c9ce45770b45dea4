//! Miscellaneous convenience methods

use crate::command::{Invocation, OptionValue, Response};
use anyhow::Result;
use serenity::all::{
    CommandDataOptionValue, CommandInteraction, CreateInteractionResponse,
    CreateInteractionResponseMessage, Http,
};
use std::sync::Arc;

#[serenity::async_trait]
pub trait CommandInteractionHelper {
    /// Discord-independent view of the command and its top-level options
    fn invocation(&self) -> Invocation;
    /// Send the single reply Discord expects for this interaction
    async fn respond(&self, http: &Arc<Http>, response: Response) -> Result<()>;
}

#[serenity::async_trait]
impl CommandInteractionHelper for CommandInteraction {
    fn invocation(&self) -> Invocation {
        let mut invocation = Invocation::new(self.data.name.as_str());
        for option in &self.data.options {
            let value = match option.value {
                CommandDataOptionValue::Number(value) => OptionValue::Number(value),
                CommandDataOptionValue::Integer(value) => OptionValue::Integer(value),
                _ => OptionValue::Unsupported,
            };
            invocation = invocation.with_option(option.name.as_str(), value);
        }
        invocation
    }

    async fn respond(&self, http: &Arc<Http>, response: Response) -> Result<()> {
        let message = CreateInteractionResponseMessage::new().content(response.content);
        self.create_response(http, CreateInteractionResponse::Message(message))
            .await?;
        Ok(())
    }
}
