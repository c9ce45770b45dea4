//! Creating and withdrawing guild commands on Discord.

use super::CommandDefinition;
use crate::{
    log_error, log_internal,
    logging::{CommandName, PrintColor},
};
use anyhow::Result;
use serenity::all::{CommandId, GuildId, Http};
use std::sync::Arc;

/// Handle Discord gives back for a created command.  Needed to delete it again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisteredCommand {
    pub id: CommandId,
    pub name: String,
}

/// Where commands get registered
#[serenity::async_trait]
pub trait CommandPlatform: Sync + Send {
    async fn create_command(&self, definition: &CommandDefinition) -> Result<RegisteredCommand>;
    async fn delete_command(&self, command: &RegisteredCommand) -> Result<()>;
}

/// Commands scoped to a single guild
pub struct GuildCommands {
    http: Arc<Http>,
    guild_id: GuildId,
}

impl GuildCommands {
    pub fn new(http: Arc<Http>, guild_id: GuildId) -> Self {
        Self { http, guild_id }
    }
}

#[serenity::async_trait]
impl CommandPlatform for GuildCommands {
    async fn create_command(&self, definition: &CommandDefinition) -> Result<RegisteredCommand> {
        let command = self
            .guild_id
            .create_command(&self.http, definition.to_builder()?)
            .await?;

        Ok(RegisteredCommand {
            id: command.id,
            name: command.name,
        })
    }

    async fn delete_command(&self, command: &RegisteredCommand) -> Result<()> {
        self.guild_id.delete_command(&self.http, command.id).await?;
        Ok(())
    }
}

/// One command that could not be created or deleted
#[derive(Debug)]
pub struct Failure {
    pub name: String,
    pub error: anyhow::Error,
}

#[derive(Debug, Default)]
pub struct Registration {
    pub registered: Vec<RegisteredCommand>,
    pub failures: Vec<Failure>,
}

/// Create every definition, one request at a time and in order.  Keeps going past failures.
pub async fn register_all(
    platform: &dyn CommandPlatform,
    definitions: &[CommandDefinition],
) -> Registration {
    let mut registration = Registration::default();

    for definition in definitions {
        match platform.create_command(definition).await {
            Ok(command) => {
                log_internal!("Registered {}", CommandName(&command.name).color());
                registration.registered.push(command);
            }
            Err(error) => {
                log_error!(
                    "Could not register {}: {}",
                    CommandName(definition.name).color(),
                    error
                );
                registration.failures.push(Failure {
                    name: definition.name.to_owned(),
                    error,
                });
            }
        }
    }

    registration
}

/// Delete every command, in order.  A failure is logged and the rest are still attempted.
pub async fn unregister_all(
    platform: &dyn CommandPlatform,
    commands: &[RegisteredCommand],
) -> Vec<Failure> {
    let mut failures = Vec::new();

    for command in commands {
        match platform.delete_command(command).await {
            Ok(()) => log_internal!("Withdrew {}", CommandName(&command.name).color()),
            Err(error) => {
                log_error!(
                    "Could not withdraw {}: {}",
                    CommandName(&command.name).color(),
                    error
                );
                failures.push(Failure {
                    name: command.name.clone(),
                    error,
                });
            }
        }
    }

    failures
}
