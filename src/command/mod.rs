//! Slash commands: what gets registered with Discord, and what runs when one is used.

use crate::context::Context;

mod definition;
mod get_chance;
mod get_length;
pub mod registry;
mod set_chance;
mod set_length;
mod test;

pub use definition::{CommandDefinition, OptionRange, OptionSpec};

/// Every command the bot knows about
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    Test,
    GetChance,
    GetLength,
    SetChance,
    SetLength,
}

impl CommandKind {
    /// Declaration order.  Commands are registered and withdrawn in this order.
    pub const ALL: [CommandKind; 5] = [
        CommandKind::Test,
        CommandKind::GetChance,
        CommandKind::GetLength,
        CommandKind::SetChance,
        CommandKind::SetLength,
    ];

    pub fn definition(self) -> CommandDefinition {
        match self {
            CommandKind::Test => test::definition(),
            CommandKind::GetChance => get_chance::definition(),
            CommandKind::GetLength => get_length::definition(),
            CommandKind::SetChance => set_chance::definition(),
            CommandKind::SetLength => set_length::definition(),
        }
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// Ordered list of command definitions to register
pub fn definitions() -> Vec<CommandDefinition> {
    CommandKind::ALL.into_iter().map(CommandKind::definition).collect()
}

/// A received command use, stripped of everything Discord-specific
#[derive(Clone, Debug, PartialEq)]
pub struct Invocation {
    pub name: String,
    pub options: Vec<(String, OptionValue)>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum OptionValue {
    Number(f64),
    Integer(i64),
    /// Any option type no command here declares
    Unsupported,
}

impl Invocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, name: impl Into<String>, value: OptionValue) -> Self {
        self.options.push((name.into(), value));
        self
    }

    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options
            .iter()
            .find(|(option_name, _)| option_name == name)
            .map(|(_, value)| value)
    }
}

/// A command with its options checked and typed
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SlashCommand {
    Test,
    GetChance,
    GetLength,
    SetChance { percentage: f64 },
    SetLength { tokens: i64 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParseError {
    /// Not one of ours.  Dropped without a response.
    Unknown,
    /// One of ours, but the options don't check out.
    Invalid(String),
}

impl SlashCommand {
    pub fn parse(invocation: &Invocation) -> Result<Self, ParseError> {
        let kind = CommandKind::from_name(&invocation.name).ok_or(ParseError::Unknown)?;

        Ok(match kind {
            CommandKind::Test => SlashCommand::Test,
            CommandKind::GetChance => SlashCommand::GetChance,
            CommandKind::GetLength => SlashCommand::GetLength,
            CommandKind::SetChance => SlashCommand::SetChance {
                percentage: set_chance::PERCENTAGE.number_from(invocation)?,
            },
            CommandKind::SetLength => SlashCommand::SetLength {
                tokens: set_length::TOKENS.integer_from(invocation)?,
            },
        })
    }

    pub async fn run(self, ctx: &Context<'_>) -> Response {
        match self {
            SlashCommand::Test => test::handle(ctx).await,
            SlashCommand::GetChance => get_chance::handle(ctx).await,
            SlashCommand::GetLength => get_length::handle(ctx).await,
            SlashCommand::SetChance { percentage } => set_chance::handle(ctx, percentage).await,
            SlashCommand::SetLength { tokens } => set_length::handle(ctx, tokens).await,
        }
    }
}

/// Text sent back as the one reply to an interaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub content: String,
}

impl Response {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Run the command named by `invocation`.
///
/// Returns `None` only when the name isn't one of ours; every known command gets exactly one
/// response, including when its options fail validation.
pub async fn dispatch(ctx: &Context<'_>, invocation: &Invocation) -> Option<Response> {
    match SlashCommand::parse(invocation) {
        Ok(command) => Some(command.run(ctx).await),
        Err(ParseError::Unknown) => None,
        Err(ParseError::Invalid(reason)) => Some(Response::new(format!("Invalid input: {reason}"))),
    }
}
