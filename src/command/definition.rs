//! Declarative command descriptions, translated into serenity builders at registration time.

use super::{Invocation, OptionValue, ParseError};
use anyhow::{bail, Result};
use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption, Permissions};

/// A slash command as submitted to Discord
#[derive(Clone, Debug)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub permissions: Permissions,
    pub options: Vec<OptionSpec>,
}

#[derive(Clone, Copy, Debug)]
pub struct OptionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    pub range: OptionRange,
}

/// Option type together with its inclusive bounds
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OptionRange {
    Number { min: f64, max: f64 },
    Integer { min: i64, max: i64 },
}

impl CommandDefinition {
    pub fn to_builder(&self) -> Result<CreateCommand> {
        let mut builder = CreateCommand::new(self.name)
            .description(self.description)
            .default_member_permissions(self.permissions);

        for option in &self.options {
            if !option.is_well_formed() {
                bail!("Option `{}` of `{}` has an empty range", option.name, self.name);
            }
            builder = builder.add_option(option.to_builder()?);
        }

        Ok(builder)
    }
}

impl OptionSpec {
    fn to_builder(&self) -> Result<CreateCommandOption> {
        let option = match self.range {
            OptionRange::Number { min, max } => {
                CreateCommandOption::new(CommandOptionType::Number, self.name, self.description)
                    .min_number_value(min)
                    .max_number_value(max)
            }
            OptionRange::Integer { min, max } => {
                CreateCommandOption::new(CommandOptionType::Integer, self.name, self.description)
                    .min_int_value(min.try_into()?)
                    .max_int_value(max.try_into()?)
            }
        };

        Ok(option.required(self.required))
    }

    pub fn is_well_formed(&self) -> bool {
        match self.range {
            OptionRange::Number { min, max } => min.is_finite() && max.is_finite() && min <= max,
            OptionRange::Integer { min, max } => min <= max,
        }
    }

    /// Pull this number option out of an invocation, enforcing the bounds.  Integers are accepted.
    pub fn number_from(&self, invocation: &Invocation) -> Result<f64, ParseError> {
        let OptionRange::Number { min, max } = self.range else {
            return Err(self.wrong_type());
        };

        let value = match invocation.option(self.name) {
            Some(OptionValue::Number(value)) => *value,
            Some(OptionValue::Integer(value)) => *value as f64,
            Some(OptionValue::Unsupported) => return Err(self.wrong_type()),
            None => return Err(self.missing()),
        };

        if !value.is_finite() || value < min || value > max {
            return Err(ParseError::Invalid(format!(
                "`{}` must be between {} and {}.",
                self.name, min, max
            )));
        }

        Ok(value)
    }

    /// Pull this integer option out of an invocation, enforcing the bounds.
    pub fn integer_from(&self, invocation: &Invocation) -> Result<i64, ParseError> {
        let OptionRange::Integer { min, max } = self.range else {
            return Err(self.wrong_type());
        };

        let value = match invocation.option(self.name) {
            Some(OptionValue::Integer(value)) => *value,
            Some(_) => return Err(self.wrong_type()),
            None => return Err(self.missing()),
        };

        if !(min..=max).contains(&value) {
            return Err(ParseError::Invalid(format!(
                "`{}` must be between {} and {}.",
                self.name, min, max
            )));
        }

        Ok(value)
    }

    fn missing(&self) -> ParseError {
        ParseError::Invalid(format!("`{}` is required.", self.name))
    }

    fn wrong_type(&self) -> ParseError {
        ParseError::Invalid(format!("`{}` has the wrong type.", self.name))
    }
}
