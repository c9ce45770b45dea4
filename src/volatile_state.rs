use crate::command::{
    registry::{self, CommandPlatform, Registration, RegisteredCommand},
    CommandDefinition,
};
use anyhow::{anyhow, Result};

/// State which is lost across sessions
pub struct VolatileState {
    /// `None` until registration has been attempted.
    registered: Option<Vec<RegisteredCommand>>,
    startup_failure: Option<anyhow::Error>,
}

impl VolatileState {
    pub fn new() -> Self {
        Self {
            registered: None,
            startup_failure: None,
        }
    }

    pub fn registered(&self) -> &[RegisteredCommand] {
        self.registered.as_deref().unwrap_or_default()
    }

    /// Register every definition, once per session.
    ///
    /// If any command fails, the ones that did register are withdrawn again and an error naming
    /// the failed commands is returned.
    pub async fn register_commands(
        &mut self,
        platform: &dyn CommandPlatform,
        definitions: &[CommandDefinition],
    ) -> Result<()> {
        // Reconnects deliver another `Ready`.
        if self.registered.is_some() {
            return Ok(());
        }

        let Registration {
            registered,
            failures,
        } = registry::register_all(platform, definitions).await;

        if failures.is_empty() {
            self.registered = Some(registered);
            return Ok(());
        }

        registry::unregister_all(platform, &registered).await;
        self.registered = Some(Vec::new());

        let names: Vec<&str> = failures.iter().map(|f| f.name.as_str()).collect();
        Err(anyhow!(
            "Could not register command(s) {}: {}",
            names.join(", "),
            failures[0].error
        ))
    }

    /// Withdraw everything registered this session.  Returns how many withdrawals failed.
    pub async fn unregister_commands(&mut self, platform: &dyn CommandPlatform) -> usize {
        let registered = self.registered.replace(Vec::new()).unwrap_or_default();
        registry::unregister_all(platform, &registered).await.len()
    }

    pub fn set_startup_failure(&mut self, err: anyhow::Error) {
        self.startup_failure = Some(err);
    }

    pub fn take_startup_failure(&mut self) -> Option<anyhow::Error> {
        self.startup_failure.take()
    }
}
