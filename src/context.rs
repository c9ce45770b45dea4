use crate::{config::Config, persistent_state::PersistentState, volatile_state::VolatileState};
use tokio::sync::{Mutex, Notify};

/// Collection of data that is shared across events.  Owned by the `Handler`.
pub struct Context<'a> {
    pub cfg: &'a Config,
    pub pstate: &'a Mutex<PersistentState>,
    pub vstate: &'a Mutex<VolatileState>,
    /// Wakes the shutdown watcher in `main`.
    pub shutdown: &'a Notify,
}
