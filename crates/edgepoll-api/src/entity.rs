// Polling surface shared by the switch and port clients.
//
// The scheduler that drives polling depends only on this trait; it
// never sees the HTTP machinery behind it.

/// A polled status entity.
///
/// Each entity has exactly one state slot, overwritten on every poll
/// cycle. `update()` is infallible by contract: every failure mode is
/// handled inside the implementation (logged, state left at its prior
/// value) and nothing propagates to the scheduler.
#[allow(async_fn_in_trait)]
pub trait Entity {
    /// The state type exposed to readers.
    type State;

    /// Display name for logs and output.
    fn name(&self) -> &str;

    /// Whether the scheduler should poll this entity.
    fn should_poll(&self) -> bool {
        true
    }

    /// Current state, as of the last completed poll.
    fn state(&self) -> Self::State;

    /// Run one poll cycle, mutating the internal state slot.
    async fn update(&mut self);
}
