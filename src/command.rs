//! Async command pattern for side effects.
//!
//! Commands represent async operations that run outside the main event loop.
//! Screens return commands from their update step, and the App spawns them
//! on the runtime. Results travel back through the owning screen's message
//! channel; if the screen was left in the meantime, the send fails on the
//! dropped receiver and the result is discarded.

use async_trait::async_trait;

/// Async command that performs side effects.
///
/// Commands are spawned by the App. They typically send results back to
/// the screen via a channel.
#[async_trait]
pub trait Command: Send + 'static {
    /// Human-readable name for logging. Include context like user ids.
    fn name(&self) -> String;

    /// Execute the command.
    async fn execute(self: Box<Self>) -> color_eyre::Result<()>;
}
