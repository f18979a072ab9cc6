//! Coordinator error types.

use derive_more::{Display, Error};

/// Why a request was not accepted by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum CoordinatorError {
    /// The game already ended; no further reveals or flags are accepted.
    #[display("game has already finished")]
    GameFinished,
    /// The workers have shut down.
    #[display("coordinator is no longer running")]
    Closed,
}
