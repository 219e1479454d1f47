//! Error types exposed by this crate.

use crate::base::State;

/// Fatal indicates the machine's core task is gone and the handle is no
/// longer usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Fatal {
    /// The core task has quit, e.g. after every handle was dropped.
    #[error("state machine stopped")]
    Stopped,
}

/// A transition was requested to a state that is not in the allowed set of
/// the current state.
///
/// The machine's state and subscribers are untouched by a rejected
/// transition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not allowed transition from: {from} to: {to}")]
pub struct IllegalTransition<S>
where S: State
{
    pub from: S,
    pub to: S,
}

/// `Builder::build()` was called without `init()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("initial state is not set; call Builder::init() before build()")]
pub struct UninitializedMachine {}
