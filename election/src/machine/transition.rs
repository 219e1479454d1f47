use std::fmt;

use crate::base::State;
use crate::errors::IllegalTransition;

/// The reply to an awaited transition request.
///
/// The outer layer of error handling, [`Fatal`], is reported separately by
/// the submitting call when the machine has stopped.
///
/// [`Fatal`]: crate::errors::Fatal
pub type TransitionReply<S> = Result<Transition<S>, IllegalTransition<S>>;

/// A transition committed by the machine.
///
/// `from == to` indicates a same-state no-op: nothing was mutated and no
/// subscriber was notified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<S>
where S: State
{
    pub from: S,
    pub to: S,
}

impl<S> Transition<S>
where S: State
{
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

impl<S> fmt::Display for Transition<S>
where S: State
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}
