use std::fmt;

use tokio::sync::oneshot;

use crate::base::State;
use crate::machine::TransitionReply;

/// A subscriber invoked on the core task after a transition to its state is
/// committed.
pub(crate) type Handler<S> = Box<dyn FnMut(S) + Send + 'static>;

/// A message sent by a [`StateMachine`] handle to the core task.
///
/// [`StateMachine`]: crate::machine::StateMachine
pub(crate) enum Request<S>
where S: State
{
    Transition {
        to: S,

        /// Present for awaited submissions; `None` for fire-and-forget,
        /// where a rejection is only logged.
        tx: Option<oneshot::Sender<TransitionReply<S>>>,
    },

    Subscribe { state: S, handler: Handler<S> },
}

impl<S> fmt::Display for Request<S>
where S: State
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Request::Transition { to, tx } => {
                let mode = if tx.is_some() { "awaited" } else { "ff" };
                write!(f, "Transition({}) to: {}", mode, to)
            }
            Request::Subscribe { state, .. } => {
                write!(f, "Subscribe on: {}", state)
            }
        }
    }
}
