use std::collections::HashMap;
use std::mem;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::watch;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::base::State;
use crate::errors::Fatal;
use crate::errors::IllegalTransition;
use crate::machine::request::Handler;
use crate::machine::request::Request;
use crate::machine::transitions::Transitions;
use crate::machine::Transition;
use crate::machine::TransitionReply;

/// The single serialized writer of a [`StateMachine`].
///
/// One `Core` task drains the request mailbox, so at most one mutation is in
/// flight at any time: transitions form a strict total order, and subscriber
/// dispatch for a committed transition finishes before the next queued
/// request is processed.
///
/// [`StateMachine`]: crate::machine::StateMachine
pub(crate) struct Core<S>
where S: State
{
    /// The frozen transition graph.
    pub(crate) transitions: Arc<Transitions<S>>,

    /// The current state. Mutated only by this task; published through
    /// `tx_state` after every commit.
    pub(crate) state: S,

    /// Subscribers keyed by target state, invoked in registration order.
    pub(crate) subscribers: HashMap<S, Vec<Handler<S>>>,

    pub(crate) rx_request: mpsc::UnboundedReceiver<Request<S>>,

    pub(crate) tx_state: watch::Sender<S>,
}

impl<S> Core<S>
where S: State
{
    /// Run the mailbox loop until every handle is dropped.
    pub(crate) async fn main(mut self) -> Fatal {
        loop {
            let Some(req) = self.rx_request.recv().await else {
                info!("all request senders are dropped, core quits");
                return Fatal::Stopped;
            };

            debug!("core: handle request: {}", req);

            match req {
                Request::Transition { to, tx } => {
                    let reply = self.apply_transition(to);

                    match tx {
                        Some(tx) => {
                            // The submitter may have given up waiting.
                            let _ = tx.send(reply);
                        }
                        None => {
                            if let Err(rejected) = reply {
                                warn!("{}", rejected);
                            }
                        }
                    }
                }
                Request::Subscribe { state, handler } => {
                    self.subscribers.entry(state).or_default().push(handler);
                }
            }
        }
    }

    /// Validate and apply one transition, then notify subscribers of the
    /// target state.
    fn apply_transition(&mut self, to: S) -> TransitionReply<S> {
        if to == self.state {
            warn!("no transition was done - already in state {}", to);
            return Ok(Transition {
                from: to.clone(),
                to,
            });
        }

        if !self.transitions.is_allowed(&self.state, &to) {
            return Err(IllegalTransition {
                from: self.state.clone(),
                to,
            });
        }

        info!("start transition to {}", to);

        let from = mem::replace(&mut self.state, to.clone());

        // Publish the committed state before running subscribers, so a
        // handler reading `current_state()` sees the state it was notified
        // for.
        let _ = self.tx_state.send(to.clone());

        self.notify(&to);

        Ok(Transition { from, to })
    }

    /// Invoke every subscriber registered for `state`, in registration
    /// order, each exactly once.
    fn notify(&mut self, state: &S) {
        let Some(handlers) = self.subscribers.get_mut(state) else {
            return;
        };

        for handler in handlers.iter_mut() {
            handler(state.clone());
        }
    }
}
