//! The transition-validated state machine.
//!
//! [`StateMachine`] serves as the handle to the machine. The machine itself
//! runs as a single dedicated task (the `Core`) draining a request mailbox,
//! so every mutation is serialized: there is a strict total order over
//! transitions, reads never observe a torn value, and subscribers for a
//! committed transition run before the next queued request is processed.
//!
//! [`StateMachine`] is cheaply cloneable; every clone talks to the same
//! `Core`.

mod core;
mod request;
mod transition;
mod transitions;


use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tokio::sync::watch;
use tracing::debug;

use crate::base::State;
use crate::errors::Fatal;
use crate::errors::UninitializedMachine;
use crate::machine::core::Core;
use crate::machine::request::Request;
use crate::machine::transitions::Transitions;
pub use crate::machine::transition::Transition;
pub use crate::machine::transition::TransitionReply;

/// Builds a [`StateMachine`]: register the legal transitions, set the
/// initial state, then [`build()`](Builder::build).
pub struct Builder<S>
where S: State
{
    init: Option<S>,
    transitions: Transitions<S>,
}

impl<S> Default for Builder<S>
where S: State
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Builder<S>
where S: State
{
    pub fn new() -> Self {
        Self {
            init: None,
            transitions: Transitions::new(),
        }
    }

    /// Register `to` as a legal successor of `from`.
    ///
    /// Edges are appended, not deduplicated: registering the same pair
    /// twice makes `to` appear twice in [`StateMachine::allowed()`].
    pub fn add_transition(mut self, from: S, to: S) -> Self {
        self.transitions.add(from, to);
        self
    }

    /// Set the initial state. Required before [`build()`](Builder::build).
    pub fn init(mut self, state: S) -> Self {
        self.init = Some(state);
        self
    }

    /// Freeze the transition graph, spawn the core task and return a handle
    /// positioned at the initial state.
    ///
    /// Must be called from within a Tokio runtime context.
    pub fn build(self) -> Result<StateMachine<S>, UninitializedMachine> {
        let Some(init) = self.init else {
            return Err(UninitializedMachine {});
        };

        let transitions = Arc::new(self.transitions);

        let (tx_request, rx_request) = mpsc::unbounded_channel();
        let (tx_state, rx_state) = watch::channel(init.clone());

        let core = Core {
            transitions: transitions.clone(),
            state: init,
            subscribers: HashMap::new(),
            rx_request,
            tx_state,
        };

        tokio::spawn(core.main());

        Ok(StateMachine {
            inner: Arc::new(MachineInner {
                transitions,
                tx_request,
                rx_state,
            }),
        })
    }
}

struct MachineInner<S>
where S: State
{
    transitions: Arc<Transitions<S>>,
    tx_request: mpsc::UnboundedSender<Request<S>>,
    rx_state: watch::Receiver<S>,
}

/// Handle to a running state machine.
///
/// ### Clone
///
/// This type implements `Clone`, and cloning itself is very cheap; every
/// clone submits to the same serialized core task.
///
/// ### Shutting down
///
/// The core task quits once every handle is dropped. Operations on a handle
/// whose core has quit return [`Fatal::Stopped`].
#[derive(Clone)]
pub struct StateMachine<S>
where S: State
{
    inner: Arc<MachineInner<S>>,
}

impl<S> StateMachine<S>
where S: State
{
    pub fn builder() -> Builder<S> {
        Builder::new()
    }

    /// The last committed state.
    ///
    /// Updated only by the core task after a commit, so the returned value
    /// is always consistent, never an in-flight intermediate.
    pub fn current_state(&self) -> S {
        self.inner.rx_state.borrow().clone()
    }

    /// The states the current state may transition to.
    ///
    /// Empty if the current state has no registered outgoing edges. The
    /// sequence preserves edge registration order, duplicates included.
    pub fn allowed(&self) -> Vec<S> {
        self.inner.transitions.allowed(&self.current_state()).to_vec()
    }

    /// Request a transition to `to` and await the outcome.
    ///
    /// - Same-state request: a successful no-op; no mutation, no
    ///   notification, and the returned [`Transition::is_noop()`] is true.
    /// - `to` in the allowed set: the state is updated, then every
    ///   subscriber registered for `to` runs exactly once, in registration
    ///   order, before the reply is sent.
    /// - Otherwise: `Ok(Err(IllegalTransition))`; state and subscribers are
    ///   untouched.
    ///
    /// The outer error is [`Fatal::Stopped`] when the core task is gone.
    ///
    /// [`IllegalTransition`]: crate::errors::IllegalTransition
    pub async fn transition(&self, to: S) -> Result<TransitionReply<S>, Fatal> {
        debug!("submit awaited transition to {}", to);

        let (tx, rx) = oneshot::channel();
        self.send(Request::Transition { to, tx: Some(tx) })?;

        rx.await.map_err(|_| Fatal::Stopped)
    }

    /// Request a transition to `to` without waiting for the outcome.
    ///
    /// `_ff` means fire and forget. A rejected transition is only logged by
    /// the core at WARN; callers that must react to rejections use
    /// [`transition()`](StateMachine::transition) instead.
    pub fn transition_ff(&self, to: S) -> Result<(), Fatal> {
        debug!("submit fire-and-forget transition to {}", to);

        self.send(Request::Transition { to, tx: None })
    }

    /// Register `handler` to run whenever a transition lands on `state`.
    ///
    /// Handlers for the same state run in registration order, each exactly
    /// once per qualifying transition, on the core task after the mutation
    /// is committed. Registration has no effect on transitions already
    /// processed. A handler that blocks stalls every subsequent transition.
    pub fn on<F>(&self, state: S, handler: F) -> Result<(), Fatal>
    where F: FnMut(S) + Send + 'static {
        self.send(Request::Subscribe {
            state,
            handler: Box::new(handler),
        })
    }

    fn send(&self, req: Request<S>) -> Result<(), Fatal> {
        self.inner.tx_request.send(req).map_err(|_| Fatal::Stopped)
    }
}
