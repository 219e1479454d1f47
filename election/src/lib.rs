//! Local building blocks for a node-level leader-election protocol.
//!
//! This crate provides the two in-process primitives the surrounding
//! election protocol is built on:
//!
//! - [`StateMachine`]: a transition-validated role container. All mutations
//!   are serialized through a single dedicated task, so there is a strict
//!   total order over transitions and subscribers observe each committed
//!   transition exactly once.
//! - [`Term`]: a lock-free, monotonically advancing counter identifying an
//!   election round, used to detect and reject stale rounds.
//!
//! Network transport, vote handling, quorum counting and timer scheduling
//! live outside this crate; they drive the machine and the term through the
//! API surface exported here.
//!
//! ```
//! use election::Role;
//! use election::StateMachine;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let sm = StateMachine::builder()
//!     .add_transition(Role::Follower, Role::Candidate)
//!     .add_transition(Role::Candidate, Role::Leader)
//!     .add_transition(Role::Candidate, Role::Follower)
//!     .init(Role::Follower)
//!     .build()?;
//!
//! sm.on(Role::Leader, |role| println!("became {}", role))?;
//!
//! let reply = sm.transition(Role::Candidate).await?;
//! assert!(reply.is_ok());
//! # Ok(())
//! # }
//! ```

#![deny(unused_qualifications)]

mod base;
mod role;
mod term;

pub mod errors;
pub mod machine;

pub use crate::base::State;
pub use crate::machine::Builder;
pub use crate::machine::StateMachine;
pub use crate::machine::Transition;
pub use crate::machine::TransitionReply;
pub use crate::role::Role;
pub use crate::term::Term;
