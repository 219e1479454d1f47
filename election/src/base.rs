//! Basic bounds used across this crate.

use std::fmt;
use std::hash::Hash;

/// Bounds a type must satisfy to be used as an election state.
///
/// The machine treats states as opaque values: it never interprets role
/// semantics, only the legality of transitions between them. Any finite
/// enumerable type works, e.g. a plain `enum` such as [`Role`].
///
/// This trait is blanket-implemented; there is nothing to implement by hand.
///
/// [`Role`]: crate::Role
pub trait State:
    Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
}

impl<T> State for T where
    T: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
}
