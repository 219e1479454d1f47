use std::collections::HashMap;

use crate::base::State;

/// The transition graph: a mapping from a state to the ordered sequence of
/// states it may transition to.
///
/// Built once by the [`Builder`] and immutable thereafter. Edges are
/// appended in registration order and duplicates are preserved: registering
/// the same `(from, to)` pair twice makes `to` appear twice in the allowed
/// sequence.
///
/// [`Builder`]: crate::machine::Builder
#[derive(Debug)]
pub(crate) struct Transitions<S>
where S: State
{
    edges: HashMap<S, Vec<S>>,
}

impl<S> Transitions<S>
where S: State
{
    pub(crate) fn new() -> Self {
        Self {
            edges: HashMap::new(),
        }
    }

    /// Append `to` as a legal successor of `from`.
    pub(crate) fn add(&mut self, from: S, to: S) {
        self.edges.entry(from).or_default().push(to);
    }

    /// The states `from` may transition to; empty if `from` has no
    /// registered outgoing edges.
    pub(crate) fn allowed(&self, from: &S) -> &[S] {
        self.edges.get(from).map(Vec::as_slice).unwrap_or_default()
    }

    pub(crate) fn is_allowed(&self, from: &S, to: &S) -> bool {
        self.allowed(from).contains(to)
    }
}
