use std::fmt;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

/// A monotonic counter identifying an election round.
///
/// Every election round a node initiates bumps the term with
/// [`next_term()`](Term::next_term). A term observed from a peer that is
/// greater than the local one means the local knowledge is stale; the caller
/// detects that with [`is_before()`](Term::is_before) and adopts the peer's
/// term with [`set()`](Term::set).
///
/// All operations are lock-free and safe under arbitrary concurrent access.
/// Monotonicity is guaranteed only with respect to `next_term()`: `set()`
/// overwrites unconditionally, including with a lower value. Callers are
/// responsible for only passing an authoritative value to `set()`.
#[derive(Debug, Default)]
pub struct Term {
    term: AtomicU64,
}

impl Term {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically increment the term and return the new value.
    ///
    /// Concurrent callers each receive a distinct value, strictly greater
    /// than any value returned before their call started.
    pub fn next_term(&self) -> u64 {
        self.term.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Return `true` iff the current term is strictly less than `other`.
    pub fn is_before(&self, other: u64) -> bool {
        self.term.load(Ordering::Relaxed) < other
    }

    /// Overwrite the term with `value`.
    ///
    /// No ordering check is performed: a lower `value` silently rolls the
    /// term backward.
    pub fn set(&self, value: u64) {
        self.term.store(value, Ordering::Relaxed);
    }

    /// Return the current term value.
    pub fn get(&self) -> u64 {
        self.term.load(Ordering::Relaxed)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.get())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;
    use std::thread;

    use pretty_assertions::assert_eq;

    use crate::Term;

    #[test]
    fn test_next_term_increments() {
        let term = Term::new();

        assert_eq!(0, term.get());
        assert_eq!(1, term.next_term());
        assert_eq!(2, term.next_term());
        assert_eq!(3, term.next_term());
        assert_eq!(3, term.get());
    }

    #[test]
    fn test_is_before() {
        let term = Term::new();
        term.set(5);

        assert!(!term.is_before(5));
        assert!(!term.is_before(4));
        assert!(term.is_before(6));
    }

    #[test]
    fn test_set_is_unconditional() {
        let term = Term::new();
        term.set(10);
        assert_eq!(10, term.get());

        // A lower value is accepted and rolls the term backward.
        term.set(2);
        assert_eq!(2, term.get());
    }

    #[test]
    fn test_next_term_concurrent_distinct_contiguous() {
        let n_threads = 8usize;
        let per_thread = 1000u64;

        let term = Arc::new(Term::new());

        let handles = (0..n_threads)
            .map(|_| {
                let term = term.clone();
                thread::spawn(move || {
                    (0..per_thread)
                        .map(|_| term.next_term())
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();

        let mut seen = BTreeSet::new();
        for h in handles {
            for v in h.join().unwrap() {
                assert!(seen.insert(v), "duplicate term value {}", v);
            }
        }

        let total = n_threads as u64 * per_thread;
        assert_eq!(total as usize, seen.len());
        assert_eq!(Some(&1), seen.first());
        assert_eq!(Some(&total), seen.last());
        assert_eq!(total, term.get());
    }

    #[test]
    fn test_term_display() {
        let term = Term::new();
        term.set(7);
        assert_eq!("T7", term.to_string());
    }
}
