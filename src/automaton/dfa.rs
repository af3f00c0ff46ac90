//! Closure-backed automata.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use super::Automaton;
use crate::alphabet::Alphabet;
use crate::error::{AutomatonError, Result};

type TransitionRule<S, A> = Arc<dyn Fn(&S, &A) -> Result<S> + Send + Sync>;
type LabelRule<S, O> = Arc<dyn Fn(&S) -> Result<O> + Send + Sync>;

/// Automaton defined by a start state and a pair of rules.
///
/// The state space is whatever the transition rule produces; it is never
/// tabulated. Rules are stored behind [`Arc`], so cloning a `Dfa` is cheap
/// and clones share the same rules. A `Dfa` is `Send + Sync` and can be
/// used from several threads at once.
///
/// With a finite alphabet, symbols outside it are rejected before the
/// transition rule is consulted. The rule itself may still reject symbols
/// per state by returning [`AutomatonError::InvalidSymbol`].
///
/// # Example
///
/// ```rust
/// use lazy_dfa::prelude::*;
///
/// // Accepts words with an even number of 1s.
/// let even_ones = Dfa::new(true, [0, 1], |even, bit| *even ^ (*bit == 1), |even| *even);
///
/// assert!(even_ones.accepts([1, 1]).unwrap());
/// assert!(!even_ones.accepts([1]).unwrap());
/// assert!(even_ones.accepts(Vec::<i32>::new()).unwrap());
/// ```
pub struct Dfa<S, A, O = bool> {
    start: S,
    alphabet: Alphabet<A>,
    transition: TransitionRule<S, A>,
    label: LabelRule<S, O>,
}

impl<S, A, O> Dfa<S, A, O>
where
    S: Clone + Eq + Hash + 'static,
    A: Clone + Eq + Hash + fmt::Debug + 'static,
    O: Clone + Eq + Hash + 'static,
{
    /// Create an automaton over a finite alphabet from infallible rules.
    pub fn new<I, T, L>(start: S, inputs: I, transition: T, label: L) -> Self
    where
        I: IntoIterator<Item = A>,
        T: Fn(&S, &A) -> S + Send + Sync + 'static,
        L: Fn(&S) -> O + Send + Sync + 'static,
    {
        Dfa {
            start,
            alphabet: Alphabet::finite(inputs),
            transition: infallible_transition(transition),
            label: infallible_label(label),
        }
    }

    /// Create an automaton from fallible rules and an arbitrary alphabet.
    ///
    /// Errors returned by the rules are propagated unchanged. A transition
    /// rule returning [`AutomatonError::InvalidSymbol`] declares that symbol
    /// invalid at that state.
    pub fn try_new<T, L>(start: S, alphabet: Alphabet<A>, transition: T, label: L) -> Self
    where
        T: Fn(&S, &A) -> Result<S> + Send + Sync + 'static,
        L: Fn(&S) -> Result<O> + Send + Sync + 'static,
    {
        Dfa {
            start,
            alphabet,
            transition: Arc::new(transition),
            label: Arc::new(label),
        }
    }

    /// Create an automaton with an implicit alphabet.
    ///
    /// Every symbol is offered to `transition`, which rejects invalid ones
    /// with [`AutomatonError::InvalidSymbol`].
    pub fn implicit<T, L>(start: S, transition: T, label: L) -> Self
    where
        T: Fn(&S, &A) -> Result<S> + Send + Sync + 'static,
        L: Fn(&S) -> O + Send + Sync + 'static,
    {
        Dfa {
            start,
            alphabet: Alphabet::Implicit,
            transition: Arc::new(transition),
            label: infallible_label(label),
        }
    }
}

fn infallible_transition<S, A, T>(transition: T) -> TransitionRule<S, A>
where
    S: 'static,
    A: 'static,
    T: Fn(&S, &A) -> S + Send + Sync + 'static,
{
    Arc::new(move |state: &S, symbol: &A| -> Result<S> { Ok(transition(state, symbol)) })
}

fn infallible_label<S, O, L>(label: L) -> LabelRule<S, O>
where
    S: 'static,
    O: 'static,
    L: Fn(&S) -> O + Send + Sync + 'static,
{
    Arc::new(move |state: &S| -> Result<O> { Ok(label(state)) })
}

impl<S, A, O> Automaton for Dfa<S, A, O>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash + fmt::Debug,
    O: Clone + Eq + Hash,
{
    type State = S;
    type Symbol = A;
    type Output = O;

    fn start(&self) -> S {
        self.start.clone()
    }

    fn alphabet(&self) -> &Alphabet<A> {
        &self.alphabet
    }

    fn transition(&self, state: &S, symbol: &A) -> Result<S> {
        if !self.alphabet.contains(symbol) {
            return Err(AutomatonError::invalid_symbol(symbol));
        }
        (self.transition)(state, symbol)
    }

    fn label(&self, state: &S) -> Result<O> {
        (self.label)(state)
    }
}

// Manual Clone: the rules are shared, not deep-copied.
impl<S: Clone, A: Clone, O> Clone for Dfa<S, A, O> {
    fn clone(&self) -> Self {
        Dfa {
            start: self.start.clone(),
            alphabet: self.alphabet.clone(),
            transition: Arc::clone(&self.transition),
            label: Arc::clone(&self.label),
        }
    }
}

impl<S: fmt::Debug, A: fmt::Debug, O> fmt::Debug for Dfa<S, A, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dfa")
            .field("start", &self.start)
            .field("alphabet", &self.alphabet)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_alphabet_rejects_unknown_symbols() {
        let dfa = Dfa::new(0u8, ['a'], |s, _| s + 1, |s| *s > 1);
        assert_eq!(dfa.transition(&0, &'a').unwrap(), 1);
        assert_eq!(dfa.step(&1, &'a').unwrap(), 2);
        assert!(dfa.transition(&0, &'b').unwrap_err().is_invalid_symbol());
    }

    #[test]
    fn test_state_dependent_alphabet() {
        // 'b' is only valid once an 'a' has been read.
        let dfa: Dfa<bool, char> = Dfa::try_new(
            false,
            Alphabet::finite(['a', 'b']),
            |seen_a, c| match (seen_a, c) {
                (false, 'b') => Err(AutomatonError::invalid_symbol(c)),
                _ => Ok(*seen_a || *c == 'a'),
            },
            |seen_a| Ok(*seen_a),
        );

        assert!(dfa.accepts("ab".chars()).unwrap());
        let err = dfa.accepts("aab".chars().rev()).unwrap_err();
        assert!(matches!(
            err,
            AutomatonError::InvalidSymbol { position: Some(0), .. }
        ));
    }

    #[test]
    fn test_rule_errors_propagate() {
        let dfa: Dfa<u32, u32, bool> = Dfa::implicit(
            0,
            |s, step| {
                s.checked_add(*step)
                    .ok_or_else(|| AutomatonError::rule("overflow"))
            },
            |s| s % 2 == 0,
        );

        assert!(dfa.accepts([2u32, 4]).unwrap());
        let err = dfa.accepts([u32::MAX, 1]).unwrap_err();
        assert!(matches!(err, AutomatonError::Rule(_)));
    }

    #[test]
    fn test_clone_shares_rules() {
        let dfa = Dfa::new(0i64, [1i64, -1], |s, d| s + d, |s| *s == 0);
        let copy = dfa.clone();
        assert!(Arc::ptr_eq(&dfa.transition, &copy.transition));
        assert!(copy.accepts([1, -1, 1, -1]).unwrap());
    }

    #[test]
    fn test_debug_shows_start_and_alphabet() {
        let dfa = Dfa::new(3u8, ['x'], |s, _| *s, |_| true);
        let rendered = format!("{dfa:?}");
        assert!(rendered.contains("start: 3"));
        assert!(rendered.contains("'x'"));
    }
}
