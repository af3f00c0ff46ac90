//! Language comparison by product search.
//!
//! Both automata are run in lockstep and the reachable pairs are searched
//! breadth-first for a witness: a pair whose outputs disagree (equivalence)
//! or a pair accepted on the left and rejected on the right (inclusion). The
//! parent links of the search give a shortest witness word for free.
//!
//! Each side is first completed with a sink, so a word that is defined on
//! one side and invalid on the other reaches a pair with one sink half.
//! The sink disagrees with every real state, matching minimization, which
//! keeps absent edges apart from present ones.

use crate::algebra::Product;
use crate::alphabet::Alphabet;
use crate::automaton::Automaton;
use crate::error::Result;
use crate::reachability::{declared_symbols, Reachable};

/// `inner` completed with a sink state `None`.
///
/// A symbol invalid at a state leads to the sink, which loops on every
/// symbol and has output `None`.
struct WithSink<M> {
    inner: M,
}

impl<M: Automaton> Automaton for WithSink<M> {
    type State = Option<M::State>;
    type Symbol = M::Symbol;
    type Output = Option<M::Output>;

    fn start(&self) -> Self::State {
        Some(self.inner.start())
    }

    fn alphabet(&self) -> &Alphabet<M::Symbol> {
        self.inner.alphabet()
    }

    fn transition(&self, state: &Self::State, symbol: &M::Symbol) -> Result<Self::State> {
        let Some(state) = state else {
            return Ok(None);
        };
        match self.inner.transition(state, symbol) {
            Ok(next) => Ok(Some(next)),
            Err(err) if err.is_invalid_symbol() => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn label(&self, state: &Self::State) -> Result<Self::Output> {
        state.as_ref().map(|state| self.inner.label(state)).transpose()
    }
}

/// Shortest word leading to a state whose label satisfies `witness`.
pub(crate) fn find_word<M, P>(automaton: &M, cap: usize, mut witness: P) -> Result<Option<Vec<M::Symbol>>>
where
    M: Automaton + ?Sized,
    P: FnMut(&M::Output) -> bool,
{
    let mut reachable = Reachable::new(automaton, declared_symbols(automaton)?).with_cap(cap);
    while let Some(id) = reachable.next_id() {
        let id = id?;
        let Some(state) = reachable.codec().lookup(id) else {
            continue;
        };
        if witness(&automaton.label(state)?) {
            let word = reachable.word_to(id);
            tracing::debug!(length = word.len(), visited = id + 1, "found witness word");
            return Ok(Some(word));
        }
    }
    Ok(None)
}

/// Check whether `left` and `right` produce the same output on every word.
pub(crate) fn equivalent<L, R>(left: &L, right: &R, cap: usize) -> Result<bool>
where
    L: Automaton,
    R: Automaton<Symbol = L::Symbol, Output = L::Output>,
{
    let same = find_counterexample(left, right, cap)?.is_none();
    tracing::debug!(equivalent = same, cap, "equivalence check finished");
    Ok(same)
}

/// Shortest word on which `left` and `right` disagree.
pub(crate) fn find_counterexample<L, R>(left: &L, right: &R, cap: usize) -> Result<Option<Vec<L::Symbol>>>
where
    L: Automaton,
    R: Automaton<Symbol = L::Symbol, Output = L::Output>,
{
    let agreement = Product::new(
        WithSink { inner: left },
        WithSink { inner: right },
        |a: &Option<L::Output>, b: &Option<L::Output>| a == b,
    )?;
    find_word(&agreement, cap, |agree| !*agree)
}

/// Check whether every word accepted by `left` is accepted by `right`.
///
/// A word invalid for `right` counts as rejected by it.
pub(crate) fn included_in<L, R>(left: &L, right: &R, cap: usize) -> Result<bool>
where
    L: Automaton<Output = bool>,
    R: Automaton<Symbol = L::Symbol, Output = bool>,
{
    let escapes = Product::new(
        WithSink { inner: left },
        WithSink { inner: right },
        |accepted: &Option<bool>, kept: &Option<bool>| *accepted == Some(true) && *kept != Some(true),
    )?;
    let included = find_word(&escapes, cap, |accepting| *accepting)?.is_none();
    tracing::debug!(included, cap, "inclusion check finished");
    Ok(included)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::{Dfa, TableDfa};
    use crate::error::AutomatonError;

    // Accepts words with an even number of 'a's, tracking the count modulo `modulus`.
    fn even_a(modulus: u8) -> Dfa<u8, char> {
        Dfa::new(0u8, ['a', 'b'], move |n, c| if *c == 'a' { (n + 1) % modulus } else { *n }, |n| n % 2 == 0)
    }

    fn ends_with_b() -> Dfa<bool, char> {
        Dfa::new(false, ['a', 'b'], |_, c| *c == 'b', |last_b| *last_b)
    }

    #[test]
    fn test_equivalent_with_different_state_counts() {
        assert!(even_a(2).equivalent(&even_a(4), 16).unwrap());
        assert!(even_a(2).equivalent(&even_a(2).minimize(16).unwrap(), 16).unwrap());
    }

    #[test]
    fn test_counterexample_is_shortest() {
        let word = even_a(2).find_counterexample(&ends_with_b(), 16).unwrap();
        // Empty word: even_a accepts, ends_with_b rejects.
        assert_eq!(word, Some(vec![]));

        let a_then_b = Dfa::new(
            0u8,
            ['a', 'b'],
            |n, c| match (n, c) {
                (0, 'a') => 1,
                (1, 'b') => 2,
                _ => 3,
            },
            |n| *n == 2,
        );
        let never = Dfa::new(0u8, ['a', 'b'], |n, _| *n, |_| false);
        assert_eq!(
            a_then_b.find_counterexample(&never, 16).unwrap(),
            Some(vec!['a', 'b'])
        );
    }

    #[test]
    fn test_moore_machines_compare_outputs() {
        let mod3 = Dfa::new(0u8, ['x'], |n, _| (n + 1) % 3, |n| *n);
        let mod6 = Dfa::new(0u8, ['x'], |n, _| (n + 1) % 6, |n| n % 3);
        assert!(mod3.equivalent(&mod6, 16).unwrap());

        let shifted = Dfa::new(1u8, ['x'], |n, _| (n + 1) % 3, |n| *n);
        assert_eq!(
            mod3.find_counterexample(&shifted, 16).unwrap(),
            Some(vec![])
        );
    }

    #[test]
    fn test_inclusion() {
        let even = even_a(2);
        let ends_b = ends_with_b();
        let both = (&even).intersection(&ends_b).unwrap();

        assert!(both.included_in(&ends_b, 16).unwrap());
        assert!(both.included_in(&even, 16).unwrap());
        assert!(!ends_b.included_in(&both, 16).unwrap());
        assert!(ends_b.included_in(&ends_b, 16).unwrap());
    }

    #[test]
    fn test_find_accepting_word() {
        let table = TableDfa::new(
            0,
            ['a', 'b'],
            vec![vec![1, 0], vec![1, 2], vec![2, 2]],
            vec![false, false, true],
        )
        .unwrap();
        assert_eq!(table.find_accepting_word(8).unwrap(), Some(vec!['a', 'b']));
        assert!(!table.is_empty_language(8).unwrap());

        let never = Dfa::new(0u8, ['a', 'b'], |n, _| (n + 1) % 3, |_| false);
        assert_eq!(never.find_accepting_word(8).unwrap(), None);
        assert!(never.is_empty_language(8).unwrap());
    }

    // 'a' loops; the first 'b' moves to an accepting trap.
    fn accepts_after_b() -> TableDfa<char, bool> {
        TableDfa::new(0, ['a', 'b'], vec![vec![0, 1], vec![1, 1]], vec![false, true]).unwrap()
    }

    // Same rejecting prefix, but 'b' is never valid.
    fn only_a() -> TableDfa<char, bool> {
        TableDfa::from_partial(0, ['a', 'b'], vec![vec![Some(0), None]], vec![false]).unwrap()
    }

    #[test]
    fn test_one_sided_invalid_words_are_observed() {
        let total = accepts_after_b();
        let partial = only_a();

        assert!(!total.equivalent(&partial, 16).unwrap());
        assert!(!partial.equivalent(&total, 16).unwrap());
        assert_eq!(total.find_counterexample(&partial, 16).unwrap(), Some(vec!['b']));
        assert!(!total.included_in(&partial, 16).unwrap());
        assert!(partial.included_in(&total, 16).unwrap());

        // Agrees with minimization.
        assert_ne!(total.minimize(16).unwrap(), partial.minimize(16).unwrap());
    }

    #[test]
    fn test_invalid_differs_from_rejected() {
        let rejects_all = TableDfa::new(0, ['a', 'b'], vec![vec![0, 0]], vec![false]).unwrap();
        let partial = only_a();

        // Same accepted language, different domains.
        assert_eq!(rejects_all.find_counterexample(&partial, 16).unwrap(), Some(vec!['b']));
        assert!(rejects_all.included_in(&partial, 16).unwrap());
        assert!(partial.included_in(&rejects_all, 16).unwrap());
    }

    #[test]
    fn test_partial_tables_with_same_domain_are_equivalent() {
        let two_states = TableDfa::from_partial(
            0,
            ['a', 'b'],
            vec![vec![Some(1), None], vec![Some(0), None]],
            vec![false, false],
        )
        .unwrap();
        let partial = only_a();

        assert!(two_states.equivalent(&partial, 16).unwrap());
        assert_eq!(two_states.minimize(16).unwrap(), partial.minimize(16).unwrap());
    }

    #[test]
    fn test_infinite_product_hits_cap() {
        let unbounded = Dfa::new(0u64, ['a', 'b'], |n, _| n + 1, |_| true);
        let result = unbounded.equivalent(&even_a(2).map_output(|_| true), 50);
        assert!(matches!(
            result,
            Err(AutomatonError::UnboundedStateSpace { cap: 50 })
        ));
    }

    #[test]
    fn test_mismatched_alphabets_are_rejected() {
        let other = Dfa::new(0u8, ['a'], |n, _| *n, |_| true);
        assert!(matches!(
            even_a(2).equivalent(&other, 16),
            Err(AutomatonError::AlphabetMismatch)
        ));
    }
}
