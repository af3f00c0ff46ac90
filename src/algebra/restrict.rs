//! Alphabet restriction.

use crate::alphabet::Alphabet;
use crate::automaton::Automaton;
use crate::error::{AutomatonError, Result};

/// Automaton with a narrowed input alphabet.
///
/// Symbols outside the restricted alphabet raise
/// [`InvalidSymbol`](AutomatonError::InvalidSymbol) instead of reaching the
/// inner transition rule. Symbols the inner automaton does not declare are
/// dropped from the restriction.
#[derive(Debug, Clone)]
pub struct Restrict<M: Automaton> {
    inner: M,
    alphabet: Alphabet<M::Symbol>,
}

impl<M: Automaton> Restrict<M> {
    /// Restrict `inner` to `symbols`.
    pub fn new<I>(inner: M, symbols: I) -> Self
    where
        I: IntoIterator<Item = M::Symbol>,
    {
        let alphabet = inner.alphabet().restricted(symbols);
        Restrict { inner, alphabet }
    }

    /// The unrestricted automaton.
    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: Automaton> Automaton for Restrict<M> {
    type State = M::State;
    type Symbol = M::Symbol;
    type Output = M::Output;

    fn start(&self) -> Self::State {
        self.inner.start()
    }

    fn alphabet(&self) -> &Alphabet<Self::Symbol> {
        &self.alphabet
    }

    fn transition(&self, state: &Self::State, symbol: &Self::Symbol) -> Result<Self::State> {
        if !self.alphabet.contains(symbol) {
            return Err(AutomatonError::invalid_symbol(symbol));
        }
        self.inner.transition(state, symbol)
    }

    fn label(&self, state: &Self::State) -> Result<Self::Output> {
        self.inner.label(state)
    }
}
