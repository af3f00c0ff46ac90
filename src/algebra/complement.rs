//! Output rewriting: complement and general output maps.

use std::hash::Hash;

use crate::alphabet::Alphabet;
use crate::automaton::Automaton;
use crate::error::Result;

/// Boolean complement: accepts exactly the words the inner DFA rejects.
///
/// Transitions are those of the inner automaton.
#[derive(Debug, Clone)]
pub struct Complement<M> {
    inner: M,
}

impl<M: Automaton<Output = bool>> Complement<M> {
    /// Wrap `inner`.
    pub fn new(inner: M) -> Self {
        Complement { inner }
    }

    /// The complemented automaton.
    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: Automaton<Output = bool>> Automaton for Complement<M> {
    type State = M::State;
    type Symbol = M::Symbol;
    type Output = bool;

    fn start(&self) -> Self::State {
        self.inner.start()
    }

    fn alphabet(&self) -> &Alphabet<Self::Symbol> {
        self.inner.alphabet()
    }

    fn transition(&self, state: &Self::State, symbol: &Self::Symbol) -> Result<Self::State> {
        self.inner.transition(state, symbol)
    }

    fn label(&self, state: &Self::State) -> Result<bool> {
        Ok(!self.inner.label(state)?)
    }
}

/// Moore-machine output relabeling: every output passes through `map`.
#[derive(Clone)]
pub struct MapOutput<M, F> {
    inner: M,
    map: F,
}

impl<M, F, O> MapOutput<M, F>
where
    M: Automaton,
    F: Fn(&M::Output) -> O,
    O: Clone + Eq + Hash,
{
    /// Wrap `inner`, rewriting its outputs with `map`.
    pub fn new(inner: M, map: F) -> Self {
        MapOutput { inner, map }
    }
}

impl<M, F, O> Automaton for MapOutput<M, F>
where
    M: Automaton,
    F: Fn(&M::Output) -> O,
    O: Clone + Eq + Hash,
{
    type State = M::State;
    type Symbol = M::Symbol;
    type Output = O;

    fn start(&self) -> Self::State {
        self.inner.start()
    }

    fn alphabet(&self) -> &Alphabet<Self::Symbol> {
        self.inner.alphabet()
    }

    fn transition(&self, state: &Self::State, symbol: &Self::Symbol) -> Result<Self::State> {
        self.inner.transition(state, symbol)
    }

    fn label(&self, state: &Self::State) -> Result<O> {
        Ok((self.map)(&self.inner.label(state)?))
    }
}
