//! Bijective state renaming.

use std::hash::Hash;
use std::marker::PhantomData;

use crate::alphabet::Alphabet;
use crate::automaton::Automaton;
use crate::error::Result;

/// Automaton whose states are renamed through a bijection.
///
/// `forward` maps inner states to new names and `inverse` maps them back.
/// The two must be mutually inverse on the reachable states; this is not
/// checked. Renaming is useful to keep two automata's state spaces apart
/// before a product, or to present states under canonical names.
pub struct Relabel<M, F, G, T> {
    inner: M,
    forward: F,
    inverse: G,
    _names: PhantomData<fn() -> T>,
}

impl<M, F, G, T> Relabel<M, F, G, T>
where
    M: Automaton,
    T: Clone + Eq + Hash,
    F: Fn(&M::State) -> T,
    G: Fn(&T) -> M::State,
{
    /// Rename the states of `inner`.
    pub fn new(inner: M, forward: F, inverse: G) -> Self {
        Relabel {
            inner,
            forward,
            inverse,
            _names: PhantomData,
        }
    }

    /// The renamed automaton.
    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M, F, G, T> Automaton for Relabel<M, F, G, T>
where
    M: Automaton,
    T: Clone + Eq + Hash,
    F: Fn(&M::State) -> T,
    G: Fn(&T) -> M::State,
{
    type State = T;
    type Symbol = M::Symbol;
    type Output = M::Output;

    fn start(&self) -> T {
        (self.forward)(&self.inner.start())
    }

    fn alphabet(&self) -> &Alphabet<Self::Symbol> {
        self.inner.alphabet()
    }

    fn transition(&self, state: &T, symbol: &Self::Symbol) -> Result<T> {
        let next = self.inner.transition(&(self.inverse)(state), symbol)?;
        Ok((self.forward)(&next))
    }

    fn label(&self, state: &T) -> Result<Self::Output> {
        self.inner.label(&(self.inverse)(state))
    }
}

impl<M: Clone, F: Clone, G: Clone, T> Clone for Relabel<M, F, G, T> {
    fn clone(&self) -> Self {
        Relabel {
            inner: self.inner.clone(),
            forward: self.forward.clone(),
            inverse: self.inverse.clone(),
            _names: PhantomData,
        }
    }
}
