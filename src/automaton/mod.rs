//! The automaton capability interface and its core values.
//!
//! An automaton is described by a start state, a transition rule and an
//! output (label) rule over an implicit state space. Nothing is tabulated up
//! front: states are produced on demand by the rules, so the reachable state
//! space may be infinite.
//!
//! A DFA is the special case `Output = bool`; any other output type gives a
//! Moore machine. Boolean-only operations ([`accepts`](Automaton::accepts),
//! [`union`](Automaton::union), [`complement`](Automaton::complement), ...)
//! are restricted statically through `Output = bool` bounds.
//!
//! Implementations are composed rather than inherited: [`Dfa`] wraps
//! caller-supplied closures, [`TableDfa`] wraps an explicit table, and the
//! [`algebra`](crate::algebra) combinators wrap other automata. References,
//! [`Arc`]s and [`Box`]es of automata are automata too, so a value can be
//! shared by many derived automata without being moved.

mod builder;
mod dfa;
mod table;
mod trace;

pub use builder::{BuilderError, DfaBuilder};
pub use dfa::Dfa;
pub use table::TableDfa;
pub use trace::{Runner, Trace};

use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use crate::algebra::{self, BoolProduct, Complement, MapOutput, Product, Relabel, Restrict};
use crate::alphabet::Alphabet;
use crate::analysis;
use crate::error::Result;
use crate::reachability::{Reachable, StateGraph};

/// Deterministic automaton with state-attached outputs.
///
/// `transition` and `label` must be pure: the same arguments always produce
/// the same result. They are expected to be total over the declared alphabet
/// from every reachable state; a symbol that is invalid at a given state is
/// reported with [`AutomatonError::InvalidSymbol`](crate::AutomatonError::InvalidSymbol).
pub trait Automaton {
    /// Opaque state value, identified by equality.
    type State: Clone + Eq + Hash;
    /// Input symbol consumed one at a time.
    type Symbol: Clone + Eq + Hash + Debug;
    /// Output attached to each state; `bool` for a DFA.
    type Output: Clone + Eq + Hash;

    /// The start state.
    fn start(&self) -> Self::State;

    /// The declared input alphabet.
    fn alphabet(&self) -> &Alphabet<Self::Symbol>;

    /// One-step move from `state` on `symbol`.
    fn transition(&self, state: &Self::State, symbol: &Self::Symbol) -> Result<Self::State>;

    /// Output of `state`.
    fn label(&self, state: &Self::State) -> Result<Self::Output>;

    /// Single transition; same as [`transition`](Self::transition).
    fn step(&self, state: &Self::State, symbol: &Self::Symbol) -> Result<Self::State> {
        self.transition(state, symbol)
    }

    /// Lazily trace the states visited while consuming `word` from the start.
    ///
    /// The trace has `len(word) + 1` entries and begins with the start state.
    fn trace<I>(&self, word: I) -> Trace<'_, Self, I::IntoIter>
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: Borrow<Self::Symbol>,
    {
        Trace::new(self, self.start(), word.into_iter())
    }

    /// Lazily trace `word` from an explicit start state.
    fn trace_from<I>(&self, start: Self::State, word: I) -> Trace<'_, Self, I::IntoIter>
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: Borrow<Self::Symbol>,
    {
        Trace::new(self, start, word.into_iter())
    }

    /// Run `word` from the start state, collecting the visited states.
    fn run<I>(&self, word: I) -> Result<Vec<Self::State>>
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: Borrow<Self::Symbol>,
    {
        self.trace(word).collect()
    }

    /// The state reached after consuming `word`.
    fn end_state<I>(&self, word: I) -> Result<Self::State>
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: Borrow<Self::Symbol>,
    {
        let mut state = self.start();
        for (position, symbol) in word.into_iter().enumerate() {
            state = self
                .transition(&state, symbol.borrow())
                .map_err(|err| err.at_position(position))?;
        }
        Ok(state)
    }

    /// Output of the state reached after consuming `word`.
    fn output<I>(&self, word: I) -> Result<Self::Output>
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: Borrow<Self::Symbol>,
    {
        self.label(&self.end_state(word)?)
    }

    /// Check whether the DFA accepts `word`.
    fn accepts<I>(&self, word: I) -> Result<bool>
    where
        Self: Sized + Automaton<Output = bool>,
        I: IntoIterator,
        I::Item: Borrow<Self::Symbol>,
    {
        self.output(word)
    }

    /// Moore-machine output trace: one output per visited state.
    fn transduce<I>(&self, word: I) -> Result<Vec<Self::Output>>
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: Borrow<Self::Symbol>,
    {
        self.trace(word)
            .map(|state| state.and_then(|state| self.label(&state)))
            .collect()
    }

    /// Start an incremental simulation at the start state.
    fn runner(&self) -> Runner<'_, Self>
    where
        Self: Sized,
    {
        Runner::new(self)
    }

    /// Lazily enumerate reachable states, breadth-first, over the declared
    /// alphabet.
    ///
    /// Fails with [`MissingAlphabet`](crate::AutomatonError::MissingAlphabet)
    /// when the alphabet is implicit; use
    /// [`reachable_over`](Self::reachable_over) instead.
    fn reachable(&self) -> Result<Reachable<'_, Self>>
    where
        Self: Sized,
    {
        Ok(Reachable::new(self, crate::reachability::declared_symbols(self)?))
    }

    /// Lazily enumerate reachable states using a caller-supplied symbol set.
    fn reachable_over<I>(&self, symbols: I) -> Reachable<'_, Self>
    where
        Self: Sized,
        I: IntoIterator<Item = Self::Symbol>,
    {
        Reachable::new(self, Alphabet::finite(symbols).into_symbols())
    }

    /// Reachable states, failing with
    /// [`UnboundedStateSpace`](crate::AutomatonError::UnboundedStateSpace)
    /// once more than `cap` states are discovered.
    fn states(&self, cap: usize) -> Result<Reachable<'_, Self>>
    where
        Self: Sized,
    {
        Ok(self.reachable()?.with_cap(cap))
    }

    /// Explore the finite reachable state graph.
    fn explore(&self, cap: usize) -> Result<StateGraph<Self::State, Self::Symbol, Self::Output>>
    where
        Self: Sized,
    {
        StateGraph::explore(self, cap)
    }

    /// General product with `other`, combining outputs with `combine`.
    fn product<R, F, O>(self, other: R, combine: F) -> Result<Product<Self, R, F>>
    where
        Self: Sized,
        R: Automaton<Symbol = Self::Symbol>,
        F: Fn(&Self::Output, &R::Output) -> O,
        O: Clone + Eq + Hash,
    {
        Product::new(self, other, combine)
    }

    /// Accepts words accepted by either automaton.
    fn union<R>(self, other: R) -> Result<BoolProduct<Self, R>>
    where
        Self: Sized + Automaton<Output = bool>,
        R: Automaton<Symbol = Self::Symbol, Output = bool>,
    {
        Product::new(self, other, algebra::or as fn(&bool, &bool) -> bool)
    }

    /// Accepts words accepted by both automata.
    fn intersection<R>(self, other: R) -> Result<BoolProduct<Self, R>>
    where
        Self: Sized + Automaton<Output = bool>,
        R: Automaton<Symbol = Self::Symbol, Output = bool>,
    {
        Product::new(self, other, algebra::and as fn(&bool, &bool) -> bool)
    }

    /// Accepts words accepted by exactly one automaton.
    fn xor<R>(self, other: R) -> Result<BoolProduct<Self, R>>
    where
        Self: Sized + Automaton<Output = bool>,
        R: Automaton<Symbol = Self::Symbol, Output = bool>,
    {
        Product::new(self, other, algebra::xor as fn(&bool, &bool) -> bool)
    }

    /// Accepts exactly the words this DFA rejects.
    fn complement(self) -> Complement<Self>
    where
        Self: Sized + Automaton<Output = bool>,
    {
        Complement::new(self)
    }

    /// Rewrites every output with `map`.
    fn map_output<F, O>(self, map: F) -> MapOutput<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Output) -> O,
        O: Clone + Eq + Hash,
    {
        MapOutput::new(self, map)
    }

    /// Renames states through the bijection `forward` / `inverse`.
    fn relabel<T, F, G>(self, forward: F, inverse: G) -> Relabel<Self, F, G, T>
    where
        Self: Sized,
        T: Clone + Eq + Hash,
        F: Fn(&Self::State) -> T,
        G: Fn(&T) -> Self::State,
    {
        Relabel::new(self, forward, inverse)
    }

    /// Narrows the alphabet to `symbols`.
    fn restrict<I>(self, symbols: I) -> Restrict<Self>
    where
        Self: Sized,
        I: IntoIterator<Item = Self::Symbol>,
    {
        Restrict::new(self, symbols)
    }

    /// Minimize the reachable part of this automaton.
    ///
    /// Fails with
    /// [`UnboundedStateSpace`](crate::AutomatonError::UnboundedStateSpace)
    /// if more than `cap` states are reachable.
    fn minimize(&self, cap: usize) -> Result<TableDfa<Self::Symbol, Self::Output>>
    where
        Self: Sized,
    {
        analysis::minimize(self, cap)
    }

    /// Materialize the reachable part as a breadth-first indexed table,
    /// without merging states.
    fn to_table(&self, cap: usize) -> Result<TableDfa<Self::Symbol, Self::Output>>
    where
        Self: Sized,
    {
        Ok(TableDfa::from_graph(self.explore(cap)?))
    }

    /// Check whether both automata produce the same output on every word.
    ///
    /// A word valid for one automaton and invalid for the other is a
    /// difference, so two automata are equivalent exactly when their
    /// [minimized](Automaton::minimize) tables are equal.
    fn equivalent<R>(&self, other: &R, cap: usize) -> Result<bool>
    where
        Self: Sized,
        R: Automaton<Symbol = Self::Symbol, Output = Self::Output>,
    {
        analysis::equivalent(self, other, cap)
    }

    /// Shortest word on which the two automata produce different outputs.
    fn find_counterexample<R>(&self, other: &R, cap: usize) -> Result<Option<Vec<Self::Symbol>>>
    where
        Self: Sized,
        R: Automaton<Symbol = Self::Symbol, Output = Self::Output>,
    {
        analysis::find_counterexample(self, other, cap)
    }

    /// Check whether every word accepted here is accepted by `other`.
    ///
    /// A word invalid for `other` counts as rejected by it.
    fn included_in<R>(&self, other: &R, cap: usize) -> Result<bool>
    where
        Self: Sized + Automaton<Output = bool>,
        R: Automaton<Symbol = Self::Symbol, Output = bool>,
    {
        analysis::included_in(self, other, cap)
    }

    /// Shortest accepted word, if any.
    fn find_accepting_word(&self, cap: usize) -> Result<Option<Vec<Self::Symbol>>>
    where
        Self: Sized + Automaton<Output = bool>,
    {
        analysis::find_word(self, cap, |accepting| *accepting)
    }

    /// Check whether the DFA accepts no word at all.
    fn is_empty_language(&self, cap: usize) -> Result<bool>
    where
        Self: Sized + Automaton<Output = bool>,
    {
        Ok(self.find_accepting_word(cap)?.is_none())
    }
}

impl<M: Automaton + ?Sized> Automaton for &M {
    type State = M::State;
    type Symbol = M::Symbol;
    type Output = M::Output;

    fn start(&self) -> Self::State {
        (**self).start()
    }

    fn alphabet(&self) -> &Alphabet<Self::Symbol> {
        (**self).alphabet()
    }

    fn transition(&self, state: &Self::State, symbol: &Self::Symbol) -> Result<Self::State> {
        (**self).transition(state, symbol)
    }

    fn label(&self, state: &Self::State) -> Result<Self::Output> {
        (**self).label(state)
    }
}

impl<M: Automaton + ?Sized> Automaton for Arc<M> {
    type State = M::State;
    type Symbol = M::Symbol;
    type Output = M::Output;

    fn start(&self) -> Self::State {
        (**self).start()
    }

    fn alphabet(&self) -> &Alphabet<Self::Symbol> {
        (**self).alphabet()
    }

    fn transition(&self, state: &Self::State, symbol: &Self::Symbol) -> Result<Self::State> {
        (**self).transition(state, symbol)
    }

    fn label(&self, state: &Self::State) -> Result<Self::Output> {
        (**self).label(state)
    }
}

impl<M: Automaton + ?Sized> Automaton for Box<M> {
    type State = M::State;
    type Symbol = M::Symbol;
    type Output = M::Output;

    fn start(&self) -> Self::State {
        (**self).start()
    }

    fn alphabet(&self) -> &Alphabet<Self::Symbol> {
        (**self).alphabet()
    }

    fn transition(&self, state: &Self::State, symbol: &Self::Symbol) -> Result<Self::State> {
        (**self).transition(state, symbol)
    }

    fn label(&self, state: &Self::State) -> Result<Self::Output> {
        (**self).label(state)
    }
}
