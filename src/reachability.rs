//! Lazy reachability over implicit state spaces.
//!
//! [`Reachable`] enumerates the states reachable from an automaton's start
//! state one at a time. Expansion is on demand: yielding the k-th state has
//! applied the transition rule to at most the k-1 states before it, so an
//! infinite state space can be explored for as long as the caller keeps
//! consuming, and abandoned at any point by dropping the iterator.
//!
//! States are deduplicated through a [`StateCodec`], which also supplies the
//! dense ids used by [`StateGraph`], minimization and equivalence checking.

use std::collections::VecDeque;
use std::hash::Hash;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::alphabet::Alphabet;
use crate::automaton::Automaton;
use crate::codec::{StateCodec, StateId};
use crate::error::{AutomatonError, Result};

/// Successor row: one optional target id per alphabet symbol.
pub(crate) type Row = SmallVec<[Option<StateId>; 4]>;

/// Frontier discipline of a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Order {
    /// Layer by layer from the start state.
    ///
    /// Parent links then describe shortest words.
    #[default]
    BreadthFirst,
    /// Most recently discovered state first.
    DepthFirst,
}

/// Symbols of a finite declared alphabet.
pub(crate) fn declared_symbols<M>(automaton: &M) -> Result<Arc<[M::Symbol]>>
where
    M: Automaton + ?Sized,
{
    match automaton.alphabet() {
        Alphabet::Finite(symbols) => Ok(symbols.to_shared()),
        Alphabet::Implicit => Err(AutomatonError::MissingAlphabet),
    }
}

/// Lazy iterator over reachable states.
///
/// Each reachable state is yielded exactly once. A transition failing with
/// [`InvalidSymbol`](AutomatonError::InvalidSymbol) is treated as an absent
/// edge; any other error is yielded once and ends the iteration.
///
/// With a cap set, discovering more than `cap` states yields
/// [`UnboundedStateSpace`](AutomatonError::UnboundedStateSpace) and ends the
/// iteration.
pub struct Reachable<'a, M: Automaton + ?Sized> {
    automaton: &'a M,
    symbols: Arc<[M::Symbol]>,
    order: Order,
    cap: Option<usize>,
    codec: StateCodec<M::State>,
    frontier: VecDeque<StateId>,
    parents: Vec<Option<(StateId, usize)>>,
    rows: Vec<Row>,
    pending: Option<StateId>,
    yielded: usize,
    finished: bool,
}

impl<'a, M: Automaton + ?Sized> Reachable<'a, M> {
    /// Create a breadth-first traversal over `symbols`.
    pub fn new(automaton: &'a M, symbols: Arc<[M::Symbol]>) -> Self {
        let mut codec = StateCodec::new();
        let start = codec.intern(&automaton.start());

        Reachable {
            automaton,
            symbols,
            order: Order::default(),
            cap: None,
            codec,
            frontier: VecDeque::from([start]),
            parents: vec![None],
            rows: vec![Row::new()],
            pending: None,
            yielded: 0,
            finished: false,
        }
    }

    /// Set the frontier discipline.
    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// Fail once more than `cap` states are discovered.
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = Some(cap);
        self
    }

    /// Advance the traversal, returning the id of the next state.
    pub fn next_id(&mut self) -> Option<Result<StateId>> {
        if self.finished {
            return None;
        }
        if let Some(id) = self.pending.take() {
            if let Err(err) = self.expand(id) {
                self.finished = true;
                return Some(Err(err));
            }
        }

        let next = match self.order {
            Order::BreadthFirst => self.frontier.pop_front(),
            Order::DepthFirst => self.frontier.pop_back(),
        };
        let Some(id) = next else {
            self.finished = true;
            tracing::trace!(states = self.codec.len(), "reachable set exhausted");
            return None;
        };

        if let Some(cap) = self.cap {
            if self.yielded >= cap {
                self.finished = true;
                tracing::debug!(cap, discovered = self.codec.len(), "state cap exceeded");
                return Some(Err(AutomatonError::UnboundedStateSpace { cap }));
            }
        }
        self.yielded += 1;
        self.pending = Some(id);
        Some(Ok(id))
    }

    /// States discovered so far, including those not yet yielded.
    pub fn codec(&self) -> &StateCodec<M::State> {
        &self.codec
    }

    /// The symbols this traversal expands over.
    pub fn symbols(&self) -> &[M::Symbol] {
        &self.symbols
    }

    /// The word leading from the start state to a discovered state along
    /// the traversal's parent links.
    ///
    /// Under breadth-first order this is a shortest such word.
    pub fn word_to(&self, id: StateId) -> Vec<M::Symbol> {
        let mut word = Vec::new();
        let mut current = id;
        while let Some(Some((parent, symbol))) = self.parents.get(current) {
            word.push(self.symbols[*symbol].clone());
            current = *parent;
        }
        word.reverse();
        word
    }

    fn expand(&mut self, id: StateId) -> Result<()> {
        let Some(state) = self.codec.lookup(id).cloned() else {
            return Ok(());
        };

        let mut row = Row::with_capacity(self.symbols.len());
        for (index, symbol) in self.symbols.iter().enumerate() {
            match self.automaton.transition(&state, symbol) {
                Ok(next) => {
                    let (next_id, fresh) = self.codec.intern_new(&next);
                    if fresh {
                        self.parents.push(Some((id, index)));
                        self.rows.push(Row::new());
                        self.frontier.push_back(next_id);
                    }
                    row.push(Some(next_id));
                }
                Err(err) if err.is_invalid_symbol() => row.push(None),
                Err(err) => return Err(err),
            }
        }
        self.rows[id] = row;
        Ok(())
    }
}

impl<M: Automaton + ?Sized> Iterator for Reachable<'_, M> {
    type Item = Result<M::State>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_id()? {
            Ok(id) => self.codec.lookup(id).cloned().map(Ok),
            Err(err) => Some(Err(err)),
        }
    }
}

/// Fully explored, finite reachable state graph.
///
/// State ids follow the traversal order, so the start state is `0`.
#[derive(Debug, Clone)]
pub struct StateGraph<S, A, O> {
    codec: StateCodec<S>,
    alphabet: Alphabet<A>,
    rows: Vec<Row>,
    labels: Vec<O>,
}

impl<S, A, O> StateGraph<S, A, O>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
    O: Clone + Eq + Hash,
{
    /// Breadth-first exploration of every state reachable over the
    /// automaton's declared alphabet.
    ///
    /// # Errors
    ///
    /// - [`AutomatonError::MissingAlphabet`] for an implicit alphabet
    /// - [`AutomatonError::UnboundedStateSpace`] if more than `cap` states
    ///   are reachable
    /// - any error raised by the automaton's rules
    pub fn explore<M>(automaton: &M, cap: usize) -> Result<Self>
    where
        M: Automaton<State = S, Symbol = A, Output = O> + ?Sized,
    {
        let symbols = declared_symbols(automaton)?;
        let mut reachable = Reachable::new(automaton, symbols).with_cap(cap);
        while let Some(id) = reachable.next_id() {
            id?;
        }

        let Reachable { codec, rows, symbols, .. } = reachable;
        let labels = codec
            .states()
            .map(|state| automaton.label(state))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(states = codec.len(), symbols = symbols.len(), "explored state graph");
        Ok(StateGraph {
            codec,
            alphabet: automaton.alphabet().clone(),
            rows,
            labels,
        })
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the graph has no states.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// State ids and their original values.
    pub fn codec(&self) -> &StateCodec<S> {
        &self.codec
    }

    /// The ordered symbols labelling successor rows.
    pub fn symbols(&self) -> &[A] {
        self.alphabet.symbols().unwrap_or_default()
    }

    /// Successor ids of `id`, one per symbol; `None` where the symbol is
    /// invalid at that state.
    pub fn successors(&self, id: StateId) -> &[Option<StateId>] {
        self.rows.get(id).map(|row| row.as_slice()).unwrap_or_default()
    }

    /// Label of `id`.
    pub fn label(&self, id: StateId) -> Option<&O> {
        self.labels.get(id)
    }

    /// Labels of all states, indexed by id.
    pub fn labels(&self) -> &[O] {
        &self.labels
    }

    pub(crate) fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub(crate) fn alphabet(&self) -> &Alphabet<A> {
        &self.alphabet
    }

    pub(crate) fn into_parts(self) -> (Alphabet<A>, Vec<Row>, Vec<O>) {
        (self.alphabet, self.rows, self.labels)
    }
}
