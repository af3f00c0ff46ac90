//! Explicit transition-table automata over dense `usize` states.

use std::fmt::Debug;
use std::hash::Hash;

use super::Automaton;
use crate::alphabet::Alphabet;
use crate::error::{AutomatonError, Result};
use crate::reachability::{Row, StateGraph};

/// Automaton backed by an explicit table.
///
/// States are `0..num_states()`; `rows[s][i]` is the successor of `s` on the
/// `i`-th alphabet symbol, or `None` when that symbol is invalid at `s`.
/// Minimization and normalization produce tables whose states are numbered
/// breadth-first from the start state, so the start state is always `0`.
///
/// Deserialization goes through the same validation as
/// [`TableDfa::from_partial`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "RawTable<A, O>",
        bound(
            serialize = "A: Clone + serde::Serialize, O: serde::Serialize",
            deserialize = "A: Clone + Eq + std::hash::Hash + std::fmt::Debug + serde::Deserialize<'de>, O: Clone + Eq + std::hash::Hash + serde::Deserialize<'de>"
        )
    )
)]
pub struct TableDfa<A, O> {
    start: usize,
    alphabet: Alphabet<A>,
    rows: Vec<Row>,
    labels: Vec<O>,
}

/// Unvalidated wire form of a [`TableDfa`].
#[cfg(feature = "serialization")]
#[derive(serde::Deserialize)]
#[serde(bound(deserialize = "A: Clone + Eq + std::hash::Hash + serde::Deserialize<'de>, O: serde::Deserialize<'de>"))]
struct RawTable<A, O> {
    start: usize,
    alphabet: Alphabet<A>,
    rows: Vec<Vec<Option<usize>>>,
    labels: Vec<O>,
}

#[cfg(feature = "serialization")]
impl<A, O> TryFrom<RawTable<A, O>> for TableDfa<A, O>
where
    A: Clone + Eq + Hash + Debug,
    O: Clone + Eq + Hash,
{
    type Error = AutomatonError;

    fn try_from(raw: RawTable<A, O>) -> Result<Self> {
        let symbols = raw.alphabet.symbols().ok_or_else(|| {
            AutomatonError::MalformedTable("table alphabet must be finite".to_string())
        })?;
        Self::from_partial(raw.start, symbols.to_vec(), raw.rows, raw.labels)
    }
}

impl<A, O> TableDfa<A, O>
where
    A: Clone + Eq + Hash + Debug,
    O: Clone + Eq + Hash,
{
    /// Create a complete table: every symbol is valid at every state.
    ///
    /// # Errors
    ///
    /// Returns [`AutomatonError::MalformedTable`] if the parts disagree:
    /// duplicate symbols, a row of the wrong width, a target or start state
    /// out of range, or a label count different from the row count.
    pub fn new<I>(start: usize, symbols: I, rows: Vec<Vec<usize>>, labels: Vec<O>) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Some).collect())
            .collect();
        Self::from_partial(start, symbols, rows, labels)
    }

    /// Create a partial table where `None` marks a symbol invalid at a state.
    ///
    /// # Errors
    ///
    /// Same validation as [`TableDfa::new`].
    pub fn from_partial<I>(
        start: usize,
        symbols: I,
        rows: Vec<Vec<Option<usize>>>,
        labels: Vec<O>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
    {
        let symbols: Vec<A> = symbols.into_iter().collect();
        let alphabet = Alphabet::finite(symbols.iter().cloned());
        let width = symbols.len();

        if alphabet.len() != Some(width) {
            return Err(AutomatonError::MalformedTable(
                "alphabet contains duplicate symbols".to_string(),
            ));
        }
        if rows.len() != labels.len() {
            return Err(AutomatonError::MalformedTable(format!(
                "{} rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }
        if start >= rows.len() {
            return Err(AutomatonError::MalformedTable(format!(
                "start state {start} out of range for {} states",
                rows.len()
            )));
        }
        for (state, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(AutomatonError::MalformedTable(format!(
                    "row {state} has {} entries, expected {width}",
                    row.len()
                )));
            }
            if let Some(target) = row.iter().flatten().find(|&&target| target >= rows.len()) {
                return Err(AutomatonError::MalformedTable(format!(
                    "row {state} targets unknown state {target}"
                )));
            }
        }

        let rows = rows.into_iter().map(Row::from_vec).collect();
        Ok(Self::from_raw(start, alphabet, rows, labels))
    }

    /// Assemble a table from parts that are already known to be consistent.
    pub(crate) fn from_raw(start: usize, alphabet: Alphabet<A>, rows: Vec<Row>, labels: Vec<O>) -> Self {
        TableDfa {
            start,
            alphabet,
            rows,
            labels,
        }
    }

    /// Materialize an explored state graph without merging states.
    pub fn from_graph<S>(graph: StateGraph<S, A, O>) -> Self
    where
        S: Clone + Eq + Hash,
    {
        let (alphabet, rows, labels) = graph.into_parts();
        Self::from_raw(0, alphabet, rows, labels)
    }

    /// Number of states in the table.
    pub fn num_states(&self) -> usize {
        self.rows.len()
    }

    /// The ordered symbols labelling the table's columns.
    pub fn symbols(&self) -> &[A] {
        self.alphabet.symbols().unwrap_or_default()
    }

    /// Successor of `state` on `symbol`, if defined.
    pub fn successor(&self, state: usize, symbol: &A) -> Option<usize> {
        let column = self.alphabet.position(symbol)?;
        self.rows.get(state)?.get(column).copied().flatten()
    }

    /// Labels of all states, indexed by state.
    pub fn labels(&self) -> &[O] {
        &self.labels
    }

    fn unknown_state(&self, state: usize) -> AutomatonError {
        AutomatonError::MalformedTable(format!(
            "state {state} out of range for {} states",
            self.rows.len()
        ))
    }
}

impl<A, O> Automaton for TableDfa<A, O>
where
    A: Clone + Eq + Hash + Debug,
    O: Clone + Eq + Hash,
{
    type State = usize;
    type Symbol = A;
    type Output = O;

    fn start(&self) -> usize {
        self.start
    }

    fn alphabet(&self) -> &Alphabet<A> {
        &self.alphabet
    }

    fn transition(&self, state: &usize, symbol: &A) -> Result<usize> {
        let row = self.rows.get(*state).ok_or_else(|| self.unknown_state(*state))?;
        self.alphabet
            .position(symbol)
            .and_then(|column| row.get(column).copied().flatten())
            .ok_or_else(|| AutomatonError::invalid_symbol(symbol))
    }

    fn label(&self, state: &usize) -> Result<O> {
        self.labels
            .get(*state)
            .cloned()
            .ok_or_else(|| self.unknown_state(*state))
    }
}
