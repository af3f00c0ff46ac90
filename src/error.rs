//! Error types for automaton construction, simulation and analysis.

use std::error::Error as StdError;
use std::fmt::Debug;

use thiserror::Error;

/// Errors that can occur while running or analysing an automaton.
#[derive(Debug, Error)]
pub enum AutomatonError {
    /// A symbol is outside the alphabet declared for the current state.
    ///
    /// `position` is the index of the offending symbol when the error was
    /// raised while consuming a word, and `None` for a single transition.
    #[error("invalid symbol {symbol}{}", position_suffix(.position))]
    InvalidSymbol {
        /// Debug rendering of the rejected symbol.
        symbol: String,
        /// Index of the symbol within the consumed word, if any.
        position: Option<usize>,
    },

    /// A finite-state algorithm discovered more reachable states than allowed.
    ///
    /// Re-invoke with a larger cap, or avoid finite-only operations on this
    /// automaton.
    #[error("reachable state space exceeds the cap of {cap} states")]
    UnboundedStateSpace {
        /// The state-count cap that was exceeded.
        cap: usize,
    },

    /// The automaton's alphabet is implicit and cannot be enumerated.
    ///
    /// Traversals over such automata need a caller-supplied symbol set.
    #[error("alphabet is implicit; supply the symbols to explore")]
    MissingAlphabet,

    /// Product operands declare different finite alphabets.
    #[error("product operands declare different alphabets")]
    AlphabetMismatch,

    /// Parts handed to an explicit transition table are inconsistent.
    #[error("malformed transition table: {0}")]
    MalformedTable(String),

    /// An error raised by a caller-supplied transition or label rule.
    #[error("rule failed: {0}")]
    Rule(#[source] Box<dyn StdError + Send + Sync>),
}

impl AutomatonError {
    /// Builds an [`AutomatonError::InvalidSymbol`] for a single transition.
    pub fn invalid_symbol<A: Debug>(symbol: &A) -> Self {
        AutomatonError::InvalidSymbol {
            symbol: format!("{symbol:?}"),
            position: None,
        }
    }

    /// Wraps an error raised by a caller-supplied rule.
    pub fn rule<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        AutomatonError::Rule(err.into())
    }

    /// Returns true for [`AutomatonError::InvalidSymbol`].
    pub fn is_invalid_symbol(&self) -> bool {
        matches!(self, AutomatonError::InvalidSymbol { .. })
    }

    /// Attaches a word position to an `InvalidSymbol` error.
    ///
    /// Other variants are returned unchanged.
    pub(crate) fn at_position(self, index: usize) -> Self {
        match self {
            AutomatonError::InvalidSymbol { symbol, .. } => AutomatonError::InvalidSymbol {
                symbol,
                position: Some(index),
            },
            other => other,
        }
    }
}

fn position_suffix(position: &Option<usize>) -> String {
    match position {
        Some(index) => format!(" at position {index}"),
        None => String::new(),
    }
}

/// A specialized `Result` type for automaton operations.
pub type Result<T> = std::result::Result<T, AutomatonError>;
