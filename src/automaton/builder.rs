//! Builder pattern for creating [`Dfa`] instances.
//!
//! The `DfaBuilder` provides a fluent API for assembling an automaton from
//! its parts, validating that every required part was supplied.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use super::dfa::Dfa;
use crate::alphabet::Alphabet;
use crate::error::Result;

type TransitionFn<S, A> = Arc<dyn Fn(&S, &A) -> Result<S> + Send + Sync>;
type LabelFn<S, O> = Arc<dyn Fn(&S) -> Result<O> + Send + Sync>;

/// Builder for constructing a [`Dfa`] with a fluent API.
///
/// The alphabet defaults to [`Alphabet::Implicit`] when not set.
///
/// # Example
///
/// ```rust
/// use lazy_dfa::prelude::*;
///
/// let multiple_of_three = DfaBuilder::new()
///     .start(0u32)
///     .inputs([0u32, 1])
///     .transition(|rem, bit| (rem * 2 + bit) % 3)
///     .label(|rem| *rem == 0)
///     .build()
///     .unwrap();
///
/// assert!(multiple_of_three.accepts([1, 1, 0]).unwrap()); // 6
/// assert!(!multiple_of_three.accepts([1, 0, 0]).unwrap()); // 4
/// ```
pub struct DfaBuilder<S, A, O = bool> {
    start: Option<S>,
    alphabet: Alphabet<A>,
    transition: Option<TransitionFn<S, A>>,
    label: Option<LabelFn<S, O>>,
}

/// Error type for builder validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuilderError {
    /// No start state was provided
    #[error("Start state is required. Use .start() to set it.")]
    MissingStart,
    /// No transition rule was provided
    #[error("Transition rule is required. Use .transition() or .try_transition() to set it.")]
    MissingTransition,
    /// No label rule was provided
    #[error("Label rule is required. Use .label() or .try_label() to set it.")]
    MissingLabel,
}

impl<S, A, O> DfaBuilder<S, A, O>
where
    S: Clone + Eq + Hash + 'static,
    A: Clone + Eq + Hash + Debug + 'static,
    O: Clone + Eq + Hash + 'static,
{
    /// Create a new empty builder.
    pub fn new() -> Self {
        DfaBuilder {
            start: None,
            alphabet: Alphabet::Implicit,
            transition: None,
            label: None,
        }
    }

    /// Set the start state.
    pub fn start(mut self, start: S) -> Self {
        self.start = Some(start);
        self
    }

    /// Declare a finite input alphabet.
    pub fn inputs<I>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = A>,
    {
        self.alphabet = Alphabet::finite(inputs);
        self
    }

    /// Set the alphabet descriptor directly.
    pub fn alphabet(mut self, alphabet: Alphabet<A>) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Set an infallible transition rule.
    pub fn transition<T>(mut self, transition: T) -> Self
    where
        T: Fn(&S, &A) -> S + Send + Sync + 'static,
    {
        self.transition = Some(Arc::new(move |state: &S, symbol: &A| -> Result<S> {
            Ok(transition(state, symbol))
        }));
        self
    }

    /// Set a fallible transition rule.
    ///
    /// Returning [`InvalidSymbol`](crate::AutomatonError::InvalidSymbol)
    /// marks the symbol as invalid at that state.
    pub fn try_transition<T>(mut self, transition: T) -> Self
    where
        T: Fn(&S, &A) -> Result<S> + Send + Sync + 'static,
    {
        self.transition = Some(Arc::new(transition));
        self
    }

    /// Set an infallible label rule.
    pub fn label<L>(mut self, label: L) -> Self
    where
        L: Fn(&S) -> O + Send + Sync + 'static,
    {
        self.label = Some(Arc::new(move |state: &S| -> Result<O> { Ok(label(state)) }));
        self
    }

    /// Set a fallible label rule.
    pub fn try_label<L>(mut self, label: L) -> Self
    where
        L: Fn(&S) -> Result<O> + Send + Sync + 'static,
    {
        self.label = Some(Arc::new(label));
        self
    }

    /// Build the [`Dfa`].
    ///
    /// # Errors
    ///
    /// Returns an error if the start state, transition rule or label rule
    /// was not set.
    pub fn build(self) -> std::result::Result<Dfa<S, A, O>, BuilderError> {
        let start = self.start.ok_or(BuilderError::MissingStart)?;
        let transition = self.transition.ok_or(BuilderError::MissingTransition)?;
        let label = self.label.ok_or(BuilderError::MissingLabel)?;

        Ok(Dfa::try_new(
            start,
            self.alphabet,
            move |state, symbol| transition(state, symbol),
            move |state| label(state),
        ))
    }
}

impl<S, A, O> Default for DfaBuilder<S, A, O>
where
    S: Clone + Eq + Hash + 'static,
    A: Clone + Eq + Hash + Debug + 'static,
    O: Clone + Eq + Hash + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
