//! Product construction.

use std::hash::Hash;

use crate::alphabet::Alphabet;
use crate::automaton::Automaton;
use crate::error::{AutomatonError, Result};

/// Product of two boolean automata combined by a plain function, as built by
/// [`union`](Automaton::union), [`intersection`](Automaton::intersection)
/// and [`xor`](Automaton::xor).
pub type BoolProduct<L, R> = Product<L, R, fn(&bool, &bool) -> bool>;

/// Two automata advancing in lockstep over a shared alphabet.
///
/// States are pairs `(left, right)`; the output of a pair is
/// `combine(left_output, right_output)`. Pairs are not deduplicated or
/// enumerated here; the reachability engine does that lazily.
///
/// A symbol invalid on either side is invalid for the product.
#[derive(Clone)]
pub struct Product<L: Automaton, R, F> {
    left: L,
    right: R,
    combine: F,
    alphabet: Alphabet<L::Symbol>,
}

impl<L, R, F, O> Product<L, R, F>
where
    L: Automaton,
    R: Automaton<Symbol = L::Symbol>,
    F: Fn(&L::Output, &R::Output) -> O,
    O: Clone + Eq + Hash,
{
    /// Build the product of `left` and `right`.
    ///
    /// # Errors
    ///
    /// Returns [`AutomatonError::AlphabetMismatch`] if both operands declare
    /// finite alphabets with different symbols. An operand with an implicit
    /// alphabet adopts the other operand's alphabet.
    pub fn new(left: L, right: R, combine: F) -> Result<Self> {
        let alphabet = left
            .alphabet()
            .shared(right.alphabet())
            .ok_or(AutomatonError::AlphabetMismatch)?;

        Ok(Product {
            left,
            right,
            combine,
            alphabet,
        })
    }

    /// The left operand.
    pub fn left(&self) -> &L {
        &self.left
    }

    /// The right operand.
    pub fn right(&self) -> &R {
        &self.right
    }

    /// Recover both operands.
    pub fn into_inner(self) -> (L, R) {
        (self.left, self.right)
    }
}

impl<L, R, F, O> Automaton for Product<L, R, F>
where
    L: Automaton,
    R: Automaton<Symbol = L::Symbol>,
    F: Fn(&L::Output, &R::Output) -> O,
    O: Clone + Eq + Hash,
{
    type State = (L::State, R::State);
    type Symbol = L::Symbol;
    type Output = O;

    fn start(&self) -> Self::State {
        (self.left.start(), self.right.start())
    }

    fn alphabet(&self) -> &Alphabet<Self::Symbol> {
        &self.alphabet
    }

    fn transition(&self, state: &Self::State, symbol: &Self::Symbol) -> Result<Self::State> {
        if !self.alphabet.contains(symbol) {
            return Err(AutomatonError::invalid_symbol(symbol));
        }
        let (left, right) = state;
        Ok((
            self.left.transition(left, symbol)?,
            self.right.transition(right, symbol)?,
        ))
    }

    fn label(&self, state: &Self::State) -> Result<O> {
        let (left, right) = state;
        Ok((self.combine)(&self.left.label(left)?, &self.right.label(right)?))
    }
}
