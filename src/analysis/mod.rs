//! Whole-automaton analyses over the finite reachable part: minimization,
//! equivalence, inclusion and witness search.
//!
//! Every analysis takes an explicit state cap and fails with
//! [`UnboundedStateSpace`](crate::AutomatonError::UnboundedStateSpace) rather
//! than looping on an infinite state space. The public entry points are the
//! [`Automaton`](crate::automaton::Automaton) methods that call into here.

mod equivalence;
mod minimize;

pub(crate) use equivalence::{equivalent, find_counterexample, find_word, included_in};
pub(crate) use minimize::minimize;
