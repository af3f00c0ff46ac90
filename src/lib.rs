//! # lazy-dfa
//!
//! Deterministic finite automata and Moore machines over implicit, possibly
//! infinite state spaces.
//!
//! An automaton is a start state plus two rules: a transition rule giving the
//! next state for a symbol, and a label rule giving each state's output.
//! States are materialized only when a traversal reaches them, which makes it
//! cheap to describe automata whose state space is large or unbounded, and to
//! combine automata without building product tables.
//!
//! The crate provides:
//!
//! - **Simulation**: [`trace`](automaton::Automaton::trace),
//!   [`accepts`](automaton::Automaton::accepts),
//!   [`transduce`](automaton::Automaton::transduce) and an incremental
//!   [`Runner`](automaton::Runner)
//! - **Lazy reachability**: [`Reachable`](reachability::Reachable) yields
//!   reachable states one at a time, breadth- or depth-first
//! - **Algebra**: union, intersection, xor, complement, output maps,
//!   relabeling and alphabet restriction, all computed on demand
//! - **Analysis**: Moore minimization to a canonical
//!   [`TableDfa`](automaton::TableDfa), equivalence and inclusion checks
//!   with shortest counterexamples
//!
//! ## Example
//!
//! ```rust
//! use lazy_dfa::prelude::*;
//!
//! // Counts 1s modulo 4 and accepts on even counts.
//! let mod4 = Dfa::new(0u8, [0u8, 1], |n, bit| (n + bit) % 4, |n| n % 2 == 0);
//! let parity = Dfa::new(true, [0u8, 1], |even, bit| *even ^ (*bit == 1), |even| *even);
//!
//! let minimized = mod4.minimize(64).unwrap();
//! assert_eq!(minimized.num_states(), 2);
//! assert!(mod4.equivalent(&parity, 64).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algebra;
pub mod alphabet;
mod analysis;
pub mod automaton;
pub mod codec;
pub mod error;
pub mod reachability;

pub use error::{AutomatonError, Result};

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::algebra::{BoolProduct, Complement, MapOutput, Product, Relabel, Restrict};
    pub use crate::alphabet::Alphabet;
    pub use crate::automaton::{
        Automaton, BuilderError, Dfa, DfaBuilder, Runner, TableDfa, Trace,
    };
    pub use crate::codec::{StateCodec, StateId};
    pub use crate::error::{AutomatonError, Result};
    pub use crate::reachability::{Order, Reachable, StateGraph};
}
