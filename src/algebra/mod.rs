//! Combinators that build new automata from existing ones.
//!
//! Every combinator wraps its operands and composes their rules on demand;
//! no state is enumerated and no table is built at construction time. The
//! operands are never mutated. To keep using an operand after combining it,
//! pass a reference or an [`Arc`](std::sync::Arc) instead of the value.
//!
//! # Example
//!
//! ```rust
//! use lazy_dfa::prelude::*;
//!
//! let even_a = Dfa::new(true, ['a', 'b'], |even, c| *even ^ (*c == 'a'), |even| *even);
//! let ends_b = Dfa::new(false, ['a', 'b'], |_, c| *c == 'b', |last_b| *last_b);
//!
//! let both = (&even_a).intersection(&ends_b).unwrap();
//! assert!(both.accepts("aab".chars()).unwrap());
//! assert!(!both.accepts("ab".chars()).unwrap());
//!
//! let neither = even_a.union(ends_b).unwrap().complement();
//! assert!(neither.accepts("a".chars()).unwrap());
//! ```

mod complement;
mod product;
mod relabel;
mod restrict;

pub use complement::{Complement, MapOutput};
pub use product::{BoolProduct, Product};
pub use relabel::Relabel;
pub use restrict::Restrict;

pub(crate) fn or(left: &bool, right: &bool) -> bool {
    *left || *right
}

pub(crate) fn and(left: &bool, right: &bool) -> bool {
    *left && *right
}

pub(crate) fn xor(left: &bool, right: &bool) -> bool {
    *left ^ *right
}
