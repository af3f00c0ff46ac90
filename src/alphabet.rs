//! Input alphabet descriptors.

use std::fmt;
use std::hash::Hash;
use std::ops::Deref;
use std::sync::Arc;

use rustc_hash::FxHashMap;

/// Ordered, duplicate-free symbol list with constant-time lookup.
///
/// The list fixes column and traversal order; the index maps each symbol
/// back to its position. Both halves are shared, so clones are cheap.
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        from = "Vec<A>",
        into = "Vec<A>",
        bound(
            serialize = "A: Clone + serde::Serialize",
            deserialize = "A: Clone + std::hash::Hash + Eq + serde::Deserialize<'de>"
        )
    )
)]
pub struct Symbols<A> {
    list: Arc<[A]>,
    index: Arc<FxHashMap<A, usize>>,
}

impl<A: Clone + Eq + Hash> Symbols<A> {
    fn new<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = A>,
    {
        let mut index = FxHashMap::default();
        let mut list = Vec::new();
        for symbol in symbols {
            if !index.contains_key(&symbol) {
                index.insert(symbol.clone(), list.len());
                list.push(symbol);
            }
        }
        Symbols {
            list: list.into(),
            index: Arc::new(index),
        }
    }

    /// Column of `symbol` in declaration order.
    pub fn position(&self, symbol: &A) -> Option<usize> {
        self.index.get(symbol).copied()
    }

    /// Checks whether `symbol` is declared.
    pub fn contains(&self, symbol: &A) -> bool {
        self.index.contains_key(symbol)
    }

    pub(crate) fn to_shared(&self) -> Arc<[A]> {
        Arc::clone(&self.list)
    }
}

impl<A> Deref for Symbols<A> {
    type Target = [A];

    fn deref(&self) -> &[A] {
        &self.list
    }
}

impl<A> Clone for Symbols<A> {
    fn clone(&self) -> Self {
        Symbols {
            list: Arc::clone(&self.list),
            index: Arc::clone(&self.index),
        }
    }
}

impl<A: fmt::Debug> fmt::Debug for Symbols<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.list.iter()).finish()
    }
}

impl<A: PartialEq> PartialEq for Symbols<A> {
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list
    }
}

impl<A: Eq> Eq for Symbols<A> {}

impl<A: Clone + Eq + Hash> From<Vec<A>> for Symbols<A> {
    fn from(symbols: Vec<A>) -> Self {
        Symbols::new(symbols)
    }
}

impl<A: Clone> From<Symbols<A>> for Vec<A> {
    fn from(symbols: Symbols<A>) -> Self {
        symbols.list.to_vec()
    }
}

/// Input alphabet declared by an automaton.
///
/// A `Finite` alphabet is enumerable and keeps its symbols in first-seen
/// order, which fixes the traversal order of the reachability engine. An
/// `Implicit` alphabet is never enumerated: any symbol is offered to the
/// transition rule, which rejects invalid ones itself.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound(
        serialize = "A: Clone + serde::Serialize",
        deserialize = "A: Clone + std::hash::Hash + Eq + serde::Deserialize<'de>"
    ))
)]
pub enum Alphabet<A> {
    /// Explicit, ordered, duplicate-free symbol list.
    Finite(Symbols<A>),
    /// Symbols are validated by the transition rule only.
    Implicit,
}

impl<A: Clone + Eq + Hash> Alphabet<A> {
    /// Creates a finite alphabet, dropping duplicate symbols.
    pub fn finite<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = A>,
    {
        Alphabet::Finite(Symbols::new(symbols))
    }

    /// Checks whether `symbol` is declared. Implicit alphabets accept all.
    pub fn contains(&self, symbol: &A) -> bool {
        match self {
            Alphabet::Finite(symbols) => symbols.contains(symbol),
            Alphabet::Implicit => true,
        }
    }

    /// Position of `symbol` in a finite alphabet.
    pub fn position(&self, symbol: &A) -> Option<usize> {
        match self {
            Alphabet::Finite(symbols) => symbols.position(symbol),
            Alphabet::Implicit => None,
        }
    }

    /// Get the enumerable symbols, if the alphabet is finite.
    pub fn symbols(&self) -> Option<&[A]> {
        match self {
            Alphabet::Finite(symbols) => Some(&**symbols),
            Alphabet::Implicit => None,
        }
    }

    /// Returns true for an implicit alphabet.
    pub fn is_implicit(&self) -> bool {
        matches!(self, Alphabet::Implicit)
    }

    /// Number of declared symbols, if finite.
    pub fn len(&self) -> Option<usize> {
        self.symbols().map(<[A]>::len)
    }

    /// Compares two alphabets as sets, ignoring symbol order.
    pub fn same_symbols(&self, other: &Self) -> bool {
        match (self, other) {
            (Alphabet::Finite(left), Alphabet::Finite(right)) => {
                left.len() == right.len() && left.iter().all(|symbol| right.contains(symbol))
            }
            (Alphabet::Implicit, Alphabet::Implicit) => true,
            _ => false,
        }
    }

    /// Alphabet shared by the two operands of a product.
    ///
    /// Returns `None` when both are finite and declare different symbols.
    /// An implicit side adopts the other side's alphabet.
    pub(crate) fn shared(&self, other: &Self) -> Option<Self> {
        match (self, other) {
            (Alphabet::Implicit, _) => Some(other.clone()),
            (_, Alphabet::Implicit) => Some(self.clone()),
            _ if self.same_symbols(other) => Some(self.clone()),
            _ => None,
        }
    }

    /// Enumerable symbols as a shared slice; empty for an implicit alphabet.
    pub(crate) fn into_symbols(self) -> Arc<[A]> {
        match self {
            Alphabet::Finite(symbols) => symbols.list,
            Alphabet::Implicit => Arc::from(Vec::new()),
        }
    }

    /// Narrows a finite alphabet to `keep`, or declares `keep` for an
    /// implicit one.
    pub(crate) fn restricted<I>(&self, keep: I) -> Self
    where
        I: IntoIterator<Item = A>,
    {
        Alphabet::finite(keep.into_iter().filter(|symbol| self.contains(symbol)))
    }
}

impl<A: Clone + Eq + Hash> FromIterator<A> for Alphabet<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Alphabet::finite(iter)
    }
}
