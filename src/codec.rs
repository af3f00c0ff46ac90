//! Bidirectional mapping between opaque states and dense integer ids.
//!
//! A codec is built incrementally while states are discovered, so it never
//! needs the state space to be enumerable up front. Ids are assigned
//! monotonically from 0 and are never reassigned or reused.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Dense id assigned to an interned state.
pub type StateId = usize;

/// Incremental state <-> id table.
///
/// Backed by a pair of plain containers: a hash map for `state -> id`
/// and a vector for `id -> state`. States are recognized by value
/// equality, not identity.
#[derive(Debug, Clone)]
pub struct StateCodec<S> {
    ids: FxHashMap<S, StateId>,
    states: Vec<S>,
}

impl<S: Clone + Eq + Hash> StateCodec<S> {
    /// Create an empty codec.
    pub fn new() -> Self {
        StateCodec {
            ids: FxHashMap::default(),
            states: Vec::new(),
        }
    }

    /// Returns the id of `state`, assigning the next free id on first sight.
    pub fn intern(&mut self, state: &S) -> StateId {
        self.intern_new(state).0
    }

    /// Like [`intern`](Self::intern), also reporting whether the id is fresh.
    pub fn intern_new(&mut self, state: &S) -> (StateId, bool) {
        if let Some(&id) = self.ids.get(state) {
            return (id, false);
        }
        let id = self.states.len();
        self.ids.insert(state.clone(), id);
        self.states.push(state.clone());
        (id, true)
    }

    /// Get the id of an already interned state.
    pub fn get(&self, state: &S) -> Option<StateId> {
        self.ids.get(state).copied()
    }

    /// Inverse of [`intern`](Self::intern); `None` for ids never assigned.
    pub fn lookup(&self, id: StateId) -> Option<&S> {
        self.states.get(id)
    }

    /// Number of interned states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Check if no state has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterate over interned states in id order.
    pub fn states(&self) -> impl Iterator<Item = &S> + '_ {
        self.states.iter()
    }

    /// Consume the codec, returning states in id order.
    pub fn into_states(self) -> Vec<S> {
        self.states
    }
}

impl<S: Clone + Eq + Hash> Default for StateCodec<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_monotonic() {
        let mut codec = StateCodec::new();
        assert_eq!(codec.intern(&"a"), 0);
        assert_eq!(codec.intern(&"b"), 1);
        assert_eq!(codec.intern(&"a"), 0);
        assert_eq!(codec.intern(&"c"), 2);
        assert_eq!(codec.len(), 3);
    }

    #[test]
    fn test_value_equality_not_identity() {
        let mut codec = StateCodec::new();
        let first = (String::from("q"), vec![1, 2]);
        let second = (String::from("q"), vec![1, 2]);

        let (id, fresh) = codec.intern_new(&first);
        assert!(fresh);
        assert_eq!(codec.intern_new(&second), (id, false));
    }

    #[test]
    fn test_lookup_is_inverse() {
        let mut codec = StateCodec::new();
        for state in [10u32, 20, 30] {
            codec.intern(&state);
        }
        assert_eq!(codec.lookup(1), Some(&20));
        assert_eq!(codec.lookup(3), None);
        assert_eq!(codec.get(&30), Some(2));
        assert_eq!(codec.get(&40), None);
        assert_eq!(codec.into_states(), vec![10, 20, 30]);
    }
}
