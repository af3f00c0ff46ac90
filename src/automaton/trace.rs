//! Lazy word traces and incremental runs.

use std::borrow::Borrow;

use super::Automaton;
use crate::error::Result;

/// Lazy iterator over the states visited while consuming a word.
///
/// Yields the start state first and then one state per consumed symbol, so a
/// complete trace has `len(word) + 1` entries. A symbol that is invalid at
/// the current state yields an [`InvalidSymbol`](crate::AutomatonError::InvalidSymbol)
/// error carrying the symbol's position, after which the trace is finished.
///
/// A trace is not restartable; call [`Automaton::trace`] again instead.
pub struct Trace<'a, M: Automaton + ?Sized, I> {
    automaton: &'a M,
    word: I,
    current: M::State,
    position: usize,
    started: bool,
    finished: bool,
}

impl<'a, M, I> Trace<'a, M, I>
where
    M: Automaton + ?Sized,
    I: Iterator,
    I::Item: Borrow<M::Symbol>,
{
    pub(crate) fn new(automaton: &'a M, start: M::State, word: I) -> Self {
        Trace {
            automaton,
            word,
            current: start,
            position: 0,
            started: false,
            finished: false,
        }
    }

    /// Number of symbols consumed so far.
    pub fn consumed(&self) -> usize {
        self.position
    }
}

impl<M, I> Iterator for Trace<'_, M, I>
where
    M: Automaton + ?Sized,
    I: Iterator,
    I::Item: Borrow<M::Symbol>,
{
    type Item = Result<M::State>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(Ok(self.current.clone()));
        }

        let symbol = match self.word.next() {
            Some(symbol) => symbol,
            None => {
                self.finished = true;
                return None;
            }
        };

        match self.automaton.transition(&self.current, symbol.borrow()) {
            Ok(next) => {
                self.position += 1;
                self.current = next;
                Some(Ok(self.current.clone()))
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err.at_position(self.position)))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        let pending = usize::from(!self.started);
        let (low, high) = self.word.size_hint();
        (
            pending.saturating_add(low.min(1)),
            high.and_then(|high| high.checked_add(pending)),
        )
    }
}

/// Incremental simulation session.
///
/// Symbols are fed one at a time; the current state and its output can be
/// inspected between steps. A failed step leaves the session unchanged.
pub struct Runner<'a, M: Automaton + ?Sized> {
    automaton: &'a M,
    state: M::State,
    steps: usize,
}

impl<'a, M: Automaton + ?Sized> Runner<'a, M> {
    pub(crate) fn new(automaton: &'a M) -> Self {
        Runner {
            automaton,
            state: automaton.start(),
            steps: 0,
        }
    }

    /// Start the session from an explicit state instead of the start state.
    pub fn from_state(mut self, state: M::State) -> Self {
        self.state = state;
        self.steps = 0;
        self
    }

    /// Current state.
    pub fn state(&self) -> &M::State {
        &self.state
    }

    /// Number of symbols consumed so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Output of the current state.
    pub fn output(&self) -> Result<M::Output> {
        self.automaton.label(&self.state)
    }

    /// Consume one symbol, returning the new current state.
    pub fn feed(&mut self, symbol: &M::Symbol) -> Result<&M::State> {
        let next = self
            .automaton
            .transition(&self.state, symbol)
            .map_err(|err| err.at_position(self.steps))?;
        self.state = next;
        self.steps += 1;
        Ok(&self.state)
    }

    /// Consume every symbol of `word`, stopping at the first failure.
    pub fn feed_all<I>(&mut self, word: I) -> Result<&M::State>
    where
        I: IntoIterator,
        I::Item: Borrow<M::Symbol>,
    {
        for symbol in word {
            self.feed(symbol.borrow())?;
        }
        Ok(&self.state)
    }

    /// Return to the automaton's start state.
    pub fn reset(&mut self) {
        self.state = self.automaton.start();
        self.steps = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::Dfa;
    use crate::error::AutomatonError;

    fn counter() -> Dfa<u32, char, u32> {
        Dfa::new(0u32, ['a', 'b'], |n, c| if *c == 'a' { n + 1 } else { *n }, |n| n % 3)
    }

    #[test]
    fn test_trace_starts_with_start_state() {
        let dfa = counter();
        let states: Vec<u32> = dfa.trace("aba".chars()).collect::<Result<_>>().unwrap();
        assert_eq!(states, vec![0, 1, 1, 2]);
    }

    #[test]
    fn test_trace_stops_at_invalid_symbol() {
        let dfa = counter();
        let mut trace = dfa.trace("azb".chars());
        assert_eq!(trace.next().unwrap().unwrap(), 0);
        assert_eq!(trace.next().unwrap().unwrap(), 1);
        match trace.next() {
            Some(Err(AutomatonError::InvalidSymbol { symbol, position })) => {
                assert_eq!(symbol, "'z'");
                assert_eq!(position, Some(1));
            }
            other => panic!("expected InvalidSymbol, got {:?}", other.map(|r| r.ok())),
        }
        assert!(trace.next().is_none());
    }

    #[test]
    fn test_runner_feeds_incrementally() {
        let dfa = counter();
        let mut runner = dfa.runner();
        assert_eq!(runner.output().unwrap(), 0);

        runner.feed(&'a').unwrap();
        runner.feed_all(['a', 'a', 'b']).unwrap();
        assert_eq!(*runner.state(), 3);
        assert_eq!(runner.steps(), 4);
        assert_eq!(runner.output().unwrap(), 0);

        let err = runner.feed(&'q').unwrap_err();
        assert!(matches!(err, AutomatonError::InvalidSymbol { position: Some(4), .. }));
        assert_eq!(*runner.state(), 3);

        runner.reset();
        assert_eq!(*runner.state(), 0);
    }

    #[test]
    fn test_runner_from_state() {
        let dfa = counter();
        let mut runner = dfa.runner().from_state(7);
        runner.feed(&'a').unwrap();
        assert_eq!(runner.output().unwrap(), 2);
    }
}
