//! Moore partition refinement.
//!
//! Algorithm:
//! 1. Explore the finite reachable state graph (bounded by a state cap)
//! 2. Partition states by label
//! 3. Split classes by (class, successor classes per symbol) signatures
//! 4. Stop once a round creates no new class
//! 5. Build the quotient, numbering classes breadth-first from the start
//!
//! Each round refines the previous partition, so the class count strictly
//! grows until the fixed point; it is reached within `|states|` rounds.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::automaton::{Automaton, TableDfa};
use crate::error::Result;
use crate::reachability::{Row, StateGraph};

type Signature = (usize, Row);

/// Minimize the reachable part of `automaton`.
pub(crate) fn minimize<M>(automaton: &M, cap: usize) -> Result<TableDfa<M::Symbol, M::Output>>
where
    M: Automaton + ?Sized,
{
    let graph = StateGraph::explore(automaton, cap)?;
    let classes = refine(&graph);
    let minimized = quotient(&graph, &classes);

    tracing::debug!(
        states = graph.len(),
        classes = minimized.num_states(),
        "minimized automaton"
    );
    Ok(minimized)
}

/// Class id of every state at the coarsest stable partition.
fn refine<S, A, O>(graph: &StateGraph<S, A, O>) -> Vec<usize>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
    O: Clone + Eq + Hash,
{
    let mut by_label: FxHashMap<&O, usize> = FxHashMap::default();
    let mut classes: Vec<usize> = graph
        .labels()
        .iter()
        .map(|label| {
            let next = by_label.len();
            *by_label.entry(label).or_insert(next)
        })
        .collect();
    let mut count = by_label.len();

    // Termination guard only; refinement converges within `len` rounds.
    for round in 1..=graph.len() + 1 {
        let mut signatures: FxHashMap<Signature, usize> = FxHashMap::default();
        let refined: Vec<usize> = graph
            .rows()
            .iter()
            .enumerate()
            .map(|(state, row)| {
                let successors = row.iter().map(|target| target.map(|t| classes[t])).collect();
                let next = signatures.len();
                *signatures.entry((classes[state], successors)).or_insert(next)
            })
            .collect();

        let refined_count = signatures.len();
        classes = refined;
        tracing::trace!(round, classes = refined_count, "refinement round");
        if refined_count == count {
            break;
        }
        count = refined_count;
    }

    classes
}

/// Quotient of `graph` by `classes`, renumbered breadth-first from the
/// start class.
fn quotient<S, A, O>(graph: &StateGraph<S, A, O>, classes: &[usize]) -> TableDfa<A, O>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash + Debug,
    O: Clone + Eq + Hash,
{
    let class_count = classes.iter().max().map_or(0, |max| max + 1);

    // One representative per class.
    let mut representative = vec![usize::MAX; class_count];
    for (state, &class) in classes.iter().enumerate() {
        if representative[class] == usize::MAX {
            representative[class] = state;
        }
    }

    let mut canonical = vec![usize::MAX; class_count];
    let mut order = Vec::with_capacity(class_count);
    let mut queue = VecDeque::new();
    if let Some(&start) = classes.first() {
        canonical[start] = 0;
        order.push(start);
        queue.push_back(start);
    }
    while let Some(class) = queue.pop_front() {
        for target in graph.successors(representative[class]).iter().flatten() {
            let target = classes[*target];
            if canonical[target] == usize::MAX {
                canonical[target] = order.len();
                order.push(target);
                queue.push_back(target);
            }
        }
    }

    let rows = order
        .iter()
        .map(|&class| {
            graph
                .successors(representative[class])
                .iter()
                .map(|target| target.map(|t| canonical[classes[t]]))
                .collect()
        })
        .collect();
    let labels = order
        .iter()
        .map(|&class| graph.labels()[representative[class]].clone())
        .collect();

    TableDfa::from_raw(0, graph.alphabet().clone(), rows, labels)
}
