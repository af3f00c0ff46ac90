use std::sync::Arc;
use std::thread;

use lazy_dfa::prelude::*;

// Accepts binary words containing `first` immediately followed by `second`.
fn contains(first: u8, second: u8) -> Dfa<u8, u8> {
    Dfa::new(
        0u8,
        [0u8, 1],
        move |state, bit| match (*state, *bit) {
            (2, _) => 2,
            (1, b) if b == second => 2,
            (_, b) if b == first => 1,
            _ => 0,
        },
        |state| *state == 2,
    )
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_even_ones_minimizes_to_two_states() {
    init_tracing();
    let mod4 = Dfa::new(0u8, [0u8, 1], |n, bit| (n + bit) % 4, |n| n % 2 == 0);

    let minimized = mod4.minimize(64).unwrap();
    assert_eq!(minimized.num_states(), 2);
    assert_eq!(minimized.labels(), &[true, false]);
    assert_eq!(minimized.successor(0, &1), Some(1));
    assert_eq!(minimized.successor(0, &0), Some(0));
    assert!(minimized.equivalent(&mod4, 64).unwrap());
}

#[test]
fn test_contains_both_patterns() {
    let both = contains(0, 1).intersection(contains(1, 0)).unwrap();

    assert!(both.accepts([0u8, 1, 0]).unwrap());
    assert!(both.accepts([1u8, 0, 1]).unwrap());
    assert!(!both.accepts([0u8, 0, 0]).unwrap());
    assert!(!both.accepts([0u8, 1, 1]).unwrap());

    assert_eq!(both.minimize(64).unwrap().num_states(), 6);
    assert_eq!(both.find_accepting_word(64).unwrap(), Some(vec![0, 1, 0]));
}

#[test]
fn test_shared_operands_are_reused() {
    let has01 = Arc::new(contains(0, 1));
    let has10 = Arc::new(contains(1, 0));

    let either = Arc::clone(&has01).union(Arc::clone(&has10)).unwrap();
    let exactly_one = Arc::clone(&has01).xor(Arc::clone(&has10)).unwrap();

    assert!(either.accepts([0u8, 1]).unwrap());
    assert!(exactly_one.accepts([0u8, 1]).unwrap());
    assert!(!exactly_one.accepts([0u8, 1, 0]).unwrap());
    assert!(has01.accepts([0u8, 1]).unwrap());
}

#[test]
fn test_infinite_state_space() {
    let counter = Dfa::new(0u64, ['a', 'b'], |n, c| if *c == 'a' { n + 1 } else { *n }, |n| n % 3 == 0);

    // Simulation and partial enumeration work without bounds.
    assert!(counter.accepts("aaab".chars()).unwrap());
    let first: Vec<u64> = counter.reachable().unwrap().take(5).collect::<Result<_>>().unwrap();
    assert_eq!(first, vec![0, 1, 2, 3, 4]);

    // Whole-automaton analyses need a finite reachable part.
    assert!(matches!(
        counter.minimize(1_000),
        Err(AutomatonError::UnboundedStateSpace { cap: 1_000 })
    ));
    assert!(matches!(
        counter.to_table(10),
        Err(AutomatonError::UnboundedStateSpace { cap: 10 })
    ));
}

#[test]
fn test_infinite_automata_with_finite_behavior_compare_by_cap() {
    let counter = Dfa::new(0u64, ['a'], |n, _| n + 1, |n| n % 2 == 0);
    let parity = Dfa::new(0u8, ['a'], |n, _| (n + 1) % 2, |n| *n == 0);

    assert!(matches!(
        counter.equivalent(&parity, 100),
        Err(AutomatonError::UnboundedStateSpace { cap: 100 })
    ));
    // A disagreement is still found before the cap.
    let shifted = Dfa::new(0u8, ['a'], |n, _| (n + 1) % 3, |n| *n == 0);
    assert_eq!(
        counter.find_counterexample(&shifted, 100).unwrap(),
        Some(vec!['a', 'a'])
    );
}

#[test]
fn test_implicit_alphabet_requires_symbols_for_analysis() {
    let mod5: Dfa<i64, i64> = Dfa::implicit(0, |n, d| Ok((n + d).rem_euclid(5)), |n| *n == 0);

    assert!(mod5.accepts([2i64, 3, -5]).unwrap());
    assert!(matches!(mod5.minimize(16), Err(AutomatonError::MissingAlphabet)));

    let states: Vec<i64> = mod5.reachable_over([1, -1]).collect::<Result<_>>().unwrap();
    assert_eq!(states, vec![0, 1, 4, 2, 3]);

    // Restricting an implicit alphabet declares a finite one.
    let finite = mod5.restrict([1, -1]);
    assert_eq!(finite.alphabet().len(), Some(2));
    assert_eq!(finite.minimize(16).unwrap().num_states(), 5);
}

#[test]
fn test_restrict_an_implicit_alphabet_via_product() {
    let mod5: Dfa<i64, i64> = Dfa::implicit(0, |n, d| Ok((n + d).rem_euclid(5)), |n| *n == 0);
    let any = Dfa::new((), [1i64, 2], |_, _| (), |_| true);

    // The implicit side adopts the finite side's alphabet.
    let bounded = mod5.intersection(any).unwrap();
    assert_eq!(bounded.minimize(16).unwrap().num_states(), 5);
}

#[test]
fn test_table_normalization_keeps_every_state() {
    let mod4 = Dfa::new(0u8, [0u8, 1], |n, bit| (n + bit) % 4, |n| n % 2 == 0);
    let table = mod4.to_table(16).unwrap();

    assert_eq!(table.num_states(), 4);
    assert_eq!(table.start(), 0);
    assert_eq!(table.labels(), &[true, false, true, false]);
    assert!(table.equivalent(&mod4, 16).unwrap());
}

#[test]
fn test_runner_incremental_feed() {
    let has01 = contains(0, 1);
    let mut runner = has01.runner();

    assert_eq!(runner.feed(&1).unwrap(), &0);
    assert_eq!(runner.feed(&0).unwrap(), &1);
    assert!(!runner.output().unwrap());
    runner.feed(&1).unwrap();
    assert!(runner.output().unwrap());
    assert_eq!(runner.steps(), 3);

    let err = runner.feed(&7).unwrap_err();
    assert!(matches!(err, AutomatonError::InvalidSymbol { position: Some(3), .. }));
    assert_eq!(runner.state(), &2);

    runner.reset();
    assert_eq!(runner.steps(), 0);
    assert_eq!(runner.state(), &0);
}

#[test]
fn test_builder_and_moore_transduction() {
    let mod3 = DfaBuilder::new()
        .start(0u8)
        .inputs(['x', 'y'])
        .transition(|n, c| if *c == 'x' { (n + 1) % 3 } else { *n })
        .label(|n| ["zero", "one", "two"][*n as usize])
        .build()
        .unwrap();

    assert_eq!(
        mod3.transduce("xyxx".chars()).unwrap(),
        vec!["zero", "one", "one", "two", "zero"]
    );
    assert_eq!(mod3.minimize(8).unwrap().num_states(), 3);
}

#[test]
fn test_automata_are_shared_across_threads() {
    let has01 = Arc::new(contains(0, 1));

    let handles: Vec<_> = (0u8..4)
        .map(|i| {
            let dfa = Arc::clone(&has01);
            thread::spawn(move || {
                let word = [i % 2, (i + 1) % 2];
                dfa.accepts(word).unwrap()
            })
        })
        .collect();

    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![true, false, true, false]);
}

#[test]
fn test_depth_first_enumeration_covers_same_states() {
    let both = contains(0, 1).intersection(contains(1, 0)).unwrap();

    let mut bfs: Vec<(u8, u8)> = both.reachable().unwrap().collect::<Result<_>>().unwrap();
    let mut dfs: Vec<(u8, u8)> = both
        .reachable()
        .unwrap()
        .with_order(Order::DepthFirst)
        .collect::<Result<_>>()
        .unwrap();

    assert_eq!(bfs[0], (0, 0));
    assert_eq!(dfs[0], (0, 0));
    bfs.sort_unstable();
    dfs.sort_unstable();
    assert_eq!(bfs, dfs);
}
