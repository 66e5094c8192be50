//! Optimizing an already-optimized class changes nothing.

use bytefold::test_harness::*;

const FIXTURE: &str = "class Mixed

method straight {
    push 2
    push 3
    iadd
    push 4
    imul
    return
}

method single_assignment {
    push 5
    store 1
    load 1
    push 1
    iadd
    return
}

method counting_loop {
    push 0
    store 1
top:
    load 1
    push 10
    if_icmplt body
    return
body:
    load 1
    push 1
    iadd
    store 1
    goto top
}
";

#[test]
fn second_run_is_a_no_op() {
    let (once, first) = optimize_source(FIXTURE);
    assert!(first.changed());

    let (twice, second) = optimize_source(&once);
    assert!(!second.changed());
    assert_eq!(second.sweeps, 1);
    assert_eq!(once, twice);
}

#[test]
fn refused_folds_stay_refused() {
    let src = wrap_method(
        "push 1
         push 0
         idiv
         return",
    );
    let (once, first) = optimize_source(&src);
    assert!(!first.changed());
    let (twice, _) = optimize_source(&once);
    assert_eq!(once, twice);
}

#[test]
fn empty_class_reaches_fixed_point_immediately() {
    let (_, stats) = optimize_source("class Empty\n");
    assert!(!stats.changed());
    assert_eq!(stats.sweeps, 1);
}
