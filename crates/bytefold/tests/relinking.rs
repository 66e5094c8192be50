//! Branch and exception-handler references across deletions.

use bytefold::test_harness::*;

#[test]
fn branch_into_folded_triple_lands_on_the_replacement() {
    let (printed, stats) = optimize_source(&wrap_method(
        "goto target
         target:
         push 2
         push 3
         iadd
         return",
    ));
    assert!(stats.changed());
    assert!(printed.contains("goto L0"));
    assert!(printed.contains("L0:\n    push 5"));
}

#[test]
fn handler_boundaries_follow_a_folded_triple() {
    let (printed, _) = optimize_source(&wrap_method(
        "start:
         push 2
         push 3
         iadd
         store 0
         handler:
         return
         catch start start handler",
    ));
    assert!(printed.contains("L0:\n    push 5"));
    assert!(printed.contains("catch L0 L0 L1"));
}

#[test]
fn branch_onto_substituted_load_lands_on_its_push() {
    let (printed, _) = optimize_source(&wrap_method(
        "push 5
         store 0
         goto jump
         jump:
         load 0
         ifeq out
         out:
         return",
    ));
    // The load was replaced by a push of the known constant and the goto
    // followed it there.
    assert!(printed.contains("goto L0"));
    assert!(printed.contains("L0:\n    push 5"));
    assert!(!printed.contains("load"));
}

#[test]
fn conditional_back_edge_survives_folding_ahead_of_it() {
    let (printed, _) = optimize_source(&wrap_method(
        "top:
         push 2
         push 3
         iadd
         store 0
         load 5
         ifne top
         return",
    ));
    assert!(printed.contains("L0:\n    push 5"));
    assert!(printed.contains("ifne L0"));
}
