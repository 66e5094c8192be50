//! The flow-sensitive linear propagation pass and its exclusion heuristic.

use bytefold::test_harness::*;
use bytefold::{ConstValue, Instruction};

#[test]
fn loop_counter_is_never_substituted() {
    // Classic counting loop: v is compared at the top and mutated in the
    // body. The comparison excludes v from substitution everywhere, even
    // though `push 0; store 1` makes its value locally known.
    let insns = optimize_method(
        "push 0
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
         goto top",
    );
    assert_eq!(load_slots(&insns), vec![1, 1]);
}

#[test]
fn exclusion_is_method_wide() {
    // The first load sits before the comparison region, but exclusion is
    // per-method, not per-position.
    let insns = optimize_method(
        "push 5
         store 1
         load 1
         store 2
         load 1
         push 9
         if_icmpeq out
         out:
         return",
    );
    assert_eq!(load_slots(&insns), vec![1, 1]);
}

#[test]
fn one_operand_comparisons_do_not_exclude() {
    // `ifeq` compares against zero; it is not a two-operand comparison,
    // so slot 0 stays substitutable.
    let insns = optimize_method(
        "push 5
         store 0
         load 0
         ifeq out
         out:
         return",
    );
    assert!(load_slots(&insns).is_empty());
    assert_eq!(
        push_values(&insns),
        vec![ConstValue::Int(5), ConstValue::Int(5)]
    );
}

#[test]
fn substitution_tracks_the_latest_store() {
    let insns = optimize_method(
        "push 1
         store 0
         load 0
         push 2
         store 0
         load 0
         return",
    );
    assert!(load_slots(&insns).is_empty());
    assert_eq!(
        push_values(&insns),
        vec![
            ConstValue::Int(1),
            ConstValue::Int(1),
            ConstValue::Int(2),
            ConstValue::Int(2),
        ]
    );
}

#[test]
fn non_constant_store_kills_the_mapping() {
    let insns = optimize_method(
        "push 7
         store 0
         load 3
         store 0
         load 0
         ifge out
         out:
         return",
    );
    // Slot 0 was overwritten by an unknown value; its load survives.
    assert_eq!(load_slots(&insns), vec![3, 0]);
}

#[test]
fn later_sweeps_discover_new_constants() {
    // Sweep 1: the dynamic pass substitutes load 0, leaving 5 + 1 as a
    // constant triple. Sweep 2: simple folding collapses it to push 6,
    // which turns store 2 into a constant definition the dynamic pass
    // then propagates into load 2. The class-level fixed point is what
    // strings the sweeps together.
    let insns = optimize_method(
        "push 5
         store 0
         load 0
         push 1
         iadd
         store 2
         load 2
         ifge out
         out:
         return",
    );
    assert!(load_slots(&insns).is_empty());
    assert_eq!(
        push_values(&insns),
        vec![
            ConstValue::Int(5),
            ConstValue::Int(6),
            ConstValue::Int(6),
        ]
    );
    assert!(count_matching(&insns, |i| matches!(i, Instruction::Arith(_))) == 0);
}
