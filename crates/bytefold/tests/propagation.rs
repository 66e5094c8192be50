//! Single-assignment constant propagation (the branch-free pass).

use bytefold::test_harness::*;
use bytefold::{ConstValue, Instruction};

#[test]
fn propagates_single_assignment_through_a_chain() {
    // push 5; store 1; load 1; push 1; iadd → the load becomes push 5 and
    // the chain folds to push 6 on the next sweep. The dead push/store
    // pair stays: dead-code elimination is not this tool's job.
    let insns = optimize_method(
        "push 5
         store 1
         load 1
         push 1
         iadd
         return",
    );
    assert_eq!(
        insns,
        vec![
            Instruction::Push(ConstValue::Int(5)),
            Instruction::Store(1),
            Instruction::Push(ConstValue::Int(6)),
            Instruction::Other("return".to_string()),
        ]
    );
}

#[test]
fn propagates_long_and_double_constants() {
    let insns = optimize_method(
        "push 100L
         store 2
         load 2
         push 1L
         ladd
         return",
    );
    assert_eq!(
        push_values(&insns),
        vec![ConstValue::Long(100), ConstValue::Long(101)]
    );
    assert!(load_slots(&insns).is_empty());
}

#[test]
fn pass_is_skipped_for_any_branch() {
    // Unit-level check of the guard: the pass itself must refuse, even
    // though the slot is assigned exactly once from a constant.
    let mut class = assemble(&wrap_method(
        "push 5
         store 1
         load 1
         store 2
         goto done
         done:
         return",
    ));
    let mut body = std::mem::take(&mut class.methods[0].body);
    let changed = bytefold::fold::const_vars::run(&mut body, &mut class.pool).unwrap();
    assert!(!changed);
    assert_eq!(load_slots(&body.code.iter().map(|(_, i)| i.clone()).collect::<Vec<_>>()), vec![1]);
}

#[test]
fn goto_counts_as_a_branch_for_the_guard() {
    let mut class = assemble(&wrap_method(
        "goto skip
         skip:
         push 5
         store 1
         load 1
         return",
    ));
    let mut body = std::mem::take(&mut class.methods[0].body);
    assert!(!bytefold::fold::const_vars::run(&mut body, &mut class.pool).unwrap());
}

#[test]
fn multiply_assigned_slot_is_not_recorded() {
    let mut class = assemble(&wrap_method(
        "push 1
         store 0
         load 0
         push 2
         store 0
         load 0
         return",
    ));
    let mut body = std::mem::take(&mut class.methods[0].body);
    let changed = bytefold::fold::const_vars::run(&mut body, &mut class.pool).unwrap();
    assert!(!changed);
}

#[test]
fn store_of_a_non_constant_is_not_recorded() {
    // Slot 0 is assigned exactly once, but not from a push.
    let insns = optimize_method(
        "load 9
         store 0
         load 0
         return",
    );
    assert_eq!(load_slots(&insns), vec![9, 0]);
}
