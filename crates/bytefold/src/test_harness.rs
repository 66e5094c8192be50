//! Test harness for bytefold unit and integration tests.
//!
//! Provides helpers to assemble a textual class, run the optimizer, and
//! inspect the resulting instruction stream.
//!
//! # Example
//!
//! ```rust
//! use bytefold::test_harness::*;
//!
//! let insns = optimize_method(
//!     "push 2
//!      push 3
//!      iadd
//!      return",
//! );
//! assert_eq!(push_values(&insns), vec![bytefold::ConstValue::Int(5)]);
//! ```

#![allow(clippy::missing_panics_doc, clippy::must_use_candidate)]

use crate::{ClassModel, ConstValue, Instruction, OptimizeStats, optimize_class, parse_class, print_class};

/// Wrap loose instruction lines into a one-method class source.
pub fn wrap_method(body: &str) -> String {
    let mut src = String::from("class Harness\nmethod main {\n");
    for line in body.lines() {
        src.push_str("    ");
        src.push_str(line.trim());
        src.push('\n');
    }
    src.push_str("}\n");
    src
}

/// Parse a textual class, panicking on malformed input.
pub fn assemble(src: &str) -> ClassModel {
    parse_class(src).expect("harness source must parse")
}

/// Assemble, optimize, and re-print a class.
///
/// Every method body is validated for dangling references after the run,
/// so any test going through the harness checks the relinking invariant
/// for free.
pub fn optimize_source(src: &str) -> (String, OptimizeStats) {
    let mut class = assemble(src);
    let stats = optimize_class(&mut class).expect("optimize must succeed");
    for method in &class.methods {
        method
            .body
            .code
            .validate()
            .expect("no dangling references after optimization");
    }
    (print_class(&class), stats)
}

/// Optimize a single wrapped method body and return its instructions.
pub fn optimize_method(body: &str) -> Vec<Instruction> {
    let mut class = assemble(&wrap_method(body));
    optimize_class(&mut class).expect("optimize must succeed");
    let method = class.method("main").expect("wrapped method exists");
    method
        .body
        .code
        .validate()
        .expect("no dangling references after optimization");
    method_instructions(&class, "main")
}

/// Clone the instruction sequence of a named method.
pub fn method_instructions(class: &ClassModel, name: &str) -> Vec<Instruction> {
    class
        .method(name)
        .expect("method exists")
        .body
        .code
        .iter()
        .map(|(_, insn)| insn.clone())
        .collect()
}

/// Values of every `push` in the sequence, in order.
pub fn push_values(insns: &[Instruction]) -> Vec<ConstValue> {
    insns
        .iter()
        .filter_map(|insn| match insn {
            Instruction::Push(v) => Some(*v),
            _ => None,
        })
        .collect()
}

/// Slots of every `load` in the sequence, in order.
pub fn load_slots(insns: &[Instruction]) -> Vec<u16> {
    insns
        .iter()
        .filter_map(|insn| match insn {
            Instruction::Load(slot) => Some(*slot),
            _ => None,
        })
        .collect()
}

/// Count instructions satisfying a predicate.
pub fn count_matching(insns: &[Instruction], pred: impl Fn(&Instruction) -> bool) -> usize {
    insns.iter().filter(|insn| pred(insn)).count()
}
