//! Flow-sensitive constant propagation as a single forward scan.
//!
//! This is deliberately *not* a fixed-point dataflow analysis over a
//! control-flow graph. One linear walk tracks, per local slot, the most
//! recently assigned constant, and substitutes loads of currently-known
//! slots. Soundness in the presence of branches rests on the
//! comparison-exclusion heuristic below plus the driver re-running the
//! whole pipeline to a fixed point; a stale constant can in principle
//! survive across a loop back-edge the heuristic does not cover, and that
//! behavior is kept as-is.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::bytecode::instruction::{BranchKind, Instruction};
use crate::bytecode::method::MethodBody;
use crate::bytecode::pool::ConstantPool;
use crate::error::Result;
use crate::value::ConstValue;

pub fn run(body: &mut MethodBody, pool: &mut ConstantPool) -> Result<bool> {
    let excluded = comparison_operands(body);
    if !excluded.is_empty() {
        trace!(?excluded, "slots excluded from dynamic propagation");
    }

    let mut known: HashMap<u16, ConstValue> = HashMap::new();
    let mut changed = false;
    let mut cur = body.code.first();
    while let Some(id) = cur {
        let next = body.code.next(id);
        let slot = match body.code.get(id) {
            Some(Instruction::Store(slot)) => {
                let slot = *slot;
                // A store fed directly by a constant push defines the
                // slot's known value; any other store invalidates it.
                let pushed = body.code.prev(id).and_then(|p| match body.code.get(p) {
                    Some(Instruction::Push(v)) => Some(*v),
                    _ => None,
                });
                match pushed {
                    Some(v) => {
                        known.insert(slot, v);
                    }
                    None => {
                        known.remove(&slot);
                    }
                }
                None
            }
            Some(Instruction::Load(slot)) => Some(*slot),
            _ => None,
        };
        if let Some(slot) = slot
            && !excluded.contains(&slot)
            && let Some(&value) = known.get(&slot)
        {
            pool.intern(value);
            let replacement = body.code.insert_before(id, Instruction::Push(value))?;
            body.code.delete(id, Some(replacement))?;
            debug!(slot, ?value, "substituted known constant for load");
            changed = true;
        }
        cur = next;
    }
    Ok(changed)
}

/// Local slots loaded into the two stack positions immediately before a
/// two-operand comparison branch, collected method-wide.
///
/// A slot that feeds such a comparison may be mutated on a path this
/// linear scan cannot see (the classic loop-counter shape), so its loads
/// are never substituted anywhere in the method.
fn comparison_operands(body: &MethodBody) -> HashSet<u16> {
    let mut excluded = HashSet::new();
    for (id, insn) in body.code.iter() {
        let Instruction::Branch {
            kind: BranchKind::IfCmp(_),
            ..
        } = insn
        else {
            continue;
        };
        let mut pos = body.code.prev(id);
        for _ in 0..2 {
            let Some(p) = pos else { break };
            if let Some(Instruction::Load(slot)) = body.code.get(p) {
                excluded.insert(*slot);
            }
            pos = body.code.prev(p);
        }
    }
    excluded
}
