//! Single-assignment constant propagation for branch-free methods.
//!
//! Two linear scans: count stores per local slot, then record the
//! constant for every slot assigned exactly once directly from a push.
//! Every load of a recorded slot is then replaced by a push of its value.
//!
//! The whole pass refuses to run if the method contains *any* branch.
//! With no control-flow splits a single-assignment slot holds its one
//! value at every point after (and, for a straight-line method, before it
//! is ever read in a well-formed body), which is the entire soundness
//! argument.

use std::collections::HashMap;

use tracing::debug;

use crate::bytecode::instruction::Instruction;
use crate::bytecode::method::MethodBody;
use crate::bytecode::pool::ConstantPool;
use crate::error::Result;
use crate::value::ConstValue;

pub fn run(body: &mut MethodBody, pool: &mut ConstantPool) -> Result<bool> {
    if body.code.iter().any(|(_, insn)| insn.is_branch()) {
        return Ok(false);
    }

    let mut store_counts: HashMap<u16, u32> = HashMap::new();
    for (_, insn) in body.code.iter() {
        if let Instruction::Store(slot) = insn {
            *store_counts.entry(*slot).or_insert(0) += 1;
        }
    }

    let mut constants: HashMap<u16, ConstValue> = HashMap::new();
    for (id, insn) in body.code.iter() {
        if let Instruction::Push(value) = insn
            && let Some(next) = body.code.next(id)
            && let Some(Instruction::Store(slot)) = body.code.get(next)
            && store_counts.get(slot) == Some(&1)
        {
            constants.insert(*slot, *value);
        }
    }
    if constants.is_empty() {
        return Ok(false);
    }

    let mut changed = false;
    for id in body.code.ids() {
        let slot = match body.code.get(id) {
            Some(Instruction::Load(slot)) => *slot,
            _ => continue,
        };
        let Some(&value) = constants.get(&slot) else {
            continue;
        };
        pool.intern(value);
        let replacement = body.code.insert_before(id, Instruction::Push(value))?;
        body.code.delete(id, Some(replacement))?;
        debug!(slot, ?value, "propagated single-assignment constant");
        changed = true;
    }
    Ok(changed)
}
