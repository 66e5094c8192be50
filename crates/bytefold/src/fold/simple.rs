//! The push,push,op folding pass.
//!
//! Finds the motif *push A, push B, arithmetic-op*, evaluates it, and
//! replaces all three instructions with a single push of the result. Any
//! targeter of a deleted instruction is relinked to the replacement push.
//! The scan restarts after every applied fold until no motif remains, so
//! a folded result that becomes an operand of an enclosing expression is
//! picked up in the same run.

use tracing::debug;

use crate::bytecode::instruction::Instruction;
use crate::bytecode::list::{InsnId, InstructionList};
use crate::bytecode::method::MethodBody;
use crate::bytecode::pool::ConstantPool;
use crate::error::Result;
use crate::fold::arith;
use crate::value::ConstValue;

/// Fold constant arithmetic triples until none remain.
///
/// Returns whether anything changed. A declined evaluation (zero
/// divisor) is not a change; the triple is left in place and skipped.
pub fn run(body: &mut MethodBody, pool: &mut ConstantPool) -> Result<bool> {
    let mut changed = false;
    while let Some((first, second, third, result)) = find_triple(&body.code) {
        pool.intern(result);
        let replacement = body.code.insert_before(first, Instruction::Push(result))?;
        body.code.delete(first, Some(replacement))?;
        body.code.delete(second, Some(replacement))?;
        body.code.delete(third, Some(replacement))?;
        debug!(?result, "folded constant expression");
        changed = true;
    }
    Ok(changed)
}

fn find_triple(code: &InstructionList) -> Option<(InsnId, InsnId, InsnId, ConstValue)> {
    let mut cur = code.first();
    while let Some(a) = cur {
        if let Some(b) = code.next(a)
            && let Some(c) = code.next(b)
            && let (
                Some(Instruction::Push(va)),
                Some(Instruction::Push(vb)),
                Some(Instruction::Arith(op)),
            ) = (code.get(a), code.get(b), code.get(c))
            && let Some(result) = arith::eval(*op, *va, *vb)
        {
            return Some((a, b, c, result));
        }
        cur = code.next(a);
    }
    None
}
