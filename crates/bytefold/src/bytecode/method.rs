use crate::bytecode::instruction::Instruction;
use crate::bytecode::list::InstructionList;

/// One method's code plus derived frame metadata.
///
/// The instruction list is mutated in place by the folding passes; the
/// metadata is only meaningful again after
/// [`MethodBody::recompute_metadata`], which the driver runs before a
/// body is committed.
#[derive(Debug, Clone, Default)]
pub struct MethodBody {
    pub code: InstructionList,
    max_stack: u16,
    max_locals: u16,
}

impl MethodBody {
    pub fn new(code: InstructionList) -> Self {
        let mut body = Self {
            code,
            max_stack: 0,
            max_locals: 0,
        };
        body.recompute_metadata();
        body
    }

    pub fn max_stack(&self) -> u16 {
        self.max_stack
    }

    pub fn max_locals(&self) -> u16 {
        self.max_locals
    }

    /// Recompute max operand-stack depth and max locals with one linear
    /// walk.
    ///
    /// The depth is tracked along sequence order and clamped at zero;
    /// opaque instructions are stack-neutral. That makes the result a
    /// conservative upper bound for the instruction shapes the optimizer
    /// rewrites, which is all a commit needs.
    pub fn recompute_metadata(&mut self) {
        let mut depth: u16 = 0;
        let mut max_depth: u16 = 0;
        let mut max_locals: u16 = 0;
        for (_, insn) in self.code.iter() {
            let (pops, pushes) = insn.stack_io();
            depth = depth.saturating_sub(pops).saturating_add(pushes);
            max_depth = max_depth.max(depth);
            if let Instruction::Load(slot) | Instruction::Store(slot) = insn {
                max_locals = max_locals.max(slot.saturating_add(1));
            }
        }
        self.max_stack = max_depth;
        self.max_locals = max_locals;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ConstValue;
    use crate::bytecode::instruction::{ArithOp, BinOp, NumKind};

    #[test]
    fn metadata_tracks_depth_and_slots() {
        let mut code = InstructionList::new();
        code.push_back(Instruction::Push(ConstValue::Int(1)));
        code.push_back(Instruction::Push(ConstValue::Int(2)));
        code.push_back(Instruction::Arith(ArithOp {
            kind: NumKind::Int,
            op: BinOp::Add,
        }));
        code.push_back(Instruction::Store(4));
        let body = MethodBody::new(code);
        assert_eq!(body.max_stack(), 2);
        assert_eq!(body.max_locals(), 5);
    }

    #[test]
    fn empty_body_has_zero_metadata() {
        let body = MethodBody::default();
        assert_eq!(body.max_stack(), 0);
        assert_eq!(body.max_locals(), 0);
    }
}
