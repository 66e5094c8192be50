use crate::bytecode::list::InsnId;
use crate::value::ConstValue;

/// Numeric kind an arithmetic operator works in.
///
/// The operator's kind decides the coercion applied to both operands; the
/// operands' own tags are never checked against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumKind {
    Int,
    Long,
    Float,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

/// A binary arithmetic opcode, e.g. `iadd` is `{ Int, Add }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArithOp {
    pub kind: NumKind,
    pub op: BinOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Ge,
    Gt,
    Le,
}

/// Shape of a branch instruction.
///
/// `IfCmp` pops two operands, `IfZero` pops one and compares it against
/// zero, `Goto` is unconditional. Only `IfCmp` feeds the dynamic pass's
/// comparison-exclusion set; all three count as control flow for the
/// single-assignment pass's branch-free guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchKind {
    Goto,
    IfCmp(CmpOp),
    IfZero(CmpOp),
}

/// One instruction of a method body.
///
/// Only the shapes the folding passes inspect are modelled precisely;
/// everything else is carried opaquely as [`Instruction::Other`] with its
/// mnemonic, so an unrecognized opcode survives parse → optimize → print
/// untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Push a constant literal onto the operand stack.
    Push(ConstValue),
    /// Load a local slot onto the operand stack.
    Load(u16),
    /// Pop the operand stack into a local slot.
    Store(u16),
    /// Pop two operands, push the result.
    Arith(ArithOp),
    /// Conditional or unconditional transfer to `target`.
    Branch { kind: BranchKind, target: InsnId },
    /// Any opcode the optimizer does not interpret.
    Other(String),
}

impl Instruction {
    pub fn is_branch(&self) -> bool {
        matches!(self, Self::Branch { .. })
    }

    pub fn branch_target(&self) -> Option<InsnId> {
        match self {
            Self::Branch { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// Operand stack pops and pushes, used for the max-stack recompute.
    ///
    /// `Other` is reported as stack-neutral; the recompute clamps the
    /// running depth at zero so opaque pops cannot drive it negative.
    pub fn stack_io(&self) -> (u16, u16) {
        match self {
            Self::Push(_) | Self::Load(_) => (0, 1),
            Self::Store(_) => (1, 0),
            Self::Arith(_) => (2, 1),
            Self::Branch { kind, .. } => match kind {
                BranchKind::Goto => (0, 0),
                BranchKind::IfCmp(_) => (2, 0),
                BranchKind::IfZero(_) => (1, 0),
            },
            Self::Other(_) => (0, 0),
        }
    }
}
