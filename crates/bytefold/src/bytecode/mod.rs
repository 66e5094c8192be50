pub mod class;
pub mod instruction;
pub mod list;
pub mod method;
pub mod pool;

pub use class::{ClassModel, Method};
pub use instruction::{ArithOp, BinOp, BranchKind, CmpOp, Instruction, NumKind};
pub use list::{HandlerRange, InsnId, InstructionList, Targeter};
pub use method::MethodBody;
pub use pool::{ConstantPool, CpIndex};
