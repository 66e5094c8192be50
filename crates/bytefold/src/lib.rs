#![allow(
    clippy::cast_possible_truncation, // intentional: the coercion table narrows literals by design
    clippy::cast_possible_wrap, // intentional: wrapping is the defined integer semantics
    clippy::cast_sign_loss, // intentional: bit-pattern interning keys
    clippy::cast_precision_loss, // intentional: int-to-float widening is the defined coercion
    clippy::missing_errors_doc
)]

pub mod asm;
pub mod bytecode;
pub mod error;
pub mod fold;
pub mod value;

/// Test harness module for writing unit and integration tests.
///
/// Only available when running tests or when the `test-harness` feature
/// is enabled.
#[cfg(any(test, feature = "test-harness"))]
pub mod test_harness;

pub use asm::{parse_class, print_class};
pub use bytecode::{
    ArithOp, BinOp, BranchKind, ClassModel, CmpOp, ConstantPool, CpIndex, HandlerRange, InsnId,
    Instruction, InstructionList, Method, MethodBody, NumKind, Targeter,
};
pub use error::{Error, Result};
pub use fold::{OptimizeStats, optimize_class};
pub use value::ConstValue;
