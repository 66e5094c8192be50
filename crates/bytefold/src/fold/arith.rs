//! Binary arithmetic evaluation over constant operands.

use crate::bytecode::instruction::{ArithOp, BinOp, NumKind};
use crate::value::ConstValue;

/// Evaluate `a op b`, or return `None` when the fold must be declined.
///
/// Both operands are coerced to the operator's kind first, whatever their
/// own tags; a `Float` fed to `iadd` participates as its truncated i32.
///
/// Declines:
/// - integer `Div`/`Rem` with a zero divisor, both widths;
/// - floating `Div`/`Rem` with a divisor equal to positive or negative
///   zero, even though the IEEE result would be defined. The asymmetry
///   with runtime float semantics is deliberate and load-bearing: folding
///   it would change which pool constants the optimizer emits.
///
/// Integer arithmetic wraps, so `i32::MIN / -1` folds to `i32::MIN`
/// rather than being declined.
pub fn eval(op: ArithOp, a: ConstValue, b: ConstValue) -> Option<ConstValue> {
    match op.kind {
        NumKind::Int => {
            let (x, y) = (a.as_i32(), b.as_i32());
            let r = match op.op {
                BinOp::Add => x.wrapping_add(y),
                BinOp::Sub => x.wrapping_sub(y),
                BinOp::Mul => x.wrapping_mul(y),
                BinOp::Div => {
                    if y == 0 {
                        return None;
                    }
                    x.wrapping_div(y)
                }
                BinOp::Rem => {
                    if y == 0 {
                        return None;
                    }
                    x.wrapping_rem(y)
                }
            };
            Some(ConstValue::Int(r))
        }
        NumKind::Long => {
            let (x, y) = (a.as_i64(), b.as_i64());
            let r = match op.op {
                BinOp::Add => x.wrapping_add(y),
                BinOp::Sub => x.wrapping_sub(y),
                BinOp::Mul => x.wrapping_mul(y),
                BinOp::Div => {
                    if y == 0 {
                        return None;
                    }
                    x.wrapping_div(y)
                }
                BinOp::Rem => {
                    if y == 0 {
                        return None;
                    }
                    x.wrapping_rem(y)
                }
            };
            Some(ConstValue::Long(r))
        }
        NumKind::Float => {
            let (x, y) = (a.as_f32(), b.as_f32());
            let r = match op.op {
                BinOp::Add => x + y,
                BinOp::Sub => x - y,
                BinOp::Mul => x * y,
                BinOp::Div | BinOp::Rem if y == 0.0 => return None,
                BinOp::Div => x / y,
                BinOp::Rem => x % y,
            };
            Some(ConstValue::Float(r))
        }
        NumKind::Double => {
            let (x, y) = (a.as_f64(), b.as_f64());
            let r = match op.op {
                BinOp::Add => x + y,
                BinOp::Sub => x - y,
                BinOp::Mul => x * y,
                BinOp::Div | BinOp::Rem if y == 0.0 => return None,
                BinOp::Div => x / y,
                BinOp::Rem => x % y,
            };
            Some(ConstValue::Double(r))
        }
    }
}
