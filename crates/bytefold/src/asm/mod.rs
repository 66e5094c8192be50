//! Textual assembly surface.
//!
//! A small line-oriented format stands in for the binary class-file
//! collaborators: `class NAME` header, `method NAME { ... }` blocks, one
//! instruction per line, `label:` markers, `catch START END HANDLER`
//! exception entries and `#` comments. Literals carry a kind suffix
//! (`9L`, `2.5f`, `2.5d`); a bare integer is 32-bit.

mod parser;
mod printer;

pub use parser::parse_class;
pub use printer::print_class;

use crate::bytecode::instruction::{ArithOp, BinOp, BranchKind, CmpOp, NumKind};

pub(crate) fn arith_from_mnemonic(m: &str) -> Option<ArithOp> {
    let mut chars = m.chars();
    let kind = match chars.next()? {
        'i' => NumKind::Int,
        'l' => NumKind::Long,
        'f' => NumKind::Float,
        'd' => NumKind::Double,
        _ => return None,
    };
    let op = match chars.as_str() {
        "add" => BinOp::Add,
        "sub" => BinOp::Sub,
        "mul" => BinOp::Mul,
        "div" => BinOp::Div,
        "rem" => BinOp::Rem,
        _ => return None,
    };
    Some(ArithOp { kind, op })
}

pub(crate) fn arith_mnemonic(op: ArithOp) -> String {
    let kind = match op.kind {
        NumKind::Int => 'i',
        NumKind::Long => 'l',
        NumKind::Float => 'f',
        NumKind::Double => 'd',
    };
    let name = match op.op {
        BinOp::Add => "add",
        BinOp::Sub => "sub",
        BinOp::Mul => "mul",
        BinOp::Div => "div",
        BinOp::Rem => "rem",
    };
    format!("{kind}{name}")
}

pub(crate) fn branch_from_mnemonic(m: &str) -> Option<BranchKind> {
    if m == "goto" {
        return Some(BranchKind::Goto);
    }
    if let Some(suffix) = m.strip_prefix("if_icmp") {
        return cmp_from_suffix(suffix).map(BranchKind::IfCmp);
    }
    if let Some(suffix) = m.strip_prefix("if") {
        return cmp_from_suffix(suffix).map(BranchKind::IfZero);
    }
    None
}

pub(crate) fn branch_mnemonic(kind: BranchKind) -> String {
    match kind {
        BranchKind::Goto => "goto".to_string(),
        BranchKind::IfCmp(op) => format!("if_icmp{}", cmp_suffix(op)),
        BranchKind::IfZero(op) => format!("if{}", cmp_suffix(op)),
    }
}

fn cmp_from_suffix(s: &str) -> Option<CmpOp> {
    Some(match s {
        "eq" => CmpOp::Eq,
        "ne" => CmpOp::Ne,
        "lt" => CmpOp::Lt,
        "ge" => CmpOp::Ge,
        "gt" => CmpOp::Gt,
        "le" => CmpOp::Le,
        _ => return None,
    })
}

fn cmp_suffix(op: CmpOp) -> &'static str {
    match op {
        CmpOp::Eq => "eq",
        CmpOp::Ne => "ne",
        CmpOp::Lt => "lt",
        CmpOp::Ge => "ge",
        CmpOp::Gt => "gt",
        CmpOp::Le => "le",
    }
}
