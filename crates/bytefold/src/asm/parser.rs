use std::collections::HashMap;

use crate::asm::{arith_from_mnemonic, branch_from_mnemonic};
use crate::bytecode::class::{ClassModel, Method};
use crate::bytecode::instruction::Instruction;
use crate::bytecode::list::{InsnId, InstructionList};
use crate::bytecode::method::MethodBody;
use crate::error::{Error, Result};
use crate::value::ConstValue;

/// Parse a textual class into the in-memory model.
///
/// Labels are method-local and resolved in a second step once every
/// instruction of the body exists; until then a branch targets itself.
pub fn parse_class(src: &str) -> Result<ClassModel> {
    let mut class: Option<ClassModel> = None;
    let mut lines = src.lines().enumerate();
    while let Some((idx, raw)) = lines.next() {
        let lineno = idx + 1;
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix("class ") {
            if class.is_some() {
                return err(lineno, "duplicate class header");
            }
            class = Some(ClassModel::new(rest.trim()));
        } else if let Some(rest) = line.strip_prefix("method ") {
            let Some(class) = class.as_mut() else {
                return err(lineno, "method before class header");
            };
            let Some(name) = rest.trim().strip_suffix('{').map(str::trim_end) else {
                return err(lineno, "expected 'method NAME {'");
            };
            if name.is_empty() {
                return err(lineno, "method needs a name");
            }
            parse_method(name, &mut lines, class)?;
        } else {
            return err(lineno, format!("expected 'class' or 'method', got '{line}'"));
        }
    }
    class.ok_or_else(|| Error::Parse {
        line: 1,
        message: "missing class header".to_string(),
    })
}

fn parse_method<'a>(
    name: &str,
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    class: &mut ClassModel,
) -> Result<()> {
    let mut code = InstructionList::new();
    let mut labels: HashMap<String, InsnId> = HashMap::new();
    let mut pending_labels: Vec<String> = Vec::new();
    let mut branch_fixups: Vec<(InsnId, String)> = Vec::new();
    let mut catches: Vec<[String; 3]> = Vec::new();
    let mut last_line = 0;
    let mut closed = false;

    for (idx, raw) in lines {
        let lineno = idx + 1;
        last_line = lineno;
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        if line == "}" {
            closed = true;
            break;
        }
        if let Some(label) = line.strip_suffix(':') {
            if label.is_empty() || label.contains(char::is_whitespace) {
                return err(lineno, format!("invalid label '{label}'"));
            }
            pending_labels.push(label.to_string());
            continue;
        }

        let mut parts = line.split_whitespace();
        let mnemonic = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        if mnemonic == "catch" {
            let &[start, end, handler] = args.as_slice() else {
                return err(lineno, "expected 'catch START END HANDLER'");
            };
            catches.push([start.to_string(), end.to_string(), handler.to_string()]);
            continue;
        }

        let id = if mnemonic == "push" {
            let &[literal] = args.as_slice() else {
                return err(lineno, "push takes one literal");
            };
            let value = parse_literal(literal, lineno)?;
            class.pool.intern(value);
            code.push_back(Instruction::Push(value))
        } else if mnemonic == "load" || mnemonic == "store" {
            let &[slot] = args.as_slice() else {
                return err(lineno, format!("{mnemonic} takes one slot index"));
            };
            let slot: u16 = slot
                .parse()
                .map_err(|_| parse_error(lineno, format!("invalid slot '{slot}'")))?;
            if mnemonic == "load" {
                code.push_back(Instruction::Load(slot))
            } else {
                code.push_back(Instruction::Store(slot))
            }
        } else if let Some(op) = arith_from_mnemonic(mnemonic) {
            if !args.is_empty() {
                return err(lineno, format!("{mnemonic} takes no operands"));
            }
            code.push_back(Instruction::Arith(op))
        } else if let Some(kind) = branch_from_mnemonic(mnemonic) {
            let &[label] = args.as_slice() else {
                return err(lineno, format!("{mnemonic} takes one label"));
            };
            let id = code.push_back_branch(kind);
            branch_fixups.push((id, label.to_string()));
            id
        } else {
            if !args.is_empty() {
                return err(lineno, format!("unknown instruction '{line}'"));
            }
            code.push_back(Instruction::Other(mnemonic.to_string()))
        };

        for label in pending_labels.drain(..) {
            if labels.insert(label.clone(), id).is_some() {
                return Err(Error::DuplicateLabel(label));
            }
        }
    }

    if !closed {
        return err(last_line, format!("unterminated method '{name}'"));
    }
    if let Some(label) = pending_labels.first() {
        return err(last_line, format!("label '{label}' has no instruction"));
    }

    let resolve = |label: &String| -> Result<InsnId> {
        labels
            .get(label)
            .copied()
            .ok_or_else(|| Error::UnknownLabel(label.clone()))
    };
    for (branch, label) in &branch_fixups {
        code.set_branch_target(*branch, resolve(label)?)?;
    }
    for [start, end, handler] in &catches {
        code.add_handler(resolve(start)?, resolve(end)?, resolve(handler)?)?;
    }

    class.methods.push(Method::new(name, MethodBody::new(code)));
    Ok(())
}

fn parse_literal(token: &str, lineno: usize) -> Result<ConstValue> {
    let invalid = || parse_error(lineno, format!("invalid literal '{token}'"));
    if let Some(rest) = token.strip_suffix(['L', 'l']) {
        rest.parse().map(ConstValue::Long).map_err(|_| invalid())
    } else if let Some(rest) = token.strip_suffix(['f', 'F']) {
        rest.parse().map(ConstValue::Float).map_err(|_| invalid())
    } else if let Some(rest) = token.strip_suffix(['d', 'D']) {
        rest.parse().map(ConstValue::Double).map_err(|_| invalid())
    } else {
        token.parse().map(ConstValue::Int).map_err(|_| invalid())
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(i) => &line[..i],
        None => line,
    }
}

fn parse_error(line: usize, message: String) -> Error {
    Error::Parse { line, message }
}

fn err<T>(line: usize, message: impl Into<String>) -> Result<T> {
    Err(Error::Parse {
        line,
        message: message.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::instruction::{BranchKind, CmpOp};

    #[test]
    fn parses_literals_and_slots() {
        let class = parse_class(
            "class T\nmethod main {\n    push 2\n    push 9L\n    push 2.5f\n    push 1.5d\n    store 3\n    return\n}\n",
        )
        .unwrap();
        let body = &class.method("main").unwrap().body;
        let insns: Vec<_> = body.code.iter().map(|(_, i)| i.clone()).collect();
        assert_eq!(insns[0], Instruction::Push(ConstValue::Int(2)));
        assert_eq!(insns[1], Instruction::Push(ConstValue::Long(9)));
        assert_eq!(insns[2], Instruction::Push(ConstValue::Float(2.5)));
        assert_eq!(insns[3], Instruction::Push(ConstValue::Double(1.5)));
        assert_eq!(insns[4], Instruction::Store(3));
        assert_eq!(insns[5], Instruction::Other("return".to_string()));
        // All four literals were interned on the way in.
        assert_eq!(class.pool.len(), 4);
    }

    #[test]
    fn resolves_forward_and_backward_labels() {
        let class = parse_class(
            "class T\nmethod main {\ntop:\n    load 0\n    push 10\n    if_icmplt done\n    goto top\ndone:\n    return\n}\n",
        )
        .unwrap();
        let body = &class.method("main").unwrap().body;
        let insns: Vec<_> = body.code.iter().collect();
        let (top_id, _) = insns[0];
        let (done_id, _) = insns[4];
        assert_eq!(
            insns[2].1,
            &Instruction::Branch {
                kind: BranchKind::IfCmp(CmpOp::Lt),
                target: done_id,
            }
        );
        assert_eq!(
            insns[3].1,
            &Instruction::Branch {
                kind: BranchKind::Goto,
                target: top_id,
            }
        );
        body.code.validate().unwrap();
    }

    #[test]
    fn parses_catch_entries() {
        let class = parse_class(
            "class T\nmethod main {\na:\n    push 1\nb:\n    pop\nh:\n    athrow\n    catch a b h\n}\n",
        )
        .unwrap();
        let body = &class.method("main").unwrap().body;
        assert_eq!(body.code.handlers().len(), 1);
        body.code.validate().unwrap();
    }

    #[test]
    fn rejects_unknown_label() {
        let res = parse_class("class T\nmethod main {\n    goto nowhere\n    return\n}\n");
        assert!(matches!(res, Err(Error::UnknownLabel(l)) if l == "nowhere"));
    }

    #[test]
    fn rejects_duplicate_label() {
        let res = parse_class("class T\nmethod main {\nx:\n    nop\nx:\n    return\n}\n");
        assert!(matches!(res, Err(Error::DuplicateLabel(l)) if l == "x"));
    }

    #[test]
    fn reports_line_numbers() {
        let res = parse_class("class T\nmethod main {\n    push\n}\n");
        assert!(matches!(res, Err(Error::Parse { line: 3, .. })));
    }

    #[test]
    fn rejects_trailing_label_and_unterminated_method() {
        assert!(parse_class("class T\nmethod main {\n    nop\nend:\n}\n").is_err());
        assert!(parse_class("class T\nmethod main {\n    nop\n").is_err());
    }
}
