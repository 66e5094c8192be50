//! Arena-backed instruction list with stable handles and targeter relinking.
//!
//! Instructions live in a `Vec` arena and are threaded into a doubly
//! linked sequence, so a handle stays valid across unrelated insertions
//! and deletions. Every reference *to* an instruction — a branch target
//! or an exception-handler boundary — is mirrored in a side table of
//! targeters. Deleting an instruction must leave no reference dangling:
//! [`InstructionList::delete`] redirects every targeter to a replacement
//! before unlinking the node, and fails if no live replacement exists.

use std::collections::HashMap;

use crate::bytecode::instruction::{BranchKind, Instruction};
use crate::error::{Error, Result};

/// Stable handle to one instruction in a list's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InsnId(u32);

impl InsnId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One reference to an instruction, recorded in the side table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Targeter {
    /// A branch instruction whose target field names the instruction.
    Branch(InsnId),
    /// Start of exception-handler range `n`.
    HandlerStart(usize),
    /// End of exception-handler range `n`.
    HandlerEnd(usize),
    /// Entry point of exception-handler range `n`.
    HandlerEntry(usize),
}

/// One exception-handler table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerRange {
    pub start: InsnId,
    pub end: InsnId,
    pub handler: InsnId,
}

#[derive(Debug, Clone)]
struct Node {
    insn: Instruction,
    prev: Option<InsnId>,
    next: Option<InsnId>,
    live: bool,
}

#[derive(Debug, Clone, Default)]
pub struct InstructionList {
    nodes: Vec<Node>,
    head: Option<InsnId>,
    tail: Option<InsnId>,
    len: usize,
    targeters: HashMap<InsnId, Vec<Targeter>>,
    handlers: Vec<HandlerRange>,
}

impl InstructionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn first(&self) -> Option<InsnId> {
        self.head
    }

    pub fn last(&self) -> Option<InsnId> {
        self.tail
    }

    fn is_live(&self, id: InsnId) -> bool {
        self.nodes.get(id.index()).is_some_and(|n| n.live)
    }

    fn node(&self, id: InsnId) -> Result<&Node> {
        self.nodes
            .get(id.index())
            .filter(|n| n.live)
            .ok_or(Error::InvalidHandle)
    }

    pub fn get(&self, id: InsnId) -> Option<&Instruction> {
        self.node(id).ok().map(|n| &n.insn)
    }

    pub fn next(&self, id: InsnId) -> Option<InsnId> {
        self.node(id).ok().and_then(|n| n.next)
    }

    pub fn prev(&self, id: InsnId) -> Option<InsnId> {
        self.node(id).ok().and_then(|n| n.prev)
    }

    /// Iterate live instructions in sequence order.
    pub fn iter(&self) -> impl Iterator<Item = (InsnId, &Instruction)> {
        let mut cur = self.head;
        std::iter::from_fn(move || {
            let id = cur?;
            cur = self.nodes[id.index()].next;
            Some((id, &self.nodes[id.index()].insn))
        })
    }

    /// Snapshot of live handles in sequence order.
    ///
    /// Passes that mutate while walking take this snapshot first; handles
    /// of instructions they delete simply stop resolving.
    pub fn ids(&self) -> Vec<InsnId> {
        self.iter().map(|(id, _)| id).collect()
    }

    pub fn handlers(&self) -> &[HandlerRange] {
        &self.handlers
    }

    pub fn targeters_of(&self, id: InsnId) -> &[Targeter] {
        self.targeters.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Append an instruction. A `Branch` registers itself as a targeter
    /// of its target.
    pub fn push_back(&mut self, insn: Instruction) -> InsnId {
        let id = InsnId(self.nodes.len() as u32);
        let prev = self.tail;
        self.nodes.push(Node {
            insn,
            prev,
            next: None,
            live: true,
        });
        match prev {
            Some(p) => self.nodes[p.index()].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        self.register_branch(id);
        id
    }

    /// Append a branch that temporarily targets itself.
    ///
    /// Used while assembling, before labels are resolvable; the caller
    /// must follow up with [`InstructionList::set_branch_target`].
    pub fn push_back_branch(&mut self, kind: BranchKind) -> InsnId {
        let id = InsnId(self.nodes.len() as u32);
        self.push_back(Instruction::Branch { kind, target: id })
    }

    /// Insert an instruction immediately before `at`.
    pub fn insert_before(&mut self, at: InsnId, insn: Instruction) -> Result<InsnId> {
        self.node(at)?;
        let id = InsnId(self.nodes.len() as u32);
        let prev = self.nodes[at.index()].prev;
        self.nodes.push(Node {
            insn,
            prev,
            next: Some(at),
            live: true,
        });
        match prev {
            Some(p) => self.nodes[p.index()].next = Some(id),
            None => self.head = Some(id),
        }
        self.nodes[at.index()].prev = Some(id);
        self.len += 1;
        self.register_branch(id);
        Ok(id)
    }

    /// Retarget a branch, keeping the side table consistent.
    pub fn set_branch_target(&mut self, branch: InsnId, target: InsnId) -> Result<()> {
        self.node(target)?;
        let old = match &self.node(branch)?.insn {
            Instruction::Branch { target, .. } => *target,
            _ => return Err(Error::InvalidHandle),
        };
        if old == target {
            return Ok(());
        }
        self.remove_targeter(old, Targeter::Branch(branch));
        if let Instruction::Branch { target: t, .. } = &mut self.nodes[branch.index()].insn {
            *t = target;
        }
        self.targeters.entry(target).or_default().push(Targeter::Branch(branch));
        Ok(())
    }

    /// Register an exception-handler range over live instructions.
    pub fn add_handler(&mut self, start: InsnId, end: InsnId, handler: InsnId) -> Result<usize> {
        for id in [start, end, handler] {
            self.node(id)?;
        }
        let idx = self.handlers.len();
        self.handlers.push(HandlerRange { start, end, handler });
        self.targeters.entry(start).or_default().push(Targeter::HandlerStart(idx));
        self.targeters.entry(end).or_default().push(Targeter::HandlerEnd(idx));
        self.targeters
            .entry(handler)
            .or_default()
            .push(Targeter::HandlerEntry(idx));
        Ok(idx)
    }

    /// Delete an instruction, redirecting every targeter to a live node.
    ///
    /// Targeters move to `redirect` when given (a pass that replaced the
    /// deleted instruction passes its replacement), otherwise to the
    /// nearest surviving successor. A targeted instruction with neither is
    /// [`Error::RelinkLostTarget`]: that state must never be reachable
    /// under correct pass ordering, but it is checked, not assumed.
    pub fn delete(&mut self, id: InsnId, redirect: Option<InsnId>) -> Result<()> {
        self.node(id)?;
        let prev = self.nodes[id.index()].prev;
        let next = self.nodes[id.index()].next;
        let own_target = match &self.nodes[id.index()].insn {
            Instruction::Branch { target, .. } => Some(*target),
            _ => None,
        };

        // Decide the replacement before mutating anything, so a failed
        // delete leaves the list untouched. The deleted instruction's own
        // self-reference (a branch targeting itself) dies with it and does
        // not force a relink.
        let mut pending = self.targeters.get(&id).cloned().unwrap_or_default();
        if own_target == Some(id)
            && let Some(pos) = pending.iter().position(|t| *t == Targeter::Branch(id))
        {
            pending.swap_remove(pos);
        }
        let to = if pending.is_empty() {
            None
        } else {
            let to = redirect.or(next).ok_or(Error::RelinkLostTarget)?;
            if to == id || !self.is_live(to) {
                return Err(Error::RelinkLostTarget);
            }
            Some(to)
        };

        // The deleted branch no longer targets anything.
        if let Some(target) = own_target {
            self.remove_targeter(target, Targeter::Branch(id));
        }
        self.targeters.remove(&id);
        if let Some(to) = to {
            for t in pending {
                match t {
                    Targeter::Branch(b) => {
                        if let Instruction::Branch { target, .. } = &mut self.nodes[b.index()].insn
                        {
                            *target = to;
                        }
                    }
                    Targeter::HandlerStart(h) => self.handlers[h].start = to,
                    Targeter::HandlerEnd(h) => self.handlers[h].end = to,
                    Targeter::HandlerEntry(h) => self.handlers[h].handler = to,
                }
                self.targeters.entry(to).or_default().push(t);
            }
        }

        match prev {
            Some(p) => self.nodes[p.index()].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n.index()].prev = prev,
            None => self.tail = prev,
        }
        let node = &mut self.nodes[id.index()];
        node.live = false;
        node.prev = None;
        node.next = None;
        self.len -= 1;
        Ok(())
    }

    /// Check that every branch target and handler boundary is live.
    pub fn validate(&self) -> Result<()> {
        for (_, insn) in self.iter() {
            if let Some(t) = insn.branch_target()
                && !self.is_live(t)
            {
                return Err(Error::RelinkLostTarget);
            }
        }
        for h in &self.handlers {
            if !(self.is_live(h.start) && self.is_live(h.end) && self.is_live(h.handler)) {
                return Err(Error::RelinkLostTarget);
            }
        }
        Ok(())
    }

    fn register_branch(&mut self, id: InsnId) {
        if let Instruction::Branch { target, .. } = &self.nodes[id.index()].insn {
            let target = *target;
            self.targeters.entry(target).or_default().push(Targeter::Branch(id));
        }
    }

    fn remove_targeter(&mut self, target: InsnId, t: Targeter) {
        if let Some(list) = self.targeters.get_mut(&target) {
            if let Some(pos) = list.iter().position(|x| *x == t) {
                list.swap_remove(pos);
            }
            if list.is_empty() {
                self.targeters.remove(&target);
            }
        }
    }
}
