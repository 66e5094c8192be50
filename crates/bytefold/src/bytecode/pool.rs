use std::collections::HashMap;

use crate::value::ConstValue;

/// Index of an interned literal in a class's constant pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CpIndex(pub u32);

/// Interning table of literal values.
///
/// Every folded result is interned here before its push is emitted, so a
/// value produced many times across a class occupies one entry. Lookup is
/// by kind tag plus bit pattern, keeping `0.0` and `-0.0` (and NaN
/// payloads) as distinct entries.
#[derive(Debug, Clone, Default)]
pub struct ConstantPool {
    entries: Vec<ConstValue>,
    index: HashMap<(u8, u64), u32>,
}

impl ConstantPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, value: ConstValue) -> CpIndex {
        let key = value.bits();
        if let Some(&i) = self.index.get(&key) {
            return CpIndex(i);
        }
        let i = self.entries.len() as u32;
        self.entries.push(value);
        self.index.insert(key, i);
        CpIndex(i)
    }

    pub fn get(&self, index: CpIndex) -> Option<ConstValue> {
        self.entries.get(index.0 as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
