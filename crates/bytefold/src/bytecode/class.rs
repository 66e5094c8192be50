use crate::bytecode::method::MethodBody;
use crate::bytecode::pool::ConstantPool;

#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,
    pub body: MethodBody,
}

impl Method {
    pub fn new(name: impl Into<String>, body: MethodBody) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }

    /// Replace this method's body with an optimized one.
    ///
    /// The caller is expected to have recomputed the body's metadata; the
    /// driver does so before every commit.
    pub fn commit(&mut self, body: MethodBody) {
        self.body = body;
    }
}

/// In-memory class representation: one shared constant pool, any number
/// of methods. Owned exclusively by one optimize invocation at a time.
#[derive(Debug, Clone, Default)]
pub struct ClassModel {
    pub name: String,
    pub pool: ConstantPool,
    pub methods: Vec<Method>,
}

impl ClassModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pool: ConstantPool::new(),
            methods: Vec::new(),
        }
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }
}
