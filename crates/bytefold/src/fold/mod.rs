pub mod arith;
pub mod const_vars;
pub mod driver;
pub mod dynamic;
pub mod simple;

pub use driver::{OptimizeStats, optimize_class};
