//! Class-level fixed-point driver.
//!
//! Per method the passes run in a fixed order: simple folding, then
//! single-assignment propagation (if its branch-free guard allows), then
//! the dynamic scan. A changed method gets its metadata recomputed and
//! its body committed. The sweep over all methods repeats until one full
//! sweep changes nothing — a fold applied in one sweep can expose a
//! propagation opportunity that only a later sweep of the same method
//! sees, so a per-method fixed point is not enough.

use tracing::{debug, info};

use crate::bytecode::class::ClassModel;
use crate::error::Result;
use crate::fold::{const_vars, dynamic, simple};

/// What one [`optimize_class`] invocation did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimizeStats {
    /// Full sweeps over the class, including the final quiescent one.
    pub sweeps: usize,
    /// Method-sweeps in which the simple-fold pass changed something.
    pub simple_changes: usize,
    /// Method-sweeps in which single-assignment propagation changed something.
    pub const_var_changes: usize,
    /// Method-sweeps in which the dynamic scan changed something.
    pub dynamic_changes: usize,
    /// Method bodies committed.
    pub commits: usize,
}

impl OptimizeStats {
    pub fn changed(&self) -> bool {
        self.commits > 0
    }
}

/// Optimize every method of a class to a class-level fixed point.
pub fn optimize_class(class: &mut ClassModel) -> Result<OptimizeStats> {
    let mut stats = OptimizeStats::default();
    loop {
        stats.sweeps += 1;
        let mut sweep_changed = false;
        for method in &mut class.methods {
            if method.body.code.is_empty() {
                continue;
            }
            let mut body = std::mem::take(&mut method.body);
            let mut changed = false;
            if simple::run(&mut body, &mut class.pool)? {
                stats.simple_changes += 1;
                changed = true;
            }
            if const_vars::run(&mut body, &mut class.pool)? {
                stats.const_var_changes += 1;
                changed = true;
            }
            if dynamic::run(&mut body, &mut class.pool)? {
                stats.dynamic_changes += 1;
                changed = true;
            }
            if changed {
                body.recompute_metadata();
                method.commit(body);
                stats.commits += 1;
                sweep_changed = true;
                debug!(method = %method.name, "committed optimized body");
            } else {
                method.body = body;
            }
        }
        if !sweep_changed {
            break;
        }
    }
    info!(
        class = %class.name,
        sweeps = stats.sweeps,
        commits = stats.commits,
        "optimization reached fixed point"
    );
    Ok(stats)
}
