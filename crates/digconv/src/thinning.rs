//! Sequential thinning by fully convex collapsible points.
//!
//! Each pass visits the points of the set in lexicographic order and removes
//! every point whose window is fully convex collapsible at the time it is
//! visited, so later decisions see earlier removals. Passes repeat until one
//! removes nothing (or the pass budget is spent).

use std::collections::BTreeSet;

use crate::convexity::ConvexityOracle;
use crate::kernel::PointVector;
use crate::neighborhood::NeighborhoodConvexityAnalyzer;

/// Thinning configuration.
#[derive(Clone, Debug)]
pub struct ThinningCfg<const D: usize> {
    pub max_passes: usize,
    /// Points that are never removed.
    pub anchors: BTreeSet<PointVector<D>>,
}

impl<const D: usize> Default for ThinningCfg<D> {
    fn default() -> Self {
        Self {
            max_passes: 64,
            anchors: BTreeSet::new(),
        }
    }
}

/// Outcome of a thinning run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThinningReport {
    /// Points removed by each pass, the last entry being 0 unless the budget ran out.
    pub removed_per_pass: Vec<usize>,
    pub remaining: usize,
}

impl ThinningReport {
    pub fn passes(&self) -> usize {
        self.removed_per_pass.len()
    }

    pub fn removed(&self) -> usize {
        self.removed_per_pass.iter().sum()
    }

    /// `true` when the last pass removed nothing.
    pub fn converged(&self) -> bool {
        self.removed_per_pass.last() == Some(&0)
    }
}

/// Thins `set` in place; see the module docs for the visiting order.
pub fn collapse_fully_convex<const D: usize, const K: usize, O>(
    analyzer: &mut NeighborhoodConvexityAnalyzer<D, K, O>,
    set: &mut BTreeSet<PointVector<D>>,
    cfg: &ThinningCfg<D>,
) -> ThinningReport
where
    O: ConvexityOracle<D>,
{
    let mut report = ThinningReport::default();
    for pass in 0..cfg.max_passes {
        let order: Vec<PointVector<D>> = set.iter().copied().collect();
        let mut removed = 0;
        for p in order {
            if cfg.anchors.contains(&p) {
                continue;
            }
            analyzer.set_center(p, |q| set.contains(q));
            if analyzer.is_fully_convex_collapsible() {
                set.remove(&p);
                removed += 1;
            }
        }
        report.removed_per_pass.push(removed);
        tracing::debug!(pass, removed, remaining = set.len(), "thinning pass");
        if removed == 0 {
            break;
        }
    }
    report.remaining = set.len();
    report
}
