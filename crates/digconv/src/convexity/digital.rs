//! Digital convexity oracle: 0-convexity and full convexity of lattice sets.

use std::collections::HashSet;

use crate::error::DomainError;
use crate::kernel::{GridSpace, HyperRectDomain, PointVector};

use super::polytope::LatticePolytope;

/// Answers convexity questions on explicit, unordered point collections.
///
/// Duplicates in the input must not change the answer.
pub trait ConvexityOracle<const D: usize> {
    /// Space in which the checks are carried out.
    fn space(&self) -> &GridSpace<D>;
    /// Full convexity (strongest digital convexity; implies 0-convexity).
    fn is_fully_convex(&self, points: &[PointVector<D>]) -> bool;
    /// Digital 0-convexity: the set equals the lattice points of its hull.
    fn is_0_convex(&self, points: &[PointVector<D>]) -> bool;
}

/// Exact digital convexity checks over a bounded space.
///
/// - `X` is 0-convex iff `conv(X) ∩ Z^D = X`.
/// - `X` is fully convex iff `X ⊕ U_I` is 0-convex for every subset `I` of
///   axes, `U_I` being the unit cube `{0,1}^I` (morphological characterisation).
/// - The empty set is convex in both senses.
#[derive(Clone, Debug)]
pub struct DigitalConvexity<const D: usize> {
    space: GridSpace<D>,
}

impl<const D: usize> DigitalConvexity<D> {
    pub fn new(space: GridSpace<D>) -> Self {
        Self { space }
    }

    pub fn from_bounds(lo: PointVector<D>, hi: PointVector<D>) -> Result<Self, DomainError> {
        Ok(Self::new(GridSpace::new(lo, hi)?))
    }

    /// Convex hull of `points` as a lattice polytope.
    pub fn make_polytope(&self, points: &[PointVector<D>]) -> LatticePolytope<D> {
        LatticePolytope::from_points(points)
    }

    fn is_0_convex_set(set: &HashSet<PointVector<D>>) -> bool {
        if set.is_empty() {
            return true;
        }
        let pts: Vec<PointVector<D>> = set.iter().copied().collect();
        let poly = LatticePolytope::from_points(&pts);
        // conv(X) lies in the bounding box of X.
        match HyperRectDomain::bounding(&pts) {
            Some(bb) => bb.iter().all(|q| set.contains(&q) || !poly.contains(&q)),
            None => true,
        }
    }
}

impl<const D: usize> ConvexityOracle<D> for DigitalConvexity<D> {
    fn space(&self) -> &GridSpace<D> {
        &self.space
    }

    fn is_fully_convex(&self, points: &[PointVector<D>]) -> bool {
        debug_assert!(D < 32);
        let Some(bb) = HyperRectDomain::bounding(points) else {
            return true;
        };
        // Translation invariant: anchor at the origin so the dilations stay in range.
        let lower = bb.lower_bound();
        let base: HashSet<PointVector<D>> = points.iter().map(|p| p.saturating_sub(&lower)).collect();
        (0..1u32 << D).all(|mask| {
            let dilated = if mask == 0 {
                base.clone()
            } else {
                dilate_set(&base, mask)
            };
            Self::is_0_convex_set(&dilated)
        })
    }

    fn is_0_convex(&self, points: &[PointVector<D>]) -> bool {
        let set: HashSet<PointVector<D>> = points.iter().copied().collect();
        Self::is_0_convex_set(&set)
    }
}

fn dilate_set<const D: usize>(set: &HashSet<PointVector<D>>, axes_mask: u32) -> HashSet<PointVector<D>> {
    let mut out = set.clone();
    for axis in (0..D).filter(|&a| axes_mask & (1 << a) != 0) {
        let e = PointVector::base(axis);
        let shifted: Vec<PointVector<D>> = out.iter().map(|p| p.saturating_add(&e)).collect();
        out.extend(shifted);
    }
    out
}

/// Minkowski sum `X ⊕ U_I` with the unit cube on the axes set in `axes_mask`,
/// sorted and without duplicates.
pub fn unit_dilation<const D: usize>(points: &[PointVector<D>], axes_mask: u32) -> Vec<PointVector<D>> {
    let set: HashSet<PointVector<D>> = points.iter().copied().collect();
    let mut out: Vec<PointVector<D>> = dilate_set(&set, axes_mask).into_iter().collect();
    out.sort_unstable();
    out
}
