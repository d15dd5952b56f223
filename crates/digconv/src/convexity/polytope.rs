//! Exact lattice polytopes: H-representation of the convex hull of lattice points.
//!
//! Algorithm
//! - Deduplicate the input and compute its affine hull with an incremental
//!   fraction-free echelon basis (exact, `i128`).
//! - Work in the chart `p ↦ (p - origin)[axes]`, where `axes` are the pivot
//!   columns of the basis. The chart is injective on the affine hull, so the
//!   hull of a degenerate set (segment in 2D, triangle in 3D, ...) is
//!   full-dimensional in its chart.
//! - Drop points that are midpoints of two others (never vertices).
//! - Enumerate `r`-subsets of the remaining chart points (`r` = affine dimension); each
//!   subset spans a candidate hyperplane whose normal is the cofactor vector
//!   of its edge matrix. Keep the planes with every point on one side,
//!   oriented so that `n·x <= c`, reduced by gcd and deduplicated.
//!
//! Complexity is `O(m^2)` for the pruning plus `O(C(v, r) · v · r)` for the
//! `v` surviving points. This is meant for neighborhood-sized inputs (a few
//! hundred points), not for large clouds.

use std::collections::HashSet;

use crate::kernel::{HyperRectDomain, Integer, PointVector};

use super::util::{cofactor_normal, dot, for_each_combination, reduce_by_gcd, Echelon};

/// Closed lattice half-space `n · x <= c` in chart coordinates.
///
/// Invariants:
/// - `n` is primitive (gcd of its entries is 1) and non-zero.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LatticeHs {
    pub n: Vec<i128>,
    pub c: i128,
}

impl LatticeHs {
    #[inline]
    pub fn satisfies(&self, x: &[i128]) -> bool {
        dot(&self.n, x) <= self.c
    }
}

/// Convex hull of a finite lattice point set, kept in H-representation.
#[derive(Clone, Debug)]
pub struct LatticePolytope<const D: usize> {
    origin: Option<PointVector<D>>,
    span: Echelon,
    hs: Vec<LatticeHs>,
    bbox: Option<HyperRectDomain<D>>,
}

impl<const D: usize> Default for LatticePolytope<D> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<const D: usize> LatticePolytope<D> {
    pub fn empty() -> Self {
        Self {
            origin: None,
            span: Echelon::default(),
            hs: Vec::new(),
            bbox: None,
        }
    }

    /// Tightest polytope containing `points` (duplicates are allowed).
    pub fn from_points(points: &[PointVector<D>]) -> Self {
        let mut pts = points.to_vec();
        pts.sort_unstable();
        pts.dedup();
        let Some(&origin) = pts.first() else {
            return Self::empty();
        };
        let mut span = Echelon::default();
        for p in &pts[1..] {
            if span.rank() == D {
                break;
            }
            span.insert(&offset(p, &origin));
        }
        let axes = span.pivots().to_vec();
        let chart: Vec<Vec<i128>> = vertex_candidates(&pts)
            .iter()
            .map(|p| {
                let d = offset(p, &origin);
                axes.iter().map(|&a| d[a]).collect()
            })
            .collect();
        let hs = supporting_halfspaces(&chart, axes.len());
        Self {
            origin: Some(origin),
            span,
            hs,
            bbox: HyperRectDomain::bounding(&pts),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.origin.is_none()
    }

    /// Affine dimension of the hull, `None` when empty.
    pub fn dimension(&self) -> Option<usize> {
        self.origin.map(|_| self.span.rank())
    }

    pub fn is_full_dimensional(&self) -> bool {
        self.dimension() == Some(D)
    }

    /// Facet inequalities, expressed in the chart described by [`Self::chart_axes`].
    pub fn halfspaces(&self) -> &[LatticeHs] {
        &self.hs
    }

    /// Axes kept by the chart `p ↦ (p - origin)[axes]`.
    pub fn chart_axes(&self) -> &[usize] {
        self.span.pivots()
    }

    /// Smallest input point; chart origin.
    pub fn origin(&self) -> Option<PointVector<D>> {
        self.origin
    }

    /// Bounding box of the input points (hence of the hull).
    pub fn bounding_domain(&self) -> Option<&HyperRectDomain<D>> {
        self.bbox.as_ref()
    }

    pub fn contains(&self, p: &PointVector<D>) -> bool {
        let Some(origin) = self.origin else {
            return false;
        };
        let d = offset(p, &origin);
        if !self.span.contains(&d) {
            return false;
        }
        let x: Vec<i128> = self.span.pivots().iter().map(|&a| d[a]).collect();
        self.hs.iter().all(|h| h.satisfies(&x))
    }

    /// Lattice points of the hull, in raster order.
    pub fn lattice_points(&self) -> Vec<PointVector<D>> {
        match &self.bbox {
            Some(bb) => bb.iter().filter(|p| self.contains(p)).collect(),
            None => Vec::new(),
        }
    }

    /// Number of lattice points of the hull.
    pub fn count(&self) -> usize {
        self.lattice_points().len()
    }
}

/// Points of `pts` that are not the midpoint of two other points of `pts`.
///
/// A midpoint lies strictly inside a segment of the set, so it is never a
/// vertex and dropping it leaves the hull unchanged. On window-sized blocks
/// this keeps little more than the corners.
fn vertex_candidates<const D: usize>(pts: &[PointVector<D>]) -> Vec<PointVector<D>> {
    let all: HashSet<PointVector<D>> = pts.iter().copied().collect();
    let mut inner = HashSet::new();
    for (i, a) in pts.iter().enumerate() {
        for b in &pts[i + 1..] {
            let sum: [i64; D] = std::array::from_fn(|k| i64::from(a[k]) + i64::from(b[k]));
            if sum.iter().any(|x| x % 2 != 0) {
                continue;
            }
            let mid = PointVector::new(sum.map(|x| (x / 2) as Integer));
            if all.contains(&mid) {
                inner.insert(mid);
            }
        }
    }
    pts.iter().copied().filter(|p| !inner.contains(p)).collect()
}

fn offset<const D: usize>(p: &PointVector<D>, origin: &PointVector<D>) -> Vec<i128> {
    p.iter()
        .zip(origin.iter())
        .map(|(&a, &b)| i128::from(a) - i128::from(b))
        .collect()
}

/// Supporting half-spaces of the full-dimensional point set `pts` in `Z^r`.
fn supporting_halfspaces(pts: &[Vec<i128>], r: usize) -> Vec<LatticeHs> {
    let mut out = Vec::new();
    if r == 0 {
        return out;
    }
    let mut seen = HashSet::new();
    for_each_combination(pts.len(), r, |idx| {
        let base = &pts[idx[0]];
        let rows: Vec<Vec<i128>> = idx[1..]
            .iter()
            .map(|&j| pts[j].iter().zip(base).map(|(a, b)| a - b).collect())
            .collect();
        let mut n = cofactor_normal(&rows, r);
        if n.iter().all(|&x| x == 0) {
            return;
        }
        let c = dot(&n, base);
        let (mut below, mut above) = (true, true);
        for q in pts {
            let v = dot(&n, q);
            below &= v <= c;
            above &= v >= c;
            if !below && !above {
                return;
            }
        }
        // orient so that all points satisfy n·x <= c (outward normal)
        let mut c = c;
        if !below {
            n.iter_mut().for_each(|x| *x = -*x);
            c = -c;
        }
        let g = reduce_by_gcd(&mut n);
        if g > 1 {
            c /= g;
        }
        let h = LatticeHs { n, c };
        if seen.insert(h.clone()) {
            out.push(h);
        }
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::Point3;
    use proptest::prelude::*;

    fn block3(lo: i32, hi: i32) -> Vec<Point3> {
        HyperRectDomain::new(Point3::diagonal(lo), Point3::diagonal(hi))
            .unwrap()
            .iter()
            .collect()
    }

    /// Supporting half-spaces computed from every input point, without pruning.
    fn all_point_halfspaces<const D: usize>(pts: &[PointVector<D>]) -> HashSet<LatticeHs> {
        let poly = LatticePolytope::from_points(pts);
        let Some(origin) = poly.origin() else {
            return HashSet::new();
        };
        let axes = poly.chart_axes().to_vec();
        let chart: Vec<Vec<i128>> = pts
            .iter()
            .map(|p| {
                let d = offset(p, &origin);
                axes.iter().map(|&a| d[a]).collect()
            })
            .collect();
        supporting_halfspaces(&chart, axes.len()).into_iter().collect()
    }

    #[test]
    fn block_keeps_only_its_corners() {
        let cube = block3(0, 4);
        let kept = vertex_candidates(&cube);
        assert_eq!(kept.len(), 8);
        assert!(kept.iter().all(|p| p.iter().all(|&x| x == 0 || x == 4)));
    }

    #[test]
    fn window_sized_cube_hull() {
        let mut ring = block3(3, 7);
        ring.retain(|p| *p != Point3::diagonal(5));
        let poly = LatticePolytope::from_points(&ring);
        assert_eq!(poly.halfspaces().len(), 6);
        assert_eq!(poly.count(), 125);
        assert!(poly.contains(&Point3::diagonal(5)));
    }

    proptest! {
        #[test]
        fn pruning_keeps_the_facets(
            pts in prop::collection::vec((0i32..3, 0i32..3, 0i32..3).prop_map(|(x, y, z)| Point3::new([x, y, z])), 1..10)
        ) {
            let poly = LatticePolytope::from_points(&pts);
            let facets: HashSet<LatticeHs> = poly.halfspaces().iter().cloned().collect();
            prop_assert_eq!(facets, all_point_halfspaces(&pts));
        }
    }
}
