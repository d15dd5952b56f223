//! `(2K+1)^D` sliding window with memoized convexity queries.

use crate::convexity::{ConvexityOracle, DigitalConvexity};
use crate::error::DomainError;
use crate::kernel::{GridSpace, HyperRectDomain, Integer, PointVector};

use super::cache::{LocalCache, LocalProperty};

/// Analyzes the convexity of a digital set X inside the `(2K+1)^D` window
/// centered on a movable point.
///
/// Invariants:
/// - `local_x` and `local_comp_x` partition the in-domain window points other
///   than the center, in raster order; both are rebuilt by `set_center` only.
/// - A memoized result refers to the current center; `set_center` clears them all.
/// - Queries never modify the partitions.
#[derive(Clone, Debug)]
pub struct NeighborhoodConvexityAnalyzer<const D: usize, const K: usize, O = DigitalConvexity<D>> {
    domain: HyperRectDomain<D>,
    oracle: O,
    center: Option<PointVector<D>>,
    center_in_x: bool,
    local_x: Vec<PointVector<D>>,
    local_comp_x: Vec<PointVector<D>>,
    cache: LocalCache,
}

impl<const D: usize, const K: usize> NeighborhoodConvexityAnalyzer<D, K> {
    /// Analyzer over the bounds of `space`, with the exact convexity oracle.
    pub fn new(space: GridSpace<D>) -> Self {
        Self::with_oracle(DigitalConvexity::new(space))
    }

    /// Analyzer over the domain `[lo, hi]`.
    pub fn from_bounds(lo: PointVector<D>, hi: PointVector<D>) -> Result<Self, DomainError> {
        Ok(Self::new(GridSpace::new(lo, hi)?))
    }
}

impl<const D: usize, const K: usize, O: ConvexityOracle<D>> NeighborhoodConvexityAnalyzer<D, K, O> {
    const RADIUS_IS_POSITIVE: () = assert!(K >= 1, "neighborhood parameter K must be at least 1");

    /// Analyzer using `oracle`; the domain is the oracle's space bounds.
    pub fn with_oracle(oracle: O) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::RADIUS_IS_POSITIVE;
        Self {
            domain: oracle.space().domain(),
            oracle,
            center: None,
            center_in_x: false,
            local_x: Vec::with_capacity(window_len(D, K)),
            local_comp_x: Vec::with_capacity(window_len(D, K)),
            cache: LocalCache::default(),
        }
    }

    #[inline]
    pub fn space(&self) -> &GridSpace<D> {
        self.oracle.space()
    }

    #[inline]
    pub fn domain(&self) -> &HyperRectDomain<D> {
        &self.domain
    }

    #[inline]
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// The parameter K: the window spans `2K+1` points per axis.
    #[inline]
    pub const fn size() -> usize {
        K
    }

    /// Current center, `None` before the first `set_center`.
    #[inline]
    pub fn center(&self) -> Option<PointVector<D>> {
        self.center
    }

    #[inline]
    pub fn is_center_in_x(&self) -> bool {
        self.center_in_x
    }

    /// Window points (center excluded) that belong to X.
    #[inline]
    pub fn local_x(&self) -> &[PointVector<D>] {
        &self.local_x
    }

    /// Window points (center excluded) that do not belong to X.
    #[inline]
    pub fn local_comp_x(&self) -> &[PointVector<D>] {
        &self.local_comp_x
    }

    /// Memoized value of `prop`, if it was computed for the current center.
    #[inline]
    pub fn cached(&self, prop: LocalProperty, with_center: bool) -> Option<bool> {
        self.cache.get(prop, with_center)
    }

    /// Moves the window to `c` on the set X given by its characteristic
    /// function `x`. All later results refer to this center.
    ///
    /// Window points outside the domain belong to neither partition; a center
    /// outside the domain is accepted and only sees the in-domain part of its
    /// window (possibly nothing).
    pub fn set_center<F>(&mut self, c: PointVector<D>, x: F)
    where
        F: Fn(&PointVector<D>) -> bool,
    {
        self.center = Some(c);
        self.center_in_x = x(&c);
        self.local_x.clear();
        self.local_comp_x.clear();
        let k = Integer::try_from(K).unwrap_or(Integer::MAX);
        let clipped = HyperRectDomain::around(c, k).and_then(|window| window.intersection(&self.domain));
        if let Some(window) = clipped {
            for p in window.iter().filter(|p| *p != c) {
                if x(&p) {
                    self.local_x.push(p);
                } else {
                    self.local_comp_x.push(p);
                }
            }
        }
        self.cache.clear();
        tracing::trace!(
            center = %c,
            in_x = self.center_in_x,
            local_x = self.local_x.len(),
            local_comp_x = self.local_comp_x.len(),
            "set_center"
        );
    }

    /// `true` iff the center is locally fully convex collapsible: the side of
    /// the partition the center belongs to is non-empty and fully convex both
    /// with and without the center.
    ///
    /// # Panics
    /// If `set_center` was never called.
    pub fn is_fully_convex_collapsible(&mut self) -> bool {
        self.current_center();
        if self.center_in_x {
            !self.local_x.is_empty() && self.is_fully_convex(true) && self.is_fully_convex(false)
        } else {
            !self.local_comp_x.is_empty()
                && self.is_complementary_fully_convex(true)
                && self.is_complementary_fully_convex(false)
        }
    }

    /// Full convexity of the part of X in the window (plus the center if `with_center`).
    ///
    /// # Panics
    /// If `set_center` was never called.
    pub fn is_fully_convex(&mut self, with_center: bool) -> bool {
        self.evaluate(LocalProperty::FullConvexity, with_center)
    }

    /// Full convexity of the part of the complement of X in the window.
    ///
    /// # Panics
    /// If `set_center` was never called.
    pub fn is_complementary_fully_convex(&mut self, with_center: bool) -> bool {
        self.evaluate(LocalProperty::ComplementFullConvexity, with_center)
    }

    /// 0-convexity of the part of X in the window.
    ///
    /// # Panics
    /// If `set_center` was never called.
    pub fn is_0_convex(&mut self, with_center: bool) -> bool {
        self.evaluate(LocalProperty::ZeroConvexity, with_center)
    }

    /// 0-convexity of the part of the complement of X in the window.
    ///
    /// # Panics
    /// If `set_center` was never called.
    pub fn is_complementary_0_convex(&mut self, with_center: bool) -> bool {
        self.evaluate(LocalProperty::ComplementZeroConvexity, with_center)
    }

    fn current_center(&self) -> PointVector<D> {
        match self.center {
            Some(c) => c,
            None => panic!("NeighborhoodConvexityAnalyzer: query before set_center"),
        }
    }

    fn evaluate(&mut self, prop: LocalProperty, with_center: bool) -> bool {
        if let Some(value) = self.cache.get(prop, with_center) {
            return value;
        }
        let center = self.current_center();
        let local = if prop.on_complement() {
            &self.local_comp_x
        } else {
            &self.local_x
        };
        let extended: Vec<PointVector<D>>;
        let points: &[PointVector<D>] = if with_center {
            extended = local.iter().copied().chain(std::iter::once(center)).collect();
            &extended
        } else {
            local
        };
        let value = if prop.is_full() {
            self.oracle.is_fully_convex(points)
        } else {
            self.oracle.is_0_convex(points)
        };
        self.cache.set(prop, with_center, value);
        value
    }
}

/// `(2k+1)^d - 1`: window points other than the center.
fn window_len(d: usize, k: usize) -> usize {
    (2 * k + 1).pow(d as u32) - 1
}
