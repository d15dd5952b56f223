//! Axis-aligned bounded domains of the lattice.

use crate::error::DomainError;

use super::point::{Integer, PointVector};

/// Inclusive box `[lower, upper]` of lattice points.
///
/// Invariant: `lower[i] <= upper[i]` on every axis, so a domain is never empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HyperRectDomain<const D: usize> {
    lower: PointVector<D>,
    upper: PointVector<D>,
}

impl<const D: usize> HyperRectDomain<D> {
    pub fn new(lower: PointVector<D>, upper: PointVector<D>) -> Result<Self, DomainError> {
        for axis in 0..D {
            if lower[axis] > upper[axis] {
                return Err(DomainError::InvertedBounds {
                    axis,
                    lower: lower[axis],
                    upper: upper[axis],
                });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Tight bounding box of `points`; `None` for an empty slice.
    pub fn bounding(points: &[PointVector<D>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (lower, upper) = rest
            .iter()
            .fold((*first, *first), |(lo, hi), p| (lo.inf(p), hi.sup(p)));
        Some(Self { lower, upper })
    }

    #[inline]
    pub fn lower_bound(&self) -> PointVector<D> {
        self.lower
    }

    #[inline]
    pub fn upper_bound(&self) -> PointVector<D> {
        self.upper
    }

    #[inline]
    pub fn contains(&self, p: &PointVector<D>) -> bool {
        self.lower.is_lower(p) && p.is_lower(&self.upper)
    }

    /// Number of lattice points along each axis.
    pub fn extent(&self) -> [usize; D] {
        std::array::from_fn(|i| (i64::from(self.upper[i]) - i64::from(self.lower[i]) + 1) as usize)
    }

    /// Number of lattice points in the domain.
    pub fn size(&self) -> usize {
        self.extent().iter().product()
    }

    /// Common part of two domains, `None` when they do not overlap.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        Self::new(self.lower.sup(&other.lower), self.upper.inf(&other.upper)).ok()
    }

    /// Domain grown by `r` on every side (shrunk for negative `r`), clamped to
    /// the `Integer` range.
    pub fn dilate(&self, r: Integer) -> Option<Self> {
        let d = PointVector::diagonal(r);
        Self::new(self.lower.saturating_sub(&d), self.upper.saturating_add(&d)).ok()
    }

    /// Box of radius `r >= 0` around `c`, clamped to the `Integer` range.
    pub fn around(c: PointVector<D>, r: Integer) -> Option<Self> {
        Self::new(c, c).ok()?.dilate(r)
    }

    /// Raster iteration, first axis varying fastest.
    pub fn iter(&self) -> DomainIter<D> {
        DomainIter {
            lower: self.lower,
            upper: self.upper,
            next: Some(self.lower),
        }
    }
}

impl<'a, const D: usize> IntoIterator for &'a HyperRectDomain<D> {
    type Item = PointVector<D>;
    type IntoIter = DomainIter<D>;
    fn into_iter(self) -> DomainIter<D> {
        self.iter()
    }
}

/// Iterator over the points of a [`HyperRectDomain`].
#[derive(Clone, Debug)]
pub struct DomainIter<const D: usize> {
    lower: PointVector<D>,
    upper: PointVector<D>,
    next: Option<PointVector<D>>,
}

impl<const D: usize> Iterator for DomainIter<D> {
    type Item = PointVector<D>;

    fn next(&mut self) -> Option<PointVector<D>> {
        let current = self.next?;
        let mut succ = current;
        self.next = None;
        for axis in 0..D {
            if succ[axis] < self.upper[axis] {
                succ[axis] += 1;
                self.next = Some(succ);
                break;
            }
            succ[axis] = self.lower[axis];
        }
        Some(current)
    }
}
