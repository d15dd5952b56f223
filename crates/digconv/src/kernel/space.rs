//! Bounded digital space shared by the convexity oracle and the analyzer.

use crate::error::DomainError;

use super::domain::HyperRectDomain;
use super::point::PointVector;

/// Digital space `Z^D` restricted to a bounding box.
///
/// Computations (convexity checks, neighborhoods) are carried out inside these
/// bounds; the space itself holds no point set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSpace<const D: usize> {
    bounds: HyperRectDomain<D>,
}

impl<const D: usize> GridSpace<D> {
    pub fn new(lower: PointVector<D>, upper: PointVector<D>) -> Result<Self, DomainError> {
        Ok(Self {
            bounds: HyperRectDomain::new(lower, upper)?,
        })
    }

    #[inline]
    pub fn from_domain(bounds: HyperRectDomain<D>) -> Self {
        Self { bounds }
    }

    #[inline]
    pub const fn dimension() -> usize {
        D
    }

    #[inline]
    pub fn lower_bound(&self) -> PointVector<D> {
        self.bounds.lower_bound()
    }

    #[inline]
    pub fn upper_bound(&self) -> PointVector<D> {
        self.bounds.upper_bound()
    }

    #[inline]
    pub fn domain(&self) -> HyperRectDomain<D> {
        self.bounds
    }

    #[inline]
    pub fn contains(&self, p: &PointVector<D>) -> bool {
        self.bounds.contains(p)
    }
}
