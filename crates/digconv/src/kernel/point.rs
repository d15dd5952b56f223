//! Lattice points and vectors of fixed dimension.
//!
//! `PointVector<D>` plays both roles (point and displacement), like the
//! lattice kernel it models: the arithmetic is component-wise and the
//! ordering is lexicographic, so point sets can be sorted and deduplicated.

use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Neg, Sub, SubAssign};

use nalgebra::SVector;

/// Scalar type of lattice coordinates.
pub type Integer = i32;

/// Norms available on lattice vectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NormType {
    L1,
    L2,
    LInfinity,
}

/// Integer point (or vector) of the lattice `Z^D`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointVector<const D: usize> {
    c: [Integer; D],
}

pub type Point2 = PointVector<2>;
pub type Point3 = PointVector<3>;

impl<const D: usize> PointVector<D> {
    #[inline]
    pub const fn new(c: [Integer; D]) -> Self {
        Self { c }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { c: [0; D] }
    }

    /// All coordinates equal to `v`.
    #[inline]
    pub const fn diagonal(v: Integer) -> Self {
        Self { c: [v; D] }
    }

    /// Unit vector along `axis`.
    ///
    /// Panics if `axis >= D`.
    #[inline]
    pub fn base(axis: usize) -> Self {
        let mut p = Self::zero();
        p.c[axis] = 1;
        p
    }

    #[inline]
    pub const fn dimension() -> usize {
        D
    }

    #[inline]
    pub fn coords(&self) -> &[Integer; D] {
        &self.c
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Integer> {
        self.c.iter()
    }

    /// Component-wise minimum.
    #[inline]
    pub fn inf(&self, other: &Self) -> Self {
        Self::new(std::array::from_fn(|i| self.c[i].min(other.c[i])))
    }

    /// Component-wise maximum.
    #[inline]
    pub fn sup(&self, other: &Self) -> Self {
        Self::new(std::array::from_fn(|i| self.c[i].max(other.c[i])))
    }

    /// `true` iff every coordinate is `<=` the matching one of `other`.
    #[inline]
    pub fn is_lower(&self, other: &Self) -> bool {
        self.c.iter().zip(other.c.iter()).all(|(a, b)| a <= b)
    }

    /// Component-wise sum clamped to the `Integer` range.
    #[inline]
    pub fn saturating_add(&self, other: &Self) -> Self {
        Self::new(std::array::from_fn(|i| self.c[i].saturating_add(other.c[i])))
    }

    /// Component-wise difference clamped to the `Integer` range.
    #[inline]
    pub fn saturating_sub(&self, other: &Self) -> Self {
        Self::new(std::array::from_fn(|i| self.c[i].saturating_sub(other.c[i])))
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> i64 {
        self.c
            .iter()
            .zip(other.c.iter())
            .map(|(&a, &b)| i64::from(a) * i64::from(b))
            .sum()
    }

    #[inline]
    pub fn norm1(&self) -> i64 {
        self.c.iter().map(|&x| i64::from(x).abs()).sum()
    }

    #[inline]
    pub fn norm_infinity(&self) -> i64 {
        self.c.iter().map(|&x| i64::from(x).abs()).max().unwrap_or(0)
    }

    /// Euclidean norm.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.to_real().norm()
    }

    pub fn norm_of(&self, kind: NormType) -> f64 {
        match kind {
            NormType::L1 => self.norm1() as f64,
            NormType::L2 => self.norm(),
            NormType::LInfinity => self.norm_infinity() as f64,
        }
    }

    /// Real embedding of the point.
    #[inline]
    pub fn to_real(&self) -> SVector<f64, D> {
        SVector::<f64, D>::from_fn(|i, _| f64::from(self.c[i]))
    }
}

impl<const D: usize> Default for PointVector<D> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const D: usize> From<[Integer; D]> for PointVector<D> {
    #[inline]
    fn from(c: [Integer; D]) -> Self {
        Self::new(c)
    }
}

impl<const D: usize> Index<usize> for PointVector<D> {
    type Output = Integer;
    #[inline]
    fn index(&self, i: usize) -> &Integer {
        &self.c[i]
    }
}

impl<const D: usize> IndexMut<usize> for PointVector<D> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Integer {
        &mut self.c[i]
    }
}

impl<const D: usize> Add for PointVector<D> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(std::array::from_fn(|i| self.c[i] + rhs.c[i]))
    }
}

impl<const D: usize> Sub for PointVector<D> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(std::array::from_fn(|i| self.c[i] - rhs.c[i]))
    }
}

impl<const D: usize> Neg for PointVector<D> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(self.c.map(|x| -x))
    }
}

impl<const D: usize> Mul<Integer> for PointVector<D> {
    type Output = Self;
    #[inline]
    fn mul(self, k: Integer) -> Self {
        Self::new(self.c.map(|x| x * k))
    }
}

impl<const D: usize> AddAssign for PointVector<D> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.c.iter_mut().zip(rhs.c) {
            *a += b;
        }
    }
}

impl<const D: usize> SubAssign for PointVector<D> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        for (a, b) in self.c.iter_mut().zip(rhs.c) {
            *a -= b;
        }
    }
}

impl<const D: usize> fmt::Display for PointVector<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.c.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, "]")
    }
}
