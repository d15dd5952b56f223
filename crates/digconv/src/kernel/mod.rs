//! Lattice kernel: points, bounded domains and the digital space.
//!
//! Conventions
//! - Coordinates are `i32` (`Integer`); derived quantities that may overflow
//!   (dot products, norms, determinants) are widened to `i64`/`i128`.
//! - Domains are inclusive boxes and iterate in raster order with the first
//!   axis varying fastest. Every window traversal in the crate reuses this order.

mod domain;
mod point;
mod space;

pub use domain::{DomainIter, HyperRectDomain};
pub use point::{Integer, NormType, Point2, Point3, PointVector};
pub use space::GridSpace;
