//! Digital convexity on lattice sets and neighborhood-based thinning.
//!
//! Layout
//! - `kernel`: lattice points, bounded domains, the digital space.
//! - `convexity`: exact 0-convexity / full convexity oracle and lattice polytopes.
//! - `neighborhood`: the `(2K+1)^D` window analyzer with memoized queries.
//! - `thinning`: sequential thinning driven by the analyzer.
//! - `contour`, `shapes`, `clock`: small helpers for 2D contours, test shapes and timing.
//!
//! API Policy
//! - The crate is internal to this workspace; there is no stable public API.

pub mod clock;
pub mod contour;
pub mod convexity;
pub mod error;
pub mod kernel;
pub mod neighborhood;
pub mod shapes;
pub mod thinning;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use convexity::{ConvexityOracle, DigitalConvexity, LatticePolytope};
pub use error::DomainError;
pub use kernel::{GridSpace, HyperRectDomain, Integer, Point2, Point3, PointVector};
pub use neighborhood::NeighborhoodConvexityAnalyzer;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::clock::Clock;
    pub use crate::convexity::{ConvexityOracle, DigitalConvexity, LatticePolytope};
    pub use crate::error::DomainError;
    pub use crate::kernel::{GridSpace, HyperRectDomain, Integer, Point2, Point3, PointVector};
    pub use crate::neighborhood::{LocalProperty, NeighborhoodConvexityAnalyzer};
    pub use crate::shapes::{digital_ball, random_subset, solid_box};
    pub use crate::thinning::{collapse_fully_convex, ThinningCfg, ThinningReport};
}
