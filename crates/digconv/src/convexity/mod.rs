//! Digital convexity of finite lattice sets.
//!
//! Purpose
//! - Provide the convexity oracle consumed by the neighborhood analyzer
//!   (`ConvexityOracle`), with an exact implementation (`DigitalConvexity`).
//! - Provide exact lattice polytopes (`LatticePolytope`) used by the oracle and
//!   usable on their own (hull H-representation, lattice point counting).
//!
//! Conventions
//! - All arithmetic is exact (`i128`); there are no tolerances.
//! - Half-spaces use `n·x <= c` with primitive integer normals, expressed in the
//!   polytope's chart (see `LatticePolytope::chart_axes`).
//! - Degenerate (lower-dimensional) sets are first-class: their hull is
//!   computed inside the affine hull, never rejected.

mod digital;
mod polytope;
mod util;

pub use digital::{unit_dilation, ConvexityOracle, DigitalConvexity};
pub use polytope::{LatticeHs, LatticePolytope};
