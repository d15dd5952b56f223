//! Neighborhood convexity analysis.
//!
//! Purpose
//! - Slide a `(2K+1)^D` window over a digital set X and answer local convexity
//!   questions (full convexity, 0-convexity, of X or its complement, with or
//!   without the center), each evaluated at most once per center.
//! - Decide whether a center is *fully convex collapsible*, the local test
//!   used by topology-preserving thinning (`crate::thinning`).
//!
//! Usage
//! - One analyzer per thread: every call takes `&mut self` and the memo is
//!   keyed by the current center only.
//! - Queries before the first `set_center` are a programming error and panic.

mod analyzer;
mod cache;

pub use analyzer::NeighborhoodConvexityAnalyzer;
pub use cache::LocalProperty;

#[cfg(test)]
mod tests;
