//! Digital shapes used by tests, benches and the CLI.
//!
//! All generators return points in raster order (first axis fastest), without
//! duplicates. `random_subset` is reproducible for a fixed seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::kernel::{HyperRectDomain, Integer, PointVector};

/// Every point of `domain`.
pub fn solid_box<const D: usize>(domain: &HyperRectDomain<D>) -> Vec<PointVector<D>> {
    domain.iter().collect()
}

/// Lattice points at Euclidean distance at most `radius` from `center`.
///
/// Empty for a negative radius.
pub fn digital_ball<const D: usize>(center: PointVector<D>, radius: Integer) -> Vec<PointVector<D>> {
    if radius < 0 {
        return Vec::new();
    }
    let r2 = i64::from(radius) * i64::from(radius);
    let dist2 = |p: &PointVector<D>| -> i64 {
        p.iter()
            .zip(center.iter())
            .map(|(&a, &b)| (i64::from(a) - i64::from(b)).pow(2))
            .sum()
    };
    match HyperRectDomain::around(center, radius) {
        Some(bb) => bb.iter().filter(|p| dist2(p) <= r2).collect(),
        None => Vec::new(),
    }
}

/// Bernoulli subset of `domain`: each point is kept with probability `density`
/// (clamped to `[0, 1]`).
pub fn random_subset<const D: usize>(
    domain: &HyperRectDomain<D>,
    density: f64,
    seed: u64,
) -> Vec<PointVector<D>> {
    let p = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
    let mut rng = StdRng::seed_from_u64(seed);
    domain.iter().filter(|_| rng.gen_bool(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{Point2, Point3};

    #[test]
    fn ball_counts() {
        assert_eq!(digital_ball(Point2::zero(), 0), vec![Point2::zero()]);
        assert_eq!(digital_ball(Point2::zero(), 1).len(), 5);
        assert_eq!(digital_ball(Point2::new([3, -2]), 2).len(), 13);
        assert_eq!(digital_ball(Point3::zero(), 1).len(), 7);
        assert!(digital_ball(Point2::zero(), -1).is_empty());
    }

    #[test]
    fn ball_at_the_integer_limit_is_clipped() {
        let top = Point2::diagonal(Integer::MAX);
        let ball = digital_ball(top, 1);
        assert_eq!(ball.len(), 3);
        assert!(ball.contains(&Point2::new([Integer::MAX - 1, Integer::MAX])));
        assert_eq!(digital_ball(Point2::diagonal(Integer::MIN), 2).len(), 6);
    }

    #[test]
    fn box_is_whole_domain() {
        let dom = HyperRectDomain::new(Point3::zero(), Point3::new([1, 2, 3])).unwrap();
        let pts = solid_box(&dom);
        assert_eq!(pts.len(), 24);
        assert_eq!(pts.first(), Some(&Point3::zero()));
    }

    #[test]
    fn random_subset_is_reproducible() {
        let dom = HyperRectDomain::new(Point2::zero(), Point2::diagonal(15)).unwrap();
        let a = random_subset(&dom, 0.3, 7);
        let b = random_subset(&dom, 0.3, 7);
        assert_eq!(a, b);
        assert!(a.iter().all(|p| dom.contains(p)));
        assert!(a.windows(2).all(|w| w[0] != w[1]));
        assert_eq!(random_subset(&dom, 1.0, 1).len(), dom.size());
        assert!(random_subset(&dom, 0.0, 1).is_empty());
        assert!(random_subset(&dom, f64::NAN, 1).is_empty());
    }
}
