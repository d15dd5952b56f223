use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use super::*;
use crate::convexity::ConvexityOracle;
use crate::kernel::{GridSpace, HyperRectDomain, Point2, Point3, PointVector};
use proptest::prelude::*;

/// Oracle answering a fixed value and counting calls.
struct CountingOracle<const D: usize> {
    space: GridSpace<D>,
    answer: bool,
    full_calls: Cell<usize>,
    zero_calls: Cell<usize>,
    last_input: RefCell<Vec<PointVector<D>>>,
}

impl<const D: usize> CountingOracle<D> {
    fn new(lo: PointVector<D>, hi: PointVector<D>, answer: bool) -> Self {
        Self {
            space: GridSpace::new(lo, hi).unwrap(),
            answer,
            full_calls: Cell::new(0),
            zero_calls: Cell::new(0),
            last_input: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.full_calls.get() + self.zero_calls.get()
    }
}

impl<const D: usize> ConvexityOracle<D> for CountingOracle<D> {
    fn space(&self) -> &GridSpace<D> {
        &self.space
    }
    fn is_fully_convex(&self, points: &[PointVector<D>]) -> bool {
        self.full_calls.set(self.full_calls.get() + 1);
        *self.last_input.borrow_mut() = points.to_vec();
        self.answer
    }
    fn is_0_convex(&self, points: &[PointVector<D>]) -> bool {
        self.zero_calls.set(self.zero_calls.get() + 1);
        *self.last_input.borrow_mut() = points.to_vec();
        self.answer
    }
}

fn p2(x: i32, y: i32) -> Point2 {
    Point2::new([x, y])
}

type Stubbed2 = NeighborhoodConvexityAnalyzer<2, 1, CountingOracle<2>>;

fn stubbed(answer: bool) -> Stubbed2 {
    NeighborhoodConvexityAnalyzer::with_oracle(CountingOracle::new(p2(0, 0), p2(10, 10), answer))
}

fn exact() -> NeighborhoodConvexityAnalyzer<2, 1> {
    NeighborhoodConvexityAnalyzer::from_bounds(p2(0, 0), p2(10, 10)).unwrap()
}

fn block(lo: Point2, hi: Point2) -> HashSet<Point2> {
    HyperRectDomain::new(lo, hi).unwrap().iter().collect()
}

#[test]
fn repeated_queries_hit_the_memo() {
    let mut a = stubbed(true);
    let x = block(p2(4, 4), p2(6, 6));
    a.set_center(p2(5, 5), |p| x.contains(p));
    assert_eq!(a.cached(LocalProperty::FullConvexity, true), None);
    assert!(a.is_fully_convex(true));
    assert!(a.is_fully_convex(true));
    assert!(a.is_fully_convex(true));
    assert_eq!(a.oracle().full_calls.get(), 1);
    assert_eq!(a.cached(LocalProperty::FullConvexity, true), Some(true));
    assert_eq!(a.cached(LocalProperty::FullConvexity, false), None);
    a.is_fully_convex(false);
    a.is_fully_convex(false);
    assert_eq!(a.oracle().full_calls.get(), 2);
}

#[test]
fn every_query_kind_has_its_own_slot() {
    let mut a = stubbed(false);
    let x = block(p2(4, 4), p2(6, 6));
    a.set_center(p2(5, 5), |p| x.contains(p));
    assert!(!a.is_fully_convex(true));
    // 0-convexity must not be answered from the full-convexity result.
    assert!(!a.is_0_convex(true));
    assert_eq!(a.oracle().zero_calls.get(), 1);
    assert!(!a.is_complementary_fully_convex(true));
    assert!(!a.is_complementary_0_convex(true));
    assert!(!a.is_complementary_0_convex(false));
    assert_eq!(a.oracle().calls(), 5);
    for prop in LocalProperty::ALL {
        assert_eq!(a.cached(prop, true), Some(false));
    }
}

#[test]
fn set_center_invalidates_every_result() {
    let mut a = stubbed(true);
    let x = block(p2(4, 4), p2(6, 6));
    a.set_center(p2(5, 5), |p| x.contains(p));
    for prop in LocalProperty::ALL {
        for with_center in [true, false] {
            match prop {
                LocalProperty::FullConvexity => a.is_fully_convex(with_center),
                LocalProperty::ComplementFullConvexity => {
                    a.is_complementary_fully_convex(with_center)
                }
                LocalProperty::ZeroConvexity => a.is_0_convex(with_center),
                LocalProperty::ComplementZeroConvexity => a.is_complementary_0_convex(with_center),
            };
        }
    }
    assert_eq!(a.oracle().calls(), 8);
    a.set_center(p2(5, 5), |p| x.contains(p));
    for prop in LocalProperty::ALL {
        assert_eq!(a.cached(prop, true), None);
        assert_eq!(a.cached(prop, false), None);
    }
    a.is_fully_convex(true);
    assert_eq!(a.oracle().calls(), 9);
}

#[test]
fn with_center_query_leaves_partitions_untouched() {
    let mut a = stubbed(true);
    let x = block(p2(4, 4), p2(5, 6));
    a.set_center(p2(5, 5), |p| x.contains(p));
    let before = a.local_x().to_vec();
    a.is_fully_convex(true);
    assert_eq!(a.local_x(), before.as_slice());
    let seen = a.oracle().last_input.borrow().clone();
    assert_eq!(seen.len(), before.len() + 1);
    assert_eq!(seen.last(), Some(&p2(5, 5)));
    a.is_complementary_0_convex(true);
    assert!(!a.local_comp_x().contains(&p2(5, 5)));
}

#[test]
fn isolated_point_is_not_collapsible() {
    let mut a = stubbed(true);
    let x = |p: &Point2| *p == p2(5, 5);
    a.set_center(p2(5, 5), x);
    assert!(a.is_center_in_x());
    assert!(a.local_x().is_empty());
    assert_eq!(
        a.local_comp_x(),
        &[
            p2(4, 4),
            p2(5, 4),
            p2(6, 4),
            p2(4, 5),
            p2(6, 5),
            p2(4, 6),
            p2(5, 6),
            p2(6, 6)
        ]
    );
    assert!(!a.is_fully_convex_collapsible());
    // The emptiness guard answers without consulting the oracle.
    assert_eq!(a.oracle().calls(), 0);

    let mut e = exact();
    e.set_center(p2(5, 5), x);
    assert!(!e.is_fully_convex_collapsible());
}

#[test]
fn solid_window_with_convex_oracle_is_collapsible() {
    let mut a = stubbed(true);
    let x = block(p2(4, 4), p2(6, 6));
    a.set_center(p2(5, 5), |p| x.contains(p));
    assert_eq!(a.local_x().len(), 8);
    assert!(a.local_comp_x().is_empty());
    assert!(a.is_fully_convex(true));
    assert!(a.is_fully_convex(false));
    assert!(a.is_fully_convex_collapsible());
}

#[test]
fn interior_point_of_a_block_is_not_collapsible() {
    let mut a = exact();
    let x = block(p2(4, 4), p2(6, 6));
    a.set_center(p2(5, 5), |p| x.contains(p));
    assert!(a.is_fully_convex(true));
    // The ring around the center is not even 0-convex.
    assert!(!a.is_fully_convex(false));
    assert!(!a.is_0_convex(false));
    assert!(!a.is_fully_convex_collapsible());
}

#[test]
fn block_corner_is_collapsible() {
    let mut a = exact();
    let x = block(p2(5, 5), p2(7, 7));
    a.set_center(p2(5, 5), |p| x.contains(p));
    assert_eq!(a.local_x(), &[p2(6, 5), p2(5, 6), p2(6, 6)]);
    assert!(a.is_fully_convex_collapsible());
}

#[test]
fn complement_side_is_used_outside_x() {
    let mut a = exact();
    let x = block(p2(5, 5), p2(7, 7));
    a.set_center(p2(4, 4), |p| x.contains(p));
    assert!(!a.is_center_in_x());
    assert_eq!(a.local_x(), &[p2(5, 5)]);
    assert_eq!(a.local_comp_x().len(), 7);
    assert!(a.is_complementary_fully_convex(true));
    assert!(!a.is_complementary_fully_convex(false));
    assert!(!a.is_fully_convex_collapsible());
}

#[test]
fn domain_corner_clips_the_window() {
    let mut a = exact();
    let x = block(p2(0, 0), p2(2, 2));
    a.set_center(p2(0, 0), |p| x.contains(p));
    assert_eq!(a.local_x().len() + a.local_comp_x().len(), 3);
    assert!(a.is_fully_convex_collapsible());

    let mut a3: NeighborhoodConvexityAnalyzer<3, 1> =
        NeighborhoodConvexityAnalyzer::from_bounds(Point3::zero(), Point3::diagonal(4)).unwrap();
    a3.set_center(Point3::diagonal(4), |_| false);
    assert_eq!(a3.local_comp_x().len(), 7);
    assert!(a3.local_x().is_empty());
}

#[test]
fn center_outside_the_domain_sees_an_empty_window() {
    let mut a = exact();
    a.set_center(p2(20, 20), |_| true);
    assert!(a.is_center_in_x());
    assert!(a.local_x().is_empty() && a.local_comp_x().is_empty());
    assert!(a.is_fully_convex(true));
    assert!(a.is_fully_convex(false));
    assert!(!a.is_fully_convex_collapsible());
    // Window partly inside.
    a.set_center(p2(11, 5), |_| true);
    assert_eq!(a.local_x().len(), 3);
}

#[test]
fn radius_two_window_in_3d() {
    let mut a: NeighborhoodConvexityAnalyzer<3, 2> =
        NeighborhoodConvexityAnalyzer::from_bounds(Point3::zero(), Point3::diagonal(10)).unwrap();
    let x: HashSet<Point3> = HyperRectDomain::new(Point3::diagonal(2), Point3::diagonal(8))
        .unwrap()
        .iter()
        .collect();
    a.set_center(Point3::diagonal(5), |p| x.contains(p));
    assert_eq!(a.local_x().len(), 124);
    assert!(a.is_fully_convex(true));
    assert!(!a.is_0_convex(false));
    assert!(!a.is_fully_convex_collapsible());

    a.set_center(Point3::diagonal(2), |p| x.contains(p));
    assert_eq!(a.local_x().len(), 26);
    assert!(a.is_fully_convex_collapsible());
}

#[test]
fn window_at_the_integer_limits_is_clipped() {
    let top = Point2::diagonal(i32::MAX);
    let mut a: NeighborhoodConvexityAnalyzer<2, 1> =
        NeighborhoodConvexityAnalyzer::from_bounds(Point2::diagonal(i32::MAX - 10), top).unwrap();
    a.set_center(top, |_| true);
    assert_eq!(
        a.local_x(),
        &[p2(i32::MAX - 1, i32::MAX - 1), p2(i32::MAX, i32::MAX - 1), p2(i32::MAX - 1, i32::MAX)]
    );
    assert!(a.local_comp_x().is_empty());
    assert!(a.is_fully_convex_collapsible());

    let bottom = Point2::diagonal(i32::MIN);
    let mut b: NeighborhoodConvexityAnalyzer<2, 2> =
        NeighborhoodConvexityAnalyzer::from_bounds(bottom, Point2::diagonal(i32::MIN + 10)).unwrap();
    b.set_center(bottom, |p| *p != bottom);
    assert_eq!(b.local_x().len(), 8);
    assert!(!b.is_center_in_x());
}

#[test]
#[should_panic(expected = "set_center")]
fn query_before_set_center_panics() {
    let mut a = exact();
    a.is_fully_convex(true);
}

#[test]
fn accessors_report_construction_parameters() {
    let a: NeighborhoodConvexityAnalyzer<2, 2> =
        NeighborhoodConvexityAnalyzer::new(GridSpace::new(p2(-3, -3), p2(3, 3)).unwrap());
    assert_eq!(NeighborhoodConvexityAnalyzer::<2, 2>::size(), 2);
    assert_eq!(a.domain().lower_bound(), p2(-3, -3));
    assert_eq!(a.space().upper_bound(), p2(3, 3));
    assert_eq!(a.center(), None);
    let mut a = a;
    a.set_center(p2(0, 0), |p| p.norm1() <= 1);
    assert_eq!(a.center(), Some(p2(0, 0)));
    assert_eq!(a.local_x().len(), 4);
    assert_eq!(a.local_x().len() + a.local_comp_x().len(), 24);
}

#[test]
fn segment_endpoint_in_1d_is_collapsible() {
    let mut a: NeighborhoodConvexityAnalyzer<1, 1> =
        NeighborhoodConvexityAnalyzer::from_bounds(PointVector::new([0]), PointVector::new([10]))
            .unwrap();
    a.set_center(PointVector::new([5]), |p| p[0] == 5 || p[0] == 6);
    assert_eq!(a.local_x(), &[PointVector::new([6])]);
    assert_eq!(a.local_comp_x(), &[PointVector::new([4])]);
    assert!(a.is_fully_convex_collapsible());
    a.set_center(PointVector::new([5]), |p| (4..=6).contains(&p[0]));
    assert!(!a.is_fully_convex_collapsible());
}

proptest! {
    #[test]
    fn partition_matches_predicate_and_domain(
        cx in -2i32..13, cy in -2i32..13,
        seed in prop::collection::vec(any::<bool>(), 169),
    ) {
        let inside = |p: &Point2| {
            let (x, y) = (p[0] + 1, p[1] + 1);
            (0..13).contains(&x) && (0..13).contains(&y) && seed[(y * 13 + x) as usize]
        };
        let mut a = stubbed(true);
        let c = p2(cx, cy);
        a.set_center(c, inside);
        prop_assert_eq!(a.is_center_in_x(), inside(&c));
        let mut expected = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let p = c + p2(dx, dy);
                let in_x = a.local_x().contains(&p);
                let in_comp = a.local_comp_x().contains(&p);
                if a.domain().contains(&p) {
                    expected += 1;
                    prop_assert!(in_x != in_comp);
                    prop_assert_eq!(in_x, inside(&p));
                } else {
                    prop_assert!(!in_x && !in_comp);
                }
            }
        }
        prop_assert_eq!(a.local_x().len() + a.local_comp_x().len(), expected);
        prop_assert!(!a.local_x().contains(&c) && !a.local_comp_x().contains(&c));
    }

    #[test]
    fn queries_are_memoized_until_the_center_moves(
        with_center in any::<bool>(),
        repeats in 1usize..6,
    ) {
        let mut a = stubbed(true);
        let x = block(p2(3, 3), p2(6, 5));
        a.set_center(p2(4, 4), |p| x.contains(p));
        let snapshot = (a.local_x().to_vec(), a.local_comp_x().to_vec());
        for _ in 0..repeats {
            a.is_complementary_fully_convex(with_center);
            a.is_0_convex(with_center);
        }
        prop_assert_eq!(a.oracle().calls(), 2);
        prop_assert_eq!(a.local_x(), snapshot.0.as_slice());
        prop_assert_eq!(a.local_comp_x(), snapshot.1.as_slice());
    }
}
