//! Thin a digital disk and print the survivors as ASCII art.
//!
//! Usage:
//!   cargo run -p digconv --example thin_ball -- 6
//!
//! The first argument is the disk radius (default 5). The center pixel is kept
//! as an anchor so the result stays a single connected blob.

use std::collections::BTreeSet;

use digconv::prelude::*;

fn main() {
    let radius: i32 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(5)
        .max(1);
    let margin = Point2::diagonal(radius + 1);
    let Ok(mut analyzer) = NeighborhoodConvexityAnalyzer::<2, 1>::from_bounds(-margin, margin) else {
        eprintln!("usage: thin_ball [radius]");
        return;
    };
    let disk = digital_ball(Point2::zero(), radius);
    let mut set: BTreeSet<Point2> = disk.iter().copied().collect();
    let cfg = ThinningCfg {
        anchors: BTreeSet::from([Point2::zero()]),
        ..ThinningCfg::default()
    };
    let mut clock = Clock::new();
    clock.start_clock();
    let report = collapse_fully_convex(&mut analyzer, &mut set, &cfg);
    println!(
        "disk r={radius}: {} -> {} points in {} passes ({:.2} ms)",
        disk.len(),
        report.remaining,
        report.passes(),
        clock.stop_clock()
    );
    for y in (-radius..=radius).rev() {
        let row: String = (-radius..=radius)
            .map(|x| {
                let p = Point2::new([x, y]);
                if set.contains(&p) {
                    '#'
                } else if disk.contains(&p) {
                    '.'
                } else {
                    ' '
                }
            })
            .collect();
        println!("{row}");
    }
}
