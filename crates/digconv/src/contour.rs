//! Helpers on 2D digital contours given as point sequences.
//!
//! Conventions
//! - A contour is a sequence of `Point2`; orientation tests treat it as closed
//!   (the last point connects back to the first).
//! - Freeman 4-codes: 0 east (+x), 1 north (+y), 2 west, 3 south.

use nalgebra::Vector2;

use crate::kernel::{Integer, Point2};

/// Integer barycenter, each coordinate truncated toward zero. `None` for an empty contour.
pub fn mean_point(contour: &[Point2]) -> Option<Point2> {
    if contour.is_empty() {
        return None;
    }
    let n = contour.len() as i64;
    let (sx, sy) = contour.iter().fold((0i64, 0i64), |(sx, sy), p| {
        (sx + i64::from(p[0]), sy + i64::from(p[1]))
    });
    Some(Point2::new([(sx / n) as Integer, (sy / n) as Integer]))
}

/// Real barycenter. `None` for an empty contour.
pub fn mean_real_point(contour: &[Point2]) -> Option<Vector2<f64>> {
    if contour.is_empty() {
        return None;
    }
    let sum = contour
        .iter()
        .fold(Vector2::zeros(), |acc, p| acc + p.to_real());
    Some(sum / contour.len() as f64)
}

/// Twice the signed area enclosed by the closed contour (shoelace formula).
pub fn signed_area2(contour: &[Point2]) -> i64 {
    let n = contour.len();
    (0..n)
        .map(|i| {
            let (a, b) = (contour[i], contour[(i + 1) % n]);
            i64::from(a[0]) * i64::from(b[1]) - i64::from(b[0]) * i64::from(a[1])
        })
        .sum()
}

/// `true` iff the closed contour turns counterclockwise (positive area).
/// Degenerate contours (zero area) are not counterclockwise.
pub fn is_counter_clockwise(contour: &[Point2]) -> bool {
    signed_area2(contour) > 0
}

/// Freeman code of the unit 4-move `a → b`, `None` for any other displacement.
pub fn freeman_code_4c(a: &Point2, b: &Point2) -> Option<u8> {
    match *(*b - *a).coords() {
        [1, 0] => Some(0),
        [0, 1] => Some(1),
        [-1, 0] => Some(2),
        [0, -1] => Some(3),
        _ => None,
    }
}

/// Turns a 4-connected pixel chain into an 8-connected one.
///
/// A pixel is dropped when the chain turns on it, i.e. the moves entering and
/// leaving it are different, non-opposite 4-moves. Moves are measured from the
/// last kept pixel, so two consecutive pixels are never both dropped. The
/// endpoints are always kept.
pub fn pixels_to_pixels_8c(contour: &[Point2]) -> Vec<Point2> {
    let Some((&first, rest)) = contour.split_first() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(contour.len());
    out.push(first);
    for (i, &p) in rest.iter().enumerate() {
        let Some(&next) = rest.get(i + 1) else {
            out.push(p);
            break;
        };
        let prev = out[out.len() - 1];
        let turn = match (freeman_code_4c(&prev, &p), freeman_code_4c(&p, &next)) {
            (Some(c_in), Some(c_out)) => c_in != c_out && (c_in + 2) % 4 != c_out,
            _ => false,
        };
        if !turn {
            out.push(p);
        }
    }
    out
}
