//! Self-intersection decomposer.
//!
//! A face projected into its planar frame is a closed 2D ring that may cross
//! itself (a bowtie quad, a pentagram, ...). The triangulator requires simple
//! polygons, so the ring is first resolved by computing its union with itself
//! under polygon-clipping semantics: the result is one or more simple,
//! non-overlapping rings covering the same effective area. A ring that was
//! already simple unions to itself, so simple faces pass through unchanged.
//!
//! The clipper computes on integer coordinates scaled by [`CLIP_SCALE`],
//! which snaps every coordinate to six decimal digits and keeps the boolean
//! operation stable against floating noise.

use geo_clipper::Clipper;
use geo_types::{Coord, LineString, Polygon};
use nalgebra::Point2;

/// Coordinate scaling factor handed to the clipper: six decimal digits.
pub const CLIP_SCALE: f64 = 1_000_000.0;

/// One simple ring produced by decomposition, with any hole rings the
/// clipper attributed to it. Rings are open (no closing duplicate point).
#[derive(Debug, Clone)]
pub struct SubPolygon {
    /// Outer boundary of the ring.
    pub exterior: Vec<Point2<f64>>,
    /// Hole rings, if the contour enclosed any area negatively.
    pub holes: Vec<Vec<Point2<f64>>>,
}

/// Split a (possibly self-intersecting) closed contour into simple rings.
///
/// Degenerate rings (fewer than three points after snapping) are dropped.
pub fn decompose(contour: &[Point2<f64>]) -> Vec<SubPolygon> {
    let mut ring: Vec<Coord<f64>> = contour
        .iter()
        .map(|p| Coord { x: p.x, y: p.y })
        .collect();
    // The clipper expects closed rings.
    if let Some(&first) = ring.first() {
        ring.push(first);
    }
    let subject = Polygon::new(LineString(ring), vec![]);

    let unioned = subject.union(&subject, CLIP_SCALE);
    unioned
        .0
        .iter()
        .filter_map(|polygon| {
            let exterior = strip_closing_point(polygon.exterior());
            if exterior.len() < 3 {
                return None;
            }
            let holes: Vec<Vec<Point2<f64>>> = polygon
                .interiors()
                .iter()
                .map(strip_closing_point)
                .filter(|hole| hole.len() >= 3)
                .collect();
            Some(SubPolygon { exterior, holes })
        })
        .collect()
}

fn strip_closing_point(ring: &LineString<f64>) -> Vec<Point2<f64>> {
    let mut points: Vec<Point2<f64>> = ring.0.iter().map(|c| Point2::new(c.x, c.y)).collect();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}
