//! Closed set of drawable shapes and polygon extraction.

use crate::kernel::{aabb, Point, Polygon, Rect, Segment};

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Point(Point),
    Segment(Segment),
    Polygon(Polygon),
}

impl Shape {
    /// Axis-aligned bounds; `None` only for an empty polygon.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Shape::Point(p) => Some(Rect::bounds(p.x, p.y, p.x, p.y)),
            Shape::Segment(s) => Some(Rect::bounds(s.a.x, s.a.y, s.b.x, s.b.y)),
            Shape::Polygon(poly) => aabb(&poly.vs),
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Shape::Polygon(p) => Some(p),
            Shape::Point(_) | Shape::Segment(_) => None,
        }
    }
}

impl From<Point> for Shape {
    fn from(p: Point) -> Self {
        Shape::Point(p)
    }
}

impl From<Segment> for Shape {
    fn from(s: Segment) -> Self {
        Shape::Segment(s)
    }
}

impl From<Polygon> for Shape {
    fn from(p: Polygon) -> Self {
        Shape::Polygon(p)
    }
}

/// Fresh copies of every polygon in `shapes`, in input order.
pub fn extract_polygons(shapes: &[Shape]) -> Vec<Polygon> {
    shapes.iter().filter_map(Shape::as_polygon).cloned().collect()
}

/// Union of all defined bounds.
pub fn scene_bounds(shapes: &[Shape]) -> Option<Rect> {
    shapes
        .iter()
        .filter_map(Shape::bounds)
        .reduce(|a, b| a.union(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Vec<Shape> {
        vec![
            Shape::from(Point::new(-1.0, 2.0)),
            Shape::from(Segment::new(Point::new(3.0, 0.0), Point::new(1.0, -2.0))),
            Shape::from(Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)])),
            Shape::from(Polygon::default()),
        ]
    }

    #[test]
    fn bounds_per_variant() {
        let s = scene();
        let r = s[1].bounds().unwrap();
        assert_eq!((r.left(), r.right(), r.bottom(), r.top()), (1.0, 3.0, -2.0, 0.0));
        let p = s[0].bounds().unwrap();
        assert_eq!(p.width(), 0.0);
        assert!(s[3].bounds().is_none());
    }

    #[test]
    fn scene_bounds_cover_all() {
        let r = scene_bounds(&scene()).unwrap();
        assert_eq!((r.left(), r.right(), r.bottom(), r.top()), (-1.0, 3.0, -2.0, 2.0));
        assert!(scene_bounds(&[]).is_none());
    }

    #[test]
    fn extraction_copies_polygons_only() {
        let s = scene();
        let polys = extract_polygons(&s);
        assert_eq!(polys.len(), 2);
        assert_eq!(polys[0].len(), 3);
        assert!(polys[1].is_empty());
    }
}
