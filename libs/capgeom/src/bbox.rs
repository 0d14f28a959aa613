//! Rectangular bounding boxes and associated trait implementations.

use serde::{Deserialize, Serialize};

use super::{Point, Rect, Shape};

/// An axis-aligned rectangular bounding box.
///
/// Points `p0` and `p1` represent opposite corners of a bounding rectangle,
/// with `p0` closest to negative infinity in both x and y.
///
/// This differs from [`Rect`] in that it can be empty, meaning that `p0`
/// is to the upper right of `p1`.
#[derive(Debug, Default, Copy, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Bbox {
    pub p0: Point,
    pub p1: Point,
}

impl Bbox {
    /// Creates a new [`Bbox`] from two [`Point`]s.
    #[inline]
    pub fn new(p0: Point, p1: Point) -> Self {
        Self {
            p0: Point::new(p0.x.min(p1.x), p0.y.min(p1.y)),
            p1: Point::new(p0.x.max(p1.x), p0.y.max(p1.y)),
        }
    }

    /// Creates a new [`Bbox`] comprising solely of the given point.
    pub fn from_point(pt: Point) -> Self {
        Self { p0: pt, p1: pt }
    }

    /// Creates a new [`Bbox`] from two points without any computation.
    ///
    /// Callers are responsible for ensuring that `p0.x <= p1.x` and `p0.y <= p1.y`.
    fn from_points(p0: Point, p1: Point) -> Self {
        Self { p0, p1 }
    }

    /// Creates an empty, otherwise invalid bounding box.
    pub fn empty() -> Self {
        Self {
            p0: Point::new(i64::MAX, i64::MAX),
            p1: Point::new(i64::MIN, i64::MIN),
        }
    }

    /// Returns `true` if the bounding box is empty.
    pub fn is_empty(&self) -> bool {
        self.p0.x > self.p1.x || self.p0.y > self.p1.y
    }

    /// Finds the width of the bounding box in the x-direction.
    #[inline]
    pub fn width(&self) -> i64 {
        self.p1.x - self.p0.x
    }

    /// Finds the height of the bounding box in the y-direction.
    #[inline]
    pub fn height(&self) -> i64 {
        self.p1.y - self.p0.y
    }

    /// Returns true if [`Point`] `pt` lies inside the bounding box.
    pub fn contains(&self, pt: Point) -> bool {
        self.p0.x <= pt.x && self.p1.x >= pt.x && self.p0.y <= pt.y && self.p1.y >= pt.y
    }

    /// Returns the bounding box's center.
    pub fn center(&self) -> Point {
        Point::new((self.p0.x + self.p1.x) / 2, (self.p0.y + self.p1.y) / 2)
    }

    /// Converts a bounding box into a [`Rect`].
    ///
    /// # Panics
    ///
    /// May panic if the bounding box is empty.
    #[inline]
    pub fn into_rect(self) -> Rect {
        Rect::from(self)
    }
}

impl From<Rect> for Bbox {
    fn from(r: Rect) -> Self {
        Self { p0: r.p0, p1: r.p1 }
    }
}

/// A trait representing functions available for objects with a bounding box.
pub trait BoundBox {
    /// Computes a rectangular bounding box around the implementing type.
    fn bbox(&self) -> Bbox;

    /// Computes the rectangular bounding box and converts it to a [`Rect`].
    ///
    /// # Panics
    ///
    /// May panic if the bounding box is empty.
    fn brect(&self) -> Rect {
        self.bbox().into_rect()
    }

    /// Computes the intersection with rectangular bounding box `bbox`.
    fn intersection(&self, bbox: Bbox) -> Bbox {
        self.bbox().intersection(bbox)
    }

    /// Computes the union with rectangular bounding box `bbox`.
    fn union(&self, bbox: Bbox) -> Bbox {
        self.bbox().union(bbox)
    }
}

impl<T> BoundBox for &T
where
    T: BoundBox,
{
    fn bbox(&self) -> Bbox {
        T::bbox(*self)
    }
}

impl BoundBox for Bbox {
    fn bbox(&self) -> Bbox {
        *self
    }

    fn intersection(&self, bbox: Bbox) -> Bbox {
        let pmin = Point::new(self.p0.x.max(bbox.p0.x), self.p0.y.max(bbox.p0.y));
        let pmax = Point::new(self.p1.x.min(bbox.p1.x), self.p1.y.min(bbox.p1.y));
        if pmin.x > pmax.x || pmin.y > pmax.y {
            return Bbox::empty();
        }
        Bbox::new(pmin, pmax)
    }

    fn union(&self, bbox: Bbox) -> Bbox {
        if bbox.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return bbox;
        }
        Bbox::new(
            Point::new(self.p0.x.min(bbox.p0.x), self.p0.y.min(bbox.p0.y)),
            Point::new(self.p1.x.max(bbox.p1.x), self.p1.y.max(bbox.p1.y)),
        )
    }
}

impl BoundBox for Point {
    fn bbox(&self) -> Bbox {
        Bbox::from_point(*self)
    }
}

impl BoundBox for Rect {
    fn bbox(&self) -> Bbox {
        Bbox::from_points(self.p0, self.p1)
    }
}

impl BoundBox for Shape {
    fn bbox(&self) -> Bbox {
        // Either two-point or multi-point form, depending on the variant.
        match self {
            Shape::Rect(r) => Bbox::from_points(r.p0, r.p1),
            Shape::Polygon(p) => p.points.bbox(),
            Shape::Path(p) => p.points.bbox(),
        }
    }
}

impl BoundBox for Vec<Point> {
    fn bbox(&self) -> Bbox {
        let mut bbox = Bbox::empty();
        for pt in self {
            bbox = bbox.union(pt.bbox());
        }
        bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_union_identity() {
        let b = Rect::from_sides(-5, 0, 5, 20).bbox();
        assert_eq!(Bbox::empty().union(b), b);
        assert_eq!(b.union(Bbox::empty()), b);
        assert!(Bbox::empty().is_empty());
    }

    #[test]
    fn shape_bboxes() {
        use crate::{Path, Polygon};

        let rect = Shape::Rect(Rect::from_sides(0, 0, 10, 20));
        assert_eq!(rect.brect(), Rect::from_sides(0, 0, 10, 20));

        let poly = Shape::Polygon(Polygon {
            points: vec![Point::new(0, 0), Point::new(4, 0), Point::new(2, 7)],
        });
        assert_eq!(poly.brect(), Rect::from_sides(0, 0, 4, 7));
        assert_eq!(poly.bbox().center(), Point::new(2, 3));

        let path = Shape::Path(Path {
            points: vec![Point::new(0, 0), Point::new(30, 0)],
            width: 4,
        });
        // Path bounding boxes cover the centerline only.
        assert_eq!(path.bbox().width(), 30);
        assert_eq!(path.bbox().height(), 0);
    }

    #[test]
    fn intersection_disjoint_is_empty() {
        let a = Rect::from_sides(0, 0, 10, 10).bbox();
        let b = Rect::from_sides(20, 20, 30, 30).bbox();
        assert!(a.intersection(b).is_empty());

        let c = Rect::from_sides(5, 5, 30, 30).bbox();
        assert_eq!(a.intersection(c), Rect::from_sides(5, 5, 10, 10).bbox());
    }
}
