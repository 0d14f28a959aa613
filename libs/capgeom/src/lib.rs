//! Integer-nanometer layout geometry: points, spans, rectangles, polygons,
//! paths, and the traits connecting them.

use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use transform::{Transform, Transformation, Translate};

use self::bbox::{Bbox, BoundBox};

pub mod bbox;
pub mod ring;
pub mod transform;

/// Snaps `pos` to the nearest multiple of `grid`.
///
/// Ties round down.
pub fn snap_to_grid(pos: i64, grid: i64) -> i64 {
    assert!(grid > 0);

    let rem = pos.rem_euclid(grid);
    if rem <= grid / 2 {
        pos - rem
    } else {
        pos + grid - rem
    }
}

/// A point in two-dimensional layout space.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    /// Creates a new [`Point`] from (x, y) coordinates.
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Returns the origin, (0, 0).
    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Creates a [`Point`] offsetting by `val` along direction `dir`.
    pub fn offset(val: i64, dir: Dir) -> Self {
        match dir {
            Dir::Horiz => Self { x: val, y: 0 },
            Dir::Vert => Self { x: 0, y: val },
        }
    }

    /// Gets the coordinate associated with direction `dir`.
    pub fn coord(&self, dir: Dir) -> i64 {
        match dir {
            Dir::Horiz => self.x,
            Dir::Vert => self.y,
        }
    }

    /// Snaps both coordinates to the nearest multiple of `grid`.
    #[inline]
    pub fn snap_to_grid(&self, grid: i64) -> Self {
        Self {
            x: snap_to_grid(self.x, grid),
            y: snap_to_grid(self.y, grid),
        }
    }
}

impl std::ops::Add<Point> for Point {
    type Output = Self;
    fn add(self, rhs: Point) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign<Point> for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub<Point> for Point {
    type Output = Self;
    fn sub(self, rhs: Point) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i64, i64)> for Point {
    fn from(value: (i64, i64)) -> Self {
        Self {
            x: value.0,
            y: value.1,
        }
    }
}

/// A one-dimensional closed interval.
#[derive(
    Debug, Default, Clone, Copy, Hash, Ord, PartialOrd, Serialize, Deserialize, PartialEq, Eq,
)]
pub struct Span {
    start: i64,
    stop: i64,
}

impl Span {
    /// Creates a new [`Span`] between two coordinates, sorting them if needed.
    pub fn new(start: i64, stop: i64) -> Self {
        Self {
            start: start.min(stop),
            stop: start.max(stop),
        }
    }

    /// Creates a span starting at `start` with the given (non-negative) length.
    pub fn with_start_and_length(start: i64, length: i64) -> Self {
        Self {
            stop: start + length,
            start,
        }
    }

    /// Creates a span ending at `stop` with the given (non-negative) length.
    pub fn with_stop_and_length(stop: i64, length: i64) -> Self {
        Self {
            start: stop - length,
            stop,
        }
    }

    /// Creates a span with one fixed endpoint and the given length.
    ///
    /// With [`Sign::Pos`], `point` is the stopping coordinate;
    /// with [`Sign::Neg`], the starting one.
    pub fn with_point_and_length(sign: Sign, point: i64, length: i64) -> Self {
        match sign {
            Sign::Pos => Self::with_stop_and_length(point, length),
            Sign::Neg => Self::with_start_and_length(point, length),
        }
    }

    /// Creates a span of length `span` centered at `center`.
    ///
    /// `span` must be even so that the endpoints land on integers.
    pub fn from_center_span(center: i64, span: i64) -> Self {
        assert!(span >= 0);
        assert_eq!(span % 2, 0);

        Self::new(center - (span / 2), center + (span / 2))
    }

    /// Expands the span by `amount` towards `sign`.
    pub fn expand(mut self, sign: Sign, amount: i64) -> Self {
        match sign {
            Sign::Pos => self.stop += amount,
            Sign::Neg => self.start -= amount,
        }
        self
    }

    /// Expands the span by `amount` at both ends.
    pub fn expand_all(mut self, amount: i64) -> Self {
        self.start -= amount;
        self.stop += amount;
        self
    }

    /// Shrinks the span by `amount` at both ends.
    pub fn shrink_all(self, amount: i64) -> Self {
        assert!(self.length() >= 2 * amount);
        Self {
            start: self.start + amount,
            stop: self.stop - amount,
        }
    }

    /// The midpoint of the span.
    #[inline]
    pub fn center(&self) -> i64 {
        (self.start + self.stop) / 2
    }

    /// The length of the span.
    #[inline]
    pub fn length(&self) -> i64 {
        self.stop - self.start
    }

    #[inline]
    pub fn start(&self) -> i64 {
        self.start
    }

    #[inline]
    pub fn stop(&self) -> i64 {
        self.stop
    }

    /// Checks whether the two spans share at least one point.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        !(other.stop < self.start || self.stop < other.start)
    }

    /// The smallest span covering both input spans.
    pub fn union(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            stop: self.stop.max(other.stop),
        }
    }

    /// Checks whether `other` lies entirely within this span.
    pub fn contains(self, other: Self) -> bool {
        self.union(other) == self
    }

    /// Shifts the span by `amount`.
    pub fn translate(self, amount: i64) -> Self {
        Self {
            start: self.start + amount,
            stop: self.stop + amount,
        }
    }
}

/// An enumeration of axis-aligned directions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
pub enum Dir {
    /// The horizontal, or x-aligned, direction.
    Horiz,
    /// The vertical, or y-aligned, direction.
    Vert,
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("error parsing direction `{original}`; expected horizontal or vertical")]
pub struct DirParseError {
    original: String,
}

impl FromStr for Dir {
    type Err = DirParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowercase = s.to_lowercase();
        match lowercase.trim() {
            "vertical" | "vert" | "v" => Ok(Self::Vert),
            "horizontal" | "horiz" | "h" => Ok(Self::Horiz),
            _ => Err(DirParseError {
                original: s.to_string(),
            }),
        }
    }
}

impl Dir {
    /// Returns the perpendicular direction.
    pub fn other(self) -> Self {
        match self {
            Self::Horiz => Self::Vert,
            Self::Vert => Self::Horiz,
        }
    }
}

impl Default for Dir {
    #[inline]
    fn default() -> Self {
        Self::Horiz
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Horiz => write!(f, "horizontal"),
            Self::Vert => write!(f, "vertical"),
        }
    }
}

impl std::ops::Not for Dir {
    type Output = Self;
    fn not(self) -> Self::Output {
        self.other()
    }
}

/// Enumeration over possible signs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
pub enum Sign {
    /// Positive.
    Pos,
    /// Negative.
    Neg,
}

impl Sign {
    #[inline]
    pub fn as_int(&self) -> i64 {
        match self {
            Self::Pos => 1,
            Self::Neg => -1,
        }
    }
}

impl std::ops::Not for Sign {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Pos => Self::Neg,
            Self::Neg => Self::Pos,
        }
    }
}

/// An enumeration of the sides of an axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
pub enum Side {
    Top,
    Right,
    Bot,
    Left,
}

impl Side {
    /// Gets the direction of the coordinate corresponding to this side.
    ///
    /// Top and bottom edges are y-coordinates, so they are on the vertical axis.
    /// Left and right edges are x-coordinates, so they are on the horizontal axis.
    pub fn coord_dir(&self) -> Dir {
        use Dir::*;
        use Side::*;
        match self {
            Top | Bot => Vert,
            Left | Right => Horiz,
        }
    }

    /// Gets the direction of the edge corresponding to this side.
    ///
    /// Top and bottom edges run horizontally; left and right edges run vertically.
    pub fn edge_dir(&self) -> Dir {
        use Dir::*;
        use Side::*;
        match self {
            Top | Bot => Horiz,
            Left | Right => Vert,
        }
    }

    /// Returns the opposite side.
    pub fn other(&self) -> Self {
        match self {
            Side::Top => Side::Bot,
            Side::Right => Side::Left,
            Side::Bot => Side::Top,
            Side::Left => Side::Right,
        }
    }

    /// Returns the sign corresponding to moving towards this side.
    pub fn sign(&self) -> Sign {
        use Side::*;
        use Sign::*;
        match self {
            Top | Right => Pos,
            Bot | Left => Neg,
        }
    }

    /// All four sides, in top/right/bottom/left order.
    pub fn all() -> impl Iterator<Item = Side> {
        [Side::Top, Side::Right, Side::Bot, Side::Left].into_iter()
    }
}

impl std::ops::Not for Side {
    type Output = Self;
    fn not(self) -> Self::Output {
        self.other()
    }
}

/// An enumeration of the corners of an axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
pub enum Corner {
    /// The lower-left corner.
    LowerLeft,
    /// The lower-right corner.
    LowerRight,
    /// The upper-left corner.
    UpperLeft,
    /// The upper-right corner.
    UpperRight,
}

impl Corner {
    /// The side this corner touches along the given direction.
    pub fn side(&self, dir: Dir) -> Side {
        use Corner::*;
        use Dir::*;
        use Side::*;
        match dir {
            Horiz => match self {
                LowerLeft | UpperLeft => Left,
                LowerRight | UpperRight => Right,
            },
            Vert => match self {
                LowerLeft | LowerRight => Bot,
                UpperLeft | UpperRight => Top,
            },
        }
    }
}

/// An open-ended geometric path with non-zero width.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Path {
    pub points: Vec<Point>,
    pub width: i64,
}

impl Translate for Path {
    fn translate(&mut self, p: Point) {
        for pt in self.points.iter_mut() {
            pt.translate(p);
        }
    }
}

/// A closed n-sided polygon.
///
/// Closure from the last point back to the first is implied;
/// the initial point need not be repeated at the end.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    /// The area of the polygon by the shoelace formula.
    ///
    /// Positive for counterclockwise vertex order.
    pub fn area(&self) -> i64 {
        let n = self.points.len();
        let mut sum = 0i64;
        for i in 0..n {
            let p = self.points[i];
            let q = self.points[(i + 1) % n];
            sum += p.x * q.y - q.x * p.y;
        }
        sum / 2
    }
}

impl Translate for Polygon {
    fn translate(&mut self, p: Point) {
        for pt in self.points.iter_mut() {
            pt.translate(p);
        }
    }
}

/// An axis-aligned rectangle, specified by lower-left and upper-right corners.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rect {
    /// The lower-left corner.
    pub p0: Point,
    /// The upper-right corner.
    pub p1: Point,
}

impl Rect {
    /// Creates a new rectangle, normalizing the corners.
    pub fn new(p0: Point, p1: Point) -> Self {
        Self {
            p0: Point::new(p0.x.min(p1.x), p0.y.min(p1.y)),
            p1: Point::new(p0.x.max(p1.x), p0.y.max(p1.y)),
        }
    }

    /// Creates a rectangle from horizontal and vertical [`Span`]s.
    pub fn from_spans(h: Span, v: Span) -> Self {
        Self {
            p0: Point::new(h.start(), v.start()),
            p1: Point::new(h.stop(), v.stop()),
        }
    }

    /// Creates a rectangle from its left, bottom, right, and top edges.
    pub fn from_sides(left: i64, bottom: i64, right: i64, top: i64) -> Self {
        Self::new(Point::new(left, bottom), Point::new(right, top))
    }

    /// Returns the center point of the rectangle.
    pub fn center(&self) -> Point {
        Point::new((self.p0.x + self.p1.x) / 2, (self.p0.y + self.p1.y) / 2)
    }

    /// Returns the bottom y-coordinate of the rectangle.
    #[inline]
    pub fn bottom(&self) -> i64 {
        self.p0.y
    }

    /// Returns the top y-coordinate of the rectangle.
    #[inline]
    pub fn top(&self) -> i64 {
        self.p1.y
    }

    /// Returns the left x-coordinate of the rectangle.
    #[inline]
    pub fn left(&self) -> i64 {
        self.p0.x
    }

    /// Returns the right x-coordinate of the rectangle.
    #[inline]
    pub fn right(&self) -> i64 {
        self.p1.x
    }

    /// Returns the horizontal span of the rectangle.
    pub fn hspan(&self) -> Span {
        Span::new(self.p0.x, self.p1.x)
    }

    /// Returns the vertical span of the rectangle.
    pub fn vspan(&self) -> Span {
        Span::new(self.p0.y, self.p1.y)
    }

    /// Returns a [`Rect`] with the given `hspan` and the same vertical span.
    pub fn with_hspan(self, hspan: Span) -> Self {
        Rect::new(
            Point::new(hspan.start(), self.p0.y),
            Point::new(hspan.stop(), self.p1.y),
        )
    }

    /// Returns a [`Rect`] with the given `vspan` and the same horizontal span.
    pub fn with_vspan(self, vspan: Span) -> Self {
        Rect::new(
            Point::new(self.p0.x, vspan.start()),
            Point::new(self.p1.x, vspan.stop()),
        )
    }

    /// Returns the span of the rectangle in the [`Dir`] `dir`.
    pub fn span(&self, dir: Dir) -> Span {
        match dir {
            Dir::Horiz => self.hspan(),
            Dir::Vert => self.vspan(),
        }
    }

    /// Returns the horizontal width of the rectangle.
    #[inline]
    pub fn width(&self) -> i64 {
        self.hspan().length()
    }

    /// Returns the vertical height of the rectangle.
    #[inline]
    pub fn height(&self) -> i64 {
        self.vspan().length()
    }

    /// Returns the area of the rectangle.
    #[inline]
    pub fn area(&self) -> i64 {
        self.width() * self.height()
    }

    /// Expands the rectangle by `amount` on all sides.
    #[inline]
    pub fn expand(&self, amount: i64) -> Self {
        Self::new(
            Point::new(self.p0.x - amount, self.p0.y - amount),
            Point::new(self.p1.x + amount, self.p1.y + amount),
        )
    }

    /// Shrinks the rectangle by `amount` on all sides.
    #[inline]
    pub fn shrink(&self, amount: i64) -> Self {
        assert!(2 * amount <= self.width());
        assert!(2 * amount <= self.height());
        Self::new(
            Point::new(self.p0.x + amount, self.p0.y + amount),
            Point::new(self.p1.x - amount, self.p1.y - amount),
        )
    }

    /// Expands the rectangle by `amount` on both sides associated with `dir`.
    #[inline]
    pub fn expand_dir(&self, dir: Dir, amount: i64) -> Self {
        match dir {
            Dir::Horiz => Self::new(
                Point::new(self.p0.x - amount, self.p0.y),
                Point::new(self.p1.x + amount, self.p1.y),
            ),
            Dir::Vert => Self::new(
                Point::new(self.p0.x, self.p0.y - amount),
                Point::new(self.p1.x, self.p1.y + amount),
            ),
        }
    }

    /// Expands the rectangle by `amount` on the given side.
    #[inline]
    pub fn expand_side(&self, side: Side, amount: i64) -> Self {
        match side {
            Side::Top => Self::new(self.p0, Point::new(self.p1.x, self.p1.y + amount)),
            Side::Bot => Self::new(Point::new(self.p0.x, self.p0.y - amount), self.p1),
            Side::Right => Self::new(self.p0, Point::new(self.p1.x + amount, self.p1.y)),
            Side::Left => Self::new(Point::new(self.p0.x - amount, self.p0.y), self.p1),
        }
    }

    /// Returns the dimensions of the rectangle as [`Dims`].
    #[inline]
    pub fn dims(&self) -> Dims {
        Dims::new(self.width(), self.height())
    }

    /// Returns the desired corner of the rectangle.
    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::LowerLeft => self.p0,
            Corner::LowerRight => Point::new(self.p1.x, self.p0.y),
            Corner::UpperLeft => Point::new(self.p0.x, self.p1.y),
            Corner::UpperRight => self.p1,
        }
    }

    /// Returns the coordinate of the given side.
    #[inline]
    pub fn side(&self, side: Side) -> i64 {
        match side {
            Side::Top => self.top(),
            Side::Bot => self.bottom(),
            Side::Right => self.right(),
            Side::Left => self.left(),
        }
    }

    /// The smallest rectangle covering both input rectangles.
    pub fn union(self, other: Self) -> Self {
        Self::from_spans(
            self.hspan().union(other.hspan()),
            self.vspan().union(other.vspan()),
        )
    }

    /// Checks whether `other` lies entirely within this rectangle.
    pub fn contains_rect(&self, other: Self) -> bool {
        self.hspan().contains(other.hspan()) && self.vspan().contains(other.vspan())
    }

    /// Snaps the corners of this rectangle to the given grid.
    ///
    /// Note that the rectangle may have zero area after snapping.
    #[inline]
    pub fn snap_to_grid(&self, grid: i64) -> Self {
        Self::new(self.p0.snap_to_grid(grid), self.p1.snap_to_grid(grid))
    }

    /// The four rectangles remaining when `clip` is cut out of this rectangle.
    ///
    /// In top/bottom/left/right order; top and bottom keep the full
    /// horizontal span.
    pub fn cutout(&self, clip: Rect) -> [Rect; 4] {
        let src = *self;
        let t_span = Span::new(clip.top(), src.top());
        let b_span = Span::new(src.bottom(), clip.bottom());
        let l_span = Span::new(src.left(), clip.left());
        let r_span = Span::new(clip.right(), src.right());

        [
            Rect::from_spans(src.hspan(), t_span),
            Rect::from_spans(src.hspan(), b_span),
            Rect::from_spans(l_span, src.vspan()),
            Rect::from_spans(r_span, src.vspan()),
        ]
    }
}

impl From<Bbox> for Rect {
    fn from(r: Bbox) -> Self {
        debug_assert!(!r.is_empty());
        Self { p0: r.p0, p1: r.p1 }
    }
}

/// The primary geometric primitive comprising raw layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[enum_dispatch(ShapeTrait)]
pub enum Shape {
    Rect(Rect),
    Polygon(Polygon),
    Path(Path),
}

impl Transform for Shape {
    fn transform(&self, trans: Transformation) -> Self {
        match self {
            Self::Rect(s) => Self::Rect(s.transform(trans)),
            Self::Polygon(s) => Self::Polygon(s.transform(trans)),
            Self::Path(s) => Self::Path(s.transform(trans)),
        }
    }
}

impl Translate for Shape {
    fn translate(&mut self, p: Point) {
        match self {
            Self::Rect(s) => s.translate(p),
            Self::Polygon(s) => s.translate(p),
            Self::Path(s) => s.translate(p),
        }
    }
}

impl Shape {
    pub fn as_rect(&self) -> Option<Rect> {
        if let Shape::Rect(rect) = self {
            Some(*rect)
        } else {
            None
        }
    }
}

/// Common shape operations, dispatched from the [`Shape`] enum to its
/// variants by [mod@enum_dispatch].
#[enum_dispatch]
pub trait ShapeTrait {
    /// Returns `true` if the shape contains [`Point`] `pt`.
    ///
    /// Containment is inclusive: points on the boundary are inside.
    fn contains(&self, pt: Point) -> bool;
}

impl ShapeTrait for Rect {
    fn contains(&self, pt: Point) -> bool {
        self.p0.x <= pt.x && self.p1.x >= pt.x && self.p0.y <= pt.y && self.p1.y >= pt.y
    }
}

impl ShapeTrait for Polygon {
    fn contains(&self, pt: Point) -> bool {
        // Cheap rejection before the winding-number walk.
        if !self.points.bbox().contains(pt) {
            return false;
        }

        let mut winding_num: isize = 0;
        for idx in 0..self.points.len() {
            // Indexing one past `points.len` closes the polygon at its first point.
            let (past, next) = (
                &self.points[idx],
                &self.points[(idx + 1) % self.points.len()],
            );

            if past.y.min(next.y) <= pt.y && past.y.max(next.y) >= pt.y {
                if next.y == past.y {
                    // Horizontal segment at the query level: a hit iff x lies in range.
                    // Such segments never contribute to the winding number.
                    if past.x.min(next.x) <= pt.x && past.x.max(next.x) >= pt.x {
                        return true;
                    }
                } else {
                    let xsolve = (next.x - past.x) * (pt.y - past.y) / (next.y - past.y) + past.x;

                    match xsolve.cmp(&pt.x) {
                        Ordering::Equal => return true,
                        Ordering::Greater => {
                            if next.y > past.y {
                                winding_num += 1;
                            } else {
                                winding_num -= 1;
                            }
                        }
                        Ordering::Less => (),
                    }
                }
            }
        }
        winding_num != 0
    }
}

impl ShapeTrait for Path {
    fn contains(&self, pt: Point) -> bool {
        // Check each segment's covering rectangle.
        // Only Manhattan paths are supported.
        let (points, width) = (&self.points, self.width);
        for k in 0..points.len() - 1 {
            let rect = if points[k].x == points[k + 1].x {
                Rect::new(
                    Point::new(points[k].x - width / 2, points[k].y),
                    Point::new(points[k].x + width / 2, points[k + 1].y),
                )
            } else if points[k].y == points[k + 1].y {
                Rect::new(
                    Point::new(points[k].x, points[k].y - width / 2),
                    Point::new(points[k + 1].x, points[k].y + width / 2),
                )
            } else {
                unimplemented!("unsupported non-Manhattan path")
            };
            if rect.contains(pt) {
                return true;
            }
        }
        false
    }
}

/// A horizontal and vertical rectangular dimension with no specified location.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize,
)]
pub struct Dims {
    /// The width dimension.
    w: i64,
    /// The height dimension.
    h: i64,
}

impl Dims {
    /// Creates a new [`Dims`] from a width and height.
    pub const fn new(w: i64, h: i64) -> Self {
        Self { w, h }
    }

    /// Creates a new [`Dims`] with width and height equal to `value`.
    pub const fn square(value: i64) -> Self {
        Self { w: value, h: value }
    }

    /// Returns the dimension in the specified direction.
    pub fn dim(&self, dir: Dir) -> i64 {
        match dir {
            Dir::Vert => self.h,
            Dir::Horiz => self.w,
        }
    }

    /// Returns the width (ie. the horizontal dimension).
    #[inline]
    pub fn width(&self) -> i64 {
        self.w
    }

    /// Returns the height (ie. the vertical dimension).
    #[inline]
    pub fn height(&self) -> i64 {
        self.h
    }

    /// A shorthand for [`Dims::width`].
    #[inline]
    pub fn w(&self) -> i64 {
        self.width()
    }

    /// A shorthand for [`Dims::height`].
    #[inline]
    pub fn h(&self) -> i64 {
        self.height()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn snap_rounds_to_nearest_multiple() {
        assert_eq!(snap_to_grid(0, 5), 0);
        assert_eq!(snap_to_grid(2, 5), 0);
        assert_eq!(snap_to_grid(3, 5), 5);
        assert_eq!(snap_to_grid(-2, 5), 0);
        assert_eq!(snap_to_grid(-3, 5), -5);
        assert_eq!(snap_to_grid(1004, 5), 1005);
    }

    #[test]
    fn point_snap_to_grid() {
        let pt = Point::new(1, 1);
        assert_eq!(pt.snap_to_grid(500), Point::zero());

        let pt = Point::new(999, 260);
        assert_eq!(pt.snap_to_grid(500), Point::new(1_000, 500));
    }

    #[test]
    fn span_constructors_normalize() {
        assert_eq!(Span::new(10, -10), Span::new(-10, 10));
        assert_eq!(Span::with_start_and_length(5, 20).stop(), 25);
        assert_eq!(Span::with_stop_and_length(5, 20).start(), -15);
        assert_eq!(Span::from_center_span(100, 40), Span::new(80, 120));
    }

    #[test]
    fn span_set_ops() {
        let a = Span::new(0, 100);
        let b = Span::new(40, 160);
        assert!(a.intersects(&b));
        assert_eq!(a.union(b), Span::new(0, 160));
        assert!(a.contains(Span::new(20, 80)));
        assert!(!a.contains(b));
        assert_eq!(a.shrink_all(10), Span::new(10, 90));
        assert_eq!(a.expand(Sign::Pos, 10), Span::new(0, 110));
    }

    #[test]
    fn rect_expansion() {
        let r = Rect::from_sides(0, 0, 100, 200);
        assert_eq!(r.expand(10), Rect::from_sides(-10, -10, 110, 210));
        assert_eq!(r.shrink(10), Rect::from_sides(10, 10, 90, 190));
        assert_eq!(
            r.expand_dir(Dir::Horiz, 25),
            Rect::from_sides(-25, 0, 125, 200)
        );
        assert_eq!(
            r.expand_side(Side::Top, 30),
            Rect::from_sides(0, 0, 100, 230)
        );
        assert_eq!(r.dims(), Dims::new(100, 200));
        assert_eq!(r.area(), 20_000);
    }

    #[test]
    fn rect_cutout_covers_frame() {
        let outer = Rect::from_sides(0, 0, 100, 100);
        let clip = Rect::from_sides(20, 30, 80, 70);
        let parts = outer.cutout(clip);
        for part in parts {
            assert!(outer.contains_rect(part));
            assert!(!part.contains(clip.center()));
        }
        assert_eq!(parts[0].vspan(), Span::new(70, 100));
        assert_eq!(parts[1].vspan(), Span::new(0, 30));
    }

    #[test]
    fn shape_transform_identity() {
        let shape1 = Shape::Rect(Rect::new(Point::new(0, 0), Point::new(1, 1)));
        let trans = Transformation::identity();
        let shape2 = shape1.transform(trans);
        assert_eq!(shape2, shape1);
    }

    #[test]
    fn shape_transform_rotate() {
        let shape1 = Shape::Rect(Rect::new(Point::new(0, 0), Point::new(1, 1)));
        let trans = Transformation::rotate(90.);
        let shape2 = shape1.transform(trans);
        assert_eq!(
            shape2,
            Shape::Rect(Rect::new(Point::new(-1, 0), Point::new(0, 1)))
        );
        let shape3 = shape2.transform(trans);
        assert_eq!(
            shape3,
            Shape::Rect(Rect::new(Point::new(-1, -1), Point::new(0, 0)))
        );
        let shape4 = shape3.transform(trans);
        let shape0 = shape4.transform(trans);
        assert_eq!(shape0, shape1);
    }

    #[test]
    fn polygon_contains() {
        // A right triangle at the origin.
        let triangle = Polygon {
            points: vec![Point::new(0, 0), Point::new(2, 0), Point::new(0, 2)],
        };
        assert!(triangle.contains(Point::new(0, 0)));
        assert!(triangle.contains(Point::new(1, 0)));
        assert!(triangle.contains(Point::new(1, 1)));
        assert!(!triangle.contains(Point::new(2, 2)));

        // A U-shaped polygon inside a 10x10 square.
        let u = Polygon {
            points: vec![
                Point::new(0, 0),
                Point::new(0, 10),
                Point::new(2, 10),
                Point::new(2, 2),
                Point::new(8, 2),
                Point::new(8, 10),
                Point::new(10, 10),
                Point::new(10, 0),
            ],
        };
        for pt in &u.points {
            assert!(u.contains(*pt));
        }
        assert!(u.contains(Point::new(1, 9)));
        assert!(u.contains(Point::new(9, 9)));
        // Inside the notch, outside the polygon.
        assert!(!u.contains(Point::new(3, 3)));
        assert!(!u.contains(Point::new(7, 9)));
    }

    #[test]
    fn polygon_area_shoelace() {
        let square = Polygon {
            points: vec![
                Point::new(0, 0),
                Point::new(10, 0),
                Point::new(10, 10),
                Point::new(0, 10),
            ],
        };
        assert_eq!(square.area(), 100);

        let mut reversed = square.clone();
        reversed.points.reverse();
        assert_eq!(reversed.area(), -100);
    }

    #[test]
    fn path_contains_manhattan() {
        let path = Path {
            points: vec![Point::new(0, 0), Point::new(100, 0), Point::new(100, 50)],
            width: 10,
        };
        assert!(path.contains(Point::new(50, 4)));
        assert!(path.contains(Point::new(100, 50)));
        assert!(!path.contains(Point::new(50, 20)));
    }
}
