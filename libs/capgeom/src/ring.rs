//! Rectangular ring geometry.
//!
//! Useful for drawing structures that enclose other structures,
//! such as guard rings.

use serde::{Deserialize, Serialize};

use super::bbox::{Bbox, BoundBox};
use super::transform::{Translate, TranslateOwned};
use super::{Corner, Dir, Point, Rect, Side, Sign, Span};

/// A rectangular ring surrounding an enclosed rectangle.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ring {
    /// Vertical span of the top segment.
    topv: Span,
    /// Vertical span of the bottom segment.
    botv: Span,
    /// Horizontal span of the left segment.
    lefth: Span,
    /// Horizontal span of the right segment.
    righth: Span,
}

/// The ways [`Ring`] geometry can be anchored.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
enum RingContents {
    /// The ring must fit within the given rectangle.
    Outer(Rect),
    /// The ring must enclose the given rectangle.
    Inner(Rect),
}

impl RingContents {
    fn rect(&self) -> Rect {
        match self {
            Self::Outer(r) => *r,
            Self::Inner(r) => *r,
        }
    }

    fn is_outer(&self) -> bool {
        matches!(self, Self::Outer(_))
    }
}

/// Builds a [`Ring`] from an anchor rectangle and per-side widths.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RingBuilder {
    contents: Option<RingContents>,
    left: i64,
    right: i64,
    bot: i64,
    top: i64,
}

impl Ring {
    #[inline]
    pub fn builder() -> RingBuilder {
        RingBuilder::new()
    }

    fn is_valid(&self) -> bool {
        self.topv.start() > self.botv.stop() && self.righth.start() > self.lefth.stop()
    }

    pub fn outer_hspan(&self) -> Span {
        Span::new(self.lefth.start(), self.righth.stop())
    }

    pub fn inner_hspan(&self) -> Span {
        Span::new(self.lefth.stop(), self.righth.start())
    }

    pub fn outer_vspan(&self) -> Span {
        Span::new(self.botv.start(), self.topv.stop())
    }

    pub fn inner_vspan(&self) -> Span {
        Span::new(self.botv.stop(), self.topv.start())
    }

    /// The rectangle bounding the outside of the ring.
    pub fn outer(&self) -> Rect {
        Rect::from_spans(self.outer_hspan(), self.outer_vspan())
    }

    /// The rectangular hole enclosed by the ring.
    pub fn inner(&self) -> Rect {
        Rect::from_spans(self.inner_hspan(), self.inner_vspan())
    }

    /// The full segment rectangle on the given side.
    ///
    /// Top and bottom segments span the full outer width, so adjacent
    /// segments share their corner squares.
    #[inline]
    pub fn rect(&self, side: Side) -> Rect {
        match side {
            Side::Top => Rect::from_spans(self.outer_hspan(), self.topv),
            Side::Right => Rect::from_spans(self.righth, self.outer_vspan()),
            Side::Bot => Rect::from_spans(self.outer_hspan(), self.botv),
            Side::Left => Rect::from_spans(self.lefth, self.outer_vspan()),
        }
    }

    /// The segment rectangle on the given side, trimmed to the inner span
    /// (corner squares excluded).
    #[inline]
    pub fn inner_rect(&self, side: Side) -> Rect {
        match side {
            Side::Top => Rect::from_spans(self.inner_hspan(), self.topv),
            Side::Right => Rect::from_spans(self.righth, self.inner_vspan()),
            Side::Bot => Rect::from_spans(self.inner_hspan(), self.botv),
            Side::Left => Rect::from_spans(self.lefth, self.inner_vspan()),
        }
    }

    /// The corner square where two segments overlap.
    #[inline]
    pub fn corner(&self, corner: Corner) -> Rect {
        match corner {
            Corner::LowerLeft => Rect::from_spans(self.lefth, self.botv),
            Corner::UpperLeft => Rect::from_spans(self.lefth, self.topv),
            Corner::LowerRight => Rect::from_spans(self.righth, self.botv),
            Corner::UpperRight => Rect::from_spans(self.righth, self.topv),
        }
    }

    /// All four segment rectangles.
    #[inline]
    pub fn rects(&self) -> [Rect; 4] {
        [
            self.rect(Side::Top),
            self.rect(Side::Right),
            self.rect(Side::Bot),
            self.rect(Side::Left),
        ]
    }

    /// The horizontally-running segments (bottom and top).
    #[inline]
    pub fn hrects(&self) -> [Rect; 2] {
        [self.rect(Side::Bot), self.rect(Side::Top)]
    }

    /// The vertically-running segments (left and right).
    #[inline]
    pub fn vrects(&self) -> [Rect; 2] {
        [self.rect(Side::Left), self.rect(Side::Right)]
    }

    /// The corner-trimmed segment rectangles on all four sides.
    pub fn inner_rects(&self) -> [Rect; 4] {
        [
            self.inner_rect(Side::Top),
            self.inner_rect(Side::Right),
            self.inner_rect(Side::Bot),
            self.inner_rect(Side::Left),
        ]
    }

    /// The segments running in the given direction.
    pub fn dir_rects(&self, dir: Dir) -> [Rect; 2] {
        match dir {
            Dir::Horiz => self.hrects(),
            Dir::Vert => self.vrects(),
        }
    }
}

impl BoundBox for Ring {
    #[inline]
    fn bbox(&self) -> Bbox {
        self.outer().bbox()
    }

    #[inline]
    fn brect(&self) -> Rect {
        self.outer()
    }
}

impl Translate for Ring {
    fn translate(&mut self, p: Point) {
        *self = self.translate_owned(p);
    }
}

impl TranslateOwned for Ring {
    fn translate_owned(self, p: Point) -> Self {
        Self {
            lefth: self.lefth.translate(p.x),
            righth: self.righth.translate(p.x),
            topv: self.topv.translate(p.y),
            botv: self.botv.translate(p.y),
        }
    }
}

impl From<RingBuilder> for Ring {
    fn from(value: RingBuilder) -> Self {
        let contents = value.contents.expect("ring anchor rect not specified");
        let r = contents.rect();

        // Segments grow outward from an inner anchor, inward from an outer one.
        let sign = if contents.is_outer() {
            Sign::Pos
        } else {
            Sign::Neg
        };

        let topv = Span::with_point_and_length(sign, r.top(), value.top);
        let righth = Span::with_point_and_length(sign, r.right(), value.right);
        let lefth = Span::with_point_and_length(!sign, r.left(), value.left);
        let botv = Span::with_point_and_length(!sign, r.bottom(), value.bot);

        let res = Self {
            topv,
            botv,
            lefth,
            righth,
        };

        if contents.is_outer() {
            assert_eq!(res.outer(), r);
        } else {
            assert_eq!(res.inner(), r);
        }
        assert!(res.is_valid());
        res
    }
}

impl RingBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn build(&mut self) -> Ring {
        Ring::from(*self)
    }

    /// Anchors the ring so that it fits inside the given rectangle.
    pub fn outer(&mut self, rect: Rect) -> &mut Self {
        self.contents = Some(RingContents::Outer(rect));
        self
    }

    /// Anchors the ring so that it encloses the given rectangle.
    pub fn inner(&mut self, rect: Rect) -> &mut Self {
        self.contents = Some(RingContents::Inner(rect));
        self
    }

    pub fn left_width(&mut self, value: i64) -> &mut Self {
        self.left = value;
        self
    }

    pub fn right_width(&mut self, value: i64) -> &mut Self {
        self.right = value;
        self
    }

    pub fn bot_height(&mut self, value: i64) -> &mut Self {
        self.bot = value;
        self
    }

    pub fn top_height(&mut self, value: i64) -> &mut Self {
        self.top = value;
        self
    }

    /// Sets the widths of the vertical-going parts of the ring to the given value.
    pub fn widths(&mut self, value: i64) -> &mut Self {
        self.left_width(value);
        self.right_width(value)
    }

    /// Sets the heights of the horizontal-going parts of the ring to the given value.
    pub fn heights(&mut self, value: i64) -> &mut Self {
        self.top_height(value);
        self.bot_height(value)
    }

    /// Sets the width of all ring edges to the given value.
    pub fn uniform_width(&mut self, value: i64) -> &mut Self {
        self.widths(value);
        self.heights(value)
    }
}
