//! The layout cell model.
//!
//! Cells generated by this crate are flat: a [`Cell`] holds primitive
//! shape [`Element`]s and [`TextElement`] annotations, never instances of
//! other cells.

use arcstr::ArcStr;
use capgeom::bbox::{Bbox, BoundBox};
use capgeom::{Point, Rect, Shape};
use serde::{Deserialize, Serialize};

use crate::pdk::layers::{GdsLayerSpec, Layer};

pub mod gds;

/// An enumeration of layer purposes.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LayerPurpose {
    Drawing,
    Pin,
    Label,
}

/// A layer paired with the purpose shapes on it serve.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LayerSpec(Layer, LayerPurpose);

impl LayerSpec {
    /// Creates a new [`LayerSpec`].
    #[inline]
    pub fn new(layer: Layer, purpose: LayerPurpose) -> Self {
        Self(layer, purpose)
    }

    /// Returns the spec for the drawing purpose of `layer`.
    pub fn drawing(layer: Layer) -> Self {
        Self(layer, LayerPurpose::Drawing)
    }

    /// Returns the spec for the pin purpose of `layer`.
    pub fn pin(layer: Layer) -> Self {
        Self(layer, LayerPurpose::Pin)
    }

    /// Returns the spec for the label purpose of `layer`.
    pub fn label(layer: Layer) -> Self {
        Self(layer, LayerPurpose::Label)
    }

    /// Returns the layer of this spec.
    #[inline]
    pub fn layer(&self) -> Layer {
        self.0
    }

    /// Returns the purpose of this spec.
    #[inline]
    pub fn purpose(&self) -> LayerPurpose {
        self.1
    }

    /// The GDS layer/datatype pair for this layer and purpose, if one is
    /// defined.
    pub fn gds_spec(&self) -> Option<GdsLayerSpec> {
        match self.1 {
            LayerPurpose::Drawing => Some(self.0.gds_layer()),
            LayerPurpose::Pin => self.0.gds_pin_layer(),
            LayerPurpose::Label => self.0.gds_label_layer(),
        }
    }
}

/// A primitive layout element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Element {
    /// The layer spec where the element is located.
    pub layer: LayerSpec,
    /// The element's shape.
    pub shape: Shape,
}

/// A text annotation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextElement {
    /// The string value of the annotation.
    pub string: ArcStr,
    /// The location of the annotation.
    pub loc: Point,
    /// The layer on which the annotation resides.
    pub layer: LayerSpec,
}

impl TextElement {
    pub fn new(string: impl Into<ArcStr>, layer: LayerSpec, loc: Point) -> Self {
        Self {
            string: string.into(),
            loc,
            layer,
        }
    }
}

/// A flat layout cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    name: ArcStr,
    elems: Vec<Element>,
    annotations: Vec<TextElement>,
}

impl Cell {
    /// Creates a new, empty cell named `name`.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            elems: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Returns the name of the cell.
    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// Renames the cell.
    #[inline]
    pub fn set_name(&mut self, name: impl Into<ArcStr>) {
        self.name = name.into();
    }

    /// Draws a shape on the given layer spec.
    pub fn draw(&mut self, layer: LayerSpec, shape: impl Into<Shape>) {
        self.elems.push(Element {
            layer,
            shape: shape.into(),
        });
    }

    /// Draws a rectangle on the drawing purpose of `layer`.
    pub fn draw_rect(&mut self, layer: Layer, rect: Rect) {
        self.draw(LayerSpec::drawing(layer), rect);
    }

    /// Adds a text annotation to the cell.
    #[inline]
    pub fn add_text(&mut self, text: TextElement) {
        self.annotations.push(text);
    }

    /// Returns an iterator over the elements in the cell.
    #[inline]
    pub fn elems(&self) -> impl Iterator<Item = &Element> {
        self.elems.iter()
    }

    /// Returns an iterator over the annotations in the cell.
    #[inline]
    pub fn annotations(&self) -> impl Iterator<Item = &TextElement> {
        self.annotations.iter()
    }

    /// Returns the elements on `layer`, any purpose.
    pub fn elems_on(&self, layer: Layer) -> impl Iterator<Item = &Element> {
        self.elems.iter().filter(move |e| e.layer.layer() == layer)
    }

    /// Returns the rectangular elements on `layer`, any purpose.
    pub fn rects_on(&self, layer: Layer) -> impl Iterator<Item = Rect> + '_ {
        self.elems_on(layer).filter_map(|e| e.shape.as_rect())
    }
}

impl BoundBox for Cell {
    /// A bounding box surrounding all elements in the cell.
    fn bbox(&self) -> Bbox {
        let mut bbox = Bbox::empty();
        for elem in &self.elems {
            bbox = elem.shape.union(bbox);
        }
        bbox
    }
}
