//! GDSII export for layout cells.

use std::collections::HashSet;
use std::path::Path;

use arcstr::ArcStr;
use capgeom::{Point, Shape};

use crate::error::{Error, Result};
use crate::layout::{Cell, Element, LayerSpec, TextElement};
use crate::pdk::layers::GdsLayerSpec;

/// Exports a single cell to a GDS library named after the cell.
pub fn export_cell(cell: &Cell) -> Result<gds21::GdsLibrary> {
    export_lib(cell.name(), std::slice::from_ref(cell))
}

/// Exports `cells` to a GDS library named `name`.
///
/// Structs take their cells' names; a numeric suffix disambiguates
/// duplicates.
pub fn export_lib(name: &str, cells: &[Cell]) -> Result<gds21::GdsLibrary> {
    let mut gdslib = gds21::GdsLibrary::new(name.to_string());
    gdslib.units = gds21::GdsUnits::new(1e-3, 1e-9);

    let mut names_used = HashSet::new();
    for cell in cells {
        let name = unique_name(&mut names_used, cell.name());
        gdslib.structs.push(export_struct(name, cell)?);
    }
    Ok(gdslib)
}

/// Exports `cell` and saves it to `path`, creating parent directories as
/// needed.
pub fn write_gds(cell: &Cell, path: impl AsRef<Path>) -> Result<()> {
    let lib = export_cell(cell)?;
    save_lib(&lib, path)
}

/// Saves a GDS library to `path`, creating parent directories as needed.
pub fn save_lib(lib: &gds21::GdsLibrary, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    lib.save(path)?;
    Ok(())
}

/// Loads a GDS library from `path`.
pub fn read_gds(path: impl AsRef<Path>) -> Result<gds21::GdsLibrary> {
    Ok(gds21::GdsLibrary::load(path)?)
}

fn unique_name(used: &mut HashSet<ArcStr>, name: &ArcStr) -> ArcStr {
    let name = if used.contains(name) {
        let mut i = 1;
        loop {
            let newname = arcstr::format!("{}_{}", name, i);
            if !used.contains(&newname) {
                break newname;
            }
            i += 1;
        }
    } else {
        name.clone()
    };
    used.insert(name.clone());
    name
}

/// Converts a [`Cell`] to a [`gds21::GdsStruct`] cell definition.
fn export_struct(name: ArcStr, cell: &Cell) -> Result<gds21::GdsStruct> {
    let mut elems = Vec::new();
    for elem in cell.elems() {
        elems.push(export_element(elem)?);
    }
    for annotation in cell.annotations() {
        elems.push(export_annotation(annotation)?);
    }

    let mut strukt = gds21::GdsStruct::new(name);
    strukt.elems = elems;
    Ok(strukt)
}

fn export_layerspec(spec: &LayerSpec) -> Result<GdsLayerSpec> {
    spec.gds_spec()
        .ok_or(Error::PurposeNotFound(spec.layer(), spec.purpose()))
}

fn export_element(elem: &Element) -> Result<gds21::GdsElement> {
    let layerspec = export_layerspec(&elem.layer)?;
    export_shape(&elem.shape, layerspec)
}

/// Converts a [`Shape`] to a [`gds21::GdsElement`].
///
/// GDS shapes include an explicit repetition of their origin for closure,
/// so an N-sided polygon is described by an (N+1)-point vector.
fn export_shape(shape: &Shape, layerspec: GdsLayerSpec) -> Result<gds21::GdsElement> {
    let elem = match shape {
        Shape::Rect(r) => {
            let (p0, p1) = (&r.p0, &r.p1);
            let x0 = p0.x.try_into()?;
            let y0 = p0.y.try_into()?;
            let x1 = p1.x.try_into()?;
            let y1 = p1.y.try_into()?;
            let xy = gds21::GdsPoint::vec(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]);
            gds21::GdsBoundary {
                layer: layerspec.0,
                datatype: layerspec.1,
                xy,
                ..Default::default()
            }
            .into()
        }
        Shape::Polygon(poly) => {
            let mut xy = poly
                .points
                .iter()
                .map(export_point)
                .collect::<Result<Vec<_>>>()?;
            xy.push(export_point(&poly.points[0])?);
            gds21::GdsBoundary {
                layer: layerspec.0,
                datatype: layerspec.1,
                xy,
                ..Default::default()
            }
            .into()
        }
        Shape::Path(path) => {
            let xy = path
                .points
                .iter()
                .map(export_point)
                .collect::<Result<Vec<_>>>()?;
            gds21::GdsPath {
                layer: layerspec.0,
                datatype: layerspec.1,
                width: Some(i32::try_from(path.width)?),
                xy,
                ..Default::default()
            }
            .into()
        }
    };
    Ok(elem)
}

/// Converts a [`TextElement`] to a [`gds21::GdsElement`].
fn export_annotation(text_elem: &TextElement) -> Result<gds21::GdsElement> {
    let layerspec = export_layerspec(&text_elem.layer)?;
    Ok(gds21::GdsTextElem {
        string: text_elem.string.clone(),
        layer: layerspec.0,
        texttype: layerspec.1,
        xy: export_point(&text_elem.loc)?,
        strans: None,
        ..Default::default()
    }
    .into())
}

fn export_point(pt: &Point) -> Result<gds21::GdsPoint> {
    let x = pt.x.try_into()?;
    let y = pt.y.try_into()?;
    Ok(gds21::GdsPoint::new(x, y))
}

#[cfg(test)]
mod tests {
    use capgeom::{Path, Polygon, Rect};

    use super::*;
    use crate::layout::LayerPurpose;
    use crate::pdk::layers::Layer;

    fn test_cell() -> Cell {
        let mut cell = Cell::new("test_cell");
        cell.draw_rect(Layer::Met3, Rect::from_sides(0, 0, 2_000, 2_000));
        cell.draw(
            LayerSpec::drawing(Layer::Met4),
            Polygon {
                points: vec![
                    Point::new(0, 0),
                    Point::new(100, 0),
                    Point::new(100, 100),
                ],
            },
        );
        cell.draw(
            LayerSpec::drawing(Layer::Met5),
            Path {
                points: vec![Point::new(0, 0), Point::new(500, 0)],
                width: 100,
            },
        );
        cell.add_text(TextElement::new(
            "PLUS",
            LayerSpec::label(Layer::Met4),
            Point::new(1_000, 1_000),
        ));
        cell
    }

    #[test]
    fn export_units_and_struct_count() {
        let cell = test_cell();
        let lib = export_cell(&cell).unwrap();
        assert_eq!(lib.structs.len(), 1);
        float_eq::assert_float_eq!(lib.units.db_unit(), 1e-9, abs <= 1e-18);
        assert_eq!(lib.structs[0].elems.len(), 4);
    }

    #[test]
    fn rect_boundary_is_closed() {
        let cell = test_cell();
        let lib = export_cell(&cell).unwrap();
        let gds21::GdsElement::GdsBoundary(ref b) = lib.structs[0].elems[0] else {
            panic!("expected a boundary element");
        };
        assert_eq!(b.layer, 70);
        assert_eq!(b.datatype, 20);
        assert_eq!(b.xy.len(), 5);
        assert_eq!(b.xy.first(), b.xy.last());
    }

    #[test]
    fn polygon_repeats_first_point() {
        let cell = test_cell();
        let lib = export_cell(&cell).unwrap();
        let gds21::GdsElement::GdsBoundary(ref b) = lib.structs[0].elems[1] else {
            panic!("expected a boundary element");
        };
        assert_eq!(b.xy.len(), 4);
        assert_eq!(b.xy.first(), b.xy.last());
    }

    #[test]
    fn path_carries_width() {
        let cell = test_cell();
        let lib = export_cell(&cell).unwrap();
        let gds21::GdsElement::GdsPath(ref p) = lib.structs[0].elems[2] else {
            panic!("expected a path element");
        };
        assert_eq!(p.width, Some(100));
        assert_eq!(p.xy.len(), 2);
    }

    #[test]
    fn text_exports_on_label_purpose() {
        let cell = test_cell();
        let lib = export_cell(&cell).unwrap();
        let gds21::GdsElement::GdsTextElem(ref t) = lib.structs[0].elems[3] else {
            panic!("expected a text element");
        };
        assert_eq!(t.string, "PLUS");
        assert_eq!(t.layer, 71);
        assert_eq!(t.texttype, 5);
    }

    #[test]
    fn missing_purpose_is_an_error() {
        let mut cell = Cell::new("bad");
        cell.draw(
            LayerSpec::pin(Layer::Licon1),
            Rect::from_sides(0, 0, 10, 10),
        );
        let err = export_cell(&cell).unwrap_err();
        assert!(matches!(
            err,
            Error::PurposeNotFound(Layer::Licon1, LayerPurpose::Pin)
        ));
    }

    #[test]
    fn duplicate_cell_names_get_suffixes() {
        let cells = vec![Cell::new("cap"), Cell::new("cap"), Cell::new("cap")];
        let lib = export_lib("caps", &cells).unwrap();
        let names: Vec<_> = lib.structs.iter().map(|s| s.name.to_string()).collect();
        assert_eq!(names, vec!["cap", "cap_1", "cap_2"]);
    }
}
