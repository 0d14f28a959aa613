//! Varactor geometry.
//!
//! All dimensions are in nanometers on the 5 nm layout grid. The cell
//! origin sits at the lower-left corner of the diffusion.

use capgeom::ring::Ring;
use capgeom::{Dir, Point, Rect, Side, Span};

use super::{CapVarParams, CapVarType};
use crate::error::Result;
use crate::layout::{Cell, LayerSpec, TextElement};
use crate::pdk::layers::Layer;
use crate::pdk::rules::{
    DIFF_EDGE_TO_GATE, DIFF_NSDM_ENCLOSURE, DIFF_NWELL_ENCLOSURE, DIFF_SPACE,
    DIFF_TO_OPPOSITE_DIFF, FINGER_SPACE, GATE_LICON_SPACE, IMPLANT_GATE_ENCLOSURE,
    LICON_DIFF_ENCLOSURE, LICON_POLY_ENCLOSURE, LICON_SPACE, LICON_WIDTH, POLY_DIFF_EXTENSION,
    POLY_LICON_DIFF_SPACE, TAP_NSDM_ENCLOSURE, TAP_PSDM_ENCLOSURE,
};
use crate::pdk::via::contact_array;

/// Draws a varactor into `cell`.
pub fn draw_cap_var(cell: &mut Cell, params: &CapVarParams) -> Result<()> {
    let &CapVarParams {
        variant,
        l,
        w,
        tap_con_col,
        gr,
        grw,
        nf,
    } = params;

    // Gate fingers at a fixed pitch inside the diffusion.
    let fingers = Span::with_start_and_length(DIFF_EDGE_TO_GATE, nf * l + (nf - 1) * FINGER_SPACE);
    let diff = Rect::from_sides(0, 0, fingers.stop() + DIFF_EDGE_TO_GATE, w);
    cell.draw_rect(Layer::Diff, diff);

    // The poly strap ganging the fingers above the diffusion.
    let strap_cuts = Span::with_start_and_length(diff.top() + POLY_LICON_DIFF_SPACE, LICON_WIDTH);
    let strap = Rect::from_spans(fingers, strap_cuts.expand_all(LICON_POLY_ENCLOSURE));
    cell.draw_rect(Layer::Poly, strap);
    contact_array(Layer::Poly, Layer::Li1, strap, Dir::Horiz)?.draw(cell);

    let mut gates = Vec::with_capacity(nf as usize);
    for i in 0..nf {
        let gate = Rect::from_spans(
            Span::with_start_and_length(fingers.start() + i * (l + FINGER_SPACE), l),
            Span::new(diff.bottom() - POLY_DIFF_EXTENSION, strap.top()),
        );
        cell.draw_rect(Layer::Poly, gate);
        gates.push(gate);
    }

    // Diffusion contact columns at both ends and in each inter-finger gap.
    let mut columns = vec![Span::with_stop_and_length(
        fingers.start() - GATE_LICON_SPACE,
        LICON_WIDTH,
    )];
    for gate in &gates {
        columns.push(Span::with_start_and_length(
            gate.right() + GATE_LICON_SPACE,
            LICON_WIDTH,
        ));
    }
    for column in columns {
        let region = Rect::from_spans(column.expand_all(LICON_DIFF_ENCLOSURE), diff.vspan());
        contact_array(Layer::Diff, Layer::Li1, region, Dir::Vert)?.draw(cell);
    }

    // The n-well tap strip to the right of the device.
    let tap_width = tap_con_col * LICON_WIDTH + (tap_con_col - 1) * LICON_SPACE;
    let tap = Rect::from_spans(
        Span::with_start_and_length(diff.right() + DIFF_SPACE, tap_width),
        diff.vspan(),
    );
    cell.draw_rect(Layer::Tap, tap);
    for i in 0..tap_con_col {
        let column = Span::with_start_and_length(
            tap.left() + i * (LICON_WIDTH + LICON_SPACE),
            LICON_WIDTH,
        );
        let region = Rect::from_spans(column, tap.vspan());
        contact_array(Layer::Tap, Layer::Li1, region, Dir::Vert)?.draw(cell);
    }

    // Implants and well.
    cell.draw_rect(
        Layer::Nsdm,
        diff.expand(DIFF_NSDM_ENCLOSURE)
            .union(tap.expand(TAP_NSDM_ENCLOSURE)),
    );
    let nwell = diff
        .expand(DIFF_NWELL_ENCLOSURE)
        .union(tap.expand(DIFF_NWELL_ENCLOSURE));
    cell.draw_rect(Layer::Nwell, nwell);

    let vt_layer = match variant {
        CapVarType::Lvt => Layer::Lvtn,
        CapVarType::Hvt => Layer::Hvtp,
    };
    cell.draw_rect(
        vt_layer,
        Rect::from_spans(fingers, diff.vspan()).expand(IMPLANT_GATE_ENCLOSURE),
    );

    if gr {
        draw_guard_ring(cell, nwell.expand(DIFF_TO_OPPOSITE_DIFF), grw)?;
    }

    cell.add_text(TextElement::new(
        variant.model(),
        LayerSpec::drawing(Layer::Text),
        Point::zero(),
    ));

    Ok(())
}

/// Draws a p+ guard ring enclosing `inner`, with contacts on every side.
fn draw_guard_ring(cell: &mut Cell, inner: Rect, grw: i64) -> Result<Ring> {
    let ring = Ring::builder().inner(inner).uniform_width(grw).build();
    for r in ring.rects() {
        cell.draw_rect(Layer::Tap, r);
        cell.draw_rect(Layer::Psdm, r.expand(TAP_PSDM_ENCLOSURE));
        cell.draw_rect(Layer::Li1, r);
    }
    for side in Side::all() {
        contact_array(
            Layer::Tap,
            Layer::Li1,
            ring.inner_rect(side),
            side.edge_dir(),
        )?
        .draw(cell);
    }
    Ok(ring)
}
