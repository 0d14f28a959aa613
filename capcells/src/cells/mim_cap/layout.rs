//! MIM capacitor geometry.
//!
//! All dimensions are in nanometers on the 5 nm layout grid. The cell
//! origin sits at the lower-left corner of the cap plate.

use capgeom::{Dir, Point, Rect, Side};

use super::{MimCapParams, MimCapType};
use crate::error::Result;
use crate::layout::{Cell, LayerSpec, TextElement};
use crate::pdk::layers::Layer;
use crate::pdk::rules::{
    CAP2M_VIA_MARGIN, CAPM_BOT_ENCLOSURE, CAPM_VIA_MARGIN, MIM_FLANGE_WIDTH,
};
use crate::pdk::via::contact_array;

/// Draws a MIM capacitor into `cell`.
pub fn draw_mim_cap(cell: &mut Cell, params: &MimCapParams) -> Result<()> {
    let &MimCapParams { variant, l, w } = params;
    let (bot_metal, cap_layer, top_metal, via_margin) = match variant {
        MimCapType::CapMim => (Layer::Met3, Layer::Capm, Layer::Met4, CAPM_VIA_MARGIN),
        MimCapType::CapMimM4 => (Layer::Met4, Layer::Cap2m, Layer::Met5, CAP2M_VIA_MARGIN),
    };

    let plate = Rect::from_sides(0, 0, l, w);
    cell.draw_rect(cap_layer, plate);

    // Bottom plate, extended rightward into the connection flange.
    let bot = plate
        .expand(CAPM_BOT_ENCLOSURE)
        .expand_side(Side::Right, MIM_FLANGE_WIDTH);
    cell.draw_rect(bot_metal, bot);

    // The top terminal lands on a via array centered over the plate.
    contact_array(bot_metal, top_metal, plate.shrink(via_margin), Dir::Horiz)?.draw(cell);

    cell.add_text(TextElement::new(
        arcstr::literal!("PLUS"),
        LayerSpec::label(top_metal),
        plate.center(),
    ));
    cell.add_text(TextElement::new(
        arcstr::literal!("MINUS"),
        LayerSpec::label(bot_metal),
        Point::new(bot.right() - MIM_FLANGE_WIDTH / 2, plate.center().y),
    ));

    Ok(())
}
