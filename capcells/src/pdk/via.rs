//! Contact and via cut arrays.

use capgeom::{snap_to_grid, Dir, Rect};

use crate::error::{Error, Result};
use crate::layout::Cell;
use crate::pdk::layers::Layer;
use crate::pdk::rules::{LAYOUT_GRID, NPC_LICON_POLY_ENCLOSURE};

/// A rectangular array of contact or via cuts connecting two layers.
#[derive(Debug, Clone)]
pub struct ContactArray {
    pub bot: Layer,
    pub top: Layer,
    pub cut: Layer,
    pub cuts: Vec<Rect>,
    pub bot_rect: Rect,
    pub top_rect: Rect,
    /// Nitride cut opening; present for licon on poly.
    pub npc: Option<Rect>,
}

impl ContactArray {
    /// Draws the landing rectangles and all cuts into `cell`.
    pub fn draw(&self, cell: &mut Cell) {
        cell.draw_rect(self.bot, self.bot_rect);
        if let Some(npc) = self.npc {
            cell.draw_rect(Layer::Npc, npc);
        }
        for cut in &self.cuts {
            cell.draw_rect(self.cut, *cut);
        }
        cell.draw_rect(self.top, self.top_rect);
    }

    /// The bounding rectangle of the cut array.
    pub fn cut_bbox(&self) -> Rect {
        let first = self.cuts[0];
        self.cuts.iter().fold(first, |acc, cut| acc.union(*cut))
    }
}

fn max_cuts(len: i64, size: i64, space: i64) -> i64 {
    std::cmp::max(1, (len + space) / (size + space))
}

/// Fills `region` with the largest centered array of cuts connecting `bot`
/// to `top`.
///
/// `region` is the bottom-layer target: cuts keep the bottom-layer
/// enclosure inside it. The larger one-sided enclosures run along `dir`.
/// At least one cut is always placed, even when the region is too small to
/// enclose it.
pub fn contact_array(bot: Layer, top: Layer, region: Rect, dir: Dir) -> Result<ContactArray> {
    let (cut, size, space, bot_enc, bot_enc_one, top_enc, top_enc_one) = match (bot, top) {
        (Layer::Diff, Layer::Li1) => (Layer::Licon1, 170, 170, 40, 60, 0, 80),
        (Layer::Tap, Layer::Li1) => (Layer::Licon1, 170, 170, 0, 120, 0, 80),
        (Layer::Poly, Layer::Li1) => (Layer::Licon1, 170, 170, 50, 80, 0, 80),
        (Layer::Met3, Layer::Met4) => (Layer::Via3, 200, 200, 60, 60, 65, 65),
        (Layer::Met4, Layer::Met5) => (Layer::Via4, 800, 800, 190, 190, 310, 310),
        (bot, top) => return Err(Error::ContactNotFound(bot, top)),
    };

    let (enc_x, enc_y) = match dir {
        Dir::Horiz => (bot_enc_one, bot_enc),
        Dir::Vert => (bot_enc, bot_enc_one),
    };
    let (top_enc_x, top_enc_y) = match dir {
        Dir::Horiz => (top_enc_one, top_enc),
        Dir::Vert => (top_enc, top_enc_one),
    };

    let nx = max_cuts(region.width() - 2 * enc_x, size, space);
    let ny = max_cuts(region.height() - 2 * enc_y, size, space);
    let array_w = nx * size + (nx - 1) * space;
    let array_h = ny * size + (ny - 1) * space;
    let x0 = snap_to_grid(region.center().x - array_w / 2, LAYOUT_GRID);
    let y0 = snap_to_grid(region.center().y - array_h / 2, LAYOUT_GRID);

    let mut cuts = Vec::with_capacity((nx * ny) as usize);
    for i in 0..nx {
        for j in 0..ny {
            let x = x0 + i * (size + space);
            let y = y0 + j * (size + space);
            cuts.push(Rect::from_sides(x, y, x + size, y + size));
        }
    }

    let bbox = Rect::from_sides(x0, y0, x0 + array_w, y0 + array_h);
    let bot_rect = bbox.expand_dir(Dir::Horiz, enc_x).expand_dir(Dir::Vert, enc_y);
    let top_rect = bbox
        .expand_dir(Dir::Horiz, top_enc_x)
        .expand_dir(Dir::Vert, top_enc_y);
    let npc = (bot == Layer::Poly).then(|| bbox.expand(NPC_LICON_POLY_ENCLOSURE));

    Ok(ContactArray {
        bot,
        top,
        cut,
        cuts,
        bot_rect,
        top_rect,
        npc,
    })
}
