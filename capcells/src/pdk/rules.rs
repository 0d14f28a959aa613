//! Named sky130 DRC constants, in nanometers.
//!
//! These are generation inputs: the drawing routines size and place
//! geometry from them, but nothing here checks a finished layout.

use capgeom::snap_to_grid;

pub const LAYOUT_GRID: i64 = 5;

pub const DIFF_POLY_EXTENSION: i64 = 250;
pub const GATE_LICON_SPACE: i64 = 55;
pub const LICON_WIDTH: i64 = 170;
pub const LICON_SPACE: i64 = 170;
pub const LICON_DIFF_ENCLOSURE: i64 = 40;
pub const LICON_POLY_ENCLOSURE: i64 = 50;
pub const POLY_LICON_DIFF_SPACE: i64 = 190;
pub const LI1_WIDTH: i64 = 170;
pub const POLY_SPACE: i64 = 210;
pub const DIFF_NWELL_SPACE: i64 = 340;
pub const DIFF_NWELL_ENCLOSURE: i64 = 180;
pub const DIFF_SPACE: i64 = 270;
pub const DIFF_PSDM_ENCLOSURE: i64 = 125;
pub const DIFF_NSDM_ENCLOSURE: i64 = 125;
pub const TAP_NSDM_ENCLOSURE: i64 = 125;
pub const TAP_PSDM_ENCLOSURE: i64 = 125;
pub const POLY_DIFF_EXTENSION: i64 = 130;
pub const NPC_LICON_POLY_ENCLOSURE: i64 = 100;
pub const IMPLANT_GATE_ENCLOSURE: i64 = 180;

// MIM stack construction rules.
pub const CAPM_BOT_ENCLOSURE: i64 = 140;
pub const CAPM_VIA_MARGIN: i64 = 140;
pub const CAP2M_VIA_MARGIN: i64 = 200;
pub const MIM_FLANGE_WIDTH: i64 = 500;

// Device minima the parameter coercion clamps to.
pub const CAP_VAR_L_MIN: i64 = 180;
pub const CAP_VAR_W_MIN: i64 = 1_000;
pub const GUARD_RING_W_MIN: i64 = 170;
pub const MIM_PLATE_MIN: i64 = 2_000;
pub const MIM_M4_PLATE_MIN: i64 = 2_160;

// Capacitance densities, fF/um^2.
pub const CAP_VAR_FF_PER_UM2: f64 = 4.4;
pub const MIM_FF_PER_UM2: f64 = 2.0;

const fn max(a: i64, b: i64) -> i64 {
    [a, b][(a < b) as usize]
}

pub const DIFF_EDGE_TO_GATE: i64 = max(
    DIFF_POLY_EXTENSION,
    GATE_LICON_SPACE + LICON_WIDTH + LICON_DIFF_ENCLOSURE,
);
pub const FINGER_SPACE: i64 = max(2 * GATE_LICON_SPACE + LI1_WIDTH, POLY_SPACE);
pub const DIFF_TO_OPPOSITE_DIFF: i64 = DIFF_NWELL_SPACE + DIFF_NWELL_ENCLOSURE;

/// Converts a user-facing micrometer dimension to grid-snapped nanometers.
pub fn um_to_nm(um: f64) -> i64 {
    snap_to_grid((um * 1_000.0).round() as i64, LAYOUT_GRID)
}

/// Converts nanometers to micrometers.
pub fn nm_to_um(nm: i64) -> f64 {
    nm as f64 / 1_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_constants() {
        assert_eq!(DIFF_EDGE_TO_GATE, 265);
        assert_eq!(FINGER_SPACE, 280);
        assert_eq!(DIFF_TO_OPPOSITE_DIFF, 520);
    }

    #[test]
    fn um_conversion_snaps_to_grid() {
        assert_eq!(um_to_nm(0.18), 180);
        assert_eq!(um_to_nm(1.0), 1_000);
        assert_eq!(um_to_nm(2.16), 2_160);
        assert_eq!(um_to_nm(0.1234), 125);
        assert_eq!(nm_to_um(180), 0.18);
    }
}
