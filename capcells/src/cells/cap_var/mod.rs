//! MOS varactor generator.
//!
//! Draws an accumulation-mode varactor: `nf` poly gate fingers over a
//! shared n+ diffusion in an n-well, ganged by a poly strap, with an
//! n-well tap strip and an optional p+ guard ring.

use arcstr::ArcStr;
use serde::{Deserialize, Serialize};

use crate::cells::{clamp_min_double, clamp_min_int};
use crate::error::{Error, Result};
use crate::layout::Cell;
use crate::pcell::{ParamDecl, Params, Pcell};
use crate::pdk::rules::{
    nm_to_um, um_to_nm, CAP_VAR_FF_PER_UM2, CAP_VAR_L_MIN, CAP_VAR_W_MIN, GUARD_RING_W_MIN,
};

pub mod layout;

/// The varactor flavors offered by the process.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CapVarType {
    /// Low threshold voltage.
    Lvt,
    /// High threshold voltage.
    Hvt,
}

impl CapVarType {
    /// The device model name of this flavor.
    pub fn model(&self) -> ArcStr {
        match self {
            Self::Lvt => arcstr::literal!("sky130_fd_pr__cap_var_lvt"),
            Self::Hvt => arcstr::literal!("sky130_fd_pr__cap_var_hvt"),
        }
    }

    /// Parses a device model name.
    pub fn from_model(model: &str) -> Result<Self> {
        match model {
            "sky130_fd_pr__cap_var_lvt" => Ok(Self::Lvt),
            "sky130_fd_pr__cap_var_hvt" => Ok(Self::Hvt),
            _ => Err(Error::UnknownModel {
                pcell: arcstr::literal!("cap_var"),
                model: ArcStr::from(model),
            }),
        }
    }
}

/// Validated varactor parameters.
///
/// Lengths are in nanometers, snapped to the layout grid.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CapVarParams {
    /// Device flavor.
    pub variant: CapVarType,
    /// Gate length.
    pub l: i64,
    /// Gate width.
    pub w: i64,
    /// Number of licon columns in the n-well tap.
    pub tap_con_col: i64,
    /// Whether to draw a guard ring.
    pub gr: bool,
    /// Guard ring width.
    pub grw: i64,
    /// Number of gate fingers.
    pub nf: i64,
}

impl CapVarParams {
    /// Converts a coerced parameter table into process units.
    pub fn from_params(params: &Params) -> Result<Self> {
        Ok(Self {
            variant: CapVarType::from_model(&params.string("type")?)?,
            l: um_to_nm(params.double("l")?),
            w: um_to_nm(params.double("w")?),
            tap_con_col: params.int("tap_con_col")?,
            gr: params.bool("gr")?,
            grw: um_to_nm(params.double("grw")?),
            nf: params.int("nf")?,
        })
    }
}

/// The varactor PCell.
pub struct CapVar;

impl Pcell for CapVar {
    fn name(&self) -> ArcStr {
        arcstr::literal!("cap_var")
    }

    fn params(&self) -> Vec<ParamDecl> {
        vec![
            ParamDecl::string(
                "type",
                "Device Type",
                &[
                    (
                        "sky130_fd_pr__cap_var_lvt",
                        "Low threshold voltage varactor",
                    ),
                    (
                        "sky130_fd_pr__cap_var_hvt",
                        "High threshold voltage varactor",
                    ),
                ],
                "sky130_fd_pr__cap_var_lvt",
            ),
            ParamDecl::double("l", "Length", nm_to_um(CAP_VAR_L_MIN)).unit("um"),
            ParamDecl::double("w", "Width", nm_to_um(CAP_VAR_W_MIN)).unit("um"),
            ParamDecl::int("tap_con_col", "Tap Contacts Columns", 1),
            ParamDecl::bool("gr", "Guard Ring", false),
            ParamDecl::double("grw", "Guard Ring Width", nm_to_um(GUARD_RING_W_MIN)).unit("um"),
            ParamDecl::int("nf", "Number of Fingers", 1),
            ParamDecl::double("area", "Area", 0.0).unit("um^2").readonly(),
            ParamDecl::double("perim", "Perimeter", 0.0).unit("um").readonly(),
            ParamDecl::double("cap_value", "Cap Value", 0.0).unit("fF").readonly(),
        ]
    }

    fn display_text(&self, params: &Params) -> ArcStr {
        let l = params.double("l").unwrap_or_default();
        let w = params.double("w").unwrap_or_default();
        arcstr::format!("Varactor(L={l:.3},W={w:.3})")
    }

    fn coerce_parameters(&self, params: &mut Params) -> Result<()> {
        clamp_min_double(params, "l", nm_to_um(CAP_VAR_L_MIN))?;
        clamp_min_double(params, "w", nm_to_um(CAP_VAR_W_MIN))?;
        clamp_min_double(params, "grw", nm_to_um(GUARD_RING_W_MIN))?;
        clamp_min_int(params, "tap_con_col", 1)?;
        clamp_min_int(params, "nf", 1)?;

        let l = params.double("l")?;
        let w = params.double("w")?;
        let area = w * l;
        params.set_output("area", area)?;
        params.set_output("perim", 2.0 * (w + l))?;
        params.set_output("cap_value", CAP_VAR_FF_PER_UM2 * area)?;
        Ok(())
    }

    fn produce(&self, params: &mut Params, cell: &mut Cell) -> Result<()> {
        self.coerce_parameters(params)?;
        let params = CapVarParams::from_params(params)?;
        layout::draw_cap_var(cell, &params)
    }
}

#[cfg(test)]
mod tests {
    use capgeom::{Rect, Shape};
    use float_eq::assert_float_eq;

    use super::*;

    #[test]
    fn coercion_clamps_to_process_minima() {
        let pcell = CapVar;
        let mut params = Params::from_decls(pcell.params());
        params.set("l", 0.05).unwrap();
        params.set("w", 0.5).unwrap();
        params.set("grw", 0.1).unwrap();
        params.set("tap_con_col", 0i64).unwrap();
        params.set("nf", -2i64).unwrap();
        pcell.coerce_parameters(&mut params).unwrap();

        assert_float_eq!(params.double("l").unwrap(), 0.18, abs <= 1e-12);
        assert_float_eq!(params.double("w").unwrap(), 1.0, abs <= 1e-12);
        assert_float_eq!(params.double("grw").unwrap(), 0.17, abs <= 1e-12);
        assert_eq!(params.int("tap_con_col").unwrap(), 1);
        assert_eq!(params.int("nf").unwrap(), 1);
    }

    #[test]
    fn outputs_follow_clamped_inputs() {
        let pcell = CapVar;
        let mut params = Params::from_decls(pcell.params());
        params.set("l", 2.0).unwrap();
        params.set("w", 3.0).unwrap();
        pcell.coerce_parameters(&mut params).unwrap();

        assert_float_eq!(params.double("area").unwrap(), 6.0, abs <= 1e-12);
        assert_float_eq!(params.double("perim").unwrap(), 10.0, abs <= 1e-12);
        assert_float_eq!(params.double("cap_value").unwrap(), 26.4, abs <= 1e-9);
    }

    #[test]
    fn coercion_is_idempotent() {
        let pcell = CapVar;
        let mut params = Params::from_decls(pcell.params());
        params.set("l", 0.01).unwrap();
        pcell.coerce_parameters(&mut params).unwrap();
        let once = params.clone();
        pcell.coerce_parameters(&mut params).unwrap();
        assert_eq!(params, once);
    }

    #[test]
    fn display_text_uses_three_decimals() {
        let pcell = CapVar;
        let mut params = Params::from_decls(pcell.params());
        params.set("l", 1.0).unwrap();
        params.set("w", 2.5).unwrap();
        assert_eq!(
            pcell.display_text(&params),
            "Varactor(L=1.000,W=2.500)"
        );
    }

    #[test]
    fn unknown_model_is_rejected() {
        assert!(matches!(
            CapVarType::from_model("sky130_fd_pr__cap_var_ulvt"),
            Err(Error::UnknownModel { .. })
        ));
        assert_eq!(
            CapVarType::from_model("sky130_fd_pr__cap_var_hvt").unwrap(),
            CapVarType::Hvt
        );
    }

    #[test]
    fn typed_params_are_in_nanometers() {
        let pcell = CapVar;
        let mut params = Params::from_decls(pcell.params());
        pcell.coerce_parameters(&mut params).unwrap();
        let typed = CapVarParams::from_params(&params).unwrap();
        assert_eq!(typed.variant, CapVarType::Lvt);
        assert_eq!(typed.l, 180);
        assert_eq!(typed.w, 1_000);
        assert_eq!(typed.grw, 170);
        assert_eq!(typed.tap_con_col, 1);
        assert_eq!(typed.nf, 1);
        assert!(!typed.gr);
    }

    #[test]
    fn parameters_from_shape_take_bbox_dimensions() {
        let pcell = CapVar;
        let shape = Shape::from(Rect::from_sides(0, 0, 2_000, 3_000));
        assert!(pcell.can_create_from_shape(&shape));

        let params = pcell.parameters_from_shape(&shape).unwrap();
        assert_float_eq!(params.double("w").unwrap(), 2.0, abs <= 1e-12);
        assert_float_eq!(params.double("l").unwrap(), 3.0, abs <= 1e-12);

        let trans = pcell.transformation_from_shape(&shape);
        assert_eq!(trans.offset_point(), capgeom::Point::new(1_000, 1_500));
    }
}
