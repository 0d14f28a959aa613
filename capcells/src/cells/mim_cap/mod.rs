//! Metal-insulator-metal capacitor generator.
//!
//! Draws a cap plate between two metal levels: `Capm` between `Met3`
//! and `Met4`, or `Cap2m` between `Met4` and `Met5`. The bottom metal
//! extends past the plate on one side as a connection flange.

use arcstr::ArcStr;
use serde::{Deserialize, Serialize};

use crate::cells::clamp_min_double;
use crate::error::{Error, Result};
use crate::layout::Cell;
use crate::pcell::{ParamDecl, Params, Pcell};
use crate::pdk::rules::{
    nm_to_um, um_to_nm, MIM_FF_PER_UM2, MIM_M4_PLATE_MIN, MIM_PLATE_MIN,
};

pub mod layout;

/// The MIM capacitor stacks offered by the process.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum MimCapType {
    /// Capm plate between met3 and met4.
    CapMim,
    /// Cap2m plate between met4 and met5.
    CapMimM4,
}

impl MimCapType {
    /// The device model name of this stack.
    pub fn model(&self) -> ArcStr {
        match self {
            Self::CapMim => arcstr::literal!("sky130_fd_pr__model__cap_mim"),
            Self::CapMimM4 => arcstr::literal!("sky130_fd_pr__model__cap_mim_m4"),
        }
    }

    /// Parses a device model name.
    pub fn from_model(model: &str) -> Result<Self> {
        match model {
            "sky130_fd_pr__model__cap_mim" => Ok(Self::CapMim),
            "sky130_fd_pr__model__cap_mim_m4" => Ok(Self::CapMimM4),
            _ => Err(Error::UnknownModel {
                pcell: arcstr::literal!("mim_cap"),
                model: ArcStr::from(model),
            }),
        }
    }

    /// The minimum plate dimension of this stack, in nanometers.
    pub fn plate_min(&self) -> i64 {
        match self {
            Self::CapMim => MIM_PLATE_MIN,
            Self::CapMimM4 => MIM_M4_PLATE_MIN,
        }
    }
}

/// Validated MIM capacitor parameters.
///
/// Lengths are in nanometers, snapped to the layout grid.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct MimCapParams {
    /// Device stack.
    pub variant: MimCapType,
    /// Plate length.
    pub l: i64,
    /// Plate width.
    pub w: i64,
}

impl MimCapParams {
    /// Converts a coerced parameter table into process units.
    pub fn from_params(params: &Params) -> Result<Self> {
        Ok(Self {
            variant: MimCapType::from_model(&params.string("type")?)?,
            l: um_to_nm(params.double("l")?),
            w: um_to_nm(params.double("w")?),
        })
    }
}

/// The MIM capacitor PCell.
pub struct MimCap;

impl Pcell for MimCap {
    fn name(&self) -> ArcStr {
        arcstr::literal!("mim_cap")
    }

    fn params(&self) -> Vec<ParamDecl> {
        vec![
            ParamDecl::string(
                "type",
                "Device Type",
                &[
                    ("sky130_fd_pr__model__cap_mim", "MIM cap between met3 and met4"),
                    (
                        "sky130_fd_pr__model__cap_mim_m4",
                        "MIM cap between met4 and met5",
                    ),
                ],
                "sky130_fd_pr__model__cap_mim",
            ),
            ParamDecl::double("l", "Length", nm_to_um(MIM_PLATE_MIN)).unit("um"),
            ParamDecl::double("w", "Width", nm_to_um(MIM_PLATE_MIN)).unit("um"),
            ParamDecl::double("area", "Area", 0.0).unit("um^2").readonly(),
            ParamDecl::double("perim", "Perimeter", 0.0).unit("um").readonly(),
            ParamDecl::double("cap_value", "Cap Value", 0.0).unit("fF").readonly(),
        ]
    }

    fn display_text(&self, params: &Params) -> ArcStr {
        let l = params.double("l").unwrap_or_default();
        let w = params.double("w").unwrap_or_default();
        arcstr::format!("mimcap(L={l:.3},W={w:.3})")
    }

    fn coerce_parameters(&self, params: &mut Params) -> Result<()> {
        // The m4 stack has a larger minimum plate. Unknown models fall
        // back to the base minimum here and are rejected when drawn.
        let min = if params.string("type")? == MimCapType::CapMimM4.model() {
            nm_to_um(MIM_M4_PLATE_MIN)
        } else {
            nm_to_um(MIM_PLATE_MIN)
        };
        clamp_min_double(params, "l", min)?;
        clamp_min_double(params, "w", min)?;

        let l = params.double("l")?;
        let w = params.double("w")?;
        let area = w * l;
        params.set_output("area", area)?;
        params.set_output("perim", 2.0 * (w + l))?;
        params.set_output("cap_value", MIM_FF_PER_UM2 * area)?;
        Ok(())
    }

    fn produce(&self, params: &mut Params, cell: &mut Cell) -> Result<()> {
        self.coerce_parameters(params)?;
        let params = MimCapParams::from_params(params)?;
        layout::draw_mim_cap(cell, &params)
    }
}
