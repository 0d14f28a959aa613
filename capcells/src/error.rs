//! Result and error types.

use arcstr::ArcStr;
use thiserror::Error;

use crate::layout::LayerPurpose;
use crate::pdk::layers::Layer;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("no such pcell: {0}")]
    PcellNotFound(ArcStr),

    #[error("no such parameter: {0}")]
    ParamNotFound(ArcStr),

    #[error("parameter {0} is read-only")]
    ReadonlyParam(ArcStr),

    #[error("type mismatch for parameter {name}: expected {expected}, found {found}")]
    ParamType {
        name: ArcStr,
        expected: &'static str,
        found: &'static str,
    },

    #[error("unknown device model for {pcell}: {model}")]
    UnknownModel { pcell: ArcStr, model: ArcStr },

    #[error("layer {0:?} has no {1:?} purpose")]
    PurposeNotFound(Layer, LayerPurpose),

    #[error("no contact rule between {0:?} and {1:?}")]
    ContactNotFound(Layer, Layer),

    #[error("coordinate out of range for GDS: {0}")]
    CoordOverflow(#[from] std::num::TryFromIntError),

    #[error("gds error: {0}")]
    Gds(#[from] gds21::GdsError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("error parsing TOML: {0}")]
    TomlParsing(#[from] toml::de::Error),
}
