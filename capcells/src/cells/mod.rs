//! Capacitor PCell generators for the sky130 process.

use crate::error::Result;
use crate::log::debug;
use crate::pcell::Params;

pub mod cap_var;
pub mod mim_cap;

/// Raises the named double parameter to `min` if it is below it.
pub(crate) fn clamp_min_double(params: &mut Params, name: &str, min: f64) -> Result<()> {
    let value = params.double(name)?;
    if value < min {
        debug!("clamping {name} from {value} up to {min}");
        params.set(name, min)?;
    }
    Ok(())
}

/// Raises the named integer parameter to `min` if it is below it.
pub(crate) fn clamp_min_int(params: &mut Params, name: &str, min: i64) -> Result<()> {
    let value = params.int(name)?;
    if value < min {
        debug!("clamping {name} from {value} up to {min}");
        params.set(name, min)?;
    }
    Ok(())
}
