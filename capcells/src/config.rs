//! Batch generation from a TOML configuration.
//!
//! A configuration names a set of PCell instances with parameter
//! overrides; [`generate`] turns it into cells and [`write_cells`]
//! exports them as a single GDS library.
//!
//! ```toml
//! lib = "caps"
//!
//! [[cap]]
//! cell = "cap_var"
//! name = "var_2x5"
//! params = { l = 2.0, w = 5.0, nf = 4, gr = true }
//!
//! [[cap]]
//! cell = "mim_cap"
//! params = { type = "sky130_fd_pr__model__cap_mim_m4" }
//! ```

use std::collections::HashMap;
use std::path::Path;

use arcstr::ArcStr;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::gds::{export_lib, save_lib};
use crate::layout::Cell;
use crate::log::info;
use crate::pcell::library::Library;
use crate::pcell::ParamValue;

/// A batch of capacitor instances to generate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapsConfig {
    /// The name of the exported GDS library.
    #[serde(default = "default_lib")]
    pub lib: ArcStr,
    /// The instances to generate.
    #[serde(default, rename = "cap")]
    pub caps: Vec<CapInstance>,
}

fn default_lib() -> ArcStr {
    arcstr::literal!("sky130_caps")
}

/// A single instance in a [`CapsConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapInstance {
    /// The PCell to instantiate.
    pub cell: ArcStr,
    /// Overrides the display-text derived cell name.
    pub name: Option<ArcStr>,
    /// Parameter overrides.
    #[serde(default)]
    pub params: HashMap<ArcStr, ParamValue>,
}

/// Reads a configuration from a TOML file.
pub fn read_config(path: impl AsRef<Path>) -> Result<CapsConfig> {
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// Generates all cells named by `config`.
pub fn generate(config: &CapsConfig) -> Result<Vec<Cell>> {
    let lib = Library::sky130_caps();
    let mut cells = Vec::with_capacity(config.caps.len());
    for inst in &config.caps {
        let (mut cell, _) = lib.instantiate(
            &inst.cell,
            inst.params.iter().map(|(k, v)| (k.as_str(), v.clone())),
        )?;
        if let Some(name) = &inst.name {
            cell.set_name(name.clone());
        }
        info!("generated {}", cell.name());
        cells.push(cell);
    }
    Ok(cells)
}

/// Exports `cells` as a GDS library at `path`.
pub fn write_cells(lib_name: &str, cells: &[Cell], path: impl AsRef<Path>) -> Result<()> {
    let lib = export_lib(lib_name, cells)?;
    save_lib(&lib, path)
}

#[cfg(test)]
mod tests {
    use crate::error::Error;

    use super::*;

    #[test]
    fn parse_full_config() {
        let config: CapsConfig = toml::from_str(
            r#"
            lib = "caps"

            [[cap]]
            cell = "cap_var"
            name = "var_2x5"
            params = { l = 2.0, w = 5.0, nf = 4, gr = true }

            [[cap]]
            cell = "mim_cap"
            params = { type = "sky130_fd_pr__model__cap_mim_m4" }
            "#,
        )
        .unwrap();
        assert_eq!(config.lib, "caps");
        assert_eq!(config.caps.len(), 2);
        assert_eq!(config.caps[0].cell, "cap_var");
        assert_eq!(config.caps[0].name.as_deref(), Some("var_2x5"));
        assert_eq!(config.caps[0].params["nf"], ParamValue::Int(4));
        assert_eq!(config.caps[0].params["gr"], ParamValue::Bool(true));
        assert_eq!(config.caps[1].name, None);
    }

    #[test]
    fn lib_name_defaults() {
        let config: CapsConfig = toml::from_str(
            r#"
            [[cap]]
            cell = "mim_cap"
            "#,
        )
        .unwrap();
        assert_eq!(config.lib, "sky130_caps");
        assert!(config.caps[0].params.is_empty());
    }

    #[test]
    fn generate_names_cells() {
        let config: CapsConfig = toml::from_str(
            r#"
            [[cap]]
            cell = "cap_var"
            name = "my_var"
            params = { w = 2.0 }

            [[cap]]
            cell = "mim_cap"
            "#,
        )
        .unwrap();
        let cells = generate(&config).unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].name(), "my_var");
        assert_eq!(cells[1].name(), "mimcap(L=2.000,W=2.000)");
    }

    #[test]
    fn generate_rejects_unknown_cell() {
        let config: CapsConfig = toml::from_str(
            r#"
            [[cap]]
            cell = "cap_diode"
            "#,
        )
        .unwrap();
        assert!(matches!(
            generate(&config),
            Err(Error::PcellNotFound(_))
        ));
    }
}
