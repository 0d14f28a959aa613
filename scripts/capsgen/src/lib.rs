//! Batch generation of sky130 capacitor cells from a TOML configuration.

use std::path::Path;

use capcells::config::{generate, read_config, write_cells};
use capcells::error::Result;
use capcells::pcell::library::Library;

/// Generates the capacitor cells described by `config` and writes them,
/// as a single GDS library, to `output`.
///
/// Returns the number of cells written.
pub fn run(config: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<usize> {
    let config = read_config(config)?;
    let cells = generate(&config)?;
    write_cells(&config.lib, &cells, output)?;
    Ok(cells.len())
}

/// Renders a listing of the available PCells and their parameters.
pub fn list_pcells() -> String {
    let lib = Library::sky130_caps();
    let mut out = format!("{} ({})\n", lib.name(), lib.category());
    for pcell in lib.iter() {
        out.push_str(&format!("  {}\n", pcell.name()));
        for decl in pcell.params() {
            let readonly = if decl.readonly { " (computed)" } else { "" };
            out.push_str(&format!(
                "    {} = {}{}  # {}\n",
                decl.name, decl.default, readonly, decl.description
            ));
        }
    }
    out
}
