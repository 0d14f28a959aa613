//! PCell libraries and instantiation.

use arcstr::ArcStr;

use crate::cells::cap_var::CapVar;
use crate::cells::mim_cap::MimCap;
use crate::error::{Error, Result};
use crate::layout::Cell;
use crate::log::debug;
use crate::pcell::{ParamValue, Params, Pcell};

/// A named collection of [`Pcell`] generators.
pub struct Library {
    name: ArcStr,
    category: ArcStr,
    cells: Vec<Box<dyn Pcell>>,
}

impl Library {
    /// Creates an empty library.
    pub fn new(name: impl Into<ArcStr>, category: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            cells: Vec::new(),
        }
    }

    /// The sky130 capacitor library shipped with this crate.
    pub fn sky130_caps() -> Self {
        let mut lib = Self::new("sky130_caps", "Capacitors");
        lib.register(Box::new(CapVar));
        lib.register(Box::new(MimCap));
        lib
    }

    /// Adds a generator to the library.
    pub fn register(&mut self, pcell: Box<dyn Pcell>) {
        debug!("registered pcell {} in library {}", pcell.name(), self.name);
        self.cells.push(pcell);
    }

    /// Looks up a generator by name.
    pub fn get(&self, name: &str) -> Result<&dyn Pcell> {
        self.cells
            .iter()
            .map(|c| c.as_ref())
            .find(|c| c.name() == name)
            .ok_or_else(|| Error::PcellNotFound(ArcStr::from(name)))
    }

    /// The names of all registered generators.
    pub fn names(&self) -> Vec<ArcStr> {
        self.cells.iter().map(|c| c.name()).collect()
    }

    /// Iterates over all registered generators.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Pcell> {
        self.cells.iter().map(|c| c.as_ref())
    }

    /// The library name.
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// The library category.
    pub fn category(&self) -> &ArcStr {
        &self.category
    }

    /// Generates a cell from the named generator.
    ///
    /// Starts from the generator's defaults, applies `overrides` in
    /// order, coerces, then draws. The resulting cell is named after the
    /// generator's display text.
    pub fn instantiate<'a, I>(&self, pcell: &str, overrides: I) -> Result<(Cell, Params)>
    where
        I: IntoIterator<Item = (&'a str, ParamValue)>,
    {
        let pcell = self.get(pcell)?;
        let mut params = Params::from_decls(pcell.params());
        for (name, value) in overrides {
            params.set(name, value)?;
        }
        pcell.coerce_parameters(&mut params)?;
        let mut cell = Cell::new(pcell.display_text(&params));
        pcell.produce(&mut params, &mut cell)?;
        Ok((cell, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_registers_both_generators() {
        let lib = Library::sky130_caps();
        assert_eq!(lib.name(), "sky130_caps");
        assert_eq!(lib.category(), "Capacitors");
        assert_eq!(lib.names(), vec!["cap_var", "mim_cap"]);
        assert!(lib.get("cap_var").is_ok());
        assert!(matches!(
            lib.get("cap_diode"),
            Err(Error::PcellNotFound(_))
        ));
    }

    #[test]
    fn instantiate_applies_overrides_and_coerces() {
        let lib = Library::sky130_caps();
        let (cell, params) = lib
            .instantiate("cap_var", [("l", ParamValue::Double(1.0)), ("nf", 3i64.into())])
            .unwrap();
        assert_eq!(cell.name(), "Varactor(L=1.000,W=1.000)");
        assert_eq!(params.double("l").unwrap(), 1.0);
        assert_eq!(params.int("nf").unwrap(), 3);
        assert!(cell.elems().count() > 0);
    }

    #[test]
    fn instantiate_rejects_bad_overrides() {
        let lib = Library::sky130_caps();
        assert!(matches!(
            lib.instantiate("mim_cap", [("bogus", ParamValue::Double(1.0))]),
            Err(Error::ParamNotFound(_))
        ));
        assert!(matches!(
            lib.instantiate("mim_cap", [("area", ParamValue::Double(1.0))]),
            Err(Error::ReadonlyParam(_))
        ));
    }
}
