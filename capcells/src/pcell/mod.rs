//! Parameterized cell (PCell) definitions.
//!
//! A [`Pcell`] declares a set of typed parameters and draws a [`Cell`]
//! from a concrete assignment of those parameters. Assignments are held
//! in a [`Params`] table that preserves declaration order and enforces
//! parameter types on writes.

use arcstr::ArcStr;
use capgeom::bbox::BoundBox;
use capgeom::transform::Transformation;
use capgeom::Shape;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::Cell;
use crate::pdk::rules::nm_to_um;

pub mod library;

/// A parameter value.
///
/// Deserialization is untagged, so TOML/JSON scalars map onto the
/// matching variant directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A double-precision float.
    Double(f64),
    /// A string.
    String(ArcStr),
}

impl ParamValue {
    /// The name of this value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Double(_) => "double",
            Self::String(_) => "string",
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<ArcStr> for ParamValue {
    fn from(value: ArcStr) -> Self {
        Self::String(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(ArcStr::from(value))
    }
}

/// The type of a parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamType {
    /// A string drawn from a fixed set of choices.
    String {
        /// Allowed values, paired with a human readable description.
        choices: Vec<(ArcStr, ArcStr)>,
    },
    /// A double-precision float, optionally annotated with a unit.
    Double {
        /// The unit in which values are interpreted.
        unit: Option<ArcStr>,
    },
    /// A signed integer.
    Int,
    /// A boolean.
    Bool,
}

impl ParamType {
    /// The name of this type, for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::String { .. } => "string",
            Self::Double { .. } => "double",
            Self::Int => "int",
            Self::Bool => "bool",
        }
    }

    fn matches(&self, value: &ParamValue) -> bool {
        matches!(
            (self, value),
            (Self::String { .. }, ParamValue::String(_))
                | (Self::Double { .. }, ParamValue::Double(_))
                | (Self::Int, ParamValue::Int(_))
                | (Self::Bool, ParamValue::Bool(_))
        )
    }
}

/// The declaration of a single parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDecl {
    /// The parameter name.
    pub name: ArcStr,
    /// A human readable description.
    pub description: ArcStr,
    /// The parameter type.
    pub ptype: ParamType,
    /// The default value.
    pub default: ParamValue,
    /// Whether the parameter is computed rather than user-settable.
    pub readonly: bool,
}

impl ParamDecl {
    /// Declares a string parameter with the given choices.
    ///
    /// Choices are `(value, description)` pairs.
    pub fn string(
        name: impl Into<ArcStr>,
        description: impl Into<ArcStr>,
        choices: &[(&str, &str)],
        default: &str,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ptype: ParamType::String {
                choices: choices
                    .iter()
                    .map(|&(v, d)| (ArcStr::from(v), ArcStr::from(d)))
                    .collect(),
            },
            default: ParamValue::String(ArcStr::from(default)),
            readonly: false,
        }
    }

    /// Declares a double parameter.
    pub fn double(name: impl Into<ArcStr>, description: impl Into<ArcStr>, default: f64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ptype: ParamType::Double { unit: None },
            default: ParamValue::Double(default),
            readonly: false,
        }
    }

    /// Declares an integer parameter.
    pub fn int(name: impl Into<ArcStr>, description: impl Into<ArcStr>, default: i64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ptype: ParamType::Int,
            default: ParamValue::Int(default),
            readonly: false,
        }
    }

    /// Declares a boolean parameter.
    pub fn bool(name: impl Into<ArcStr>, description: impl Into<ArcStr>, default: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ptype: ParamType::Bool,
            default: ParamValue::Bool(default),
            readonly: false,
        }
    }

    /// Marks the parameter as computed.
    ///
    /// Readonly parameters reject [`Params::set`]; generators update them
    /// when coercing.
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// Annotates a double parameter with a unit.
    pub fn unit(mut self, unit: impl Into<ArcStr>) -> Self {
        if let ParamType::Double { unit: u } = &mut self.ptype {
            *u = Some(unit.into());
        }
        self
    }
}

/// An ordered table of parameter values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    decls: Vec<ParamDecl>,
    values: Vec<ParamValue>,
}

impl Params {
    /// Creates a table holding the default value of each declaration.
    pub fn from_decls(decls: Vec<ParamDecl>) -> Self {
        let values = decls.iter().map(|d| d.default.clone()).collect();
        Self { decls, values }
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.decls
            .iter()
            .position(|d| d.name == name)
            .ok_or_else(|| Error::ParamNotFound(ArcStr::from(name)))
    }

    /// Returns the value of the named parameter.
    pub fn get(&self, name: &str) -> Result<&ParamValue> {
        let i = self.position(name)?;
        Ok(&self.values[i])
    }

    /// Sets the named parameter, enforcing its declared type.
    ///
    /// Integers widen to doubles; all other mismatches are rejected, as
    /// are writes to readonly parameters.
    pub fn set(&mut self, name: &str, value: impl Into<ParamValue>) -> Result<()> {
        let i = self.position(name)?;
        if self.decls[i].readonly {
            return Err(Error::ReadonlyParam(self.decls[i].name.clone()));
        }
        self.assign(i, value.into())
    }

    /// Sets a computed parameter, bypassing the readonly check.
    pub(crate) fn set_output(&mut self, name: &str, value: impl Into<ParamValue>) -> Result<()> {
        let i = self.position(name)?;
        self.assign(i, value.into())
    }

    fn assign(&mut self, i: usize, value: ParamValue) -> Result<()> {
        let decl = &self.decls[i];
        let value = match (&decl.ptype, value) {
            (ParamType::Double { .. }, ParamValue::Int(v)) => ParamValue::Double(v as f64),
            (ptype, value) if ptype.matches(&value) => value,
            (ptype, value) => {
                return Err(Error::ParamType {
                    name: decl.name.clone(),
                    expected: ptype.name(),
                    found: value.type_name(),
                })
            }
        };
        self.values[i] = value;
        Ok(())
    }

    /// Returns the named parameter as a double.
    pub fn double(&self, name: &str) -> Result<f64> {
        match self.get(name)? {
            ParamValue::Double(v) => Ok(*v),
            ParamValue::Int(v) => Ok(*v as f64),
            other => Err(Error::ParamType {
                name: ArcStr::from(name),
                expected: "double",
                found: other.type_name(),
            }),
        }
    }

    /// Returns the named parameter as an integer.
    pub fn int(&self, name: &str) -> Result<i64> {
        match self.get(name)? {
            ParamValue::Int(v) => Ok(*v),
            other => Err(Error::ParamType {
                name: ArcStr::from(name),
                expected: "int",
                found: other.type_name(),
            }),
        }
    }

    /// Returns the named parameter as a boolean.
    pub fn bool(&self, name: &str) -> Result<bool> {
        match self.get(name)? {
            ParamValue::Bool(v) => Ok(*v),
            other => Err(Error::ParamType {
                name: ArcStr::from(name),
                expected: "bool",
                found: other.type_name(),
            }),
        }
    }

    /// Returns the named parameter as a string.
    pub fn string(&self, name: &str) -> Result<ArcStr> {
        match self.get(name)? {
            ParamValue::String(v) => Ok(v.clone()),
            other => Err(Error::ParamType {
                name: ArcStr::from(name),
                expected: "string",
                found: other.type_name(),
            }),
        }
    }

    /// The parameter declarations, in declaration order.
    pub fn decls(&self) -> &[ParamDecl] {
        &self.decls
    }

    /// Iterates over `(declaration, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&ParamDecl, &ParamValue)> {
        self.decls.iter().zip(self.values.iter())
    }
}

/// The trait that all PCell generators implement.
pub trait Pcell {
    /// The name of this PCell within its library.
    fn name(&self) -> ArcStr;

    /// Declares the parameters of this PCell.
    fn params(&self) -> Vec<ParamDecl>;

    /// A short human readable description of an instance.
    fn display_text(&self, params: &Params) -> ArcStr;

    /// Clamps user parameters to legal values and refreshes computed ones.
    ///
    /// Must be idempotent: coercing already-coerced parameters is a no-op.
    fn coerce_parameters(&self, params: &mut Params) -> Result<()>;

    /// Whether an instance can be seeded from `shape`.
    fn can_create_from_shape(&self, shape: &Shape) -> bool {
        let _ = shape;
        true
    }

    /// Derives parameters from a seed shape.
    ///
    /// Takes the width from the shape's bounding box width and the
    /// length from its height, then coerces the result.
    fn parameters_from_shape(&self, shape: &Shape) -> Result<Params> {
        let bbox = shape.brect();
        let mut params = Params::from_decls(self.params());
        params.set("w", nm_to_um(bbox.width()))?;
        params.set("l", nm_to_um(bbox.height()))?;
        self.coerce_parameters(&mut params)?;
        Ok(params)
    }

    /// Where an instance seeded from `shape` should be placed.
    fn transformation_from_shape(&self, shape: &Shape) -> Transformation {
        Transformation::translate_to(shape.brect().center())
    }

    /// Draws the cell.
    ///
    /// Parameters are coerced before any geometry is generated, so
    /// callers may pass raw user values.
    fn produce(&self, params: &mut Params, cell: &mut Cell) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decls() -> Vec<ParamDecl> {
        vec![
            ParamDecl::string(
                "type",
                "Model name",
                &[("fast", "Fast corner"), ("slow", "Slow corner")],
                "fast",
            ),
            ParamDecl::double("l", "Length", 0.5).unit("um"),
            ParamDecl::int("nf", "Number of fingers", 2),
            ParamDecl::bool("gr", "Draw guard ring", true),
            ParamDecl::double("area", "Computed area", 0.0).readonly(),
        ]
    }

    #[test]
    fn defaults_and_iteration_order() {
        let params = Params::from_decls(decls());
        let names: Vec<_> = params.iter().map(|(d, _)| d.name.clone()).collect();
        assert_eq!(names, vec!["type", "l", "nf", "gr", "area"]);
        assert_eq!(params.string("type").unwrap(), "fast");
        assert_eq!(params.double("l").unwrap(), 0.5);
        assert_eq!(params.int("nf").unwrap(), 2);
        assert!(params.bool("gr").unwrap());
    }

    #[test]
    fn set_and_get() {
        let mut params = Params::from_decls(decls());
        params.set("l", 1.25).unwrap();
        params.set("nf", 4i64).unwrap();
        params.set("gr", false).unwrap();
        params.set("type", "slow").unwrap();
        assert_eq!(params.double("l").unwrap(), 1.25);
        assert_eq!(params.int("nf").unwrap(), 4);
        assert!(!params.bool("gr").unwrap());
        assert_eq!(params.string("type").unwrap(), "slow");
    }

    #[test]
    fn unknown_param_is_rejected() {
        let mut params = Params::from_decls(decls());
        assert!(matches!(
            params.set("bogus", 1.0),
            Err(Error::ParamNotFound(_))
        ));
        assert!(matches!(params.get("bogus"), Err(Error::ParamNotFound(_))));
    }

    #[test]
    fn readonly_param_rejects_user_writes() {
        let mut params = Params::from_decls(decls());
        assert!(matches!(
            params.set("area", 3.0),
            Err(Error::ReadonlyParam(_))
        ));
        params.set_output("area", 3.0).unwrap();
        assert_eq!(params.double("area").unwrap(), 3.0);
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let mut params = Params::from_decls(decls());
        let err = params.set("gr", 1.0).unwrap_err();
        match err {
            Error::ParamType {
                name,
                expected,
                found,
            } => {
                assert_eq!(name, "gr");
                assert_eq!(expected, "bool");
                assert_eq!(found, "double");
            }
            e => panic!("unexpected error: {e}"),
        }
        assert!(params.set("nf", 2.5).is_err());
    }

    #[test]
    fn int_widens_to_double() {
        let mut params = Params::from_decls(decls());
        params.set("l", 2i64).unwrap();
        assert_eq!(params.get("l").unwrap(), &ParamValue::Double(2.0));
        assert_eq!(params.double("l").unwrap(), 2.0);
    }

    #[test]
    fn values_deserialize_untagged() {
        #[derive(serde::Deserialize)]
        struct Raw {
            values: std::collections::HashMap<ArcStr, ParamValue>,
        }
        let raw: Raw = toml::from_str(
            r#"
            [values]
            l = 1.5
            nf = 3
            gr = false
            type = "slow"
            "#,
        )
        .unwrap();
        assert_eq!(raw.values["l"], ParamValue::Double(1.5));
        assert_eq!(raw.values["nf"], ParamValue::Int(3));
        assert_eq!(raw.values["gr"], ParamValue::Bool(false));
        assert_eq!(raw.values["type"], ParamValue::String("slow".into()));
    }
}
