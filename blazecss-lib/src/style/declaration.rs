// src/style/declaration.rs
use crate::error::{CssomError, Result};
use crate::ident;
use log::trace;
use std::fmt;
use std::str::FromStr;

/// The unit (or data type) of a declaration value. Decides both which
/// [`Value`] shapes are legal and how the value is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// `10px`
    Pixels,
    /// `2.5em`
    Em,
    /// `50%`
    Percent,
    /// Unitless number, e.g. `line-height: 1.5`.
    Number,
    /// `rgb(r, g, b)`
    Rgb,
    /// Literal keyword or text, written unquoted.
    String,
    /// Font family, written in single quotes.
    Font,
    /// `url('...')`
    Url,
    /// A comment. Only shows up in pretty output.
    Remark,
}

impl UnitKind {
    pub const ALL: [UnitKind; 9] = [
        UnitKind::Pixels,
        UnitKind::Em,
        UnitKind::Number,
        UnitKind::Rgb,
        UnitKind::String,
        UnitKind::Font,
        UnitKind::Url,
        UnitKind::Percent,
        UnitKind::Remark,
    ];

    /// Stable numeric tag, part of every declaration id.
    pub fn code(self) -> u8 {
        match self {
            UnitKind::Pixels => 1,
            UnitKind::Em => 2,
            UnitKind::Number => 3,
            UnitKind::Rgb => 4,
            UnitKind::String => 5,
            UnitKind::Font => 6,
            UnitKind::Url => 7,
            UnitKind::Percent => 8,
            UnitKind::Remark => 9,
        }
    }

    /// Length suffix for the dimension units.
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            UnitKind::Pixels => Some("px"),
            UnitKind::Em => Some("em"),
            UnitKind::Percent => Some("%"),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UnitKind::Pixels => "pixels",
            UnitKind::Em => "em",
            UnitKind::Percent => "percent",
            UnitKind::Number => "number",
            UnitKind::Rgb => "rgb",
            UnitKind::String => "string",
            UnitKind::Font => "font",
            UnitKind::Url => "url",
            UnitKind::Remark => "remark",
        }
    }

    /// Checks that `value` has a shape this unit can render.
    fn validate(self, value: &Value) -> Result<()> {
        match (self, value) {
            (
                UnitKind::Pixels | UnitKind::Em | UnitKind::Percent | UnitKind::Number,
                Value::Scalar(n),
            ) => check_finite(self, *n),
            (
                UnitKind::Pixels | UnitKind::Em | UnitKind::Percent | UnitKind::Number,
                Value::Sequence(items),
            ) => {
                if items.is_empty() {
                    return Err(CssomError::invalid(self, "empty number sequence"));
                }
                items.iter().try_for_each(|n| check_finite(self, *n))
            }
            (UnitKind::Rgb, Value::Triple(..)) => Ok(()),
            (
                UnitKind::String | UnitKind::Font | UnitKind::Url | UnitKind::Remark,
                Value::Text(_),
            ) => Ok(()),
            (unit, other) => Err(CssomError::invalid(
                unit,
                format!("a {} value is not allowed", other.kind_name()),
            )),
        }
    }
}

fn check_finite(unit: UnitKind, n: f64) -> Result<()> {
    if n.is_finite() {
        Ok(())
    } else {
        Err(CssomError::invalid(unit, format!("{} is not a finite number", n)))
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for UnitKind {
    type Error = CssomError;

    fn try_from(code: u8) -> Result<Self> {
        UnitKind::ALL
            .into_iter()
            .find(|unit| unit.code() == code)
            .ok_or_else(|| CssomError::UnknownUnitType(code.to_string()))
    }
}

impl FromStr for UnitKind {
    type Err = CssomError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "px" | "pixel" | "pixels" => Ok(UnitKind::Pixels),
            "em" => Ok(UnitKind::Em),
            "%" | "percent" => Ok(UnitKind::Percent),
            "number" => Ok(UnitKind::Number),
            "rgb" => Ok(UnitKind::Rgb),
            "string" => Ok(UnitKind::String),
            "font" => Ok(UnitKind::Font),
            "url" => Ok(UnitKind::Url),
            "remark" => Ok(UnitKind::Remark),
            _ => Err(CssomError::UnknownUnitType(s.to_string())),
        }
    }
}

/// A declaration value. Which variants are legal depends on the [`UnitKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(f64),
    /// Shorthand values such as `margin: 0 10px 0 10px`.
    Sequence(Vec<f64>),
    /// RGB channels.
    Triple(u8, u8, u8),
    Text(String),
}

impl Value {
    fn kind_name(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Sequence(_) => "sequence",
            Value::Triple(..) => "rgb triple",
            Value::Text(_) => "text",
        }
    }

    /// Canonical text used when hashing a declaration.
    pub(crate) fn key(&self) -> String {
        match self {
            Value::Scalar(n) => format_number(*n),
            Value::Sequence(items) => items
                .iter()
                .map(|n| format_number(*n))
                .collect::<Vec<_>>()
                .join(","),
            Value::Triple(r, g, b) => format!("{},{},{}", r, g, b),
            Value::Text(text) => text.clone(),
        }
    }
}

/// Shortest decimal form of a number: `10`, `2.5`, never `-0`.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Scalar(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Scalar(f64::from(n))
    }
}

impl From<Vec<f64>> for Value {
    fn from(items: Vec<f64>) -> Self {
        Value::Sequence(items)
    }
}

impl<const N: usize> From<[f64; N]> for Value {
    fn from(items: [f64; N]) -> Self {
        Value::Sequence(items.to_vec())
    }
}

impl<const N: usize> From<[i32; N]> for Value {
    fn from(items: [i32; N]) -> Self {
        Value::Sequence(items.iter().map(|n| f64::from(*n)).collect())
    }
}

impl From<(u8, u8, u8)> for Value {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Value::Triple(r, g, b)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

/// One `property: value` pair plus its unit and `!important` flag.
///
/// Immutable once built. The id is derived from `(property, value, unit)`,
/// so two declarations with the same content share an id.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    id: String,
    property: String,
    value: Value,
    unit: UnitKind,
    important: bool,
}

impl Declaration {
    pub fn new(
        property: impl Into<String>,
        value: impl Into<Value>,
        unit: UnitKind,
        important: bool,
    ) -> Result<Self> {
        DeclarationInit {
            property: Some(property.into()),
            value: Some(value.into()),
            unit: Some(unit),
            important,
        }
        .build()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn unit(&self) -> UnitKind {
        self.unit
    }

    pub fn is_important(&self) -> bool {
        self.important
    }
}

/// Loose declaration fields, as handed over by callers who may leave some out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclarationInit {
    pub property: Option<String>,
    pub value: Option<Value>,
    pub unit: Option<UnitKind>,
    pub important: bool,
}

impl DeclarationInit {
    pub fn new(property: impl Into<String>, value: impl Into<Value>, unit: UnitKind) -> Self {
        DeclarationInit {
            property: Some(property.into()),
            value: Some(value.into()),
            unit: Some(unit),
            important: false,
        }
    }

    /// Marks the declaration `!important`.
    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }

    /// Validates the fields and computes the id.
    pub fn build(self) -> Result<Declaration> {
        let property = self
            .property
            .filter(|p| !p.is_empty())
            .ok_or(CssomError::MissingField("property"))?;
        let value = self
            .value
            .filter(|v| !matches!(v, Value::Text(text) if text.is_empty()))
            .ok_or(CssomError::MissingField("value"))?;
        let unit = self.unit.ok_or(CssomError::MissingField("unit"))?;
        unit.validate(&value)?;

        let id = ident::declaration_id(&property, &value, unit);
        Ok(Declaration {
            id,
            property,
            value,
            unit,
            important: self.important,
        })
    }
}

impl From<Declaration> for DeclarationInit {
    fn from(decl: Declaration) -> Self {
        DeclarationInit {
            property: Some(decl.property),
            value: Some(decl.value),
            unit: Some(decl.unit),
            important: decl.important,
        }
    }
}

/// An ordered list of declarations.
///
/// Backs every selector entry, and stands alone for inline `style="..."`
/// strings. Order is insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclarationList {
    declarations: Vec<Declaration>,
}

impl DeclarationList {
    pub fn new() -> Self {
        DeclarationList {
            declarations: Vec::new(),
        }
    }

    /// Appends a declaration. Duplicates by id are allowed here; only a merge
    /// removes them.
    pub fn append(&mut self, init: impl Into<DeclarationInit>) -> Result<&Declaration> {
        let decl = init.into().build()?;
        trace!("append {}: {:?} ({})", decl.property, decl.value, decl.unit);
        self.declarations.push(decl);
        Ok(&self.declarations[self.declarations.len() - 1])
    }

    pub fn append_declaration(
        &mut self,
        property: impl Into<String>,
        value: impl Into<Value>,
        unit: UnitKind,
    ) -> Result<&Declaration> {
        self.append(DeclarationInit::new(property, value, unit))
    }

    pub fn append_important(
        &mut self,
        property: impl Into<String>,
        value: impl Into<Value>,
        unit: UnitKind,
    ) -> Result<&Declaration> {
        self.append(DeclarationInit::new(property, value, unit).important())
    }

    /// Appends each item in order.
    ///
    /// Not atomic: when an item fails, the items before it stay appended and
    /// the error is returned.
    pub fn append_declarations<I, D>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = D>,
        D: Into<DeclarationInit>,
    {
        for item in items {
            self.append(item)?;
        }
        Ok(())
    }

    /// First declaration for `property`, in insertion order.
    pub fn get_declaration(&self, property: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.property == property)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.declarations.iter().any(|d| d.id == id)
    }

    pub fn clear(&mut self) {
        self.declarations.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Declaration> {
        self.declarations.iter()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Appends every declaration from `other` whose id is not present yet.
    /// Returns how many were dropped as duplicates.
    pub(crate) fn merge_unique(&mut self, other: &DeclarationList) -> usize {
        let mut dropped = 0;
        for decl in &other.declarations {
            if self.contains_id(&decl.id) {
                dropped += 1;
            } else {
                self.declarations.push(decl.clone());
            }
        }
        dropped
    }
}

impl<'a> IntoIterator for &'a DeclarationList {
    type Item = &'a Declaration;
    type IntoIter = std::slice::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.iter()
    }
}
