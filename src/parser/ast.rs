//! Data model for runtime parameter declarations

use std::fmt;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Declared type of a runtime parameter
///
/// Unknown type names are carried through parsing untouched and only
/// rejected by the emitters that need a concrete target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Real,
    Character,
    Logical,
    Other(String),
}

impl DataType {
    /// Interpret a declaration-file type field
    pub fn parse(name: &str) -> Self {
        match name {
            "integer" => DataType::Integer,
            "real" => DataType::Real,
            "character" => DataType::Character,
            "logical" => DataType::Logical,
            other => DataType::Other(other.to_string()),
        }
    }

    /// The type name as written in declaration files
    pub fn as_str(&self) -> &str {
        match self {
            DataType::Integer => "integer",
            DataType::Real => "real",
            DataType::Character => "character",
            DataType::Logical => "logical",
            DataType::Other(name) => name,
        }
    }

    pub fn is_character(&self) -> bool {
        matches!(self, DataType::Character)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, DataType::Other(_))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single runtime parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub dtype: DataType,
    /// Literal default, copied verbatim into generated initializers
    pub default_value: String,
    pub priority: i64,
}

impl Parameter {
    pub fn new(
        name: impl Into<String>,
        dtype: DataType,
        default_value: impl Into<String>,
        priority: i64,
    ) -> Self {
        Self {
            name: name.into(),
            dtype,
            default_value: default_value.into(),
            priority,
        }
    }
}

/// Outcome of offering a declaration to a [`ParameterSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// First declaration of this name
    Added,
    /// Outranked an earlier declaration, which was removed; the new one is now last
    Replaced,
    /// Lost against an earlier declaration with the same or higher priority
    Discarded,
}

/// The ordered, deduplicated set of parameters consumed by every emitter
///
/// Insertion order is emission order. Duplicates are resolved by
/// priority: a strictly higher priority removes the existing record and
/// appends the newcomer at the end, anything else keeps the first-seen
/// record where it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    params: Vec<Parameter>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration, applying duplicate resolution
    pub fn insert(&mut self, param: Parameter) -> Resolution {
        match self.params.iter().position(|p| p.name == param.name) {
            None => {
                self.params.push(param);
                Resolution::Added
            }
            Some(idx) if self.params[idx].priority < param.priority => {
                self.params.remove(idx);
                self.params.push(param);
                Resolution::Replaced
            }
            Some(_) => Resolution::Discarded,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.params.iter()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameter names in emission order
    pub fn names(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn as_slice(&self) -> &[Parameter] {
        &self.params
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

impl FromIterator<Parameter> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for param in iter {
            set.insert(param);
        }
        set
    }
}
