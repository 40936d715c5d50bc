//! Code emitters for the generated Fortran module and its C++ bridge
//!
//! `fortran` expands template placeholders into per-parameter blocks;
//! `cxx` writes the three artifacts that let C++ read the same values.

pub mod config;
pub mod cxx;
pub mod fortran;

use std::fmt;

use thiserror::Error;

use crate::parser::ast::{DataType, Parameter};

pub use config::GenerateConfig;
pub use cxx::{foreign_header, init_source, public_header};
pub use fortran::emit;

/// Name of the variable emitted when there are no parameters at all
pub const DUMMY_VARIABLE: &str = "a_dummy_var";

/// Errors raised while emitting code
#[derive(Debug, Error)]
pub enum EmitError {
    /// A parameter whose type has no mapping in the target language
    #[error("invalid datatype '{dtype}' for variable {name} (needed by {context})")]
    UnsupportedType {
        name: String,
        dtype: String,
        context: &'static str,
    },
}

impl EmitError {
    pub fn unsupported(param: &Parameter, context: &'static str) -> Self {
        Self::UnsupportedType {
            name: param.name.clone(),
            dtype: param.dtype.to_string(),
            context,
        }
    }
}

/// A non-fatal problem found while emitting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub parameter: String,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.parameter, self.message)
    }
}

/// Lines generated for one placeholder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    indent: String,
    pub lines: Vec<String>,
    pub warnings: Vec<Warning>,
}

impl Block {
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
            lines: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Push a line at the placeholder's indentation
    pub fn line(&mut self, text: impl AsRef<str>) {
        self.lines.push(format!("{}{}", self.indent, text.as_ref()));
    }

    /// Push a line starting at column 0
    pub fn raw(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    pub fn warn(&mut self, param: &Parameter, message: impl Into<String>) {
        self.warnings.push(Warning {
            parameter: param.name.clone(),
            message: message.into(),
        });
    }

    /// Lines joined with a newline after each one
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Fortran declaration type for a parameter
pub fn fortran_type(param: &Parameter, context: &'static str) -> Result<&'static str, EmitError> {
    match param.dtype {
        DataType::Real => Ok("real (kind=rt)"),
        DataType::Character => Ok("character (len=256)"),
        DataType::Integer => Ok("integer"),
        DataType::Logical => Ok("logical"),
        DataType::Other(_) => Err(EmitError::unsupported(param, context)),
    }
}

/// C++ storage type for a parameter
///
/// Fortran logicals cross the boundary as 0/1 integers, and so does any
/// type without a dedicated mapping.
pub fn cxx_type(param: &Parameter) -> &'static str {
    match param.dtype {
        DataType::Real => "amrex::Real",
        DataType::Character => "std::string",
        DataType::Integer | DataType::Logical | DataType::Other(_) => "int",
    }
}

/// Plain-C spelling of [`cxx_type`], usable inside `extern "C"` headers
pub fn c_type(param: &Parameter) -> &'static str {
    match param.dtype {
        DataType::Real => "amrex_real",
        DataType::Character => "char",
        DataType::Integer | DataType::Logical | DataType::Other(_) => "int",
    }
}
