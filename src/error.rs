//! Error types for reading declaration files

use std::path::PathBuf;

use ariadne::{Config, Label, Report, ReportKind, Source};
use thiserror::Error;

pub use crate::parser::ast::Span;

#[derive(Error, Debug)]
pub enum DeclarationError {
    #[error("cannot read parameter file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(
        "{}:{line}: missing one or more fields in parameter definition (found {found}, need 3)",
        path.display()
    )]
    MissingFields {
        path: PathBuf,
        /// 1-based line number
        line: usize,
        span: Span,
        found: usize,
        /// Full text of the offending file, kept for diagnostics
        contents: String,
    },
}

impl DeclarationError {
    /// Format the error with source context using ariadne
    ///
    /// Colors are off: the report usually lands in a build log.
    pub fn format(&self) -> String {
        match self {
            DeclarationError::Io { .. } => self.to_string(),
            DeclarationError::MissingFields {
                path,
                span,
                found,
                contents,
                ..
            } => {
                let filename = path.display().to_string();
                let filename = filename.as_str();
                let mut buf = Vec::new();
                let written = Report::build(ReportKind::Error, filename, span.start)
                    .with_config(Config::default().with_color(false))
                    .with_message("missing one or more fields in parameter definition")
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(format!("found {} field(s)", found)),
                    )
                    .with_note("expected: <name> <dtype> <default_value> [<priority>]")
                    .finish()
                    .write((filename, Source::from(contents.as_str())), &mut buf);
                match written {
                    Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
                    Err(_) => self.to_string(),
                }
            }
        }
    }
}
