//! probin-gen - compile-time generator for runtime parameter modules
//!
//! Reads plain-text parameter declarations, resolves duplicates by
//! priority, and writes:
//!
//! - a Fortran module expanded from a template (globals, namelist,
//!   defaults, command-line overrides, printing, `bind(C)` getters)
//! - `<prefix>_parameters_F.H` with the getter prototypes
//! - `<prefix>_parameters.H` declaring C++ globals for every parameter
//! - `<prefix>_parameters.cpp` defining them and `init_<prefix>_parameters()`
//!
//! # Example
//!
//! ```rust
//! use probin_gen::{expand_template, parse_declarations, GenerateConfig, ParameterSet};
//! use std::path::Path;
//!
//! let mut params = ParameterSet::new();
//! parse_declarations("max_step integer 1\n", Path::new("_parameters"), &mut params).unwrap();
//!
//! let config = GenerateConfig::new().with_namelist_name("probin");
//! let out = expand_template("@@namelist@@\n", &params, &config).unwrap();
//! assert!(out.text.contains("namelist /probin/ max_step"));
//! ```

pub mod error;
pub mod manifest;
pub mod parser;
pub mod renderer;
pub mod template;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info};

pub use error::DeclarationError;
pub use manifest::{ConfigError, Manifest};
pub use parser::{
    parse_declarations, resolve_files, split_path_list, DataType, Parameter, ParameterSet,
    Resolution,
};
pub use renderer::{EmitError, GenerateConfig, Warning};
pub use template::{expand_template, Expansion, Keyword};

/// Contents of the primary output when generation fails
pub const FAILURE_STUB: &str = "There was an error parsing the parameter files";

/// Errors that can occur during a generation run
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Unreadable or malformed declaration file
    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    /// Template file could not be read
    #[error("cannot read template {}: {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A parameter type with no Fortran declaration
    #[error(transparent)]
    Emit(#[from] EmitError),

    /// An output file could not be written
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl GenerateError {
    /// Human-readable report, with source context where available
    pub fn report(&self) -> String {
        match self {
            GenerateError::Declaration(e) => e.format(),
            other => other.to_string(),
        }
    }
}

/// Everything one generation run needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub template: PathBuf,
    /// Processed in order; later files override earlier ones only with higher priority
    pub parameter_files: Vec<PathBuf>,
    pub output: PathBuf,
    pub config: GenerateConfig,
}

/// One generated file, not yet written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    fn write(&self) -> Result<(), GenerateError> {
        std::fs::write(&self.path, &self.contents).map_err(|source| GenerateError::Write {
            path: self.path.clone(),
            source,
        })?;
        info!("wrote {}", self.path.display());
        Ok(())
    }
}

/// The four outputs of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Expanded Fortran template
    pub primary: Artifact,
    pub foreign_header: Artifact,
    pub public_header: Artifact,
    pub init_source: Artifact,
    /// Non-fatal problems found along the way
    pub warnings: Vec<Warning>,
}

impl Artifacts {
    /// All four artifacts, primary first
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        [
            &self.primary,
            &self.foreign_header,
            &self.public_header,
            &self.init_source,
        ]
        .into_iter()
    }

    /// Write every artifact, each file opened, written and closed on its own
    pub fn write(&self) -> Result<(), GenerateError> {
        for artifact in self.iter() {
            artifact.write()?;
        }
        Ok(())
    }
}

/// Run the whole pipeline in memory
///
/// Nothing is written; see [`run`] for the version with side effects.
pub fn generate(job: &Job) -> Result<Artifacts, GenerateError> {
    info!("creating {}", job.output.display());
    let params = resolve_files(&job.parameter_files)?;
    let template =
        std::fs::read_to_string(&job.template).map_err(|source| GenerateError::TemplateRead {
            path: job.template.clone(),
            source,
        })?;
    generate_from(&template, &params, &job.output, &job.config)
}

/// Build all artifacts from an already-resolved parameter set
pub fn generate_from(
    template: &str,
    params: &ParameterSet,
    output: &Path,
    config: &GenerateConfig,
) -> Result<Artifacts, GenerateError> {
    let expansion = expand_template(template, params, config)?;
    Ok(Artifacts {
        primary: Artifact {
            path: output.to_path_buf(),
            contents: expansion.text,
        },
        foreign_header: Artifact {
            path: config.foreign_header_path(),
            contents: renderer::foreign_header(params, config),
        },
        public_header: Artifact {
            path: config.public_header_path(),
            contents: renderer::public_header(params, config),
        },
        init_source: Artifact {
            path: config.init_source_path(),
            contents: renderer::init_source(params, config),
        },
        warnings: expansion.warnings,
    })
}

/// Generate and write all artifacts
///
/// On any failure the primary output is replaced by [`FAILURE_STUB`], so
/// a dependent compile step fails loudly instead of using a stale file.
pub fn run(job: &Job) -> Result<Artifacts, GenerateError> {
    let result = generate(job).and_then(|artifacts| {
        artifacts.write()?;
        Ok(artifacts)
    });
    if result.is_err() {
        write_failure_stub(&job.output);
    }
    result
}

/// Overwrite `path` with the one-line failure stub
pub fn write_failure_stub(path: &Path) {
    if let Err(e) = std::fs::write(path, FAILURE_STUB) {
        error!("cannot write failure stub {}: {}", path.display(), e);
    }
}
