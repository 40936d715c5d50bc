//! Generator manifest: the inputs of one generation run in a TOML file
//!
//! Build systems that call the generator repeatedly can keep the file
//! lists here instead of on the command line. Command-line values take
//! precedence over the manifest.
//!
//! ```toml
//! template = "probin.template"
//! output = "probin.F90"
//! namelist = "probin"
//! cxx_prefix = "extern"
//! managed = false
//! parameter_files = ["Source/_parameters", "Problem/_parameters"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::renderer::GenerateConfig;
use crate::Job;

/// Errors that can occur when loading a manifest or assembling a job
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read manifest file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse manifest TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid calling sequence: no {0} given")]
    Missing(&'static str),
}

/// Inputs of a generation run; every field is optional until [`Manifest::into_job`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub template: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub namelist: Option<String>,
    pub cxx_prefix: Option<String>,
    pub managed: Option<bool>,
    pub parameter_files: Option<Vec<PathBuf>>,
}

/// TOML structure for deserializing manifests
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlManifest {
    template: Option<PathBuf>,
    output: Option<PathBuf>,
    namelist: Option<String>,
    cxx_prefix: Option<String>,
    managed: Option<bool>,
    parameter_files: Option<Vec<PathBuf>>,
}

impl Manifest {
    /// Load a manifest from a TOML file
    ///
    /// Relative paths are taken relative to the manifest's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let manifest = Self::from_str(&content)?;
        match path.parent() {
            Some(base) if !base.as_os_str().is_empty() => Ok(manifest.rebased(base)),
            _ => Ok(manifest),
        }
    }

    /// Load a manifest from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlManifest = toml::from_str(content)?;
        Ok(Manifest {
            template: parsed.template,
            output: parsed.output,
            namelist: parsed.namelist,
            cxx_prefix: parsed.cxx_prefix,
            managed: parsed.managed,
            parameter_files: parsed.parameter_files,
        })
    }

    fn rebased(self, base: &Path) -> Self {
        let join = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        Manifest {
            template: self.template.map(join),
            output: self.output.map(join),
            cxx_prefix: self
                .cxx_prefix
                .map(|prefix| join(PathBuf::from(prefix)).to_string_lossy().into_owned()),
            parameter_files: self
                .parameter_files
                .map(|files| files.into_iter().map(join).collect()),
            ..self
        }
    }

    /// Overlay `overrides` on top of this manifest
    pub fn merge(self, overrides: Manifest) -> Manifest {
        Manifest {
            template: overrides.template.or(self.template),
            output: overrides.output.or(self.output),
            namelist: overrides.namelist.or(self.namelist),
            cxx_prefix: overrides.cxx_prefix.or(self.cxx_prefix),
            managed: overrides.managed.or(self.managed),
            parameter_files: overrides.parameter_files.or(self.parameter_files),
        }
    }

    /// Turn the manifest into a runnable job
    ///
    /// Template, output and namelist name are required; an empty list of
    /// parameter files is allowed.
    pub fn into_job(self) -> Result<Job, ConfigError> {
        let template = self.template.ok_or(ConfigError::Missing("template"))?;
        let output = self.output.ok_or(ConfigError::Missing("output file"))?;
        let namelist = self
            .namelist
            .filter(|n| !n.is_empty())
            .ok_or(ConfigError::Missing("namelist name"))?;

        let mut config = GenerateConfig::new()
            .with_namelist_name(namelist)
            .with_managed(self.managed.unwrap_or(false));
        if let Some(prefix) = self.cxx_prefix {
            config = config.with_cxx_prefix(prefix);
        }

        Ok(Job {
            template,
            parameter_files: self.parameter_files.unwrap_or_default(),
            output,
            config,
        })
    }
}
