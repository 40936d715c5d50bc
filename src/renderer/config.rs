//! Configuration for code generation

use std::path::{Path, PathBuf};

/// Default naming prefix for the C++ artifacts
pub const DEFAULT_CXX_PREFIX: &str = "extern";

/// Options threaded through every emitter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Group name used in `namelist /<name>/` declarations
    pub namelist_name: String,

    /// Path prefix for the C++ artifacts; its basename also names the
    /// include guards, the includes and the init entry point
    pub cxx_prefix: String,

    /// Emit allocatable, managed-memory storage instead of saved globals
    pub managed: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            namelist_name: "probin".to_string(),
            cxx_prefix: DEFAULT_CXX_PREFIX.to_string(),
            managed: false,
        }
    }
}

impl GenerateConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the namelist group name
    pub fn with_namelist_name(mut self, name: impl Into<String>) -> Self {
        self.namelist_name = name.into();
        self
    }

    /// Set the C++ artifact prefix
    pub fn with_cxx_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.cxx_prefix = prefix.into();
        self
    }

    /// Enable or disable managed-memory emission
    pub fn with_managed(mut self, managed: bool) -> Self {
        self.managed = managed;
        self
    }

    /// Last path component of the prefix
    pub fn prefix_basename(&self) -> String {
        Path::new(&self.cxx_prefix)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.cxx_prefix.clone())
    }

    /// `<prefix>_parameters_F.H`
    pub fn foreign_header_path(&self) -> PathBuf {
        PathBuf::from(format!("{}_parameters_F.H", self.cxx_prefix))
    }

    /// `<prefix>_parameters.H`
    pub fn public_header_path(&self) -> PathBuf {
        PathBuf::from(format!("{}_parameters.H", self.cxx_prefix))
    }

    /// `<prefix>_parameters.cpp`
    pub fn init_source_path(&self) -> PathBuf {
        PathBuf::from(format!("{}_parameters.cpp", self.cxx_prefix))
    }
}
