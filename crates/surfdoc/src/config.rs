//! Configuration for surfdoc.
//!
//! Loads config from, in order:
//! 1. The file given with `--config`
//! 2. Per-project: .surfdoc/config.toml under the current directory
//! 3. Built-in defaults
//!
//! Example config.toml:
//! ```toml
//! [reference]
//! defined_symbols = ["RHINO3DM_BUILD"]
//!
//! [bindings]
//! extensions = ["cpp", "h"]
//!
//! [output]
//! module = "rhino3dm"
//! emitters = ["typescript", "pyi"]
//! # or every emitter of one runtime:
//! # target = "python"
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use surfdoc_bindings::ScanOptions;
use surfdoc_emit::{EmitOptions, Target};
use surfdoc_reference::ExtractOptions;

/// Reference corpus traversal.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReferenceConfig {
    pub extensions: Vec<String>,
    /// Files starting with this prefix are generated code and skipped.
    pub generated_prefix: String,
    pub skip_dirs: Vec<String>,
    /// Symbols considered defined in `#if` regions.
    pub defined_symbols: Vec<String>,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        let options = ExtractOptions::default();
        Self {
            extensions: options.extensions,
            generated_prefix: options.generated_prefix,
            skip_dirs: options.skip_dirs,
            defined_symbols: options.defined_symbols,
        }
    }
}

impl ReferenceConfig {
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            extensions: self.extensions.clone(),
            generated_prefix: self.generated_prefix.clone(),
            skip_dirs: self.skip_dirs.clone(),
            defined_symbols: self.defined_symbols.clone(),
        }
    }
}

/// Binding source traversal.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BindingsConfig {
    pub extensions: Vec<String>,
    pub skip_dirs: Vec<String>,
}

impl Default for BindingsConfig {
    fn default() -> Self {
        let options = ScanOptions::default();
        Self {
            extensions: options.extensions,
            skip_dirs: options.skip_dirs,
        }
    }
}

impl BindingsConfig {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            extensions: self.extensions.clone(),
            skip_dirs: self.skip_dirs.clone(),
        }
    }
}

/// Scripting runtime named in config or on the command line.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TargetName {
    Javascript,
    Python,
}

impl From<TargetName> for Target {
    fn from(name: TargetName) -> Self {
        match name {
            TargetName::Javascript => Target::JavaScript,
            TargetName::Python => Target::Python,
        }
    }
}

/// Naming and emitter selection for generated files.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    pub module: String,
    pub module_class: String,
    pub version: String,
    /// Emitters to run. Empty runs every built-in.
    pub emitters: Vec<String>,
    /// Restrict the run to emitters of one runtime.
    pub target: Option<TargetName>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        let options = EmitOptions::default();
        Self {
            module: options.module,
            module_class: options.module_class,
            version: options.version,
            emitters: Vec::new(),
            target: None,
        }
    }
}

impl OutputConfig {
    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            module: self.module.clone(),
            module_class: self.module_class.clone(),
            version: self.version.clone(),
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SurfdocConfig {
    pub reference: ReferenceConfig,
    pub bindings: BindingsConfig,
    pub output: OutputConfig,
}

impl SurfdocConfig {
    /// Load the explicit config file, else the project one, else defaults.
    ///
    /// An explicit path must exist. Either file must parse.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }
        let project = Self::project_config_path();
        if project.is_file() {
            return Self::load_file(&project);
        }
        tracing::debug!("no config file, using defaults");
        Ok(Self::default())
    }

    fn project_config_path() -> PathBuf {
        Path::new(".surfdoc").join("config.toml")
    }

    /// Load config from a file path.
    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
