//! Traits and shared types for documentation emitters.

use std::path::{Path, PathBuf};

use surfdoc_bindings::BindingSet;
use surfdoc_reference::ReferenceModel;

use crate::resolve::Resolver;

/// Scripting runtime an emitter documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    JavaScript,
    Python,
}

/// Naming used in the generated artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Module name, e.g. `rhino3dm`.
    pub module: String,
    /// Class holding every exported type in the declaration file.
    pub module_class: String,
    /// Version substituted into the Sphinx configuration.
    pub version: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            module: "rhino3dm".into(),
            module_class: "RhinoModule".into(),
            version: "8.0.0".into(),
        }
    }
}

/// Everything an emitter reads.
pub struct EmitContext<'a> {
    pub bindings: &'a BindingSet,
    pub resolver: Resolver<'a>,
    pub options: &'a EmitOptions,
}

impl<'a> EmitContext<'a> {
    pub fn new(reference: &'a ReferenceModel, bindings: &'a BindingSet, options: &'a EmitOptions) -> Self {
        Self {
            bindings,
            resolver: Resolver::new(reference, bindings),
            options,
        }
    }
}

/// One generated file, relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents,
        }
    }

    /// Write under `root`, creating parent directories. Returns the full path.
    pub fn write(&self, root: &Path) -> Result<PathBuf, EmitError> {
        let path = root.join(&self.path);
        let io = |source| EmitError::Io {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io)?;
        }
        std::fs::write(&path, &self.contents).map_err(io)?;
        Ok(path)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("unknown emitter '{name}' (available: {available})")]
    UnknownEmitter { name: String, available: String },

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A documentation emitter.
///
/// Emitters render the resolved class model into the files of one artifact
/// family. They never touch the filesystem; the caller writes the returned
/// artifacts.
///
/// ```ignore
/// use surfdoc_emit::{Artifact, EmitContext, Emitter, Target};
///
/// struct ClassList;
///
/// impl Emitter for ClassList {
///     fn name(&self) -> &'static str { "class-list" }
///     fn target(&self) -> Target { Target::JavaScript }
///     fn emit(&self, ctx: &EmitContext) -> Vec<Artifact> {
///         let names: Vec<_> = ctx.bindings.javascript_classes().map(|c| c.name.clone()).collect();
///         vec![Artifact::new("classes.txt", names.join("\n"))]
///     }
/// }
/// ```
pub trait Emitter: Send + Sync {
    /// Unique emitter identifier (e.g., "jsdoc", "rst").
    fn name(&self) -> &'static str;

    fn target(&self) -> Target;

    fn emit(&self, ctx: &EmitContext) -> Vec<Artifact>;
}
