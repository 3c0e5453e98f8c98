//! Output emitters.
//!
//! Each emitter renders the binding registries, resolved against the
//! reference model, into one family of artifacts. All emitters implement
//! the [`Emitter`](crate::traits::Emitter) trait for uniform access via the
//! registry.

// JavaScript
#[cfg(feature = "emit-jsdoc")]
pub mod jsdoc;

#[cfg(feature = "emit-jsdoc")]
pub use jsdoc::{JsDocEmitter, generate_jsdoc};

#[cfg(feature = "emit-typescript")]
pub mod typescript;

#[cfg(feature = "emit-typescript")]
pub use typescript::{TypeScriptEmitter, generate_typescript};

// Python
#[cfg(feature = "emit-rst")]
pub mod rst;

#[cfg(feature = "emit-rst")]
pub use rst::{RstEmitter, generate_rst, generate_rst_index, generate_sphinx_conf};

#[cfg(feature = "emit-python")]
pub mod python;

#[cfg(feature = "emit-python")]
pub use python::{PythonEmitter, generate_python};

#[cfg(feature = "emit-pyi")]
pub mod pyi;

#[cfg(feature = "emit-pyi")]
pub use pyi::{PyiEmitter, generate_pyi};

/// Non-blank lines of a documentation entry, trimmed.
#[allow(dead_code)]
pub(crate) fn text_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}

/// A documentation entry folded onto one line.
#[allow(dead_code)]
pub(crate) fn one_line(text: &str) -> String {
    text_lines(text).collect::<Vec<_>>().join(" ")
}

/// Parameter name usable in Python source.
#[allow(dead_code)]
pub(crate) fn python_name(name: &str) -> &str {
    match name {
        "from" => "_from",
        other => other,
    }
}
