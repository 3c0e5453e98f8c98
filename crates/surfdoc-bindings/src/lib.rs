//! Binding registries scanned from native registration code.
//!
//! The native library exposes the same classes twice: once through an
//! embind-style JavaScript dialect (`class_<…>("Name")`, `.function(…)`) and
//! once through a pybind11-style Python dialect (`py::class_<…>(m, "Name")`,
//! `.def(…)`). Registration code is scanned line by line; every line is
//! classified by [`classify`] and fed to a [`Scanner`] whose cursor tracks the
//! entity currently being declared.
//!
//! # Example
//!
//! ```ignore
//! use surfdoc_bindings::{ScanOptions, scan_dir};
//!
//! let bindings = scan_dir("src/bindings".as_ref(), &ScanOptions::default())?;
//! for class in bindings.javascript_classes() {
//!     println!("{} ({} methods)", class.name, class.methods.len());
//! }
//! ```

mod error;
pub mod line;
pub mod model;
mod scan;

pub use error::BindingError;
pub use line::{Dialect, Line, classify};
pub use model::{BindingSet, BoundMethod, ClassEntity, Entity, EnumEntity};
pub use scan::{ScanOptions, Scanner, scan_dir};
