//! Cross-reference resolution and documentation emitters.
//!
//! `surfdoc-emit` pairs every member of the binding registries with its
//! documented declaration in the reference model, translates reference types
//! into each script runtime's vocabulary, and renders the result as API help.
//!
//! # Architecture
//!
//! ```text
//! Inputs                 Resolution        Output Emitters
//! ──────────────     ─────────────────     ────────────────────────────
//! ReferenceModel ─┐                     ┌─> jsdoc       javascript/<m>.js
//!                 ├─> Resolver ─────────┼─> typescript  javascript/<m>.d.ts
//! BindingSet    ──┘   (resolve.rs)      ├─> rst         python/rst/*.rst
//!                     + typemap.rs      ├─> python      python/stubs/<m>.py
//!                                       └─> pyi         python/stubs/<m>/__init__.pyi
//! ```
//!
//! # Using the Emitter Registry
//!
//! ```ignore
//! use surfdoc_emit::{EmitContext, EmitOptions, emitter_names, get_emitter};
//!
//! for name in emitter_names() {
//!     println!("Emitter: {}", name);
//! }
//!
//! let options = EmitOptions::default();
//! let ctx = EmitContext::new(&reference, &bindings, &options);
//! if let Some(emitter) = get_emitter("typescript") {
//!     for artifact in emitter.emit(&ctx) {
//!         artifact.write("docs".as_ref())?;
//!     }
//! }
//! ```
//!
//! # Feature Flags
//!
//! Emitter flags (use `emit-*` prefix):
//! - `emit-jsdoc` - JavaScript class stub for jsdoc
//! - `emit-typescript` - TypeScript declaration file
//! - `emit-rst` - Sphinx reference pages, index and conf.py
//! - `emit-python` - Python skeleton with docstrings
//! - `emit-pyi` - Python type-hint stubs
//!
//! Target umbrella flags:
//! - `javascript` - emit-jsdoc + emit-typescript
//! - `python` - emit-rst + emit-python + emit-pyi

pub mod order;
pub mod output;
pub mod registry;
pub mod resolve;
pub mod traits;
pub mod typemap;

pub use registry::{emitter_names, emitters, emitters_for_target, get_emitter, select_emitters};
pub use resolve::Resolver;
pub use traits::{Artifact, EmitContext, EmitError, EmitOptions, Emitter, Target};
pub use typemap::{
    TypeMapping, declared_type, python_doc_type, python_hint_type, script_doc_type, translate,
};
