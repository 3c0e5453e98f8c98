//! API help generator for a native geometry library bound to JavaScript and
//! Python.
//!
//! Reads a documented C# reference corpus and the native binding sources,
//! pairs each bound member with its documented counterpart, and writes
//! jsdoc stubs, a TypeScript declaration file, Sphinx pages and Python stubs.

pub mod config;
pub mod pipeline;

pub use config::SurfdocConfig;
pub use pipeline::{Sources, generate, run};
