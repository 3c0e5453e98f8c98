//! Reference API model extracted from documented C# sources.
//!
//! The reference corpus is the fully documented implementation of the API
//! surface. `surfdoc-reference` parses it with tree-sitter, keeps the public
//! constructors, methods and properties of every class and struct, and pairs
//! each with its XML documentation comment.
//!
//! # Example
//!
//! ```ignore
//! use surfdoc_reference::{ExtractOptions, extract_dir};
//!
//! let model = extract_dir("src/dotnet".as_ref(), &ExtractOptions::default())?;
//! let circle = model.class("Circle").expect("Circle is documented");
//! for method in &circle.methods {
//!     println!("{}({})", method.name, method.params.len());
//! }
//! ```

pub mod doc;
mod error;
pub mod extract;
pub mod model;
mod preproc;

pub use doc::{DocBlock, DocEntry, DocTag};
pub use error::ReferenceError;
pub use extract::{ExtractOptions, extract_dir, extract_source};
pub use model::{
    Constructor, Method, ParamModifier, Parameter, Property, ReferenceClass, ReferenceModel,
};
