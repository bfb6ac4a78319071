//! Generates the `render` function of a template.
//!
//! Code is never produced as one string. Instead, it is a list of [`stencil_core::Fragment`]s where
//! pieces of the (edited) source are referenced by their position, and the
//! [`SnippetComposer`] resolves them once everything is generated.

mod attributes;
pub mod compose;
mod components;
mod context;
mod control_flow;
mod elements;
mod error;
pub mod module;
mod text;
mod utils;

#[cfg(test)]
mod test_utils;

pub use compose::{ComposedOutput, SnippetComposer, SourceSegment};
pub use context::{CodeFragment, CodegenContext};
pub use error::CodegenError;
pub use module::generate_module;
