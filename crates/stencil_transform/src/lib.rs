//! Transformations over the parsed template.
//!
//! - [`template::resolve_expr`] rewrites the free identifiers of a template expression;
//! - [`script::transform_script`] re-expresses the `<script>` module syntax for CommonJS
//!   and extracts the [`stencil_core::TemplateConfig`].
//!
//! Neither modifies the AST. All the rewrites are recorded in a [`stencil_core::EditBuffer`].

#[macro_use]
extern crate lazy_static;

pub mod atoms;
pub mod error;
pub mod script;
pub mod template;

#[cfg(test)]
mod test_utils;

pub use error::{ScriptError, ScriptErrorKind};
pub use script::{reject_css, transform_script, DefaultExportKind, ScriptTransformResult};
pub use template::resolve_expr;
