mod ast;
mod config;
mod edits;
mod fragment;
mod html_tags;
mod scope;

pub use ast::*;
pub use config::*;
pub use edits::EditBuffer;
pub use fragment::*;
pub use html_tags::is_void_element;
pub use scope::ScopeStack;

/// Interned string used across the compiler, same as the one used by `swc`
pub type StencilAtom = swc_core::ecma::atoms::Atom;
