//! Front end of the stencil compiler.
//!
//! [`parse`] turns the template source into a [`Template`] and
//! [`validate`] checks the rules which do not affect parsing itself.

use stencil_core::Template;
use swc_core::ecma::ast::EsVersion;

pub mod error;
pub mod script;
pub mod template;
mod validate;

pub use error::{ParseError, ParseErrorKind};
pub use template::TemplateParser;
pub use validate::validate;

#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// EcmaScript version used for expressions and `<script>`
    pub es_version: EsVersion,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            es_version: EsVersion::EsNext,
        }
    }
}

/// Parses the template source.
/// Positions in the resulting AST are byte offsets of `source` plus one.
pub fn parse(source: &str, options: &ParseOptions) -> Result<Template, ParseError> {
    let template = TemplateParser::new(source, options).parse_template()?;

    tracing::trace!(
        nodes = template.html.len(),
        has_script = template.script.is_some(),
        has_css = template.css.is_some(),
        "parsed template"
    );

    Ok(template)
}
