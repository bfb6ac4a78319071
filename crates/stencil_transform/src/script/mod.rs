//! Transforms the `<script>` of a template.
//!
//! The script is emitted inside a function which is invoked once when the module loads:
//! ```js
//! var __import0 = require( './foo' );
//! var foo = __import0 && 'default' in Object( __import0 ) ? __import0['default'] : __import0;
//!
//! var template = (function () {
//!     return { helpers: { foo } };
//! }());
//! ```

use stencil_core::{
    to_offset, EditBuffer, Fragment, ImportRecord, ScriptBlock, Template, TemplateConfig,
};

use crate::error::{ScriptError, ScriptErrorKind};

pub mod config;
pub mod exports;
pub mod imports;
pub mod utils;

pub struct ScriptTransformResult {
    pub imports: Vec<ImportRecord>,
    /// Statements replacing the imports, in source order
    pub hoisted: Vec<Fragment>,
    /// The script without imports, with exports rewritten
    pub body: Fragment,
    pub config: TemplateConfig,
    pub default_export: DefaultExportKind,
}

/// How the default export of the script was rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultExportKind {
    /// No default export, the wrapped script returns nothing
    None,
    /// The default export was the last statement and became `return`
    Final,
    /// The default export was bound to `template` and returned after the last statement
    Bound,
}

impl DefaultExportKind {
    #[inline]
    pub fn is_present(&self) -> bool {
        !matches!(self, DefaultExportKind::None)
    }
}

/// Transforms the script:
/// 1. every top-level import is removed and re-expressed with `require`;
/// 2. named exports are re-expressed with assignments to `exports`;
/// 3. the default export is turned into the return value of the script
///    and its `data`, `helpers` and `components` are extracted.
pub fn transform_script(
    script: &ScriptBlock,
    edits: &mut EditBuffer,
) -> Result<ScriptTransformResult, ScriptError> {
    let bounds = (to_offset(script.span.lo), to_offset(script.span.hi));

    let imports = imports::collect_imports(&script.content, bounds, edits);
    let hoisted = imports
        .iter()
        .flat_map(imports::hoisted_statements)
        .collect();

    let (default_export, config) = exports::transform_exports(&script.content, edits)?;

    tracing::debug!(
        imports = imports.len(),
        ?default_export,
        has_data = config.has_data(),
        helpers = config.helpers.len(),
        components = config.components.len(),
        "transformed script"
    );

    Ok(ScriptTransformResult {
        imports,
        hoisted,
        body: Fragment::slice(script.span),
        config,
        default_export,
    })
}

/// Styles are not supported
pub fn reject_css(template: &Template) -> Result<(), ScriptError> {
    match template.css {
        Some(ref style) => Err(ScriptError {
            span: style.span,
            kind: ScriptErrorKind::UnsupportedCss,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::module_at;
    use pretty_assertions::assert_eq;
    use stencil_core::{span_of, StencilAtom};

    /// Transforms the whole `source` as a script, returns the result and the rewritten body
    fn transform(source: &str) -> Result<(ScriptTransformResult, String), ScriptErrorKind> {
        let script = ScriptBlock {
            content: Box::new(module_at(source)),
            span: span_of(0, source.len()),
        };
        let mut edits = EditBuffer::new(source);

        let result = transform_script(&script, &mut edits).map_err(|e| e.kind)?;
        let Fragment::SourceSlice { start, end } = result.body else {
            panic!("Expected a source slice");
        };
        let body = edits.slice(start, end);

        Ok((result, body))
    }

    fn hoisted_text(result: &ScriptTransformResult) -> Vec<String> {
        result
            .hoisted
            .iter()
            .map(|it| match it {
                Fragment::Synthesized(text) => text.to_string(),
                Fragment::SourceSlice { .. } => panic!("Expected synthesized text"),
            })
            .collect()
    }

    #[test]
    fn it_hoists_imports() {
        let (result, body) = transform(
            "import foo from './foo';\nimport * as ns from 'ns';\nimport { bar as baz, qux } from \"bar\";\nimport './polyfill';\n\nexport default {\n\thelpers: { foo }\n};",
        )
        .expect("script should be transformed");

        assert_eq!(
            hoisted_text(&result),
            vec![
                "var __import0 = require( './foo' );",
                "var foo = __import0 && 'default' in Object( __import0 ) ? __import0['default'] : __import0;",
                "var __import1 = require( 'ns' );",
                "var ns = __import1;",
                "var __import2 = require( 'bar' );",
                "var baz = __import2.bar;",
                "var qux = __import2.qux;",
                "require( './polyfill' );",
            ]
        );
        assert_eq!(body, "\nreturn {\n\thelpers: { foo }\n};");
        assert_eq!(result.default_export, DefaultExportKind::Final);
        assert_eq!(result.imports.len(), 4);
        assert!(result.imports[3].is_side_effect_only());
        assert!(result.config.is_helper(&StencilAtom::from("foo")));
    }

    #[test]
    fn it_removes_whitespace_around_imports() {
        let (_, body) = transform("\timport a from 'a'; import b from 'b';  \r\nx();")
            .expect("script should be transformed");
        assert_eq!(body, "x();");
    }

    #[test]
    fn it_binds_non_final_default_export() {
        let (result, body) = transform("\n  export default {\n    data: () => ({ a: 1 })\n  };\n  setup();\n")
            .expect("script should be transformed");

        assert_eq!(
            body,
            "\n  var template = {\n    data: () => ({ a: 1 })\n  };\n  setup();\n\n  return template;\n"
        );
        assert_eq!(result.default_export, DefaultExportKind::Bound);
        assert!(result.config.has_data());
    }

    #[test]
    fn it_wraps_scripts_without_default_export() {
        let (result, body) =
            transform("console.log('loaded');").expect("script should be transformed");
        assert_eq!(body, "console.log('loaded');");
        assert_eq!(result.default_export, DefaultExportKind::None);
        assert!(!result.default_export.is_present());
        assert!(result.hoisted.is_empty());
    }

    #[test]
    fn it_rewrites_named_exports() {
        let (_, body) = transform(
            "export const a = 1, b = 2;\nexport function f() {}\nexport { a as c };\nexport { d } from './d';",
        )
        .expect("script should be transformed");

        assert_eq!(
            body,
            "const a = 1, b = 2;\nexports.a = a;\nexports.b = b;\nfunction f() {}\nexports.f = f;\nexports.c = a;\nexports.d = require( './d' ).d;"
        );
    }

    #[test]
    fn it_rejects_unsupported_exports() {
        assert!(matches!(
            transform("export default function () {}"),
            Err(ScriptErrorKind::InvalidDefaultExport)
        ));
        assert!(matches!(
            transform("export default 42;"),
            Err(ScriptErrorKind::InvalidDefaultExport)
        ));
        assert!(matches!(
            transform("export * from './all';"),
            Err(ScriptErrorKind::UnsupportedExport)
        ));
    }
}
