use stencil_core::{to_offset, EditBuffer, StencilAtom, TemplateConfig};
use swc_core::{
    common::Spanned,
    ecma::ast::{
        ExportDecl, ExportDefaultExpr, ExportSpecifier, Module, ModuleDecl, ModuleItem,
        NamedExport,
    },
};

use crate::{
    atoms::TEMPLATE,
    error::{ScriptError, ScriptErrorKind},
};

use super::{
    config::extract_config,
    utils::{collect_decl_bindings, js_property_access, js_string, line_indent, module_export_name},
    DefaultExportKind,
};

/// Rewrites the exports of the script:
/// - the default export becomes the return value of the wrapping function;
/// - named exports become assignments to `exports`.
///
/// Returns the kind of the default export and the configuration extracted from it.
pub fn transform_exports(
    module: &Module,
    edits: &mut EditBuffer,
) -> Result<(DefaultExportKind, TemplateConfig), ScriptError> {
    // Imports are removed, so the last statement is the last non-import
    let last_item = module
        .body
        .iter()
        .rev()
        .find(|it| !matches!(it, ModuleItem::ModuleDecl(ModuleDecl::Import(_))));

    let mut default_export: Option<(&ExportDefaultExpr, bool)> = None;

    for module_item in module.body.iter() {
        let ModuleItem::ModuleDecl(module_decl) = module_item else {
            continue;
        };

        match module_decl {
            ModuleDecl::ExportDefaultExpr(export_default) => {
                if default_export.is_some() {
                    return Err(ScriptError {
                        span: export_default.span,
                        kind: ScriptErrorKind::InvalidDefaultExport,
                    });
                }
                let is_final = last_item.map_or(false, |it| std::ptr::eq(it, module_item));
                default_export = Some((export_default, is_final));
            }

            // `export default function () {}` or `export default class {}`
            ModuleDecl::ExportDefaultDecl(export_default) => {
                return Err(ScriptError {
                    span: export_default.span,
                    kind: ScriptErrorKind::InvalidDefaultExport,
                })
            }

            ModuleDecl::ExportDecl(export_decl) => transform_export_decl(export_decl, edits),

            ModuleDecl::ExportNamed(named_export) => transform_named_export(named_export, edits),

            ModuleDecl::ExportAll(export_all) => {
                return Err(ScriptError {
                    span: export_all.span,
                    kind: ScriptErrorKind::UnsupportedExport,
                })
            }

            _ => {}
        }
    }

    let Some((export_default, is_final)) = default_export else {
        return Ok((DefaultExportKind::None, TemplateConfig::default()));
    };

    let config = extract_config(&export_default.expr)?;

    let start = to_offset(export_default.span.lo);
    let expr_start = to_offset(export_default.expr.span_lo());

    if is_final {
        // `export default {}` -> `return {}`
        edits.overwrite(start, expr_start, "return ");
        return Ok((DefaultExportKind::Final, config));
    }

    // `export default {}` -> `var template = {}` and `return template;` at the very end
    let indent = line_indent(edits.original(), start as usize).to_owned();
    edits.overwrite(start, expr_start, &format!("var {} = ", *TEMPLATE));

    if let Some(last_item) = last_item {
        edits.append_left(
            to_offset(last_item.span_hi()),
            &format!("\n\n{indent}return {};", *TEMPLATE),
        );
    }

    Ok((DefaultExportKind::Bound, config))
}

/// `export const foo = 1` -> `const foo = 1` followed by `exports.foo = foo;`
fn transform_export_decl(export_decl: &ExportDecl, edits: &mut EditBuffer) {
    let start = to_offset(export_decl.span.lo);
    edits.remove(start, to_offset(export_decl.decl.span_lo()));

    let mut names: Vec<StencilAtom> = Vec::new();
    collect_decl_bindings(&export_decl.decl, &mut names);

    let indent = line_indent(edits.original(), start as usize).to_owned();
    let end = to_offset(export_decl.span.hi);
    for name in names {
        edits.append_left(
            end,
            &format!("\n{indent}exports{} = {name};", js_property_access(&name)),
        );
    }
}

/// `export { foo as bar }` -> `exports.bar = foo;`,
/// `export { foo } from 'mod'` -> `exports.foo = require( 'mod' ).foo;`
fn transform_named_export(named_export: &NamedExport, edits: &mut EditBuffer) {
    let source = named_export
        .src
        .as_ref()
        .map(|src| format!("require( {} )", js_string(&src.value)));

    let mut statements = Vec::with_capacity(named_export.specifiers.len());

    for specifier in named_export.specifiers.iter() {
        let (exported, value) = match specifier {
            // `export { foo }` and `export { foo as bar }`
            ExportSpecifier::Named(named_spec) => {
                let local = module_export_name(&named_spec.orig);
                let exported = named_spec
                    .exported
                    .as_ref()
                    .map_or_else(|| local.to_owned(), module_export_name);

                let value = match source {
                    Some(ref source) => format!("{source}{}", js_property_access(&local)),
                    None => local.to_string(),
                };
                (exported, value)
            }

            // `export * as ns from 'mod'`
            ExportSpecifier::Namespace(ns_spec) => (
                module_export_name(&ns_spec.name),
                source.to_owned().unwrap_or_default(),
            ),

            // `export foo from 'mod'`
            ExportSpecifier::Default(default_spec) => (
                default_spec.exported.sym.to_owned(),
                format!("{}['default']", source.as_deref().unwrap_or_default()),
            ),
        };

        statements.push(format!("exports{} = {value};", js_property_access(&exported)));
    }

    edits.overwrite(
        to_offset(named_export.span.lo),
        to_offset(named_export.span.hi),
        &statements.join(" "),
    );
}
