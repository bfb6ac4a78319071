use smallvec::SmallVec;
use stencil_core::{to_offset, EditBuffer, Fragment, ImportRecord};
use swc_core::{
    common::Span,
    ecma::ast::{ImportDecl, ImportSpecifier, Module, ModuleDecl, ModuleItem},
};

use crate::atoms::IMPORT_BINDING_PREFIX;

use super::utils::{js_property_access, js_string, module_export_name};

/// Collects the top-level imports and removes them from the script.
/// `bounds` is the byte range of the script in the template source.
pub fn collect_imports(
    module: &Module,
    bounds: (u32, u32),
    edits: &mut EditBuffer,
) -> Vec<ImportRecord> {
    let mut records = Vec::new();
    let mut removed_until = bounds.0;

    for module_item in module.body.iter() {
        let ModuleItem::ModuleDecl(ModuleDecl::Import(import_decl)) = module_item else {
            continue;
        };

        records.push(record_import(import_decl, records.len()));

        let (start, end) =
            removal_range(edits.original(), import_decl.span, (removed_until, bounds.1));
        edits.remove(start, end);
        removed_until = end;
    }

    records
}

fn record_import(import_decl: &ImportDecl, index: usize) -> ImportRecord {
    let mut record = ImportRecord {
        module_binding: format!("{IMPORT_BINDING_PREFIX}{index}").into(),
        source: import_decl.src.value.to_owned(),
        default_local: None,
        namespace_local: None,
        named: SmallVec::new(),
    };

    for specifier in import_decl.specifiers.iter() {
        match specifier {
            // `import foo from 'mod'`
            ImportSpecifier::Default(default_spec) => {
                record.default_local = Some(default_spec.local.sym.to_owned())
            }

            // `import * as foo from 'mod'`
            ImportSpecifier::Namespace(ns_spec) => {
                record.namespace_local = Some(ns_spec.local.sym.to_owned())
            }

            // `import { foo, bar as baz } from 'mod'`
            ImportSpecifier::Named(named_spec) => {
                let local = named_spec.local.sym.to_owned();
                let imported = named_spec
                    .imported
                    .as_ref()
                    .map_or_else(|| local.to_owned(), module_export_name);

                record.named.push((local, imported));
            }
        }
    }

    record
}

/// The range of an import declaration together with the horizontal whitespace around it
/// and one trailing line break
fn removal_range(source: &str, span: Span, bounds: (u32, u32)) -> (u32, u32) {
    let bytes = source.as_bytes();
    let is_horizontal_ws = |b: u8| b == b' ' || b == b'\t';

    let mut start = to_offset(span.lo).max(bounds.0) as usize;
    while start > bounds.0 as usize && is_horizontal_ws(bytes[start - 1]) {
        start -= 1;
    }

    let limit = bounds.1 as usize;
    let mut end = to_offset(span.hi) as usize;
    while end < limit && is_horizontal_ws(bytes[end]) {
        end += 1;
    }

    if source[end..limit].starts_with("\r\n") {
        end += 2;
    } else if source[end..limit].starts_with('\n') {
        end += 1;
    }

    (start as u32, end as u32)
}

/// Statements which replace an import, in order
pub fn hoisted_statements(record: &ImportRecord) -> Vec<Fragment> {
    let source = js_string(&record.source);

    // `import './polyfill'`
    if record.is_side_effect_only() {
        return vec![Fragment::text(format!("require( {source} );"))];
    }

    let binding = &record.module_binding;
    let mut out = Vec::with_capacity(2 + record.named.len());
    out.push(Fragment::text(format!("var {binding} = require( {source} );")));

    if let Some(ref local) = record.default_local {
        out.push(Fragment::text(format!(
            "var {local} = {binding} && 'default' in Object( {binding} ) ? {binding}['default'] : {binding};"
        )));
    }

    if let Some(ref local) = record.namespace_local {
        out.push(Fragment::text(format!("var {local} = {binding};")));
    }

    for (local, imported) in record.named.iter() {
        out.push(Fragment::text(format!(
            "var {local} = {binding}{};",
            js_property_access(imported)
        )));
    }

    out
}
