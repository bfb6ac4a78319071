use stencil_core::Fragment;
use stencil_transform::{
    atoms::{RENDERED, TEMPLATE},
    ScriptTransformResult,
};

/// Assembles the module:
/// ```js
/// var __import0 = require( './foo' );
///
/// var template = (function () { /* script */ }());
///
/// exports.render = function ( data ) {
///     data = Object.assign( template.data(), data );
///     var rendered = '';
///
///     rendered += `...`;
///
///     return rendered;
/// };
/// ```
pub fn generate_module(
    script: Option<ScriptTransformResult>,
    blocks: Vec<Vec<Fragment>>,
) -> Vec<Fragment> {
    let mut out = Vec::new();
    let mut has_data = false;

    if let Some(script) = script {
        has_data = script.config.has_data();

        // Imports
        let has_hoisted = !script.hoisted.is_empty();
        for statement in script.hoisted {
            out.push(statement);
            out.push(Fragment::text("\n"));
        }
        if has_hoisted {
            out.push(Fragment::text("\n"));
        }

        // Script itself
        if script.default_export.is_present() {
            out.push(Fragment::text(format!("var {} = (function () {{", *TEMPLATE)));
        } else {
            out.push(Fragment::text("(function () {"));
        }
        out.push(script.body);
        out.push(Fragment::text("}());\n\n"));
    }

    out.push(Fragment::text("exports.render = function ( data ) {\n"));
    if has_data {
        out.push(Fragment::text(format!(
            "\tdata = Object.assign( {}.data(), data );\n",
            *TEMPLATE
        )));
    } else {
        out.push(Fragment::text("\tdata = data || {};\n"));
    }
    out.push(Fragment::text(format!("\tvar {} = '';\n\n", *RENDERED)));

    for block in blocks {
        out.push(Fragment::text("\t"));
        out.extend(block);
        out.push(Fragment::text("\n\n"));
    }

    out.push(Fragment::text(format!("\treturn {};\n}};", *RENDERED)));

    out
}
