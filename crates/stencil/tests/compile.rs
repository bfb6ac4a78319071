use pretty_assertions::assert_eq;
use stencil::{compile, CompileError, CompileOptions, CompileResult};

fn compile_ok(source: &str) -> CompileResult {
    compile(source, &CompileOptions::default()).expect("template should compile")
}

fn compile_err(source: &str) -> CompileError {
    match compile(source, &CompileOptions::default()) {
        Ok(result) => panic!("Expected an error, got:\n{}", result.code),
        Err(e) => e,
    }
}

#[test]
fn it_compiles_templates_without_script() {
    let result = compile_ok("<p>{{name}}</p>");

    assert_eq!(
        result.code,
        "exports.render = function ( data ) {\n\tdata = data || {};\n\tvar rendered = '';\n\n\trendered += `<p>${data.name}</p>`;\n\n\treturn rendered;\n};"
    );
    assert_eq!(result.filename, "anonymous.html");
}

#[test]
fn it_compiles_templates_with_script() {
    let source = "<p>{{upper(name)}}</p>\n<script>\nimport upper from './upper';\nexport default {\n\tdata: () => ({ name: 'world' }),\n\thelpers: { upper }\n};\n</script>";
    let result = compile_ok(source);

    assert_eq!(
        result.code,
        concat!(
            "var __import0 = require( './upper' );\n",
            "var upper = __import0 && 'default' in Object( __import0 ) ? __import0['default'] : __import0;\n",
            "\n",
            "var template = (function () {\n",
            "return {\n",
            "\tdata: () => ({ name: 'world' }),\n",
            "\thelpers: { upper }\n",
            "};\n",
            "}());\n",
            "\n",
            "exports.render = function ( data ) {\n",
            "\tdata = Object.assign( template.data(), data );\n",
            "\tvar rendered = '';\n",
            "\n",
            "\trendered += `<p>${template.helpers.upper(data.name)}</p>`;\n",
            "\n",
            "\trendered += `\n`;\n",
            "\n",
            "\treturn rendered;\n",
            "};"
        )
    );
}

#[test]
fn it_wraps_scripts_without_default_export() {
    let source = "{{a}}<script>export const answer = 42;</script>";
    let result = compile_ok(source);

    assert_eq!(
        result.code,
        concat!(
            "(function () {const answer = 42;\n",
            "exports.answer = answer;}());\n",
            "\n",
            "exports.render = function ( data ) {\n",
            "\tdata = data || {};\n",
            "\tvar rendered = '';\n",
            "\n",
            "\trendered += data.a;\n",
            "\n",
            "\treturn rendered;\n",
            "};"
        )
    );
}

#[test]
fn it_escapes_template_literal_syntax() {
    let result = compile_ok("<p>${raw} `tick` \\ {{value}}</p>");
    assert!(result
        .code
        .contains("rendered += `<p>\\${raw} \\`tick\\` \\\\ ${data.value}</p>`;"));
}

#[test]
fn it_resolves_names_against_blocks_and_helpers() {
    let source = "{{#each items as upper, i}}{{i}}{{upper(label)}}{{/each}}<script>export default { helpers: { upper: s => s.toUpperCase() } };</script>";
    let result = compile_ok(source);

    assert!(result.code.contains(
        "rendered += data.items.map( ( upper, i ) => `${i}${template.helpers.upper(data.label)}` ).join( '' );"
    ));
}

#[test]
fn it_keeps_html_comments() {
    let result = compile_ok("<!-- keep --><p>x</p>");

    assert!(result.code.contains("rendered += `<!-- keep -->`;"));
    assert!(result.code.contains("rendered += `<p>x</p>`;"));
}

#[test]
fn it_binds_declarations_inside_expressions() {
    let source = "{{ items.map(function (n) { for (var j = 0, s = 0; j < n; j++) { s += j; } return s; }).join() }}";
    let result = compile_ok(source);

    assert!(result.code.contains(
        "rendered += data.items.map(function (n) { for (var j = 0, s = 0; j < n; j++) { s += j; } return s; }).join();"
    ));
}

#[test]
fn it_maps_source_segments() {
    let source = "<p>{{name}}</p>";
    let result = compile_ok(source);

    assert_eq!(result.segments.len(), 1);
    let segment = &result.segments[0];
    assert_eq!(segment.original, 5..9);
    assert_eq!(&result.code[segment.generated.clone()], "data.name");
    assert_eq!(segment.original_line, 0);
    assert_eq!(segment.original_column, 5);
    assert_eq!(segment.generated_line, 4);
}

#[test]
fn it_keeps_the_filename() {
    let options = CompileOptions {
        filename: "views/main.html".into(),
        ..Default::default()
    };
    let result = compile("<br>", &options).expect("template should compile");
    assert_eq!(result.filename, "views/main.html");
}

#[test]
fn it_is_deterministic() {
    let source = "<ul>{{#each items as item}}<li class=\"{{item.kind}}\">{{item.name}}</li>{{/each}}</ul>\n<script>\nimport a from 'a';\nimport { b } from 'b';\nexport default { helpers: { a, b } };\n</script>";

    let first = compile_ok(source);
    let second = compile_ok(source);
    assert_eq!(first.code, second.code);
    assert_eq!(first.segments, second.segments);
}

#[test]
fn it_reports_errors() {
    assert!(matches!(
        compile_err("<p>{{name</p>"),
        CompileError::Parse(_)
    ));
    assert!(matches!(
        compile_err("<p class=\"a\" class=\"b\"></p>"),
        CompileError::Parse(_)
    ));
    assert!(matches!(
        compile_err("<p></p><style>p { color: red }</style>"),
        CompileError::Script(_)
    ));
    assert!(matches!(
        compile_err("<script>export default 42;</script>"),
        CompileError::Script(_)
    ));
    assert!(matches!(
        compile_err("<Widget><p/></Widget><script>export default { components: { Widget } };</script>"),
        CompileError::Codegen(_)
    ));
}
