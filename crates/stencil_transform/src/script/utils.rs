use stencil_core::StencilAtom;
use swc_core::ecma::ast::{Decl, Expr, ModuleExportName, ObjectPatProp, Pat};

/// Gets rid of the parentheses, e.g. `({ foo })` becomes `{ foo }`
#[inline]
pub fn unroll_paren(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren_expr) => unroll_paren(&paren_expr.expr),
        _ => expr,
    }
}

/// Collects the names declared by a pattern,
/// e.g. `foo` and `bar` in `{ foo, baz: [bar] }` or `rest` in `...rest`
pub fn collect_pat_bindings(pat: &Pat, out: &mut Vec<StencilAtom>) {
    match pat {
        // Base case for recursion
        Pat::Ident(ident) => out.push(ident.sym.to_owned()),

        // `[foo, bar]`
        Pat::Array(arr_pat) => {
            for elem in arr_pat.elems.iter().flatten() {
                collect_pat_bindings(elem, out)
            }
        }

        // `...bar`
        Pat::Rest(rest_pat) => collect_pat_bindings(&rest_pat.arg, out),

        Pat::Object(obj_pat) => {
            for prop in obj_pat.props.iter() {
                match prop {
                    // `foo: bar` in `{ foo: bar }`
                    ObjectPatProp::KeyValue(key_value) => {
                        collect_pat_bindings(&key_value.value, out)
                    }

                    // `foo` in `{ foo }` and in `{ foo = 'bar' }`
                    ObjectPatProp::Assign(assign) => out.push(assign.key.sym.to_owned()),

                    // `bar` in `{ foo, ...bar }`
                    ObjectPatProp::Rest(rest_pat) => collect_pat_bindings(&rest_pat.arg, out),
                }
            }
        }

        // `foo = 42`
        Pat::Assign(assign_pat) => collect_pat_bindings(&assign_pat.left, out),

        Pat::Invalid(_) | Pat::Expr(_) => {}
    }
}

/// Collects the names declared by `function foo() {}`, `class Bar {}` or `const baz = 1, qux = 2`
pub fn collect_decl_bindings(decl: &Decl, out: &mut Vec<StencilAtom>) {
    match decl {
        Decl::Class(class_decl) => out.push(class_decl.ident.sym.to_owned()),
        Decl::Fn(fn_decl) => out.push(fn_decl.ident.sym.to_owned()),
        Decl::Var(var_decl) => {
            for declarator in var_decl.decls.iter() {
                collect_pat_bindings(&declarator.name, out);
            }
        }
        _ => {}
    }
}

#[inline]
pub fn module_export_name(name: &ModuleExportName) -> StencilAtom {
    match name {
        ModuleExportName::Ident(ident) => ident.sym.to_owned(),
        ModuleExportName::Str(s) => s.value.to_owned(),
    }
}

/// Writes `value` as a single-quoted JavaScript string literal
pub fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Member access to `name`: `.name` for identifiers, `['name']` otherwise
pub fn js_property_access(name: &str) -> String {
    let is_ident = name
        .chars()
        .next()
        .map_or(false, |c| c.is_alphabetic() || c == '_' || c == '$')
        && name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$');

    if is_ident {
        format!(".{name}")
    } else {
        format!("[{}]", js_string(name))
    }
}

/// The whitespace between the start of the line and `offset`,
/// or an empty string if anything else precedes `offset` on its line
pub fn line_indent(source: &str, offset: usize) -> &str {
    let line_start = source[..offset].rfind('\n').map_or(0, |idx| idx + 1);
    let prefix = &source[line_start..offset];

    if prefix.chars().all(|c| c == ' ' || c == '\t') {
        prefix
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_quotes_strings() {
        assert_eq!(js_string("./foo"), "'./foo'");
        assert_eq!(js_string("it's"), "'it\\'s'");
        assert_eq!(js_string("a\\b"), "'a\\\\b'");
    }

    #[test]
    fn it_accesses_properties() {
        assert_eq!(js_property_access("foo"), ".foo");
        assert_eq!(js_property_access("$bar_1"), ".$bar_1");
        assert_eq!(js_property_access("my-prop"), "['my-prop']");
    }

    #[test]
    fn it_finds_line_indent() {
        let source = "a;\n\t  export default {};";
        assert_eq!(line_indent(source, 6), "\t  ");
        assert_eq!(line_indent("a; export default {};", 3), "");
        assert_eq!(line_indent("export default {};", 0), "");
    }
}
