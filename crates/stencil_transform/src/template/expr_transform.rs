use stencil_core::{to_offset, ConfigMap, EditBuffer, Fragment, ScopeStack, StencilAtom};
use swc_core::{
    common::Spanned,
    ecma::{
        ast::{
            ArrowExpr, BlockStmt, BlockStmtOrExpr, CallExpr, Callee, CatchClause, Decl, Expr,
            FnExpr, ForHead, ForInStmt, ForOfStmt, ForStmt, Function, Ident, OptCall, Prop,
            SimpleAssignTarget, Stmt, SwitchStmt, VarDecl, VarDeclKind, VarDeclOrExpr,
        },
        visit::{Visit, VisitWith},
    },
};

use crate::{
    atoms::{DATA_ACCESSOR, HELPERS_ACCESSOR},
    script::utils::{collect_decl_bindings, collect_pat_bindings},
};

struct ScopeResolver<'a> {
    scope: ScopeStack,
    helpers: &'a ConfigMap,
    edits: &'a mut EditBuffer,
}

/// Resolves the references of a template expression.
///
/// A free identifier is prefixed with `data.`, a call of a helper with `template.helpers.`,
/// and names bound by the enclosing blocks are kept as is:
/// - `foo.bar` becomes `data.foo.bar`;
/// - `upper(item)` becomes `template.helpers.upper(item)` when `upper` is a helper
///   and `item` is bound by an enclosing each-block.
///
/// The helper check takes precedence, so a block binding never shadows a helper in call position.
///
/// Rewrites are recorded in `edits`, the returned fragment points to the rewritten expression.
pub fn resolve_expr(
    expr: &Expr,
    scope: &ScopeStack,
    helpers: &ConfigMap,
    edits: &mut EditBuffer,
) -> Fragment {
    let mut resolver = ScopeResolver {
        scope: scope.to_owned(),
        helpers,
        edits,
    };
    expr.visit_with(&mut resolver);

    Fragment::slice(expr.span())
}

impl ScopeResolver<'_> {
    /// Prefixes a reference unless a block binds it
    fn resolve_reference(&mut self, ident: &Ident) {
        if self.scope.contains(&ident.sym) {
            return;
        }

        self.edits.prepend_right(to_offset(ident.span.lo), DATA_ACCESSOR);
    }

    /// Prefixes the callee when its root is a helper.
    /// Returns `false` when the callee is not a helper and was left untouched.
    fn resolve_helper_callee(&mut self, callee: Option<&Expr>) -> bool {
        let Some(helper_root) = callee
            .and_then(root_ident)
            .filter(|it| self.helpers.contains_key(&it.sym))
        else {
            return false;
        };

        self.edits.prepend_right(to_offset(helper_root.span.lo), HELPERS_ACCESSOR);
        true
    }

    /// Runs `f` with an additional scope layer
    fn with_scope(&mut self, names: Vec<StencilAtom>, f: impl FnOnce(&mut Self)) {
        let inner = self.scope.push(names);
        let outer = std::mem::replace(&mut self.scope, inner);
        f(self);
        self.scope = outer;
    }
}

impl Visit for ScopeResolver<'_> {
    fn visit_expr(&mut self, n: &Expr) {
        match n {
            Expr::Ident(ident) => self.resolve_reference(ident),
            _ => n.visit_children_with(self),
        }
    }

    fn visit_call_expr(&mut self, n: &CallExpr) {
        let callee = match n.callee {
            Callee::Expr(ref callee) => Some(&**callee),
            _ => None,
        };

        // The callee of a helper is not visited, only the arguments are
        if self.resolve_helper_callee(callee) {
            n.args.visit_with(self);
        } else {
            n.visit_children_with(self);
        }
    }

    /// `upper?.(name)`
    fn visit_opt_call(&mut self, n: &OptCall) {
        if self.resolve_helper_callee(Some(&*n.callee)) {
            n.args.visit_with(self);
        } else {
            n.visit_children_with(self);
        }
    }

    fn visit_prop(&mut self, n: &Prop) {
        // `{ foo }` becomes `{ foo: data.foo }`
        let Prop::Shorthand(ident) = n else {
            n.visit_children_with(self);
            return;
        };

        if self.scope.contains(&ident.sym) {
            return;
        }

        let expanded = format!("{}: {}", ident.sym, DATA_ACCESSOR);
        self.edits.prepend_right(to_offset(ident.span.lo), &expanded);
    }

    fn visit_simple_assign_target(&mut self, n: &SimpleAssignTarget) {
        match n {
            SimpleAssignTarget::Ident(binding_ident) => self.resolve_reference(&binding_ident.id),
            _ => n.visit_children_with(self),
        }
    }

    fn visit_arrow_expr(&mut self, n: &ArrowExpr) {
        let mut names = Vec::new();
        for param in n.params.iter() {
            collect_pat_bindings(param, &mut names);
        }
        if let BlockStmtOrExpr::BlockStmt(ref block) = *n.body {
            collect_var_bindings(&block.stmts, &mut names);
        }

        self.with_scope(names, |resolver| {
            n.params.visit_with(resolver);
            n.body.visit_with(resolver);
        });
    }

    fn visit_fn_expr(&mut self, n: &FnExpr) {
        let mut names = Vec::new();
        if let Some(ref ident) = n.ident {
            names.push(ident.sym.to_owned());
        }

        self.with_scope(names, |resolver| n.function.visit_with(resolver));
    }

    fn visit_function(&mut self, n: &Function) {
        let mut names = Vec::new();
        for param in n.params.iter() {
            collect_pat_bindings(&param.pat, &mut names);
        }
        if let Some(ref body) = n.body {
            collect_var_bindings(&body.stmts, &mut names);
        }

        self.with_scope(names, |resolver| {
            n.params.visit_with(resolver);
            n.body.visit_with(resolver);
        });
    }

    /// `let`, `const`, `class` and functions are scoped to their block
    fn visit_block_stmt(&mut self, n: &BlockStmt) {
        let mut names = Vec::new();
        collect_lexical_bindings(&n.stmts, &mut names);

        self.with_scope(names, |resolver| n.visit_children_with(resolver));
    }

    fn visit_catch_clause(&mut self, n: &CatchClause) {
        let mut names = Vec::new();
        if let Some(ref param) = n.param {
            collect_pat_bindings(param, &mut names);
        }

        self.with_scope(names, |resolver| n.visit_children_with(resolver));
    }

    /// `for (let i = 0; ...)`
    fn visit_for_stmt(&mut self, n: &ForStmt) {
        let mut names = Vec::new();
        if let Some(VarDeclOrExpr::VarDecl(ref var_decl)) = n.init {
            collect_lexical_var_decl(var_decl, &mut names);
        }

        self.with_scope(names, |resolver| n.visit_children_with(resolver));
    }

    /// `for (const key in obj)`
    fn visit_for_in_stmt(&mut self, n: &ForInStmt) {
        let mut names = Vec::new();
        collect_for_head_bindings(&n.left, &mut names);

        self.with_scope(names, |resolver| n.visit_children_with(resolver));
    }

    /// `for (const item of list)`
    fn visit_for_of_stmt(&mut self, n: &ForOfStmt) {
        let mut names = Vec::new();
        collect_for_head_bindings(&n.left, &mut names);

        self.with_scope(names, |resolver| n.visit_children_with(resolver));
    }

    /// The cases of a `switch` share one block scope
    fn visit_switch_stmt(&mut self, n: &SwitchStmt) {
        n.discriminant.visit_with(self);

        let mut names = Vec::new();
        for case in n.cases.iter() {
            collect_lexical_bindings(&case.cons, &mut names);
        }

        self.with_scope(names, |resolver| n.cases.visit_with(resolver));
    }
}

/// The identifier at the root of a member chain, e.g. `foo` in `foo.bar.baz`
fn root_ident(expr: &Expr) -> Option<&Ident> {
    match expr {
        Expr::Ident(ident) => Some(ident),
        Expr::Member(member_expr) => root_ident(&member_expr.obj),
        _ => None,
    }
}

/// Collects the `var` names of a function body, including the ones nested into blocks.
/// Nested functions have their own scope and are not entered.
fn collect_var_bindings(stmts: &[Stmt], out: &mut Vec<StencilAtom>) {
    for stmt in stmts {
        collect_stmt_var_bindings(stmt, out);
    }
}

fn collect_stmt_var_bindings(stmt: &Stmt, out: &mut Vec<StencilAtom>) {
    match stmt {
        Stmt::Decl(Decl::Var(var_decl)) => collect_hoisted_var_decl(var_decl, out),

        Stmt::Block(block) => collect_var_bindings(&block.stmts, out),

        Stmt::If(if_stmt) => {
            collect_stmt_var_bindings(&if_stmt.cons, out);
            if let Some(ref alt) = if_stmt.alt {
                collect_stmt_var_bindings(alt, out);
            }
        }

        Stmt::For(for_stmt) => {
            if let Some(VarDeclOrExpr::VarDecl(ref var_decl)) = for_stmt.init {
                collect_hoisted_var_decl(var_decl, out);
            }
            collect_stmt_var_bindings(&for_stmt.body, out);
        }

        Stmt::ForIn(for_in) => {
            if let ForHead::VarDecl(ref var_decl) = for_in.left {
                collect_hoisted_var_decl(var_decl, out);
            }
            collect_stmt_var_bindings(&for_in.body, out);
        }

        Stmt::ForOf(for_of) => {
            if let ForHead::VarDecl(ref var_decl) = for_of.left {
                collect_hoisted_var_decl(var_decl, out);
            }
            collect_stmt_var_bindings(&for_of.body, out);
        }

        Stmt::While(while_stmt) => collect_stmt_var_bindings(&while_stmt.body, out),
        Stmt::DoWhile(do_while) => collect_stmt_var_bindings(&do_while.body, out),
        Stmt::Labeled(labeled) => collect_stmt_var_bindings(&labeled.body, out),
        Stmt::With(with_stmt) => collect_stmt_var_bindings(&with_stmt.body, out),

        Stmt::Try(try_stmt) => {
            collect_var_bindings(&try_stmt.block.stmts, out);
            if let Some(ref handler) = try_stmt.handler {
                collect_var_bindings(&handler.body.stmts, out);
            }
            if let Some(ref finalizer) = try_stmt.finalizer {
                collect_var_bindings(&finalizer.stmts, out);
            }
        }

        Stmt::Switch(switch_stmt) => {
            for case in switch_stmt.cases.iter() {
                collect_var_bindings(&case.cons, out);
            }
        }

        _ => {}
    }
}

#[inline]
fn collect_hoisted_var_decl(var_decl: &VarDecl, out: &mut Vec<StencilAtom>) {
    if var_decl.kind == VarDeclKind::Var {
        for declarator in var_decl.decls.iter() {
            collect_pat_bindings(&declarator.name, out);
        }
    }
}

#[inline]
fn collect_lexical_var_decl(var_decl: &VarDecl, out: &mut Vec<StencilAtom>) {
    if var_decl.kind != VarDeclKind::Var {
        for declarator in var_decl.decls.iter() {
            collect_pat_bindings(&declarator.name, out);
        }
    }
}

fn collect_for_head_bindings(for_head: &ForHead, out: &mut Vec<StencilAtom>) {
    if let ForHead::VarDecl(ref var_decl) = for_head {
        collect_lexical_var_decl(var_decl, out);
    }
}

/// Collects the names declared directly in a block with `let`, `const`, `class` or `function`
fn collect_lexical_bindings(stmts: &[Stmt], out: &mut Vec<StencilAtom>) {
    for stmt in stmts {
        match stmt {
            Stmt::Decl(Decl::Var(var_decl)) => collect_lexical_var_decl(var_decl, out),
            Stmt::Decl(decl @ (Decl::Fn(_) | Decl::Class(_))) => collect_decl_bindings(decl, out),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{expr_at, helpers};
    use pretty_assertions::assert_eq;

    fn resolve(source: &str, scope: &ScopeStack, helper_names: &[&str]) -> String {
        let expr = expr_at(source);
        let helpers = helpers(helper_names);
        let mut edits = EditBuffer::new(source);

        let Fragment::SourceSlice { start, end } = resolve_expr(&expr, scope, &helpers, &mut edits)
        else {
            panic!("Expected a source slice");
        };

        edits.slice(start, end)
    }

    macro_rules! test {
        ($input: expr, $expected: expr) => {
            test!($input, $expected, &ScopeStack::new(), &[])
        };
        ($input: expr, $expected: expr, $scope: expr) => {
            test!($input, $expected, $scope, &[])
        };
        ($input: expr, $expected: expr, $scope: expr, $helpers: expr) => {
            assert_eq!(resolve($input, $scope, $helpers), $expected)
        };
    }

    fn scope_of(names: &[&str]) -> ScopeStack {
        ScopeStack::new().push(names.iter().map(|it| StencilAtom::from(*it)))
    }

    #[test]
    fn it_prefixes_free_identifiers() {
        test!("name", "data.name");
        test!("a + b * c", "data.a + data.b * data.c");
        test!("!visible", "!data.visible");
        test!("cond ? yes : no", "data.cond ? data.yes : data.no");
        test!("`${greeting}, world`", "`${data.greeting}, world`");
        test!("'literal' + 42", "'literal' + 42");
    }

    #[test]
    fn it_scopes_member_chains_by_root() {
        test!("a.b.c", "data.a.b.c");
        test!("a[b].c", "data.a[data.b].c");
        test!("item.name", "item.name", &scope_of(&["item"]));
        test!("items[i].name", "data.items[i].name", &scope_of(&["i"]));
    }

    #[test]
    fn it_skips_bound_names() {
        test!("item + index", "item + index", &scope_of(&["item", "index"]));
        test!("item + other", "item + data.other", &scope_of(&["item"]));
    }

    #[test]
    fn it_resolves_object_literals() {
        test!("{ a: b }", "{ a: data.b }");
        test!("{ [key]: value }", "{ [data.key]: data.value }");
        test!("{ a }", "{ a: data.a }");
        test!("{ item }", "{ item }", &scope_of(&["item"]));
    }

    #[test]
    fn it_prefixes_helpers() {
        let root = ScopeStack::new();
        test!("upper(name)", "template.helpers.upper(data.name)", &root, &["upper"]);
        test!("fmt.date(d)", "template.helpers.fmt.date(data.d)", &root, &["fmt"]);
        test!("upper?.(name)", "template.helpers.upper?.(data.name)", &root, &["upper"]);
        test!("other?.(x)", "data.other?.(data.x)", &root, &["upper"]);

        // Not in call position, a helper is just data
        test!("upper", "data.upper", &root, &["upper"]);
        test!("other(x)", "data.other(data.x)", &root, &["upper"]);
    }

    #[test]
    fn it_prefers_helpers_over_block_bindings() {
        test!(
            "upper(upper)",
            "template.helpers.upper(upper)",
            &scope_of(&["upper"]),
            &["upper"]
        );
    }

    #[test]
    fn it_binds_function_params() {
        test!("items.map(x => x * k)", "data.items.map(x => x * data.k)");
        test!("list.filter(({ id }) => id > min)", "data.list.filter(({ id }) => id > data.min)");
        test!(
            "list.map(function (el, i) { var doubled = el * 2; return doubled + i + offset; })",
            "data.list.map(function (el, i) { var doubled = el * 2; return doubled + i + data.offset; })"
        );
    }

    #[test]
    fn it_binds_hoisted_vars() {
        test!(
            "items.map(function (n) { for (var j = 0, s = 0; j < n; j++) { s += j; } return s; })",
            "data.items.map(function (n) { for (var j = 0, s = 0; j < n; j++) { s += j; } return s; })"
        );
        test!(
            "items.map(x => { if (x) { var y = x; } else { try { var z = 1; } finally {} } return y + z; })",
            "data.items.map(x => { if (x) { var y = x; } else { try { var z = 1; } finally {} } return y + z; })"
        );
        // A nested function has its own `var`s
        test!(
            "items.map(x => { (function () { var inner = 1; })(); return inner; })",
            "data.items.map(x => { (function () { var inner = 1; })(); return data.inner; })"
        );
    }

    #[test]
    fn it_binds_block_declarations() {
        test!(
            "list.map(x => { if (x) { const y = x * 2; return y + k; } return y; })",
            "data.list.map(x => { if (x) { const y = x * 2; return y + data.k; } return data.y; })"
        );
        test!(
            "list.map(x => { { let a = x; class B {} return [a, B]; } })",
            "data.list.map(x => { { let a = x; class B {} return [a, B]; } })"
        );
        test!(
            "list.map(x => { switch (x) { case 1: let c = x; return c; } return mode; })",
            "data.list.map(x => { switch (x) { case 1: let c = x; return c; } return data.mode; })"
        );
    }

    #[test]
    fn it_binds_catch_params() {
        test!(
            "items.map(function (s) { try { return JSON.parse(s); } catch (e) { return e.message; } })",
            "data.items.map(function (s) { try { return data.JSON.parse(s); } catch (e) { return e.message; } })"
        );
    }

    #[test]
    fn it_binds_for_heads() {
        test!(
            "rows.map(row => { let total = 0; for (const cell of row) total += cell; return total; })",
            "data.rows.map(row => { let total = 0; for (const cell of row) total += cell; return total; })"
        );
        test!(
            "rows.map(row => { for (let i = 0; i < n; i++) row[i] = i; for (const k in row) use(k); })",
            "data.rows.map(row => { for (let i = 0; i < data.n; i++) row[i] = i; for (const k in row) data.use(k); })"
        );
    }

    #[test]
    fn it_resolves_assignment_targets() {
        test!("count = count + 1", "data.count = data.count + 1");
        test!("count++", "data.count++");
        test!("item = 1", "item = 1", &scope_of(&["item"]));
    }
}
