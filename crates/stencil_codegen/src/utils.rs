use swc_core::ecma::ast::Expr;

/// Whether the expression binds looser than the code it is embedded into,
/// e.g. `a, b` in `rendered += a, b;`
#[inline]
pub fn needs_parens(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Seq(_) | Expr::Assign(_) | Expr::Arrow(_) | Expr::Cond(_) | Expr::Yield(_)
    )
}

/// Whether `.map(...)` can be applied to the expression without parentheses
#[inline]
pub fn is_member_safe(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Ident(_) | Expr::Member(_) | Expr::Call(_) | Expr::Paren(_) | Expr::Array(_)
    )
}

/// Escapes the text for the body of a template literal
pub fn escape_literal(text: &str, out: &mut String) {
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
}

/// Escapes the text for the body of a template literal inside a double-quoted attribute value
pub fn escape_attribute(text: &str, out: &mut String) {
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(text: &str) -> String {
        let mut out = String::new();
        escape_literal(text, &mut out);
        out
    }

    fn attribute(text: &str) -> String {
        let mut out = String::new();
        escape_attribute(text, &mut out);
        out
    }

    #[test]
    fn it_escapes_literals() {
        assert_eq!(literal("plain text"), "plain text");
        assert_eq!(literal("${not.interpolated}"), "\\${not.interpolated}");
        assert_eq!(literal("cost: $5"), "cost: $5");
        assert_eq!(literal("a `b` \\c"), "a \\`b\\` \\\\c");
    }

    #[test]
    fn it_escapes_attributes() {
        assert_eq!(attribute("say \"hi\""), "say &quot;hi&quot;");
        assert_eq!(attribute("${x}"), "\\${x}");
    }
}
