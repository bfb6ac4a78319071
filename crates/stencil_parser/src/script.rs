use swc_core::{
    common::{comments::SingleThreadedComments, BytePos},
    ecma::ast::{EsVersion, Expr, Module},
};
use swc_ecma_parser::{lexer::Lexer, PResult, Parser, StringInput, Syntax};

/// Parses an expression located at `lo..hi` of the template source
pub fn parse_expr(
    raw: &str,
    es_version: EsVersion,
    lo: BytePos,
    hi: BytePos,
) -> PResult<Box<Expr>> {
    let comments = SingleThreadedComments::default();

    let lexer = Lexer::new(
        Syntax::Es(Default::default()),
        es_version,
        StringInput::new(raw, lo, hi),
        Some(&comments),
    );

    let mut parser = Parser::new_from(lexer);
    let expr = parser.parse_expr()?;

    // Recoverable errors are still errors for a template
    match parser.take_errors().into_iter().next() {
        Some(error) => Err(error),
        None => Ok(expr),
    }
}

/// Parses the contents of `<script>` located at `lo..hi` of the template source
pub fn parse_module(raw: &str, es_version: EsVersion, lo: BytePos, hi: BytePos) -> PResult<Module> {
    let lexer = Lexer::new(
        Syntax::Es(Default::default()),
        es_version,
        StringInput::new(raw, lo, hi),
        None,
    );

    let mut parser = Parser::new_from(lexer);
    let module = parser.parse_module()?;

    match parser.take_errors().into_iter().next() {
        Some(error) => Err(error),
        None => Ok(module),
    }
}
