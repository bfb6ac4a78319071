use stencil_core::{to_byte_pos, ConfigMap, StencilAtom};
use stencil_parser::script::{parse_expr, parse_module};
use swc_core::ecma::ast::{EsVersion, Expr, Module};

/// Parses the whole `source` as an expression, positions match the offsets in `source`
pub fn expr_at(source: &str) -> Box<Expr> {
    parse_expr(source, EsVersion::EsNext, to_byte_pos(0), to_byte_pos(source.len()))
        .expect("expression should be parseable")
}

/// Parses the whole `source` as a module, positions match the offsets in `source`
pub fn module_at(source: &str) -> Module {
    parse_module(source, EsVersion::EsNext, to_byte_pos(0), to_byte_pos(source.len()))
        .expect("module should be parseable")
}

/// Helpers with the given names, all of them `() => {}`
pub fn helpers(names: &[&str]) -> ConfigMap {
    names
        .iter()
        .map(|name| (StencilAtom::from(*name), expr_at("() => {}")))
        .collect()
}
