use stencil_core::{ConfigMap, StencilAtom, TemplateConfig};
use swc_core::{
    common::{Span, Spanned},
    ecma::ast::{Expr, FnExpr, ObjectLit, Prop, PropName, PropOrSpread},
};

use crate::{
    atoms::{COMPONENTS, DATA, HELPERS},
    error::{ScriptError, ScriptErrorKind},
};

use super::utils::unroll_paren;

/// Extracts `data`, `helpers` and `components` from the default export.
/// The other properties are kept in the script but are of no interest for the render function.
pub fn extract_config(default_export: &Expr) -> Result<TemplateConfig, ScriptError> {
    let Expr::Object(obj_lit) = unroll_paren(default_export) else {
        return Err(ScriptError {
            span: default_export.span(),
            kind: ScriptErrorKind::InvalidDefaultExport,
        });
    };

    let mut config = TemplateConfig::default();

    for (key, value, span) in object_entries(obj_lit)? {
        if key == *DATA {
            if !matches!(unroll_paren(&value), Expr::Fn(_) | Expr::Arrow(_)) {
                return Err(invalid_property(key, span));
            }
            config.data = Some(value);
        } else if key == *HELPERS {
            config.helpers = object_map(&value, key, span)?;
        } else if key == *COMPONENTS {
            config.components = object_map(&value, key, span)?;
        }
    }

    Ok(config)
}

/// Collects `{ foo, bar: baz, qux() {} }` into a name → expression map
fn object_map(value: &Expr, key: StencilAtom, span: Span) -> Result<ConfigMap, ScriptError> {
    let Expr::Object(obj_lit) = unroll_paren(value) else {
        return Err(invalid_property(key, span));
    };

    Ok(object_entries(obj_lit)?
        .into_iter()
        .map(|(name, value, _)| (name, value))
        .collect())
}

/// Key, value and property span of every property with a value.
/// Getters and setters have no value and are skipped.
fn object_entries(obj_lit: &ObjectLit) -> Result<Vec<(StencilAtom, Box<Expr>, Span)>, ScriptError> {
    let mut out = Vec::with_capacity(obj_lit.props.len());

    for prop in obj_lit.props.iter() {
        let prop = match prop {
            PropOrSpread::Prop(prop) => prop,
            PropOrSpread::Spread(spread) => {
                return Err(ScriptError {
                    span: spread.expr.span(),
                    kind: ScriptErrorKind::InvalidDefaultExport,
                })
            }
        };

        match **prop {
            // `foo`
            Prop::Shorthand(ref ident) => out.push((
                ident.sym.to_owned(),
                Box::new(Expr::Ident(ident.to_owned())),
                ident.span,
            )),

            // `foo: bar`
            Prop::KeyValue(ref key_value) => out.push((
                prop_name(&key_value.key)?,
                key_value.value.to_owned(),
                prop.span(),
            )),

            // `foo() {}`
            Prop::Method(ref method) => out.push((
                prop_name(&method.key)?,
                Box::new(Expr::Fn(FnExpr {
                    ident: None,
                    function: method.function.to_owned(),
                })),
                prop.span(),
            )),

            Prop::Getter(ref getter) => {
                prop_name(&getter.key)?;
            }
            Prop::Setter(ref setter) => {
                prop_name(&setter.key)?;
            }

            // Only valid in patterns
            Prop::Assign(_) => {}
        }
    }

    Ok(out)
}

fn prop_name(key: &PropName) -> Result<StencilAtom, ScriptError> {
    match key {
        PropName::Ident(ident) => Ok(ident.sym.to_owned()),
        PropName::Str(s) => Ok(s.value.to_owned()),
        PropName::Num(n) => Ok(StencilAtom::from(n.value.to_string())),
        PropName::BigInt(b) => Ok(StencilAtom::from(b.value.to_string())),
        PropName::Computed(computed) => Err(ScriptError {
            span: computed.span,
            kind: ScriptErrorKind::InvalidDefaultExport,
        }),
    }
}

#[inline]
fn invalid_property(key: StencilAtom, span: Span) -> ScriptError {
    ScriptError {
        span,
        kind: ScriptErrorKind::InvalidConfigProperty(key),
    }
}
