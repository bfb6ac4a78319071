use stencil_core::{
    Attribute, AttributeValue, AttributeValuePart, ElementNode, Fragment, ScopeStack,
};
use stencil_transform::{
    atoms::{COMPONENTS, TEMPLATE},
    script::utils::{js_property_access, js_string},
};

use crate::{
    context::{CodeFragment, CodegenContext},
    error::CodegenError,
    utils::escape_literal,
};

impl CodegenContext<'_> {
    /// Generates `template.components.Name.render( { attr: value } )`.
    ///
    /// Attribute values become:
    /// - `true` for boolean attributes;
    /// - the expression itself for `attr="{{expr}}"`;
    /// - a template literal for everything else.
    pub fn generate_component(
        &mut self,
        element_node: &ElementNode,
        scope: &ScopeStack,
    ) -> Result<CodeFragment, CodegenError> {
        if !element_node.children.is_empty() {
            return Err(CodegenError::NotImplemented {
                what: "component children",
                span: element_node.span,
            });
        }

        let mut out = Vec::with_capacity(2 + 3 * element_node.attributes.len());
        out.push(Fragment::text(format!(
            "{}.{}{}.render( ",
            *TEMPLATE,
            *COMPONENTS,
            js_property_access(&element_node.name)
        )));

        if element_node.attributes.is_empty() {
            out.push(Fragment::text("{}"));
        } else {
            out.push(Fragment::text("{"));
            for (idx, attribute) in element_node.attributes.iter().enumerate() {
                let separator = if idx == 0 { " " } else { ", " };
                out.push(Fragment::text(format!(
                    "{separator}{}: ",
                    component_prop_key(attribute)
                )));
                self.generate_component_prop_value(attribute, scope, &mut out);
            }
            out.push(Fragment::text(" }"));
        }

        out.push(Fragment::text(" )"));

        Ok(CodeFragment::Interpolation(out))
    }

    fn generate_component_prop_value(
        &mut self,
        attribute: &Attribute,
        scope: &ScopeStack,
        out: &mut Vec<Fragment>,
    ) {
        let parts = match attribute.value {
            AttributeValue::Boolean => {
                out.push(Fragment::text("true"));
                return;
            }
            AttributeValue::Parts(ref parts) => parts,
        };

        if let Some(expr) = attribute.value.as_single_expression() {
            out.extend(self.generate_expr(expr, scope));
            return;
        }

        out.push(Fragment::text("`"));
        for part in parts.iter() {
            match part {
                AttributeValuePart::Text(text) => {
                    let mut escaped = String::with_capacity(text.len());
                    escape_literal(text, &mut escaped);
                    out.push(Fragment::text(escaped));
                }
                AttributeValuePart::Expression(expr) => {
                    out.push(Fragment::text("${"));
                    out.extend(self.generate_expr(expr, scope));
                    out.push(Fragment::text("}"));
                }
            }
        }
        out.push(Fragment::text("`"));
    }
}

/// `title` stays as is, `aria-label` is quoted
fn component_prop_key(attribute: &Attribute) -> String {
    let access = js_property_access(&attribute.name);
    match access.strip_prefix('.') {
        Some(ident) => ident.to_owned(),
        None => js_string(&attribute.name),
    }
}
