use stencil_core::{Attribute, AttributeValue, AttributeValuePart, Fragment, ScopeStack};

use crate::{context::CodegenContext, utils::escape_attribute};

impl CodegenContext<'_> {
    /// Generates ` name` for a boolean attribute and ` name="..."` otherwise.
    /// Text and interpolations of the value are concatenated in source order.
    pub fn generate_attribute(
        &mut self,
        attribute: &Attribute,
        scope: &ScopeStack,
        out: &mut Vec<Fragment>,
    ) {
        let parts = match attribute.value {
            AttributeValue::Boolean => {
                out.push(Fragment::text(format!(" {}", attribute.name)));
                return;
            }
            AttributeValue::Parts(ref parts) => parts,
        };

        out.push(Fragment::text(format!(" {}=\"", attribute.name)));

        for part in parts.iter() {
            match part {
                AttributeValuePart::Text(text) => {
                    let mut escaped = String::with_capacity(text.len());
                    escape_attribute(text, &mut escaped);
                    out.push(Fragment::text(escaped));
                }

                AttributeValuePart::Expression(expr) => {
                    out.push(Fragment::text("${"));
                    out.extend(self.generate_expr(expr, scope));
                    out.push(Fragment::text("}"));
                }
            }
        }

        out.push(Fragment::text("\""));
    }
}
