use stencil_core::{is_void_element, ElementNode, Fragment, ScopeStack};

use crate::{
    context::{CodeFragment, CodegenContext},
    error::CodegenError,
};

impl CodegenContext<'_> {
    /// Generates `<name attrs>children</name>`.
    /// Void elements never have a closing tag and elements without children are self-closing.
    pub fn generate_element(
        &mut self,
        element_node: &ElementNode,
        scope: &ScopeStack,
    ) -> Result<CodeFragment, CodegenError> {
        if self.config.is_component(&element_node.name) {
            return self.generate_component(element_node, scope);
        }

        let mut out = Vec::with_capacity(3 + element_node.children.len());
        out.push(Fragment::text(format!("<{}", element_node.name)));

        for attribute in element_node.attributes.iter() {
            self.generate_attribute(attribute, scope, &mut out);
        }

        if is_void_element(&element_node.name) {
            out.push(Fragment::text(">"));
        } else if element_node.children.is_empty() {
            out.push(Fragment::text("/>"));
        } else {
            out.push(Fragment::text(">"));
            out.extend(self.generate_children(&element_node.children, scope)?);
            out.push(Fragment::text(format!("</{}>", element_node.name)));
        }

        Ok(CodeFragment::Literal(out))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{render_blocks, render_blocks_with_config};
    use pretty_assertions::assert_eq;

    #[test]
    fn it_generates_elements() {
        assert_eq!(render_blocks("<p>{{name}}</p>"), vec!["rendered += `<p>${data.name}</p>`;"]);
        assert_eq!(
            render_blocks("<div><span>a</span><b>{{x}}</b></div>"),
            vec!["rendered += `<div><span>a</span><b>${data.x}</b></div>`;"]
        );
    }

    #[test]
    fn it_closes_void_and_empty_elements() {
        assert_eq!(render_blocks("<br>"), vec!["rendered += `<br>`;"]);
        assert_eq!(
            render_blocks("<IMG src=\"a.png\">"),
            vec!["rendered += `<IMG src=\"a.png\">`;"]
        );
        assert_eq!(render_blocks("<div></div>"), vec!["rendered += `<div/>`;"]);
        assert_eq!(render_blocks("<input/>"), vec!["rendered += `<input>`;"]);
    }

    #[test]
    fn it_generates_components() {
        let script = "export default { components: { Widget } };";

        assert_eq!(
            render_blocks_with_config("<Widget title=\"{{t}}\" open label=\"a {{b}}\"/>", script),
            vec!["rendered += template.components.Widget.render( { title: data.t, open: true, label: `a ${data.b}` } );"]
        );
        assert_eq!(
            render_blocks_with_config("<p><Widget/></p>", script),
            vec!["rendered += `<p>${template.components.Widget.render( {} )}</p>`;"]
        );
    }
}
