use stencil_core::{EditBuffer, Fragment, TemplateConfig};
use stencil_parser::{parse, ParseOptions};
use stencil_transform::transform_script;

use crate::context::CodegenContext;

/// Generates the render blocks of a template without a script
pub fn render_blocks(source: &str) -> Vec<String> {
    generate(source)
}

/// Generates the render blocks of `html` followed by `<script>{script}</script>`
pub fn render_blocks_with_config(html: &str, script: &str) -> Vec<String> {
    generate(&format!("{html}<script>{script}</script>"))
}

fn generate(source: &str) -> Vec<String> {
    let template = parse(source, &ParseOptions::default()).expect("template should be parseable");
    let mut edits = EditBuffer::new(source);

    let config = match template.script {
        Some(ref script) => {
            transform_script(script, &mut edits)
                .expect("script should be transformed")
                .config
        }
        None => TemplateConfig::default(),
    };

    let mut ctx = CodegenContext::new(&config, &mut edits);
    let blocks = ctx
        .generate_render_blocks(&template.html)
        .expect("template should be generated");

    blocks
        .iter()
        .map(|block| fragments_to_string(block, &edits))
        .collect()
}

pub fn fragments_to_string(fragments: &[Fragment], edits: &EditBuffer) -> String {
    fragments
        .iter()
        .map(|fragment| match fragment {
            Fragment::Synthesized(text) => text.to_string(),
            Fragment::SourceSlice { start, end } => edits.slice(*start, *end),
        })
        .collect()
}
