//! Names which the generated module relies on, as static symbols (`StencilAtom`)

use stencil_core::StencilAtom;

lazy_static! {
    // Reserved keys of the default export
    pub static ref DATA: StencilAtom = StencilAtom::from("data");
    pub static ref HELPERS: StencilAtom = StencilAtom::from("helpers");
    pub static ref COMPONENTS: StencilAtom = StencilAtom::from("components");

    // Bindings of the generated module
    pub static ref TEMPLATE: StencilAtom = StencilAtom::from("template");
    pub static ref RENDERED: StencilAtom = StencilAtom::from("rendered");
}

/// Prefix of a free identifier, e.g. `name` becomes `data.name`
pub const DATA_ACCESSOR: &str = "data.";

/// Prefix of a helper call, e.g. `upper(x)` becomes `template.helpers.upper(x)`
pub const HELPERS_ACCESSOR: &str = "template.helpers.";

/// Prefix of the hoisted module bindings, e.g. `__import0`
pub const IMPORT_BINDING_PREFIX: &str = "__import";
