use fxhash::FxHashMap;
use smallvec::SmallVec;
use swc_core::ecma::ast::Expr;

use crate::StencilAtom;

/// Name → expression map for `helpers` and `components` of the default export
pub type ConfigMap = FxHashMap<StencilAtom, Box<Expr>>;

/// Configuration extracted from the default export of the template's `<script>`.
///
/// ```js
/// export default {
///   data() { return { count: 0 } },
///   helpers: { upper(s) { return s.toUpperCase() } },
///   components: { Widget }
/// }
/// ```
#[derive(Debug, Default)]
pub struct TemplateConfig {
    /// The `data` initializer
    pub data: Option<Box<Expr>>,
    pub helpers: ConfigMap,
    pub components: ConfigMap,
}

impl TemplateConfig {
    /// Whether `render` should seed its working object from `template.data()`
    #[inline]
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    #[inline]
    pub fn is_helper(&self, name: &StencilAtom) -> bool {
        self.helpers.contains_key(name)
    }

    #[inline]
    pub fn is_component(&self, name: &StencilAtom) -> bool {
        self.components.contains_key(name)
    }
}

/// One `import` declaration of the script, as it is re-expressed with `require`.
///
/// `import Foo, { bar as baz } from './foo'` is recorded as
/// `module_binding = "__import0"`, `default_local = Some("Foo")`,
/// `named = [("baz", "bar")]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRecord {
    /// Local variable holding the loaded module
    pub module_binding: StencilAtom,
    /// Module specifier, e.g. `./foo`
    pub source: StencilAtom,
    pub default_local: Option<StencilAtom>,
    pub namespace_local: Option<StencilAtom>,
    /// `(local, imported)` pairs
    pub named: SmallVec<[(StencilAtom, StencilAtom); 2]>,
}

impl ImportRecord {
    /// `import './polyfill'`
    #[inline]
    pub fn is_side_effect_only(&self) -> bool {
        self.default_local.is_none() && self.namespace_local.is_none() && self.named.is_empty()
    }
}
