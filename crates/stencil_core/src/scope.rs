use std::rc::Rc;

use smallvec::SmallVec;

use crate::StencilAtom;

/// Names bound by enclosing blocks, innermost layer first.
///
/// The stack is persistent: [`ScopeStack::push`] returns a new stack sharing
/// the enclosing layers, and the enclosing stack itself is never modified.
/// Leaving a block is simply dropping the pushed stack.
#[derive(Debug, Clone)]
pub struct ScopeStack {
    head: Rc<ScopeLayer>,
}

#[derive(Debug)]
struct ScopeLayer {
    names: SmallVec<[StencilAtom; 2]>,
    parent: Option<Rc<ScopeLayer>>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        ScopeStack::new()
    }
}

impl ScopeStack {
    /// A stack of one empty layer: every name is unbound
    pub fn new() -> ScopeStack {
        ScopeStack {
            head: Rc::new(ScopeLayer {
                names: SmallVec::new(),
                parent: None,
            }),
        }
    }

    /// Returns a stack with an additional innermost layer
    #[must_use]
    pub fn push<I>(&self, names: I) -> ScopeStack
    where
        I: IntoIterator<Item = StencilAtom>,
    {
        ScopeStack {
            head: Rc::new(ScopeLayer {
                names: names.into_iter().collect(),
                parent: Some(Rc::clone(&self.head)),
            }),
        }
    }

    /// Whether any layer binds `name`
    pub fn contains(&self, name: &StencilAtom) -> bool {
        let mut layer = Some(&self.head);
        while let Some(current) = layer {
            if current.names.iter().any(|it| it == name) {
                return true;
            }
            layer = current.parent.as_ref();
        }
        false
    }

    /// Number of layers, including the root one
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut layer = Some(&self.head);
        while let Some(current) = layer {
            depth += 1;
            layer = current.parent.as_ref();
        }
        depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atoms(names: &[&str]) -> Vec<StencilAtom> {
        names.iter().map(|it| StencilAtom::from(*it)).collect()
    }

    #[test]
    fn it_starts_empty() {
        let scope = ScopeStack::new();
        assert_eq!(scope.depth(), 1);
        assert!(!scope.contains(&StencilAtom::from("item")));
    }

    #[test]
    fn it_shadows_and_restores() {
        let root = ScopeStack::new();
        let outer = root.push(atoms(&["item", "i"]));
        let inner = outer.push(atoms(&["item"]));

        assert!(inner.contains(&StencilAtom::from("item")));
        assert!(inner.contains(&StencilAtom::from("i")));
        assert_eq!(inner.depth(), 3);

        drop(inner);
        assert!(outer.contains(&StencilAtom::from("i")));
        assert_eq!(outer.depth(), 2);

        // Pushing never affects the enclosing stack
        assert!(!root.contains(&StencilAtom::from("item")));
        assert_eq!(root.depth(), 1);
    }
}
