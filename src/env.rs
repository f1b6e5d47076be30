// ABOUTME: Environment module for managing variable bindings and scopes

use crate::error::EvalError;
use crate::value::{Symbol, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// One lexical frame: a pair of parallel lists — bound names and their
/// values — plus a link to the enclosing frame. `Lookup` and `Set` walk
/// outward frame by frame, comparing names by interned-symbol identity
/// (`Rc::ptr_eq`) rather than string content, since every occurrence of a
/// given spelling is guaranteed to be the same `Rc<str>`.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<Vec<(Symbol, Value)>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new global environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(Vec::new()),
            parent: None,
        })
    }

    /// Creates a new child environment with a parent.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(Vec::new()),
            parent: Some(parent),
        })
    }

    /// `Extend`: builds a new frame binding `names` to `values` pairwise,
    /// rooted at `parent`. Used for procedure application.
    pub fn extend(parent: Rc<Environment>, names: &[Symbol], values: &[Value]) -> Rc<Self> {
        let bindings = names
            .iter()
            .cloned()
            .zip(values.iter().cloned())
            .collect();
        Rc::new(Environment {
            bindings: RefCell::new(bindings),
            parent: Some(parent),
        })
    }

    /// `DefineInFrame`: binds `name` in this frame, overwriting any existing
    /// binding for the same symbol in this frame only. Never touches the
    /// parent chain — this is how `define` always affects the innermost
    /// scope even when the name shadows an outer binding.
    pub fn define(&self, name: Symbol, value: Value) {
        let mut bindings = self.bindings.borrow_mut();
        if let Some(slot) = bindings.iter_mut().find(|(n, _)| Rc::ptr_eq(n, &name)) {
            slot.1 = value;
        } else {
            bindings.push((name, value));
        }
    }

    /// `Lookup`: searches this frame, then each enclosing frame in turn,
    /// innermost first.
    pub fn get(&self, name: &Symbol) -> Option<Value> {
        if let Some((_, value)) = self
            .bindings
            .borrow()
            .iter()
            .find(|(n, _)| Rc::ptr_eq(n, name))
        {
            return Some(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.get(name),
            None => None,
        }
    }

    /// `Set`: rebinds an existing variable in whichever frame it was found,
    /// walking outward. Never introduces a new binding — unlike `define`,
    /// `set!` on an unbound name is an error.
    pub fn set(&self, name: &Symbol, value: Value) -> Result<(), EvalError> {
        let mut bindings = self.bindings.borrow_mut();
        if let Some(slot) = bindings.iter_mut().find(|(n, _)| Rc::ptr_eq(n, name)) {
            slot.1 = value;
            return Ok(());
        }
        drop(bindings);
        match &self.parent {
            Some(parent) => parent.set(name, value),
            None => Err(EvalError::UnboundVariable(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interner::Interner;

    fn sym(interner: &mut Interner, text: &str) -> Symbol {
        interner.intern(text)
    }

    #[test]
    fn define_and_get() {
        let mut interner = Interner::new();
        let env = Environment::new();
        let x = sym(&mut interner, "x");
        env.define(x.clone(), Value::Int(42));
        assert_eq!(env.get(&x).unwrap().as_int(), Some(42));
    }

    #[test]
    fn undefined_symbol() {
        let mut interner = Interner::new();
        let env = Environment::new();
        let missing = sym(&mut interner, "missing");
        assert!(env.get(&missing).is_none());
    }

    #[test]
    fn define_shadows_in_child_frame_only() {
        let mut interner = Interner::new();
        let parent = Environment::new();
        let x = sym(&mut interner, "x");
        parent.define(x.clone(), Value::Int(42));

        let child = Environment::with_parent(parent.clone());
        child.define(x.clone(), Value::Int(100));

        assert_eq!(child.get(&x).unwrap().as_int(), Some(100));
        assert_eq!(parent.get(&x).unwrap().as_int(), Some(42));
    }

    #[test]
    fn lookup_walks_parent_chain() {
        let mut interner = Interner::new();
        let grandparent = Environment::new();
        let a = sym(&mut interner, "a");
        grandparent.define(a.clone(), Value::Int(1));

        let parent = Environment::with_parent(grandparent);
        let b = sym(&mut interner, "b");
        parent.define(b.clone(), Value::Int(2));

        let child = Environment::with_parent(parent);
        let c = sym(&mut interner, "c");
        child.define(c.clone(), Value::Int(3));

        assert_eq!(child.get(&a).unwrap().as_int(), Some(1));
        assert_eq!(child.get(&b).unwrap().as_int(), Some(2));
        assert_eq!(child.get(&c).unwrap().as_int(), Some(3));
    }

    #[test]
    fn set_rebinds_in_defining_frame() {
        let mut interner = Interner::new();
        let parent = Environment::new();
        let x = sym(&mut interner, "x");
        parent.define(x.clone(), Value::Int(1));

        let child = Environment::with_parent(parent.clone());
        child.set(&x, Value::Int(99)).unwrap();

        assert_eq!(parent.get(&x).unwrap().as_int(), Some(99));
    }

    #[test]
    fn set_on_unbound_name_errors() {
        let mut interner = Interner::new();
        let env = Environment::new();
        let x = sym(&mut interner, "x");
        assert!(env.set(&x, Value::Int(1)).is_err());
    }

    #[test]
    fn extend_builds_parallel_bindings() {
        let mut interner = Interner::new();
        let global = Environment::new();
        let names = [sym(&mut interner, "a"), sym(&mut interner, "b")];
        let values = [Value::Int(1), Value::Int(2)];
        let frame = Environment::extend(global, &names, &values);
        assert_eq!(frame.get(&names[0]).unwrap().as_int(), Some(1));
        assert_eq!(frame.get(&names[1]).unwrap().as_int(), Some(2));
    }
}
