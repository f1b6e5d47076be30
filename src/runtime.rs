// ABOUTME: Process-wide interpreter state — the symbol interner, the global
// ABOUTME: environment, and the handful of symbols the reader/evaluator need by identity

use crate::builtins;
use crate::env::Environment;
use crate::interner::Interner;
use crate::value::Symbol;
use std::cell::RefCell;
use std::rc::Rc;

/// Symbols the reader and evaluator compare against by identity rather than
/// looking up a string each time. Everything else — special form names,
/// primitive names — is just a binding in the global environment and needs
/// no special-cased symbol.
pub struct WellKnownSymbols {
    /// Wraps the next datum after a `'` shorthand in `(quote ...)`.
    pub quote: Symbol,
    /// The `.` marker separating fixed parameters from a rest parameter.
    pub dot: Symbol,
    /// `else` is seeded as an alias for `#t` so `(cond (else ...))` reads as
    /// a catch-all clause; `cond`'s dispatch checks for it by identity.
    pub else_: Symbol,
}

/// Bundles the interner (behind a `RefCell` so the reader can intern new
/// symbols through a shared reference) with the global environment and the
/// well-known symbol cache. One `Runtime` lives for the whole process.
pub struct Runtime {
    pub interner: RefCell<Interner>,
    pub global: Rc<Environment>,
    pub syms: WellKnownSymbols,
}

impl Runtime {
    pub fn new() -> Self {
        let mut interner = Interner::new();
        let syms = WellKnownSymbols {
            quote: interner.intern("quote"),
            dot: interner.intern("."),
            else_: interner.intern("else"),
        };
        let global = Environment::new();
        let runtime = Runtime {
            interner: RefCell::new(interner),
            global,
            syms,
        };
        builtins::register_all(&runtime);
        runtime
    }

    pub fn intern(&self, text: &str) -> Symbol {
        self.interner.borrow_mut().intern(text)
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
