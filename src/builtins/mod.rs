//! Primitives and bootstrap bindings.
//!
//! - **[arithmetic]**: `+ - * / mod`
//! - **[comparison]**: `= <`
//! - **[logic]**: `not`
//! - **[types]**: `pair? null? symbol? number? string?`
//! - **[lists]**: `cons car cdr length equal?`
//! - **[console]**: `display newline`
//! - **[errors]**: `error`
//!
//! Special forms (`quote`, `if`, `define`, `lambda`, `cond`, `begin`, `let`,
//! `set!`, `set-car!`, `set-cdr!`, `apply`, `eval`, `read`, `load`) live in
//! `crate::special_forms` and are registered alongside these.

pub mod arithmetic;
pub mod comparison;
pub mod console;
pub mod errors;
pub mod lists;
pub mod logic;
pub mod types;

use crate::runtime::Runtime;
use crate::value::Value;

/// Registers every special form and primitive, then seeds the handful of
/// extra global bindings the original C implementation provides: `true` and
/// `false` as aliases for `#t`/`#f`, `else` as an always-true catch-all for
/// `cond`, and `()` bound to the null value.
pub fn register_all(rt: &Runtime) {
    crate::special_forms::register(rt);

    arithmetic::register(rt);
    comparison::register(rt);
    logic::register(rt);
    types::register(rt);
    lists::register(rt);
    console::register(rt);
    errors::register(rt);

    rt.global.define(rt.intern("true"), Value::True);
    rt.global.define(rt.intern("false"), Value::False);
    rt.global.define(rt.intern("else"), Value::True);
    rt.global.define(rt.intern("()"), Value::Null);
}
