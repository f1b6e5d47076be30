//! `error`: aborts evaluation with a message.
//!
//! Unlike the teacher's first-class, catchable error values, Sparrow has no
//! recoverable exception mechanism (an explicit Non-goal) — `(error ...)`
//! always propagates as a fatal `EvalError` all the way out to the REPL or
//! script loader.

use crate::error::EvalError;
use crate::runtime::Runtime;
use crate::value::{Primitive, Value};
use std::rc::Rc;

pub fn builtin_error(args: &[Value]) -> Result<Value, EvalError> {
    let msg = args
        .iter()
        .map(|v| match v {
            Value::Str(s) => s.to_string(),
            other => format!("{other}"),
        })
        .collect::<Vec<_>>()
        .join(" ");
    Err(EvalError::Explicit(msg))
}

pub fn register(rt: &Runtime) {
    rt.global.define(
        rt.intern("error"),
        Value::Primitive(Rc::new(Primitive {
            name: "error",
            func: builtin_error,
        })),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_always_fails() {
        let err = builtin_error(&[Value::Str(Rc::from("boom"))]).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn error_joins_multiple_arguments() {
        let err = builtin_error(&[Value::Str(Rc::from("bad")), Value::Int(7)]).unwrap_err();
        assert_eq!(err.to_string(), "bad 7");
    }
}
