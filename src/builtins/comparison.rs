//! Numeric comparisons: `= <`.
//!
//! Both are variadic and chain pairwise, so `(< 1 2 3)` asks whether the
//! sequence is strictly increasing, matching the rest of the arithmetic
//! primitives' variadic style.

use crate::error::EvalError;
use crate::runtime::Runtime;
use crate::value::{Primitive, Value};
use std::rc::Rc;

fn ints(form: &'static str, args: &[Value]) -> Result<Vec<i64>, EvalError> {
    args.iter()
        .map(|v| {
            v.as_int()
                .ok_or_else(|| EvalError::type_error(form, "integer", v))
        })
        .collect()
}

fn chain(ns: &[i64], pred: impl Fn(i64, i64) -> bool) -> Value {
    if ns.windows(2).all(|w| pred(w[0], w[1])) {
        Value::True
    } else {
        Value::False
    }
}

pub fn builtin_num_eq(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() < 2 {
        return Err(EvalError::arity_error("=", "at least 2", args.len()));
    }
    let ns = ints("=", args)?;
    Ok(chain(&ns, |a, b| a == b))
}

pub fn builtin_lt(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() < 2 {
        return Err(EvalError::arity_error("<", "at least 2", args.len()));
    }
    let ns = ints("<", args)?;
    Ok(chain(&ns, |a, b| a < b))
}

fn define(rt: &Runtime, name: &'static str, func: crate::value::PrimitiveFn) {
    rt.global
        .define(rt.intern(name), Value::Primitive(Rc::new(Primitive { name, func })));
}

pub fn register(rt: &Runtime) {
    define(rt, "=", builtin_num_eq);
    define(rt, "<", builtin_lt);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_true_and_false() {
        assert!(matches!(
            builtin_num_eq(&[Value::Int(1), Value::Int(1)]).unwrap(),
            Value::True
        ));
        assert!(matches!(
            builtin_num_eq(&[Value::Int(1), Value::Int(2)]).unwrap(),
            Value::False
        ));
    }

    #[test]
    fn lt_chains_across_many_arguments() {
        let args = vec![Value::Int(1), Value::Int(2), Value::Int(3)];
        assert!(matches!(builtin_lt(&args).unwrap(), Value::True));
        let args = vec![Value::Int(1), Value::Int(3), Value::Int(2)];
        assert!(matches!(builtin_lt(&args).unwrap(), Value::False));
    }

    #[test]
    fn requires_at_least_two_arguments() {
        assert!(builtin_lt(&[Value::Int(1)]).is_err());
    }
}
