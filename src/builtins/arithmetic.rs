//! Integer arithmetic: `+ - * / mod`.
//!
//! Sparrow has no floating point and no wider numeric tower (see Non-goals);
//! every operand must already be an `Int`.
//!
//! - `+`: sum of all arguments (identity 0)
//! - `-`: subtract subsequent args from the first; a single arg is a fold
//!   with nothing to subtract, so it is returned unchanged (this is *not*
//!   unary negation — `(- 5)` is `5`, matching the reference)
//! - `*`: product of all arguments (identity 1)
//! - `/`: integer-divide exactly two arguments
//! - `mod`: remainder of exactly two arguments

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

pub fn builtin_add(args: &[Value]) -> Result<Value, EvalError> {
    let ns = ints("+", args)?;
    Ok(Value::Int(ns.iter().fold(0i64, |acc, n| acc.wrapping_add(*n))))
}

pub fn builtin_sub(args: &[Value]) -> Result<Value, EvalError> {
    let ns = ints("-", args)?;
    match ns.split_first() {
        None => Err(EvalError::arity_error("-", "at least 1", 0)),
        Some((first, [])) => Ok(Value::Int(*first)),
        Some((first, rest)) => Ok(Value::Int(
            rest.iter().fold(*first, |acc, n| acc.wrapping_sub(*n)),
        )),
    }
}

pub fn builtin_mul(args: &[Value]) -> Result<Value, EvalError> {
    let ns = ints("*", args)?;
    Ok(Value::Int(ns.iter().fold(1i64, |acc, n| acc.wrapping_mul(*n))))
}

pub fn builtin_div(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("/", "2", args.len()));
    }
    let ns = ints("/", args)?;
    if ns[1] == 0 {
        return Err(EvalError::DivisionByZero("/"));
    }
    Ok(Value::Int(ns[0] / ns[1]))
}

pub fn builtin_mod(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("mod", "2", args.len()));
    }
    let ns = ints("mod", args)?;
    if ns[1] == 0 {
        return Err(EvalError::DivisionByZero("mod"));
    }
    Ok(Value::Int(ns[0] % ns[1]))
}

fn define(rt: &Runtime, name: &'static str, func: crate::value::PrimitiveFn) {
    rt.global
        .define(rt.intern(name), Value::Primitive(Rc::new(Primitive { name, func })));
}

pub fn register(rt: &Runtime) {
    define(rt, "+", builtin_add);
    define(rt, "-", builtin_sub);
    define(rt, "*", builtin_mul);
    define(rt, "/", builtin_div);
    define(rt, "mod", builtin_mod);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sums_all_arguments() {
        let args = vec![Value::Int(1), Value::Int(2), Value::Int(3)];
        assert_eq!(builtin_add(&args).unwrap().as_int(), Some(6));
    }

    #[test]
    fn add_of_no_arguments_is_zero() {
        assert_eq!(builtin_add(&[]).unwrap().as_int(), Some(0));
    }

    #[test]
    fn sub_with_one_argument_is_a_fold_with_nothing_to_subtract() {
        let args = vec![Value::Int(5)];
        assert_eq!(builtin_sub(&args).unwrap().as_int(), Some(5));
    }

    #[test]
    fn sub_with_many_arguments_folds_left() {
        let args = vec![Value::Int(10), Value::Int(3), Value::Int(2)];
        assert_eq!(builtin_sub(&args).unwrap().as_int(), Some(5));
    }

    #[test]
    fn div_by_zero_errors() {
        let args = vec![Value::Int(1), Value::Int(0)];
        assert!(builtin_div(&args).is_err());
    }

    #[test]
    fn div_requires_exactly_two_args() {
        assert!(builtin_div(&[Value::Int(1)]).is_err());
        assert!(builtin_div(&[Value::Int(1), Value::Int(2), Value::Int(3)]).is_err());
        let args = vec![Value::Int(7), Value::Int(2)];
        assert_eq!(builtin_div(&args).unwrap().as_int(), Some(3));
    }

    #[test]
    fn mod_requires_exactly_two_args() {
        assert!(builtin_mod(&[Value::Int(1)]).is_err());
        let args = vec![Value::Int(10), Value::Int(3)];
        assert_eq!(builtin_mod(&args).unwrap().as_int(), Some(1));
    }

    #[test]
    fn non_integer_argument_is_a_type_error() {
        let args = vec![Value::Int(1), Value::True];
        assert!(builtin_add(&args).is_err());
    }
}
