//! Type predicates: `pair? null? symbol? number? string?`.
//!
//! Each takes exactly one argument and returns `#t`/`#f`.

use crate::error::EvalError;
use crate::runtime::Runtime;
use crate::value::{Primitive, Value};
use std::rc::Rc;

fn bool_of(b: bool) -> Value {
    if b {
        Value::True
    } else {
        Value::False
    }
}

fn unary(form: &'static str, args: &[Value]) -> Result<&Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error(form, "1", args.len()));
    }
    Ok(&args[0])
}

pub fn builtin_pair_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(bool_of(unary("pair?", args)?.is_pair()))
}

pub fn builtin_null_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(bool_of(unary("null?", args)?.is_null()))
}

pub fn builtin_symbol_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(bool_of(matches!(unary("symbol?", args)?, Value::Symbol(_))))
}

pub fn builtin_number_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(bool_of(matches!(unary("number?", args)?, Value::Int(_))))
}

pub fn builtin_string_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(bool_of(matches!(unary("string?", args)?, Value::Str(_))))
}

fn define(rt: &Runtime, name: &'static str, func: crate::value::PrimitiveFn) {
    rt.global
        .define(rt.intern(name), Value::Primitive(Rc::new(Primitive { name, func })));
}

pub fn register(rt: &Runtime) {
    define(rt, "pair?", builtin_pair_p);
    define(rt, "null?", builtin_null_p);
    define(rt, "symbol?", builtin_symbol_p);
    define(rt, "number?", builtin_number_p);
    define(rt, "string?", builtin_string_p);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::cons;

    #[test]
    fn pair_p_distinguishes_pairs_from_null() {
        assert!(matches!(
            builtin_pair_p(&[cons(Value::Int(1), Value::Null)]).unwrap(),
            Value::True
        ));
        assert!(matches!(builtin_pair_p(&[Value::Null]).unwrap(), Value::False));
    }

    #[test]
    fn null_p_only_true_for_null() {
        assert!(matches!(builtin_null_p(&[Value::Null]).unwrap(), Value::True));
        assert!(matches!(builtin_null_p(&[Value::Int(0)]).unwrap(), Value::False));
    }

    #[test]
    fn number_and_string_predicates() {
        assert!(matches!(
            builtin_number_p(&[Value::Int(1)]).unwrap(),
            Value::True
        ));
        assert!(matches!(
            builtin_string_p(&[Value::Str(Rc::from("x"))]).unwrap(),
            Value::True
        ));
        assert!(matches!(
            builtin_string_p(&[Value::Int(1)]).unwrap(),
            Value::False
        ));
    }
}
