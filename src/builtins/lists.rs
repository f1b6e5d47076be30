//! List construction and inspection: `cons car cdr length equal?`.

use crate::error::EvalError;
use crate::runtime::Runtime;
use crate::value::{self, Primitive, Value};
use std::rc::Rc;

pub fn builtin_cons(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("cons", "2", args.len()));
    }
    Ok(value::cons(args[0].clone(), args[1].clone()))
}

pub fn builtin_car(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("car", "1", args.len()));
    }
    value::car(&args[0])
}

pub fn builtin_cdr(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("cdr", "1", args.len()));
    }
    value::cdr(&args[0])
}

pub fn builtin_length(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("length", "1", args.len()));
    }
    Ok(Value::Int(value::list_len(&args[0])? as i64))
}

/// Deep structural equality. The well-known pitfall here is recursing on
/// `(x, x)` instead of `(car x, car y)` / `(cdr x, cdr y)` — doing so makes
/// every pair compare equal to itself regardless of what `y` is. This
/// recurses on the correct pairing from the start.
fn is_equal(x: &Value, y: &Value) -> bool {
    match (x, y) {
        (Value::Null, Value::Null) => true,
        (Value::True, Value::True) => true,
        (Value::False, Value::False) => true,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Symbol(a), Value::Symbol(b)) => Rc::ptr_eq(a, b),
        (Value::Pair(a), Value::Pair(b)) => {
            let (a_car, a_cdr) = {
                let pair = a.borrow();
                (pair.car.clone(), pair.cdr.clone())
            };
            let (b_car, b_cdr) = {
                let pair = b.borrow();
                (pair.car.clone(), pair.cdr.clone())
            };
            is_equal(&a_car, &b_car) && is_equal(&a_cdr, &b_cdr)
        }
        _ => false,
    }
}

pub fn builtin_equal_p(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("equal?", "2", args.len()));
    }
    Ok(if is_equal(&args[0], &args[1]) {
        Value::True
    } else {
        Value::False
    })
}

fn define(rt: &Runtime, name: &'static str, func: crate::value::PrimitiveFn) {
    rt.global
        .define(rt.intern(name), Value::Primitive(Rc::new(Primitive { name, func })));
}

pub fn register(rt: &Runtime) {
    define(rt, "cons", builtin_cons);
    define(rt, "car", builtin_car);
    define(rt, "cdr", builtin_cdr);
    define(rt, "length", builtin_length);
    define(rt, "equal?", builtin_equal_p);
}
