// ABOUTME: The special form table — quote, if, define, lambda, cond, begin,
// ABOUTME: let, set!, set-car!, set-cdr!, apply, eval, read, and load

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::{apply_value, eval};
use crate::parser::{Reader, StdinChars};
use crate::runtime::Runtime;
use crate::value::{car, cdr, cons, list, list_to_vec, Procedure, SpecialForm, Value};
use std::cell::RefCell;
use std::rc::Rc;

fn define_special_form(rt: &Runtime, name: &'static str, func: crate::value::SpecialFormFn) {
    let sym = rt.intern(name);
    rt.global
        .define(sym, Value::SpecialForm(Rc::new(SpecialForm { name, func })));
}

pub fn register(rt: &Runtime) {
    define_special_form(rt, "quote", sf_quote);
    define_special_form(rt, "if", sf_if);
    define_special_form(rt, "define", sf_define);
    define_special_form(rt, "lambda", sf_lambda);
    define_special_form(rt, "cond", sf_cond);
    define_special_form(rt, "begin", sf_begin);
    define_special_form(rt, "let", sf_let);
    define_special_form(rt, "set!", sf_set);
    define_special_form(rt, "set-car!", sf_set_car);
    define_special_form(rt, "set-cdr!", sf_set_cdr);
    define_special_form(rt, "apply", sf_apply);
    define_special_form(rt, "eval", sf_eval);
    define_special_form(rt, "read", sf_read);
    define_special_form(rt, "load", sf_load);
}

/// Bundles one or more body expressions into a single expression, wrapping
/// in `(begin ...)` when there is more than one — used by `lambda` and the
/// function shorthand of `define`.
fn make_body(rt: &Runtime, body_list: Value) -> Result<Value, EvalError> {
    let exprs = list_to_vec(body_list)?;
    match exprs.len() {
        0 => Err(EvalError::arity_error("lambda", "at least 1 body form", 0)),
        1 => Ok(exprs.into_iter().next().unwrap()),
        _ => Ok(cons(Value::Symbol(rt.intern("begin")), list(exprs))),
    }
}

fn sf_quote(operands: Value, _env: &Rc<Environment>, _rt: &Runtime) -> Result<Value, EvalError> {
    car(&operands)
}

fn sf_if(operands: Value, env: &Rc<Environment>, rt: &Runtime) -> Result<Value, EvalError> {
    let parts = list_to_vec(operands)?;
    if parts.len() < 2 || parts.len() > 3 {
        return Err(EvalError::arity_error("if", "2-3", parts.len()));
    }
    let test = eval(parts[0].clone(), env, rt)?;
    if test.is_truthy() {
        eval(parts[1].clone(), env, rt)
    } else if parts.len() == 3 {
        eval(parts[2].clone(), env, rt)
    } else {
        Ok(Value::Null)
    }
}

fn sf_define(operands: Value, env: &Rc<Environment>, rt: &Runtime) -> Result<Value, EvalError> {
    let target = car(&operands)?;
    match target {
        Value::Symbol(name) => {
            let value = eval(crate::value::cadr(&operands)?, env, rt)?;
            if let Value::Procedure(ref p) = value {
                if p.name.borrow().is_none() {
                    *p.name.borrow_mut() = Some(name.clone());
                }
            }
            env.define(name.clone(), value);
            Ok(Value::Symbol(name))
        }
        Value::Pair(_) => {
            let name = car(&target)?
                .as_symbol()
                .cloned()
                .ok_or_else(|| EvalError::type_error("define", "symbol", &target))?;
            let params = cdr(&target)?;
            let body = make_body(rt, cdr(&operands)?)?;
            let proc = Rc::new(Procedure {
                name: RefCell::new(Some(name.clone())),
                params,
                body,
                env: env.clone(),
            });
            env.define(name.clone(), Value::Procedure(proc));
            Ok(Value::Symbol(name))
        }
        other => Err(EvalError::type_error(
            "define",
            "symbol or procedure spec",
            &other,
        )),
    }
}

fn sf_lambda(operands: Value, env: &Rc<Environment>, rt: &Runtime) -> Result<Value, EvalError> {
    let params = car(&operands)?;
    let body = make_body(rt, cdr(&operands)?)?;
    Ok(Value::Procedure(Rc::new(Procedure {
        name: RefCell::new(None),
        params,
        body,
        env: env.clone(),
    })))
}

/// `else` is seeded globally as an alias for `#t` (see the runtime's
/// bootstrap), so an `(else ...)` clause's test evaluates truthy with no
/// special-casing here — it is exactly as if the programmer had written
/// `(#t ...)`.
///
/// Each clause is `(P E)`: exactly one consequent expression, matching the
/// reference's `syntax_cond`, which evaluates `cadr(clause)` and nothing
/// past it — a clause is not an implicit `begin`.
fn sf_cond(operands: Value, env: &Rc<Environment>, rt: &Runtime) -> Result<Value, EvalError> {
    for clause in list_to_vec(operands)? {
        let parts = list_to_vec(clause)?;
        if parts.is_empty() {
            continue;
        }
        let test = eval(parts[0].clone(), env, rt)?;
        if test.is_truthy() {
            if parts.len() == 1 {
                return Ok(test);
            }
            return eval(parts[1].clone(), env, rt);
        }
    }
    Ok(Value::Null)
}

fn sf_begin(operands: Value, env: &Rc<Environment>, rt: &Runtime) -> Result<Value, EvalError> {
    let mut result = Value::Null;
    for expr in list_to_vec(operands)? {
        result = eval(expr, env, rt)?;
    }
    Ok(result)
}

fn sf_let(operands: Value, env: &Rc<Environment>, rt: &Runtime) -> Result<Value, EvalError> {
    let bindings = list_to_vec(car(&operands)?)?;
    let body = cdr(&operands)?;

    let mut names = Vec::with_capacity(bindings.len());
    let mut values = Vec::with_capacity(bindings.len());
    for binding in bindings {
        let parts = list_to_vec(binding)?;
        if parts.len() != 2 {
            return Err(EvalError::arity_error("let binding", "2", parts.len()));
        }
        let name = parts[0]
            .as_symbol()
            .cloned()
            .ok_or_else(|| EvalError::type_error("let", "symbol", &parts[0]))?;
        let value = eval(parts[1].clone(), env, rt)?;
        names.push(name);
        values.push(value);
    }

    let body_env = Environment::extend(env.clone(), &names, &values);
    sf_begin(body, &body_env, rt)
}

fn sf_set(operands: Value, env: &Rc<Environment>, rt: &Runtime) -> Result<Value, EvalError> {
    let target = car(&operands)?;
    let name = target
        .as_symbol()
        .cloned()
        .ok_or_else(|| EvalError::type_error("set!", "symbol", &target))?;
    let value = eval(crate::value::cadr(&operands)?, env, rt)?;
    env.set(&name, value.clone())?;
    Ok(value)
}

fn sf_set_car(operands: Value, env: &Rc<Environment>, rt: &Runtime) -> Result<Value, EvalError> {
    let target = eval(car(&operands)?, env, rt)?;
    let new_car = eval(crate::value::cadr(&operands)?, env, rt)?;
    match &target {
        Value::Pair(cell) => {
            cell.borrow_mut().car = new_car;
            Ok(Value::Null)
        }
        other => Err(EvalError::type_error("set-car!", "pair", other)),
    }
}

fn sf_set_cdr(operands: Value, env: &Rc<Environment>, rt: &Runtime) -> Result<Value, EvalError> {
    let target = eval(car(&operands)?, env, rt)?;
    let new_cdr = eval(crate::value::cadr(&operands)?, env, rt)?;
    match &target {
        Value::Pair(cell) => {
            cell.borrow_mut().cdr = new_cdr;
            Ok(Value::Null)
        }
        other => Err(EvalError::type_error("set-cdr!", "pair", other)),
    }
}

/// `(apply f a1 a2 ... rest)` evaluates `f` and each fixed argument, then
/// splices in the elements of the trailing list argument. This splicing is
/// why `apply` is a special form rather than a primitive: a primitive's
/// operands are always evaluated one-for-one into the argument slice it
/// receives, with no room to expand one operand into many arguments.
fn sf_apply(operands: Value, env: &Rc<Environment>, rt: &Runtime) -> Result<Value, EvalError> {
    let mut parts = list_to_vec(operands)?;
    if parts.is_empty() {
        return Err(EvalError::arity_error("apply", "at least 1", 0));
    }
    let f = eval(parts.remove(0), env, rt)?;
    if parts.is_empty() {
        return apply_value(f, Vec::new(), rt);
    }
    let trailing_expr = parts.pop().unwrap();
    let mut args = Vec::with_capacity(parts.len());
    for expr in parts {
        args.push(eval(expr, env, rt)?);
    }
    let trailing = eval(trailing_expr, env, rt)?;
    args.extend(list_to_vec(trailing)?);
    apply_value(f, args, rt)
}

/// `eval` always evaluates in the global environment, never the caller's:
/// the operand is evaluated under the caller's environment to produce a
/// piece of data, and that data is then evaluated fresh against the global
/// frame. This is what lets a metacircular evaluator written in Sparrow
/// itself see the same top-level bindings the host program does.
fn sf_eval(operands: Value, env: &Rc<Environment>, rt: &Runtime) -> Result<Value, EvalError> {
    let datum = eval(car(&operands)?, env, rt)?;
    eval(datum, &rt.global, rt)
}

thread_local! {
    static STDIN_READER: RefCell<Reader<StdinChars>> = RefCell::new(Reader::new(StdinChars::new()));
}

/// `(read)` pulls the next datum from standard input, continuing from
/// wherever the previous call left off. Ports beyond stdin/stdout are
/// reserved but unimplemented, matching spec.md's Non-goals.
fn sf_read(_operands: Value, _env: &Rc<Environment>, rt: &Runtime) -> Result<Value, EvalError> {
    STDIN_READER.with(|reader| Ok(reader.borrow_mut().read(rt)))
}

/// `(load "path")` reads and evaluates every top-level form in the named
/// file against the global environment, in order, then returns the value of
/// the last one. The file handle opened by `read_to_string` is closed
/// before this function returns on every path, success or failure.
fn sf_load(operands: Value, env: &Rc<Environment>, rt: &Runtime) -> Result<Value, EvalError> {
    let filename = eval(car(&operands)?, env, rt)?;
    let path = filename
        .as_str()
        .ok_or_else(|| EvalError::type_error("load", "string", &filename))?
        .to_string();
    let contents =
        std::fs::read_to_string(&path).map_err(|e| EvalError::Io(format!("{path}: {e}")))?;

    let mut reader = Reader::new(contents.chars());
    let mut result = Value::Null;
    loop {
        let expr = reader.read(rt);
        if matches!(expr, Value::Sentinel) {
            break;
        }
        result = eval(expr, &rt.global, rt)?;
    }
    Ok(result)
}
