// ABOUTME: The evaluator — tag dispatch, procedure application, and
// ABOUTME: parameter binding for lambdas and their rest-argument marker

use crate::env::Environment;
use crate::error::EvalError;
use crate::runtime::Runtime;
use crate::value::{list, list_to_vec, Procedure, Symbol, Value};
use std::rc::Rc;

/// Evaluates `expr` in `env`. Numbers, strings, booleans, the empty list,
/// and the opaque procedure/primitive/special-form/environment/port tags
/// are all self-evaluating. A symbol is looked up in the environment chain.
/// A non-empty pair is a combination: its head is evaluated to obtain an
/// operator, and the operator's tag decides what happens to the rest —
/// special forms see their operands raw, everything else sees them
/// evaluated left to right. There is no tail-call loop here: deep recursion
/// in Sparrow programs grows the Rust call stack, by design (see the
/// project's non-goals around tail-call elimination).
pub fn eval(expr: Value, env: &Rc<Environment>, rt: &Runtime) -> Result<Value, EvalError> {
    match expr {
        Value::Symbol(ref name) => env
            .get(name)
            .ok_or_else(|| EvalError::UnboundVariable(name.to_string())),
        Value::Pair(ref cell) => {
            let (op_expr, operands) = {
                let pair = cell.borrow();
                (pair.car.clone(), pair.cdr.clone())
            };
            let op = eval(op_expr, env, rt)?;
            match op {
                Value::SpecialForm(sf) => (sf.func)(operands, env, rt),
                other => {
                    let args = eval_operands(operands, env, rt)?;
                    apply_value(other, args, rt)
                }
            }
        }
        // Null, Int, Str, True, False, Sentinel, and the opaque tags.
        other => Ok(other),
    }
}

fn eval_operands(
    operands: Value,
    env: &Rc<Environment>,
    rt: &Runtime,
) -> Result<Vec<Value>, EvalError> {
    list_to_vec(operands)?
        .into_iter()
        .map(|expr| eval(expr, env, rt))
        .collect()
}

/// Applies an already-evaluated operator to already-evaluated arguments.
/// Shared by ordinary combination evaluation and the `apply` special form.
pub fn apply_value(op: Value, args: Vec<Value>, rt: &Runtime) -> Result<Value, EvalError> {
    match op {
        Value::Primitive(p) => (p.func)(&args),
        Value::Procedure(proc) => apply_procedure(&proc, args, rt),
        other => Err(EvalError::NotApplicable(other.type_name())),
    }
}

fn apply_procedure(proc: &Rc<Procedure>, args: Vec<Value>, rt: &Runtime) -> Result<Value, EvalError> {
    let (names, values) = bind_parameters("procedure application", &proc.params, &args, rt)?;
    let call_env = Environment::extend(proc.env.clone(), &names, &values);
    eval(proc.body.clone(), &call_env, rt)
}

/// Destructures a parameter spec against already-evaluated arguments,
/// producing the parallel name/value lists a new environment frame needs.
///
/// Three shapes are accepted:
/// - a bare symbol: fully variadic, bound to the whole argument list;
/// - a proper list of symbols: exact arity;
/// - a list of symbols ending in `. rest`: the fixed names take the leading
///   arguments and `rest` takes whatever is left over, even zero of them.
fn bind_parameters(
    form: &'static str,
    params: &Value,
    args: &[Value],
    rt: &Runtime,
) -> Result<(Vec<Symbol>, Vec<Value>), EvalError> {
    if let Value::Symbol(s) = params {
        return Ok((vec![s.clone()], vec![list(args.to_vec())]));
    }

    let mut names = Vec::new();
    let mut values = Vec::new();
    let mut cur = params.clone();
    let mut taken = 0usize;

    loop {
        match cur {
            Value::Null => {
                if taken != args.len() {
                    return Err(EvalError::arity_error(form, taken.to_string(), args.len()));
                }
                return Ok((names, values));
            }
            Value::Pair(ref cell) => {
                let pair = cell.borrow();
                let head = pair
                    .car
                    .as_symbol()
                    .cloned()
                    .ok_or_else(|| EvalError::type_error(form, "symbol", &pair.car))?;
                let rest = pair.cdr.clone();
                drop(pair);

                if Rc::ptr_eq(&head, &rt.syms.dot) {
                    let rest_name = match &rest {
                        Value::Pair(rest_cell) => rest_cell.borrow().car.as_symbol().cloned(),
                        _ => None,
                    }
                    .ok_or_else(|| EvalError::type_error(form, "rest parameter name", &rest))?;
                    names.push(rest_name);
                    values.push(list(args[taken.min(args.len())..].to_vec()));
                    return Ok((names, values));
                }

                if taken >= args.len() {
                    return Err(EvalError::arity_error(
                        form,
                        format!("at least {}", taken + 1),
                        args.len(),
                    ));
                }
                names.push(head);
                values.push(args[taken].clone());
                taken += 1;
                cur = rest;
            }
            other => return Err(EvalError::type_error(form, "parameter list", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Reader;

    fn run(src: &str) -> Value {
        let rt = Runtime::new();
        let mut reader = Reader::new(src.chars());
        let mut result = Value::Null;
        loop {
            let expr = reader.read(&rt);
            if matches!(expr, Value::Sentinel) {
                break;
            }
            result = eval(expr, &rt.global, &rt).unwrap();
        }
        result
    }

    #[test]
    fn self_evaluating_atoms() {
        assert_eq!(format!("{}", run("42")), "42");
        assert_eq!(format!("{}", run("#t")), "#t");
        assert_eq!(format!("{}", run("\"hi\"")), "\"hi\"");
    }

    #[test]
    fn arithmetic_primitives() {
        assert_eq!(format!("{}", run("(+ 1 2 3)")), "6");
        assert_eq!(format!("{}", run("(* 2 3 4)")), "24");
        assert_eq!(format!("{}", run("(- 10 3 2)")), "5");
    }

    #[test]
    fn quote_suppresses_evaluation() {
        assert_eq!(format!("{}", run("(quote (a b c))")), "(a b c)");
        assert_eq!(format!("{}", run("'(1 2)")), "(1 2)");
    }

    #[test]
    fn if_and_define() {
        assert_eq!(format!("{}", run("(if (< 1 2) 'yes 'no)")), "yes");
        assert_eq!(format!("{}", run("(begin (define x 10) (+ x 5))")), "15");
    }

    #[test]
    fn lambda_and_closures() {
        let out = run("(begin (define (square x) (* x x)) (square 7))");
        assert_eq!(format!("{out}"), "49");
    }

    #[test]
    fn factorial_recursion() {
        let src = "(begin \
            (define (fact n) (if (= n 0) 1 (* n (fact (- n 1))))) \
            (fact 6))";
        assert_eq!(format!("{}", run(src)), "720");
    }

    #[test]
    fn variadic_rest_parameter() {
        let out = run("(begin (define (f a . rest) rest) (f 1 2 3 4))");
        assert_eq!(format!("{out}"), "(2 3 4)");
    }

    #[test]
    fn fully_variadic_lambda() {
        let out = run("(begin (define f (lambda args args)) (f 1 2 3))");
        assert_eq!(format!("{out}"), "(1 2 3)");
    }

    #[test]
    fn arity_mismatch_is_an_error() {
        let rt = Runtime::new();
        let mut reader = Reader::new("(begin (define (f x y) x) (f 1))".chars());
        let mut result = Ok(Value::Null);
        loop {
            let expr = reader.read(&rt);
            if matches!(expr, Value::Sentinel) {
                break;
            }
            result = eval(expr, &rt.global, &rt);
            if result.is_err() {
                break;
            }
        }
        assert!(result.is_err());
    }

    #[test]
    fn set_car_and_set_cdr_mutate_in_place() {
        let out = run("(begin (define p (cons 1 2)) (set-car! p 9) (set-cdr! p 8) p)");
        assert_eq!(format!("{out}"), "(9 . 8)");
    }

    #[test]
    fn cond_with_else() {
        assert_eq!(format!("{}", run("(cond (#f 1) (else 2))")), "2");
    }

    #[test]
    fn let_binds_locally() {
        assert_eq!(format!("{}", run("(let ((x 2) (y 3)) (+ x y))")), "5");
    }

    #[test]
    fn apply_splices_trailing_list() {
        assert_eq!(format!("{}", run("(apply + 1 2 '(3 4))")), "10");
    }
}
