// ABOUTME: Value types representing the tagged heap of Sparrow data and code

use crate::env::Environment;
use crate::error::EvalError;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A symbol is an interned, reference-counted string slice. Two symbols with
/// the same spelling are always the same `Rc<str>` allocation — see
/// `crate::interner`. Identity (`Rc::ptr_eq`) is how the evaluator and the
/// environment chain compare symbols, not string content.
pub type Symbol = Rc<str>;

/// One cons cell. `car`/`cdr` are independently mutable so `set-car!` and
/// `set-cdr!` can rewrite structure in place, including building improper
/// lists.
#[derive(Debug)]
pub struct Pair {
    pub car: Value,
    pub cdr: Value,
}

/// A compound procedure (closure) created by `lambda` or the function form
/// of `define`.
#[derive(Debug)]
pub struct Procedure {
    pub name: RefCell<Option<Symbol>>,
    /// The raw, unevaluated parameter spec: a proper list of symbols, a
    /// dotted list ending in a rest symbol, or a single symbol for a fully
    /// variadic procedure.
    pub params: Value,
    pub body: Value,
    pub env: Rc<Environment>,
}

pub type PrimitiveFn = fn(&[Value]) -> Result<Value, EvalError>;
pub type SpecialFormFn =
    fn(Value, &Rc<Environment>, &crate::runtime::Runtime) -> Result<Value, EvalError>;

pub struct Primitive {
    pub name: &'static str,
    pub func: PrimitiveFn,
}

pub struct SpecialForm {
    pub name: &'static str,
    pub func: SpecialFormFn,
}

/// Reserved for future I/O beyond stdin/stdout; only ever constructed for
/// the standard ports in practice.
#[derive(Debug)]
pub struct Port {
    pub name: &'static str,
}

/// The tagged value every Sparrow datum and expression is made of.
///
/// `Null`, `True`, `False`, and `Sentinel` are the distinguished values
/// outside the ordinary tag space: the empty list, the two canonical
/// booleans, and the reader/lookup "nothing here" marker. They are plain
/// enum variants rather than heap singletons, so the singleton-identity
/// invariant ("there is exactly one empty list, one `#t`, one `#f`") holds
/// by construction instead of by pointer comparison.
#[derive(Clone)]
pub enum Value {
    Null,
    True,
    False,
    /// Produced by the reader at end-of-input and end-of-list, and by a
    /// failed environment lookup. Never a legitimate program value.
    Sentinel,
    Int(i64),
    Symbol(Symbol),
    Str(Rc<str>),
    Pair(Rc<RefCell<Pair>>),
    Procedure(Rc<Procedure>),
    Primitive(Rc<Primitive>),
    SpecialForm(Rc<SpecialForm>),
    Environment(Rc<Environment>),
    Port(Rc<Port>),
}

impl Value {
    /// The truthiness rule shared by `if`, `cond`, and `not`: everything but
    /// the false singleton is truthy, including null, zero, and the empty
    /// string.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::False)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::True | Value::False => "boolean",
            Value::Sentinel => "sentinel",
            Value::Int(_) => "integer",
            Value::Symbol(_) => "symbol",
            Value::Str(_) => "string",
            Value::Pair(_) => "pair",
            Value::Procedure(_) => "procedure",
            Value::Primitive(_) => "primitive",
            Value::SpecialForm(_) => "special-form",
            Value::Environment(_) => "environment",
            Value::Port(_) => "port",
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Value::Pair(_))
    }
}

/// Builds a proper list out of `items`, terminated by `Value::Null`.
pub fn list<I>(items: I) -> Value
where
    I: IntoIterator<Item = Value>,
    I::IntoIter: DoubleEndedIterator,
{
    let mut tail = Value::Null;
    for item in items.into_iter().rev() {
        tail = cons(item, tail);
    }
    tail
}

pub fn cons(car: Value, cdr: Value) -> Value {
    Value::Pair(Rc::new(RefCell::new(Pair { car, cdr })))
}

fn type_error(who: &'static str, expected: &'static str, actual: &Value) -> EvalError {
    EvalError::TypeMismatch {
        form: who,
        expected,
        actual: actual.type_name(),
    }
}

pub fn car(v: &Value) -> Result<Value, EvalError> {
    match v {
        Value::Pair(p) => Ok(p.borrow().car.clone()),
        _ => Err(type_error("car", "pair", v)),
    }
}

pub fn cdr(v: &Value) -> Result<Value, EvalError> {
    match v {
        Value::Pair(p) => Ok(p.borrow().cdr.clone()),
        _ => Err(type_error("cdr", "pair", v)),
    }
}

pub fn caar(v: &Value) -> Result<Value, EvalError> {
    car(&car(v)?)
}

pub fn cadr(v: &Value) -> Result<Value, EvalError> {
    car(&cdr(v)?)
}

pub fn cdar(v: &Value) -> Result<Value, EvalError> {
    cdr(&car(v)?)
}

pub fn cddr(v: &Value) -> Result<Value, EvalError> {
    cdr(&cdr(v)?)
}

pub fn caddr(v: &Value) -> Result<Value, EvalError> {
    car(&cddr(v)?)
}

/// Collects a proper list into a `Vec`, erroring if `v` is not one. Used by
/// primitives and special forms that need a materialized argument vector.
pub fn list_to_vec(mut v: Value) -> Result<Vec<Value>, EvalError> {
    let mut out = Vec::new();
    loop {
        match v {
            Value::Null => return Ok(out),
            Value::Pair(p) => {
                let pair = p.borrow();
                out.push(pair.car.clone());
                let next = pair.cdr.clone();
                drop(pair);
                v = next;
            }
            other => return Err(type_error("list", "proper list", &other)),
        }
    }
}

pub fn list_len(v: &Value) -> Result<usize, EvalError> {
    let mut n = 0usize;
    let mut cur = v.clone();
    loop {
        match cur {
            Value::Null => return Ok(n),
            Value::Pair(p) => {
                n += 1;
                let next = p.borrow().cdr.clone();
                cur = next;
            }
            other => return Err(type_error("length", "proper list", &other)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "()"),
            Value::True => write!(f, "#t"),
            Value::False => write!(f, "#f"),
            Value::Sentinel => write!(f, "#<sentinel>"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Symbol(s) => write!(f, "{s}"),
            Value::Str(s) => write!(f, "\"{s}\""),
            Value::Pair(p) => {
                write!(f, "(")?;
                let pair = p.borrow();
                write!(f, "{}", pair.car)?;
                let mut cdr = pair.cdr.clone();
                drop(pair);
                loop {
                    match cdr {
                        Value::Null => break,
                        Value::Pair(next) => {
                            let next_pair = next.borrow();
                            write!(f, " {}", next_pair.car)?;
                            let tail = next_pair.cdr.clone();
                            drop(next_pair);
                            cdr = tail;
                        }
                        other => {
                            write!(f, " . {other}")?;
                            break;
                        }
                    }
                }
                write!(f, ")")
            }
            Value::Procedure(p) => match p.name.borrow().as_ref() {
                Some(name) => write!(f, "#<procedure {name}>"),
                None => write!(f, "#<procedure>"),
            },
            Value::Primitive(p) => write!(f, "#<primitive {}>", p.name),
            Value::SpecialForm(s) => write!(f, "#<special-form {}>", s.name),
            Value::Environment(_) => write!(f, "#<environment>"),
            Value::Port(p) => write!(f, "#<port {}>", p.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_atoms() {
        assert_eq!(format!("{}", Value::Int(42)), "42");
        assert_eq!(format!("{}", Value::Int(-7)), "-7");
        assert_eq!(format!("{}", Value::True), "#t");
        assert_eq!(format!("{}", Value::False), "#f");
        assert_eq!(format!("{}", Value::Null), "()");
        assert_eq!(format!("{}", Value::Str(Rc::from("hi"))), "\"hi\"");
    }

    #[test]
    fn display_proper_list() {
        let v = list(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(format!("{v}"), "(1 2 3)");
    }

    #[test]
    fn display_nested_list() {
        let inner = list(vec![Value::Int(2), Value::Int(3)]);
        let v = list(vec![Value::Int(1), inner, Value::Int(4)]);
        assert_eq!(format!("{v}"), "(1 (2 3) 4)");
    }

    #[test]
    fn display_dotted_pair() {
        let v = cons(Value::Int(9), Value::Int(2));
        assert_eq!(format!("{v}"), "(9 . 2)");
    }

    #[test]
    fn list_to_vec_roundtrip() {
        let v = list(vec![Value::Int(1), Value::Int(2)]);
        let items = list_to_vec(v).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_int(), Some(1));
        assert_eq!(items[1].as_int(), Some(2));
    }

    #[test]
    fn list_len_of_improper_list_errors() {
        let v = cons(Value::Int(1), Value::Int(2));
        assert!(list_len(&v).is_err());
    }
}
