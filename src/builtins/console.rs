//! Output: `display` and `newline`.

use crate::error::EvalError;
use crate::runtime::Runtime;
use crate::value::{Primitive, Value};
use std::io::Write;
use std::rc::Rc;

/// Writes each argument to stdout space-separated, strings unquoted. Returns
/// null.
pub fn builtin_display(args: &[Value]) -> Result<Value, EvalError> {
    let mut stdout = std::io::stdout();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            let _ = write!(stdout, " ");
        }
        match arg {
            Value::Str(s) => {
                let _ = write!(stdout, "{s}");
            }
            other => {
                let _ = write!(stdout, "{other}");
            }
        }
    }
    let _ = stdout.flush();
    Ok(Value::Null)
}

pub fn builtin_newline(args: &[Value]) -> Result<Value, EvalError> {
    if !args.is_empty() {
        return Err(EvalError::arity_error("newline", "0", args.len()));
    }
    println!();
    Ok(Value::Null)
}

fn define(rt: &Runtime, name: &'static str, func: crate::value::PrimitiveFn) {
    rt.global
        .define(rt.intern(name), Value::Primitive(Rc::new(Primitive { name, func })));
}

pub fn register(rt: &Runtime) {
    define(rt, "display", builtin_display);
    define(rt, "newline", builtin_newline);
}
