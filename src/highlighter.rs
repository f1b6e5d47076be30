// ABOUTME: REPL helper — ANSI syntax highlighting plus a paren-balance
// ABOUTME: validator so multi-line forms can be typed interactively

use rustyline::completion::Completer;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::Helper;
use std::borrow::Cow;
use std::collections::HashSet;

const COLOR_RESET: &str = "\x1b[0m";
const COLOR_PARENS: &str = "\x1b[1;34m";
const COLOR_SPECIAL_FORM: &str = "\x1b[1;35m";
const COLOR_PRIMITIVE: &str = "\x1b[36m";
const COLOR_NUMBER: &str = "\x1b[33m";
const COLOR_STRING: &str = "\x1b[32m";
const COLOR_BOOLEAN: &str = "\x1b[33m";
const COLOR_COMMENT: &str = "\x1b[90m";
const COLOR_QUOTE: &str = "\x1b[1;33m";

/// Rustyline helper bundle: highlights Sparrow syntax and holds the REPL
/// line reader open until parentheses balance.
pub struct LispHelper;

impl LispHelper {
    pub fn new() -> Self {
        LispHelper
    }
}

impl Default for LispHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for LispHelper {}

impl Completer for LispHelper {
    type Candidate = String;
}

impl Hinter for LispHelper {
    type Hint = String;
}

impl Validator for LispHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        let input = ctx.input();
        let mut depth: i64 = 0;
        let mut in_string = false;
        for c in input.chars() {
            match c {
                '"' => in_string = !in_string,
                '(' if !in_string => depth += 1,
                ')' if !in_string => depth -= 1,
                _ => {}
            }
        }
        if depth > 0 || in_string {
            Ok(ValidationResult::Incomplete)
        } else {
            Ok(ValidationResult::Valid(None))
        }
    }
}

impl Highlighter for LispHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let special_forms = special_forms();
        let primitives = primitives();
        let highlighted = highlight_line(line, &special_forms, &primitives);
        if highlighted == line {
            Cow::Borrowed(line)
        } else {
            Cow::Owned(highlighted)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

fn is_symbol_char(c: char) -> bool {
    !c.is_whitespace() && c != '(' && c != ')' && c != '"' && c != ';' && c != '\''
}

fn highlight_line(
    line: &str,
    special_forms: &HashSet<&'static str>,
    primitives: &HashSet<&'static str>,
) -> String {
    let mut result = String::new();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            ';' => {
                result.push_str(COLOR_COMMENT);
                while i < chars.len() && chars[i] != '\n' {
                    result.push(chars[i]);
                    i += 1;
                }
                result.push_str(COLOR_RESET);
            }
            '"' => {
                result.push_str(COLOR_STRING);
                result.push('"');
                i += 1;
                while i < chars.len() && chars[i] != '"' {
                    result.push(chars[i]);
                    i += 1;
                }
                if i < chars.len() {
                    result.push('"');
                    i += 1;
                }
                result.push_str(COLOR_RESET);
            }
            '\'' => {
                result.push_str(COLOR_QUOTE);
                result.push('\'');
                i += 1;
                result.push_str(COLOR_RESET);
            }
            '(' | ')' => {
                result.push_str(COLOR_PARENS);
                result.push(chars[i]);
                i += 1;
                result.push_str(COLOR_RESET);
            }
            c if c.is_ascii_digit() || (c == '-' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit()) => {
                let start = i;
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                let num: String = chars[start..i].iter().collect();
                result.push_str(COLOR_NUMBER);
                result.push_str(&num);
                result.push_str(COLOR_RESET);
            }
            '#' if i + 1 < chars.len() && (chars[i + 1] == 't' || chars[i + 1] == 'f') => {
                result.push_str(COLOR_BOOLEAN);
                result.push(chars[i]);
                result.push(chars[i + 1]);
                i += 2;
                result.push_str(COLOR_RESET);
            }
            c if c.is_whitespace() => {
                result.push(c);
                i += 1;
            }
            _ => {
                let start = i;
                while i < chars.len() && is_symbol_char(chars[i]) {
                    i += 1;
                }
                let symbol: String = chars[start..i].iter().collect();
                if special_forms.contains(symbol.as_str()) {
                    result.push_str(COLOR_SPECIAL_FORM);
                    result.push_str(&symbol);
                    result.push_str(COLOR_RESET);
                } else if primitives.contains(symbol.as_str()) {
                    result.push_str(COLOR_PRIMITIVE);
                    result.push_str(&symbol);
                    result.push_str(COLOR_RESET);
                } else if symbol.is_empty() {
                    // Lone punctuation character this loop didn't advance past.
                    result.push(chars[start]);
                    i = start + 1;
                } else {
                    result.push_str(&symbol);
                }
            }
        }
    }

    result
}

fn special_forms() -> HashSet<&'static str> {
    [
        "quote", "if", "define", "lambda", "cond", "begin", "let", "set!", "set-car!",
        "set-cdr!", "apply", "eval", "read", "load",
    ]
    .iter()
    .copied()
    .collect()
}

fn primitives() -> HashSet<&'static str> {
    [
        "cons", "car", "cdr", "pair?", "null?", "symbol?", "number?", "string?", "equal?", "not",
        "+", "-", "*", "/", "mod", "=", "<", "display", "newline", "length", "error",
    ]
    .iter()
    .copied()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlights_numbers() {
        let out = highlight_line("42", &special_forms(), &primitives());
        assert!(out.contains(COLOR_NUMBER));
    }

    #[test]
    fn highlights_special_forms() {
        let out = highlight_line("(define x 5)", &special_forms(), &primitives());
        assert!(out.contains(COLOR_SPECIAL_FORM));
        assert!(out.contains(COLOR_PARENS));
    }

    #[test]
    fn highlights_primitives() {
        let out = highlight_line("(+ 1 2)", &special_forms(), &primitives());
        assert!(out.contains(COLOR_PRIMITIVE));
    }

    #[test]
    fn highlights_strings_and_booleans() {
        assert!(highlight_line("\"hi\"", &special_forms(), &primitives()).contains(COLOR_STRING));
        assert!(highlight_line("#t", &special_forms(), &primitives()).contains(COLOR_BOOLEAN));
    }
}
