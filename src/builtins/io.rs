//! Printing: `print`, `display`, `newline`. All three are eager, return
//! `NIL`, and write straight to stdout with the plain `print!`/`println!`
//! macros — there is no REPL and no buffering discipline to manage.

use crate::datum::{Datum, Procedure};
use crate::env::Environment;
use crate::error::{LispError, ARITY_ONE, ARITY_ZERO};
use crate::eval::eval_args;
use std::rc::Rc;

pub fn print(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let values = eval_args(args, env)?;
    if values.len() != 1 {
        return Err(LispError::invalid_arity("PRINT", ARITY_ONE, values.len()));
    }
    println!("{}", values[0].to_print_string());
    Ok(Datum::Nil)
}

pub fn display(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let values = eval_args(args, env)?;
    if values.len() != 1 {
        return Err(LispError::invalid_arity("DISPLAY", ARITY_ONE, values.len()));
    }
    println!("{}", values[0].to_display_string());
    Ok(Datum::Nil)
}

pub fn newline(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let values = eval_args(args, env)?;
    if !values.is_empty() {
        return Err(LispError::invalid_arity("NEWLINE", ARITY_ZERO, values.len()));
    }
    println!();
    Ok(Datum::Nil)
}

pub fn register(env: &Rc<Environment>) {
    env.install_procedure("PRINT", Procedure::BuiltIn(crate::datum::BuiltIn { name: "PRINT", rule: print }));
    env.install_procedure("DISPLAY", Procedure::BuiltIn(crate::datum::BuiltIn { name: "DISPLAY", rule: display }));
    env.install_procedure("NEWLINE", Procedure::BuiltIn(crate::datum::BuiltIn { name: "NEWLINE", rule: newline }));
}
