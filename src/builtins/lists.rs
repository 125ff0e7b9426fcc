//! Cons-cell constructors and accessors: `cons`, `car`, `cdr`, `list`.

use crate::datum::{Datum, Procedure};
use crate::env::Environment;
use crate::error::{LispError, ARITY_ONE, ARITY_TWO};
use crate::eval::eval_args;
use std::rc::Rc;

pub fn cons(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let values = eval_args(args, env)?;
    if values.len() != 2 {
        return Err(LispError::invalid_arity("CONS", ARITY_TWO, values.len()));
    }
    let mut values = values.into_iter();
    let car = values.next().unwrap();
    let cdr = values.next().unwrap();
    Ok(Datum::cons(car, cdr))
}

pub fn car(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let values = eval_args(args, env)?;
    if values.len() != 1 {
        return Err(LispError::invalid_arity("CAR", ARITY_ONE, values.len()));
    }
    values[0]
        .as_cons()
        .map(|cell| cell.car.clone())
        .ok_or_else(|| LispError::type_mismatch("CAR", "a CONS", &values[0], 0))
}

pub fn cdr(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let values = eval_args(args, env)?;
    if values.len() != 1 {
        return Err(LispError::invalid_arity("CDR", ARITY_ONE, values.len()));
    }
    values[0]
        .as_cons()
        .map(|cell| cell.cdr.clone())
        .ok_or_else(|| LispError::type_mismatch("CDR", "a CONS", &values[0], 0))
}

pub fn list(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let values = eval_args(args, env)?;
    Ok(Datum::list(values))
}

pub fn register(env: &Rc<Environment>) {
    env.install_procedure("CONS", Procedure::BuiltIn(crate::datum::BuiltIn { name: "CONS", rule: cons }));
    env.install_procedure("CAR", Procedure::BuiltIn(crate::datum::BuiltIn { name: "CAR", rule: car }));
    env.install_procedure("CDR", Procedure::BuiltIn(crate::datum::BuiltIn { name: "CDR", rule: cdr }));
    env.install_procedure("LIST", Procedure::BuiltIn(crate::datum::BuiltIn { name: "LIST", rule: list }));
}
