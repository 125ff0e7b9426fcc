//! Comparison procedures: `=`, `<`, `>`, and the single-argument `not`.
//!
//! All three numeric comparisons are ordinary (eager) procedures;
//! `not` is likewise eager, since a single argument gives it nothing to
//! short-circuit. `and`/`or` live in [`crate::builtins::logic`] instead,
//! because they *do* need to short-circuit (spec.md §8 property 8).

use crate::datum::{Datum, Procedure};
use crate::env::Environment;
use crate::error::{LispError, ARITY_AT_LEAST_ONE, ARITY_ONE, ARITY_TWO};
use crate::eval::eval_args;
use std::rc::Rc;

fn as_number(procedure: &str, datum: &Datum, position: usize) -> Result<f64, LispError> {
    datum
        .as_number()
        .map(|n| n.as_f64())
        .ok_or_else(|| LispError::type_mismatch(procedure, "a number", datum, position))
}

pub fn numeric_eq(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let values = eval_args(args, env)?;
    if values.is_empty() {
        return Err(LispError::invalid_arity("=", ARITY_AT_LEAST_ONE, 0));
    }
    let first = as_number("=", &values[0], 0)?;
    let all_equal = values[1..]
        .iter()
        .enumerate()
        .map(|(i, v)| as_number("=", v, i + 1))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .all(|n| n == first);
    Ok(if all_equal { Datum::True } else { Datum::Nil })
}

pub fn less_than(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let values = eval_args(args, env)?;
    if values.len() != 2 {
        return Err(LispError::invalid_arity("<", ARITY_TWO, values.len()));
    }
    let a = as_number("<", &values[0], 0)?;
    let b = as_number("<", &values[1], 1)?;
    Ok(if a < b { Datum::True } else { Datum::Nil })
}

pub fn greater_than(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let values = eval_args(args, env)?;
    if values.len() != 2 {
        return Err(LispError::invalid_arity(">", ARITY_TWO, values.len()));
    }
    let a = as_number(">", &values[0], 0)?;
    let b = as_number(">", &values[1], 1)?;
    Ok(if a > b { Datum::True } else { Datum::Nil })
}

pub fn not(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let values = eval_args(args, env)?;
    if values.len() != 1 {
        return Err(LispError::invalid_arity("NOT", ARITY_ONE, values.len()));
    }
    Ok(if values[0].is_nil() { Datum::True } else { Datum::Nil })
}

pub fn register(env: &Rc<Environment>) {
    env.install_procedure("=", Procedure::BuiltIn(crate::datum::BuiltIn { name: "=", rule: numeric_eq }));
    env.install_procedure("<", Procedure::BuiltIn(crate::datum::BuiltIn { name: "<", rule: less_than }));
    env.install_procedure(">", Procedure::BuiltIn(crate::datum::BuiltIn { name: ">", rule: greater_than }));
    env.install_procedure("NOT", Procedure::BuiltIn(crate::datum::BuiltIn { name: "NOT", rule: not }));
}
