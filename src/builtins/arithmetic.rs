//! Arithmetic procedures: `+`, `-`, `*`, `/`
//!
//! All four are ordinary (eager), variadic procedures. An operation
//! stays `Integer` when every operand is an `Integer`; mixing in a
//! `Float` operand promotes the result to `Float` (spec.md §4.4).

use crate::datum::{Datum, Number, Procedure};
use crate::env::Environment;
use crate::error::{LispError, ARITY_AT_LEAST_ONE};
use crate::eval::eval_args;
use std::rc::Rc;

fn as_number(procedure: &str, datum: &Datum, position: usize) -> Result<Number, LispError> {
    datum
        .as_number()
        .ok_or_else(|| LispError::type_mismatch(procedure, "a number", datum, position))
}

fn add2(a: Number, b: Number) -> Number {
    match (a, b) {
        (Number::Integer(a), Number::Integer(b)) => Number::Integer(a + b),
        _ => Number::Float(a.as_f64() + b.as_f64()),
    }
}

fn sub2(a: Number, b: Number) -> Number {
    match (a, b) {
        (Number::Integer(a), Number::Integer(b)) => Number::Integer(a - b),
        _ => Number::Float(a.as_f64() - b.as_f64()),
    }
}

fn mul2(a: Number, b: Number) -> Number {
    match (a, b) {
        (Number::Integer(a), Number::Integer(b)) => Number::Integer(a * b),
        _ => Number::Float(a.as_f64() * b.as_f64()),
    }
}

/// "True division": stays exact (`Integer`) only when both operands are
/// integers and the division has no remainder, otherwise promotes to
/// `Float` for the rest of a left fold (spec.md §4.4, §9 resolution 4).
fn div2(a: Number, b: Number) -> Result<Number, LispError> {
    if b.as_f64() == 0.0 {
        return Err(LispError::ArithmeticError("division by zero".to_string()));
    }
    match (a, b) {
        (Number::Integer(a), Number::Integer(b)) if a % b == 0 => Ok(Number::Integer(a / b)),
        _ => Ok(Number::Float(a.as_f64() / b.as_f64())),
    }
}

pub fn add(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let values = eval_args(args, env)?;
    let mut acc = Number::Integer(0);
    for (i, v) in values.iter().enumerate() {
        acc = add2(acc, as_number("+", v, i)?);
    }
    Ok(acc.to_datum())
}

pub fn sub(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let values = eval_args(args, env)?;
    if values.is_empty() {
        return Err(LispError::invalid_arity("-", ARITY_AT_LEAST_ONE, 0));
    }
    let first = as_number("-", &values[0], 0)?;
    if values.len() == 1 {
        return Ok(sub2(Number::Integer(0), first).to_datum());
    }
    let mut acc = first;
    for (i, v) in values[1..].iter().enumerate() {
        acc = sub2(acc, as_number("-", v, i + 1)?);
    }
    Ok(acc.to_datum())
}

pub fn mul(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let values = eval_args(args, env)?;
    let mut acc = Number::Integer(1);
    for (i, v) in values.iter().enumerate() {
        acc = mul2(acc, as_number("*", v, i)?);
    }
    Ok(acc.to_datum())
}

pub fn div(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let values = eval_args(args, env)?;
    if values.is_empty() {
        return Err(LispError::invalid_arity("/", ARITY_AT_LEAST_ONE, 0));
    }
    let first = as_number("/", &values[0], 0)?;
    if values.len() == 1 {
        // Reciprocal is always a float, per spec.md §4.4.
        if first.as_f64() == 0.0 {
            return Err(LispError::ArithmeticError("division by zero".to_string()));
        }
        return Ok(Datum::Float(1.0 / first.as_f64()));
    }
    let mut acc = first;
    for (i, v) in values[1..].iter().enumerate() {
        acc = div2(acc, as_number("/", v, i + 1)?)?;
    }
    Ok(acc.to_datum())
}

pub fn register(env: &Rc<Environment>) {
    env.install_procedure("+", Procedure::BuiltIn(crate::datum::BuiltIn { name: "+", rule: add }));
    env.install_procedure("-", Procedure::BuiltIn(crate::datum::BuiltIn { name: "-", rule: sub }));
    env.install_procedure("*", Procedure::BuiltIn(crate::datum::BuiltIn { name: "*", rule: mul }));
    env.install_procedure("/", Procedure::BuiltIn(crate::datum::BuiltIn { name: "/", rule: div }));
}
