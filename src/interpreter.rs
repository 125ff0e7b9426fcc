// ABOUTME: Wires the reader, environment and evaluator into a whole-program driver

use crate::builtins::register_builtins;
use crate::datum::Datum;
use crate::env::Environment;
use crate::error::LispError;
use crate::eval::evaluate;
use crate::reader::read_all;
use std::rc::Rc;

/// Builds the pristine global environment: every built-in procedure and
/// special operator, plus the two self-evaluating constants `NIL`/`T`.
/// Re-run per [`run`] call so one script's top-level `defun`s can never
/// bleed into another.
pub fn initial_environment() -> Rc<Environment> {
    let env = Environment::new();
    register_builtins(&env);
    env.install_variable("NIL", Datum::Nil);
    env.install_variable("T", Datum::True);
    env
}

/// Reads and evaluates every top-level form in `source`, in order,
/// against a fresh derived scope of the global environment (spec.md §6).
/// Returns the value of each form; an error on any one form aborts the
/// whole run.
pub fn run(source: &str) -> Result<Vec<Datum>, LispError> {
    let forms = read_all(source)?;
    let global = initial_environment();
    let scope = global.derive();
    forms.iter().map(|form| evaluate(form, &scope)).collect()
}
