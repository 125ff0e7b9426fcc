//! Logical connectives `and`/`or`.
//!
//! Both are special operators, not ordinary procedures: they must stop
//! evaluating their argument forms as soon as the result is decided
//! (spec.md §5, §8 property 8), which an eager procedure cannot do.
//! Neither name appears in the locked-name list (spec.md §4.5), so user
//! code is free to redefine them with `defun`.

use crate::datum::{Datum, Procedure};
use crate::env::Environment;
use crate::error::LispError;
use crate::eval::{evaluate, list_to_vec};
use std::rc::Rc;

pub fn and(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    for form in list_to_vec(args)? {
        if !evaluate(&form, env)?.is_truthy() {
            return Ok(Datum::Nil);
        }
    }
    Ok(Datum::True)
}

pub fn or(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    for form in list_to_vec(args)? {
        if evaluate(&form, env)?.is_truthy() {
            return Ok(Datum::True);
        }
    }
    Ok(Datum::Nil)
}

pub fn register(env: &Rc<Environment>) {
    env.install_procedure("AND", Procedure::BuiltIn(crate::datum::BuiltIn { name: "AND", rule: and }));
    env.install_procedure("OR", Procedure::BuiltIn(crate::datum::BuiltIn { name: "OR", rule: or }));
}
