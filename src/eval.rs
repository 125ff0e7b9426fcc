// ABOUTME: Recursive evaluator dispatching on form shape and driving procedure invocation

use crate::datum::{Datum, Procedure};
use crate::env::Environment;
use crate::error::LispError;
use std::rc::Rc;

/// Walks a proper list (a chain of `Cons`es ending in `NIL`) into a
/// `Vec`, left to right. Forms built by the reader are always proper
/// lists, so this only fails on a hand-built improper list passed where
/// a proper one is required (e.g. a lambda parameter list).
pub fn list_to_vec(datum: &Datum) -> Result<Vec<Datum>, LispError> {
    let mut items = Vec::new();
    let mut current = datum;
    loop {
        match current {
            Datum::Nil => return Ok(items),
            Datum::Cons(cell) => {
                items.push(cell.car.clone());
                current = &cell.cdr;
            }
            other => {
                return Err(LispError::IllegalFunctionCall(format!(
                    "expected a proper list, got improper tail {}",
                    other
                )))
            }
        }
    }
}

/// Evaluates each element of a raw, unevaluated argument list left to
/// right in `env`. This is the "eager" argument-evaluation strategy
/// ordinary procedures use.
pub fn eval_args(args: &Datum, env: &Rc<Environment>) -> Result<Vec<Datum>, LispError> {
    list_to_vec(args)?
        .iter()
        .map(|form| evaluate(form, env))
        .collect()
}

/// Wraps already-evaluated values in `(quote v)` cons cells so that a
/// builtin that re-evaluates its "raw" argument list (the ordinary,
/// eager builtins) still observes each value exactly once. Used by
/// `funcall` and anywhere else a procedure is invoked on values rather
/// than on source forms.
pub fn quote_values(values: Vec<Datum>) -> Datum {
    Datum::list(
        values
            .into_iter()
            .map(|v| Datum::list(vec![Datum::symbol("quote"), v])),
    )
}

/// `evaluate(form, env) -> datum`, per spec.md §4.3.
pub fn evaluate(form: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    match form {
        Datum::Nil
        | Datum::True
        | Datum::Integer(_)
        | Datum::Float(_)
        | Datum::String(_)
        | Datum::Procedure(_) => Ok(form.clone()),

        Datum::Symbol(name) => env.lookup_variable(name),

        Datum::Cons(cell) => {
            let name = cell.car.as_symbol_name().ok_or_else(|| {
                LispError::IllegalFunctionCall(format!(
                    "head of a compound form must be a symbol naming a procedure, got {}",
                    cell.car
                ))
            })?;
            let proc = env.lookup_procedure(name)?;
            call_procedure(&proc, &cell.cdr, env)
        }
    }
}

/// Invokes `proc` on `args` (a raw, unevaluated argument cons chain) in
/// `env`. Whether and how `args` gets evaluated is up to `proc` itself.
pub fn call_procedure(proc: &Procedure, args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    match proc {
        Procedure::BuiltIn(builtin) => (builtin.rule)(args, env),
        Procedure::UserDefined(lambda) => call_lambda(lambda, args, env),
    }
}

/// spec.md §4.3 "User-defined call": evaluate arguments in the caller's
/// environment, derive a fresh scope from the definition environment,
/// bind parameters, then run the body in sequence.
fn call_lambda(
    lambda: &Rc<crate::datum::Lambda>,
    args: &Datum,
    caller_env: &Rc<Environment>,
) -> Result<Datum, LispError> {
    let values = eval_args(args, caller_env)?;
    if values.len() != lambda.params.len() {
        let name = lambda.name.as_deref().unwrap_or("LAMBDA");
        return Err(LispError::invalid_arity(name, lambda.params.len().to_string(), values.len()));
    }

    let scope = lambda.env.derive();
    for (param, value) in lambda.params.iter().zip(values) {
        scope.define_local(param, value);
    }

    let (last, init) = lambda.body.split_last().expect("lambda body is never empty");
    for form in init {
        evaluate(form, &scope)?;
    }
    evaluate(last, &scope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Environment;

    #[test]
    fn self_evaluating_values_evaluate_to_themselves() {
        let env = Environment::new();
        for form in [
            Datum::Nil,
            Datum::True,
            Datum::Integer(7),
            Datum::Float(1.5),
            Datum::string("hi"),
        ] {
            assert_eq!(evaluate(&form, &env).unwrap(), form);
        }
    }

    #[test]
    fn symbol_evaluates_via_variable_lookup() {
        let env = Environment::new();
        env.bind_variable("X", Datum::Integer(9)).unwrap();
        assert_eq!(evaluate(&Datum::symbol("x"), &env).unwrap(), Datum::Integer(9));
    }

    #[test]
    fn undefined_symbol_is_an_error() {
        let env = Environment::new();
        assert!(matches!(
            evaluate(&Datum::symbol("missing"), &env),
            Err(LispError::UndefinedVariable(_))
        ));
    }

    #[test]
    fn compound_form_requires_symbol_head() {
        let env = Environment::new();
        let form = Datum::cons(Datum::Integer(1), Datum::Nil);
        assert!(matches!(evaluate(&form, &env), Err(LispError::IllegalFunctionCall(_))));
    }

    #[test]
    fn compound_form_with_unknown_head_is_undefined_procedure() {
        let env = Environment::new();
        let form = Datum::list(vec![Datum::symbol("frobnicate")]);
        assert!(matches!(evaluate(&form, &env), Err(LispError::UndefinedProcedure(_))));
    }
}
