//! Special operators: the forms that control their own argument
//! evaluation rather than going through the eager `eval_args` path —
//! `quote`, `if`, `cond`, `let`, `defun`, `defvar`, `defparameter`,
//! `lambda`, `function`, `funcall`.

use crate::datum::{Datum, Lambda, Procedure};
use crate::env::Environment;
use crate::error::{LispError, ARITY_ONE, ARITY_THREE, ARITY_TWO};
use crate::eval::{call_procedure, evaluate, list_to_vec, quote_values};
use std::rc::Rc;

fn require_symbol<'a>(procedure: &str, form: &'a Datum) -> Result<&'a str, LispError> {
    form.as_symbol_name()
        .ok_or_else(|| LispError::IllegalVariableName(format!("{}: {} is not a symbol", procedure, form)))
}

fn parse_param_list(procedure: &str, form: &Datum) -> Result<Vec<Rc<str>>, LispError> {
    list_to_vec(form)?
        .into_iter()
        .map(|p| {
            require_symbol(procedure, &p).map(|name| Rc::from(name))
        })
        .collect()
}

fn non_empty_body(procedure: &str, body: Vec<Datum>) -> Result<Vec<Datum>, LispError> {
    if body.is_empty() {
        return Err(LispError::invalid_arity(procedure, "at least 1 body form", 0));
    }
    Ok(body)
}

pub fn quote(args: &Datum, _env: &Rc<Environment>) -> Result<Datum, LispError> {
    let mut forms = list_to_vec(args)?;
    if forms.len() != 1 {
        return Err(LispError::invalid_arity("QUOTE", ARITY_ONE, forms.len()));
    }
    Ok(forms.remove(0))
}

pub fn if_(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let forms = list_to_vec(args)?;
    if forms.len() != 3 {
        return Err(LispError::invalid_arity("IF", ARITY_THREE, forms.len()));
    }
    if evaluate(&forms[0], env)?.is_truthy() {
        evaluate(&forms[1], env)
    } else {
        evaluate(&forms[2], env)
    }
}

/// `(cond (test body*)*)`: evaluates each clause's test in order; the
/// first truthy test wins and its body forms run in sequence. A clause
/// with no body forms evaluates to its test's own value. No clause
/// matching evaluates to `NIL`.
pub fn cond(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let clauses = list_to_vec(args)?;
    if clauses.is_empty() {
        return Err(LispError::invalid_arity("COND", "at least 1", 0));
    }
    for clause in clauses {
        let parts = list_to_vec(&clause)?;
        let (test, body) = parts
            .split_first()
            .ok_or_else(|| LispError::IllegalFunctionCall("cond: empty clause".to_string()))?;
        let test_value = evaluate(test, env)?;
        if test_value.is_truthy() {
            if body.is_empty() {
                return Ok(test_value);
            }
            let (last, init) = body.split_last().unwrap();
            for form in init {
                evaluate(form, env)?;
            }
            return evaluate(last, env);
        }
    }
    Ok(Datum::Nil)
}

/// `(let ((name init)*) body+)`: every initializer evaluates in the
/// *outer* scope, left to right, before any binding is installed — so
/// later bindings cannot see earlier ones, matching Common Lisp `let`
/// (not `let*`).
pub fn let_(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let forms = list_to_vec(args)?;
    let (bindings_form, body) = forms
        .split_first()
        .ok_or_else(|| LispError::invalid_arity("LET", "at least 2", 0))?;
    let body = non_empty_body("LET", body.to_vec())?;

    let mut bindings = Vec::new();
    for binding in list_to_vec(bindings_form)? {
        match &binding {
            Datum::Symbol(name) => bindings.push((name.to_string(), Datum::Nil)),
            Datum::Cons(_) => {
                let parts = list_to_vec(&binding)?;
                if parts.len() != 2 {
                    return Err(LispError::IllegalVariableName(format!(
                        "let: malformed binding {}",
                        binding
                    )));
                }
                let name = require_symbol("LET", &parts[0])?.to_string();
                let value = evaluate(&parts[1], env)?;
                bindings.push((name, value));
            }
            other => return Err(LispError::IllegalVariableName(format!("let: malformed binding {}", other))),
        }
    }

    let scope = env.derive();
    for (name, value) in bindings {
        scope.define_local(&name, value);
    }

    let (last, init) = body.split_last().unwrap();
    for form in init {
        evaluate(form, &scope)?;
    }
    evaluate(last, &scope)
}

/// `(defun name (params*) body+)`.
pub fn defun(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let forms = list_to_vec(args)?;
    if forms.len() < 3 {
        return Err(LispError::invalid_arity("DEFUN", "at least 3", forms.len()));
    }
    let name = require_symbol("DEFUN", &forms[0])?;
    let params = parse_param_list("DEFUN", &forms[1])?;
    let body = non_empty_body("DEFUN", forms[2..].to_vec())?;

    let lambda = Lambda {
        name: Some(Rc::from(name)),
        params,
        body,
        env: env.clone(),
    };
    env.bind_procedure(name, Procedure::UserDefined(Rc::new(lambda)))?;
    Ok(Datum::symbol(name))
}

/// `(defvar name init)`: binds only if `name` is not already bound in
/// this scope, and — critically — does not re-evaluate `init` when it
/// is a no-op, so a second `defvar` can never re-run side effects.
pub fn defvar(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let forms = list_to_vec(args)?;
    if forms.len() != 2 {
        return Err(LispError::invalid_arity("DEFVAR", ARITY_TWO, forms.len()));
    }
    let name = require_symbol("DEFVAR", &forms[0])?;
    if env.lookup_variable(name).is_ok() {
        return Ok(Datum::symbol(name));
    }
    let value = evaluate(&forms[1], env)?;
    env.define_variable_if_absent(name, value)?;
    Ok(Datum::symbol(name))
}

/// `(defparameter name init)`: unconditionally (re)binds, always
/// re-evaluating `init`.
pub fn defparameter(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let forms = list_to_vec(args)?;
    if forms.len() != 2 {
        return Err(LispError::invalid_arity("DEFPARAMETER", ARITY_TWO, forms.len()));
    }
    let name = require_symbol("DEFPARAMETER", &forms[0])?;
    let value = evaluate(&forms[1], env)?;
    env.bind_variable(name, value)?;
    Ok(Datum::symbol(name))
}

/// `(lambda (params*) body+)`: an anonymous procedure closing over `env`.
pub fn lambda(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let forms = list_to_vec(args)?;
    if forms.len() < 2 {
        return Err(LispError::invalid_arity("LAMBDA", "at least 2", forms.len()));
    }
    let params = parse_param_list("LAMBDA", &forms[0])?;
    let body = non_empty_body("LAMBDA", forms[1..].to_vec())?;
    let lambda = Lambda {
        name: None,
        params,
        body,
        env: env.clone(),
    };
    Ok(Datum::Procedure(Procedure::UserDefined(Rc::new(lambda))))
}

/// `(function name)`: looks `name` up in the procedure namespace and
/// returns it as a first-class value, the spec's function-designator
/// mechanism.
pub fn function(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let forms = list_to_vec(args)?;
    if forms.len() != 1 {
        return Err(LispError::invalid_arity("FUNCTION", ARITY_ONE, forms.len()));
    }
    let name = forms[0]
        .as_symbol_name()
        .ok_or_else(|| LispError::IllegalProcedureName(format!("function: {} is not a symbol", forms[0])))?;
    let proc = env.lookup_procedure(name)?;
    Ok(Datum::Procedure(proc))
}

/// `(funcall designator arg*)`: evaluates `designator` to a `Procedure`
/// and applies it to the eagerly-evaluated `arg*`, re-quoting each value
/// so that an eager builtin target sees it exactly once (see
/// [`quote_values`]).
pub fn funcall(args: &Datum, env: &Rc<Environment>) -> Result<Datum, LispError> {
    let forms = list_to_vec(args)?;
    let (designator, rest) = forms
        .split_first()
        .ok_or_else(|| LispError::invalid_arity("FUNCALL", "at least 1", 0))?;

    let proc = match evaluate(designator, env)? {
        Datum::Procedure(proc) => proc,
        other => {
            return Err(LispError::IllegalFunctionCall(format!(
                "funcall: {} is not a procedure",
                other
            )))
        }
    };

    let values = rest
        .iter()
        .map(|form| evaluate(form, env))
        .collect::<Result<Vec<_>, _>>()?;
    call_procedure(&proc, &quote_values(values), env)
}

pub fn register(env: &Rc<Environment>) {
    let installs: &[(&'static str, crate::datum::BuiltInFn)] = &[
        ("QUOTE", quote),
        ("IF", if_),
        ("COND", cond),
        ("LET", let_),
        ("DEFUN", defun),
        ("DEFVAR", defvar),
        ("DEFPARAMETER", defparameter),
        ("LAMBDA", lambda),
        ("FUNCTION", function),
        ("FUNCALL", funcall),
    ];
    for (name, rule) in installs {
        env.install_procedure(name, Procedure::BuiltIn(crate::datum::BuiltIn { name, rule: *rule }));
    }
}
