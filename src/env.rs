// ABOUTME: Two-namespace environment with snapshot-on-derivation child scopes

use crate::datum::{Datum, Procedure};
use crate::error::LispError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Names that the initial global environment seeds and that `defun`,
/// `defvar` and `defparameter` may never rebind (spec.md §4.5). This is a
/// fixed, closed set — membership does not depend on what is currently
/// bound, so the initial environment can seed these names via the
/// unchecked `install_*` methods without tripping its own lock.
const LOCKED_NAMES: &[&str] = &[
    "+", "-", "*", "/", "=", "<", ">", "NOT", "CONS", "CAR", "CDR", "LIST", "IF", "COND", "QUOTE",
    "DEFUN", "DEFVAR", "DEFPARAMETER", "LET", "LAMBDA", "FUNCTION", "FUNCALL", "PRINT", "NEWLINE",
    "NIL", "T",
];

pub fn is_locked(name: &str) -> bool {
    LOCKED_NAMES.contains(&name)
}

/// A scope mapping symbol names to bindings, split into a variable
/// namespace and a procedure namespace (the two-namespace,
/// Common-Lisp-style variant named in spec.md §4.5/§9).
#[derive(Debug)]
pub struct Environment {
    variables: RefCell<HashMap<String, Datum>>,
    procedures: RefCell<HashMap<String, Procedure>>,
}

impl Environment {
    /// Creates a fresh, empty environment.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            variables: RefCell::new(HashMap::new()),
            procedures: RefCell::new(HashMap::new()),
        })
    }

    /// Creates a child scope by snapshotting both of this scope's
    /// binding tables. Mutations in the child never escape to the
    /// parent, and the parent is never consulted again after this call.
    pub fn derive(self: &Rc<Self>) -> Rc<Self> {
        Rc::new(Environment {
            variables: RefCell::new(self.variables.borrow().clone()),
            procedures: RefCell::new(self.procedures.borrow().clone()),
        })
    }

    pub fn lookup_variable(&self, name: &str) -> Result<Datum, LispError> {
        self.variables
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| LispError::UndefinedVariable(name.to_string()))
    }

    pub fn lookup_procedure(&self, name: &str) -> Result<Procedure, LispError> {
        self.procedures
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| LispError::UndefinedProcedure(name.to_string()))
    }

    /// Unconditional bind in the variable namespace of *this* scope.
    /// Used by `defparameter`; rejects the closed set of locked names.
    pub fn bind_variable(&self, name: &str, value: Datum) -> Result<(), LispError> {
        if is_locked(name) {
            return Err(LispError::symbol_locked(name));
        }
        self.variables.borrow_mut().insert(name.to_string(), value);
        Ok(())
    }

    /// Binds only if `name` is not already bound in this scope's
    /// variable namespace. Used by `defvar`. Still rejects locked names,
    /// even though they are always already "bound" — spec.md's Lock
    /// discipline property requires `SymbolLocked`, not a silent skip.
    pub fn define_variable_if_absent(&self, name: &str, value: Datum) -> Result<bool, LispError> {
        if is_locked(name) {
            return Err(LispError::symbol_locked(name));
        }
        let mut vars = self.variables.borrow_mut();
        if vars.contains_key(name) {
            Ok(false)
        } else {
            vars.insert(name.to_string(), value);
            Ok(true)
        }
    }

    /// Unconditional bind in the procedure namespace of *this* scope.
    /// Used by `defun`; rejects the closed set of locked names.
    pub fn bind_procedure(&self, name: &str, proc: Procedure) -> Result<(), LispError> {
        if is_locked(name) {
            return Err(LispError::symbol_locked(name));
        }
        self.procedures.borrow_mut().insert(name.to_string(), proc);
        Ok(())
    }

    /// Unchecked local bind in the variable namespace, used for `let`
    /// and `lambda` parameter binding. spec.md §4.5's lock discipline
    /// names only `defun`/`defvar`/`defparameter`; a lambda call
    /// shadowing a built-in name for the duration of its own body is
    /// ordinary lexical scoping, not a rebind of the global.
    pub fn define_local(&self, name: &str, value: Datum) {
        self.variables.borrow_mut().insert(name.to_string(), value);
    }

    /// Seeds a builtin procedure into a fresh environment, bypassing the
    /// lock check (the names being seeded here *are* the locked names).
    pub fn install_procedure(&self, name: &str, proc: Procedure) {
        self.procedures.borrow_mut().insert(name.to_string(), proc);
    }

    /// Seeds a builtin constant (`NIL`, `T`) into a fresh environment,
    /// bypassing the lock check.
    pub fn install_variable(&self, name: &str, value: Datum) {
        self.variables.borrow_mut().insert(name.to_string(), value);
    }
}
