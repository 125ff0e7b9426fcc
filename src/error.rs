// ABOUTME: The closed error taxonomy shared by the reader and the evaluator

use crate::datum::Datum;
use thiserror::Error;

// ===== Arity constant strings (mirrors the expected-count wording used
// in error messages without allocating a fresh string at each call site) =====
pub const ARITY_ZERO: &str = "0";
pub const ARITY_ONE: &str = "1";
pub const ARITY_TWO: &str = "2";
pub const ARITY_THREE: &str = "3";
pub const ARITY_AT_LEAST_ONE: &str = "at least 1";
pub const ARITY_AT_LEAST_TWO: &str = "at least 2";
pub const ARITY_AT_LEAST_THREE: &str = "at least 3";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LispError {
    #[error("reader error: {0}")]
    ReaderError(String),

    #[error("unmatched parentheses: {0}")]
    UnmatchedParentheses(String),

    #[error("unmatched quotation: {0}")]
    UnmatchedQuotation(String),

    #[error("undefined variable: {0}")]
    UndefinedVariable(String),

    #[error("undefined procedure: {0}")]
    UndefinedProcedure(String),

    #[error("{procedure}: expected {expected} argument{}, got {actual}", if .expected == "1" { "" } else { "s" })]
    InvalidArity {
        procedure: String,
        expected: String,
        actual: usize,
    },

    #[error("illegal function call: {0}")]
    IllegalFunctionCall(String),

    #[error("illegal variable name: {0}")]
    IllegalVariableName(String),

    #[error("illegal procedure name: {0}")]
    IllegalProcedureName(String),

    #[error("symbol locked: {0}")]
    SymbolLocked(String),

    #[error("arithmetic error: {0}")]
    ArithmeticError(String),

    #[error("{procedure}: expected {expected}, got {actual} at argument {position}")]
    TypeMismatch {
        procedure: String,
        expected: String,
        actual: String,
        position: usize,
    },
}

impl LispError {
    pub fn invalid_arity(procedure: &str, expected: impl Into<String>, actual: usize) -> Self {
        LispError::InvalidArity {
            procedure: procedure.to_string(),
            expected: expected.into(),
            actual,
        }
    }

    pub fn type_mismatch(procedure: &str, expected: &str, actual: &Datum, position: usize) -> Self {
        LispError::TypeMismatch {
            procedure: procedure.to_string(),
            expected: expected.to_string(),
            actual: actual.type_name().to_string(),
            position,
        }
    }

    pub fn symbol_locked(name: &str) -> Self {
        LispError::SymbolLocked(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_message_pluralizes_correctly() {
        let one = LispError::invalid_arity("CAR", ARITY_ONE, 2);
        assert_eq!(format!("{}", one), "CAR: expected 1 argument, got 2");

        let two = LispError::invalid_arity("CONS", ARITY_TWO, 1);
        assert_eq!(format!("{}", two), "CONS: expected 2 arguments, got 1");
    }

    #[test]
    fn type_mismatch_names_the_offending_position() {
        let err = LispError::type_mismatch("CAR", "CONS", &Datum::Nil, 0);
        assert_eq!(format!("{}", err), "CAR: expected CONS, got NIL at argument 0");
    }
}
