// ABOUTME: End-to-end tests running source text through the whole interpreter

use tree_lisp::datum::Datum;
use tree_lisp::interpreter::run;

fn last(src: &str) -> Datum {
    run(src).expect("expected a successful run").pop().expect("expected at least one form")
}

#[test]
fn fibonacci_via_recursion() {
    let src = "(defun fib (n) (if (< n 2) n (+ (fib (- n 1)) (fib (- n 2))))) (fib 10)";
    assert_eq!(last(src), Datum::Integer(55));
}

#[test]
fn let_sums_its_bindings() {
    assert_eq!(last("(let ((x 1) (y 2)) (+ x y))"), Datum::Integer(3));
}

#[test]
fn funcall_with_a_function_designator() {
    let src = "(defun sq (x) (* x x)) (defun f (g) (funcall g 3)) (f #'sq)";
    assert_eq!(last(src), Datum::Integer(9));
}

#[test]
fn nested_cons_car_cdr() {
    assert_eq!(last("(car (cdr (cons 1 (cons 2 (cons 3 nil)))))"), Datum::Integer(2));
}

#[test]
fn cond_picks_the_matching_clause() {
    assert_eq!(last("(cond ((< 1 0) \"a\") ((> 1 0) \"b\"))"), Datum::string("b"));
}

#[test]
fn funcall_on_an_anonymous_lambda() {
    assert_eq!(last("(funcall (lambda (a b) (+ a b)) 4 5)"), Datum::Integer(9));
}

#[test]
fn quote_preserves_list_structure() {
    assert_eq!(
        last("(quote (a b c))"),
        Datum::list(vec![Datum::symbol("a"), Datum::symbol("b"), Datum::symbol("c")])
    );
}

#[test]
fn second_defvar_is_a_no_op() {
    assert_eq!(last("(defvar p 1) (defvar p 2) p"), Datum::Integer(1));
}

#[test]
fn reader_idempotence_round_trips_printed_forms() {
    let source = "(defun fact (n) (if (< n 2) 1 (* n (fact (- n 1)))))";
    let first = tree_lisp::reader::read_all(source).unwrap();
    let rendered = first
        .iter()
        .map(|d| d.to_print_string())
        .collect::<Vec<_>>()
        .join(" ");
    let second = tree_lisp::reader::read_all(&rendered).unwrap();
    assert_eq!(first, second);
}

#[test]
fn self_evaluation_holds_for_every_atomic_kind() {
    for src in ["1", "1.5", "\"s\"", "nil", "t"] {
        let forms = tree_lisp::reader::read_all(src).unwrap();
        let env = tree_lisp::interpreter::initial_environment();
        let value = tree_lisp::eval::evaluate(&forms[0], &env).unwrap();
        assert_eq!(tree_lisp::eval::evaluate(&value.clone(), &env).unwrap(), value);
    }
}

#[test]
fn quote_invariance_matches_the_reader_output_structurally() {
    let forms = tree_lisp::reader::read_all("(a b (c 1))").unwrap();
    let env = tree_lisp::interpreter::initial_environment();
    let quoted = Datum::list(vec![Datum::symbol("quote"), forms[0].clone()]);
    assert_eq!(tree_lisp::eval::evaluate(&quoted, &env).unwrap(), forms[0]);
}

#[test]
fn variable_round_trip_through_defparameter() {
    assert_eq!(last("(defparameter x 42) x"), Datum::Integer(42));
}

#[test]
fn arity_discipline_across_exact_and_minimum_notations() {
    assert!(run("(cons 1)").is_err());
    assert!(run("(if t 1)").is_err());
    assert!(run("(let ((x 1)))").is_err());
}

#[test]
fn lock_discipline_rejects_redefinition_of_every_locked_name() {
    for name in ["+", "car", "if", "quote", "defun", "nil", "t", "funcall"] {
        let src = format!("(defparameter {} 1)", name);
        assert!(run(&src).is_err(), "expected {} to be locked", name);
    }
}

#[test]
fn scope_isolation_after_a_call_with_no_global_definition() {
    let src = "(defparameter x 1) (defun shadow (x) (+ x 100)) (shadow 5) x";
    assert_eq!(last(src), Datum::Integer(1));
}

#[test]
fn and_short_circuits_before_raising_an_error() {
    // A divide-by-zero in the second form would raise ArithmeticError if
    // evaluated; `and` must never reach it once the first form is NIL.
    assert_eq!(last("(and nil (/ 1 0))"), Datum::Nil);
}

#[test]
fn or_short_circuits_before_raising_an_error() {
    assert_eq!(last("(or t (/ 1 0))"), Datum::True);
}
