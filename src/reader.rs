// ABOUTME: Character-stream reader turning source text into a sequence of forms

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace1},
    combinator::value,
    multi::many0,
    sequence::preceded,
    IResult, Parser,
};

use crate::datum::Datum;
use crate::error::LispError;

/// True for any character that cannot appear inside a bare symbol/number
/// token: whitespace, the characters that delimit lists and strings, the
/// leading sigils for quote and line comments.
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || c == '(' || c == ')' || c == '"' || c == ';' || c == '\''
}

/// Skips whitespace and `;`-to-end-of-line comments.
fn ws_and_comments(input: &str) -> IResult<&str, ()> {
    let line_comment = (char(';'), take_while(|c| c != '\n'));
    many0(alt((value((), multispace1), value((), line_comment))))
        .map(|_| ())
        .parse(input)
}

/// An integer, a float, or (failing both) a symbol — spec.md §4.1's
/// classification order, applied to one maximal run of non-delimiter
/// characters.
fn parse_atom(input: &str) -> IResult<&str, Datum> {
    let (rest, token) = take_while1(|c: char| !is_delimiter(c)).parse(input)?;

    if let Ok(n) = token.parse::<i64>() {
        return Ok((rest, Datum::Integer(n)));
    }
    if token.contains('.') {
        if let Ok(f) = token.parse::<f64>() {
            return Ok((rest, Datum::Float(f)));
        }
    }
    Ok((rest, Datum::symbol(token)))
}

/// `"..."` — spec.md §4.1 requires no escape processing, so the content
/// is every character up to the next double quote, taken verbatim.
fn parse_string(input: &str) -> IResult<&str, Datum> {
    let (input, _) = char('"')(input)?;
    let (input, content) = take_while(|c| c != '"')(input)?;
    let (input, _) = char('"')(input)?;
    Ok((input, Datum::string(content)))
}

/// `'form` → `(quote form)`.
fn parse_quote(input: &str) -> IResult<&str, Datum> {
    let (input, expr) = preceded(char('\''), parse_form).parse(input)?;
    Ok((input, Datum::list(vec![Datum::symbol("quote"), expr])))
}

/// `#'form` → `(function form)`.
fn parse_function_quote(input: &str) -> IResult<&str, Datum> {
    let (input, expr) = preceded(tag("#'"), parse_form).parse(input)?;
    Ok((input, Datum::list(vec![Datum::symbol("function"), expr])))
}

/// `(form*)`. An empty list is the distinguished `NIL` value, not a cons.
fn parse_list(input: &str) -> IResult<&str, Datum> {
    let (mut input, _) = char('(')(input)?;
    let mut items = Vec::new();
    loop {
        let (rest, _) = ws_and_comments(input)?;
        input = rest;
        if let Ok((rest, _)) = char::<_, nom::error::Error<_>>(')')(input) {
            return Ok((rest, Datum::list(items)));
        }
        let (rest, item) = parse_form(input)?;
        items.push(item);
        input = rest;
    }
}

fn parse_form(input: &str) -> IResult<&str, Datum> {
    let (input, _) = ws_and_comments(input)?;
    alt((
        parse_function_quote,
        parse_quote,
        parse_list,
        parse_string,
        parse_atom,
    ))
    .parse(input)
}

/// Reads every top-level form out of `source`.
///
/// Returns `UnmatchedParentheses` for an extra close paren or an open
/// list that never closes, `UnmatchedQuotation` for a string literal
/// with no closing quote, and `ReaderError` for anything else malformed.
pub fn read_all(source: &str) -> Result<Vec<Datum>, LispError> {
    let mut forms = Vec::new();
    let mut remaining = source;

    loop {
        let (rest, _) = ws_and_comments(remaining)
            .map_err(|e| LispError::ReaderError(format!("{:?}", e)))?;
        remaining = rest;
        if remaining.is_empty() {
            break;
        }

        if remaining.starts_with(')') {
            return Err(LispError::UnmatchedParentheses(format!(
                "unexpected ')' at: {:?}",
                preview(remaining)
            )));
        }

        if remaining.starts_with('"') && find_closing_quote(remaining).is_none() {
            return Err(LispError::UnmatchedQuotation(format!(
                "unterminated string literal: {:?}",
                preview(remaining)
            )));
        }

        match parse_form(remaining) {
            Ok((rest, form)) => {
                forms.push(form);
                remaining = rest;
            }
            Err(_) if has_unclosed_paren(remaining) => {
                return Err(LispError::UnmatchedParentheses(format!(
                    "unclosed '(' in: {:?}",
                    preview(remaining)
                )));
            }
            Err(e) => {
                return Err(LispError::ReaderError(format!("{:?}", e)));
            }
        }
    }

    Ok(forms)
}

fn preview(input: &str) -> &str {
    let end = input.char_indices().nth(40).map(|(i, _)| i).unwrap_or(input.len());
    &input[..end]
}

fn find_closing_quote(input: &str) -> Option<usize> {
    input.get(1..).and_then(|rest| rest.find('"'))
}

fn has_unclosed_paren(input: &str) -> bool {
    let mut depth: i64 = 0;
    let mut in_string = false;
    for c in input.chars() {
        match c {
            '"' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => depth -= 1,
            _ => {}
        }
    }
    depth > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_one(src: &str) -> Datum {
        let mut forms = read_all(src).expect("expected a successful parse");
        assert_eq!(forms.len(), 1, "expected exactly one top-level form");
        forms.remove(0)
    }

    #[test]
    fn reads_integers_and_floats() {
        assert_eq!(read_one("42"), Datum::Integer(42));
        assert_eq!(read_one("-7"), Datum::Integer(-7));
        assert_eq!(read_one("3.5"), Datum::Float(3.5));
        assert_eq!(read_one("-0.5"), Datum::Float(-0.5));
    }

    #[test]
    fn reads_the_bare_minus_symbol() {
        assert_eq!(read_one("-"), Datum::symbol("-"));
        let forms = read_all("(- n 1)").unwrap();
        assert_eq!(
            forms[0],
            Datum::list(vec![Datum::symbol("-"), Datum::symbol("n"), Datum::Integer(1)])
        );
    }

    #[test]
    fn folds_symbols_to_upper_case() {
        assert_eq!(read_one("foo"), Datum::symbol("foo"));
        assert_eq!(read_one("FoO-Bar"), Datum::symbol("foo-bar"));
    }

    #[test]
    fn reads_strings_without_escape_processing() {
        assert_eq!(read_one("\"hello world\""), Datum::string("hello world"));
    }

    #[test]
    fn empty_list_is_nil() {
        assert_eq!(read_one("()"), Datum::Nil);
        assert_eq!(read_one("(  )"), Datum::Nil);
    }

    #[test]
    fn reads_nested_proper_lists() {
        let form = read_one("(1 (2 3) 4)");
        assert_eq!(
            form,
            Datum::list(vec![
                Datum::Integer(1),
                Datum::list(vec![Datum::Integer(2), Datum::Integer(3)]),
                Datum::Integer(4),
            ])
        );
    }

    #[test]
    fn quote_expands_to_quote_form() {
        let form = read_one("'x");
        assert_eq!(form, Datum::list(vec![Datum::symbol("quote"), Datum::symbol("x")]));
    }

    #[test]
    fn function_quote_expands_to_function_form() {
        let form = read_one("#'sq");
        assert_eq!(
            form,
            Datum::list(vec![Datum::symbol("function"), Datum::symbol("sq")])
        );
    }

    #[test]
    fn skips_line_comments() {
        let forms = read_all("; a comment\n42 ; trailing\n").unwrap();
        assert_eq!(forms, vec![Datum::Integer(42)]);
    }

    #[test]
    fn reads_multiple_top_level_forms() {
        let forms = read_all("(defun sq (x) (* x x)) (sq 3)").unwrap();
        assert_eq!(forms.len(), 2);
    }

    #[test]
    fn unmatched_open_paren_is_an_error() {
        assert!(matches!(read_all("(1 2"), Err(LispError::UnmatchedParentheses(_))));
    }

    #[test]
    fn unmatched_close_paren_is_an_error() {
        assert!(matches!(read_all(")"), Err(LispError::UnmatchedParentheses(_))));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert!(matches!(read_all("\"abc"), Err(LispError::UnmatchedQuotation(_))));
    }

    #[test]
    fn reader_is_idempotent() {
        let source = "(defun fib (n) (if (< n 2) n (+ (fib (- n 1)) (fib (- n 2)))))";
        let first = read_all(source).unwrap();
        let rendered: String = first
            .iter()
            .map(|d| d.to_print_string())
            .collect::<Vec<_>>()
            .join(" ");
        let second = read_all(&rendered).unwrap();
        assert_eq!(first, second);
    }
}
