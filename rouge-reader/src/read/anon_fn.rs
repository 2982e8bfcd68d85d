//! Rewriting of `#(...)` anonymous function literals.

use crate::{Form, Metadata, Symbol};

use super::error::ErrorCode;

/// Turns the body of an anonymous function literal into
/// `(fn [%1 ... %N] body)`.
///
/// Every bare `%` in the body, however deeply nested in lists and vectors,
/// becomes `%1`; `N` is the highest placeholder number used, and may not
/// exceed `max_arity`.
pub(crate) fn rewrite(mut body: Form, max_arity: usize) -> Result<Form, ErrorCode> {
    let mut arity = 0;
    rename_placeholders(&mut body, &mut arity);
    if arity > max_arity {
        return Err(ErrorCode::AnonFnArityExceeded {
            arity,
            limit: max_arity,
        });
    }
    let params = (1..=arity).map(|n| Form::Symbol(Symbol::new(format!("%{}", n))));
    Ok(Form::list(vec![
        Form::symbol("fn"),
        Form::vector(params),
        body,
    ]))
}

fn rename_placeholders(form: &mut Form, arity: &mut usize) {
    match form {
        Form::List(list) => {
            for item in list.iter_mut() {
                rename_placeholders(item, arity);
            }
        }
        Form::Vector(items) => {
            for item in items.iter_mut() {
                rename_placeholders(item, arity);
            }
        }
        Form::Symbol(sym) if !sym.is_qualified() => {
            if sym.name() == "%" {
                let meta = sym.meta().cloned();
                *sym = Symbol::new("%1");
                sym.set_meta(meta);
            }
            if let Some(n) = placeholder_index(sym.name()) {
                *arity = (*arity).max(n);
            }
        }
        _ => {}
    }
}

fn placeholder_index(name: &str) -> Option<usize> {
    let digits = name.strip_prefix('%')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Too many digits for `usize` is still a placeholder, just one above
    // any limit.
    Some(digits.parse().unwrap_or(usize::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_index() {
        assert_eq!(placeholder_index("%"), None);
        assert_eq!(placeholder_index("%3"), Some(3));
        assert_eq!(placeholder_index("%+3"), None);
        assert_eq!(placeholder_index("x%1"), None);
        assert_eq!(
            placeholder_index("%99999999999999999999999"),
            Some(usize::MAX)
        );
    }

    #[test]
    fn test_arity_limit() {
        let body = Form::list(vec![Form::symbol("f"), Form::symbol("%40000")]);
        match rewrite(body, 20) {
            Err(ErrorCode::AnonFnArityExceeded { arity, limit }) => {
                assert_eq!(arity, 40_000);
                assert_eq!(limit, 20);
            }
            _ => panic!("expected the arity limit to be hit"),
        }

        let body = Form::list(vec![Form::symbol("%20")]);
        let form = rewrite(body, 20).ok().unwrap();
        assert_eq!(form[1].as_vector().map(|params| params.len()), Some(20));
    }

    #[test]
    fn test_nested_vector_keeps_shape() {
        let body = Form::list(vec![
            Form::symbol("f"),
            Form::vector(vec![Form::symbol("%"), Form::list(vec![Form::symbol("%2")])]),
        ]);
        let expected = Form::list(vec![
            Form::symbol("fn"),
            Form::vector(vec![Form::symbol("%1"), Form::symbol("%2")]),
            Form::list(vec![
                Form::symbol("f"),
                Form::vector(vec![Form::symbol("%1"), Form::list(vec![Form::symbol("%2")])]),
            ]),
        ]);
        assert_eq!(rewrite(body, 20).ok().unwrap(), expected);
    }
}
