use rouge_reader::{Form, List, Map};
use rouge_reader_macros::form;

#[test]
fn test_atoms() {
    assert_eq!(form!(nil), Form::Nil);
    assert_eq!(form!(true), Form::Bool(true));
    assert_eq!(form!(false), Form::Bool(false));
    assert_eq!(form!("text"), Form::string("text"));
}

#[test]
fn test_numbers() {
    assert_eq!(form!(123), Form::from(123));
    assert_eq!(form!(123.4), Form::from(123.4));
    assert_eq!(form!(-123), Form::from(-123));
    assert_eq!(form!(-64.0), Form::from(-64.0));
}

#[test]
fn test_symbols() {
    assert_eq!(form!(foo), Form::symbol("foo"));
    assert_eq!(form!(#"a-symbol"), Form::symbol("a-symbol"));
    assert_eq!(form!(#"rouge.core/map"), Form::symbol("rouge.core/map"));
    assert_eq!(form!(+), Form::symbol("+"));
    assert_eq!(form!(->), Form::symbol("->"));
    assert_eq!(form!(<=), Form::symbol("<="));
}

#[test]
fn test_keywords() {
    assert_eq!(form!(:foo), Form::keyword("foo"));
    assert_eq!(form!(:"a keyword"), Form::keyword("a keyword"));
}

#[test]
fn test_collections() {
    assert_eq!(form!(()), Form::List(List::new()));
    assert_eq!(form!((1 2)), Form::list(vec![1, 2]));
    assert_eq!(form!([]), Form::vector(Vec::<Form>::new()));
    assert_eq!(form!([a :b]), Form::vector(vec![Form::symbol("a"), Form::keyword("b")]));
    assert_eq!(form!({}), Form::Map(Map::new()));
    assert_eq!(
        form!({:a 1 :b [2]}),
        Form::map(vec![
            (Form::keyword("a"), Form::from(1)),
            (Form::keyword("b"), Form::vector(vec![2])),
        ])
    );
    assert_eq!(form!(#{1 2 2}), Form::set(vec![1, 2]));
}

#[test]
fn test_nesting() {
    assert_eq!(
        form!((defn f [x] (inc x))),
        Form::list(vec![
            Form::symbol("defn"),
            Form::symbol("f"),
            Form::vector(vec![Form::symbol("x")]),
            Form::list(vec![Form::symbol("inc"), Form::symbol("x")]),
        ])
    );
}

#[test]
fn test_interpolation() {
    let n = 41 + 1;
    let name = "answer";
    let items = Form::vector(vec![1, 2]);
    assert_eq!(
        form!((def ,(Form::symbol(name)) ,n ,items)),
        Form::list(vec![
            Form::symbol("def"),
            Form::symbol("answer"),
            Form::from(42),
            Form::vector(vec![1, 2]),
        ])
    );
}
