use std::error::Error as _;

use regex::Regex;

use super::*;
use crate::{List, Table};

fn ns() -> Table {
    Table::new("user")
        .refer("rouge.core", "map")
        .refer("rouge.core", "inc")
        .intern("x")
}

fn read(src: &str) -> Form {
    read_str(&ns(), src).unwrap()
}

fn read_err(src: &str) -> Error {
    read_str(&ns(), src).unwrap_err()
}

#[test]
fn test_atoms() {
    let table = ns();
    let mut reader = Reader::new(&table, "foo :kw \"str\" nil true false 100 -42 4.5 rouge.core/map");
    for form in vec![
        Form::symbol("foo"),
        Form::keyword("kw"),
        Form::string("str"),
        Form::Nil,
        Form::Bool(true),
        Form::Bool(false),
        Form::from(100),
        Form::from(-42),
        Form::from(4.5),
        Form::Symbol(Symbol::qualified("rouge.core", "map")),
    ] {
        assert_eq!(reader.read().unwrap(), Some(form));
    }
    reader.end().unwrap();
    assert_eq!(reader.read().unwrap(), None);
}

#[test]
fn test_numbers() {
    assert_eq!(read("0x1F"), Form::from(31));
    assert_eq!(read("0b101"), Form::from(5));
    assert_eq!(read("010"), Form::from(8));
    assert_eq!(read("0"), Form::from(0));
    assert_eq!(read("1.5e2"), Form::from(150.0));
    assert_eq!(read("2.5E-1"), Form::from(0.25));
    assert_eq!(read("1_000"), Form::from(1000));
    assert_eq!(read("+7"), Form::from(7));
    assert_eq!(read("-0x10"), Form::from(-16));
    assert_eq!(read("-9223372036854775808"), Form::from(i64::MIN));

    let big = read("123456789012345678901234567890");
    let n = big.as_number().unwrap();
    assert!(n.is_integer());
    assert!(!n.is_i64());
    assert_eq!(
        n.to_bigint().unwrap().to_string(),
        "123456789012345678901234567890"
    );
}

#[test]
fn test_number_failures() {
    for src in &[
        "1abc", "-1abc", "+1abc", "09", "0x", "1.", "1e", "1__0", "0b102",
    ] {
        let err = read_err(src);
        assert!(err.is_unexpected(), "{}: {}", src, err);
        assert!(err.to_string().starts_with("invalid number"), "{}: {}", src, err);
    }
    assert!(read_err("1e999").to_string().starts_with("number out of range"));
}

#[test]
fn test_signs_in_symbols() {
    assert_eq!(read("-"), Form::symbol("-"));
    assert_eq!(read("+"), Form::symbol("+"));
    assert_eq!(read("-x"), Form::symbol("-x"));
    assert_eq!(read("->"), Form::symbol("->"));
    assert_eq!(read("-1.5"), Form::from(-1.5));
    assert_eq!(read("+7"), Form::from(7));
    assert_eq!(read("-.5"), Form::symbol("-.5"));
    assert_eq!(
        read_all(&ns(), "-1/2").unwrap(),
        vec![Form::from(-1), Form::symbol("/2")]
    );
    assert!(read_err("-1/2").is_unexpected());
}

#[test]
fn test_symbols() {
    assert_eq!(read("/"), Form::symbol("/"));
    assert_eq!(read("a.b/c"), Form::Symbol(Symbol::qualified("a.b", "c")));
    assert_eq!(read(".method"), Form::symbol(".method"));
    assert_eq!(read(".[]"), Form::symbol(".[]"));
    assert_eq!(read("%2"), Form::symbol("%2"));
    assert_eq!(read("<=>"), Form::symbol("<=>"));
}

#[test]
fn test_keywords() {
    assert_eq!(read(":a-b?"), Form::keyword("a-b?"));
    assert_eq!(read(":a/b"), Form::keyword("a/b"));
    assert_eq!(read(r#":"two words""#), Form::keyword("two words"));
    assert!(read_err(":").is_eof());
    assert!(read_err(": a").is_unexpected());
}

#[test]
fn test_strings() {
    assert_eq!(read(r#""A plain string""#), Form::string("A plain string"));
    assert_eq!(read(r#""a\nb""#), Form::string("a\nb"));
    assert_eq!(
        read(r#""\a\b\e\f\n\r\s\t\v\"\\""#),
        Form::string("\x07\x08\x1b\x0c\n\r \t\x0b\"\\")
    );
    assert_eq!(read(r#""\q""#), Form::string("q"));
    assert_eq!(read("\"multi\nline\""), Form::string("multi\nline"));
    assert_eq!(read(r#""a ; not a comment""#), Form::string("a ; not a comment"));

    assert!(read_err(r#""abc"#).is_eof());
    assert!(read_err(r#""abc\"#).is_eof());
}

#[test]
fn test_whitespace_commas_and_comments() {
    assert_eq!(read("[1, 2 ; two\n 3]"), Form::vector(vec![1, 2, 3]));
    assert_eq!(read("  ; leading\n x ; trailing"), Form::symbol("x"));
    let forms = read_all(&ns(), "a,b").unwrap();
    assert_eq!(forms, vec![Form::symbol("a"), Form::symbol("b")]);
}

#[test]
fn test_collections() {
    assert_eq!(read("()"), Form::List(List::new()));
    assert_eq!(read("( )"), read("()"));
    assert_eq!(read("(1 (2))"), Form::list(vec![Form::from(1), Form::list(vec![2])]));
    assert_eq!(read("[]"), Form::vector(Vec::<Form>::new()));
    assert_eq!(
        read("{:a 1 :b [2]}"),
        Form::map(vec![
            (Form::keyword("a"), Form::from(1)),
            (Form::keyword("b"), Form::vector(vec![2])),
        ])
    );
    assert_eq!(read("{:a 1 :b 2}"), read("{:b 2 :a 1}"));
    assert_eq!(read("#{1 2}"), Form::set(vec![1, 2]));
    assert_eq!(read("#{1 2}"), read("#{2 1}"));
    assert_eq!(read("#{1 1}").as_set().unwrap().len(), 1);
}

#[test]
fn test_collection_failures() {
    let err = read_err("{:a}");
    assert!(err.is_unexpected());
    assert!(err.to_string().starts_with("map literal has a key without a value"));
    assert!(read_err("(1 2").is_eof());
    assert!(read_err("[1").is_eof());
    assert!(read_err("{:a 1").is_eof());
    assert!(read_err("{:a").is_eof());
    assert!(read_err("#{1").is_eof());
    assert!(read_err(")").is_unexpected());
    assert!(read_err("(1]").is_unexpected());
}

#[test]
fn test_quote() {
    assert_eq!(read("'x"), Form::quote(Form::symbol("x")));
    assert_eq!(read("'(1 2)"), read("(quote (1 2))"));
    assert!(read_err("'").is_eof());
}

#[test]
fn test_discard() {
    assert_eq!(read_all(&ns(), "#_x y").unwrap(), vec![Form::symbol("y")]);
    assert_eq!(read("[1 #_2 3]"), Form::vector(vec![1, 3]));
    assert_eq!(read("#_ #_ a b c"), Form::symbol("c"));
}

#[test]
fn test_anonymous_functions() {
    assert_eq!(read("#(+ 1 2)"), read("(fn [] (+ 1 2))"));
    assert_eq!(read("#(inc %)"), read("(fn [%1] (inc %1))"));
    assert_eq!(read("#(+ % %2)"), read("(fn [%1 %2] (+ %1 %2))"));
    assert_eq!(read("#(f %3 [%])"), read("(fn [%1 %2 %3] (f %3 [%1]))"));
    assert!(read_err("#(+ 1").is_eof());
}

#[test]
fn test_anonymous_function_arity_limit() {
    let err = read_err("#(f %4000000000)");
    assert!(err.is_unexpected());
    assert_eq!(err.location().unwrap().column(), 1);

    let options = Options::new().with_max_anon_fn_arity(2);
    assert!(read_str_custom(&ns(), "#(f %2)", options.clone()).is_ok());
    assert!(read_str_custom(&ns(), "#(f %3)", options).is_err());
}

#[test]
fn test_dispatch() {
    assert_eq!(read("#'foo"), read("(var foo)"));
    assert!(read_err("#x").is_unexpected());
    assert!(read_err("# (1)").is_unexpected());
    assert!(read_err("#").is_eof());
}

#[test]
fn test_regex() {
    let form = read(r#"#"[a-z]+""#);
    let re = form.as_regex().unwrap();
    assert_eq!(re.as_str(), "[a-z]+");
    assert!(re.as_regex().is_match("abc"));

    let form = read(r#"#"a\"b""#);
    let re = form.as_regex().unwrap();
    assert_eq!(re.as_str(), r#"a\"b"#);
    assert!(re.as_regex().is_match(r#"a"b"#));

    let form = read(r#"#"a\\""#);
    assert_eq!(form.as_regex().unwrap().as_str(), r"a\\");

    // An escaped backslash does not escape the closing quote.
    let form = read(r#"[#"a\\" b]"#);
    assert_eq!(form[0].as_regex().unwrap().as_str(), r"a\\");
    assert_eq!(form[1], Form::symbol("b"));

    let form = read(r#"#"\d+""#);
    assert!(form.as_regex().unwrap().as_regex().is_match("42"));

    assert!(read_err(r#"#"abc"#).is_eof());
    let err = read_err(r#"#"(""#);
    assert!(err.is_unexpected());
    assert!(err.source().is_some());
}

#[test]
fn test_regex_size_limit() {
    let options = Options::new().with_regex_size_limit(16);
    let err = read_str_custom(&ns(), r#"#"\w{100}""#, options).unwrap_err();
    assert!(err.source().is_some());
}

#[test]
fn test_deref() {
    assert_eq!(read("@a"), read("(rouge.core/deref a)"));
    let options = Options::new().with_deref_symbol("my/deref");
    assert_eq!(
        read_str_custom(&ns(), "@a", options).unwrap(),
        read("(my/deref a)")
    );
}

#[test]
fn test_metadata() {
    let form = read("^:a ^:b sym");
    assert_eq!(form, Form::symbol("sym"));
    let expected = Map::from_iter(vec![
        (Form::keyword("a"), Form::Bool(true)),
        (Form::keyword("b"), Form::Bool(true)),
    ]);
    assert_eq!(form.meta(), Some(&expected));

    let form = read("^String [1]");
    let expected = Map::from_iter(vec![(Form::symbol("String"), Form::Bool(true))]);
    assert_eq!(form.meta(), Some(&expected));

    let form = read(r#"^"String" (f)"#);
    let expected = Map::from_iter(vec![(Form::keyword("tag"), Form::string("String"))]);
    assert_eq!(form.meta(), Some(&expected));

    let form = read("^{:doc \"d\" :a 1} {}");
    assert_eq!(form.meta().unwrap().get(&Form::keyword("a")), Some(&Form::from(1)));
}

#[test]
fn test_metadata_merge_prefers_outer() {
    let form = read("^{:a 1} ^{:a 2 :b 2} x");
    let meta = form.meta().unwrap();
    assert_eq!(meta.get(&Form::keyword("a")), Some(&Form::from(1)));
    assert_eq!(meta.get(&Form::keyword("b")), Some(&Form::from(2)));
}

#[test]
fn test_metadata_failures() {
    let err = read_err("^:a 1");
    assert!(err.to_string().starts_with("metadata can not be applied to number"));
    assert!(read_err("^:a ()").is_unexpected());
    assert!(read_err("^:a :b").is_unexpected());
    let err = read_err("^1 x");
    assert!(err.to_string().starts_with("metadata must be"));
    assert!(read_err("^:a").is_eof());
}

#[test]
fn test_syntax_quote_atoms() {
    assert_eq!(read("`1"), read("(quote 1)"));
    assert_eq!(read("`:a"), read("(quote :a)"));
    assert_eq!(read("`\"s\""), read("(quote \"s\")"));
    assert_eq!(read("`nil"), read("(quote nil)"));
}

#[test]
fn test_syntax_quote_symbols() {
    assert_eq!(read("`map"), read("(quote rouge.core/map)"));
    assert_eq!(read("`x"), read("(quote user/x)"));
    assert_eq!(read("`unknown"), read("(quote user/unknown)"));
    assert_eq!(read("`other/y"), read("(quote other/y)"));
    assert_eq!(read("`&"), read("(quote &)"));
}

#[test]
fn test_syntax_quote_sequences() {
    assert_eq!(
        read("`(1 ~@(list 2 3) 4)"),
        read("(seq (concat (list (quote 1)) (list 2 3) (list (quote 4))))")
    );
    assert_eq!(
        read("`(inc ~x)"),
        read("(list (quote rouge.core/inc) x)")
    );
    assert_eq!(
        read("`[1 ~x]"),
        read("(apply vector (list (quote 1) x))")
    );
    assert_eq!(read("`[~@xs]"), read("(apply vector xs)"));
    assert_eq!(
        read("`#{~x}"),
        read("(apply hash-set (list x))")
    );
    assert_eq!(read("`()"), read("(concat)"));
    assert_eq!(
        read("`{:a ~x}"),
        Form::map(vec![(Form::quote(Form::keyword("a")), Form::symbol("x"))])
    );
}

#[test]
fn test_syntax_quote_nested() {
    // The inner template is expanded first; the outer one rebuilds it.
    assert_eq!(
        read("``a"),
        read("(list (quote user/quote) (quote user/a))")
    );
    assert_eq!(read("``~~x"), Form::symbol("x"));
}

fn gensyms(form: &Form) -> Vec<String> {
    let pattern = Regex::new(r"a__\d+__auto__").unwrap();
    pattern
        .find_iter(&form.to_string())
        .map(|m| m.as_str().to_owned())
        .collect()
}

#[test]
fn test_gensyms_stable_within_one_syntax_quote() {
    let form = read("`(let [a# 1] (f a# a#))");
    let names = gensyms(&form);
    assert_eq!(names.len(), 3);
    assert!(names.iter().all(|name| name == &names[0]));
}

#[test]
fn test_gensyms_differ_across_syntax_quotes() {
    let first = gensyms(&read("`a#"));
    let second = gensyms(&read("`a#"));
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_ne!(first[0], second[0]);
}

#[test]
fn test_gensyms_nested_syntax_quote_has_own_scope() {
    let names = gensyms(&read("`(a# `(a# a#) a#)"));
    assert_eq!(names.len(), 4);
    assert_eq!(names[0], names[3]);
    assert_eq!(names[1], names[2]);
    assert_ne!(names[0], names[1]);
}

#[test]
fn test_unquote_outside_syntax_quote() {
    for src in &["~x", "~@xs", "(a ~b)", "`~~x", "`^{:a ~x} y"] {
        let err = read_err(src);
        assert!(err.is_unexpected(), "{}", src);
        assert!(err.to_string().starts_with("unquote outside"), "{}: {}", src, err);
    }
}

#[test]
fn test_unquote_reads_at_sign_raw() {
    assert_eq!(read("`(a ~ @b)"), read("(list (quote user/a) (rouge.core/deref b))"));
}

#[test]
fn test_depth_limit() {
    let options = || Options::new().with_max_depth(3);
    assert!(read_str_custom(&ns(), "(((1)))", options()).is_ok());
    let err = read_str_custom(&ns(), "((((1))))", options()).unwrap_err();
    assert!(err.to_string().starts_with("recursion limit exceeded"));
    assert!(read_str_custom(&ns(), "''''x", options()).is_err());

    let deep = "(".repeat(100_000);
    assert!(read_str(&ns(), &deep).is_err());
}

#[test]
fn test_trailing_characters() {
    assert!(read_str(&ns(), "1 ; comment\n").is_ok());
    let err = read_err("1 2");
    assert!(err.to_string().starts_with("trailing characters"));
    assert!(read_err("").is_eof());
}

#[test]
fn test_error_location() {
    let err = read_err("(1\n  2\n  1abc)");
    let location = err.location().unwrap();
    assert_eq!(location.line(), 3);
    assert_eq!(location.column(), 3);
    assert!(err.to_string().contains("at line 3"));
    assert_eq!(err.excerpt(), Some("around:    1abc\n           ^"));
}

#[test]
fn test_reader_iterator_stops_after_error() {
    let table = ns();
    let mut reader = Reader::new(&table, "1 ) 2");
    assert_eq!(reader.next().unwrap().unwrap(), Form::from(1));
    assert!(reader.next().unwrap().is_err());
    assert!(reader.next().is_none());
}

#[test]
fn test_read_all() {
    let forms = read_all(&ns(), "(def a 1)\n; comment\n[a] :k").unwrap();
    assert_eq!(forms.len(), 3);
    assert!(read_all(&ns(), "").unwrap().is_empty());
    assert!(read_all(&ns(), "1 (").is_err());
}
