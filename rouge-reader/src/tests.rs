//! Basic sanity checking on the `Form` type.
//!
//! These tests primarily test the round-trip (i.e converting to text and back)
//! behavior of `Form` using quickcheck.

use quickcheck::{Arbitrary, Gen, QuickCheck};
use quickcheck_macros::quickcheck;
use rand::Rng;

use num_bigint::BigInt;

use crate::{read_str, to_string, to_vec, Form, Number, Table};

enum FormKind {
    Nil,
    Bool,
    Number,
    String,
    Symbol,
    Keyword,
    Regex,
    List,
    Vector,
    Map,
    Set,
}

fn gen_form(g: &mut Gen, depth: usize) -> Form {
    use FormKind::*;
    let choices = if depth >= g.size() {
        &[Nil, Bool, Number, String, Symbol, Keyword, Regex] as &[FormKind]
    } else {
        &[
            Nil, Bool, Number, String, Symbol, Keyword, Regex, List, Vector, Map, Set,
        ]
    };
    match g.choose(choices).unwrap() {
        Nil => Form::Nil,
        Bool => Form::Bool(Arbitrary::arbitrary(g)),
        Number => Form::Number(Arbitrary::arbitrary(g)),
        String => {
            let choices = ["", "foo", "\"", "\t", "\x01", "a\\b", "\x1b[0m", "λ x", "; no comment"];
            Form::string(*g.choose(&choices).unwrap())
        }
        Symbol => {
            let choices = [
                "foo", "a-symbol", "$?!", "+", "+foo", "-", "-foo", "..", ".foo", "/",
                "rouge.core/map", "a.b/c", "%1", "<=", "x#",
            ];
            Form::symbol(*g.choose(&choices).unwrap())
        }
        Keyword => {
            let choices = ["foo", "a-keyword", "ns/kw", "with space", "", "\"q\""];
            Form::keyword(*g.choose(&choices).unwrap())
        }
        Regex => {
            let choices = ["[a-z]+", r#"a\"b"#, r"\d+\s*", "x|y", r"\\"];
            let pattern = *g.choose(&choices).unwrap();
            Form::from(regex::Regex::new(pattern).unwrap())
        }
        List => Form::list(gen_elements(g, depth)),
        Vector => Form::vector(gen_elements(g, depth)),
        Set => Form::set(gen_elements(g, depth)),
        Map => {
            let keys = gen_elements(g, depth);
            let values = gen_elements(g, depth);
            Form::map(keys.into_iter().zip(values))
        }
    }
}

fn gen_elements(g: &mut Gen, depth: usize) -> Vec<Form> {
    let len = usize::arbitrary(g) % (g.size() + 1);
    (0..len).map(|_| gen_form(g, depth + 1)).collect()
}

impl Arbitrary for Form {
    fn arbitrary(g: &mut Gen) -> Self {
        gen_form(g, 0)
    }
}

enum NumberKind {
    I64,
    Bignum,
    F64,
}

impl Arbitrary for Number {
    fn arbitrary(g: &mut Gen) -> Self {
        use NumberKind::*;
        let choices = [I64, Bignum, F64];
        // We do not use the `Arbitrary` implementations for the
        // numbers, as we want to cover the whole range.
        let mut rng = rand::thread_rng();
        match g.choose(&choices).unwrap() {
            I64 => Number::from(rng.gen::<i64>()),
            Bignum => {
                let n = BigInt::from(rng.gen::<i64>()) * BigInt::from(rng.gen::<u64>())
                    + BigInt::from(rng.gen::<u32>());
                Number::from(n)
            }
            F64 => {
                let scale = *g.choose(&[-1e300, -1.0, 1e-7, 1.0, 1e20]).unwrap();
                Number::from(rng.gen::<f64>() * scale)
            }
        }
    }
}

fn user() -> Table {
    Table::new("user")
}

#[quickcheck]
fn print_read_number(input: Number) -> bool {
    let string = to_string(&Form::from(input.clone())).expect("conversion to string failed");
    let read = read_str(&user(), &string).expect("reading failed");
    let output = read.as_number().expect("read as a non-number");
    input == *output
}

#[test]
fn print_number() {
    #[allow(clippy::unreadable_literal)]
    let form = Form::from(Number::from(-11.287888289184039));
    let bytes = to_vec(&form).expect("conversion to bytes failed");
    assert_eq!(std::str::from_utf8(&bytes).unwrap(), "-11.287888289184039");
}

#[test]
fn print_read_roundtrip() {
    fn prop(input: Form) -> bool {
        let string = to_string(&input).expect("conversion to string failed");
        let output = read_str(&user(), &string).expect("reading failed");
        input == output
    }
    QuickCheck::new()
        .tests(1000)
        .max_tests(2000)
        .gen(Gen::new(4))
        .quickcheck(prop as fn(Form) -> bool);
}

#[test]
fn display_matches_printer() {
    fn prop(input: Form) -> bool {
        input.to_string() == to_string(&input).expect("conversion to string failed")
    }
    QuickCheck::new()
        .gen(Gen::new(4))
        .quickcheck(prop as fn(Form) -> bool);
}

#[test]
fn test_list_index() {
    let list = Form::list(vec![23, 24, 25]);
    assert_eq!(list[0], Form::from(23));
    assert_eq!(list[1], Form::from(24));
    assert_eq!(list[2], Form::from(25));
    assert_eq!(list[3], Form::Nil);
}

#[test]
fn test_map_index() {
    let map = Form::map(vec![
        (Form::keyword("foo"), 42),
        (Form::keyword("bar"), 23),
        (Form::symbol("baz"), 127),
    ]);
    assert_eq!(map["foo"], Form::from(42));
    assert_eq!(map["bar"], Form::from(23));
    assert_eq!(map["baz"], Form::Nil);
    assert_eq!(map[&Form::symbol("baz")], Form::from(127));
}

#[test]
fn test_unidiomatic_space() {
    let nested = Form::list(vec![
        Form::symbol("feedback"),
        Form::list(vec![Form::symbol("nested")]),
    ]);
    let form = read_str(&user(), "(feedback(nested))").expect("failed to read");
    assert_eq!(form, nested);
    let form = read_str(&user(), "feedback; some comment").expect("failed to read");
    assert_eq!(form, Form::symbol("feedback"));
}

#[test]
fn test_long_list_drop() {
    let list = Form::list((0..1_000_000).map(Form::from));
    drop(list.clone());
    drop(list);
}
