use rouge_reader::{read_str, Form, Namespace, Reader, Table, VarNotFound, VarRef};
use rouge_reader_macros::form;

fn core() -> Table {
    Table::new("user")
        .refer("rouge.core", "list")
        .refer("rouge.core", "map")
        .refer("rouge.core", "inc")
        .intern("helper")
}

fn read(src: &str) -> Form {
    read_str(&core(), src).unwrap()
}

#[test]
fn test_self_quoting() {
    assert_eq!(read("`1"), form!((quote 1)));
    assert_eq!(read("`:a"), form!((quote :a)));
    assert_eq!(read("`\"s\""), form!((quote "s")));
}

#[test]
fn test_qualification() {
    assert_eq!(read("`map"), form!((quote #"rouge.core/map")));
    assert_eq!(read("`helper"), form!((quote #"user/helper")));
    assert_eq!(read("`missing"), form!((quote #"user/missing")));
    assert_eq!(read("`str/join"), form!((quote #"str/join")));
    assert_eq!(read("`.toString"), form!((quote #".toString")));
}

#[test]
fn test_unquote_splicing() {
    assert_eq!(
        read("`(1 ~@(list 2 3) 4)"),
        form!((seq (concat (list (quote 1)) (list 2 3) (list (quote 4)))))
    );
    assert_eq!(
        read("`(map inc ~xs)"),
        form!((list (quote #"rouge.core/map") (quote #"rouge.core/inc") xs))
    );
    assert_eq!(
        read("`[~a ~@b]"),
        form!((apply vector (concat (list a) b)))
    );
}

#[test]
fn test_macro_template() {
    let form = read("`(if ~test nil (do ~@body))");
    assert_eq!(
        form,
        form!((list
               (quote #"user/if")
               test
               (quote nil)
               (seq (concat (list (quote #"user/do")) body))))
    );
}

#[test]
fn test_gensym_naming() {
    let form = read("`(let [x# 1] x#)");
    let text = form.to_string();
    let start = text.find("x__").expect("no gensym in expansion");
    let name: String = text[start..]
        .chars()
        .take_while(|c| !c.is_whitespace() && *c != ')')
        .collect();
    assert!(name.ends_with("__auto__"), "{}", name);
    assert_eq!(text.matches(name.as_str()).count(), 2);
}

/// A namespace that resolves every name to a fixed namespace.
struct Everything;

impl Namespace for Everything {
    fn name(&self) -> &str {
        "scratch"
    }

    fn resolve(&self, name: &str) -> Result<VarRef, VarNotFound> {
        if name.starts_with('?') {
            return Err(VarNotFound {
                namespace: "scratch".into(),
                name: name.into(),
            });
        }
        Ok(VarRef {
            ns: "everything".into(),
            name: name.into(),
        })
    }
}

#[test]
fn test_custom_namespace() {
    let ns = Everything;
    let mut reader = Reader::new(&ns, "`foo `?bar");
    assert_eq!(
        reader.read().unwrap(),
        Some(form!((quote #"everything/foo")))
    );
    assert_eq!(
        reader.read().unwrap(),
        Some(form!((quote #"scratch/?bar")))
    );
    assert_eq!(reader.read().unwrap(), None);
}
