/// A form as written inside `form!`, before code generation.
#[derive(Debug)]
pub enum Form {
    Nil,
    Bool(bool),
    Literal(proc_macro2::Literal),
    Negated(proc_macro2::Literal),
    Symbol(String),
    Keyword(String),
    Unquoted(proc_macro2::TokenTree),
    List(Vec<Form>),
    Vector(Vec<Form>),
    Map(Vec<(Form, Form)>),
    Set(Vec<Form>),
}
