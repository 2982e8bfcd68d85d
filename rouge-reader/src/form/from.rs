use std::borrow::Cow;

use num_bigint::BigInt;

use crate::{Cons, Form, List, Map, Number, Set, Symbol, Var, Vector};

use super::Regex;

macro_rules! impl_from_number {
    (
        $($ty:ty),*
    ) => {
        $(
            impl From<$ty> for Form {
                #[inline]
                fn from(n: $ty) -> Self {
                    Form::Number(Number::from(n))
                }
            }
        )*
    };
}

impl_from_number!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64, BigInt);

impl From<&str> for Form {
    #[inline]
    fn from(s: &str) -> Self {
        Form::String(s.into())
    }
}

impl<'a> From<Cow<'a, str>> for Form {
    #[inline]
    fn from(s: Cow<'a, str>) -> Self {
        Form::from(s.as_ref())
    }
}

impl From<String> for Form {
    #[inline]
    fn from(s: String) -> Self {
        Form::String(s.into_boxed_str())
    }
}

impl From<bool> for Form {
    #[inline]
    fn from(v: bool) -> Self {
        Form::Bool(v)
    }
}

impl From<Number> for Form {
    fn from(n: Number) -> Self {
        Form::Number(n)
    }
}

impl From<Symbol> for Form {
    fn from(sym: Symbol) -> Self {
        Form::Symbol(sym)
    }
}

impl From<List> for Form {
    fn from(list: List) -> Self {
        Form::List(list)
    }
}

impl From<Cons> for Form {
    fn from(cell: Cons) -> Self {
        Form::List(List::Cons(cell))
    }
}

impl From<Vector> for Form {
    fn from(v: Vector) -> Self {
        Form::Vector(v)
    }
}

impl From<Map> for Form {
    fn from(m: Map) -> Self {
        Form::Map(m)
    }
}

impl From<Set> for Form {
    fn from(s: Set) -> Self {
        Form::Set(s)
    }
}

impl From<Var> for Form {
    fn from(var: Var) -> Self {
        Form::Var(Box::new(var))
    }
}

impl From<Regex> for Form {
    fn from(re: Regex) -> Self {
        Form::Regex(re)
    }
}

impl From<regex::Regex> for Form {
    fn from(re: regex::Regex) -> Self {
        Form::Regex(Regex::new(re))
    }
}

impl<T: Into<Form>> From<Option<T>> for Form {
    /// `None` becomes `nil`.
    fn from(v: Option<T>) -> Self {
        v.map_or(Form::Nil, Into::into)
    }
}
