use crate::form::Form;

use proc_macro2::TokenStream;
use quote::{quote, ToTokens};

fn elements(elements: &[Form]) -> TokenStream {
    quote! {{
        let elements: ::std::vec::Vec<::rouge_reader::Form> = ::std::vec![#(#elements),*];
        elements
    }}
}

impl ToTokens for Form {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let expanded = match self {
            Form::Nil => quote! { ::rouge_reader::Form::Nil },
            Form::Bool(value) => quote! { ::rouge_reader::Form::Bool(#value) },
            Form::Literal(lit) => quote! { ::rouge_reader::Form::from(#lit) },
            Form::Negated(lit) => quote! { ::rouge_reader::Form::from(-#lit) },
            Form::Symbol(name) => quote! { ::rouge_reader::Form::symbol(#name) },
            Form::Keyword(name) => quote! { ::rouge_reader::Form::keyword(#name) },
            Form::Unquoted(tt) => quote! { ::rouge_reader::Form::from(#tt) },
            Form::List(items) => {
                let items = elements(items);
                quote! { ::rouge_reader::Form::list(#items) }
            }
            Form::Vector(items) => {
                let items = elements(items);
                quote! { ::rouge_reader::Form::vector(#items) }
            }
            Form::Set(items) => {
                let items = elements(items);
                quote! { ::rouge_reader::Form::set(#items) }
            }
            Form::Map(entries) => {
                let keys = entries.iter().map(|(k, _)| k);
                let values = entries.iter().map(|(_, v)| v);
                quote! {{
                    let entries: ::std::vec::Vec<(::rouge_reader::Form, ::rouge_reader::Form)> =
                        ::std::vec![#((#keys, #values)),*];
                    ::rouge_reader::Form::map(entries)
                }}
            }
        };
        tokens.extend(expanded);
    }
}

pub fn generate(form: Form) -> TokenStream {
    form.into_token_stream()
}
