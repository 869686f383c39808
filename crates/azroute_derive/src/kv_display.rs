use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Ident, LitStr, parse_macro_input, spanned::Spanned};

/// How a field is rendered on the right-hand side of `key = value`.
#[derive(Debug, PartialEq)]
enum Render {
    Display,
    Path,
}

impl Render {
    fn parse(raw: &str, span: Span) -> syn::Result<Self> {
        match raw {
            "display" => Ok(Self::Display),
            "path" => Ok(Self::Path),
            other => Err(syn::Error::new(span, format!("unknown kv fmt `{other}`"))),
        }
    }

    fn of(field: &Field) -> syn::Result<Self> {
        let mut render = Self::Display;
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("kv")) {
            attr.parse_nested_meta(|meta| {
                if !meta.path.is_ident("fmt") {
                    return Err(meta.error("expected fmt"));
                }
                let lit: LitStr = meta.value()?.parse()?;
                render = Self::parse(&lit.value(), lit.span())?;
                Ok(())
            })?;
        }
        Ok(render)
    }

    fn value(&self, ident: &Ident) -> TokenStream2 {
        match self {
            Self::Display => quote! { &self.#ident },
            Self::Path => quote! { &self.#ident.display() },
        }
    }
}

/// Multi-line `Display` used when logging options and inputs:
/// one tab-indented `key = value` line per field, keys padded to the same width.
pub fn derive_kv_display_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_ident = &input.ident;
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(input.span(), "KvDisplay needs a struct"));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new(input.span(), "KvDisplay needs named fields"));
    };

    let mut rows: Vec<(String, TokenStream2)> = Vec::new();
    for field in &fields.named {
        let Some(ident) = &field.ident else {
            continue;
        };
        let render = Render::of(field)?;
        rows.push((ident.to_string(), render.value(ident)));
    }

    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let template: String = rows
        .iter()
        .map(|(key, _)| format!("\n\t{key:<width$} = {{}}"))
        .collect();
    let template_lit = LitStr::new(&template, Span::call_site());
    let values: Vec<&TokenStream2> = rows.iter().map(|(_, value)| value).collect();

    Ok(quote! {
        impl std::fmt::Display for #struct_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, #template_lit, #(#values),*)
            }
        }
    })
}
