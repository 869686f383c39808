use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

use crate::attrs::{self, CliAttr};

/// Generates `split_arg`, `apply_cli_option` and `cli_usage` for an options struct.
///
/// Only fields carrying `#[cli(long = "...")]` take part. `bool` fields become flags
/// accepting `--name`, `--name=<bool>` and `--no-name`.
pub fn derive_cli_options_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_ident = &input.ident;
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(input.span(), "CliOptions needs a struct"));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new(input.span(), "CliOptions needs named fields"));
    };

    let mut arms = Vec::new();
    let mut usage = String::new();

    for field in &fields.named {
        let cli = CliAttr::parse(&field.attrs)?;
        let (Some(ident), Some(long)) = (&field.ident, cli.long.as_deref()) else {
            continue;
        };
        let long_lit = LitStr::new(long, Span::call_site());
        let help = cli.help.as_deref();

        if attrs::is_bool(&field.ty) {
            let negated = format!("no-{long}");
            let negated_lit = LitStr::new(&negated, Span::call_site());
            arms.push(quote! {
                #long_lit => {
                    self.#ident = match value {
                        Some(raw) => crate::options::parse_bool(name, &raw)?,
                        None => true,
                    };
                    Ok(true)
                }
                #negated_lit => {
                    if value.is_some() {
                        return Err(crate::Error::invalid_input(format!(
                            "Flag --{name} does not take a value"
                        )));
                    }
                    self.#ident = false;
                    Ok(true)
                }
            });
            usage.push_str(&attrs::usage_line(&format!("--{long}[=<bool>]"), help));
            usage.push_str(&attrs::usage_line(&format!("--{negated}"), None));
            continue;
        }

        let ty = &field.ty;
        let parse_expr = match &cli.parse_with {
            Some(path) => quote! { #path(&raw)? },
            None => quote! {
                raw.parse::<#ty>().map_err(|e| {
                    crate::Error::invalid_input(format!("Invalid value for --{name}: {raw} ({e})"))
                })?
            },
        };
        arms.push(quote! {
            #long_lit => {
                let raw = value.ok_or_else(|| {
                    crate::Error::invalid_input(format!("Missing value for --{name}"))
                })?;
                self.#ident = #parse_expr;
                Ok(true)
            }
        });
        let hint = cli.value.as_deref().unwrap_or("<value>");
        usage.push_str(&attrs::usage_line(&format!("--{long} {hint}"), help));
    }
    usage.push_str(&attrs::usage_line("--help", Some("Print this message")));
    let usage_lit = LitStr::new(&usage, Span::call_site());

    Ok(quote! {
        impl #struct_ident {
            fn split_arg(
                raw_name: &str,
                args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
            ) -> (String, Option<String>) {
                if let Some((name, value)) = raw_name.split_once('=') {
                    return (name.to_string(), Some(value.to_string()));
                }
                let value = args.next_if(|next| !next.starts_with("--"));
                (raw_name.to_string(), value)
            }

            fn apply_cli_option(
                &mut self,
                name: &str,
                value: Option<String>,
            ) -> crate::Result<bool> {
                match name {
                    #(#arms)*
                    _ => Ok(false),
                }
            }

            pub fn cli_usage() -> &'static str {
                #usage_lit
            }
        }
    })
}
