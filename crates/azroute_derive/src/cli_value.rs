use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

use crate::attrs;

/// Unit-variant enum <-> kebab-case CLI value, with optional `#[cli(name, alias)]`.
pub fn derive_cli_value_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn option_name(input: &DeriveInput) -> syn::Result<String> {
    let mut option = attrs::to_kebab_case(&input.ident.to_string());
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("cli_value")) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("option") {
                return Err(meta.error("expected option = \"...\""));
            }
            let lit: LitStr = meta.value()?.parse()?;
            option = lit.value();
            Ok(())
        })?;
    }
    Ok(option)
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let enum_ident = &input.ident;
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new(input.span(), "CliValue needs an enum"));
    };
    let option = option_name(input)?;

    let mut parse_arms = Vec::new();
    let mut display_arms = Vec::new();
    let mut canonical_names = Vec::new();

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new(variant.span(), "CliValue needs unit variants"));
        }
        let ident = &variant.ident;
        let (canonical, aliases) =
            attrs::variant_names(&variant.attrs, attrs::to_kebab_case(&ident.to_string()))?;
        let accepted = std::iter::once(&canonical)
            .chain(aliases.iter())
            .map(|v| LitStr::new(v, Span::call_site()))
            .collect::<Vec<_>>();
        let canonical_lit = LitStr::new(&canonical, Span::call_site());

        parse_arms.push(quote! { #(#accepted)|* => Ok(Self::#ident), });
        display_arms.push(quote! { Self::#ident => #canonical_lit, });
        canonical_names.push(canonical);
    }

    let expected_lit = LitStr::new(&canonical_names.join("|"), Span::call_site());
    let option_lit = LitStr::new(&option, Span::call_site());

    Ok(quote! {
        impl #enum_ident {
            /// Accepted values joined with `|`.
            pub const EXPECTED: &'static str = #expected_lit;

            pub fn parse(raw: &str) -> crate::Result<Self> {
                match raw.trim().to_ascii_lowercase().as_str() {
                    #(#parse_arms)*
                    _ => Err(crate::Error::invalid_input(format!(
                        "Invalid value for --{}: {} (expected {})",
                        #option_lit,
                        raw,
                        Self::EXPECTED,
                    ))),
                }
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    #(#display_arms)*
                }
            }
        }

        impl std::fmt::Display for #enum_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    })
}
