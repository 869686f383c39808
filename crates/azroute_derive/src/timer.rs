use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, LitStr, ReturnType, parse_macro_input};

pub fn timer_inner(attr: TokenStream, item: TokenStream) -> TokenStream {
    let label = if attr.is_empty() {
        None
    } else {
        Some(parse_macro_input!(attr as LitStr))
    };
    let func = parse_macro_input!(item as ItemFn);

    if let Some(asyncness) = &func.sig.asyncness {
        return syn::Error::new_spanned(asyncness, "#[timer] does not support async fns")
            .to_compile_error()
            .into();
    }

    let label = label
        .unwrap_or_else(|| LitStr::new(&func.sig.ident.to_string(), func.sig.ident.span()));
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = func;
    let ret = match &sig.output {
        ReturnType::Default => quote! { -> () },
        ReturnType::Type(arrow, ty) => quote! { #arrow #ty },
    };

    quote! {
        #(#attrs)*
        #vis #sig {
            let __timer_started = std::time::Instant::now();
            #[allow(clippy::redundant_closure_call)]
            let __timer_out = (|| #ret #block)();
            log::info!(
                "{}: elapsed={:.3}s",
                #label,
                __timer_started.elapsed().as_secs_f64()
            );
            __timer_out
        }
    }
    .into()
}
