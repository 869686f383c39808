use syn::{Attribute, LitStr, Path, Type, TypePath};

const USAGE_COLUMN: usize = 30;

/// Settings collected from `#[cli(...)]` on one options field.
#[derive(Default)]
pub struct CliAttr {
    pub long: Option<String>,
    pub value: Option<String>,
    pub help: Option<String>,
    pub parse_with: Option<Path>,
}

impl CliAttr {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("cli")) {
            attr.parse_nested_meta(|meta| {
                let slot = if meta.path.is_ident("long") {
                    &mut out.long
                } else if meta.path.is_ident("value") {
                    &mut out.value
                } else if meta.path.is_ident("help") {
                    &mut out.help
                } else if meta.path.is_ident("parse_with") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.parse_with = Some(lit.parse()?);
                    return Ok(());
                } else {
                    return Err(meta.error("expected one of long/value/help/parse_with"));
                };
                let lit: LitStr = meta.value()?.parse()?;
                *slot = Some(lit.value());
                Ok(())
            })?;
        }
        Ok(out)
    }
}

/// Reads the `name = "..."` / `alias = "..."` pairs of `#[cli(...)]` on an enum variant.
pub fn variant_names(attrs: &[Attribute], default: String) -> syn::Result<(String, Vec<String>)> {
    let mut canonical = default;
    let mut aliases = Vec::new();
    for attr in attrs.iter().filter(|a| a.path().is_ident("cli")) {
        attr.parse_nested_meta(|meta| {
            let lit: LitStr = meta.value()?.parse()?;
            if meta.path.is_ident("name") {
                canonical = lit.value();
            } else if meta.path.is_ident("alias") {
                aliases.push(lit.value());
            } else {
                return Err(meta.error("expected name/alias"));
            }
            Ok(())
        })?;
    }
    Ok((canonical, aliases))
}

pub fn is_bool(ty: &Type) -> bool {
    let Type::Path(TypePath { qself: None, path }) = ty else {
        return false;
    };
    path.segments.len() == 1 && path.segments[0].ident == "bool"
}

pub fn to_kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch == '_' {
            out.push('-');
        } else {
            out.push(ch);
        }
    }
    out
}

/// One aligned line of `--help` output.
pub fn usage_line(left: &str, help: Option<&str>) -> String {
    match help {
        Some(help) if left.len() < USAGE_COLUMN => {
            format!("  {left:<width$}{help}\n", width = USAGE_COLUMN)
        }
        Some(help) => format!("  {left}\n  {:<width$}{help}\n", "", width = USAGE_COLUMN),
        None => format!("  {left}\n"),
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::{CliAttr, is_bool, to_kebab_case, usage_line, variant_names};

    #[test]
    fn to_kebab_case_handles_pascal_and_snake_names() {
        assert_eq!(to_kebab_case("LogFormat"), "log-format");
        assert_eq!(to_kebab_case("exact_threshold"), "exact-threshold");
        assert_eq!(to_kebab_case("X"), "x");
    }

    #[test]
    fn is_bool_only_matches_plain_bool() {
        let plain: syn::Type = parse_quote!(bool);
        let wrapped: syn::Type = parse_quote!(Option<bool>);
        let other: syn::Type = parse_quote!(String);
        assert!(is_bool(&plain));
        assert!(!is_bool(&wrapped));
        assert!(!is_bool(&other));
    }

    #[test]
    fn cli_attr_collects_all_keys() {
        let field: syn::Field = parse_quote! {
            #[cli(long = "log-level", value = "<level>", help = "Log level", parse_with = "LogLevel::parse")]
            pub log_level: LogLevel
        };
        let attr = CliAttr::parse(&field.attrs).expect("attr parses");
        assert_eq!(attr.long.as_deref(), Some("log-level"));
        assert_eq!(attr.value.as_deref(), Some("<level>"));
        assert_eq!(attr.help.as_deref(), Some("Log level"));
        assert!(attr.parse_with.is_some());
    }

    #[test]
    fn cli_attr_rejects_unknown_keys() {
        let field: syn::Field = parse_quote! {
            #[cli(short = "l")]
            pub level: u8
        };
        assert!(CliAttr::parse(&field.attrs).is_err());
    }

    #[test]
    fn variant_names_reads_name_and_aliases() {
        let variant: syn::Variant = parse_quote! {
            #[cli(name = "warn", alias = "warning")]
            Warning
        };
        let (name, aliases) =
            variant_names(&variant.attrs, "warning".to_string()).expect("names parse");
        assert_eq!(name, "warn");
        assert_eq!(aliases, vec!["warning".to_string()]);
    }

    #[test]
    fn usage_line_aligns_help_text() {
        let line = usage_line("--input <path>", Some("Point file"));
        assert_eq!(line, format!("  {:<30}Point file\n", "--input <path>"));
        assert_eq!(usage_line("--help", None), "  --help\n");
    }
}
