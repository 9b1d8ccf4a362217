use proc_macro::TokenStream;
use quote::{format_ident, quote};
use std::collections::HashMap;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Meta, Token, Type};

/// Helper enum for parsed attribute values
enum MetaValue {
    Str(String),
    Expr(syn::Expr),
    Flag,
}

/// Check if the struct has #[allow(missing_docs)] attribute
fn is_allow_missing_docs(attr: &Attribute) -> bool {
    attr.path().is_ident("allow")
        && attr
            .parse_args::<syn::Ident>()
            .map(|ident| ident == "missing_docs")
            .unwrap_or(false)
}

/// Defines a configuration record loaded from environment variables
///
/// ```ignore
/// define_config! {
///     #[derive(Debug, Clone)]
///     pub struct PollingConfig {
///         #[field(env = "POLL_SECONDS", doc = "Seconds between polls", default = 60u64, validate = positive)]
///         pub seconds: u64,
///
///         #[field(env = "POLL_TAG", doc = "Optional tag", optional, example = "nightly")]
///         pub tag: Option<String>,
///     }
/// }
/// ```
#[proc_macro]
pub fn define_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_config(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn generate_config(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let vis = &input.vis;
    let struct_attrs = &input.attrs;

    let allow_missing_docs = struct_attrs.iter().any(is_allow_missing_docs);

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "define_config! only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "define_config! only supports structs",
            ));
        }
    };

    let mut field_defs = Vec::new();
    let mut load_fields = Vec::new();
    let mut constructors = Vec::new();

    for field in fields {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
        let field_vis = &field.vis;
        let field_type = &field.ty;

        let config = parse_field_config(&field.attrs, allow_missing_docs)?;

        // cfg gates the field everywhere; doc comments only land on the definition
        let cfg_attrs: Vec<&Attribute> = field
            .attrs
            .iter()
            .filter(|attr| attr.path().is_ident("cfg"))
            .collect();
        let doc_attrs: Vec<&Attribute> = field
            .attrs
            .iter()
            .filter(|attr| attr.path().is_ident("doc"))
            .collect();

        field_defs.push(quote! {
            #(#doc_attrs)*
            #(#cfg_attrs)*
            #field_vis #field_name: ::atin_config::ConfigField<#field_type>
        });

        let env_var = &config.env_var;
        let description = &config.description;

        match config.mode {
            FieldMode::Default(ref default_expr) => {
                let default_ident = format_ident!("{}_default", field_name);
                let check = config.validate.as_ref().map(|path| {
                    quote! {
                        #(#cfg_attrs)*
                        let #field_name = builder.validated(#env_var, #field_name, |value| #path(value));
                    }
                });

                load_fields.push(quote! {
                    #(#cfg_attrs)*
                    let #default_ident: #field_type = #default_expr;
                    #(#cfg_attrs)*
                    let #field_name = builder.or_default::<#field_type>(
                        #env_var,
                        #description,
                        ::core::clone::Clone::clone(&#default_ident),
                    );
                    #check
                });
                constructors.push(quote! {
                    #(#cfg_attrs)*
                    #field_name: ::atin_config::ConfigField::new(
                        #env_var,
                        #description,
                        #default_ident,
                        #field_name,
                    )
                });
            }
            FieldMode::Optional => {
                if config.validate.is_some() {
                    return Err(syn::Error::new_spanned(
                        field,
                        "validate is only supported on fields with a default",
                    ));
                }
                let inner_type = extract_option_type(field_type).ok_or_else(|| {
                    syn::Error::new_spanned(field, "optional fields must have type Option<T>")
                })?;
                let example = match &config.example {
                    Some(example) => quote! { ::core::option::Option::Some(#example) },
                    None => quote! { ::core::option::Option::None },
                };

                load_fields.push(quote! {
                    #(#cfg_attrs)*
                    let #field_name = builder.optional::<#inner_type>(
                        #env_var,
                        #description,
                        #example,
                    );
                });
                constructors.push(quote! {
                    #(#cfg_attrs)*
                    #field_name: ::atin_config::ConfigField::new(
                        #env_var,
                        #description,
                        ::core::option::Option::None,
                        #field_name,
                    )
                });
            }
        }
    }

    let filtered_attrs: Vec<&Attribute> = struct_attrs
        .iter()
        .filter(|attr| !is_allow_missing_docs(attr))
        .collect();

    let struct_def = quote! {
        #(#filtered_attrs)*
        #vis struct #struct_name {
            #(#field_defs),*
        }
    };

    let load_impl = quote! {
        impl ::atin_config::Load for #struct_name {
            fn load_fields(builder: &mut ::atin_config::ConfigBuilder) -> Self {
                #(#load_fields)*

                Self {
                    #(#constructors),*
                }
            }
        }
    };

    Ok(quote! {
        #struct_def
        #load_impl
    })
}

#[derive(Debug)]
struct FieldConfig {
    env_var: String,
    description: String,
    example: Option<syn::Expr>,
    validate: Option<syn::Path>,
    mode: FieldMode,
}

#[derive(Debug)]
enum FieldMode {
    Default(syn::Expr),
    Optional,
}

/// Parse #[field(env = "X", doc = "Y", default = val)] syntax
fn parse_field_list(meta_list: &syn::MetaList) -> syn::Result<HashMap<String, MetaValue>> {
    let mut values = HashMap::new();

    meta_list.parse_nested_meta(|meta| {
        let key = meta
            .path
            .get_ident()
            .ok_or_else(|| meta.error("expected identifier"))?
            .to_string();

        if meta.input.peek(Token![=]) {
            meta.input.parse::<Token![=]>()?;

            if key == "env" || key == "doc" {
                let value: syn::LitStr = meta.input.parse()?;
                values.insert(key, MetaValue::Str(value.value()));
            } else {
                let expr: syn::Expr = meta.input.parse()?;
                values.insert(key, MetaValue::Expr(expr));
            }
        } else {
            values.insert(key, MetaValue::Flag);
        }

        Ok(())
    })?;

    Ok(values)
}

fn parse_field_config(attrs: &[Attribute], allow_missing_docs: bool) -> syn::Result<FieldConfig> {
    let field_attr = attrs
        .iter()
        .find(|attr| attr.path().is_ident("field"))
        .ok_or_else(|| {
            syn::Error::new(
                proc_macro2::Span::call_site(),
                "field must have #[field(...)] attribute with env, doc, and mode (default/optional)",
            )
        })?;

    let parsed = match &field_attr.meta {
        Meta::List(list) => parse_field_list(list)?,
        _ => {
            return Err(syn::Error::new_spanned(
                field_attr,
                "field attribute must be a list: #[field(env = \"...\", ...)]",
            ));
        }
    };

    let env_var = match parsed.get("env") {
        Some(MetaValue::Str(s)) => s.clone(),
        _ => {
            return Err(syn::Error::new_spanned(
                field_attr,
                "field must have env = \"VAR_NAME\"",
            ));
        }
    };

    let description = match parsed.get("doc") {
        Some(MetaValue::Str(s)) => s.trim().to_string(),
        None if allow_missing_docs => String::new(),
        None => {
            return Err(syn::Error::new_spanned(
                field_attr,
                "field must have doc = \"description\" (or use #[allow(missing_docs)] on struct)",
            ));
        }
        _ => {
            return Err(syn::Error::new_spanned(
                field_attr,
                "doc must be a string literal",
            ));
        }
    };

    let example = match parsed.get("example") {
        Some(MetaValue::Expr(e)) => Some(e.clone()),
        _ => None,
    };

    let validate = match parsed.get("validate") {
        Some(MetaValue::Expr(syn::Expr::Path(expr))) => Some(expr.path.clone()),
        Some(_) => {
            return Err(syn::Error::new_spanned(
                field_attr,
                "validate must be a path to a function, e.g. validate = crate::validate::positive",
            ));
        }
        None => None,
    };

    let mode = if let Some(MetaValue::Expr(e)) = parsed.get("default") {
        FieldMode::Default(e.clone())
    } else if parsed.contains_key("optional") {
        FieldMode::Optional
    } else {
        return Err(syn::Error::new_spanned(
            field_attr,
            "field must have one of: optional, or default = value",
        ));
    };

    Ok(FieldConfig {
        env_var,
        description,
        example,
        validate,
        mode,
    })
}

/// Extract the inner type from Option<T>
fn extract_option_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    match &segment.arguments {
        syn::PathArguments::AngleBracketed(args) => match args.args.first() {
            Some(syn::GenericArgument::Type(inner_ty)) => Some(inner_ty),
            _ => None,
        },
        _ => None,
    }
}
