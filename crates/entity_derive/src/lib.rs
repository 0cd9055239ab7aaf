use proc_macro::TokenStream;
use quote::quote;
use std::collections::HashSet;
use syn::{
    Data, DeriveInput, Expr, ExprLit, Fields, Ident, ItemStruct, Lit, LitStr, Meta, Path, Token,
    parse_macro_input, parse_str, punctuated::Punctuated,
};

struct BaseEntityConfig {
    id_field: Ident,
    active_field: Ident,
    registration_date_field: Ident,
}

impl Default for BaseEntityConfig {
    fn default() -> Self {
        Self {
            id_field: Ident::new("id", proc_macro2::Span::call_site()),
            active_field: Ident::new("active", proc_macro2::Span::call_site()),
            registration_date_field: Ident::new(
                "registration_date",
                proc_macro2::Span::call_site(),
            ),
        }
    }
}

/// Injects the common persisted shape (surrogate key, active flag,
/// registration timestamp) into an entity struct. Fields the struct
/// already declares are left untouched.
#[proc_macro_attribute]
pub fn base_entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr with Punctuated<Meta, Token![,]>::parse_terminated);
    let mut config = BaseEntityConfig::default();
    if let Err(err) = apply_args(&mut config, args) {
        return err.to_compile_error().into();
    }

    let mut input = parse_macro_input!(item as ItemStruct);
    let fields = match &mut input.fields {
        Fields::Named(fields) => fields,
        _ => {
            return syn::Error::new_spanned(
                input,
                "base_entity requires a struct with named fields",
            )
            .to_compile_error()
            .into();
        }
    };

    let existing: HashSet<String> = fields
        .named
        .iter()
        .filter_map(|field| field.ident.as_ref().map(|ident| ident.to_string()))
        .collect();

    let mut new_fields = Punctuated::new();

    if !existing.contains(&config.id_field.to_string()) {
        let id_ident = config.id_field.clone();
        let id_field: syn::Field = syn::parse_quote! {
            #[entity(key)]
            pub #id_ident: i64
        };
        new_fields.push(id_field);
    }

    if !existing.contains(&config.active_field.to_string()) {
        let active_ident = config.active_field.clone();
        let active_field: syn::Field = syn::parse_quote! {
            pub #active_ident: bool
        };
        new_fields.push(active_field);
    }

    if !existing.contains(&config.registration_date_field.to_string()) {
        let registration_ident = config.registration_date_field.clone();
        let registration_field: syn::Field = syn::parse_quote! {
            pub #registration_ident: chrono::DateTime<chrono::FixedOffset>
        };
        new_fields.push(registration_field);
    }

    for field in fields.named.iter().cloned() {
        new_fields.push(field);
    }

    fields.named = new_fields;

    quote! { #input }.into()
}

fn apply_args(
    config: &mut BaseEntityConfig,
    args: Punctuated<Meta, Token![,]>,
) -> Result<(), syn::Error> {
    for meta in args {
        let Meta::NameValue(name_value) = meta else {
            return Err(syn::Error::new_spanned(
                meta,
                "expected name-value pair, e.g. id = \"address_id\"",
            ));
        };

        let Some(ident) = name_value.path.get_ident() else {
            return Err(syn::Error::new_spanned(
                name_value.path,
                "expected simple identifier for attribute key",
            ));
        };

        let value = match name_value.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(lit_str),
                ..
            }) => lit_str,
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "expected string literal for attribute value",
                ));
            }
        };

        match ident.to_string().as_str() {
            "id" => {
                config.id_field = Ident::new(&value.value(), value.span());
            }
            "active" => {
                config.active_field = Ident::new(&value.value(), value.span());
            }
            "registration_date" => {
                config.registration_date_field = Ident::new(&value.value(), value.span());
            }
            _ => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "unknown base_entity attribute key",
                ));
            }
        }
    }

    Ok(())
}

struct FieldInfo {
    ident: Ident,
    name: String,
    column: String,
    key: bool,
    ignored: bool,
    sql_type: &'static str,
    nullable: bool,
}

/// Derives the static metadata table and row/parameter plumbing for an
/// entity struct. Field behavior is declared with `#[entity(...)]`:
/// `key`, `column = "..."`, `ignore`; the table name with
/// `#[entity(table = "...")]` on the struct (defaults to the struct name).
#[proc_macro_derive(Entity, attributes(entity))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_entity(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_entity(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let ident = input.ident.clone();

    let mut table = ident.to_string();
    let mut meta_path: Path =
        parse_str("crate::db::metadata").expect("default metadata path should parse");

    for attr in &input.attrs {
        if !attr.path().is_ident("entity") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                let value: LitStr = meta.value()?.parse()?;
                table = value.value();
                Ok(())
            } else if meta.path.is_ident("metadata") {
                let value: LitStr = meta.value()?.parse()?;
                meta_path = value.parse()?;
                Ok(())
            } else {
                Err(meta.error("unknown entity attribute key"))
            }
        })?;
    }

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &ident,
            "Entity requires a struct with named fields",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &ident,
            "Entity requires a struct with named fields",
        ));
    };

    let mut infos = Vec::new();
    for field in &fields.named {
        let field_ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;

        let mut key = false;
        let mut ignored = false;
        let mut column = None;

        for attr in &field.attrs {
            if !attr.path().is_ident("entity") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("key") {
                    key = true;
                    Ok(())
                } else if meta.path.is_ident("ignore") {
                    ignored = true;
                    Ok(())
                } else if meta.path.is_ident("column") {
                    let value: LitStr = meta.value()?.parse()?;
                    column = Some(value.value());
                    Ok(())
                } else {
                    Err(meta.error("unknown entity attribute key"))
                }
            })?;
        }

        if key && ignored {
            return Err(syn::Error::new_spanned(
                field,
                "a key field cannot also be ignored",
            ));
        }

        let name = field_ident.to_string();
        let (sql_type, nullable) = classify_type(&field.ty);
        infos.push(FieldInfo {
            ident: field_ident,
            column: column.unwrap_or_else(|| name.clone()),
            name,
            key,
            ignored,
            sql_type,
            nullable,
        });
    }

    if !infos.iter().any(|info| info.key && !info.ignored) {
        return Err(syn::Error::new_spanned(
            &ident,
            "entity declares no #[entity(key)] field",
        ));
    }

    let field_meta = infos.iter().map(|info| {
        let FieldInfo {
            name,
            column,
            key,
            ignored,
            sql_type,
            nullable,
            ..
        } = info;
        quote! {
            #meta_path::FieldMeta {
                name: #name,
                column: #column,
                key: #key,
                ignored: #ignored,
                sql_type: #sql_type,
                nullable: #nullable,
            }
        }
    });

    let projected: Vec<&FieldInfo> = infos.iter().filter(|info| !info.ignored).collect();
    let ignored: Vec<&FieldInfo> = infos.iter().filter(|info| info.ignored).collect();

    let value_arms = projected.iter().map(|info| {
        let name = &info.name;
        let field_ident = &info.ident;
        quote! { #name => #meta_path::SqlValue::from(&self.#field_ident), }
    });

    let named_reads = projected.iter().map(|info| {
        let field_ident = &info.ident;
        let column = &info.column;
        quote! { #field_ident: #meta_path::Row::try_get(row, #column)?, }
    });

    let ordinal_reads = projected.iter().enumerate().map(|(ordinal, info)| {
        let field_ident = &info.ident;
        quote! { #field_ident: #meta_path::Row::try_get(row, offset + #ordinal)?, }
    });

    let defaulted = ignored.iter().map(|info| {
        let field_ident = &info.ident;
        quote! { #field_ident: ::std::default::Default::default(), }
    });
    let defaulted_at = defaulted.clone();

    Ok(quote! {
        #[automatically_derived]
        impl #meta_path::Entity for #ident {
            fn meta() -> &'static #meta_path::EntityMeta {
                static META: #meta_path::EntityMeta = #meta_path::EntityMeta {
                    table: #table,
                    fields: &[ #( #field_meta ),* ],
                };
                &META
            }

            fn value_of(&self, field: &str) -> #meta_path::SqlValue {
                match field {
                    #( #value_arms )*
                    _ => #meta_path::SqlValue::Null,
                }
            }

            fn from_row(
                row: &#meta_path::SqliteRow,
            ) -> ::std::result::Result<Self, #meta_path::SqlxError> {
                Ok(Self {
                    #( #named_reads )*
                    #( #defaulted )*
                })
            }

            fn from_row_at(
                row: &#meta_path::SqliteRow,
                offset: usize,
            ) -> ::std::result::Result<Self, #meta_path::SqlxError> {
                Ok(Self {
                    #( #ordinal_reads )*
                    #( #defaulted_at )*
                })
            }
        }
    })
}

fn classify_type(ty: &syn::Type) -> (&'static str, bool) {
    if let Some(inner) = option_inner(ty) {
        let (sql_type, _) = classify_type(inner);
        return (sql_type, true);
    }

    let syn::Type::Path(type_path) = ty else {
        return ("TEXT", false);
    };
    let Some(segment) = type_path.path.segments.last() else {
        return ("TEXT", false);
    };

    let sql_type = match segment.ident.to_string().as_str() {
        "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" => "INTEGER",
        "bool" => "BOOLEAN",
        "f32" | "f64" => "REAL",
        "DateTime" | "NaiveDateTime" | "NaiveDate" => "TEXT",
        _ => "TEXT",
    };
    (sql_type, false)
}

fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        syn::GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
