//! Code emission for a validated [`DataClass`].

use lazy_static::lazy_static;
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use regex::Regex;
use syn::{Ident, Path};

use crate::descriptor::{DataClass, PropertyDescriptor, PropertyKind};
use crate::error::{DataCompatError, Result};
use crate::settings::Settings;

lazy_static! {
    static ref WORD_BOUNDARY: Regex = Regex::new(r"([a-z0-9])([A-Z])").unwrap();
    static ref ACRONYM_BOUNDARY: Regex = Regex::new(r"([A-Z]+)([A-Z][a-z])").unwrap();
}

/// `HttpRequest` -> `http_request`, `URLParser` -> `url_parser`.
pub fn snake_case(name: &str) -> String {
    let spaced = ACRONYM_BOUNDARY.replace_all(name, "${1}_${2}");
    WORD_BOUNDARY.replace_all(&spaced, "${1}_${2}").to_lowercase()
}

/// A function name for `name`; keywords become raw identifiers, and the few
/// that cannot be raw get a trailing underscore.
pub fn fn_ident(name: &str) -> Ident {
    match syn::parse_str::<Ident>(name) {
        Ok(ident) => ident,
        Err(_) if matches!(name, "crate" | "self" | "super" | "Self") => format_ident!("{}_", name),
        Err(_) => Ident::new_raw(name, Span::call_site()),
    }
}

/// Turns a field doc such as "The full name." into "Set the full name.".
pub fn setter_doc(property: &PropertyDescriptor) -> String {
    match property.docs.first().map(|line| line.trim()).filter(|line| !line.is_empty()) {
        Some(line) => {
            let mut chars = line.chars();
            let lowered: String = match chars.next() {
                Some(first) => first.to_lowercase().chain(chars).collect(),
                None => String::new(),
            };
            format!("Set {lowered}")
        }
        None => format!("Set `{}`.", property.name()),
    }
}

fn doc_attrs(lines: &[String]) -> TokenStream {
    let lines = lines.iter().map(|line| format!(" {line}"));
    quote! { #( #[doc = #lines] )* }
}

fn derive_paths(class: &DataClass, settings: &Settings) -> Result<Vec<Path>> {
    let mut derives: Vec<Path> = vec![syn::parse_quote!(Debug), syn::parse_quote!(Clone), syn::parse_quote!(PartialEq)];
    for extra in &settings.derives {
        let path = syn::parse_str::<Path>(extra)
            .map_err(|e| DataCompatError::Generate(format!("invalid derive `{extra}` in settings: {e}")))?;
        derives.push(path);
    }
    derives.extend(class.derives.iter().cloned());
    // keep the first occurrence of each derive
    let mut seen = Vec::new();
    derives.retain(|p| {
        let key = quote!(#p).to_string();
        if seen.contains(&key) {
            false
        } else {
            seen.push(key);
            true
        }
    });
    Ok(derives)
}

/// Clones a property out of `source` (`self` for both entity and builder).
fn copied(property: &PropertyDescriptor) -> TokenStream {
    let ident = &property.ident;
    match property.kind {
        PropertyKind::Copy => quote! { self.#ident },
        _ => quote! { self.#ident.clone() },
    }
}

fn accessor(property: &PropertyDescriptor) -> TokenStream {
    let ident = &property.ident;
    let ty = &property.ty;
    let docs = doc_attrs(&property.docs);
    let (ret, body) = match &property.kind {
        PropertyKind::Text => (quote!(&str), quote!(&self.#ident)),
        PropertyKind::OptionalText => (quote!(Option<&str>), quote!(self.#ident.as_deref())),
        PropertyKind::Copy => (quote!(#ty), quote!(self.#ident)),
        PropertyKind::Optional(inner) => (quote!(Option<&#inner>), quote!(self.#ident.as_ref())),
        PropertyKind::Other => (quote!(&#ty), quote!(&self.#ident)),
    };
    quote! {
        #docs
        pub fn #ident(&self) -> #ret {
            #body
        }
    }
}

/// Parameter type and stored expression for a value handed in by the caller.
fn incoming(property: &PropertyDescriptor) -> (TokenStream, TokenStream) {
    let ident = &property.ident;
    let ty = &property.ty;
    match property.kind {
        PropertyKind::Text => (quote!(impl Into<String>), quote!(#ident.into())),
        _ => (quote!(#ty), quote!(#ident)),
    }
}

fn setter(property: &PropertyDescriptor) -> TokenStream {
    let ident = &property.ident;
    let name = format_ident!("set_{}", property.name());
    let doc = format!(" {}", setter_doc(property));
    let (param, value) = incoming(property);
    quote! {
        #[doc = #doc]
        pub fn #name(&mut self, #ident: #param) -> &mut Self {
            self.#ident = #value;
            self
        }
    }
}

fn initial(property: &PropertyDescriptor) -> TokenStream {
    let ident = &property.ident;
    match (&property.default, &property.kind) {
        (Some(expr), PropertyKind::Text) => quote! { #ident: (#expr).into() },
        (Some(expr), _) => quote! { #ident: #expr },
        (None, kind) if kind.is_optional() => quote! { #ident: None },
        (None, _) => {
            let (_, value) = incoming(property);
            quote! { #ident: #value }
        }
    }
}

/// Generates the entity, builder and initializer for `class` as a token stream.
pub fn tokens(class: &DataClass, settings: &Settings) -> Result<TokenStream> {
    let entity = &class.entity;
    let builder = class.builder_ident();
    let entity_docs = doc_attrs(&class.docs);
    let builder_doc = format!(" Composes and builds a [`{entity}`].");
    let carried = &class.carried;
    let derives = derive_paths(class, settings)?;
    let imports = &class.imports;

    let fields: Vec<TokenStream> = class
        .properties
        .iter()
        .map(|p| {
            let ident = &p.ident;
            let ty = &p.ty;
            let docs = doc_attrs(&p.docs);
            quote! { #docs #ident: #ty }
        })
        .collect();
    let builder_fields: Vec<TokenStream> = class
        .properties
        .iter()
        .map(|p| {
            let ident = &p.ident;
            let ty = &p.ty;
            quote! { #ident: #ty }
        })
        .collect();
    let idents: Vec<_> = class.properties.iter().map(|p| &p.ident).collect();
    let copies: Vec<TokenStream> = class.properties.iter().map(copied).collect();
    let accessors: Vec<TokenStream> = class.properties.iter().map(accessor).collect();
    // mandatory fields are fixed once the builder exists
    let setters: Vec<TokenStream> =
        class.properties.iter().filter(|p| !p.mandatory_for_constructor()).map(setter).collect();
    let initials: Vec<TokenStream> = class.properties.iter().map(initial).collect();

    let params: Vec<TokenStream> = class
        .mandatory()
        .map(|p| {
            let ident = &p.ident;
            let (param, _) = incoming(p);
            quote! { #ident: #param }
        })
        .collect();
    let args: Vec<_> = class.mandatory().map(|p| &p.ident).collect();

    let default_impl = if params.is_empty() {
        quote! {
            impl Default for #builder {
                fn default() -> Self {
                    Self::new()
                }
            }
        }
    } else {
        TokenStream::new()
    };

    let display = if settings.display {
        let template = format!(
            "{}({})",
            entity,
            class.properties.iter().map(|p| format!("{}={{:?}}", p.name())).collect::<Vec<_>>().join(", ")
        );
        quote! {
            impl ::std::fmt::Display for #entity {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    write!(f, #template, #( self.#idents ),*)
                }
            }
        }
    } else {
        TokenStream::new()
    };

    let initializer = if settings.initializer {
        let name = fn_ident(&snake_case(&entity.to_string()));
        let doc = format!(" Creates a [`{entity}`] by handing a fresh builder to `initializer`.");
        quote! {
            #[doc = #doc]
            pub fn #name(#( #params, )* initializer: impl FnOnce(&mut #builder)) -> #entity {
                let mut builder = #builder::new(#( #args ),*);
                initializer(&mut builder);
                builder.build()
            }
        }
    } else {
        TokenStream::new()
    };

    Ok(quote! {
        #( use #imports; )*

        #entity_docs
        #( #carried )*
        #[derive( #( #derives ),* )]
        pub struct #entity {
            #( #fields, )*
        }

        impl #entity {
            /// Starts a builder for this type.
            pub fn builder(#( #params ),*) -> #builder {
                #builder::new(#( #args ),*)
            }
            #( #accessors )*
            /// Convert to a builder allowing to change properties.
            pub fn to_builder(&self) -> #builder {
                #builder {
                    #( #idents: #copies, )*
                }
            }
        }

        #display

        #[doc = #builder_doc]
        #[derive(Debug, Clone)]
        pub struct #builder {
            #( #builder_fields, )*
        }

        impl #builder {
            /// Creates a builder, taking the fields that have no default.
            pub fn new(#( #params ),*) -> Self {
                Self {
                    #( #initials, )*
                }
            }
            #( #setters )*
            /// Returns a new entity holding the values staged so far.
            pub fn build(&self) -> #entity {
                #entity {
                    #( #idents: #copies, )*
                }
            }
        }

        #default_impl

        #initializer
    })
}

/// Generates formatted source text for `class`.
pub fn render(class: &DataClass, settings: &Settings) -> Result<String> {
    let tokens = tokens(class, settings)?;
    let file: syn::File = syn::parse2(tokens)
        .map_err(|e| DataCompatError::Generate(format!("{} produced invalid code: {e}", class.source_name)))?;
    Ok(format!(
        "// @generated by datacompat from `{}`. Do not edit.\n\n{}",
        class.source_name,
        prettyplease::unparse(&file)
    ))
}
