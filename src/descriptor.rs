//! Validated model of a `#[data_compat]` declaration.
//!
//! A declaration is an ordinary Rust struct that is only ever parsed, never
//! compiled, so its attributes are free to describe the entity:
//!
//! * `#[data_compat(..)]` on the struct, optionally with `name = "Entity"`,
//!   `derive(Eq, Hash)` and `imports(std::collections::BTreeMap)`.
//! * `#[default(expr)]` on a field, the initial value in the builder.
//!
//! Non-`Option` fields without a default are mandatory and become builder
//! constructor parameters.

use syn::ext::IdentExt;
use syn::{Attribute, Expr, Fields, GenericArgument, Ident, Item, LitStr, Path, PathArguments, Type, Visibility};

use crate::error::Violation;

pub const MARKER: &str = "data_compat";
pub const DEFAULT_MARKER: &str = "default";
// names the generated code already uses next to the fields
const RESERVED: [&str; 3] = ["builder", "to_builder", "initializer"];
const COPY_PRIMITIVES: [&str; 17] = [
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize", "f32", "f64", "bool",
    "char", "()",
];

/// How a property is stored and handed out by the generated code.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    /// `String`, read as `&str`, set through `impl Into<String>`.
    Text,
    /// `Option<String>`, read as `Option<&str>`.
    OptionalText,
    /// A primitive that is `Copy`, read by value.
    Copy,
    /// `Option<T>`, read as `Option<&T>`.
    Optional(Type),
    /// Anything else, read by reference.
    Other,
}

impl PropertyKind {
    pub fn of(ty: &Type) -> Self {
        if let Some(inner) = option_inner(ty) {
            if is_ident(inner, "String") {
                PropertyKind::OptionalText
            } else {
                PropertyKind::Optional(inner.clone())
            }
        } else if is_ident(ty, "String") {
            PropertyKind::Text
        } else if COPY_PRIMITIVES.iter().any(|p| is_ident(ty, p)) {
            PropertyKind::Copy
        } else {
            PropertyKind::Other
        }
    }
    pub fn is_optional(&self) -> bool {
        matches!(self, PropertyKind::OptionalText | PropertyKind::Optional(_))
    }
}

#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    pub ident: Ident,
    pub ty: Type,
    pub kind: PropertyKind,
    pub default: Option<Expr>,
    pub docs: Vec<String>,
}

impl PropertyDescriptor {
    /// The field name without any `r#` prefix.
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }
    pub fn mandatory_for_constructor(&self) -> bool {
        self.default.is_none() && !self.kind.is_optional()
    }
}

#[derive(Debug, Clone)]
pub struct DataClass {
    /// Name of the declaration, e.g. `PersonData`.
    pub source_name: String,
    /// Name of the generated entity, e.g. `Person`.
    pub entity: Ident,
    pub properties: Vec<PropertyDescriptor>,
    pub docs: Vec<String>,
    /// `#[deprecated]` and similar attributes carried onto the entity.
    pub carried: Vec<Attribute>,
    pub derives: Vec<Path>,
    pub imports: Vec<Path>,
}

impl DataClass {
    pub fn builder_ident(&self) -> Ident {
        Ident::new(&format!("{}Builder", self.entity), self.entity.span())
    }
    pub fn mandatory(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| p.mandatory_for_constructor())
    }

    /// Validates a marked item and describes the entity it declares.
    pub fn from_item(item: &Item, suffix: &str) -> Result<Self, Violation> {
        let item = match item {
            Item::Struct(s) => s,
            other => return Err(Violation::NotAStruct(item_name(other))),
        };
        let source_name = item.ident.to_string();
        if !matches!(item.vis, Visibility::Inherited) {
            return Err(Violation::NotPrivate(source_name));
        }
        if !item.generics.params.is_empty() {
            return Err(Violation::Generic(source_name));
        }
        let fields = match &item.fields {
            Fields::Named(named) => &named.named,
            _ => return Err(Violation::UnnamedFields(source_name)),
        };

        let options = MarkerOptions::parse(&item.attrs, &source_name)?;
        let entity_name = match options.name {
            Some(name) => name,
            None => {
                let stripped = source_name.strip_suffix(suffix).ok_or_else(|| Violation::MissingSuffix {
                    name: source_name.clone(),
                    suffix: suffix.to_string(),
                })?;
                stripped.to_string()
            }
        };
        if entity_name.is_empty() {
            return Err(Violation::EmptyName(source_name));
        }
        let entity = syn::parse_str::<Ident>(&entity_name).map_err(|e| Violation::Attribute {
            target: source_name.clone(),
            message: format!("`{entity_name}` is not a valid entity name: {e}"),
        })?;

        let mut properties = Vec::with_capacity(fields.len());
        for field in fields {
            // named fields always carry an ident
            let Some(ident) = field.ident.clone() else { continue };
            let name = ident.unraw().to_string();
            if RESERVED.contains(&name.as_str()) {
                return Err(Violation::ReservedField { target: source_name, field: name });
            }
            properties.push(PropertyDescriptor {
                kind: PropertyKind::of(&field.ty),
                ty: field.ty.clone(),
                default: default_expr(&field.attrs, &source_name)?,
                docs: docs(&field.attrs),
                ident,
            });
        }

        Ok(Self {
            entity,
            properties,
            docs: docs(&item.attrs),
            carried: item.attrs.iter().filter(|a| a.path().is_ident("deprecated")).cloned().collect(),
            derives: options.derives,
            imports: options.imports,
            source_name,
        })
    }
}

/// True when any of `attrs` is the `#[data_compat]` marker.
pub fn is_marked(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|a| a.path().is_ident(MARKER))
}

pub fn item_attrs(item: &Item) -> &[Attribute] {
    match item {
        Item::Struct(i) => &i.attrs,
        Item::Enum(i) => &i.attrs,
        Item::Union(i) => &i.attrs,
        Item::Type(i) => &i.attrs,
        Item::Fn(i) => &i.attrs,
        Item::Trait(i) => &i.attrs,
        Item::Impl(i) => &i.attrs,
        Item::Const(i) => &i.attrs,
        Item::Static(i) => &i.attrs,
        Item::Mod(i) => &i.attrs,
        _ => &[],
    }
}

pub fn item_name(item: &Item) -> String {
    match item {
        Item::Struct(i) => i.ident.to_string(),
        Item::Enum(i) => i.ident.to_string(),
        Item::Union(i) => i.ident.to_string(),
        Item::Type(i) => i.ident.to_string(),
        Item::Fn(i) => i.sig.ident.to_string(),
        Item::Trait(i) => i.ident.to_string(),
        Item::Const(i) => i.ident.to_string(),
        Item::Static(i) => i.ident.to_string(),
        Item::Mod(i) => i.ident.to_string(),
        _ => "<item>".to_string(),
    }
}

#[derive(Default)]
struct MarkerOptions {
    name: Option<String>,
    derives: Vec<Path>,
    imports: Vec<Path>,
}

impl MarkerOptions {
    fn parse(attrs: &[Attribute], target: &str) -> Result<Self, Violation> {
        let mut options = MarkerOptions::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident(MARKER)) {
            // a bare #[data_compat] has nothing to parse
            if matches!(attr.meta, syn::Meta::Path(_)) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let name: LitStr = meta.value()?.parse()?;
                    options.name = Some(name.value());
                    Ok(())
                } else if meta.path.is_ident("derive") {
                    meta.parse_nested_meta(|inner| {
                        options.derives.push(inner.path);
                        Ok(())
                    })
                } else if meta.path.is_ident("imports") {
                    meta.parse_nested_meta(|inner| {
                        options.imports.push(inner.path);
                        Ok(())
                    })
                } else {
                    Err(meta.error("expected `name`, `derive` or `imports`"))
                }
            })
            .map_err(|e| Violation::Attribute { target: target.to_string(), message: e.to_string() })?;
        }
        Ok(options)
    }
}

fn default_expr(attrs: &[Attribute], target: &str) -> Result<Option<Expr>, Violation> {
    match attrs.iter().find(|a| a.path().is_ident(DEFAULT_MARKER)) {
        Some(attr) => attr
            .parse_args::<Expr>()
            .map(Some)
            .map_err(|e| Violation::Attribute { target: target.to_string(), message: e.to_string() }),
        None => Ok(None),
    }
}

/// Doc comment lines with the single leading space rustdoc adds removed.
fn docs(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|a| a.path().is_ident("doc"))
        .filter_map(|a| match &a.meta {
            syn::Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(syn::ExprLit { lit: syn::Lit::Str(s), .. }) => {
                    let line = s.value();
                    Some(line.strip_prefix(' ').map(str::to_string).unwrap_or(line))
                }
                _ => None,
            },
            _ => None,
        })
        .collect()
}

fn is_ident(ty: &Type, name: &str) -> bool {
    match ty {
        Type::Tuple(t) => name == "()" && t.elems.is_empty(),
        Type::Path(p) => p.qself.is_none() && p.path.is_ident(name),
        _ => false,
    }
}

fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(p) = ty else { return None };
    let last = p.path.segments.last()?;
    if last.ident != "Option" {
        return None;
    }
    match &last.arguments {
        PathArguments::AngleBracketed(args) if args.args.len() == 1 => match args.args.first()? {
            GenericArgument::Type(inner) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}
