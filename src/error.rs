use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataCompatError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("I/O error on {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("Parse error: {message}")]
    Parse { message: String, line: Option<usize>, col: Option<usize> },
    #[error("Generate error: {0}")]
    Generate(String),
    #[error("{count} declaration(s) rejected")]
    Rejected { count: usize },
    #[error("{count} input(s) could not be processed")]
    Failed { count: usize },
}

pub type Result<T> = std::result::Result<T, DataCompatError>;

/// Why a `#[data_compat]` target could not be turned into an entity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("#[data_compat] cannot target non-struct item `{0}`")]
    NotAStruct(String),
    #[error("#[data_compat] target `{0}` must have named fields")]
    UnnamedFields(String),
    #[error("#[data_compat] target `{0}` must have private visibility")]
    NotPrivate(String),
    #[error("#[data_compat] target `{0}` shouldn't have type parameters")]
    Generic(String),
    #[error("#[data_compat] target `{name}` must end with `{suffix}` suffix naming")]
    MissingSuffix { name: String, suffix: String },
    #[error("#[data_compat] target `{0}` leaves an empty entity name")]
    EmptyName(String),
    #[error("field `{field}` of `{target}` clashes with a generated name")]
    ReservedField { target: String, field: String },
    #[error("invalid attribute on `{target}`: {message}")]
    Attribute { target: String, message: String },
    #[error("entity `{entity}` would overwrite `{file_name}` generated earlier")]
    DuplicateEntity { entity: String, file_name: String },
    #[error("code for `{target}` could not be generated: {message}")]
    Generate { target: String, message: String },
}

// Helper conversions
impl From<config::ConfigError> for DataCompatError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}

impl From<syn::Error> for DataCompatError {
    fn from(e: syn::Error) -> Self {
        let start = e.span().start();
        // proc-macro2 reports line 0 when no location is known
        let (line, col) = if start.line == 0 { (None, None) } else { (Some(start.line), Some(start.column + 1)) };
        Self::Parse { message: e.to_string(), line, col }
    }
}
