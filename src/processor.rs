//! Finds `#[data_compat]` declarations in a source file and generates their
//! entities.
//!
//! A declaration that fails validation is logged and reported as a
//! [`Rejection`]; the remaining declarations of the same file are still
//! generated. Two declarations resolving to the same file are a rejection
//! too, the first one wins. Only an unreadable or unparsable file aborts
//! processing.

use std::fs;
use std::path::{Path, PathBuf};

use syn::Item;
use tracing::{debug, error, info};

use crate::descriptor::{self, DataClass};
use crate::error::{DataCompatError, Result, Violation};
use crate::generate;
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub entity: String,
    pub file_name: String,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub target: String,
    pub violation: Violation,
}

#[derive(Debug, Default)]
pub struct ProcessOutcome {
    pub generated: Vec<GeneratedFile>,
    pub rejected: Vec<Rejection>,
}

impl ProcessOutcome {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
    fn reject(&mut self, target: String, violation: Violation) {
        error!(declaration = %target, %violation, "declaration rejected");
        self.rejected.push(Rejection { target, violation });
    }
    /// Writes every generated file into `dir`, creating it when missing.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir).map_err(|source| DataCompatError::Io { path: dir.to_path_buf(), source })?;
        let mut written = Vec::with_capacity(self.generated.len());
        for file in &self.generated {
            let path = dir.join(&file.file_name);
            fs::write(&path, &file.contents).map_err(|source| DataCompatError::Io { path: path.clone(), source })?;
            info!(entity = %file.entity, path = %path.display(), "wrote generated file");
            written.push(path);
        }
        Ok(written)
    }
}

pub struct Processor {
    settings: Settings,
}

impl Processor {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn process_file(&self, path: &Path) -> Result<ProcessOutcome> {
        let source =
            fs::read_to_string(path).map_err(|source| DataCompatError::Io { path: path.to_path_buf(), source })?;
        info!(path = %path.display(), "processing");
        self.process_source(&source)
    }

    pub fn process_source(&self, source: &str) -> Result<ProcessOutcome> {
        let file = syn::parse_file(source)?;
        let mut marked = Vec::new();
        collect_marked(&file.items, &mut marked);
        if marked.is_empty() {
            info!("no #[data_compat] declarations found for processing");
            return Ok(ProcessOutcome::default());
        }

        let mut outcome = ProcessOutcome::default();
        for item in marked {
            match self.process_item(item) {
                Ok(generated) if outcome.generated.iter().any(|g| g.file_name == generated.file_name) => {
                    let violation =
                        Violation::DuplicateEntity { entity: generated.entity, file_name: generated.file_name };
                    outcome.reject(descriptor::item_name(item), violation);
                }
                Ok(generated) => outcome.generated.push(generated),
                Err(violation) => outcome.reject(descriptor::item_name(item), violation),
            }
        }
        info!(generated = outcome.generated.len(), rejected = outcome.rejected.len(), "processing done");
        Ok(outcome)
    }

    fn process_item(&self, item: &Item) -> std::result::Result<GeneratedFile, Violation> {
        let class = DataClass::from_item(item, &self.settings.suffix)?;
        debug!(declaration = %class.source_name, properties = class.properties.len(), "validated");
        let contents = generate::render(&class, &self.settings)
            .map_err(|e| Violation::Generate { target: class.source_name.clone(), message: e.to_string() })?;
        let entity = class.entity.to_string();
        Ok(GeneratedFile { file_name: format!("{}.rs", generate::snake_case(&entity)), entity, contents })
    }
}

fn collect_marked<'a>(items: &'a [Item], marked: &mut Vec<&'a Item>) {
    for item in items {
        if descriptor::is_marked(descriptor::item_attrs(item)) {
            marked.push(item);
        }
        if let Item::Mod(module) = item {
            if let Some((_, nested)) = &module.content {
                collect_marked(nested, marked);
            }
        }
    }
}
