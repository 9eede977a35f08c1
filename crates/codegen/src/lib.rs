//! Offline generator for the gems model layer
//!
//! Reads the annotated storage-type tree and the form-type tree, and writes
//! one `zz_generated.rs` into each: object metadata and capability impls for
//! storage types, conversions for form types.

pub mod annotations;
pub mod error;
pub mod form_gen;
pub mod model;
pub mod orm_gen;
pub mod templates;
pub mod writer;

pub use error::{CodegenError, CodegenResult};
pub use model::GENERATED_FILE;
pub use writer::CodeWriter;

use proc_macro2::TokenStream;
use std::path::{Path, PathBuf};

pub const DEFAULT_ORM_MODULE: &str = "crate::orm";

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub orm_dir: PathBuf,
    pub forms_dir: PathBuf,
    /// Path of the storage tree as seen from the form tree
    pub orm_module: String,
}

impl GeneratorConfig {
    pub fn new(orm_dir: impl Into<PathBuf>, forms_dir: impl Into<PathBuf>) -> Self {
        Self {
            orm_dir: orm_dir.into(),
            forms_dir: forms_dir.into(),
            orm_module: DEFAULT_ORM_MODULE.to_string(),
        }
    }

    pub fn with_orm_module(mut self, module: impl Into<String>) -> Self {
        self.orm_module = module.into();
        self
    }
}

/// One rendered output file
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}

pub struct CodeGenerator {
    config: GeneratorConfig,
    writer: CodeWriter,
}

/// Pretty-print generated tokens under the file header
pub fn format_output(tree: &str, tokens: TokenStream) -> CodegenResult<String> {
    let file: syn::File = syn::parse2(tokens)?;
    Ok(format!("{}{}", templates::header(tree), prettyplease::unparse(&file)))
}

impl CodeGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            writer: CodeWriter::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Render both generated files without touching the disk
    pub fn render(&self) -> CodegenResult<Vec<GeneratedFile>> {
        let storage = model::parse_dir(&self.config.orm_dir)?;
        let forms = model::parse_dir(&self.config.forms_dir)?;

        let orm = format_output("orm", orm_gen::generate_orm(&storage)?)?;
        let form = format_output(
            "forms",
            form_gen::generate_forms(&forms, &storage, &self.config.orm_module)?,
        )?;

        Ok(vec![
            GeneratedFile {
                path: self.config.orm_dir.join(GENERATED_FILE),
                content: orm,
            },
            GeneratedFile {
                path: self.config.forms_dir.join(GENERATED_FILE),
                content: form,
            },
        ])
    }

    /// Write every generated file that changed and return the written paths.
    /// With `check`, nothing is written and out-of-date files are an error.
    pub fn generate_all(&self, check: bool) -> CodegenResult<Vec<PathBuf>> {
        let files = self.render()?;

        if check {
            let mut stale = Vec::new();
            for file in &files {
                if !self.writer.is_current(&file.path, &file.content)? {
                    stale.push(file.path.clone());
                }
            }
            if !stale.is_empty() {
                return Err(CodegenError::Stale(stale));
            }
            tracing::info!("generated files are up to date");
            return Ok(Vec::new());
        }

        let mut written = Vec::new();
        for file in files {
            if self.writer.write_if_changed(&file.path, &file.content)? {
                written.push(file.path);
            }
        }
        Ok(written)
    }
}

/// Generate into the two trees with the default settings
pub fn generate(orm_dir: &Path, forms_dir: &Path) -> CodegenResult<Vec<PathBuf>> {
    CodeGenerator::new(GeneratorConfig::new(orm_dir, forms_dir)).generate_all(false)
}
