use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },

    #[error("Malformed annotation on type {type_name}: '{option}' is not key:value")]
    Annotation { type_name: String, option: String },

    #[error("Type {type_name} has no primary key field '{field}'")]
    MissingPrimaryKey { type_name: String, field: String },

    #[error("Type {type_name}: unsupported primary key type '{ty}'")]
    UnsupportedPrimaryKey { type_name: String, ty: String },

    #[error("Type {type_name}: relation field '{field}' is not an association with a key column")]
    RelationField { type_name: String, field: String },

    #[error("Form {form}: field '{field}' is {form_shape} but {storage_shape} on the storage type")]
    ShapeMismatch {
        form: String,
        field: String,
        form_shape: String,
        storage_shape: String,
    },

    #[error("Invalid module path '{0}'")]
    ModulePath(String),

    #[error("Generated output could not be formatted: {0}")]
    Format(#[from] syn::Error),

    #[error("Generated files are out of date: {}", .0.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "))]
    Stale(Vec<PathBuf>),

    #[error(transparent)]
    Core(#[from] gems_core::CoreError),
}

impl CodegenError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type CodegenResult<T> = Result<T, CodegenError>;
