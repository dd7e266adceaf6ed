use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input file `{}` was not found", .path.display())]
    MissingFile { path: PathBuf },
    #[error("could not read input file `{}`: {source}", .path.display())]
    Unreadable { path: PathBuf, source: std::io::Error },
    #[error("input file `{}` is not valid JSON: {source}", .path.display())]
    MalformedJson { path: PathBuf, source: serde_json::Error },
}

/// The document parsed but is not the array the pipeline iterates.
#[derive(Debug, Error)]
#[error("input file `{}` does not have the expected shape: {source}", .path.display())]
pub struct DocumentError {
    pub path: PathBuf,
    pub source: serde_json::Error,
}

#[derive(Debug, Error)]
#[error("could not write report to `{}`: {source}", .path.display())]
pub struct ReportError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl LoadError {
    /// Console line shown to the operator. Always names the failing path.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::MissingFile { path } => {
                format!("Error: El archivo {} no fue encontrado.", path.display())
            }
            Self::Unreadable { path, source } => {
                format!("Error: Archivo {} no se pudo leer: {source}", path.display())
            }
            Self::MalformedJson { path, .. } => {
                format!("Error: Archivo {} no es válido JSON.", path.display())
            }
        }
    }

    pub fn error_class(&self) -> &'static str {
        match self {
            Self::MissingFile { .. } => "missing_file",
            Self::Unreadable { .. } => "unreadable_file",
            Self::MalformedJson { .. } => "malformed_json",
        }
    }
}

impl DocumentError {
    pub fn diagnostic(&self) -> String {
        format!(
            "Error: Archivo {} no tiene el formato esperado: {}",
            self.path.display(),
            self.source
        )
    }
}

impl ReportError {
    pub fn diagnostic(&self) -> String {
        format!("Error: No se pudo escribir {}: {}", self.path.display(), self.source)
    }
}

impl PipelineError {
    pub fn diagnostic(&self) -> String {
        match self {
            Self::Load(error) => error.diagnostic(),
            Self::Document(error) => error.diagnostic(),
        }
    }

    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Load(error) => error.error_class(),
            Self::Document(_) => "invalid_document",
        }
    }
}
