// src/file/upload.rs
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rfd::FileDialog;
use thiserror::Error;
use tracing::debug;

pub const ACCEPTED_EXTENSION: &str = "txt";

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Solo se aceptan archivos .txt ({0})")]
    WrongExtension(String),

    #[error("No se pudo leer {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("El archivo {0} no es texto UTF-8")]
    NotUtf8(PathBuf),
}

/// Rejects anything whose extension is not `.txt`, case-insensitively.
/// Looks at the name only; the file is never opened.
pub fn check_extension(path: &Path) -> Result<(), UploadError> {
    let accepted = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(ACCEPTED_EXTENSION))
        .unwrap_or(false);

    if accepted {
        Ok(())
    } else {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Err(UploadError::WrongExtension(name))
    }
}

/// Reads a pseudocode file after the extension check passed.
pub fn read_text_file(path: &Path) -> Result<String, UploadError> {
    check_extension(path)?;

    let bytes = fs::read(path).map_err(|source| UploadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| UploadError::NotUtf8(path.to_path_buf()))?;

    debug!(path = %path.display(), chars = text.len(), "loaded pseudocode file");
    Ok(text)
}

pub fn pick_text_file() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("Texto", &[ACCEPTED_EXTENSION])
        .set_title("Cargar pseudocódigo")
        .pick_file()
}
