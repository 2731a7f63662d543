//! Errores compartidos por el lector/escritor de metadata y el listado de directorios.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fallos al leer, transformar o guardar la metadata EXIF de un archivo.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("No se pudo acceder a `{path}`: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("El contenido no corresponde a una imagen JPEG")]
    NotJpeg,

    #[error("Segmento JPEG inválido en el byte {offset}")]
    MalformedSegment { offset: usize },

    #[error("Estructura TIFF inválida en el byte {offset}")]
    MalformedTiff { offset: usize },

    #[error("Metadata EXIF inválida: {0}")]
    Exif(#[from] exif::Error),

    #[error("Fecha de captura con formato inesperado: `{0}`")]
    MalformedCaptureTime(String),

    #[error("El bloque EXIF ({0} bytes) no cabe en un segmento APP1")]
    ExifTooLarge(usize),

    #[error("La verificación indicó que la metadata no quedó como se esperaba: {0}")]
    Verification(String),
}

impl MetadataError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Fallos al enumerar el directorio de trabajo.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("La ruta proporcionada no es un directorio: {0}")]
    NotADirectory(PathBuf),

    #[error("No se pudo leer {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
}
