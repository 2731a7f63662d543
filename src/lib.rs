//! Auditoría y corrección de la fecha de captura EXIF de fotos JPEG a partir de
//! la fecha codificada en su nombre de archivo.

pub mod audit;
pub mod capture_time;
pub mod config;
pub mod directory;
pub mod error;
pub mod filename_date;
pub mod logging;
pub mod metadata_editor;
pub mod report;
pub mod reset;

#[cfg(test)]
mod test_support;

pub use audit::{AuditOutcome, audit_directory, audit_file};
pub use config::{AuditOptions, DateBounds, ResetOptions};
pub use error::{DirectoryError, MetadataError};
pub use reset::{ResetOutcome, reset_directory, reset_file};
