//! Auditoría de fechas: compara la fecha del nombre de archivo con la fecha de captura EXIF.

use std::path::Path;

use crate::capture_time::{ComparisonPolicy, MetadataDate, is_later_than, parse_metadata_date};
use crate::config::AuditOptions;
use crate::directory::{ImageKind, display_name, list_files};
use crate::error::{DirectoryError, MetadataError};
use crate::filename_date::{extract_filename_date, is_valid_date};
use crate::metadata_editor::{read_capture_time, write_capture_time};
use crate::report::{AuditRow, AuditStatus};

/// Resultado de auditar un archivo: sin fila o con una fila para el reporte.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AuditOutcome {
    Silent,
    Row(AuditRow),
}

impl AuditOutcome {
    fn row(
        status: AuditStatus,
        filename: String,
        filename_date: impl Into<String>,
        metadata_date: impl Into<String>,
    ) -> Self {
        Self::Row(AuditRow {
            status,
            filename,
            filename_date: filename_date.into(),
            metadata_date: metadata_date.into(),
        })
    }
}

/// Audita cada archivo del directorio (sin recursión) en el orden del listado.
///
/// `on_row` recibe cada fila en cuanto se produce; las filas también se devuelven.
pub fn audit_directory<F>(
    dir: &Path,
    options: &AuditOptions,
    mut on_row: F,
) -> Result<Vec<AuditRow>, DirectoryError>
where
    F: FnMut(&AuditRow),
{
    let files = list_files(dir)?;
    let mut rows = Vec::new();

    for path in files {
        if let AuditOutcome::Row(row) = audit_file(&path, options) {
            on_row(&row);
            rows.push(row);
        }
    }

    tracing::info!(
        dir = %dir.display(),
        reported = rows.len(),
        fixed = rows.iter().filter(|row| row.status == AuditStatus::Fixed).count(),
        "auditoría completada"
    );
    Ok(rows)
}

pub fn audit_file(path: &Path, options: &AuditOptions) -> AuditOutcome {
    let filename = display_name(path);

    match ImageKind::from_path(path) {
        ImageKind::Png => {
            return AuditOutcome::row(AuditStatus::Skipped, filename, "-", "PNG format ignored");
        }
        ImageKind::Other => return AuditOutcome::Silent,
        ImageKind::Jpeg => {}
    }

    let Some(file_date) = extract_filename_date(&filename) else {
        return AuditOutcome::row(AuditStatus::NoDate, filename, "N/A", "No date in filename");
    };
    let file_date_str = file_date.metadata_string();

    if !is_valid_date(&file_date, &options.bounds) {
        tracing::debug!(%filename, candidate = %file_date_str, "fecha del nombre descartada");
        return AuditOutcome::Silent;
    }

    let metadata = match read_metadata_date(path) {
        Ok(metadata) => metadata,
        Err(error) => {
            tracing::warn!(%filename, %error, "no se pudo leer la metadata EXIF");
            return AuditOutcome::row(
                AuditStatus::Error,
                filename,
                file_date_str,
                "Could not read EXIF",
            );
        }
    };

    let policy = ComparisonPolicy::from_extensive(options.extensive);
    let (mismatch, missing, metadata_str) = match &metadata {
        Some(date) if date.has_year() => (
            is_later_than(date, &file_date, policy),
            false,
            date.display(),
        ),
        Some(date) => (false, true, date.display()),
        None => (false, true, "None".to_string()),
    };

    if !mismatch && !missing {
        return AuditOutcome::row(AuditStatus::Ok, filename, file_date_str, metadata_str);
    }

    let mut status = if missing {
        AuditStatus::NoDate
    } else {
        AuditStatus::Mismatch
    };

    if options.fix {
        status = match write_capture_time(path, &file_date.capture_time_value()) {
            Ok(()) => AuditStatus::Fixed,
            Err(error) => {
                tracing::warn!(%filename, %error, "no se pudo corregir la fecha de captura");
                AuditStatus::ErrFix
            }
        };
    }

    AuditOutcome::row(status, filename, file_date_str, metadata_str)
}

fn read_metadata_date(path: &Path) -> Result<Option<MetadataDate>, MetadataError> {
    read_capture_time(path)?
        .map(|raw| parse_metadata_date(&raw))
        .transpose()
}
