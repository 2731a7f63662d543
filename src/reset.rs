//! Reseteo de fechas de captura imposibles (anteriores al año de corte).

use std::path::Path;

use crate::capture_time::parse_capture_year;
use crate::config::ResetOptions;
use crate::directory::{ImageKind, display_name, list_files};
use crate::error::{DirectoryError, MetadataError};
use crate::metadata_editor::{read_capture_time, remove_capture_time};
use crate::report::{ResetAction, ResetRow};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResetOutcome {
    Silent,
    Row(ResetRow),
}

/// Revisa cada JPEG del directorio (sin recursión) en el orden del listado.
pub fn reset_directory<F>(
    dir: &Path,
    options: &ResetOptions,
    mut on_row: F,
) -> Result<Vec<ResetRow>, DirectoryError>
where
    F: FnMut(&ResetRow),
{
    let files = list_files(dir)?;
    let mut rows = Vec::new();

    for path in files {
        if let ResetOutcome::Row(row) = reset_file(&path, options) {
            on_row(&row);
            rows.push(row);
        }
    }

    tracing::info!(
        dir = %dir.display(),
        flagged = rows.len(),
        execute = options.execute,
        "reseteo completado"
    );
    Ok(rows)
}

/// Cualquier fallo de lectura, interpretación o escritura deja el archivo sin fila.
pub fn reset_file(path: &Path, options: &ResetOptions) -> ResetOutcome {
    if ImageKind::from_path(path) != ImageKind::Jpeg {
        return ResetOutcome::Silent;
    }

    match try_reset_file(path, options) {
        Ok(Some(row)) => ResetOutcome::Row(row),
        Ok(None) => ResetOutcome::Silent,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "archivo omitido");
            ResetOutcome::Silent
        }
    }
}

fn try_reset_file(path: &Path, options: &ResetOptions) -> Result<Option<ResetRow>, MetadataError> {
    let Some(raw) = read_capture_time(path)? else {
        return Ok(None);
    };

    let year = parse_capture_year(&raw)?;
    if year >= options.cutoff_year {
        return Ok(None);
    }

    let action = if options.execute {
        remove_capture_time(path)?;
        ResetAction::ResetDone
    } else {
        ResetAction::WouldReset
    };

    Ok(Some(ResetRow {
        action,
        filename: display_name(path),
        year,
    }))
}
