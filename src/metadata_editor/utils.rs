//! Utilidades compartidas para generar rutas temporales y reemplazar archivos.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::MetadataError;

/// Crea un nombre de archivo temporal estable en el mismo directorio que `path`.
pub fn generate_temp_filename(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let extension = path.extension().unwrap_or_default().to_string_lossy();

    // Usar timestamp para evitar colisiones entre ejecuciones consecutivas.
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    parent.join(format!(".{}_temp_{}.{}", stem, timestamp, extension))
}

/// Escribe `contents` en un temporal junto a `path` y lo renombra sobre el original.
pub fn replace_file_contents(path: &Path, contents: &[u8]) -> Result<(), MetadataError> {
    let temp_path = generate_temp_filename(path);

    fs::write(&temp_path, contents).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        MetadataError::io(&temp_path, e)
    })?;

    // El temporal hereda los permisos del original antes de ocupar su lugar.
    fs::metadata(path)
        .and_then(|metadata| fs::set_permissions(&temp_path, metadata.permissions()))
        .map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            MetadataError::io(path, e)
        })?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        MetadataError::io(path, e)
    })
}
