//! Operaciones sobre la fecha de captura EXIF de imágenes JPEG en disco.
//!
//! Cada escritura sigue el mismo camino: leer los segmentos, editar el bloque
//! TIFF en sitio, generar un buffer nuevo, verificarlo y reemplazar el original.

use std::fs;
use std::path::Path;

use super::exif_record::ExifRecord;
use super::jpeg::JpegSegments;
use super::tiff::TiffBlock;
use super::utils::replace_file_contents;
use crate::error::MetadataError;

fn read_segments(path: &Path) -> Result<JpegSegments, MetadataError> {
    let bytes = fs::read(path).map_err(|e| MetadataError::io(path, e))?;
    JpegSegments::parse(&bytes)
}

fn capture_time_of(segments: &JpegSegments) -> Result<Option<String>, MetadataError> {
    match segments.exif_payload() {
        Some(payload) => ExifRecord::decode(payload.to_vec())?.capture_time(),
        None => Ok(None),
    }
}

/// Lee `DateTimeOriginal`. `Ok(None)` si la imagen no tiene EXIF o carece de la etiqueta.
pub fn read_capture_time(path: &Path) -> Result<Option<String>, MetadataError> {
    capture_time_of(&read_segments(path)?)
}

/// Escribe `value` como fecha de captura y guarda la imagen en su lugar.
pub fn write_capture_time(path: &Path, value: &str) -> Result<(), MetadataError> {
    let segments = read_segments(path)?;
    let tiff = match segments.exif_payload() {
        Some(payload) => {
            // Falla antes de tocar nada si el bloque actual no es legible.
            ExifRecord::decode(payload.to_vec())?;
            TiffBlock::parse(payload.to_vec())?
                .with_capture_time(value)?
                .as_bytes()
                .to_vec()
        }
        None => ExifRecord::new_capture_time_block(value)?,
    };

    let bytes = segments.with_exif_payload(Some(&tiff))?.to_bytes();
    verify_capture_time(&bytes, Some(value))?;
    replace_file_contents(path, &bytes)?;

    tracing::debug!(path = %path.display(), value, "fecha de captura escrita");
    Ok(())
}

/// Elimina la fecha de captura y guarda la imagen en su lugar.
///
/// Si no queda ninguna entrada en el IFD principal, el segmento APP1 completo desaparece.
pub fn remove_capture_time(path: &Path) -> Result<(), MetadataError> {
    let segments = read_segments(path)?;
    let Some(payload) = segments.exif_payload() else {
        return Ok(());
    };

    let stripped = TiffBlock::parse(payload.to_vec())?.without_capture_time()?;
    let bytes = segments
        .with_exif_payload(stripped.as_ref().map(TiffBlock::as_bytes))?
        .to_bytes();
    verify_capture_time(&bytes, None)?;
    replace_file_contents(path, &bytes)?;

    tracing::debug!(
        path = %path.display(),
        segment_removed = stripped.is_none(),
        "fecha de captura eliminada"
    );
    Ok(())
}

/// Comprueba que un buffer JPEG recién generado lleve la fecha de captura esperada.
pub fn verify_capture_time(bytes: &[u8], expected: Option<&str>) -> Result<(), MetadataError> {
    let found = capture_time_of(&JpegSegments::parse(bytes)?)?;
    if found.as_deref() == expected {
        return Ok(());
    }

    Err(MetadataError::Verification(format!(
        "se esperaba {:?} y se encontró {:?}",
        expected, found
    )))
}
