//! Lectura de un bloque EXIF y creación de uno nuevo cuando la imagen no tenía.

use exif::experimental::Writer;
use exif::{Field, In, Reader, Tag, Value};
use std::io::Cursor;

use crate::error::MetadataError;

/// Campos EXIF decodificados de una imagen.
pub struct ExifRecord {
    exif: exif::Exif,
}

impl std::fmt::Debug for ExifRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExifRecord").finish_non_exhaustive()
    }
}

impl ExifRecord {
    /// Decodifica la carga TIFF de un segmento APP1 `Exif`.
    pub fn decode(tiff: Vec<u8>) -> Result<Self, MetadataError> {
        let exif = Reader::new().read_raw(tiff)?;
        Ok(Self { exif })
    }

    /// Bloque TIFF big-endian (`MM`) que solo contiene `DateTimeOriginal`.
    pub fn new_capture_time_block(value: &str) -> Result<Vec<u8>, MetadataError> {
        let field = Field {
            tag: Tag::DateTimeOriginal,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![value.as_bytes().to_vec()]),
        };

        let mut writer = Writer::new();
        writer.push_field(&field);
        let mut buffer = Cursor::new(Vec::new());
        writer.write(&mut buffer, false)?;
        Ok(buffer.into_inner())
    }

    /// Valor de `DateTimeOriginal` del IFD principal, si existe.
    pub fn capture_time(&self) -> Result<Option<String>, MetadataError> {
        let Some(field) = self.exif.get_field(Tag::DateTimeOriginal, In::PRIMARY) else {
            return Ok(None);
        };

        match &field.value {
            Value::Ascii(values) => Ok(Some(
                values
                    .first()
                    .map(|value| String::from_utf8_lossy(value).into_owned())
                    .unwrap_or_default(),
            )),
            other => Err(MetadataError::MalformedCaptureTime(format!("{other:?}"))),
        }
    }
}
