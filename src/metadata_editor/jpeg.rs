//! Lectura y reescritura de la estructura de segmentos de un archivo JPEG.
//!
//! Solo se interpreta la cabecera hasta el inicio del escaneo (SOS); los datos
//! comprimidos se conservan byte a byte.

use crate::error::MetadataError;

const MARKER_PREFIX: u8 = 0xFF;
const SOI: u8 = 0xD8;
const EOI: u8 = 0xD9;
const SOS: u8 = 0xDA;
const APP0: u8 = 0xE0;
const APP1: u8 = 0xE1;
const TEM: u8 = 0x01;

const EXIF_HEADER: &[u8] = b"Exif\0\0";

/// Tamaño máximo de la carga de un segmento (el campo de longitud incluye sus 2 bytes).
const MAX_SEGMENT_PAYLOAD: usize = u16::MAX as usize - 2;

#[derive(Clone, Debug, Eq, PartialEq)]
struct Segment {
    marker: u8,
    payload: Vec<u8>,
}

impl Segment {
    fn is_standalone(marker: u8) -> bool {
        marker == TEM || (0xD0..=0xD7).contains(&marker)
    }

    fn is_exif(&self) -> bool {
        self.marker == APP1 && self.payload.starts_with(EXIF_HEADER)
    }
}

/// Segmentos de cabecera de un JPEG junto con el resto del archivo sin interpretar.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JpegSegments {
    segments: Vec<Segment>,
    tail: Vec<u8>,
}

impl JpegSegments {
    pub fn parse(bytes: &[u8]) -> Result<Self, MetadataError> {
        if !infer::image::is_jpeg(bytes) {
            return Err(MetadataError::NotJpeg);
        }

        let mut segments = Vec::new();
        let mut offset = 2;

        loop {
            if bytes.get(offset) != Some(&MARKER_PREFIX) {
                return Err(MetadataError::MalformedSegment { offset });
            }

            let segment_start = offset;
            while bytes.get(offset) == Some(&MARKER_PREFIX) {
                offset += 1;
            }
            let marker = *bytes
                .get(offset)
                .ok_or(MetadataError::MalformedSegment { offset })?;
            offset += 1;

            if marker == SOS || marker == EOI {
                return Ok(Self {
                    segments,
                    tail: bytes[segment_start..].to_vec(),
                });
            }

            if Segment::is_standalone(marker) {
                segments.push(Segment {
                    marker,
                    payload: Vec::new(),
                });
                continue;
            }

            let length = read_u16_be(bytes, offset)
                .ok_or(MetadataError::MalformedSegment { offset })?
                as usize;
            if length < 2 {
                return Err(MetadataError::MalformedSegment { offset });
            }

            let payload = bytes
                .get(offset + 2..offset + length)
                .ok_or(MetadataError::MalformedSegment { offset })?;
            segments.push(Segment {
                marker,
                payload: payload.to_vec(),
            });
            offset += length;
        }
    }

    /// Carga TIFF del primer segmento EXIF, sin la cabecera `Exif\0\0`.
    pub fn exif_payload(&self) -> Option<&[u8]> {
        self.segments
            .iter()
            .find(|segment| segment.is_exif())
            .map(|segment| &segment.payload[EXIF_HEADER.len()..])
    }

    /// Devuelve una copia con el bloque EXIF sustituido, insertado o eliminado (`None`).
    pub fn with_exif_payload(&self, tiff: Option<&[u8]>) -> Result<Self, MetadataError> {
        let mut segments = self.segments.clone();
        let existing = segments.iter().position(Segment::is_exif);

        match (tiff, existing) {
            (Some(tiff), existing) => {
                let mut payload = Vec::with_capacity(EXIF_HEADER.len() + tiff.len());
                payload.extend_from_slice(EXIF_HEADER);
                payload.extend_from_slice(tiff);
                if payload.len() > MAX_SEGMENT_PAYLOAD {
                    return Err(MetadataError::ExifTooLarge(tiff.len()));
                }

                let segment = Segment {
                    marker: APP1,
                    payload,
                };
                match existing {
                    Some(index) => segments[index] = segment,
                    None => {
                        // EXIF va después de JFIF (APP0) si existe.
                        let index = segments
                            .iter()
                            .position(|segment| segment.marker != APP0)
                            .unwrap_or(segments.len());
                        segments.insert(index, segment);
                    }
                }
            }
            (None, Some(index)) => {
                segments.remove(index);
            }
            (None, None) => {}
        }

        Ok(Self {
            segments,
            tail: self.tail.clone(),
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![MARKER_PREFIX, SOI];

        for segment in &self.segments {
            bytes.push(MARKER_PREFIX);
            bytes.push(segment.marker);
            if Segment::is_standalone(segment.marker) {
                continue;
            }
            // `with_exif_payload` y `parse` garantizan que la longitud cabe en u16.
            let length = (segment.payload.len() + 2) as u16;
            bytes.extend_from_slice(&length.to_be_bytes());
            bytes.extend_from_slice(&segment.payload);
        }

        bytes.extend_from_slice(&self.tail);
        bytes
    }
}

fn read_u16_be(bytes: &[u8], offset: usize) -> Option<u16> {
    let raw = bytes.get(offset..offset + 2)?;
    Some(u16::from_be_bytes([raw[0], raw[1]]))
}
