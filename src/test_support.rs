//! Generadores de imágenes JPEG reales para las pruebas.

use std::fs;
use std::path::{Path, PathBuf};

use exif::{In, Reader, Tag, Value};

use crate::metadata_editor::{ExifRecord, JpegSegments};

/// JPEG de 8x8 píxeles sin metadata EXIF.
pub fn sample_jpeg() -> Vec<u8> {
    let pixels = ::image::RgbImage::from_pixel(8, 8, ::image::Rgb([120, 80, 40]));
    let mut bytes = Vec::new();
    ::image::codecs::jpeg::JpegEncoder::new(&mut bytes)
        .encode_image(&pixels)
        .expect("el codificador JPEG debería aceptar la imagen de prueba");
    bytes
}

/// JPEG con `DateTimeOriginal` establecido a `value`.
pub fn jpeg_with_capture_time(value: &str) -> Vec<u8> {
    let tiff = ExifRecord::new_capture_time_block(value)
        .expect("el bloque EXIF de prueba debería codificarse");
    jpeg_with_tiff(&tiff)
}

/// JPEG con `tiff` como carga de su segmento EXIF.
pub fn jpeg_with_tiff(tiff: &[u8]) -> Vec<u8> {
    JpegSegments::parse(&sample_jpeg())
        .and_then(|segments| segments.with_exif_payload(Some(tiff)))
        .expect("el JPEG de prueba debería aceptar el bloque EXIF")
        .to_bytes()
}

pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("no se pudo escribir el archivo de prueba");
    path
}

const TAG_MAKE: u16 = 0x010F;
const TAG_COMPRESSION: u16 = 0x0103;
const TAG_THUMBNAIL_OFFSET: u16 = 0x0201;
const TAG_THUMBNAIL_LENGTH: u16 = 0x0202;
const TAG_EXIF_POINTER: u16 = 0x8769;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;
const TAG_MAKER_NOTE: u16 = 0x927C;
pub const TAG_UNKNOWN: u16 = 0xC000;

/// Bloque TIFF little-endian armado a mano con la disposición de una cámara:
/// IFD0, IFD Exif con MakerNote y una etiqueta de tipo desconocido, e IFD1 con miniatura.
#[derive(Clone, Debug)]
pub struct TiffFixture {
    pub make: bool,
    pub exif_ifd: bool,
    pub capture_time: Option<&'static str>,
    pub maker_note: Option<usize>,
    pub unknown_tag: bool,
    pub thumbnail: bool,
}

impl TiffFixture {
    pub fn camera(capture_time: Option<&'static str>) -> Self {
        Self {
            make: true,
            exif_ifd: true,
            capture_time,
            maker_note: Some(64),
            unknown_tag: true,
            thumbnail: true,
        }
    }
}

struct RawEntry {
    tag: u16,
    kind: u16,
    count: u32,
    data: Vec<u8>,
}

impl RawEntry {
    fn ascii(tag: u16, text: &str) -> Self {
        let mut data = text.as_bytes().to_vec();
        data.push(0);
        Self {
            tag,
            kind: 2,
            count: data.len() as u32,
            data,
        }
    }

    fn short(tag: u16, value: u16) -> Self {
        Self {
            tag,
            kind: 3,
            count: 1,
            data: value.to_le_bytes().to_vec(),
        }
    }

    fn long(tag: u16, value: u32) -> Self {
        Self {
            tag,
            kind: 4,
            count: 1,
            data: value.to_le_bytes().to_vec(),
        }
    }

    fn out_of_line_len(&self) -> usize {
        if self.data.len() > 4 {
            self.data.len() + self.data.len() % 2
        } else {
            0
        }
    }
}

fn ifd_len(entries: &[RawEntry]) -> usize {
    2 + entries.len() * 12 + 4 + entries.iter().map(RawEntry::out_of_line_len).sum::<usize>()
}

/// Escribe el IFD al final de `buf`, con los valores largos justo detrás.
fn write_ifd(buf: &mut Vec<u8>, entries: &[RawEntry], next: u32) {
    let mut data_offset = buf.len() + 2 + entries.len() * 12 + 4;
    let mut data = Vec::new();

    buf.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for entry in entries {
        buf.extend_from_slice(&entry.tag.to_le_bytes());
        buf.extend_from_slice(&entry.kind.to_le_bytes());
        buf.extend_from_slice(&entry.count.to_le_bytes());
        if entry.data.len() <= 4 {
            let mut inline = [0u8; 4];
            inline[..entry.data.len()].copy_from_slice(&entry.data);
            buf.extend_from_slice(&inline);
        } else {
            buf.extend_from_slice(&(data_offset as u32).to_le_bytes());
            data.extend_from_slice(&entry.data);
            if entry.data.len() % 2 == 1 {
                data.push(0);
            }
            data_offset += entry.out_of_line_len();
        }
    }
    buf.extend_from_slice(&next.to_le_bytes());
    buf.extend_from_slice(&data);
}

pub fn maker_note_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

pub fn build_tiff(fixture: &TiffFixture) -> Vec<u8> {
    let mut exif_entries = Vec::new();
    if let Some(value) = fixture.capture_time {
        exif_entries.push(RawEntry::ascii(TAG_DATE_TIME_ORIGINAL, value));
    }
    if let Some(len) = fixture.maker_note {
        exif_entries.push(RawEntry {
            tag: TAG_MAKER_NOTE,
            kind: 7,
            count: len as u32,
            data: maker_note_bytes(len),
        });
    }
    if fixture.unknown_tag {
        exif_entries.push(RawEntry {
            tag: TAG_UNKNOWN,
            kind: 99,
            count: 1,
            data: vec![0xAB, 0xCD, 0, 0],
        });
    }
    let with_exif = fixture.exif_ifd && !exif_entries.is_empty();

    let mut primary = Vec::new();
    if fixture.make {
        primary.push(RawEntry::ascii(TAG_MAKE, "Camara"));
    }
    if with_exif {
        primary.push(RawEntry::long(TAG_EXIF_POINTER, 0));
    }

    let exif_offset = 8 + ifd_len(&primary);
    let thumbnail_ifd_offset = exif_offset + if with_exif { ifd_len(&exif_entries) } else { 0 };
    if let Some(pointer) = primary.iter_mut().find(|entry| entry.tag == TAG_EXIF_POINTER) {
        pointer.data = (exif_offset as u32).to_le_bytes().to_vec();
    }

    let mut buf = b"II*\0".to_vec();
    buf.extend_from_slice(&8u32.to_le_bytes());
    let next = if fixture.thumbnail {
        thumbnail_ifd_offset as u32
    } else {
        0
    };
    write_ifd(&mut buf, &primary, next);
    if with_exif {
        write_ifd(&mut buf, &exif_entries, 0);
    }

    if fixture.thumbnail {
        assert_eq!(buf.len(), thumbnail_ifd_offset);
        let thumbnail = sample_jpeg();
        let thumbnail_entries = [
            RawEntry::short(TAG_COMPRESSION, 6),
            RawEntry::long(TAG_THUMBNAIL_OFFSET, (thumbnail_ifd_offset + 2 + 3 * 12 + 4) as u32),
            RawEntry::long(TAG_THUMBNAIL_LENGTH, thumbnail.len() as u32),
        ];
        write_ifd(&mut buf, &thumbnail_entries, 0);
        buf.extend_from_slice(&thumbnail);
    }

    buf
}

/// Carga TIFF del segmento EXIF de un JPEG.
pub fn exif_payload_of(jpeg: &[u8]) -> Option<Vec<u8>> {
    JpegSegments::parse(jpeg)
        .expect("el JPEG de prueba debería poder leerse")
        .exif_payload()
        .map(<[u8]>::to_vec)
}

/// Campos del bloque EXIF de un JPEG, decodificados con `kamadak-exif`.
pub fn read_exif(jpeg: &[u8]) -> exif::Exif {
    let tiff = exif_payload_of(jpeg).expect("el JPEG debería tener EXIF");
    Reader::new()
        .read_raw(tiff)
        .expect("el bloque EXIF debería decodificarse")
}

/// Bytes de la miniatura de IFD1.
pub fn thumbnail_of(exif: &exif::Exif) -> Option<Vec<u8>> {
    let offset = exif
        .get_field(Tag::JPEGInterchangeFormat, In::THUMBNAIL)?
        .value
        .get_uint(0)? as usize;
    let length = exif
        .get_field(Tag::JPEGInterchangeFormatLength, In::THUMBNAIL)?
        .value
        .get_uint(0)? as usize;
    exif.buf().get(offset..offset + length).map(<[u8]>::to_vec)
}

/// MakerNote y el offset donde está guardada.
pub fn maker_note_of(exif: &exif::Exif) -> Option<(Vec<u8>, u32)> {
    match &exif.get_field(Tag::MakerNote, In::PRIMARY)?.value {
        Value::Undefined(bytes, offset) => Some((bytes.clone(), *offset)),
        _ => None,
    }
}
