//! Edición en sitio de `DateTimeOriginal` dentro del bloque TIFF de un segmento EXIF.
//!
//! Ninguna operación mueve datos existentes: los valores se sobrescriben en su
//! lugar o se añaden al final del bloque, y los IFD que necesitan crecer se
//! copian al final con la entrada nueva. Así los offsets internos (MakerNote,
//! miniatura, campos desconocidos) siguen siendo válidos.

use crate::error::MetadataError;

const TAG_EXIF_POINTER: u16 = 0x8769;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;

const TYPE_ASCII: u16 = 2;
const TYPE_LONG: u16 = 4;

const HEADER_SIZE: usize = 8;
const ENTRY_SIZE: usize = 12;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    fn read_u16(self, bytes: &[u8], offset: usize) -> Result<u16, MetadataError> {
        let raw: [u8; 2] = bytes
            .get(offset..offset + 2)
            .and_then(|raw| raw.try_into().ok())
            .ok_or(MetadataError::MalformedTiff { offset })?;
        Ok(match self {
            Self::Little => u16::from_le_bytes(raw),
            Self::Big => u16::from_be_bytes(raw),
        })
    }

    fn read_u32(self, bytes: &[u8], offset: usize) -> Result<u32, MetadataError> {
        let raw: [u8; 4] = bytes
            .get(offset..offset + 4)
            .and_then(|raw| raw.try_into().ok())
            .ok_or(MetadataError::MalformedTiff { offset })?;
        Ok(match self {
            Self::Little => u32::from_le_bytes(raw),
            Self::Big => u32::from_be_bytes(raw),
        })
    }

    fn u16_bytes(self, value: u16) -> [u8; 2] {
        match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
        }
    }

    fn u32_bytes(self, value: u32) -> [u8; 4] {
        match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
        }
    }
}

/// Posición de un IFD: offset de su contador y número de entradas.
#[derive(Clone, Copy, Debug)]
struct Ifd {
    offset: usize,
    count: usize,
}

impl Ifd {
    fn entry_offset(&self, index: usize) -> usize {
        self.offset + 2 + index * ENTRY_SIZE
    }

    /// Fin del IFD, incluido el puntero al siguiente.
    fn end(&self) -> usize {
        self.entry_offset(self.count) + 4
    }
}

/// Carga TIFF de un segmento EXIF tal como está en el archivo.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TiffBlock {
    bytes: Vec<u8>,
    order: ByteOrder,
}

impl TiffBlock {
    pub fn parse(bytes: Vec<u8>) -> Result<Self, MetadataError> {
        let order = match bytes.get(..2) {
            Some(b"II") => ByteOrder::Little,
            Some(b"MM") => ByteOrder::Big,
            _ => return Err(MetadataError::MalformedTiff { offset: 0 }),
        };
        if order.read_u16(&bytes, 2)? != 42 {
            return Err(MetadataError::MalformedTiff { offset: 2 });
        }

        let block = Self { bytes, order };
        block.primary_ifd()?;
        Ok(block)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Escribe `value` en `DateTimeOriginal`, creando la entrada (y el IFD Exif) si falta.
    pub fn with_capture_time(&self, value: &str) -> Result<Self, MetadataError> {
        let mut updated = self.clone();
        let mut data = value.as_bytes().to_vec();
        data.push(0);

        let primary = updated.primary_ifd()?;
        let Some(exif) = updated.exif_ifd(&primary)? else {
            updated.add_exif_ifd(primary, &data)?;
            return Ok(updated);
        };

        match updated.find_entry(&exif, TAG_DATE_TIME_ORIGINAL)? {
            Some(index) => updated.overwrite_ascii(&exif, index, &data)?,
            None => {
                let value_offset = updated.append_data(&data)?;
                let entry = updated.entry_bytes(
                    TAG_DATE_TIME_ORIGINAL,
                    TYPE_ASCII,
                    data.len() as u32,
                    value_offset,
                );
                let relocated = updated.append_ifd_with(&exif, entry)?;
                let pointer = updated
                    .find_entry(&primary, TAG_EXIF_POINTER)?
                    .ok_or(MetadataError::MalformedTiff {
                        offset: primary.offset,
                    })?;
                updated.write_u32(primary.entry_offset(pointer) + 8, relocated);
            }
        }

        Ok(updated)
    }

    /// Quita `DateTimeOriginal`. Devuelve `None` si el bloque queda sin ninguna entrada
    /// en el IFD principal, en cuyo caso el segmento EXIF completo sobra.
    pub fn without_capture_time(&self) -> Result<Option<Self>, MetadataError> {
        let mut updated = self.clone();
        let mut primary = updated.primary_ifd()?;
        let Some(mut exif) = updated.exif_ifd(&primary)? else {
            return Ok(Some(updated));
        };

        let mut removed = false;
        while let Some(index) = updated.find_entry(&exif, TAG_DATE_TIME_ORIGINAL)? {
            updated.clear_value(&exif, index)?;
            updated.remove_entry(&mut exif, index);
            removed = true;
        }

        if removed && exif.count == 0 {
            if let Some(pointer) = updated.find_entry(&primary, TAG_EXIF_POINTER)? {
                updated.remove_entry(&mut primary, pointer);
            }
            if primary.count == 0 {
                return Ok(None);
            }
        }

        Ok(Some(updated))
    }

    fn primary_ifd(&self) -> Result<Ifd, MetadataError> {
        let offset = self.order.read_u32(&self.bytes, 4)? as usize;
        self.read_ifd(offset)
    }

    fn exif_ifd(&self, primary: &Ifd) -> Result<Option<Ifd>, MetadataError> {
        let Some(index) = self.find_entry(primary, TAG_EXIF_POINTER)? else {
            return Ok(None);
        };
        let offset = self
            .order
            .read_u32(&self.bytes, primary.entry_offset(index) + 8)? as usize;
        self.read_ifd(offset).map(Some)
    }

    fn read_ifd(&self, offset: usize) -> Result<Ifd, MetadataError> {
        if offset < HEADER_SIZE {
            return Err(MetadataError::MalformedTiff { offset });
        }
        let count = self.order.read_u16(&self.bytes, offset)? as usize;
        let ifd = Ifd { offset, count };
        if ifd.end() > self.bytes.len() {
            return Err(MetadataError::MalformedTiff { offset });
        }
        Ok(ifd)
    }

    fn find_entry(&self, ifd: &Ifd, tag: u16) -> Result<Option<usize>, MetadataError> {
        for index in 0..ifd.count {
            if self.order.read_u16(&self.bytes, ifd.entry_offset(index))? == tag {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Sobrescribe un valor ASCII si cabe; si no, lo añade al final y repunta la entrada.
    fn overwrite_ascii(&mut self, ifd: &Ifd, index: usize, data: &[u8]) -> Result<(), MetadataError> {
        let entry = ifd.entry_offset(index);
        let kind = self.order.read_u16(&self.bytes, entry + 2)?;
        let count = self.order.read_u32(&self.bytes, entry + 4)? as usize;

        if kind == TYPE_ASCII && count >= data.len() && count > 4 {
            let offset = self.order.read_u32(&self.bytes, entry + 8)? as usize;
            let target = self
                .bytes
                .get_mut(offset..offset + count)
                .ok_or(MetadataError::MalformedTiff { offset })?;
            target.fill(0);
            target[..data.len()].copy_from_slice(data);
            return Ok(());
        }

        let value_offset = self.append_data(data)?;
        self.write_u16(entry + 2, TYPE_ASCII);
        self.write_u32(entry + 4, data.len() as u32);
        self.write_u32(entry + 8, value_offset);
        Ok(())
    }

    /// Borra los bytes de un valor ASCII almacenado fuera de la entrada.
    fn clear_value(&mut self, ifd: &Ifd, index: usize) -> Result<(), MetadataError> {
        let entry = ifd.entry_offset(index);
        let kind = self.order.read_u16(&self.bytes, entry + 2)?;
        let count = self.order.read_u32(&self.bytes, entry + 4)? as usize;
        if kind != TYPE_ASCII || count <= 4 {
            return Ok(());
        }

        let offset = self.order.read_u32(&self.bytes, entry + 8)? as usize;
        if let Some(value) = self.bytes.get_mut(offset..offset + count) {
            value.fill(0);
        }
        Ok(())
    }

    /// Desplaza las entradas siguientes (y el puntero al próximo IFD) una posición.
    fn remove_entry(&mut self, ifd: &mut Ifd, index: usize) {
        let start = ifd.entry_offset(index);
        let end = ifd.end();
        self.bytes.copy_within(start + ENTRY_SIZE..end, start);
        self.bytes[end - ENTRY_SIZE..end].fill(0);

        ifd.count -= 1;
        self.write_u16(ifd.offset, ifd.count as u16);
    }

    /// Crea un IFD Exif con la fecha y copia el IFD principal al final con su puntero.
    fn add_exif_ifd(&mut self, primary: Ifd, data: &[u8]) -> Result<(), MetadataError> {
        let value_offset = self.append_data(data)?;
        let entry = self.entry_bytes(
            TAG_DATE_TIME_ORIGINAL,
            TYPE_ASCII,
            data.len() as u32,
            value_offset,
        );
        let exif_ifd = self.ifd_bytes(&[entry], 0);
        let exif_offset = self.append_aligned(&exif_ifd)?;

        let pointer = self.entry_bytes(TAG_EXIF_POINTER, TYPE_LONG, 1, exif_offset);
        let relocated = self.append_ifd_with(&primary, pointer)?;
        self.write_u32(4, relocated);
        Ok(())
    }

    /// Copia `ifd` al final del bloque con `entry` insertada en orden de etiqueta.
    fn append_ifd_with(&mut self, ifd: &Ifd, entry: [u8; ENTRY_SIZE]) -> Result<u32, MetadataError> {
        let tag = self.order.read_u16(&entry, 0)?;
        let mut entries = Vec::with_capacity(ifd.count + 1);
        for index in 0..ifd.count {
            let offset = ifd.entry_offset(index);
            let mut existing = [0u8; ENTRY_SIZE];
            existing.copy_from_slice(&self.bytes[offset..offset + ENTRY_SIZE]);
            entries.push(existing);
        }

        let mut position = entries.len();
        for (index, existing) in entries.iter().enumerate() {
            if self.order.read_u16(existing, 0)? > tag {
                position = index;
                break;
            }
        }
        entries.insert(position, entry);

        let next = self.order.read_u32(&self.bytes, ifd.entry_offset(ifd.count))?;
        let bytes = self.ifd_bytes(&entries, next);
        self.append_aligned(&bytes)
    }

    fn ifd_bytes(&self, entries: &[[u8; ENTRY_SIZE]], next: u32) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(2 + entries.len() * ENTRY_SIZE + 4);
        bytes.extend_from_slice(&self.order.u16_bytes(entries.len() as u16));
        for entry in entries {
            bytes.extend_from_slice(entry);
        }
        bytes.extend_from_slice(&self.order.u32_bytes(next));
        bytes
    }

    fn entry_bytes(&self, tag: u16, kind: u16, count: u32, value: u32) -> [u8; ENTRY_SIZE] {
        let mut entry = [0u8; ENTRY_SIZE];
        entry[0..2].copy_from_slice(&self.order.u16_bytes(tag));
        entry[2..4].copy_from_slice(&self.order.u16_bytes(kind));
        entry[4..8].copy_from_slice(&self.order.u32_bytes(count));
        entry[8..12].copy_from_slice(&self.order.u32_bytes(value));
        entry
    }

    fn append_data(&mut self, data: &[u8]) -> Result<u32, MetadataError> {
        self.append_aligned(data)
    }

    /// Los offsets TIFF deben ser pares.
    fn append_aligned(&mut self, data: &[u8]) -> Result<u32, MetadataError> {
        if self.bytes.len() % 2 == 1 {
            self.bytes.push(0);
        }
        let offset = u32::try_from(self.bytes.len())
            .map_err(|_| MetadataError::ExifTooLarge(self.bytes.len()))?;
        self.bytes.extend_from_slice(data);
        Ok(offset)
    }

    fn write_u16(&mut self, offset: usize, value: u16) {
        let bytes = self.order.u16_bytes(value);
        self.bytes[offset..offset + 2].copy_from_slice(&bytes);
    }

    fn write_u32(&mut self, offset: usize, value: u32) {
        let bytes = self.order.u32_bytes(value);
        self.bytes[offset..offset + 4].copy_from_slice(&bytes);
    }
}
