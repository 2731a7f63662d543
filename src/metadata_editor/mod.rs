//! Lectura y edición de la fecha de captura EXIF en archivos JPEG.

mod exif_record;
mod image;
mod jpeg;
mod tiff;
mod utils;

pub use exif_record::ExifRecord;
pub use image::{read_capture_time, remove_capture_time, verify_capture_time, write_capture_time};
pub use jpeg::JpegSegments;
