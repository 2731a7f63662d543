//! Interpretación del valor de la etiqueta de fecha de captura (`YYYY:MM:DD HH:MM:SS`).

use crate::error::MetadataError;
use crate::filename_date::FilenameDate;

/// Fecha tomada de la metadata, como texto, tal como está almacenada.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MetadataDate {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl MetadataDate {
    /// `YYYY:MM:DD`, tal como se muestra en el reporte.
    pub fn display(&self) -> String {
        format!("{}:{}:{}", self.year, self.month, self.day)
    }

    /// Un año vacío cuenta como ausencia de fecha.
    pub fn has_year(&self) -> bool {
        !self.year.is_empty()
    }
}

/// Granularidad con la que se comparan la fecha del nombre y la de la metadata.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ComparisonPolicy {
    YearOnly,
    FullDate,
}

impl ComparisonPolicy {
    pub fn from_extensive(extensive: bool) -> Self {
        if extensive {
            Self::FullDate
        } else {
            Self::YearOnly
        }
    }
}

/// Toma la parte de fecha (antes del primer espacio) y la separa por `:`.
pub fn parse_metadata_date(raw: &str) -> Result<MetadataDate, MetadataError> {
    let date_part = raw.split(' ').next().unwrap_or_default();
    let parts: Vec<&str> = date_part.split(':').collect();

    match parts.as_slice() {
        [year, month, day] => Ok(MetadataDate {
            year: year.to_string(),
            month: month.to_string(),
            day: day.to_string(),
        }),
        _ => Err(MetadataError::MalformedCaptureTime(raw.to_string())),
    }
}

/// Año numérico de la fecha de captura: el texto previo al primer `:`.
pub fn parse_capture_year(raw: &str) -> Result<i32, MetadataError> {
    let year = raw.split(':').next().unwrap_or_default().trim();
    year.parse()
        .map_err(|_| MetadataError::MalformedCaptureTime(raw.to_string()))
}

/// Indica si la metadata es posterior a la fecha del nombre.
///
/// La comparación es de texto; con campos rellenos con ceros coincide con el
/// orden cronológico.
pub fn is_later_than(
    metadata: &MetadataDate,
    filename: &FilenameDate,
    policy: ComparisonPolicy,
) -> bool {
    match policy {
        ComparisonPolicy::YearOnly => metadata.year.as_str() > filename.year.as_str(),
        ComparisonPolicy::FullDate => {
            (
                metadata.year.as_str(),
                metadata.month.as_str(),
                metadata.day.as_str(),
            ) > (
                filename.year.as_str(),
                filename.month.as_str(),
                filename.day.as_str(),
            )
        }
    }
}
