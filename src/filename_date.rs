//! Extracción de fechas codificadas en nombres de archivo.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use crate::config::DateBounds;

/// Admite `YYYYMMDD`, `YYYY-MM-DD`, `YYYY_MM_DD` y sus mezclas.
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{4})[-_]?([0-9]{2})[-_]?([0-9]{2})").expect("patrón de fecha válido")
});

/// Fecha candidata tomada del nombre; conserva los dígitos tal como aparecen.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FilenameDate {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl FilenameDate {
    /// `YYYY:MM:DD`, formato usado en la columna del reporte.
    pub fn metadata_string(&self) -> String {
        format!("{}:{}:{}", self.year, self.month, self.day)
    }

    /// Valor completo para la etiqueta de fecha de captura, a medianoche.
    pub fn capture_time_value(&self) -> String {
        format!("{} 00:00:00", self.metadata_string())
    }

    fn as_numbers(&self) -> Option<(i32, u32, u32)> {
        Some((
            self.year.parse().ok()?,
            self.month.parse().ok()?,
            self.day.parse().ok()?,
        ))
    }
}

/// Busca la primera secuencia con forma de fecha en cualquier posición del nombre.
pub fn extract_filename_date(filename: &str) -> Option<FilenameDate> {
    let captures = DATE_PATTERN.captures(filename)?;
    Some(FilenameDate {
        year: captures[1].to_string(),
        month: captures[2].to_string(),
        day: captures[3].to_string(),
    })
}

/// Comprueba que la fecha exista en el calendario y caiga dentro de `bounds`.
///
/// Descarta secuencias numéricas que no son fechas, como los identificadores
/// de mensajes (`received_1476469...`).
pub fn is_valid_date(date: &FilenameDate, bounds: &DateBounds) -> bool {
    let Some((year, month, day)) = date.as_numbers() else {
        return false;
    };

    NaiveDate::from_ymd_opt(year, month, day).is_some() && bounds.contains(year)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: DateBounds = DateBounds {
        floor_year: 1980,
        current_year: 2025,
    };

    fn date(year: &str, month: &str, day: &str) -> FilenameDate {
        FilenameDate {
            year: year.into(),
            month: month.into(),
            day: day.into(),
        }
    }

    #[test]
    fn extracts_first_match_only() {
        let found = extract_filename_date("IMG_20230115_received_9999999.jpg");
        assert_eq!(found, Some(date("2023", "01", "15")));
    }

    #[test]
    fn extracts_separated_forms() {
        assert_eq!(
            extract_filename_date("photo 2021-07-04 party.jpeg"),
            Some(date("2021", "07", "04"))
        );
        assert_eq!(
            extract_filename_date("PXL_2019_12-31.jpg"),
            Some(date("2019", "12", "31"))
        );
    }

    #[test]
    fn no_match_without_enough_digits() {
        assert_eq!(extract_filename_date("holiday.jpg"), None);
        assert_eq!(extract_filename_date("IMG_1234.jpg"), None);
        assert_eq!(extract_filename_date("2023--01-15.jpg"), None);
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(!is_valid_date(&date("2023", "13", "01"), &BOUNDS));
        assert!(!is_valid_date(&date("2023", "01", "32"), &BOUNDS));
        assert!(!is_valid_date(&date("2023", "02", "30"), &BOUNDS));
        assert!(!is_valid_date(&date("2023", "02", "29"), &BOUNDS));
        assert!(is_valid_date(&date("2024", "02", "29"), &BOUNDS));
    }

    #[test]
    fn rejects_years_outside_bounds() {
        assert!(!is_valid_date(&date("1979", "12", "31"), &BOUNDS));
        assert!(is_valid_date(&date("1980", "01", "01"), &BOUNDS));
        assert!(is_valid_date(&date("2025", "12", "31"), &BOUNDS));
        assert!(!is_valid_date(&date("2026", "01", "01"), &BOUNDS));
    }

    #[test]
    fn message_ids_are_not_dates() {
        let found = extract_filename_date("received_1476469383212.jpeg");
        let Some(found) = found else {
            panic!("se esperaba una coincidencia");
        };
        assert_eq!(found, date("1476", "46", "93"));
        assert!(!is_valid_date(&found, &BOUNDS));
    }

    #[test]
    fn formats_metadata_values() {
        let found = date("2023", "01", "15");
        assert_eq!(found.metadata_string(), "2023:01:15");
        assert_eq!(found.capture_time_value(), "2023:01:15 00:00:00");
    }

    #[test]
    fn only_ascii_digits_form_a_date() {
        let arabic_indic = "IMG_\u{0662}\u{0660}\u{0662}\u{0663}\u{0660}\u{0661}\u{0661}\u{0665}.jpg";
        assert_eq!(extract_filename_date(arabic_indic), None);
        assert_eq!(
            extract_filename_date("IMG_\u{0662}\u{0660}\u{0662}\u{0663}_20230115.jpg"),
            Some(date("2023", "01", "15"))
        );
    }
}
