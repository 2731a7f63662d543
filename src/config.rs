//! Opciones de ejecución para la auditoría y el reseteo de fechas.

use chrono::{Datelike, Local};

/// Primer año considerado plausible para una fotografía.
pub const VALIDITY_FLOOR_YEAR: i32 = 1980;

/// Rango de años aceptado para las fechas extraídas de nombres de archivo.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DateBounds {
    pub floor_year: i32,
    pub current_year: i32,
}

impl DateBounds {
    pub fn new(floor_year: i32, current_year: i32) -> Self {
        Self {
            floor_year,
            current_year,
        }
    }

    /// Usa el año actual del reloj local como límite superior.
    pub fn from_clock() -> Self {
        Self::new(VALIDITY_FLOOR_YEAR, Local::now().year())
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.floor_year..=self.current_year).contains(&year)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AuditOptions {
    /// Escribe la fecha del nombre en la metadata cuando no coincide.
    pub fix: bool,
    /// Compara año, mes y día en lugar de solo el año.
    pub extensive: bool,
    pub bounds: DateBounds,
}

impl AuditOptions {
    pub fn new(fix: bool, extensive: bool) -> Self {
        Self {
            fix,
            extensive,
            bounds: DateBounds::from_clock(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ResetOptions {
    /// Sin esta bandera solo se muestra lo que se haría.
    pub execute: bool,
    pub cutoff_year: i32,
}

impl ResetOptions {
    pub fn new(execute: bool) -> Self {
        Self {
            execute,
            cutoff_year: VALIDITY_FLOOR_YEAR,
        }
    }
}
