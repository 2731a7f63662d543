//! Tablas de ancho fijo que imprimen la auditoría y el reseteo.

use console::{StyledObject, style};

const STATUS_WIDTH: usize = 12;
const FILENAME_WIDTH: usize = 35;
const FILENAME_DATE_WIDTH: usize = 15;

const AUDIT_SEPARATOR_WIDTH: usize = 95;
const RESET_SEPARATOR_WIDTH: usize = 65;

pub const DRY_RUN_NOTICE: &str = "RUNNING IN DRY-RUN MODE. Use --execute to apply changes.";

/// Estado asignado a cada archivo durante la auditoría.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuditStatus {
    Skipped,
    NoDate,
    Error,
    Mismatch,
    Fixed,
    ErrFix,
    Ok,
}

impl AuditStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Skipped => "[SKIPPED]",
            Self::NoDate => "[NO DATE]",
            Self::Error => "[ERROR]",
            Self::Mismatch => "[MISMATCH]",
            Self::Fixed => "[FIXED]",
            Self::ErrFix => "[ERR-FIX]",
            Self::Ok => "[OK]",
        }
    }

    fn paint(self, padded: String) -> StyledObject<String> {
        match self {
            Self::Ok | Self::Fixed => style(padded).green(),
            Self::Mismatch | Self::NoDate => style(padded).yellow(),
            Self::Error | Self::ErrFix => style(padded).red(),
            Self::Skipped => style(padded).dim(),
        }
    }
}

/// Acción reportada por el reseteo de fechas inválidas.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResetAction {
    WouldReset,
    ResetDone,
}

impl ResetAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::WouldReset => "[WOULD RESET]",
            Self::ResetDone => "[RESET DONE]",
        }
    }

    fn paint(self, padded: String) -> StyledObject<String> {
        match self {
            Self::WouldReset => style(padded).yellow(),
            Self::ResetDone => style(padded).green(),
        }
    }
}

/// Fila de la tabla de auditoría.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuditRow {
    pub status: AuditStatus,
    pub filename: String,
    pub filename_date: String,
    pub metadata_date: String,
}

/// Fila de la tabla de reseteo.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResetRow {
    pub action: ResetAction,
    pub filename: String,
    pub year: i32,
}

pub fn audit_header() -> String {
    format!(
        "{:<STATUS_WIDTH$} | {:<FILENAME_WIDTH$} | {:<FILENAME_DATE_WIDTH$} | {}",
        "Status", "Filename", "Filename Date", "Metadata Date"
    )
}

pub fn reset_header() -> String {
    format!(
        "{:<STATUS_WIDTH$} | {:<FILENAME_WIDTH$} | {}",
        "Action", "Filename", "Detected Year"
    )
}

/// Fila de la auditoría; con `colored` el estado lleva el color de su nivel.
pub fn format_audit_row(row: &AuditRow, colored: bool) -> String {
    let status = format!("{:<STATUS_WIDTH$}", row.status.label());
    let status = if colored {
        row.status.paint(status).force_styling(true).to_string()
    } else {
        status
    };
    format!("{} | {}", status, audit_columns(row))
}

pub fn format_reset_row(row: &ResetRow, colored: bool) -> String {
    let action = format!("{:<STATUS_WIDTH$}", row.action.label());
    let action = if colored {
        row.action.paint(action).force_styling(true).to_string()
    } else {
        action
    };
    format!("{} | {}", action, reset_columns(row))
}

pub fn print_audit_header() {
    println!("{}", audit_header());
    println!("{}", "-".repeat(AUDIT_SEPARATOR_WIDTH));
}

pub fn print_audit_row(row: &AuditRow) {
    println!("{}", format_audit_row(row, console::colors_enabled()));
}

pub fn print_reset_header() {
    println!("{}", reset_header());
    println!("{}", "-".repeat(RESET_SEPARATOR_WIDTH));
}

pub fn print_reset_row(row: &ResetRow) {
    println!("{}", format_reset_row(row, console::colors_enabled()));
}

pub fn print_dry_run_notice() {
    println!("{}\n", style(DRY_RUN_NOTICE).yellow().bold());
}

fn audit_columns(row: &AuditRow) -> String {
    format!(
        "{:<FILENAME_WIDTH$} | {:<FILENAME_DATE_WIDTH$} | {}",
        row.filename, row.filename_date, row.metadata_date
    )
}

fn reset_columns(row: &ResetRow) -> String {
    format!("{:<FILENAME_WIDTH$} | {}", row.filename, row.year)
}
