//! Inicialización de `tracing` para los binarios.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "warn";

/// Instala un suscriptor que escribe en stderr, filtrado por `RUST_LOG`.
///
/// La salida estándar queda reservada para la tabla del reporte. Las llamadas
/// posteriores no tienen efecto.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
