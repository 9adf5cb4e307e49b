// Biblioteca raíz del crate `glosas`.
// Reexporta los módulos principales y el punto de entrada `construir_reporte`
// que arma el reporte de ofensores de glosa.
pub mod algorithm;
pub mod config;
pub mod error;
pub mod excel;
pub mod models;
pub mod server;
pub mod server_handlers;

pub use algorithm::construir_reporte;
pub use error::{GlosaError, Result};

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
