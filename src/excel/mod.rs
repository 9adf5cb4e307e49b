//! Colaboradores de entrada/salida del reporte.
//!
//! Submódulos:
//! - `io`: decodificación de xlsx/xlsb (calamine) y csv (polars) a `TablaGlosas`
//! - `escritura`: serialización del reporte a xlsx (umya-spreadsheet)

/// Lectura de planillas y csv
pub mod io;

/// Escritura del reporte final
pub mod escritura;

pub use io::{extension_de, leer_tabla, leer_tabla_archivo, FORMATOS_SOPORTADOS};
pub use escritura::{escribir_reporte_archivo, escribir_reporte_xlsx, MIME_XLSX, NOMBRE_ARCHIVO_REPORTE};
