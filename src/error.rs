use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlosaError {
    #[error("Tipo de archivo no soportado: '{0}' (se aceptan xlsx, xlsb y csv)")]
    FormatoNoSoportado(String),

    #[error("El archivo no contiene las columnas necesarias: {}", .0.join(", "))]
    ColumnasFaltantes(Vec<String>),

    #[error("Valor no numérico '{valor}' en la columna '{columna}' (fila {fila})")]
    ValorNoNumerico {
        columna: String,
        fila: usize,
        valor: String,
    },

    /// Error interno: el total por código no se encontró exactamente una vez
    #[error("Inconsistencia de agregación para ({marca}, {operadora}, {codigo}): {coincidencias} coincidencias")]
    ConsistenciaAgregacion {
        marca: String,
        operadora: String,
        codigo: String,
        coincidencias: usize,
    },

    #[error("Error al leer el archivo: {0}")]
    Lectura(String),

    #[error("Error al escribir el reporte: {0}")]
    Escritura(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<calamine::Error> for GlosaError {
    fn from(e: calamine::Error) -> Self {
        GlosaError::Lectura(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GlosaError>;
