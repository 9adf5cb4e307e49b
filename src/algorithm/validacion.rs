//! Validación del esquema de entrada contra el manifiesto de columnas requeridas.

use crate::error::{GlosaError, Result};
use crate::models::TablaGlosas;

/// Verifica que todas las columnas del manifiesto existan en la tabla.
/// Sólo mira los encabezados, nunca los valores de las filas.
/// Devuelve `ColumnasFaltantes` con todas las ausentes, en el orden del manifiesto.
pub fn validar_columnas(tabla: &TablaGlosas, requeridas: &[&str]) -> Result<()> {
    let faltantes: Vec<String> = requeridas
        .iter()
        .filter(|col| tabla.indice_columna(col).is_none())
        .map(|col| col.to_string())
        .collect();

    if faltantes.is_empty() {
        Ok(())
    } else {
        tracing::warn!(?faltantes, "columnas requeridas ausentes");
        Err(GlosaError::ColumnasFaltantes(faltantes))
    }
}
