// Núcleo del reporte de ofensores de glosa:
// validación -> agregación -> ranking -> composición de líneas.
pub mod agregacion;
pub mod formato;
pub mod ranking;
pub mod validacion;

pub use agregacion::{agregar, agregar_niveles, Agregado, Agregados};
pub use formato::{componer_ofensores, formatear_linea, formatear_valor};
pub use ranking::{rankear, Seleccion};
pub use validacion::validar_columnas;

use crate::error::Result;
use crate::models::{ConfigReporte, FilaReporte, TablaGlosas};

/// Punto de entrada del núcleo: construye las filas del reporte en orden.
///
/// Falla con `ColumnasFaltantes` antes de agregar nada si la tabla no trae las
/// columnas del manifiesto. Cualquier error aborta sin devolver filas parciales.
#[tracing::instrument(skip_all, fields(valor = %config.columna_valor))]
pub fn construir_reporte(tabla: &TablaGlosas, config: &ConfigReporte) -> Result<Vec<FilaReporte>> {
    validar_columnas(tabla, &config.columnas_requeridas())?;

    let agregados = agregar_niveles(tabla, config)?;
    let selecciones = rankear(&agregados, config)?;

    let filas: Vec<FilaReporte> = selecciones
        .into_iter()
        .map(|s| FilaReporte {
            ofensores: componer_ofensores(&s.ofensores),
            marca: s.marca,
            operadora: s.operadora,
            codigo: s.codigo,
            valor_glosado: s.total,
        })
        .collect();

    tracing::info!(entrada = tabla.len(), salida = filas.len(), "reporte construido");
    Ok(filas)
}
