//! Sumas agrupadas sobre la tabla de glosas.
//!
//! `agregar` es genérico (cualquier lista de columnas clave + una columna de valor);
//! `agregar_niveles` lo ejecuta las tres veces que necesita el reporte:
//! detalle (marca, operadora, código, descripción), código (marca, operadora, código)
//! y operadora (marca, operadora).

use std::collections::BTreeMap;

use crate::error::{GlosaError, Result};
use crate::models::{ConfigReporte, TablaGlosas};

/// Secuencia (clave, suma) en orden ascendente de clave.
pub type Agregado = Vec<(Vec<String>, f64)>;

/// Los tres niveles de agregación de una misma ejecución.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Agregados {
    pub detalle: Agregado,
    pub codigo: Agregado,
    pub operadora: Agregado,
}

/// Suma `columna_valor` agrupando por `claves`.
///
/// - Filas con alguna celda clave vacía no entran en el grupo.
/// - Montos vacíos no suman (el grupo existe igual con lo que tenga).
/// - Un monto no numérico aborta con `ValorNoNumerico`.
///
/// La suma se acumula en el orden de las filas de entrada.
pub fn agregar(tabla: &TablaGlosas, claves: &[&str], columna_valor: &str) -> Result<Agregado> {
    let indices_clave = indices(tabla, claves)?;
    let idx_valor = indices(tabla, &[columna_valor])?[0];

    let mut grupos: BTreeMap<Vec<String>, f64> = BTreeMap::new();
    'filas: for fila in 0..tabla.len() {
        let monto = tabla
            .celda(fila, idx_valor)
            .como_numero()
            .map_err(|valor| GlosaError::ValorNoNumerico {
                columna: columna_valor.to_string(),
                fila: fila + 1,
                valor,
            })?;

        let mut clave = Vec::with_capacity(indices_clave.len());
        for &i in &indices_clave {
            match tabla.celda(fila, i).como_clave() {
                Some(k) => clave.push(k),
                None => continue 'filas,
            }
        }

        *grupos.entry(clave).or_insert(0.0) += monto.unwrap_or(0.0);
    }

    Ok(grupos.into_iter().collect())
}

fn indices(tabla: &TablaGlosas, columnas: &[&str]) -> Result<Vec<usize>> {
    let mut out = Vec::with_capacity(columnas.len());
    let mut faltantes = Vec::new();
    for c in columnas {
        match tabla.indice_columna(c) {
            Some(i) => out.push(i),
            None => faltantes.push(c.to_string()),
        }
    }
    if faltantes.is_empty() { Ok(out) } else { Err(GlosaError::ColumnasFaltantes(faltantes)) }
}

/// Ejecuta las tres agregaciones del reporte sobre la tabla ya validada.
#[tracing::instrument(skip_all, fields(filas = tabla.len()))]
pub fn agregar_niveles(tabla: &TablaGlosas, config: &ConfigReporte) -> Result<Agregados> {
    let marca = config.columna_marca.as_str();
    let operadora = config.columna_operadora.as_str();
    let codigo = config.columna_codigo.as_str();
    let descripcion = config.columna_descripcion.as_str();
    let valor = config.columna_valor.as_str();

    let detalle = agregar(tabla, &[marca, operadora, codigo, descripcion], valor)?;
    let por_codigo = agregar(tabla, &[marca, operadora, codigo], valor)?;
    let por_operadora = agregar(tabla, &[marca, operadora], valor)?;

    tracing::debug!(
        detalle = detalle.len(),
        codigo = por_codigo.len(),
        operadora = por_operadora.len(),
        "agregaciones listas"
    );

    Ok(Agregados { detalle, codigo: por_codigo, operadora: por_operadora })
}
