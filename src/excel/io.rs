use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use polars::prelude::*;

use crate::error::{GlosaError, Result};
use crate::models::{TablaGlosas, Valor};

/// Formatos de entrada aceptados (por extensión del archivo)
pub const FORMATOS_SOPORTADOS: [&str; 3] = ["xlsb", "xlsx", "csv"];

/// Convierte un `Data` de calamine a `Valor`
pub fn celda_a_valor(c: &Data) -> Valor {
    match c {
        Data::String(s) => Valor::texto(s.as_str()),
        Data::Float(f) => Valor::Numero(*f),
        Data::Int(i) => Valor::Numero(*i as f64),
        Data::Bool(b) => Valor::Texto(b.to_string()),
        Data::Empty => Valor::Vacio,
        Data::Error(_) => Valor::Vacio,
        Data::DateTime(s) => Valor::Texto(s.to_string()),
        Data::DateTimeIso(s) => Valor::texto(s.as_str()),
        Data::DurationIso(s) => Valor::texto(s.as_str()),
    }
}

/// Texto de un encabezado (sin espacios en los bordes)
fn encabezado(c: &Data) -> String {
    match celda_a_valor(c) {
        Valor::Texto(s) => s.trim().to_string(),
        otro => otro.como_clave().unwrap_or_default(),
    }
}

/// Extensión en minúsculas de un nombre de archivo ("Glosas.XLSX" -> "xlsx")
pub fn extension_de(nombre: &str) -> String {
    match nombre.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// Decodifica el contenido de un archivo según su extensión.
/// Para planillas se usa la primera hoja y su primera fila como encabezado.
pub fn leer_tabla(bytes: &[u8], extension: &str) -> Result<TablaGlosas> {
    let ext = extension.trim().trim_start_matches('.').to_lowercase();
    let tabla = match ext.as_str() {
        "xlsx" | "xlsb" => leer_planilla(bytes)?,
        "csv" => leer_csv(bytes)?,
        _ => return Err(GlosaError::FormatoNoSoportado(extension.to_string())),
    };
    tracing::debug!(formato = %ext, columnas = tabla.columnas.len(), filas = tabla.len(), "tabla decodificada");
    Ok(tabla)
}

/// Lee un archivo del disco y lo decodifica según su extensión
pub fn leer_tabla_archivo<P: AsRef<Path>>(path: P) -> Result<TablaGlosas> {
    let path = path.as_ref();
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_lowercase();
    if !FORMATOS_SOPORTADOS.contains(&ext.as_str()) {
        return Err(GlosaError::FormatoNoSoportado(ext));
    }
    let bytes = std::fs::read(path)?;
    leer_tabla(&bytes, &ext)
}

fn leer_planilla(bytes: &[u8]) -> Result<TablaGlosas> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let primera = match workbook.sheet_names().first() {
        Some(n) => n.clone(),
        None => return Ok(TablaGlosas::default()),
    };
    let range = workbook.worksheet_range(&primera)?;

    let mut rows = range.rows();
    let columnas: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(encabezado).collect(),
        None => return Ok(TablaGlosas::default()),
    };
    let filas: Vec<Vec<Valor>> = rows.map(|r| r.iter().map(celda_a_valor).collect()).collect();

    Ok(TablaGlosas::new(columnas, filas))
}

// Todas las columnas se leen como texto; la conversión del monto la hace el núcleo.
fn leer_csv(bytes: &[u8]) -> Result<TablaGlosas> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()?;

    let columnas: Vec<String> = df.get_column_names().iter().map(|c| c.to_string()).collect();
    let mut filas: Vec<Vec<Valor>> = (0..df.height()).map(|_| Vec::with_capacity(columnas.len())).collect();

    for columna in df.get_columns() {
        let serie = columna.as_materialized_series().cast(&DataType::String)?;
        for (i, celda) in serie.str()?.into_iter().enumerate() {
            filas[i].push(celda.map(Valor::texto).unwrap_or(Valor::Vacio));
        }
    }

    Ok(TablaGlosas::new(columnas, filas))
}
