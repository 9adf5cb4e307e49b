use std::io::Cursor;
use std::path::Path;

use crate::error::{GlosaError, Result};
use crate::models::{ColumnasReporte, FilaReporte};

/// Nombre con el que se entrega el reporte para descarga
pub const NOMBRE_ARCHIVO_REPORTE: &str = "resultado_formatado.xlsx";
pub const MIME_XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Serializa las filas del reporte a un libro xlsx en memoria.
/// Una sola hoja: encabezado en la fila 1 y una fila por `FilaReporte`.
pub fn escribir_reporte_xlsx(filas: &[FilaReporte], columnas: &ColumnasReporte) -> Result<Vec<u8>> {
    let mut book = umya_spreadsheet::new_file();
    let hoja = book
        .get_sheet_by_name_mut("Sheet1")
        .ok_or_else(|| GlosaError::Escritura("el libro nuevo no trae la hoja inicial".to_string()))?;

    for (i, nombre) in columnas.como_lista().iter().enumerate() {
        hoja.get_cell_mut((i as u32 + 1, 1)).set_value(*nombre);
    }

    for (i, fila) in filas.iter().enumerate() {
        let r = i as u32 + 2;
        hoja.get_cell_mut((1, r)).set_value(fila.marca.as_str());
        hoja.get_cell_mut((2, r)).set_value(fila.operadora.as_str());
        hoja.get_cell_mut((3, r)).set_value(fila.codigo.as_str());
        hoja.get_cell_mut((4, r)).set_value_number(fila.valor_glosado);
        hoja.get_cell_mut((5, r)).set_value(fila.ofensores.as_str());
    }

    let mut buffer = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut buffer)
        .map_err(|e| GlosaError::Escritura(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Igual que `escribir_reporte_xlsx` pero deja el resultado en disco
pub fn escribir_reporte_archivo<P: AsRef<Path>>(filas: &[FilaReporte], columnas: &ColumnasReporte, path: P) -> Result<()> {
    let bytes = escribir_reporte_xlsx(filas, columnas)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
