// Estructuras de datos principales

use serde::{Deserialize, Serialize};

/// Textos que se leen como monto faltante (marcadores habituales de dato ausente en exportaciones).
pub const MARCADORES_FALTANTE: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const ENTERO_EXACTO_MAX: f64 = 9_007_199_254_740_992.0;

/// Valor de una celda ya decodificada desde el contenedor (xlsx/xlsb/csv).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Valor {
    Texto(String),
    Numero(f64),
    Vacio,
}

impl Valor {
    /// Construye un `Valor` a partir de texto; la cadena vacía es `Vacio`.
    pub fn texto(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() { Valor::Vacio } else { Valor::Texto(s) }
    }

    /// Representación usada como clave de agrupamiento. `None` si la celda está vacía.
    /// Los números enteros se muestran sin decimales (1901.0 -> "1901").
    pub fn como_clave(&self) -> Option<String> {
        match self {
            Valor::Texto(s) => Some(s.clone()),
            Valor::Numero(f) => {
                // sólo por debajo de 2^53 el entero es exacto y cabe en i64
                if f.is_finite() && f.abs() < ENTERO_EXACTO_MAX && (f.floor() - f).abs() < f64::EPSILON {
                    Some(format!("{}", *f as i64))
                } else {
                    Some(format!("{}", f))
                }
            }
            Valor::Vacio => None,
        }
    }

    /// Interpreta la celda como monto. `Ok(None)` para celdas vacías o con
    /// un marcador de dato faltante (`NaN`, `NA`, `N/A`, `null`...),
    /// `Err(texto)` cuando el contenido no es un número finito.
    pub fn como_numero(&self) -> Result<Option<f64>, String> {
        match self {
            Valor::Numero(f) if f.is_nan() => Ok(None),
            Valor::Numero(f) if f.is_infinite() => Err(f.to_string()),
            Valor::Numero(f) => Ok(Some(*f)),
            Valor::Vacio => Ok(None),
            Valor::Texto(s) => {
                let t = s.trim();
                if t.is_empty() || MARCADORES_FALTANTE.contains(&t) {
                    return Ok(None);
                }
                match t.parse::<f64>().or_else(|_| t.replace(',', ".").parse::<f64>()) {
                    Ok(f) if f.is_finite() => Ok(Some(f)),
                    _ => Err(s.clone()),
                }
            }
        }
    }
}

/// Tabla de líneas de glosa ya parseada: encabezados + filas de celdas.
/// Es propiedad del llamador; el núcleo sólo la lee.
#[derive(Debug, Clone, Default)]
pub struct TablaGlosas {
    pub columnas: Vec<String>,
    pub filas: Vec<Vec<Valor>>,
}

impl TablaGlosas {
    pub fn new(columnas: Vec<String>, filas: Vec<Vec<Valor>>) -> Self {
        Self { columnas, filas }
    }

    /// Índice de la columna con ese nombre exacto
    pub fn indice_columna(&self, nombre: &str) -> Option<usize> {
        self.columnas.iter().position(|c| c == nombre)
    }

    /// Celda (fila, col); filas más cortas que el encabezado se leen como `Vacio`.
    pub fn celda(&self, fila: usize, col: usize) -> &Valor {
        static VACIO: Valor = Valor::Vacio;
        self.filas.get(fila).and_then(|f| f.get(col)).unwrap_or(&VACIO)
    }

    pub fn len(&self) -> usize {
        self.filas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filas.is_empty()
    }
}

/// Variantes conocidas del reporte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variante {
    Inicial,
    Aceita,
}

impl Variante {
    pub fn desde_nombre(nombre: &str) -> Option<Self> {
        match nombre.trim().to_lowercase().as_str() {
            "inicial" | "glosa_inicial" | "glosa inicial" => Some(Variante::Inicial),
            "aceita" | "glosa_aceita" | "glosa aceita" => Some(Variante::Aceita),
            _ => None,
        }
    }

    pub fn nombre(&self) -> &'static str {
        match self {
            Variante::Inicial => "inicial",
            Variante::Aceita => "aceita",
        }
    }

    pub fn config(&self) -> ConfigReporte {
        match self {
            Variante::Inicial => ConfigReporte::glosa_inicial(),
            Variante::Aceita => ConfigReporte::glosa_aceita(),
        }
    }
}

/// Parámetros del pipeline: qué columna juega cada papel y los límites top-K / top-M.
///
/// # JSON esperado (los límites y el rótulo son opcionales):
/// ```json
/// {
///   "columna_marca": "Marca",
///   "columna_operadora": "Operadora",
///   "columna_codigo": "Motivo Operadora (Código)",
///   "columna_valor": "Glosa Inicial",
///   "columna_descripcion": "Desc. Proced. DCM",
///   "top_codigos": 8,
///   "top_detalles": 5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigReporte {
    pub columna_marca: String,
    pub columna_operadora: String,
    pub columna_codigo: String,
    pub columna_valor: String,
    pub columna_descripcion: String,
    #[serde(default = "default_top_codigos")]
    pub top_codigos: usize,
    #[serde(default = "default_top_detalles")]
    pub top_detalles: usize,
    // Sólo cosmético: la truncación real la define `top_detalles`
    #[serde(default = "default_rotulo_ofensores")]
    pub rotulo_ofensores: String,
}

fn default_top_codigos() -> usize { 8 }
fn default_top_detalles() -> usize { 5 }
fn default_rotulo_ofensores() -> String { "Ofensores (TOP 5)".to_string() }

impl ConfigReporte {
    /// Variante "Glosa Inicial"
    pub fn glosa_inicial() -> Self {
        Self {
            columna_marca: "Marca".to_string(),
            columna_operadora: "Operadora".to_string(),
            columna_codigo: "Motivo Operadora (Código)".to_string(),
            columna_valor: "Glosa Inicial".to_string(),
            columna_descripcion: "Desc. Proced. DCM".to_string(),
            top_codigos: default_top_codigos(),
            top_detalles: default_top_detalles(),
            rotulo_ofensores: default_rotulo_ofensores(),
        }
    }

    /// Variante "Glosa Aceita"
    pub fn glosa_aceita() -> Self {
        Self {
            columna_marca: "Marca".to_string(),
            columna_operadora: "Operadora".to_string(),
            columna_codigo: "Motivo Glosa Operadora (Código)".to_string(),
            columna_valor: "Glosa Aceita".to_string(),
            columna_descripcion: "Procedimento (Descrição)".to_string(),
            top_codigos: default_top_codigos(),
            top_detalles: default_top_detalles(),
            rotulo_ofensores: default_rotulo_ofensores(),
        }
    }

    /// Manifiesto de columnas requeridas, en el orden en que se reportan las faltantes.
    pub fn columnas_requeridas(&self) -> [&str; 5] {
        [
            self.columna_marca.as_str(),
            self.columna_operadora.as_str(),
            self.columna_codigo.as_str(),
            self.columna_valor.as_str(),
            self.columna_descripcion.as_str(),
        ]
    }

    pub fn columnas_salida(&self) -> ColumnasReporte {
        ColumnasReporte::con_rotulo(&self.rotulo_ofensores)
    }
}

impl Default for ConfigReporte {
    fn default() -> Self {
        Self::glosa_inicial()
    }
}

/// Una fila del reporte final: (marca, operadora, código, total, texto de ofensores)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilaReporte {
    pub marca: String,
    pub operadora: String,
    pub codigo: String,
    pub valor_glosado: f64,
    pub ofensores: String,
}

/// Nombres fijos de las columnas de salida
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnasReporte {
    pub unidade: String,
    pub operadora: String,
    pub codigo: String,
    pub valor: String,
    pub ofensores: String,
}

impl ColumnasReporte {
    pub fn con_rotulo(rotulo_ofensores: &str) -> Self {
        Self {
            unidade: "Unidade".to_string(),
            operadora: "Operadora".to_string(),
            codigo: "Código de Glosa".to_string(),
            valor: "Valor Glosado".to_string(),
            ofensores: rotulo_ofensores.to_string(),
        }
    }

    pub fn como_lista(&self) -> [&str; 5] {
        [&self.unidade, &self.operadora, &self.codigo, &self.valor, &self.ofensores]
    }
}

impl Default for ColumnasReporte {
    fn default() -> Self {
        Self::con_rotulo(&default_rotulo_ofensores())
    }
}
