//! Orden de visita y truncación del reporte.
//!
//! - marcas: orden ascendente natural (el de la agregación por código)
//! - operadoras de cada marca: total descendente, todas
//! - códigos de cada operadora: total descendente, sólo los primeros `top_codigos`
//! - ofensores de cada código: total descendente, sólo los primeros `top_detalles`
//!
//! Todos los ordenamientos son estables: en empate se conserva el orden ascendente de clave.

use std::collections::{HashMap, HashSet};

use crate::algorithm::agregacion::Agregados;
use crate::error::{GlosaError, Result};
use crate::models::ConfigReporte;

/// Un triple (marca, operadora, código) elegido, con su total y sus ofensores ya ordenados.
#[derive(Debug, Clone, PartialEq)]
pub struct Seleccion {
    pub marca: String,
    pub operadora: String,
    pub codigo: String,
    pub total: f64,
    pub ofensores: Vec<(String, f64)>,
}

type Par<'a> = (&'a str, &'a str);
type Triple<'a> = (&'a str, &'a str, &'a str);

/// Índices por clave para evitar recorrer los agregados completos en cada grupo.
struct Indices<'a> {
    marcas: Vec<&'a str>,
    operadoras: HashMap<&'a str, Vec<(&'a str, f64)>>,
    codigos: HashMap<Par<'a>, Vec<(&'a str, f64)>>,
    detalles: HashMap<Triple<'a>, Vec<(&'a str, f64)>>,
    // total por código y cuántas filas de la agregación lo definen
    totales: HashMap<Triple<'a>, (f64, usize)>,
}

impl<'a> Indices<'a> {
    fn construir(agregados: &'a Agregados) -> Self {
        let mut marcas: Vec<&str> = Vec::new();
        let mut vistas: HashSet<&str> = HashSet::new();
        let mut codigos: HashMap<Par, Vec<(&str, f64)>> = HashMap::new();
        let mut totales: HashMap<Triple, (f64, usize)> = HashMap::new();

        for (clave, suma) in &agregados.codigo {
            if let [m, o, c] = clave.as_slice() {
                if vistas.insert(m.as_str()) {
                    marcas.push(m.as_str());
                }
                codigos.entry((m.as_str(), o.as_str())).or_default().push((c.as_str(), *suma));
                let entrada = totales.entry((m.as_str(), o.as_str(), c.as_str())).or_insert((0.0, 0));
                entrada.0 = *suma;
                entrada.1 += 1;
            }
        }

        let mut operadoras: HashMap<&str, Vec<(&str, f64)>> = HashMap::new();
        for (clave, suma) in &agregados.operadora {
            if let [m, o] = clave.as_slice() {
                operadoras.entry(m.as_str()).or_default().push((o.as_str(), *suma));
            }
        }

        let mut detalles: HashMap<Triple, Vec<(&str, f64)>> = HashMap::new();
        for (clave, suma) in &agregados.detalle {
            if let [m, o, c, d] = clave.as_slice() {
                detalles
                    .entry((m.as_str(), o.as_str(), c.as_str()))
                    .or_default()
                    .push((d.as_str(), *suma));
            }
        }

        Self { marcas, operadoras, codigos, detalles, totales }
    }
}

/// Orden estable por monto descendente (orden total, también con NaN).
fn ordenar_desc<T>(v: &mut [(T, f64)]) {
    v.sort_by(|a, b| b.1.total_cmp(&a.1));
}

/// Recorre marca -> operadora -> código y devuelve las selecciones en orden de reporte.
#[tracing::instrument(skip_all)]
pub fn rankear(agregados: &Agregados, config: &ConfigReporte) -> Result<Vec<Seleccion>> {
    let idx = Indices::construir(agregados);
    let mut out: Vec<Seleccion> = Vec::new();

    for &marca in &idx.marcas {
        let mut operadoras = idx.operadoras.get(marca).cloned().unwrap_or_default();
        ordenar_desc(&mut operadoras);

        for (operadora, _) in operadoras {
            let mut codigos = idx.codigos.get(&(marca, operadora)).cloned().unwrap_or_default();
            ordenar_desc(&mut codigos);

            let mut elegidos: Vec<&str> = Vec::new();
            for (codigo, _) in codigos {
                if elegidos.len() >= config.top_codigos {
                    break;
                }
                if !elegidos.contains(&codigo) {
                    elegidos.push(codigo);
                }
            }

            for codigo in elegidos {
                let total = match idx.totales.get(&(marca, operadora, codigo)) {
                    Some((total, 1)) => *total,
                    Some((_, n)) => return Err(inconsistencia(marca, operadora, codigo, *n)),
                    None => return Err(inconsistencia(marca, operadora, codigo, 0)),
                };

                let mut detalles = idx
                    .detalles
                    .get(&(marca, operadora, codigo))
                    .cloned()
                    .unwrap_or_default();
                ordenar_desc(&mut detalles);
                detalles.truncate(config.top_detalles);

                out.push(Seleccion {
                    marca: marca.to_string(),
                    operadora: operadora.to_string(),
                    codigo: codigo.to_string(),
                    total,
                    ofensores: detalles.into_iter().map(|(d, v)| (d.to_string(), v)).collect(),
                });
            }
        }
    }

    Ok(out)
}

fn inconsistencia(marca: &str, operadora: &str, codigo: &str, coincidencias: usize) -> GlosaError {
    tracing::error!(marca, operadora, codigo, coincidencias, "total por código inconsistente");
    GlosaError::ConsistenciaAgregacion {
        marca: marca.to_string(),
        operadora: operadora.to_string(),
        codigo: codigo.to_string(),
        coincidencias,
    }
}
