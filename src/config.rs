use std::env;

pub const BIND_POR_DEFECTO: &str = "127.0.0.1:8080";
pub const MAX_UPLOAD_MB_POR_DEFECTO: usize = 50;

/// Configuración del servidor. Se lee de variables de entorno (y `.env` si existe):
/// - `GLOSAS_BIND`: dirección de escucha
/// - `GLOSAS_MAX_UPLOAD_MB`: tamaño máximo aceptado por archivo subido
/// - `GLOSAS_WORKERS`: ejecuciones simultáneas del pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigServidor {
    pub bind: String,
    pub max_upload_bytes: usize,
    pub workers: usize,
}

impl Default for ConfigServidor {
    fn default() -> Self {
        Self {
            bind: BIND_POR_DEFECTO.to_string(),
            max_upload_bytes: MAX_UPLOAD_MB_POR_DEFECTO * 1024 * 1024,
            workers: std::cmp::max(1, num_cpus::get()),
        }
    }
}

// load .env at module init if present
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

impl ConfigServidor {
    pub fn desde_entorno() -> Self {
        load_dotenv();
        Self::desde_fuente(|k| env::var(k).ok())
    }

    /// Versión parametrizable para pruebas: `leer` resuelve cada variable.
    pub fn desde_fuente<F>(leer: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = Self::default();

        let bind = match leer("GLOSAS_BIND") {
            Some(b) if !b.trim().is_empty() => b.trim().to_string(),
            _ => base.bind,
        };
        let max_upload_bytes = numero_positivo(&leer, "GLOSAS_MAX_UPLOAD_MB")
            .and_then(|mb| match mb.checked_mul(1024 * 1024) {
                Some(bytes) => Some(bytes),
                None => {
                    tracing::warn!(mb, "GLOSAS_MAX_UPLOAD_MB fuera de rango, se usa el valor por defecto");
                    None
                }
            })
            .unwrap_or(base.max_upload_bytes);
        let workers = numero_positivo(&leer, "GLOSAS_WORKERS").unwrap_or(base.workers);

        Self { bind, max_upload_bytes, workers }
    }
}

fn numero_positivo<F>(leer: &F, clave: &str) -> Option<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = leer(clave)?;
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            tracing::warn!(clave, valor = %raw, "valor inválido, se usa el valor por defecto");
            None
        }
    }
}
