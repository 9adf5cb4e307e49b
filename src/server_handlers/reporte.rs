use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use futures_util::stream::StreamExt;
use serde_json::json;
use std::collections::HashMap;

use crate::algorithm::construir_reporte;
use crate::error::GlosaError;
use crate::excel::{escribir_reporte_xlsx, extension_de, leer_tabla, FORMATOS_SOPORTADOS, MIME_XLSX, NOMBRE_ARCHIVO_REPORTE};
use crate::models::{ConfigReporte, FilaReporte, Variante};
use crate::server::EstadoApp;

/// Nombre informado cuando el campo `config` reemplaza el mapeo de la variante
pub const VARIANTE_PERSONALIZADA: &str = "personalizada";

/// Archivo recibido por multipart
struct Subida {
    nombre: String,
    bytes: Vec<u8>,
}

enum Formato {
    Xlsx,
    Json,
}

enum Salida {
    Xlsx(Vec<u8>),
    Json(Vec<FilaReporte>),
}

/// Traduce un error del pipeline a la respuesta HTTP correspondiente
pub fn respuesta_error(e: &GlosaError) -> HttpResponse {
    let cuerpo = json!({"error": e.to_string()});
    match e {
        GlosaError::FormatoNoSoportado(_) => HttpResponse::UnsupportedMediaType().json(cuerpo),
        GlosaError::ColumnasFaltantes(faltantes) => {
            HttpResponse::UnprocessableEntity().json(json!({"error": e.to_string(), "faltantes": faltantes}))
        }
        GlosaError::ValorNoNumerico { .. } => HttpResponse::UnprocessableEntity().json(cuerpo),
        GlosaError::Lectura(_) | GlosaError::Polars(_) => HttpResponse::BadRequest().json(cuerpo),
        _ => HttpResponse::InternalServerError().json(cuerpo),
    }
}

/// POST /reporte?variante=inicial|aceita&formato=xlsx|json
///
/// Recibe la planilla por multipart (primer campo con nombre de archivo) y
/// devuelve el reporte de ofensores. Un campo opcional `config` con JSON de
/// `ConfigReporte` reemplaza el mapeo de columnas de la variante.
pub async fn reporte_handler(
    estado: web::Data<EstadoApp>,
    query: web::Query<HashMap<String, String>>,
    mut payload: Multipart,
) -> impl Responder {
    let qm = query.into_inner();

    let variante = match qm.get("variante").map(|s| s.as_str()).filter(|s| !s.trim().is_empty()) {
        None => Variante::Inicial,
        Some(v) => match Variante::desde_nombre(v) {
            Some(var) => var,
            None => return HttpResponse::BadRequest().json(json!({"error": format!("variante desconocida: '{}'", v), "disponibles": ["inicial", "aceita"]})),
        },
    };

    let formato = match qm.get("formato").map(|s| s.trim().to_lowercase()).as_deref() {
        None | Some("") | Some("xlsx") => Formato::Xlsx,
        Some("json") => Formato::Json,
        Some(otro) => return HttpResponse::BadRequest().json(json!({"error": format!("formato de salida desconocido: '{}'", otro)})),
    };

    let limite = estado.config.max_upload_bytes;
    let mut subida: Option<Subida> = None;
    let mut config_json: Option<String> = None;

    while let Some(field_res) = payload.next().await {
        let mut field = match field_res {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("multipart field error: {}", e);
                return HttpResponse::BadRequest().json(json!({"error": format!("multipart inválido: {}", e)}));
            }
        };

        let filename = field.content_disposition().get_filename().map(|s| s.to_string());
        let es_config = field.content_disposition().get_name() == Some("config");
        if filename.is_none() && !es_config {
            continue;
        }
        if filename.is_some() && subida.is_some() {
            // sólo se procesa el primer archivo
            continue;
        }

        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(b) => {
                    if bytes.len() + b.len() > limite {
                        tracing::warn!(limite, "archivo excede el tamaño máximo");
                        return HttpResponse::PayloadTooLarge().json(json!({"error": format!("el archivo excede el máximo de {} bytes", limite)}));
                    }
                    bytes.extend_from_slice(&b);
                }
                Err(e) => {
                    tracing::warn!("upload stream error: {}", e);
                    return HttpResponse::BadRequest().json(json!({"error": format!("error al recibir el archivo: {}", e)}));
                }
            }
        }

        match filename {
            Some(nombre) => subida = Some(Subida { nombre, bytes }),
            None => config_json = Some(String::from_utf8_lossy(&bytes).into_owned()),
        }
    }

    let subida = match subida {
        Some(s) => s,
        None => return HttpResponse::BadRequest().json(json!({"error": "no se recibió ningún archivo"})),
    };

    // con `config` propio la variante sólo es un nombre: se informa como personalizada
    let (config, nombre_variante) = match config_json {
        Some(texto) => match serde_json::from_str::<ConfigReporte>(&texto) {
            Ok(c) => (c, VARIANTE_PERSONALIZADA),
            Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("config inválida: {}", e)})),
        },
        None => (variante.config(), variante.nombre()),
    };

    let ext = extension_de(&subida.nombre);
    if !FORMATOS_SOPORTADOS.contains(&ext.as_str()) {
        return respuesta_error(&GlosaError::FormatoNoSoportado(ext));
    }

    tracing::info!(archivo = %subida.nombre, bytes = subida.bytes.len(), variante = nombre_variante, "📋 procesando archivo");

    let permit = match estado.semaforo.clone().acquire_owned().await {
        Ok(p) => p,
        Err(_) => return HttpResponse::InternalServerError().json(json!({"error": "failed to acquire semaphore"})),
    };

    let en_json = matches!(formato, Formato::Json);
    let config_bloque = config.clone();
    let blocking_handle = tokio::task::spawn_blocking(move || -> Result<Salida, GlosaError> {
        let _permit = permit;
        let tabla = leer_tabla(&subida.bytes, &ext)?;
        let filas = construir_reporte(&tabla, &config_bloque)?;
        if en_json {
            Ok(Salida::Json(filas))
        } else {
            escribir_reporte_xlsx(&filas, &config_bloque.columnas_salida()).map(Salida::Xlsx)
        }
    });

    let resultado = match blocking_handle.await {
        Ok(r) => r,
        Err(e) => return HttpResponse::InternalServerError().json(json!({"error": format!("task join error: {}", e)})),
    };

    match resultado {
        Ok(Salida::Xlsx(bytes)) => HttpResponse::Ok()
            .content_type(MIME_XLSX)
            .append_header((actix_web::http::header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", NOMBRE_ARCHIVO_REPORTE)))
            .body(bytes),
        Ok(Salida::Json(filas)) => HttpResponse::Ok().json(json!({
            "variante": nombre_variante,
            "filas": filas.len(),
            "generado_en": chrono::Utc::now().to_rfc3339(),
            "columnas": config.columnas_salida(),
            "reporte": filas,
        })),
        Err(e) => {
            tracing::error!("❌ error al procesar el archivo: {}", e);
            respuesta_error(&e)
        }
    }
}
