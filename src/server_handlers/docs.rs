use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::excel::FORMATOS_SOPORTADOS;
use crate::models::{ConfigReporte, Variante};

fn describir(variante: Variante) -> serde_json::Value {
    let cfg = variante.config();
    json!({
        "variante": variante.nombre(),
        "columnas_requeridas": cfg.columnas_requeridas(),
        "top_codigos": cfg.top_codigos,
        "top_detalles": cfg.top_detalles,
        "columnas_salida": cfg.columnas_salida(),
    })
}

/// GET /variantes
pub async fn variantes_handler() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "variantes": [describir(Variante::Inicial), describir(Variante::Aceita)]
    }))
}

pub async fn help_handler() -> impl Responder {
    let ejemplo_config = ConfigReporte::glosa_inicial();

    let help = json!({
        "description": "API para generar el plan de acción de glosas: por unidad, operadora y código de glosa, el total glosado y los procedimientos que más contribuyen (TOP 5).",
        "endpoints": {
            "POST /reporte": "multipart con el archivo (xlsx, xlsb o csv). Query: variante=inicial|aceita, formato=xlsx|json. Campo opcional 'config' con el mapeo de columnas.",
            "GET /variantes": "columnas requeridas por cada variante",
            "GET /help": "esta ayuda"
        },
        "formatos_entrada": FORMATOS_SOPORTADOS,
        "config_example": ejemplo_config,
        "example_curl": "curl -F 'archivo=@glosas.xlsx' 'http://127.0.0.1:8080/reporte?variante=inicial' -o resultado_formatado.xlsx"
    });

    HttpResponse::Ok().json(help)
}
