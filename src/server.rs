use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::config::ConfigServidor;
use crate::server_handlers::{help_handler, reporte_handler, variantes_handler};

/// Estado compartido por los handlers: configuración y límite de ejecuciones simultáneas.
pub struct EstadoApp {
    pub config: ConfigServidor,
    pub semaforo: Arc<Semaphore>,
}

impl EstadoApp {
    pub fn new(config: ConfigServidor) -> Self {
        let permisos = std::cmp::max(1, config.workers);
        Self { config, semaforo: Arc::new(Semaphore::new(permisos)) }
    }
}

/// Registra las rutas; se usa tanto en `run_server` como en los tests.
pub fn configurar_rutas(cfg: &mut web::ServiceConfig) {
    cfg.route("/reporte", web::post().to(reporte_handler))
        .route("/variantes", web::get().to(variantes_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(config: ConfigServidor) -> std::io::Result<()> {
    let bind = config.bind.clone();
    let estado = web::Data::new(EstadoApp::new(config));
    tracing::info!(%bind, workers = estado.config.workers, "iniciando servidor");

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(estado.clone())
            .configure(configurar_rutas)
    })
    .bind(bind)?
    .run()
    .await
}
