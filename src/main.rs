// --- Plan de Acción de Glosas - Archivo principal ---

use glosas::config::ConfigServidor;
use glosas::run_server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let config = ConfigServidor::desde_entorno();
    tracing::info!("=== Plan de Acción de Glosas (API) ===");
    tracing::info!("Iniciando servidor en http://{}", config.bind);
    run_server(config).await
}
