use actix_web::middleware::NormalizePath;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

use attendance_tracker::api;
use attendance_tracker::config::Config;
use attendance_tracker::docs::ApiDoc;
use attendance_tracker::routes;
use attendance_tracker::store::AttendanceStore;
use attendance_tracker::utils::logger;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let _guard = logger::init_server_logger(&config.log_dir);

    info!("Server starting...");

    let mut store = AttendanceStore::new();
    if let Some(path) = &config.data_file {
        let imported = store
            .import_from_flat_file(path)
            .with_context(|| format!("failed to preload {}", path.display()))?;
        info!(path = %path.display(), imported, "Preloaded attendance data");
    }
    let store = api::shared_store(store);

    let server_addr = config.server_addr.clone();
    info!(%server_addr, prefix = %config.api_prefix, "Listening");

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(store.clone())
            .configure(|cfg| routes::configure(cfg, &config))
            .default_service(web::to(api::endpoint_not_found))
    })
    .bind(&server_addr)?
    .run()
    .await?;

    Ok(())
}
