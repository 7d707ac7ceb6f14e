use crate::{
    api::{self, filter, records, summary, transfer},
    config::Config,
};
use actix_cors::Cors;
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

// Helper to build the per-IP limiter
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    let cfg = GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .expect("period and burst size are both non-zero");
    Governor::new(&cfg)
}

// Browser dashboards call the API cross-origin; no origins configured means any
fn build_cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);
    if origins.is_empty() {
        return cors.allow_any_origin();
    }
    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

/// Envelope-shaped 400/404s for extractor failures.
pub fn extractor_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(api::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(api::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(api::path_error_handler));
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    extractor_config(cfg);

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(build_limiter(config.rate_per_min)) // rate limiting
            .wrap(build_cors(&config.cors_origins))
            .service(web::resource("/health").route(web::get().to(api::health)))
            .service(
                web::scope("/records")
                    // /records
                    .service(
                        web::resource("")
                            .route(web::post().to(records::add_record))
                            .route(web::get().to(records::list_records)),
                    )
                    // /records/{emp_id}
                    .service(
                        web::resource("/{emp_id}")
                            .route(web::get().to(records::get_employee_records)),
                    )
                    // /records/{emp_id}/{date}
                    .service(
                        web::resource("/{emp_id}/{date}")
                            .route(web::delete().to(records::delete_record)),
                    ),
            )
            .service(
                web::scope("/summary")
                    // /summary
                    .service(web::resource("").route(web::get().to(summary::all_summaries)))
                    // /summary/{emp_id}
                    .service(
                        web::resource("/{emp_id}").route(web::get().to(summary::employee_summary)),
                    ),
            )
            .service(web::resource("/filter").route(web::get().to(filter::filter_records)))
            .service(web::resource("/export").route(web::get().to(transfer::export_records)))
            .service(web::resource("/import").route(web::post().to(transfer::import_records))),
    );
}
