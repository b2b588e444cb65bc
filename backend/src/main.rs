use actix_cors::Cors;
use actix_files::Files;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{web, App, HttpResponse, HttpServer};
use adoption_form::models::ApiResponse;
use adoption_form::{routes, ModelState, ServerConfig};
use log::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    info!("⚡ Starting Renewable Adoption Predictor");

    let config = ServerConfig::from_env();

    // A failed load keeps the server up; every page then shows the error.
    let state = ModelState::load(&config.model_path);
    match state.unavailable() {
        None => info!("✅ Model ready: {}", config.model_path.display()),
        Some(e) => match e.detail() {
            Some(detail) => error!("❌ {} {}", e, detail),
            None => error!("❌ {}", e),
        },
    }
    let model_data = web::Data::new(state);

    let bind_address = config.bind_address();
    let origin = format!("http://{}", bind_address);
    let static_dir = config.static_dir.clone();

    info!("🌐 Listening on http://{}", bind_address);
    info!("👷 Workers: {}", config.workers);
    info!("Endpoints:");
    info!("   GET  /                - Predictor form");
    info!("   POST /predict         - Form submission");
    info!("   GET  /api/health      - Health check");
    info!("   GET  /api/model-info  - Model and feature metadata");
    info!("   POST /api/predict     - JSON prediction");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&origin)
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![actix_web::http::header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .wrap(cors)
            .app_data(model_data.clone())
            .app_data(web::JsonConfig::default().limit(4096))
            .app_data(web::FormConfig::default().limit(4096))
            .configure(routes::configure)
            .service(Files::new("/static", static_dir.clone()).prefer_utf8(true))
            .default_service(web::route().to(|| async {
                HttpResponse::NotFound().json(ApiResponse::<String>::error("Not found"))
            }))
    })
    .workers(config.workers)
    .bind(&bind_address)?
    .run()
    .await
}
