pub mod config;
pub mod cors;
pub mod error;
pub mod handlers;
pub mod models;
pub mod server;
pub mod service;
pub mod validation;

pub use config::Config;
pub use error::{ApiError, StartupError};
pub use models::HealthStatus;
pub use validation::ValidatedJson;

use axum::{routing::get, Router};
use config::DocsConfig;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory Service API",
        description = "API para gestión de inventario",
        version = "1.0.0"
    ),
    paths(
        handlers::greeting::greeting,
        handlers::health::health_check,
    ),
    components(
        schemas(
            models::HealthStatus,
            models::ErrorBody,
        )
    ),
    tags(
        (name = "app", description = "Greeting and health endpoints"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI document, with metadata taken from `docs`
pub fn api_doc(docs: &DocsConfig) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = docs.title.clone();
    doc.info.description = Some(docs.description.clone());
    doc.info.version = docs.version.clone();
    doc
}

/// Build the application router: routes, documentation, request tracing and CORS
pub fn create_router(config: &Config) -> Result<Router, StartupError> {
    let cors = cors::cors_layer(&config.cors)?;

    let app = Router::new()
        .route("/", get(handlers::greeting::greeting))
        .route("/health", get(handlers::health::health_check))
        .merge(
            SwaggerUi::new(config.docs.path.clone())
                .url(config.docs.spec_path.clone(), api_doc(&config.docs)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Ok(app)
}
