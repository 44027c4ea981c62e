use crate::service;

/// Service greeting
#[utoipa::path(
    get,
    path = "/",
    tag = "app",
    responses(
        (status = 200, description = "Greeting text", body = String, content_type = "text/plain")
    )
)]
pub async fn greeting() -> &'static str {
    service::greeting()
}
