use axum::Json;

/// GET / — API banner.
pub async fn index() -> Json<&'static str> {
    Json("Welcome to Eventra API")
}
