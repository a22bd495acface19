pub mod auth;
pub mod events;
pub mod home;
pub mod tickets;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Assemble the full route surface over the given state. Middleware layers
/// (tracing, CORS) are applied by the caller.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::index))
        .merge(auth::router())
        .merge(events::router())
        .merge(tickets::router())
        .with_state(state)
}
